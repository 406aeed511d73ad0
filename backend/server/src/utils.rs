use axum::http::{HeaderMap, header::COOKIE};

pub const VOTER_COOKIE: &str = "voter_id";

// One year
const VOTER_COOKIE_MAX_AGE: u64 = 60 * 60 * 24 * 365;

pub fn new_voter_id() -> String {
    format!("{:x}", rand::random::<u64>())
}

pub fn voter_id_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|cookies| cookies.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, value)| *name == VOTER_COOKIE && !value.is_empty())
        .map(|(_, value)| value.to_string())
}

pub fn resolve_voter_id(headers: &HeaderMap) -> String {
    voter_id_from_headers(headers).unwrap_or_else(new_voter_id)
}

pub fn voter_cookie(voter_id: &str, secure: bool) -> String {
    let mut cookie = format!(
        "{VOTER_COOKIE}={voter_id}; Path=/; Max-Age={VOTER_COOKIE_MAX_AGE}; HttpOnly; SameSite=Lax"
    );

    if secure {
        cookie.push_str("; Secure");
    }

    cookie
}

#[cfg(test)]
mod tests {
    use axum::http::{HeaderMap, HeaderValue, header::COOKIE};

    use super::{new_voter_id, resolve_voter_id, voter_cookie, voter_id_from_headers};

    fn headers_with(cookies: &[&str]) -> HeaderMap {
        let mut headers = HeaderMap::new();
        for cookie in cookies {
            headers.append(COOKIE, HeaderValue::from_str(cookie).unwrap());
        }

        headers
    }

    #[test]
    fn test_voter_id_is_clean_hex() {
        for _ in 0..1000 {
            let id = new_voter_id();

            assert!(!id.is_empty());
            assert!(id.len() <= 16);
            assert!(!id.starts_with("0x"));
            assert!(id.chars().all(|c| matches!(c, '0'..='9' | 'a'..='f')));
        }
    }

    #[test]
    fn test_voter_ids_differ() {
        assert_ne!(new_voter_id(), new_voter_id());
    }

    #[test]
    fn test_cookie_lookup() {
        let headers = headers_with(&["theme=dark; voter_id=deadbeef; lang=en"]);

        assert_eq!(voter_id_from_headers(&headers).as_deref(), Some("deadbeef"));
    }

    #[test]
    fn test_cookie_lookup_across_headers() {
        let headers = headers_with(&["theme=dark", "voter_id=c0ffee"]);

        assert_eq!(voter_id_from_headers(&headers).as_deref(), Some("c0ffee"));
    }

    #[test]
    fn test_missing_or_empty_cookie() {
        assert_eq!(voter_id_from_headers(&HeaderMap::new()), None);
        assert_eq!(voter_id_from_headers(&headers_with(&["voter_id="])), None);
        assert_eq!(voter_id_from_headers(&headers_with(&["my_voter_id=1"])), None);
    }

    #[test]
    fn test_resolve_keeps_existing_id() {
        let headers = headers_with(&["voter_id=abc123"]);

        assert_eq!(resolve_voter_id(&headers), "abc123");
        assert!(!resolve_voter_id(&HeaderMap::new()).is_empty());
    }

    #[test]
    fn test_cookie_flags() {
        assert_eq!(
            voter_cookie("ab12", false),
            "voter_id=ab12; Path=/; Max-Age=31536000; HttpOnly; SameSite=Lax"
        );
        assert!(voter_cookie("ab12", true).ends_with("; Secure"));
    }
}
