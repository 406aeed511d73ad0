//! # Page
//!
//! Server-rendered voting form. The template is compiled into the binary and
//! filled in a single pass, so values containing `{{...}}` are never expanded.
const TEMPLATE: &str = include_str!("../templates/index.html");

pub const NOT_RECORDED: &str = "Your vote could not be recorded, please try again.";

pub struct PageContext<'a> {
    pub option_a: &'a str,
    pub option_b: &'a str,
    pub hostname: &'a str,
    pub vote: Option<&'a str>,
    pub notice: Option<&'a str>,
}

pub fn render_page(context: &PageContext) -> String {
    let mut html = String::with_capacity(TEMPLATE.len() + 256);
    let mut rest = TEMPLATE;

    while let Some(start) = rest.find("{{") {
        html.push_str(&rest[..start]);

        let after = &rest[start + 2..];
        let Some(end) = after.find("}}") else {
            html.push_str(&rest[start..]);
            return html;
        };

        html.push_str(&placeholder(context, &after[..end]));
        rest = &after[end + 2..];
    }

    html.push_str(rest);
    html
}

fn placeholder(context: &PageContext, name: &str) -> String {
    match name {
        "OPTION_A" => escape(context.option_a),
        "OPTION_B" => escape(context.option_b),
        "HOSTNAME" => escape(context.hostname),
        "SELECTED_A" => selected(context.vote, "a"),
        "SELECTED_B" => selected(context.vote, "b"),
        "VOTE" => match context.vote {
            // known choices are shown by the selected button
            Some("a") | Some("b") | None => String::new(),
            Some(other) => format!("<p class=\"vote\">You voted for {}</p>", escape(other)),
        },
        "NOTICE" => context
            .notice
            .map(|notice| format!("<p class=\"notice\">{}</p>", escape(notice)))
            .unwrap_or_default(),
        unknown => format!("{{{{{unknown}}}}}"),
    }
}

fn selected(vote: Option<&str>, choice: &str) -> String {
    if vote == Some(choice) {
        " selected".to_string()
    } else {
        String::new()
    }
}

pub fn escape(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());

    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }

    escaped
}
