use std::sync::Arc;

use axum::{
    Form, extract,
    extract::rejection::FormRejection,
    http::{HeaderMap, header::SET_COOKIE},
    response::{Html, IntoResponse, Response},
};
use tracing::{error, info, warn};

use crate::{
    database::VoteEvent,
    error::AppError,
    page::{NOT_RECORDED, PageContext, render_page},
    state::State,
    utils::{resolve_voter_id, voter_cookie},
};

// Repeated keys are allowed, the first `vote` wins
type VoteForm = Vec<(String, String)>;

pub async fn page_handler(
    extract::State(state): extract::State<Arc<State>>,
    headers: HeaderMap,
) -> Response {
    let voter_id = resolve_voter_id(&headers);

    respond(&state, &voter_id, page(&state, None, None))
}

pub async fn vote_handler(
    extract::State(state): extract::State<Arc<State>>,
    headers: HeaderMap,
    form: Result<Form<VoteForm>, FormRejection>,
) -> Response {
    let voter_id = resolve_voter_id(&headers);

    let vote = match form {
        Ok(Form(fields)) => match first_vote(fields) {
            Some(vote) => vote,
            None => return respond(&state, &voter_id, AppError::MissingVote),
        },
        Err(e) => {
            warn!("Rejected vote form: {e}");

            return respond(&state, &voter_id, AppError::MalformedPayload);
        }
    };

    info!("Received vote for {vote}");

    let event = VoteEvent {
        voter_id: voter_id.clone(),
        vote,
    };

    let body = match state.queue.push(&event).await {
        Ok(()) => page(&state, Some(event.vote.as_str()), None),
        Err(e) => {
            error!("Error processing vote from {voter_id}: {e}");

            page(&state, None, Some(NOT_RECORDED))
        }
    };

    respond(&state, &voter_id, body)
}

fn first_vote(fields: VoteForm) -> Option<String> {
    fields
        .into_iter()
        .find(|(name, _)| name == "vote")
        .map(|(_, vote)| vote)
}

fn page(state: &State, vote: Option<&str>, notice: Option<&str>) -> Html<String> {
    Html(render_page(&PageContext {
        option_a: &state.config.option_a,
        option_b: &state.config.option_b,
        hostname: &state.config.hostname,
        vote,
        notice,
    }))
}

fn respond(state: &State, voter_id: &str, body: impl IntoResponse) -> Response {
    let cookie = voter_cookie(voter_id, state.config.cookie_secure);

    ([(SET_COOKIE, cookie)], body).into_response()
}
