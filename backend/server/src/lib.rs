//! Documentation of a two-option voting form.
//!
//!
//!
//! # General Infrastructure
//! - User loads the form from any web container, each container renders its own hostname
//! - Votes are pushed onto a Redis list named `votes`, one JSON object per vote
//! - A separate worker drains that list and tallies, results are served elsewhere
//! - Containers talk to Redis using internal names, `redis:6379` by default
//!
//!
//!
//! # Voter Identity
//!
//! **Goal**: Correlate repeated votes from one browser without any login.
//!
//! - First visit gets a random 64-bit id as lowercase hex in a `voter_id` cookie
//! - Every later response echoes that same cookie back, so it never changes
//! - Nothing is kept server side, the worker decides what to do with repeat votes
//!
//!
//!
//! # Failure Policy
//!
//! - Redis down or slow (5 second bound): the page still renders with status 200
//! - The vote is not echoed and a notice asks the user to try again
//! - Nothing is buffered or retried by the server
//! - Missing `vote` field or undecodable form: 400, the first `vote` wins when repeated
//!
//!
//!
//! # Environment
//!
//! | Name | Default |
//! |---|---|
//! | `OPTION_A` | Cats |
//! | `OPTION_B` | Dogs |
//! | `REDIS_HOST` | redis |
//! | `REDIS_PORT` | 6379 |
//! | `PORT` | 8080 |
//! | `COOKIE_SECURE` | false |
//! | `RUST_LOG` | info |
//!
//!
//!
//! # Setup
//!
//! Run against a local Redis.
//! ```sh
//! REDIS_HOST=localhost cargo run -p vote
//! ```
//!
//! Watch votes arrive.
//! ```sh
//! redis-cli lrange votes 0 -1
//! ```
use std::sync::Arc;

use axum::{Router, routing::get};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::trace::TraceLayer;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod database;
pub mod error;
pub mod page;
pub mod routes;
pub mod state;
pub mod utils;

use config::Config;
use error::ServerError;
use routes::{page_handler, vote_handler};
use state::State;

pub async fn start_server() -> Result<(), ServerError> {
    fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config)?;

    info!("Starting server...");

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address).await?;
    info!("Server running on {address}");

    axum::serve(listener, app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");

    Ok(())
}

pub fn app(state: Arc<State>) -> Router {
    Router::new()
        .route("/", get(page_handler).post(vote_handler))
        .route("/vote", get(page_handler).post(vote_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        ctrl_c().await.expect("Failed to install Ctrl+C handler");

        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        signal(SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;

        info!("Received terminate signal, shutting down");
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
