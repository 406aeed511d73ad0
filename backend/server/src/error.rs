use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use redis::RedisError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing vote")]
    MissingVote,

    #[error("Malformed vote form")]
    MalformedPayload,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            AppError::MissingVote | AppError::MalformedPayload => StatusCode::BAD_REQUEST,
        };

        (status, self.to_string()).into_response()
    }
}

#[derive(Error, Debug)]
pub enum QueueError {
    #[error("Failed to connect to Redis: {0}")]
    Connect(#[source] RedisError),

    #[error("Timed out during {0}")]
    Timeout(&'static str),

    #[error("Redis did not answer PING: {0}")]
    Probe(#[source] RedisError),

    #[error("Failed to push vote: {0}")]
    Push(#[source] RedisError),

    #[error("Failed to encode vote: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Invalid {key} value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },
}

#[derive(Error, Debug)]
pub enum ServerError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Invalid Redis address: {0}")]
    Redis(#[from] RedisError),

    #[error("Server io error: {0}")]
    Io(#[from] std::io::Error),
}
