//! # Redis
//!
//! Append-only mailbox for votes.
//!
//! ## Implementation
//!
//! - Redis list under the `votes` key, one JSON object per vote
//! - `RPUSH` to the tail, a separate worker drains and tallies from the head
//! - No deduplication here: the same voter may push any number of events
//! - Fresh connection per vote with a `PING` probe, dropped once the vote is pushed
//! - Every network step is bounded by [`REDIS_TIMEOUT`], no retries
use std::{future::Future, time::Duration};

use async_trait::async_trait;
use redis::{AsyncCommands, Client, RedisError, aio::MultiplexedConnection};
use serde::{Deserialize, Serialize};
use tokio::time::timeout;
use tracing::{error, info};

use crate::error::QueueError;

pub const VOTES_KEY: &str = "votes";
pub const REDIS_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct VoteEvent {
    pub voter_id: String,
    pub vote: String,
}

impl VoteEvent {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

#[async_trait]
pub trait VoteQueue: Send + Sync {
    async fn push(&self, event: &VoteEvent) -> Result<(), QueueError>;
}

pub struct RedisQueue {
    client: Client,
    address: String,
}

impl RedisQueue {
    pub fn new(redis_url: &str) -> Result<Self, RedisError> {
        Ok(Self {
            client: Client::open(redis_url)?,
            address: redis_url.to_string(),
        })
    }

    async fn connect(&self) -> Result<MultiplexedConnection, QueueError> {
        let result: Result<MultiplexedConnection, QueueError> = async {
            let mut connection = bounded(
                "connect",
                self.client.get_multiplexed_async_connection(),
                QueueError::Connect,
            )
            .await?;

            bounded(
                "ping",
                redis::cmd("PING").query_async::<String>(&mut connection),
                QueueError::Probe,
            )
            .await?;

            Ok::<_, QueueError>(connection)
        }
        .await;

        match &result {
            Ok(_) => info!("Connected to Redis at {}", self.address),
            Err(e) => error!("Failed to connect to Redis at {}: {e}", self.address),
        }

        result
    }
}

#[async_trait]
impl VoteQueue for RedisQueue {
    async fn push(&self, event: &VoteEvent) -> Result<(), QueueError> {
        let payload = event.to_json()?;
        let mut connection = self.connect().await?;

        let _length: i64 = bounded(
            "rpush",
            connection.rpush(VOTES_KEY, payload),
            QueueError::Push,
        )
        .await?;

        Ok(())
    }
}

async fn bounded<T, F>(
    operation: &'static str,
    future: F,
    wrap: fn(RedisError) -> QueueError,
) -> Result<T, QueueError>
where
    F: Future<Output = Result<T, RedisError>>,
{
    timeout(REDIS_TIMEOUT, future)
        .await
        .map_err(|_| QueueError::Timeout(operation))?
        .map_err(wrap)
}
