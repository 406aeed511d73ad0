use std::sync::Arc;

use redis::RedisError;

use super::{
    config::Config,
    database::{RedisQueue, VoteQueue},
};

pub struct State {
    pub config: Config,
    pub queue: Arc<dyn VoteQueue>,
}

impl State {
    pub fn new(config: Config) -> Result<Arc<Self>, RedisError> {
        let queue = Arc::new(RedisQueue::new(&config.redis_url())?);

        Ok(Self::with_queue(config, queue))
    }

    pub fn with_queue(config: Config, queue: Arc<dyn VoteQueue>) -> Arc<Self> {
        Arc::new(Self { config, queue })
    }
}
