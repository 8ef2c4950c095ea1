//! Redis Backend Module
//!
//! Networked cache backend for deployments running more than one API process.

use std::time::Duration;

use async_trait::async_trait;
use redis::{aio::ConnectionManager, AsyncCommands, Client};
use tracing::info;

use crate::cache::CacheBackend;
use crate::error::CacheError;

/// Cache backend over a multiplexed, auto-reconnecting Redis connection.
#[derive(Clone)]
pub struct RedisBackend {
    manager: ConnectionManager,
}

impl RedisBackend {
    /// Connects to the Redis server at `url` (e.g. `redis://127.0.0.1/`).
    pub async fn connect(url: &str) -> Result<Self, CacheError> {
        let client = Client::open(url)?;
        let manager = ConnectionManager::new(client).await?;
        info!("Connected to Redis cache backend");
        Ok(Self { manager })
    }
}

#[async_trait]
impl CacheBackend for RedisBackend {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, CacheError> {
        let mut conn = self.manager.clone();
        let value: Option<Vec<u8>> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: Vec<u8>, ttl: Duration) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        // PSETEX rejects a zero expiry
        let millis = u64::try_from(ttl.as_millis()).unwrap_or(u64::MAX).max(1);
        conn.pset_ex::<_, _, ()>(key, value, millis).await?;
        Ok(())
    }

    async fn delete(&self, key: &str) -> Result<(), CacheError> {
        let mut conn = self.manager.clone();
        conn.del::<_, ()>(key).await?;
        Ok(())
    }
}
