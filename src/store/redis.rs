// SPDX-FileCopyrightText: 2025 Semiotic AI, Inc.
//
// SPDX-License-Identifier: Apache-2.0

//! Redis-backed hash store

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, RedisResult};
use std::collections::HashMap;
use std::future::Future;
use std::time::Duration;
use tracing::{debug, trace};

use super::HashStore;
use crate::errors::StoreError;

/// [`HashStore`] over a Redis server
///
/// Holds one multiplexed connection; clones of it are cheap and pipeline onto
/// the same socket, so a single `RedisStore` serves any number of concurrent
/// callers. Each command maps one-to-one onto `HSET`, `HGET`, `HGETALL`,
/// `HLEN` or `PING`.
///
/// # Examples
///
/// ```rust,no_run
/// use relay_datastore::{HashStore, RedisStore};
/// use std::time::Duration;
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), relay_datastore::StoreError> {
/// let store = RedisStore::connect("redis://localhost:6379", None, Some(Duration::from_secs(1))).await?;
/// store.ping().await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct RedisStore {
    connection: MultiplexedConnection,
    address: String,
    command_timeout: Option<Duration>,
}

impl std::fmt::Debug for RedisStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisStore")
            .field("address", &self.address)
            .field("command_timeout", &self.command_timeout)
            .finish_non_exhaustive()
    }
}

impl RedisStore {
    /// Opens a multiplexed connection to the server at `url`
    ///
    /// `url` must carry a scheme (`redis://`, `rediss://`, `unix://`).
    /// `connect_timeout` bounds opening the connection; `command_timeout`
    /// bounds every later command.
    ///
    /// This does not probe the server beyond the connection handshake. Call
    /// [`HashStore::ping`] for that.
    pub async fn connect(
        url: &str,
        connect_timeout: Option<Duration>,
        command_timeout: Option<Duration>,
    ) -> Result<Self, StoreError> {
        let client =
            redis::Client::open(url).map_err(|e| StoreError::command_failed("OPEN", url, e))?;

        let connection = with_timeout(
            "CONNECT",
            url,
            connect_timeout,
            client.get_multiplexed_async_connection(),
        )
        .await?;

        debug!(address = url, "Opened Redis connection");
        Ok(Self {
            connection,
            address: url.to_string(),
            command_timeout,
        })
    }

    /// Address this store is connected to
    pub fn address(&self) -> &str {
        &self.address
    }

    async fn run<T, F>(&self, command: &'static str, key: &str, fut: F) -> Result<T, StoreError>
    where
        F: Future<Output = RedisResult<T>>,
    {
        trace!(command, key, "Redis command");
        with_timeout(command, key, self.command_timeout, fut).await
    }
}

async fn with_timeout<T, F>(
    command: &'static str,
    key: &str,
    timeout: Option<Duration>,
    fut: F,
) -> Result<T, StoreError>
where
    F: Future<Output = RedisResult<T>>,
{
    let result = match timeout {
        Some(limit) => tokio::time::timeout(limit, fut)
            .await
            .map_err(|_| StoreError::timeout(command, key, limit))?,
        None => fut.await,
    };
    result.map_err(|e| StoreError::command_failed(command, key, e))
}

#[async_trait]
impl HashStore for RedisStore {
    async fn ping(&self) -> Result<(), StoreError> {
        let mut connection = self.connection.clone();
        let pong: String = self
            .run("PING", &self.address, async move {
                redis::cmd("PING").query_async(&mut connection).await
            })
            .await?;
        trace!(reply = %pong, "Redis PING");
        Ok(())
    }

    async fn hset(&self, key: &str, field: &str, value: &[u8]) -> Result<(), StoreError> {
        let mut connection = self.connection.clone();
        self.run("HSET", key, async move {
            connection.hset::<_, _, _, ()>(key, field, value).await
        })
        .await
    }

    async fn hget(&self, key: &str, field: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let mut connection = self.connection.clone();
        self.run("HGET", key, async move {
            connection.hget::<_, _, Option<Vec<u8>>>(key, field).await
        })
        .await
    }

    async fn hgetall(&self, key: &str) -> Result<HashMap<String, Vec<u8>>, StoreError> {
        let mut connection = self.connection.clone();
        self.run("HGETALL", key, async move {
            connection
                .hgetall::<_, HashMap<String, Vec<u8>>>(key)
                .await
        })
        .await
    }

    async fn hlen(&self, key: &str) -> Result<u64, StoreError> {
        let mut connection = self.connection.clone();
        self.run("HLEN", key, async move {
            connection.hlen::<_, u64>(key).await
        })
        .await
    }

    fn name(&self) -> &'static str {
        "RedisStore"
    }
}
