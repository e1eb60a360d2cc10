//! Connection pool setup.

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use crate::config::DatabaseConfig;

/// Run `attempt` until it succeeds, sleeping `delay` between failures.
///
/// There is no attempt limit and no backoff growth.
pub async fn retry_with_fixed_delay<T, E, F, Fut>(delay: Duration, mut attempt: F) -> T
where
    E: Display,
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let mut attempts: u32 = 0;
    loop {
        attempts += 1;
        match attempt().await {
            Ok(value) => return value,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    attempt = attempts,
                    retry_in_secs = delay.as_secs_f64(),
                    "Failed to connect to database, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Open the pool, retrying forever on failure.
///
/// The pool reconnects lazily afterwards, so one handle serves the whole
/// process lifetime.
pub async fn connect_with_retry(config: &DatabaseConfig) -> SqlitePool {
    let delay = Duration::from_secs(config.retry_delay_secs);
    let url = config.url.as_str();
    let max_connections = config.max_connections;
    let pool = retry_with_fixed_delay(delay, move || {
        SqlitePoolOptions::new()
            .max_connections(max_connections)
            .connect(url)
    })
    .await;

    tracing::info!(max_connections = config.max_connections, "Connected to database");
    pool
}

/// Single-connection in-memory pool; every connection would otherwise see
/// its own empty database.
#[cfg(test)]
pub async fn connect_in_memory() -> Result<SqlitePool, sqlx::Error> {
    SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect("sqlite::memory:")
        .await
}
