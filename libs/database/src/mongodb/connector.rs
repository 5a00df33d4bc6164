use mongodb::{Client, bson::doc, error::ErrorKind, options::ClientOptions};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::MongoConfig;
use crate::common::{DatabaseError, DatabaseResult};

/// Upper bound on the pause between two connection attempts.
const MAX_RETRY_DELAY: Duration = Duration::from_secs(5);

/// Builds a client from `config` and verifies the deployment answers a `ping`.
///
/// The driver connects lazily, so without the ping a wrong URI would only
/// surface on the first request.
pub async fn connect_from_config(config: &MongoConfig) -> DatabaseResult<Client> {
    info!(database = %config.database, "Connecting to MongoDB");

    let mut options = ClientOptions::parse(&config.url).await?;

    options.max_pool_size = Some(config.max_pool_size);
    options.min_pool_size = Some(config.min_pool_size);
    options.connect_timeout = Some(Duration::from_secs(config.connect_timeout_secs));
    options.server_selection_timeout =
        Some(Duration::from_secs(config.server_selection_timeout_secs));

    if let Some(ref app_name) = config.app_name {
        options.app_name = Some(app_name.clone());
    }

    let client = Client::with_options(options)?;

    client
        .database("admin")
        .run_command(doc! { "ping": 1 })
        .await
        .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

    info!(database = %config.database, "Connected to MongoDB");
    Ok(client)
}

/// [`connect_from_config`] retried while the server comes up.
///
/// Makes up to `config.connect_attempts` attempts, pausing `retry_delay`
/// between them. A connection string the driver rejects fails immediately.
pub async fn connect_from_config_with_retry(config: &MongoConfig) -> DatabaseResult<Client> {
    let attempts = config.connect_attempts.max(1);
    let mut failures = 0;

    loop {
        match connect_from_config(config).await {
            Ok(client) => {
                if failures > 0 {
                    debug!(retries = failures, "Connected to MongoDB after retrying");
                }
                return Ok(client);
            }
            Err(e) if !is_retryable(&e) => return Err(e),
            Err(e) => {
                failures += 1;
                if failures >= attempts {
                    warn!(attempts, error = %e, "Giving up connecting to MongoDB");
                    return Err(e);
                }

                let delay = retry_delay(config, failures);
                warn!(
                    attempt = failures,
                    attempts,
                    delay_ms = delay.as_millis() as u64,
                    error = %e,
                    "MongoDB not reachable yet, retrying"
                );
                tokio::time::sleep(delay).await;
            }
        }
    }
}

/// Pause after the `failures`-th failed attempt: `connect_retry_delay_ms`
/// doubled per failure, capped at `MAX_RETRY_DELAY`.
fn retry_delay(config: &MongoConfig, failures: u32) -> Duration {
    let factor = 2u64.saturating_pow(failures.saturating_sub(1));
    Duration::from_millis(config.connect_retry_delay_ms.saturating_mul(factor)).min(MAX_RETRY_DELAY)
}

fn is_retryable(err: &DatabaseError) -> bool {
    match err {
        DatabaseError::Mongo(e) => !matches!(*e.kind, ErrorKind::InvalidArgument { .. }),
        _ => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_connect_rejects_malformed_uri() {
        let err = connect_from_config(&MongoConfig::new("not-a-mongo-uri")).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Mongo(_)));
    }

    #[tokio::test]
    async fn test_connect_with_retry_does_not_retry_malformed_uri() {
        let mut config = MongoConfig::with_database("postgres://localhost:5432", "inventory");
        config.connect_attempts = 3;
        config.connect_retry_delay_ms = 10_000;

        let start = std::time::Instant::now();
        let err = connect_from_config_with_retry(&config).await.unwrap_err();
        assert!(matches!(err, DatabaseError::Mongo(_)));
        assert!(start.elapsed() < Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_connect_with_retry_gives_up_after_attempts() {
        // Nothing listens on port 1
        let mut config = MongoConfig::with_database("mongodb://127.0.0.1:1", "inventory");
        config.connect_attempts = 2;
        config.connect_retry_delay_ms = 1;
        config.connect_timeout_secs = 1;
        config.server_selection_timeout_secs = 1;

        let err = connect_from_config_with_retry(&config).await.unwrap_err();
        assert!(matches!(err, DatabaseError::ConnectionFailed(_)));
    }

    #[test]
    fn test_retry_delay_doubles_up_to_cap() {
        let mut config = MongoConfig::default();
        config.connect_retry_delay_ms = 200;

        assert_eq!(retry_delay(&config, 1), Duration::from_millis(200));
        assert_eq!(retry_delay(&config, 2), Duration::from_millis(400));
        assert_eq!(retry_delay(&config, 3), Duration::from_millis(800));
        assert_eq!(retry_delay(&config, 10), MAX_RETRY_DELAY);
        assert_eq!(retry_delay(&config, u32::MAX), MAX_RETRY_DELAY);
    }

    #[tokio::test]
    #[ignore] // Requires actual MongoDB
    async fn test_connect() {
        let mongo_url = std::env::var("MONGODB_URI")
            .unwrap_or_else(|_| "mongodb://localhost:27017".to_string());

        let result = connect_from_config(&MongoConfig::new(mongo_url)).await;
        assert!(result.is_ok());
    }
}
