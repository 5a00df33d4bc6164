#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_first, env_parse_or};
use mongodb::options::ConnectionString;

/// Database used when neither `MONGODB_DATABASE` nor the URI names one.
pub const DEFAULT_DATABASE: &str = "inventory";

/// MongoDB connection settings.
///
/// ```ignore
/// use database::mongodb::MongoConfig;
///
/// let config = MongoConfig::new("mongodb://localhost:27017/inventory");
/// assert_eq!(config.database(), "inventory");
///
/// // From environment variables (requires `config` feature)
/// let config = MongoConfig::from_env()?;
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MongoConfig {
    /// Format: mongodb://[username:password@]host[:port][/database][?options]
    pub url: String,

    pub database: String,

    /// Reported to the server in its connection logs
    pub app_name: Option<String>,

    pub max_pool_size: u32,
    pub min_pool_size: u32,
    pub connect_timeout_secs: u64,
    pub server_selection_timeout_secs: u64,

    /// Connection attempts made at startup before giving up
    pub connect_attempts: u32,
    /// Pause after the first failed attempt; doubles after each further one
    pub connect_retry_delay_ms: u64,
}

impl MongoConfig {
    /// Config for `url`; the database comes from the URI path, else [`DEFAULT_DATABASE`].
    pub fn new(url: impl Into<String>) -> Self {
        let url = url.into();
        let database =
            database_from_uri(&url).unwrap_or_else(|| DEFAULT_DATABASE.to_string());
        Self::with_database(url, database)
    }

    pub fn with_database(url: impl Into<String>, database: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            database: database.into(),
            app_name: None,
            max_pool_size: 100,
            min_pool_size: 5,
            connect_timeout_secs: 10,
            server_selection_timeout_secs: 30,
            connect_attempts: 5,
            connect_retry_delay_ms: 200,
        }
    }

    pub fn with_app_name(mut self, app_name: impl Into<String>) -> Self {
        self.app_name = Some(app_name.into());
        self
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Default for MongoConfig {
    fn default() -> Self {
        Self::with_database("mongodb://localhost:27017", DEFAULT_DATABASE)
    }
}

/// The default database named in a connection string's path.
///
/// `mongodb://user:pw@host:27017/inventory?authSource=admin` yields `inventory`.
/// Returns `None` when the path is absent or empty, or the string does not parse.
pub fn database_from_uri(url: &str) -> Option<String> {
    ConnectionString::parse(url)
        .ok()?
        .default_database
        .filter(|name| !name.is_empty())
}

/// Environment variables:
/// - `MONGODB_URI`, `MONGODB_URL` or `MONGO_URL` (required) - connection string
/// - `MONGODB_DATABASE` or `MONGO_DATABASE` (optional) - overrides the URI's database
/// - `MONGODB_APP_NAME` (optional)
/// - `MONGODB_MAX_POOL_SIZE` (default: 100), `MONGODB_MIN_POOL_SIZE` (default: 5)
/// - `MONGODB_CONNECT_TIMEOUT_SECS` (default: 10)
/// - `MONGODB_SERVER_SELECTION_TIMEOUT_SECS` (default: 30)
/// - `MONGODB_CONNECT_ATTEMPTS` (default: 5), `MONGODB_CONNECT_RETRY_DELAY_MS` (default: 200)
#[cfg(feature = "config")]
impl FromEnv for MongoConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let url = env_first(&["MONGODB_URI", "MONGODB_URL", "MONGO_URL"]).ok_or_else(|| {
            ConfigError::MissingEnvVar("MONGODB_URI, MONGODB_URL or MONGO_URL".to_string())
        })?;

        let mut config = match env_first(&["MONGODB_DATABASE", "MONGO_DATABASE"]) {
            Some(database) => Self::with_database(url, database),
            None => Self::new(url),
        };

        config.app_name = std::env::var("MONGODB_APP_NAME").ok();
        config.max_pool_size = env_parse_or("MONGODB_MAX_POOL_SIZE", config.max_pool_size)?;
        config.min_pool_size = env_parse_or("MONGODB_MIN_POOL_SIZE", config.min_pool_size)?;
        config.connect_timeout_secs =
            env_parse_or("MONGODB_CONNECT_TIMEOUT_SECS", config.connect_timeout_secs)?;
        config.server_selection_timeout_secs = env_parse_or(
            "MONGODB_SERVER_SELECTION_TIMEOUT_SECS",
            config.server_selection_timeout_secs,
        )?;
        config.connect_attempts = env_parse_or("MONGODB_CONNECT_ATTEMPTS", config.connect_attempts)?;
        config.connect_retry_delay_ms =
            env_parse_or("MONGODB_CONNECT_RETRY_DELAY_MS", config.connect_retry_delay_ms)?;

        Ok(config)
    }
}
