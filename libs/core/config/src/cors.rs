use crate::{ConfigError, FromEnv};
use std::env;

/// Cross-origin settings for the browser client.
///
/// `CORS_ALLOWED_ORIGIN` holds a comma-separated list of origins. When it is
/// unset or blank, `allowed_origins` is empty and the router falls back to a
/// permissive policy.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

impl CorsConfig {
    pub fn new(allowed_origins: Vec<String>) -> Self {
        Self { allowed_origins }
    }

    pub fn is_permissive(&self) -> bool {
        self.allowed_origins.is_empty()
    }

    fn parse(raw: &str) -> Vec<String> {
        raw.split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect()
    }
}

impl FromEnv for CorsConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let allowed_origins = env::var("CORS_ALLOWED_ORIGIN")
            .map(|raw| Self::parse(&raw))
            .unwrap_or_default();

        Ok(Self { allowed_origins })
    }
}
