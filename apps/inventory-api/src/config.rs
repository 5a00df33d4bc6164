//! Configuration for Inventory API

use core_config::{AppInfo, FromEnv, app_info, cors::CorsConfig, server::ServerConfig};
use database::mongodb::MongoConfig;

pub use core_config::Environment;

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub mongodb: MongoConfig,
    pub server: ServerConfig,
    pub cors: CorsConfig,
    pub environment: Environment,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let app = app_info!();

        // Name the connection after the service unless MONGODB_APP_NAME says otherwise
        let mut mongodb = MongoConfig::from_env()?;
        if mongodb.app_name.is_none() {
            mongodb = mongodb.with_app_name(app.name);
        }

        Ok(Self {
            app,
            mongodb,
            server: ServerConfig::from_env()?,
            cors: CorsConfig::from_env()?,
            environment: Environment::from_env(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UNSET: [(&str, Option<&str>); 9] = [
        ("APP_ENV", None),
        ("HOST", None),
        ("PORT", None),
        ("MONGODB_URL", None),
        ("MONGO_URL", None),
        ("MONGODB_DATABASE", None),
        ("MONGO_DATABASE", None),
        ("CORS_ALLOWED_ORIGIN", None),
        ("MONGODB_APP_NAME", None),
    ];

    #[test]
    fn test_from_env_defaults() {
        let mut vars = UNSET.to_vec();
        vars.push(("MONGODB_URI", Some("mongodb://localhost:27017")));

        temp_env::with_vars(vars, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.app.name, "inventory_api");
            assert_eq!(config.server.port, 8080);
            assert_eq!(config.mongodb.database(), "inventory");
            assert_eq!(config.mongodb.app_name.as_deref(), Some("inventory_api"));
            assert!(config.cors.is_permissive());
            assert!(config.environment.is_development());
        });
    }

    #[test]
    fn test_from_env_reads_overrides() {
        let mut vars = UNSET.to_vec();
        vars.extend([
            ("MONGODB_URI", Some("mongodb://db:27017/shop")),
            ("PORT", Some("5000")),
            ("APP_ENV", Some("production")),
            ("CORS_ALLOWED_ORIGIN", Some("http://localhost:3000")),
            ("MONGODB_APP_NAME", Some("inventory-worker")),
        ]);

        temp_env::with_vars(vars, || {
            let config = Config::from_env().unwrap();
            assert_eq!(config.server.port, 5000);
            assert_eq!(config.mongodb.database(), "shop");
            assert_eq!(config.mongodb.app_name.as_deref(), Some("inventory-worker"));
            assert_eq!(config.cors.allowed_origins, vec!["http://localhost:3000"]);
            assert!(config.environment.is_production());
        });
    }

    #[test]
    fn test_from_env_requires_mongodb_uri() {
        let mut vars = UNSET.to_vec();
        vars.push(("MONGODB_URI", None));

        temp_env::with_vars(vars, || {
            assert!(Config::from_env().is_err());
        });
    }
}
