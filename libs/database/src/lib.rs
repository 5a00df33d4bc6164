//! Database connectors and utilities.
//!
//! # Features
//!
//! - `mongodb` (default) - MongoDB client construction, retrying connect, ping
//! - `config` - `core_config::FromEnv` support for [`mongodb::MongoConfig`]
//!
//! # Example
//!
//! ```ignore
//! use database::mongodb::{MongoConfig, connect_from_config_with_retry};
//!
//! let config = MongoConfig::with_database("mongodb://localhost:27017", "inventory");
//! let client = connect_from_config_with_retry(&config).await?;
//! let db = client.database(config.database());
//! ```

pub mod common;

#[cfg(feature = "mongodb")]
pub mod mongodb;

pub use common::{DatabaseError, DatabaseResult};
