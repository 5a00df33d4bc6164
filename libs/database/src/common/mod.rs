//! Utilities shared by the database connectors

pub mod error;

pub use error::{DatabaseError, DatabaseResult};
