//! Relational schema and repositories for the document OCR/NLP
//! administration database.

pub mod config;
pub mod db;
pub mod error;
pub mod lifecycle;
pub mod password;
pub mod secrets;
pub mod telemetry;

pub use config::{load_config, Config, DatabaseConfig};
pub use db::{connect, init_database, open_in_memory, DatabaseError};
pub use error::{ConfigError, DocAdminError, Result, ValidationError};
pub use secrets::{resolve_secret, resolve_secret_optional, SecretError};
