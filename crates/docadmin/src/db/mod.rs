//! Database module for persistent storage.
//!
//! Uses SeaORM over a pooled sqlx connection. PostgreSQL is the production
//! backend; SQLite (file or in-memory) backs local runs and tests.

use std::path::PathBuf;
use std::time::Duration;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};
use secrecy::{ExposeSecret, SecretString};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use sea_orm_migration::MigratorTrait;

use crate::config::{DatabaseBackend, DatabaseConfig};
use crate::error::DocAdminError;

pub mod entities;
pub mod error;
pub mod migrations;
pub mod ocr_nlp_result_repo;
pub mod spell_check_repo;
pub mod template_repo;
pub mod user_repo;

pub use error::DatabaseError;
pub use migrations::Migrator;

/// Builds the connection URL for `config`. Credentials are percent-encoded so
/// passwords containing `@`, `:` or `/` survive.
pub fn database_url(config: &DatabaseConfig, password: Option<&SecretString>) -> String {
    match config.backend {
        DatabaseBackend::Postgres => {
            let mut credentials = String::new();
            if let Some(user) = config.user.as_deref() {
                credentials.push_str(&utf8_percent_encode(user, NON_ALPHANUMERIC).to_string());
                if let Some(password) = password {
                    credentials.push(':');
                    credentials.push_str(
                        &utf8_percent_encode(password.expose_secret(), NON_ALPHANUMERIC)
                            .to_string(),
                    );
                }
                credentials.push('@');
            }
            format!(
                "postgres://{}{}:{}/{}",
                credentials, config.host, config.port, config.service
            )
        }
        DatabaseBackend::Sqlite => match config.path.as_deref() {
            Some(path) => format!("sqlite://{}?mode=rwc", path),
            None => "sqlite::memory:".to_string(),
        },
    }
}

/// Translates the configured pool settings into SeaORM connect options.
pub fn connect_options(config: &DatabaseConfig, password: Option<&SecretString>) -> ConnectOptions {
    let pool = &config.pool;
    let mut options = ConnectOptions::new(database_url(config, password));
    options
        .max_connections(pool.max_connections())
        .connect_timeout(Duration::from_secs(pool.connect_timeout_seconds))
        .test_before_acquire(pool.pre_ping)
        .sqlx_logging(config.log_statements)
        .sqlx_logging_level(log::LevelFilter::Debug);

    // An in-memory SQLite database lives only as long as its connection.
    let in_memory = config.backend == DatabaseBackend::Sqlite && config.path.is_none();
    if !in_memory {
        options.max_lifetime(Duration::from_secs(pool.recycle_seconds));
    }

    if config.backend == DatabaseBackend::Postgres {
        if let Some(schema) = config.schema.as_deref() {
            options.set_schema_search_path(schema);
        }
    }

    options
}

/// Opens a connection pool. Does not touch the schema.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DocAdminError> {
    let password = config.resolve_password()?;

    if let (DatabaseBackend::Sqlite, Some(path)) = (config.backend, config.path.as_deref()) {
        let parent = PathBuf::from(path);
        if let Some(dir) = parent.parent().filter(|d| !d.as_os_str().is_empty()) {
            std::fs::create_dir_all(dir).map_err(|e| {
                DatabaseError::Connection(format!("cannot create {}: {}", dir.display(), e))
            })?;
        }
    }

    let db = Database::connect(connect_options(config, password.as_ref()))
        .await
        .map_err(DatabaseError::from)?;

    log::info!(
        "Connected to {:?} database '{}'",
        config.backend,
        match config.backend {
            DatabaseBackend::Postgres => config.service.as_str(),
            DatabaseBackend::Sqlite => config.path.as_deref().unwrap_or(":memory:"),
        }
    );

    Ok(db)
}

/// Applies every pending migration.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), DatabaseError> {
    Migrator::up(db, None)
        .await
        .map_err(|e| DatabaseError::Migration(e.to_string()))
}

/// Connects and brings the schema up to date.
pub async fn init_database(config: &DatabaseConfig) -> Result<DatabaseConnection, DocAdminError> {
    let db = connect(config).await?;
    migrate(&db).await?;
    Ok(db)
}

/// Opens a migrated in-memory SQLite database for testing.
pub async fn open_in_memory() -> Result<DatabaseConnection, DatabaseError> {
    let config = DatabaseConfig::sqlite_memory();
    let db = Database::connect(connect_options(&config, None)).await?;
    migrate(&db).await?;
    Ok(db)
}

/// Returns the canonical SQLite path: `~/.docadmin/data/docadmin.db`.
pub fn default_database_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".docadmin").join("data").join("docadmin.db"))
}
