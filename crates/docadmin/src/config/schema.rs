use secrecy::SecretString;
use serde::{Deserialize, Serialize};

use crate::secrets::{resolve_secret_optional, SecretError};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub version: String,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DatabaseBackend {
    #[default]
    Postgres,
    Sqlite,
}

/// Connection settings for the administration database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub backend: DatabaseBackend,
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Database (service) name on the server.
    #[serde(default = "default_service")]
    pub service: String,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub password_file: Option<String>,
    #[serde(default)]
    pub password_env_var: Option<String>,
    /// Schema holding all `admin_*` tables. Server default when unset.
    #[serde(default)]
    pub schema: Option<String>,
    /// SQLite database file. In-memory when unset.
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub pool: PoolConfig,
    /// Log every SQL statement at debug level.
    #[serde(default)]
    pub log_statements: bool,
}

fn default_host() -> String {
    "localhost".to_string()
}

fn default_port() -> u16 {
    5432
}

fn default_service() -> String {
    "docadmin".to_string()
}

impl DatabaseConfig {
    /// An in-memory SQLite database, used by tests.
    pub fn sqlite_memory() -> Self {
        Self {
            backend: DatabaseBackend::Sqlite,
            host: default_host(),
            port: default_port(),
            service: default_service(),
            user: None,
            password: None,
            password_file: None,
            password_env_var: None,
            schema: None,
            path: None,
            pool: PoolConfig {
                size: 1,
                max_overflow: 0,
                ..PoolConfig::default()
            },
            log_statements: false,
        }
    }

    /// Resolves the password from whichever source is configured.
    pub fn resolve_password(&self) -> Result<Option<SecretString>, SecretError> {
        resolve_secret_optional(
            self.password.as_deref(),
            self.password_file.as_deref(),
            self.password_env_var.as_deref(),
        )
    }
}

/// Connection pool tuning.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PoolConfig {
    /// Connections kept open.
    #[serde(default = "default_pool_size")]
    pub size: u32,
    /// Extra connections allowed above `size` under load.
    #[serde(default = "default_max_overflow")]
    pub max_overflow: u32,
    /// Connections older than this are closed and replaced.
    #[serde(default = "default_recycle_seconds")]
    pub recycle_seconds: u64,
    /// Check each connection is alive before handing it out.
    #[serde(default = "default_true")]
    pub pre_ping: bool,
    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,
}

fn default_pool_size() -> u32 {
    50
}

fn default_max_overflow() -> u32 {
    20
}

fn default_recycle_seconds() -> u64 {
    3600
}

fn default_true() -> bool {
    true
}

fn default_connect_timeout() -> u64 {
    30
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            size: default_pool_size(),
            max_overflow: default_max_overflow(),
            recycle_seconds: default_recycle_seconds(),
            pre_ping: true,
            connect_timeout_seconds: default_connect_timeout(),
        }
    }
}

impl PoolConfig {
    /// Upper bound on simultaneously open connections.
    pub fn max_connections(&self) -> u32 {
        self.size.saturating_add(self.max_overflow)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directive, overridden by `RUST_LOG` when set.
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default)]
    pub format: LogFormat,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: LogFormat::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    /// bcrypt work factor for account passwords.
    #[serde(default = "default_bcrypt_cost")]
    pub bcrypt_cost: u32,
}

fn default_bcrypt_cost() -> u32 {
    crate::password::DEFAULT_COST
}

impl Default for SecurityConfig {
    fn default() -> Self {
        Self {
            bcrypt_cost: default_bcrypt_cost(),
        }
    }
}
