use std::{
    fmt,
    time::Duration,
};

use sqlx::postgres::PgConnectOptions;

/// Database connection parameters.
///
/// Resolved once at startup from flags or the environment. Every value is
/// required up front, so a missing variable stops the process before it
/// accepts any request.
#[derive(Clone, clap::Args)]
pub struct DbConfig {
    /// Database host name or address.
    #[arg(long = "db-host", env = "DB_HOST")]
    pub host: String,

    #[arg(long = "db-port", env = "DB_PORT", default_value = "5432")]
    pub port: u16,

    /// Name of the database that holds the `celestial_bodies` table.
    #[arg(long = "db-name", env = "DB_NAME")]
    pub database: String,

    #[arg(long = "db-user", env = "DB_USER")]
    pub user: String,

    #[arg(long = "db-password", env = "DB_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// How long to wait for a connection to be established.
    #[arg(
        long = "db-connect-timeout",
        env = "DB_CONNECT_TIMEOUT",
        default_value = "10s",
        value_parser = humantime::parse_duration,
    )]
    pub connect_timeout: Duration,

    /// Server-side limit for a single statement.
    #[arg(
        long = "db-statement-timeout",
        env = "DB_STATEMENT_TIMEOUT",
        default_value = "30s",
        value_parser = humantime::parse_duration,
    )]
    pub statement_timeout: Duration,
}

impl DbConfig {
    pub fn connect_options(&self) -> PgConnectOptions {
        PgConnectOptions::new()
            .host(&self.host)
            .port(self.port)
            .database(&self.database)
            .username(&self.user)
            .password(&self.password)
            .application_name(env!("CARGO_PKG_NAME"))
            .options([(
                "statement_timeout",
                format!("{}ms", self.statement_timeout.as_millis()),
            )])
    }
}

impl fmt::Debug for DbConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DbConfig")
            .field("host", &self.host)
            .field("port", &self.port)
            .field("database", &self.database)
            .field("user", &self.user)
            .field("password", &"<redacted>")
            .field("connect_timeout", &self.connect_timeout)
            .field("statement_timeout", &self.statement_timeout)
            .finish()
    }
}

/// Normalizes the prefix the collection endpoint is mounted at.
///
/// The result is either empty (mounted at `/`) or starts with a slash and has
/// no trailing slash.
pub fn parse_base_path(path: &str) -> Result<String, String> {
    let path = path.trim();
    if !path.is_empty() && !path.starts_with('/') {
        return Err(format!("base path must start with '/': {path}"));
    }
    if path.contains(char::is_whitespace) {
        return Err(format!("base path must not contain whitespace: {path}"));
    }
    Ok(path.trim_end_matches('/').to_owned())
}
