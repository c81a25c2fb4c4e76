use std::{
    ops::{
        Deref,
        DerefMut,
    },
    time::Duration,
};

use sqlx::{
    postgres::PgConnectOptions,
    Connection,
    PgConnection,
    Postgres,
};

use crate::{
    config::DbConfig,
    error::Error,
};

const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Opens one database connection per request.
///
/// There is no pooling and no retry: every [`acquire`](Self::acquire) dials
/// the database and hands out a [`Session`] that owns the connection.
#[derive(Clone, Debug)]
pub struct ConnectionProvider {
    options: PgConnectOptions,
    connect_timeout: Duration,
}

impl ConnectionProvider {
    pub fn new(config: &DbConfig) -> Self {
        Self {
            options: config.connect_options(),
            connect_timeout: config.connect_timeout,
        }
    }

    pub fn from_options(options: PgConnectOptions) -> Self {
        Self {
            options,
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
        }
    }

    pub fn with_connect_timeout(mut self, connect_timeout: Duration) -> Self {
        self.connect_timeout = connect_timeout;
        self
    }

    pub async fn acquire(&self) -> Result<Session, Error> {
        let connection = tokio::time::timeout(
            self.connect_timeout,
            PgConnection::connect_with(&self.options),
        )
        .await
        .map_err(|_| {
            Error::ConnectTimeout {
                timeout: self.connect_timeout,
            }
        })?
        .map_err(Error::Connection)?;

        Ok(Session { connection })
    }
}

/// A connection scoped to one request.
///
/// Dropping a session closes its socket, so every early return releases the
/// connection. [`close`](Self::close) shuts it down gracefully instead.
pub struct Session {
    connection: PgConnection,
}

impl Deref for Session {
    type Target = PgConnection;

    fn deref(&self) -> &Self::Target {
        &self.connection
    }
}

impl DerefMut for Session {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.connection
    }
}

impl Session {
    pub async fn transaction(&mut self) -> Result<Transaction<'_>, Error> {
        let transaction = self.connection.begin().await?;

        Ok(Transaction { transaction })
    }

    pub async fn close(self) {
        if let Err(error) = self.connection.close().await {
            tracing::warn!(?error, "failed to close database connection");
        }
    }
}

/// Rolls back when dropped without [`commit`](Self::commit).
pub struct Transaction<'a> {
    transaction: sqlx::Transaction<'a, Postgres>,
}

impl<'a> Deref for Transaction<'a> {
    type Target = sqlx::Transaction<'a, Postgres>;

    fn deref(&self) -> &Self::Target {
        &self.transaction
    }
}

impl<'a> DerefMut for Transaction<'a> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.transaction
    }
}

impl<'a> Transaction<'a> {
    pub async fn commit(self) -> Result<(), Error> {
        self.transaction.commit().await?;
        Ok(())
    }

    pub async fn rollback(self) -> Result<(), Error> {
        self.transaction.rollback().await?;
        Ok(())
    }
}
