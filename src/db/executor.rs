//! Remote schema execution over sqlx.

use std::time::Duration;

use async_trait::async_trait;
use sqlx::{Connection, Executor, PgConnection};
use thiserror::Error;

/// Errors from remote database operations.
///
/// Driver messages are carried through verbatim; callers surface them to
/// the requester as-is.
#[derive(Debug, Error)]
pub enum ExecutorError {
    /// Establishing the connection failed.
    #[error("{0}")]
    Connect(String),

    /// Connection establishment exceeded the configured timeout.
    #[error("connection timed out after {0} seconds")]
    ConnectTimeout(u64),

    /// Running a statement against the target failed.
    #[error("{0}")]
    Execute(String),
}

/// Executes verification round-trips and schema batches against a remote
/// database identified by a connection string.
#[async_trait]
pub trait SchemaExecutor: Send + Sync {
    /// Trivial round-trip query against the target. Never mutates data.
    async fn ping(&self, connection_string: &str) -> Result<(), ExecutorError>;

    /// Execute `sql` as a single batch against the target.
    ///
    /// Atomicity is whatever the underlying execution call provides; no
    /// partial-success state is tracked.
    async fn execute_batch(&self, connection_string: &str, sql: &str)
        -> Result<(), ExecutorError>;
}

/// Production executor: one short-lived Postgres connection per operation.
pub struct PgExecutor {
    connect_timeout: Duration,
}

impl PgExecutor {
    pub fn new(connect_timeout: Duration) -> Self {
        Self { connect_timeout }
    }

    async fn connect(&self, connection_string: &str) -> Result<PgConnection, ExecutorError> {
        match tokio::time::timeout(
            self.connect_timeout,
            PgConnection::connect(connection_string),
        )
        .await
        {
            Ok(Ok(conn)) => Ok(conn),
            Ok(Err(e)) => Err(ExecutorError::Connect(e.to_string())),
            Err(_) => Err(ExecutorError::ConnectTimeout(self.connect_timeout.as_secs())),
        }
    }
}

#[async_trait]
impl SchemaExecutor for PgExecutor {
    async fn ping(&self, connection_string: &str) -> Result<(), ExecutorError> {
        let mut conn = self.connect(connection_string).await?;
        let result = conn
            .ping()
            .await
            .map_err(|e| ExecutorError::Execute(e.to_string()));
        let _ = conn.close().await;
        result
    }

    async fn execute_batch(
        &self,
        connection_string: &str,
        sql: &str,
    ) -> Result<(), ExecutorError> {
        let mut conn = self.connect(connection_string).await?;
        // raw_sql uses the simple query protocol, so a multi-statement
        // batch runs in one round trip. Calling `execute` with the
        // connection as the receiver (rather than passing `&mut conn` to
        // the query's own `execute`) keeps the `Executor` lifetime concrete
        // enough to satisfy the boxed `async_trait` future.
        let result = conn
            .execute(sqlx::raw_sql(sql))
            .await
            .map(|_| ())
            .map_err(|e| ExecutorError::Execute(e.to_string()));
        let _ = conn.close().await;
        result
    }
}
