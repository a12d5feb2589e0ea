//! Scoped database sessions
//!
//! A [`Session`] owns one transaction against the store. Callers must
//! commit explicitly after mutations; a session dropped without commit
//! is rolled back, so the connection is released on every exit path.

use common::error::{DatabaseError, DatabaseResult};
use sqlx::{Sqlite, SqliteConnection, SqlitePool, Transaction};

/// A scoped connection/transaction against the registry store
pub struct Session {
    tx: Transaction<'static, Sqlite>,
}

impl Session {
    /// Open a new session on the pool
    pub async fn begin(pool: &SqlitePool) -> DatabaseResult<Self> {
        let tx = pool.begin().await.map_err(DatabaseError::Connection)?;
        Ok(Self { tx })
    }

    /// The connection handle bound to this session's scope
    pub fn conn(&mut self) -> &mut SqliteConnection {
        &mut self.tx
    }

    /// Commit the session's transaction, consuming the session
    pub async fn commit(self) -> DatabaseResult<()> {
        self.tx.commit().await.map_err(DatabaseError::Query)
    }
}
