//! Schema management for the user registry
//!
//! There is no migration story: `initialize` wipes the schema and
//! recreates it from scratch. Both operations are idempotent.

use common::error::{DatabaseError, DatabaseResult};
use sqlx::SqliteConnection;
use tracing::info;

/// Drop all registry tables. Succeeds when the tables do not exist yet.
pub async fn drop_all(conn: &mut SqliteConnection) -> DatabaseResult<()> {
    info!("Dropping registry schema");

    sqlx::query("DROP TABLE IF EXISTS users")
        .execute(conn)
        .await
        .map_err(DatabaseError::Schema)?;

    Ok(())
}

/// Create all registry tables. Existing tables are left untouched.
pub async fn create_all(conn: &mut SqliteConnection) -> DatabaseResult<()> {
    info!("Creating registry schema");

    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            username TEXT NOT NULL UNIQUE,
            email TEXT NOT NULL UNIQUE,
            password TEXT NOT NULL
        )
        "#,
    )
    .execute(conn)
    .await
    .map_err(DatabaseError::Schema)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;

    async fn test_pool() -> SqlitePool {
        SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to open in-memory database")
    }

    #[tokio::test]
    async fn drop_all_succeeds_without_tables() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.expect("acquire failed");

        drop_all(&mut conn).await.expect("drop_all failed");
    }

    #[tokio::test]
    async fn create_all_is_idempotent() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.expect("acquire failed");

        create_all(&mut conn).await.expect("first create_all failed");
        create_all(&mut conn).await.expect("second create_all failed");

        sqlx::query("INSERT INTO users (username, email, password) VALUES ('a', 'a@x', 'pw')")
            .execute(&mut *conn)
            .await
            .expect("insert after create failed");
    }

    #[tokio::test]
    async fn drop_all_removes_existing_rows() {
        let pool = test_pool().await;
        let mut conn = pool.acquire().await.expect("acquire failed");

        create_all(&mut conn).await.expect("create_all failed");
        sqlx::query("INSERT INTO users (username, email, password) VALUES ('a', 'a@x', 'pw')")
            .execute(&mut *conn)
            .await
            .expect("insert failed");

        drop_all(&mut conn).await.expect("drop_all failed");
        create_all(&mut conn).await.expect("recreate failed");

        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *conn)
            .await
            .expect("count failed");
        assert_eq!(count, 0);
    }
}
