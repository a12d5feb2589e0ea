//! User repository for database operations
//!
//! Every function runs against the connection handle of the caller's
//! session, so all statements issued by one command share a single
//! transaction scope. Result rows come back in storage order; no query
//! here imposes an ordering.

use sqlx::SqliteConnection;
use tracing::info;

use crate::models::{NewUser, User};

/// Insert a new user row
///
/// Fails with a uniqueness violation when the username or email is
/// already present; see [`is_unique_violation`].
pub async fn insert(conn: &mut SqliteConnection, new_user: &NewUser) -> sqlx::Result<User> {
    info!("Creating new user: {}", new_user.username);

    sqlx::query_as::<_, User>(
        r#"
        INSERT INTO users (username, email, password)
        VALUES (?1, ?2, ?3)
        RETURNING id, username, email, password
        "#,
    )
    .bind(&new_user.username)
    .bind(&new_user.email)
    .bind(&new_user.password)
    .fetch_one(conn)
    .await
}

/// Find a user by exact username match
pub async fn find_by_username(
    conn: &mut SqliteConnection,
    username: &str,
) -> sqlx::Result<Option<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password
        FROM users
        WHERE username = ?1
        "#,
    )
    .bind(username)
    .fetch_optional(conn)
    .await
}

/// Fetch every user
pub async fn list_all(conn: &mut SqliteConnection) -> sqlx::Result<Vec<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password
        FROM users
        "#,
    )
    .fetch_all(conn)
    .await
}

/// Overwrite the email for a username, returning the affected row count
pub async fn update_email(
    conn: &mut SqliteConnection,
    username: &str,
    new_email: &str,
) -> sqlx::Result<u64> {
    info!("Updating email for user: {}", username);

    let result = sqlx::query("UPDATE users SET email = ?1 WHERE username = ?2")
        .bind(new_email)
        .bind(username)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// Delete the row for a username, returning the affected row count
pub async fn delete_by_username(conn: &mut SqliteConnection, username: &str) -> sqlx::Result<u64> {
    info!("Deleting user: {}", username);

    let result = sqlx::query("DELETE FROM users WHERE username = ?1")
        .bind(username)
        .execute(conn)
        .await?;

    Ok(result.rows_affected())
}

/// Case-sensitive substring search across username and email
pub async fn search(conn: &mut SqliteConnection, query: &str) -> sqlx::Result<Vec<User>> {
    // instr() keeps the match case-sensitive; LIKE folds ASCII case in SQLite.
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password
        FROM users
        WHERE instr(username, ?1) > 0 OR instr(email, ?1) > 0
        "#,
    )
    .bind(query)
    .fetch_all(conn)
    .await
}

/// Page through users; limit and offset go to the store unvalidated
pub async fn list_page(
    conn: &mut SqliteConnection,
    limit: i64,
    offset: i64,
) -> sqlx::Result<Vec<User>> {
    sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, email, password
        FROM users
        LIMIT ?1 OFFSET ?2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(conn)
    .await
}

/// True when the error is the store rejecting a duplicate username or email
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.is_unique_violation())
}
