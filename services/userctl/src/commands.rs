//! Command implementations for the user registry CLI
//!
//! Each command opens its own session, runs one query or mutation
//! sequence, prints a human-readable result, and releases the session.
//! Mutations commit explicitly; every other exit path rolls back. The
//! expected conditions (lookup miss, duplicate username or email) are
//! reported as plain messages with a normal exit; anything else
//! propagates and terminates the process with a diagnostic.

use anyhow::Result;
use sqlx::SqlitePool;

use crate::cli::Command;
use crate::models::NewUser;
use crate::repositories::user;
use crate::schema;
use crate::session::Session;

const SEED_USERNAME: &str = "bob";
const SEED_EMAIL: &str = "bob@mail.com";
const SEED_PASSWORD: &str = "bobpass";

/// Dispatch one parsed command against the store
pub async fn run(command: Command, pool: &SqlitePool) -> Result<()> {
    match command {
        Command::Initialize => initialize(pool).await,
        Command::GetUser { username } => get_user(pool, &username).await,
        Command::GetAllUsers => get_all_users(pool).await,
        Command::ChangeEmail {
            username,
            new_email,
        } => change_email(pool, &username, &new_email).await,
        Command::CreateUser {
            username,
            email,
            password,
        } => create_user(pool, username, email, password).await,
        Command::DeleteUser { username } => delete_user(pool, &username).await,
        Command::SearchUsers { query } => search_users(pool, &query).await,
        Command::ListPaginated { limit, offset } => list_paginated(pool, limit, offset).await,
    }
}

/// Wipe the schema, recreate it, and seed the default user
async fn initialize(pool: &SqlitePool) -> Result<()> {
    let mut session = Session::begin(pool).await?;

    schema::drop_all(session.conn()).await?;
    schema::create_all(session.conn()).await?;

    let seed = NewUser {
        username: SEED_USERNAME.to_string(),
        email: SEED_EMAIL.to_string(),
        password: SEED_PASSWORD.to_string(),
    };
    user::insert(session.conn(), &seed).await?;
    session.commit().await?;

    println!("Database Initialized");
    Ok(())
}

async fn get_user(pool: &SqlitePool, username: &str) -> Result<()> {
    let mut session = Session::begin(pool).await?;

    match user::find_by_username(session.conn(), username).await? {
        Some(found) => println!("{found}"),
        None => println!("Error: {username} not found!"),
    }
    Ok(())
}

async fn get_all_users(pool: &SqlitePool) -> Result<()> {
    let mut session = Session::begin(pool).await?;

    let all_users = user::list_all(session.conn()).await?;
    if all_users.is_empty() {
        println!("No users found");
    } else {
        for found in all_users {
            println!("{found}");
        }
    }
    Ok(())
}

async fn change_email(pool: &SqlitePool, username: &str, new_email: &str) -> Result<()> {
    let mut session = Session::begin(pool).await?;

    match user::find_by_username(session.conn(), username).await? {
        None => println!("Error: {username} not found! Unable to update email."),
        Some(found) => {
            user::update_email(session.conn(), &found.username, new_email).await?;
            session.commit().await?;
            println!("Success: Updated {}'s email to {new_email}", found.username);
        }
    }
    Ok(())
}

async fn create_user(
    pool: &SqlitePool,
    username: String,
    email: String,
    password: String,
) -> Result<()> {
    let mut session = Session::begin(pool).await?;

    let new_user = NewUser {
        username,
        email,
        password,
    };
    match user::insert(session.conn(), &new_user).await {
        Ok(created) => {
            session.commit().await?;
            println!("Created: {created}");
        }
        // The rejected insert is discarded when the session drops.
        Err(e) if user::is_unique_violation(&e) => {
            println!("Error: Username or email already taken!");
        }
        Err(e) => return Err(e.into()),
    }
    Ok(())
}

async fn delete_user(pool: &SqlitePool, username: &str) -> Result<()> {
    let mut session = Session::begin(pool).await?;

    match user::find_by_username(session.conn(), username).await? {
        None => println!("Error: {username} not found! Unable to delete user."),
        Some(found) => {
            user::delete_by_username(session.conn(), &found.username).await?;
            session.commit().await?;
            println!("Success: {username} deleted");
        }
    }
    Ok(())
}

async fn search_users(pool: &SqlitePool, query: &str) -> Result<()> {
    let mut session = Session::begin(pool).await?;

    let results = user::search(session.conn(), query).await?;
    if results.is_empty() {
        println!("No matches found for: {query}");
    } else {
        for found in results {
            println!("{found}");
        }
    }
    Ok(())
}

async fn list_paginated(pool: &SqlitePool, limit: i64, offset: i64) -> Result<()> {
    let mut session = Session::begin(pool).await?;

    let results = user::list_page(session.conn(), limit, offset).await?;
    if results.is_empty() {
        println!("No users found in this range.");
    } else {
        println!("--- Results (Limit: {limit}, Offset: {offset}) ---");
        for found in results {
            println!("{found}");
        }
    }
    Ok(())
}
