//! Repositories for database operations

pub mod user;
