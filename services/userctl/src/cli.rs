//! Command-line surface for the user registry

use clap::{Parser, Subcommand};

/// User Management Database CLI
#[derive(Debug, Parser)]
#[command(name = "userctl", version, about = "User Management Database CLI")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// One registry operation per process invocation
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Wipe the database and seed it with a default 'bob' user.
    ///
    /// WARNING: This drops all existing data.
    Initialize,

    /// Retrieve a single user's details by their username
    GetUser {
        /// The exact username to search for
        username: String,
    },

    /// List every user currently registered in the database
    GetAllUsers,

    /// Update the email address for an existing user
    ChangeEmail {
        /// Username of the account to update
        username: String,
        /// The new email address to assign
        new_email: String,
    },

    /// Register a new user in the system
    CreateUser {
        /// Unique username for the new account
        username: String,
        /// Unique email address
        email: String,
        /// User password (stored as plain text by this tool)
        password: String,
    },

    /// Remove a user from the database
    DeleteUser {
        /// The username to permanently remove
        username: String,
    },

    /// Find users using a partial match on username or email (case-sensitive)
    SearchUsers {
        /// Partial string to match against username or email
        query: String,
    },

    /// List users using pagination (limit and offset)
    ListPaginated {
        /// Maximum number of users to return
        #[arg(long, default_value_t = 10, allow_negative_numbers = true)]
        limit: i64,
        /// Number of users to skip from the start
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        offset: i64,
    },
}
