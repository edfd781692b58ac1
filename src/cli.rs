use clap::{Parser, Subcommand};

/// bankd — minimal banking REST API
#[derive(Parser)]
#[command(name = "bankd", version, about)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the API server
    Serve {
        /// Port to bind
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },

    /// Manage accounts directly against the store
    Account {
        #[command(subcommand)]
        command: AccountCommands,
    },
}

#[derive(Subcommand)]
pub enum AccountCommands {
    /// Create a new account
    Create {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        password: String,
    },
    /// List all accounts
    List,
    /// Delete an account by id
    Delete {
        #[arg(long)]
        id: i64,
    },
}
