//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cashlens - Cash-flow forecasts, anomaly alerts and savings tips
#[derive(Parser)]
#[command(name = "cashlens")]
#[command(about = "Financial insights over your own transaction history", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "cashlens.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set CASHLENS_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// User whose data the command reads and writes
    #[arg(short, long, default_value = "local-dev", global = true)]
    pub user: String,

    /// Insights config file (defaults to <config dir>/cashlens/insights.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// List accounts
    Accounts,

    /// Record a transaction
    Add {
        /// Signed amount: negative for spending, positive for income
        #[arg(allow_negative_numbers = true)]
        amount: String,

        /// Account name (created if missing)
        #[arg(short, long, default_value = "Checking")]
        account: String,

        /// Merchant name
        #[arg(short, long)]
        merchant: Option<String>,

        /// Date (YYYY-MM-DD, or RFC 3339 timestamp); defaults to now
        #[arg(short, long)]
        date: Option<String>,

        /// ISO currency code
        #[arg(long, default_value = "USD")]
        currency: String,

        /// Free-form notes
        #[arg(long)]
        notes: Option<String>,

        /// Tag to attach (repeatable)
        #[arg(long = "tag")]
        tags: Vec<String>,
    },

    /// List recent transactions
    Transactions {
        /// Maximum number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },

    /// Show the 14-day history and 7-day cash-flow projection
    Forecast {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show unusual or duplicate-looking transactions from the last 60 days
    Anomalies {
        /// Print JSON instead of a list
        #[arg(long)]
        json: bool,
    },

    /// Generate and store a new savings recommendation
    Recommend {
        /// Print JSON instead of a summary
        #[arg(long)]
        json: bool,
    },

    /// List stored recommendations, newest first
    Recommendations {
        /// Print JSON instead of a list
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, the server requires the x-cashlens-user header or an API key.
        #[arg(long)]
        no_auth: bool,

        /// Allowed CORS origin (repeatable)
        #[arg(long = "allow-origin")]
        allowed_origins: Vec<String>,
    },
}
