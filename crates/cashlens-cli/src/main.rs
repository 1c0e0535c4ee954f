//! Cashlens CLI - Financial insights over your transaction history
//!
//! Usage:
//!   cashlens init                       Initialize database
//!   cashlens add -12.50 -m Cafe         Record a transaction
//!   cashlens forecast                   14-day history plus 7-day projection
//!   cashlens anomalies                  Unusual or duplicate-looking charges
//!   cashlens recommend                  Generate a savings tip
//!   cashlens serve --port 3000          Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    let user = cli.user.as_str();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Accounts => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_accounts(&db, user)
        }
        Commands::Add {
            ref amount,
            ref account,
            ref merchant,
            ref date,
            ref currency,
            ref notes,
            ref tags,
        } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_add(
                &db,
                user,
                amount,
                account,
                merchant.as_deref(),
                date.as_deref(),
                currency,
                notes.as_deref(),
                tags,
            )
            .map(|_| ())
        }
        Commands::Transactions { limit } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            commands::cmd_transactions_list(&db, user, limit)
        }
        Commands::Forecast { json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_forecast(&db, user, config, json)
        }
        Commands::Anomalies { json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_anomalies(&db, user, config, json)
        }
        Commands::Recommend { json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_recommend(&db, user, config, json).map(|_| ())
        }
        Commands::Recommendations { json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_recommendations(&db, user, config, json)
        }
        Commands::Serve {
            port,
            ref host,
            no_auth,
            ref allowed_origins,
        } => {
            let config = commands::load_config(cli.config.as_deref())?;
            commands::cmd_serve(
                &cli.db,
                host,
                port,
                no_auth,
                cli.no_encrypt,
                allowed_origins.clone(),
                config,
            )
            .await
        }
    }
}
