//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_config` - Insights configuration lookup
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use cashlens_core::db::Database;
use cashlens_core::InsightsConfig;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Load insights settings from `--config` or the default location
pub fn load_config(config_path: Option<&Path>) -> Result<InsightsConfig> {
    InsightsConfig::load(config_path).context("Failed to load insights config")
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    open_db(db_path, no_encrypt)?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Record a transaction: cashlens add -12.50 --merchant Cafe");
    println!("  2. See your forecast: cashlens forecast");
    println!("  3. Start the API: cashlens serve");

    Ok(())
}
