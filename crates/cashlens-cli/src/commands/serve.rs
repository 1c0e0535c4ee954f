//! Server command implementation

use std::path::Path;

use anyhow::Result;
use cashlens_core::InsightsConfig;

use super::open_db;

pub async fn cmd_serve(
    db_path: &Path,
    host: &str,
    port: u16,
    no_auth: bool,
    no_encrypt: bool,
    allowed_origins: Vec<String>,
    insights: InsightsConfig,
) -> Result<()> {
    println!("🚀 Starting Cashlens web server...");
    println!("   Database: {}", db_path.display());
    println!("   Listening: http://{}:{}", host, port);

    // Parse API keys from environment (comma-separated)
    let api_keys = cashlens_server::parse_api_keys(
        &std::env::var(cashlens_server::API_KEYS_ENV).unwrap_or_default(),
    );

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else {
        println!(
            "   🔒 Authentication: {} header",
            cashlens_server::USER_HEADER
        );
        if !api_keys.is_empty() {
            println!(
                "   🔑 API keys: {} configured ({})",
                api_keys.len(),
                cashlens_server::API_KEYS_ENV
            );
        }
    }
    if !allowed_origins.is_empty() {
        println!("   🌐 CORS origins: {}", allowed_origins.join(", "));
    }
    if no_encrypt {
        println!("   ⚠️  Encryption DISABLED (--no-encrypt)");
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let db = open_db(db_path, no_encrypt)?;

    let config = cashlens_server::ServerConfig {
        require_auth: !no_auth,
        allowed_origins,
        api_keys,
        insights,
    };

    cashlens_server::serve_with_config(db, host, port, config).await?;

    Ok(())
}
