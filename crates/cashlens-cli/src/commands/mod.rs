//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Core commands (init) and shared utilities (open_db, load_config)
//! - `insights` - Forecast, anomaly and recommendation commands
//! - `serve` - Web server command
//! - `transactions` - Account and transaction commands (list, add)

pub mod core;
pub mod insights;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use core::*;
pub use insights::*;
pub use serve::*;
pub use transactions::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
