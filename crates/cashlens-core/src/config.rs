//! Insights configuration
//!
//! Controls which calendar the engine uses to assign transaction instants to
//! days. Loaded from TOML, with an environment override:
//!
//! ```toml
//! [calendar]
//! utc_offset_minutes = -300   # bucket days in UTC-05:00
//! ```
//!
//! Lookup order: explicit path, then `<config_dir>/cashlens/insights.toml`,
//! then built-in defaults (UTC). `CASHLENS_UTC_OFFSET_MINUTES` wins over
//! the file when set.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{DateTime, FixedOffset, NaiveDate, Utc};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::error::{Error, Result};

/// Environment variable overriding the day boundary offset
pub const UTC_OFFSET_ENV: &str = "CASHLENS_UTC_OFFSET_MINUTES";

/// Largest offset accepted, in minutes (±24h exclusive)
const MAX_OFFSET_MINUTES: i32 = 24 * 60 - 1;

/// Calendar used to turn an instant into a day
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DayBoundary {
    /// Days start at 00:00 UTC
    #[default]
    Utc,
    /// Days start at 00:00 in a fixed offset from UTC
    Fixed(FixedOffset),
}

impl DayBoundary {
    /// Build a boundary from an offset in minutes east of UTC
    pub fn from_offset_minutes(minutes: i32) -> Result<Self> {
        if minutes == 0 {
            return Ok(Self::Utc);
        }
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(Error::Config(format!(
                "UTC offset out of range: {} minutes",
                minutes
            )));
        }
        FixedOffset::east_opt(minutes * 60)
            .map(Self::Fixed)
            .ok_or_else(|| Error::Config(format!("Invalid UTC offset: {} minutes", minutes)))
    }

    /// Calendar day containing `instant`
    pub fn day_of(&self, instant: DateTime<Utc>) -> NaiveDate {
        match self {
            Self::Utc => instant.date_naive(),
            Self::Fixed(offset) => instant.with_timezone(offset).date_naive(),
        }
    }

    pub fn offset_minutes(&self) -> i32 {
        match self {
            Self::Utc => 0,
            Self::Fixed(offset) => offset.local_minus_utc() / 60,
        }
    }
}

/// Engine configuration
#[derive(Debug, Clone, Default)]
pub struct InsightsConfig {
    pub day_boundary: DayBoundary,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    calendar: Option<RawCalendar>,
}

#[derive(Debug, Deserialize)]
struct RawCalendar {
    utc_offset_minutes: Option<i32>,
}

impl InsightsConfig {
    /// Load configuration (override path first, then default location)
    pub fn load(override_path: Option<&Path>) -> Result<Self> {
        let path = override_path
            .map(Path::to_path_buf)
            .or_else(default_config_path);

        let mut config = match path {
            Some(p) if p.exists() => {
                debug!(path = %p.display(), "Loading insights config");
                let content = fs::read_to_string(&p)?;
                parse_config(&content)?
            }
            _ => Self::default(),
        };

        if let Ok(value) = std::env::var(UTC_OFFSET_ENV) {
            match value.trim().parse::<i32>() {
                Ok(minutes) => config.day_boundary = DayBoundary::from_offset_minutes(minutes)?,
                Err(_) => warn!(value = %value, "Ignoring non-numeric {}", UTC_OFFSET_ENV),
            }
        }

        Ok(config)
    }
}

/// Default config location
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("cashlens").join("insights.toml"))
}

/// Parse config from TOML content
fn parse_config(content: &str) -> Result<InsightsConfig> {
    let raw: RawConfig = toml::from_str(content)
        .map_err(|e| Error::Config(format!("Invalid config TOML: {}", e)))?;

    let mut config = InsightsConfig::default();
    if let Some(minutes) = raw.calendar.and_then(|c| c.utc_offset_minutes) {
        config.day_boundary = DayBoundary::from_offset_minutes(minutes)?;
    }

    Ok(config)
}
