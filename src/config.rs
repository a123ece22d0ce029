//! Configuration
//!
//! Settings come from an optional TOML file. Every key has a default, so an
//! empty file (or no file) is a valid configuration. The reference time
//! zone for events can also be forced with `QR_PAYLOAD_TZ`.
//!
//! ```toml
//! [render]
//! size = 300
//! foreground = "#000000"
//! background = "#ffffff"
//! error_correction = "M"
//!
//! [batch]
//! size = 200
//! error_correction = "L"
//!
//! [event]
//! timezone = "Europe/Paris"
//!
//! [chart]
//! base_url = "https://chart.googleapis.com/chart"
//! ```

use std::path::Path;
use std::sync::OnceLock;

use chrono_tz::Tz;
use serde::Deserialize;

use crate::error::ConfigError;
use crate::formatter::FormatOptions;
use crate::models::{Color, ECLevel, RenderConfig};
use crate::render::chart::DEFAULT_CHART_URL;

/// Environment variable overriding `[event] timezone`
pub const TZ_ENV: &str = "QR_PAYLOAD_TZ";

fn parse_env_tz(name: &str) -> Option<Tz> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<Tz>().ok())
}

static TIMEZONE_OVERRIDE: OnceLock<Option<Tz>> = OnceLock::new();

pub(crate) fn timezone_override() -> Option<Tz> {
    *TIMEZONE_OVERRIDE.get_or_init(|| parse_env_tz(TZ_ENV))
}

/// Raw file contents, as written by the user
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// `[render]`
    pub render: RenderSection,
    /// `[batch]`
    pub batch: BatchSection,
    /// `[event]`
    pub event: EventSection,
    /// `[chart]`
    pub chart: ChartSection,
}

/// `[render]`: the interactive image settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderSection {
    /// Edge length in pixels, 200 to 500
    pub size: u32,
    /// `#rgb` or `#rrggbb`
    pub foreground: String,
    /// `#rgb` or `#rrggbb`
    pub background: String,
    /// L, M, Q or H
    pub error_correction: String,
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            size: 300,
            foreground: "#000000".into(),
            background: "#ffffff".into(),
            error_correction: "M".into(),
        }
    }
}

/// `[batch]`: settings for every batch image
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BatchSection {
    /// Edge length in pixels, 200 to 500
    pub size: u32,
    /// L, M, Q or H
    pub error_correction: String,
}

impl Default for BatchSection {
    fn default() -> Self {
        Self {
            size: 200,
            error_correction: "L".into(),
        }
    }
}

/// `[event]`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EventSection {
    /// IANA zone name; UTC when unset
    pub timezone: Option<String>,
}

/// `[chart]`
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChartSection {
    /// Endpoint the payload is appended to
    pub base_url: String,
}

impl Default for ChartSection {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_CHART_URL.into(),
        }
    }
}

impl Config {
    /// Load a `.toml` file from disk and parse it as a [`Config`]
    pub fn load(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }

    /// Parse TOML text; missing keys take their defaults
    pub fn from_toml(contents: &str) -> Result<Config, ConfigError> {
        Ok(toml::from_str(contents)?)
    }

    /// Validated settings for interactive rendering
    pub fn render_config(&self) -> Result<RenderConfig, ConfigError> {
        let section = &self.render;
        RenderConfig::new(
            section.size,
            section.foreground.parse::<Color>()?,
            section.background.parse::<Color>()?,
            section.error_correction.parse::<ECLevel>()?,
        )
    }

    /// Validated settings for batch rendering (always black on white)
    pub fn batch_config(&self) -> Result<RenderConfig, ConfigError> {
        RenderConfig::new(
            self.batch.size,
            Color::BLACK,
            Color::WHITE,
            self.batch.error_correction.parse::<ECLevel>()?,
        )
    }

    /// Zone from the file, without the environment override
    pub fn timezone(&self) -> Result<Tz, ConfigError> {
        match &self.event.timezone {
            Some(name) => name
                .trim()
                .parse::<Tz>()
                .map_err(|_| ConfigError::UnknownTimezone(name.clone())),
            None => Ok(Tz::UTC),
        }
    }

    /// Format options, honoring `QR_PAYLOAD_TZ` when it names a valid zone
    pub fn format_options(&self) -> Result<FormatOptions, ConfigError> {
        let timezone = match timezone_override() {
            Some(tz) => tz,
            None => self.timezone()?,
        };
        Ok(FormatOptions::with_timezone(timezone))
    }
}
