//! Render settings: size, colors and error correction

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::ConfigError;

/// Smallest accepted image size in pixels
pub const MIN_SIZE: u32 = 200;
/// Largest accepted image size in pixels
pub const MAX_SIZE: u32 = 500;

/// Error correction level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ECLevel {
    /// Low (~7% recovery capacity)
    L = 0,
    /// Medium (~15% recovery capacity)
    #[default]
    M = 1,
    /// Quartile (~25% recovery capacity)
    Q = 2,
    /// High (~30% recovery capacity)
    H = 3,
}

impl ECLevel {
    /// Single-letter name as encoders expect it
    pub fn as_str(&self) -> &'static str {
        match self {
            ECLevel::L => "L",
            ECLevel::M => "M",
            ECLevel::Q => "Q",
            ECLevel::H => "H",
        }
    }
}

impl FromStr for ECLevel {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "L" | "l" => Ok(ECLevel::L),
            "M" | "m" => Ok(ECLevel::M),
            "Q" | "q" => Ok(ECLevel::Q),
            "H" | "h" => Ok(ECLevel::H),
            other => Err(ConfigError::InvalidEcLevel(other.to_string())),
        }
    }
}

impl fmt::Display for ECLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque RGB color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
}

impl Color {
    /// `#000000`
    pub const BLACK: Color = Color::new(0, 0, 0);
    /// `#ffffff`
    pub const WHITE: Color = Color::new(0xff, 0xff, 0xff);

    /// Color from its three channels
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Lowercase `#rrggbb`
    pub fn to_hex(&self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// RGBA pixel, fully opaque
    pub fn to_rgba(&self) -> [u8; 4] {
        [self.r, self.g, self.b, 0xff]
    }
}

impl FromStr for Color {
    type Err = ConfigError;

    /// Parse `#rrggbb` or the `#rgb` shorthand
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || ConfigError::InvalidColor(s.to_string());
        let hex = s.trim().strip_prefix('#').ok_or_else(invalid)?;
        if !hex.is_ascii() {
            return Err(invalid());
        }
        let channel = |digits: &str| u8::from_str_radix(digits, 16).map_err(|_| invalid());
        match hex.len() {
            6 => Ok(Color::new(
                channel(&hex[0..2])?,
                channel(&hex[2..4])?,
                channel(&hex[4..6])?,
            )),
            3 => {
                // #abc == #aabbcc
                let r = channel(&hex[0..1])?;
                let g = channel(&hex[1..2])?;
                let b = channel(&hex[2..3])?;
                Ok(Color::new(r * 17, g * 17, b * 17))
            }
            _ => Err(invalid()),
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl Serialize for Color {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_hex())
    }
}

impl<'de> Deserialize<'de> for Color {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// How a payload should be drawn by an [`ImageRenderer`](crate::render::ImageRenderer)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderConfig {
    /// Edge length in pixels (200..=500)
    pub size: u32,
    /// Dark module color
    pub foreground: Color,
    /// Light module color
    pub background: Color,
    /// Redundancy level requested from the encoder
    pub error_correction: ECLevel,
}

impl RenderConfig {
    /// Build a config, rejecting sizes outside 200..=500
    pub fn new(
        size: u32,
        foreground: Color,
        background: Color,
        error_correction: ECLevel,
    ) -> Result<Self, ConfigError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(ConfigError::SizeOutOfRange(size));
        }
        Ok(Self {
            size,
            foreground,
            background,
            error_correction,
        })
    }

    /// Settings used for every image in batch mode
    pub fn batch() -> Self {
        Self {
            size: MIN_SIZE,
            foreground: Color::BLACK,
            background: Color::WHITE,
            error_correction: ECLevel::L,
        }
    }
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            size: 300,
            foreground: Color::BLACK,
            background: Color::WHITE,
            error_correction: ECLevel::M,
        }
    }
}
