//! Error types
//!
//! Only [`FormatError`] comes out of the formatters themselves. The other
//! enums belong to the host-side pieces (rendering, stats, configuration).

use std::path::PathBuf;

use thiserror::Error;

/// Failure while turning a record into a payload string
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormatError {
    /// An event `start`/`end` value did not parse as a date-time
    #[error("malformed timestamp in `{field}`: {value:?}")]
    MalformedTimestamp {
        /// Which event field failed (`start` or `end`)
        field: &'static str,
        /// The raw value that was rejected
        value: String,
    },
}

/// A string that is not one of the known content type ids
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown content type {0:?}")]
pub struct UnknownContentType(pub String);

/// Failure while producing an image for a payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// Payload was empty or whitespace only
    #[error("nothing to render: payload is blank")]
    EmptyPayload,
    /// The encoding capability could not be loaded
    #[error("encoder unavailable: {0}")]
    Unavailable(String),
    /// The encoder rejected the payload
    #[error("encoder failed: {0}")]
    Encoder(String),
}

/// Failure while loading or persisting usage statistics
#[derive(Debug, Error)]
pub enum StatsError {
    /// Snapshot could not be encoded or decoded as JSON
    #[error("failed to (de)serialize usage stats: {0}")]
    Serialize(#[from] serde_json::Error),
    /// The backing store failed
    #[error("stats store error: {0}")]
    Store(String),
}

/// Failure while building configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Config file could not be read
    #[error("reading config={path}: {source}")]
    Io {
        /// File that was opened
        path: PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
    /// File is not valid TOML or has unknown keys
    #[error("parsing config: {0}")]
    Parse(#[from] toml::de::Error),
    /// Image size outside the accepted range
    #[error("size {0} is outside 200..=500")]
    SizeOutOfRange(u32),
    /// Color is not `#rgb` or `#rrggbb`
    #[error("invalid color {0:?}, expected #rgb or #rrggbb")]
    InvalidColor(String),
    /// Error correction level is not one of L, M, Q, H
    #[error("invalid error correction level {0:?}, expected L, M, Q or H")]
    InvalidEcLevel(String),
    /// Time zone name is not in the IANA database
    #[error("unknown time zone {0:?}")]
    UnknownTimezone(String),
}
