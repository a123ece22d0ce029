//! qr_payload - payload formatting for QR codes
//!
//! Turns structured form records into the exact strings that phone cameras,
//! wallets and calendar apps expect to find inside a QR code: vCard 3.0
//! contacts, `WIFI:` credentials, `mailto:`/`tel:`/`geo:`/`SMSTO:` URIs,
//! iCalendar events and UPI payment links.
//!
//! The formatters are pure functions. Around them sit the host-side
//! pieces: presence gating, an injectable [`ImageRenderer`], batch mode and
//! usage statistics.
//!
//! # Example
//! ```
//! use qr_payload::{Content, FormatOptions, Wifi, WifiSecurity, active_payload};
//!
//! let wifi = Content::Wifi(Wifi {
//!     ssid: "Home".into(),
//!     password: "pw".into(),
//!     security: WifiSecurity::Wpa,
//!     hidden: true,
//! });
//! let payload = active_payload(&wifi, &FormatOptions::default());
//! assert_eq!(payload.as_deref(), Some("WIFI:T:WPA;S:Home;P:pw;H:true;;"));
//! ```

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Batch mode (one image per line)
pub mod batch;
/// TOML and environment configuration
pub mod config;
/// Error types
pub mod error;
/// One pure formatter per content type
pub mod formatter;
/// Session composition: gate, render, count
pub mod generator;
/// Records, content types and render settings
pub mod models;
/// Minimum-fields gating
pub mod payload;
/// Image rendering capability and implementations
pub mod render;
/// Usage counters with an injected store
pub mod stats;

pub use batch::{BatchItem, batch_lines, render_batch};
pub use config::Config;
pub use error::{ConfigError, FormatError, RenderError, StatsError, UnknownContentType};
pub use formatter::{
    FormatOptions, format, format_contact, format_email, format_event, format_location,
    format_payment, format_phone, format_sms, format_text, format_url, format_wifi, normalize_url,
};
pub use generator::{Generated, Generator};
pub use models::{
    Color, Contact, Content, ContentType, Currency, ECLevel, Email, Event, Location, Payment,
    Phone, RenderConfig, Sms, TextContent, UrlContent, Wifi, WifiSecurity,
};
pub use payload::active_payload;
pub use render::{ChartRenderer, FallbackRenderer, ImageHandle, ImageRenderer, LazyRenderer, QrEncoder};
pub use stats::{MemoryStore, StatsStore, UsageCounts, UsageStats};
