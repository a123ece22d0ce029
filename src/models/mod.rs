//! Data model

/// Content records and the tagged union over them
pub mod content;
/// Image settings handed to renderers
pub mod render;

pub use content::{
    Contact, Content, ContentType, Currency, Email, Event, Location, Payment, Phone, Sms,
    TextContent, UrlContent, Wifi, WifiSecurity,
};
pub use render::{Color, ECLevel, RenderConfig};
