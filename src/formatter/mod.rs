//! Payload formatting
//!
//! One pure function per content type, turning a record into the string a
//! scanning client expects:
//! - URL / text (scheme normalization, passthrough)
//! - vCard 3.0 contacts
//! - `WIFI:`, `SMSTO:`, `mailto:`, `tel:`, `geo:` and `upi://` URIs
//! - iCalendar VEVENT fragments
//!
//! Nothing here does I/O or keeps state; the same record always yields the
//! same bytes.

use chrono_tz::Tz;
use tracing::debug;

use crate::error::FormatError;
use crate::models::Content;

/// URI-component percent-encoding
pub mod escape;
/// iCalendar VEVENT with UTC timestamps
pub mod event;
/// Single-line URI schemes
pub mod uri;
/// URL normalization and plain text
pub mod url;
/// vCard 3.0
pub mod vcard;

pub use event::format_event;
pub use uri::{format_email, format_location, format_payment, format_phone, format_sms, format_wifi};
pub use url::{format_text, format_url, normalize_url};
pub use vcard::format_contact;

/// Inputs that are not part of any record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatOptions {
    /// Zone that event `start`/`end` wall-clock times are read in
    pub timezone: Tz,
}

impl FormatOptions {
    /// Options reading event times in `timezone`
    pub fn with_timezone(timezone: Tz) -> Self {
        Self { timezone }
    }
}

impl Default for FormatOptions {
    fn default() -> Self {
        Self { timezone: Tz::UTC }
    }
}

/// Format whichever record is active
///
/// Does not apply the minimum-fields check; see
/// [`active_payload`](crate::payload::active_payload) for the gated version.
pub fn format(content: &Content, options: &FormatOptions) -> Result<String, FormatError> {
    let payload = match content {
        Content::Url(record) => format_url(record),
        Content::Text(record) => format_text(record),
        Content::Contact(record) => format_contact(record),
        Content::Wifi(record) => format_wifi(record),
        Content::Sms(record) => format_sms(record),
        Content::Email(record) => format_email(record),
        Content::Phone(record) => format_phone(record),
        Content::Location(record) => format_location(record),
        Content::Event(record) => format_event(record, options.timezone)?,
        Content::Payment(record) => format_payment(record),
    };
    debug!(
        content_type = %content.content_type(),
        len = payload.len(),
        "formatted payload"
    );
    Ok(payload)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ContentType, Event, Phone, UrlContent};

    #[test]
    fn test_dispatch_matches_direct_call() {
        let phone = Phone {
            phone: "911".into(),
        };
        let content = Content::Phone(phone.clone());
        assert_eq!(
            format(&content, &FormatOptions::default()).unwrap(),
            format_phone(&phone)
        );
    }

    #[test]
    fn test_idempotent_for_every_type() {
        let options = FormatOptions::with_timezone(chrono_tz::Europe::Paris);
        for ty in ContentType::ALL {
            let content = match ty {
                ContentType::Event => Content::Event(Event {
                    title: "Launch".into(),
                    start: "2024-04-01T09:00".into(),
                    end: "2024-04-01T10:30".into(),
                    description: "Go".into(),
                }),
                ContentType::Url => Content::Url(UrlContent {
                    url: "example.com".into(),
                }),
                other => Content::empty(other),
            };
            let first = format(&content, &options).unwrap();
            let second = format(&content, &options).unwrap();
            assert_eq!(first, second, "{} not idempotent", ty);
        }
    }

    #[test]
    fn test_event_uses_option_timezone() {
        let content = Content::Event(Event {
            title: "X".into(),
            start: "2024-01-01T10:00".into(),
            end: "2024-01-01T11:00".into(),
            description: String::new(),
        });
        let paris = FormatOptions::with_timezone(chrono_tz::Europe::Paris);
        let out = format(&content, &paris).unwrap();
        assert!(out.contains("DTSTART:20240101T090000Z"));
        assert!(out.contains("DTEND:20240101T100000Z"));
    }
}
