//! Presence gating
//!
//! The host only wants a payload when the active record is filled in enough
//! to mean something. Records below the minimum, and events whose
//! timestamps do not parse, both come back as `None`.

use tracing::warn;

use crate::formatter::{FormatOptions, format};
use crate::models::Content;

/// Payload for the active record, or `None` when it should be treated as absent
pub fn active_payload(content: &Content, options: &FormatOptions) -> Option<String> {
    if !content.has_minimum_fields() {
        return None;
    }
    match format(content, options) {
        Ok(payload) => Some(payload),
        Err(err) => {
            warn!(content_type = %content.content_type(), "{err}");
            None
        }
    }
}
