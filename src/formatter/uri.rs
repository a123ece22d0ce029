//! Single-line URI-style payloads
//!
//! Field values are inserted as-is except for the `mailto:` subject and
//! body, which are percent-encoded as URI components.

use super::escape::encode_component;
use crate::models::{Email, Location, Payment, Phone, Sms, Wifi};

/// `WIFI:T:<security>;S:<ssid>;P:<password>;H:<true|false>;;`
pub fn format_wifi(wifi: &Wifi) -> String {
    format!(
        "WIFI:T:{};S:{};P:{};H:{};;",
        wifi.security, wifi.ssid, wifi.password, wifi.hidden
    )
}

/// `SMSTO:<phone>:<message>`
pub fn format_sms(sms: &Sms) -> String {
    format!("SMSTO:{}:{}", sms.phone, sms.message)
}

/// `mailto:<address>?subject=<enc>&body=<enc>`
pub fn format_email(email: &Email) -> String {
    format!(
        "mailto:{}?subject={}&body={}",
        email.address,
        encode_component(&email.subject),
        encode_component(&email.body)
    )
}

/// `tel:<phone>`
pub fn format_phone(phone: &Phone) -> String {
    format!("tel:{}", phone.phone)
}

/// `geo:<lat>,<lng>`, coordinates passed through unchecked
pub fn format_location(location: &Location) -> String {
    format!("geo:{},{}", location.lat, location.lng)
}

/// `upi://pay?pa=<recipient>&am=<amount>&cu=<currency>`
///
/// Scanning apps read these parameters raw, so nothing is escaped. A
/// recipient containing `&`, `=` or `#` produces an ambiguous URI.
pub fn format_payment(payment: &Payment) -> String {
    format!(
        "upi://pay?pa={}&am={}&cu={}",
        payment.recipient, payment.amount, payment.currency
    )
}
