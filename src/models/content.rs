//! Input records, one per content type, and the [`Content`] union over them

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::UnknownContentType;

/// Kind of content a payload encodes, in tab order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    /// Web link
    Url,
    /// Free text
    Text,
    /// vCard contact
    Contact,
    /// WiFi network credentials
    Wifi,
    /// SMS message
    Sms,
    /// `mailto:` message
    Email,
    /// `tel:` number
    Phone,
    /// `geo:` coordinates
    Location,
    /// iCalendar event
    Event,
    /// UPI payment request
    Payment,
}

impl ContentType {
    /// Every content type, in tab order
    pub const ALL: [ContentType; 10] = [
        ContentType::Url,
        ContentType::Text,
        ContentType::Contact,
        ContentType::Wifi,
        ContentType::Sms,
        ContentType::Email,
        ContentType::Phone,
        ContentType::Location,
        ContentType::Event,
        ContentType::Payment,
    ];

    /// Stable lowercase identifier (`"url"`, `"wifi"`, ...)
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Url => "url",
            ContentType::Text => "text",
            ContentType::Contact => "contact",
            ContentType::Wifi => "wifi",
            ContentType::Sms => "sms",
            ContentType::Email => "email",
            ContentType::Phone => "phone",
            ContentType::Location => "location",
            ContentType::Event => "event",
            ContentType::Payment => "payment",
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ContentType {
    type Err = UnknownContentType;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ContentType::ALL
            .into_iter()
            .find(|ty| ty.as_str() == s)
            .ok_or_else(|| UnknownContentType(s.to_string()))
    }
}

/// URL record (scheme may be omitted)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UrlContent {
    /// Link, with or without a scheme
    pub url: String,
}

/// Free text record, encoded verbatim
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TextContent {
    /// Encoded verbatim
    pub text: String,
}

/// Contact card fields
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Contact {
    /// Given name, first half of `FN`
    pub first_name: String,
    /// Family name, first component of `N`
    pub last_name: String,
    /// `TEL`
    pub phone: String,
    /// `EMAIL`
    pub email: String,
    /// `ORG`
    pub organization: String,
    /// `URL`
    pub url: String,
}

/// WiFi authentication type as written into the `T:` field
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WifiSecurity {
    /// WPA/WPA2
    #[default]
    #[serde(rename = "WPA")]
    Wpa,
    /// Legacy WEP
    #[serde(rename = "WEP")]
    Wep,
    /// Open network
    #[serde(rename = "nopass")]
    NoPass,
}

impl WifiSecurity {
    /// Value of the `T:` field
    pub fn as_str(&self) -> &'static str {
        match self {
            WifiSecurity::Wpa => "WPA",
            WifiSecurity::Wep => "WEP",
            WifiSecurity::NoPass => "nopass",
        }
    }
}

impl fmt::Display for WifiSecurity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// WiFi network credentials
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Wifi {
    /// Network name
    pub ssid: String,
    /// Passphrase; empty for open networks
    pub password: String,
    /// Authentication type
    pub security: WifiSecurity,
    /// Whether the network hides its SSID
    pub hidden: bool,
}

/// Text message to send
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sms {
    /// Recipient number
    pub phone: String,
    /// Prefilled message body
    pub message: String,
}

/// Email message; `email` is accepted for `address` on input
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Email {
    #[serde(alias = "email")]
    /// Recipient address
    pub address: String,
    /// Subject line, percent-encoded when formatted
    pub subject: String,
    /// Message body, percent-encoded when formatted
    pub body: String,
}

/// Number to dial
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Phone {
    /// Dialed as typed
    pub phone: String,
}

/// Coordinates as typed by the user, never validated numerically
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Location {
    /// Latitude
    pub lat: String,
    /// Longitude
    pub lng: String,
}

/// Calendar event; `start`/`end` are local date-time strings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Event {
    /// `SUMMARY`
    pub title: String,
    /// Start, in the reference zone unless it carries an offset
    pub start: String,
    /// End, same rules as `start`
    pub end: String,
    /// `DESCRIPTION`
    pub description: String,
}

/// Currency code written into the `cu=` parameter
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    /// US dollar
    #[default]
    Usd,
    /// Euro
    Eur,
    /// Indian rupee
    Inr,
    /// Pound sterling
    Gbp,
}

impl Currency {
    /// ISO 4217 code
    pub fn as_str(&self) -> &'static str {
        match self {
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Inr => "INR",
            Currency::Gbp => "GBP",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Payment {
    /// Payee address (`pa=`)
    pub recipient: String,
    /// Decimal amount as typed (`am=`)
    pub amount: String,
    /// `cu=`
    pub currency: Currency,
}

/// The active record, tagged by its content type
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Content {
    /// Web link
    Url(UrlContent),
    /// Free text
    Text(TextContent),
    /// vCard contact
    Contact(Contact),
    /// WiFi credentials
    Wifi(Wifi),
    /// SMS message
    Sms(Sms),
    /// `mailto:` message
    Email(Email),
    /// `tel:` number
    Phone(Phone),
    /// `geo:` coordinates
    Location(Location),
    /// iCalendar event
    Event(Event),
    /// UPI payment
    Payment(Payment),
}

impl Content {
    /// Blank record for a content type, with the form's defaults
    pub fn empty(content_type: ContentType) -> Self {
        match content_type {
            ContentType::Url => Content::Url(UrlContent::default()),
            ContentType::Text => Content::Text(TextContent::default()),
            ContentType::Contact => Content::Contact(Contact::default()),
            ContentType::Wifi => Content::Wifi(Wifi::default()),
            ContentType::Sms => Content::Sms(Sms::default()),
            ContentType::Email => Content::Email(Email::default()),
            ContentType::Phone => Content::Phone(Phone::default()),
            ContentType::Location => Content::Location(Location::default()),
            ContentType::Event => Content::Event(Event::default()),
            ContentType::Payment => Content::Payment(Payment::default()),
        }
    }

    /// Which tab this record belongs to
    pub fn content_type(&self) -> ContentType {
        match self {
            Content::Url(_) => ContentType::Url,
            Content::Text(_) => ContentType::Text,
            Content::Contact(_) => ContentType::Contact,
            Content::Wifi(_) => ContentType::Wifi,
            Content::Sms(_) => ContentType::Sms,
            Content::Email(_) => ContentType::Email,
            Content::Phone(_) => ContentType::Phone,
            Content::Location(_) => ContentType::Location,
            Content::Event(_) => ContentType::Event,
            Content::Payment(_) => ContentType::Payment,
        }
    }

    /// Whether the record carries enough to be worth encoding at all
    ///
    /// A record failing this check is treated as absent: it is not
    /// formatted, rendered or counted.
    pub fn has_minimum_fields(&self) -> bool {
        match self {
            Content::Url(u) => !u.url.trim().is_empty(),
            Content::Text(t) => !t.text.trim().is_empty(),
            Content::Contact(c) => {
                !c.first_name.is_empty()
                    || !c.last_name.is_empty()
                    || !c.phone.is_empty()
                    || !c.email.is_empty()
            }
            Content::Wifi(w) => !w.ssid.is_empty(),
            Content::Sms(s) => !s.phone.is_empty(),
            Content::Email(e) => !e.address.is_empty(),
            Content::Phone(p) => !p.phone.is_empty(),
            Content::Location(l) => !l.lat.is_empty() && !l.lng.is_empty(),
            Content::Event(e) => !e.title.is_empty(),
            Content::Payment(p) => !p.recipient.is_empty() && !p.amount.is_empty(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_type_ids() {
        for ty in ContentType::ALL {
            assert_eq!(ty.as_str().parse::<ContentType>(), Ok(ty));
            assert_eq!(Content::empty(ty).content_type(), ty);
        }
        assert!("vcard".parse::<ContentType>().is_err());
    }

    #[test]
    fn test_unknown_content_type_error() {
        let err = "WiFi".parse::<ContentType>().unwrap_err();
        assert_eq!(err, UnknownContentType("WiFi".into()));
        assert_eq!(err.to_string(), r#"unknown content type "WiFi""#);
    }

    #[test]
    fn test_empty_records_are_absent() {
        for ty in ContentType::ALL {
            assert!(
                !Content::empty(ty).has_minimum_fields(),
                "{} should be absent when empty",
                ty
            );
        }
    }

    #[test]
    fn test_contact_presence() {
        let phone_only = Content::Contact(Contact {
            phone: "+15550100".into(),
            ..Default::default()
        });
        assert!(phone_only.has_minimum_fields());

        // organization and url alone do not make a contact
        let org_only = Content::Contact(Contact {
            organization: "Analytical Engines".into(),
            url: "example.com".into(),
            ..Default::default()
        });
        assert!(!org_only.has_minimum_fields());
    }

    #[test]
    fn test_whitespace_url_and_text_are_absent() {
        assert!(!Content::Url(UrlContent { url: "   ".into() }).has_minimum_fields());
        assert!(!Content::Text(TextContent { text: "\n\t".into() }).has_minimum_fields());
        assert!(Content::Text(TextContent { text: " x ".into() }).has_minimum_fields());
    }

    #[test]
    fn test_location_and_payment_need_both_fields() {
        let half = Content::Location(Location {
            lat: "48.85".into(),
            lng: String::new(),
        });
        assert!(!half.has_minimum_fields());

        let no_amount = Content::Payment(Payment {
            recipient: "shop@upi".into(),
            ..Default::default()
        });
        assert!(!no_amount.has_minimum_fields());
    }

    #[test]
    fn test_deserialize_tagged_content() {
        let json = r#"{"type":"wifi","ssid":"Home","password":"pw","security":"nopass","hidden":true}"#;
        let content: Content = serde_json::from_str(json).unwrap();
        assert_eq!(
            content,
            Content::Wifi(Wifi {
                ssid: "Home".into(),
                password: "pw".into(),
                security: WifiSecurity::NoPass,
                hidden: true,
            })
        );

        let json = r#"{"type":"email","email":"a@b.com"}"#;
        let content: Content = serde_json::from_str(json).unwrap();
        match content {
            Content::Email(e) => assert_eq!(e.address, "a@b.com"),
            other => panic!("unexpected {:?}", other),
        }

        let json = r#"{"type":"contact","firstName":"Ada","lastName":"Lovelace"}"#;
        let content: Content = serde_json::from_str(json).unwrap();
        assert_eq!(content.content_type(), ContentType::Contact);
        assert!(content.has_minimum_fields());
    }

    #[test]
    fn test_defaults_match_form() {
        assert_eq!(Wifi::default().security, WifiSecurity::Wpa);
        assert!(!Wifi::default().hidden);
        assert_eq!(Payment::default().currency, Currency::Usd);
    }
}
