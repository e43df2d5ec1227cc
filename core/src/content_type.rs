//! Media types the library recognizes by name.

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// Header name the content type travels under.
pub const CONTENT_TYPE: &str = "Content-Type";

/// A known media type, or the raw header value for anything else.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ContentType {
    Json,
    Xml,
    Form,
    Text,
    OctetStream,
    Other(String),
}

impl ContentType {
    /// Normalize a header value.
    ///
    /// Known types match on their essence, ignoring case and any parameters,
    /// so `application/json; charset=utf-8` is `Json`. Unknown values are
    /// kept verbatim (trimmed) in `Other`.
    pub fn parse(s: &str) -> Self {
        let essence = s.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "application/json" => ContentType::Json,
            "application/xml" => ContentType::Xml,
            "application/x-www-form-urlencoded" => ContentType::Form,
            "text/plain" => ContentType::Text,
            "application/octet-stream" => ContentType::OctetStream,
            _ => ContentType::Other(s.trim().to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            ContentType::Json => "application/json",
            ContentType::Xml => "application/xml",
            ContentType::Form => "application/x-www-form-urlencoded",
            ContentType::Text => "text/plain",
            ContentType::OctetStream => "application/octet-stream",
            ContentType::Other(raw) => raw.as_str(),
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, ContentType::Json)
    }

    /// True when no content type was reported at all.
    pub fn is_unset(&self) -> bool {
        matches!(self, ContentType::Other(raw) if raw.is_empty())
    }
}

impl Default for ContentType {
    fn default() -> Self {
        ContentType::Other(String::new())
    }
}

impl FromStr for ContentType {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(ContentType::parse(s))
    }
}

impl From<&str> for ContentType {
    fn from(s: &str) -> Self {
        ContentType::parse(s)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
