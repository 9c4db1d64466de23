//! Typed decoding of manifest attribute values.
//!
//! Every attribute arrives as a string. [`AttributeName`] maps the names the
//! playlist builder cares about to a decoding rule; all other names pass
//! through as text. Decoding never fails: malformed numbers become
//! [`Numeric::NaN`].

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

use crate::time::{parse_date, parse_duration};

/// Decoded attributes of one manifest element, keyed by attribute name.
pub type Attributes = BTreeMap<String, AttributeValue>;

/// A decoded numeric value.
///
/// `NaN` is the sentinel for input that had no leading digits. It is a
/// variant of its own so that it compares equal to itself.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i64),
    Float(f64),
    NaN,
}

impl Numeric {
    /// Build from a float, folding NaN into the sentinel.
    pub fn from_f64(value: f64) -> Self {
        if value.is_nan() {
            Numeric::NaN
        } else {
            Numeric::Float(value)
        }
    }

    /// The value as a float, or `None` for the sentinel.
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Numeric::Int(v) => Some(v as f64),
            Numeric::Float(v) => Some(v),
            Numeric::NaN => None,
        }
    }

    /// Truncate to an integer, the way re-parsing a number's text as base 10 would.
    pub fn truncate(self) -> Numeric {
        match self {
            Numeric::Float(v) if v.is_finite() && v.abs() < i64::MAX as f64 => {
                Numeric::Int(v.trunc() as i64)
            }
            Numeric::Float(v) if v.is_finite() => Numeric::Float(v.trunc()),
            Numeric::Float(_) => Numeric::NaN,
            other => other,
        }
    }
}

impl fmt::Display for Numeric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Numeric::Int(v) => write!(f, "{}", v),
            Numeric::Float(v) => write!(f, "{}", v),
            Numeric::NaN => write!(f, "NaN"),
        }
    }
}

impl Serialize for Numeric {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match *self {
            Numeric::Int(v) => serializer.serialize_i64(v),
            Numeric::Float(v) => serializer.serialize_f64(v),
            Numeric::NaN => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for Numeric {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            Some(Raw::Int(v)) => Numeric::Int(v),
            Some(Raw::Float(v)) => Numeric::from_f64(v),
            None => Numeric::NaN,
        })
    }
}

/// A decoded attribute value: a number or the raw string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttributeValue {
    Number(Numeric),
    Text(String),
}

impl AttributeValue {
    /// Interpret this value as a base-10 integer.
    ///
    /// Numbers are truncated, text is parsed with [`parse_int`].
    pub fn to_int(&self) -> Numeric {
        match self {
            AttributeValue::Number(n) => n.truncate(),
            AttributeValue::Text(s) => parse_int(s),
        }
    }
}

impl From<Numeric> for AttributeValue {
    fn from(value: Numeric) -> Self {
        AttributeValue::Number(value)
    }
}

impl From<i64> for AttributeValue {
    fn from(value: i64) -> Self {
        AttributeValue::Number(Numeric::Int(value))
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

/// Parse the leading base-10 integer of `s`.
///
/// Leading whitespace is skipped and an optional sign is accepted; parsing
/// stops at the first non-digit. No digits yields [`Numeric::NaN`]. Values
/// too large for `i64` come back as [`Numeric::Float`].
///
/// ```
/// use mpdforge_manifest::attributes::{parse_int, Numeric};
///
/// assert_eq!(parse_int("1920"), Numeric::Int(1920));
/// assert_eq!(parse_int("12px"), Numeric::Int(12));
/// assert_eq!(parse_int("abc"), Numeric::NaN);
/// ```
pub fn parse_int(s: &str) -> Numeric {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return Numeric::NaN;
    }
    let digits = &rest[..digits_len];

    match digits.parse::<i64>() {
        Ok(v) if negative => Numeric::Int(-v),
        Ok(v) => Numeric::Int(v),
        Err(_) => {
            let v: f64 = digits.parse().unwrap_or(f64::INFINITY);
            Numeric::Float(if negative { -v } else { v })
        }
    }
}

/// Attribute names with a dedicated decoding rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeName {
    /// Total presentation duration (ISO-8601 duration).
    MediaPresentationDuration,
    /// Anchor time for dynamic manifests (ISO-8601 date-time).
    AvailabilityStartTime,
    MinimumUpdatePeriod,
    TimeShiftBufferDepth,
    /// Period start relative to the availability start.
    Start,
    Width,
    Height,
    Bandwidth,
    StartNumber,
    Timescale,
    /// Segment duration in timescale units, or a Period duration string.
    Duration,
    /// SegmentTimeline `@d`.
    D,
    /// SegmentTimeline `@t`.
    T,
    /// SegmentTimeline `@r`.
    R,
    /// Anything else; passed through unchanged.
    Other,
}

impl AttributeName {
    pub fn from_name(name: &str) -> Self {
        match name {
            "mediaPresentationDuration" => AttributeName::MediaPresentationDuration,
            "availabilityStartTime" => AttributeName::AvailabilityStartTime,
            "minimumUpdatePeriod" => AttributeName::MinimumUpdatePeriod,
            "timeShiftBufferDepth" => AttributeName::TimeShiftBufferDepth,
            "start" => AttributeName::Start,
            "width" => AttributeName::Width,
            "height" => AttributeName::Height,
            "bandwidth" => AttributeName::Bandwidth,
            "startNumber" => AttributeName::StartNumber,
            "timescale" => AttributeName::Timescale,
            "duration" => AttributeName::Duration,
            "d" => AttributeName::D,
            "t" => AttributeName::T,
            "r" => AttributeName::R,
            _ => AttributeName::Other,
        }
    }

    /// The decoding rule for this attribute.
    pub fn decoder(self) -> fn(&str) -> AttributeValue {
        match self {
            AttributeName::MediaPresentationDuration
            | AttributeName::MinimumUpdatePeriod
            | AttributeName::TimeShiftBufferDepth
            | AttributeName::Start => decode_duration,
            AttributeName::AvailabilityStartTime => decode_date,
            AttributeName::Width
            | AttributeName::Height
            | AttributeName::Bandwidth
            | AttributeName::StartNumber
            | AttributeName::Timescale
            | AttributeName::D
            | AttributeName::T
            | AttributeName::R => decode_int,
            AttributeName::Duration => decode_int_or_duration,
            AttributeName::Other => decode_identity,
        }
    }
}

fn decode_duration(value: &str) -> AttributeValue {
    Numeric::from_f64(parse_duration(value)).into()
}

fn decode_date(value: &str) -> AttributeValue {
    parse_date(value)
        .map(|ms| Numeric::from_f64(ms / 1000.0))
        .unwrap_or(Numeric::NaN)
        .into()
}

fn decode_int(value: &str) -> AttributeValue {
    parse_int(value).into()
}

/// `@duration` is an integer on SegmentTemplate and an ISO-8601 duration on
/// Period. Try the integer form first and fall back only on the sentinel.
fn decode_int_or_duration(value: &str) -> AttributeValue {
    match parse_int(value) {
        Numeric::NaN => decode_duration(value),
        parsed => parsed.into(),
    }
}

fn decode_identity(value: &str) -> AttributeValue {
    AttributeValue::Text(value.to_string())
}

/// Decode a single attribute value by name.
///
/// ```
/// use mpdforge_manifest::attributes::{decode, AttributeValue, Numeric};
///
/// assert_eq!(decode("width", "1920"), AttributeValue::Number(Numeric::Int(1920)));
/// assert_eq!(decode("duration", "PT10S"), AttributeValue::Number(Numeric::Float(10.0)));
/// assert_eq!(decode("codecs", "avc1.4d401f"), AttributeValue::Text("avc1.4d401f".into()));
/// ```
pub fn decode(name: &str, value: &str) -> AttributeValue {
    AttributeName::from_name(name).decoder()(value)
}

/// A manifest element exposing its raw attributes.
///
/// `None` means the element has no attribute collection at all, which is
/// distinct from an empty one only to the implementor.
pub trait Element {
    fn attributes(&self) -> Option<Vec<(&str, &str)>>;
}

/// Owned attribute list for callers without their own element type.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttributeList(pub Vec<(String, String)>);

impl AttributeList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.0.push((name.into(), value.into()));
        self
    }
}

impl Element for AttributeList {
    fn attributes(&self) -> Option<Vec<(&str, &str)>> {
        Some(
            self.0
                .iter()
                .map(|(name, value)| (name.as_str(), value.as_str()))
                .collect(),
        )
    }
}

impl<E: Element> Element for Option<E> {
    fn attributes(&self) -> Option<Vec<(&str, &str)>> {
        self.as_ref().and_then(Element::attributes)
    }
}

/// Decode every attribute present on `element`.
///
/// An element without an attribute collection yields an empty map.
pub fn parse_attributes<E: Element + ?Sized>(element: &E) -> Attributes {
    let Some(pairs) = element.attributes() else {
        return Attributes::new();
    };

    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), decode(name, value)))
        .collect()
}
