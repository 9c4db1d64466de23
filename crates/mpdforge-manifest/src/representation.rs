//! Representation descriptors handed over by the manifest walker.
//!
//! A descriptor is one selectable encoding (bitrate, resolution, language)
//! with its decoded attributes and an already-resolved segment list.

use serde::{Deserialize, Serialize};

use crate::attributes::{AttributeValue, Attributes, Numeric};
use crate::error::Result;

/// Media kind of a representation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MediaKind {
    Video,
    Audio,
    Text,
}

impl std::fmt::Display for MediaKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MediaKind::Video => write!(f, "video"),
            MediaKind::Audio => write!(f, "audio"),
            MediaKind::Text => write!(f, "text"),
        }
    }
}

/// `<Role>` descriptor of an adaptation set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(default, rename = "schemeIdUri", skip_serializing_if = "Option::is_none")]
    pub scheme_id_uri: Option<String>,
}

impl Role {
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            scheme_id_uri: None,
        }
    }
}

/// Attributes of a representation, merged down from MPD, Period and
/// AdaptationSet, plus the fields computed by the walker.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RepresentationAttributes {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub codecs: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bandwidth: Option<AttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<AttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<AttributeValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub period_index: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lang: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<Role>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_duration: Option<f64>,
    /// Resolved base URL, used by single-file text tracks.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Every other decoded attribute.
    #[serde(flatten)]
    pub other: Attributes,
}

impl RepresentationAttributes {
    /// Classify by `mimeType`, then `contentType`.
    ///
    /// Video is checked before audio and audio before text. Anything else
    /// returns `None`.
    pub fn media_kind(&self) -> Option<MediaKind> {
        let mime = self.mime_type.as_deref();
        let content = self.content_type.as_deref();

        if mime == Some("video/mp4") || content == Some("video") {
            Some(MediaKind::Video)
        } else if mime == Some("audio/mp4") || content == Some("audio") {
            Some(MediaKind::Audio)
        } else if mime == Some("text/vtt") || content == Some("text") {
            Some(MediaKind::Text)
        } else {
            None
        }
    }

    /// `bandwidth` as a base-10 integer; missing is the NaN sentinel.
    pub fn bandwidth_int(&self) -> Numeric {
        int_or_nan(self.bandwidth.as_ref())
    }

    pub fn width_int(&self) -> Numeric {
        int_or_nan(self.width.as_ref())
    }

    pub fn height_int(&self) -> Numeric {
        int_or_nan(self.height.as_ref())
    }

    /// The role value, if one was given and is non-empty.
    pub fn role_value(&self) -> Option<&str> {
        self.role
            .as_ref()
            .and_then(|role| role.value.as_deref())
            .filter(|value| !value.is_empty())
    }

    /// The language, if one was given and is non-empty.
    pub fn language(&self) -> Option<&str> {
        self.lang.as_deref().filter(|lang| !lang.is_empty())
    }
}

fn int_or_nan(value: Option<&AttributeValue>) -> Numeric {
    value.map(AttributeValue::to_int).unwrap_or(Numeric::NaN)
}

/// A media segment reference.
///
/// Only the fields the playlist builder synthesizes are typed; everything
/// else the walker produced (`map`, `number`, byte ranges) rides along.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Segment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resolved_uri: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

/// One representation ready for playlist building.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Representation {
    pub attributes: RepresentationAttributes,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
}

impl Representation {
    pub fn media_kind(&self) -> Option<MediaKind> {
        self.attributes.media_kind()
    }
}

/// Read a JSON array of representation descriptors.
pub fn load_representations(json: &str) -> Result<Vec<Representation>> {
    let representations: Vec<Representation> = serde_json::from_str(json)?;
    tracing::debug!(count = representations.len(), "loaded representation descriptors");
    Ok(representations)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(mime: Option<&str>, content: Option<&str>) -> RepresentationAttributes {
        RepresentationAttributes {
            mime_type: mime.map(String::from),
            content_type: content.map(String::from),
            ..Default::default()
        }
    }

    #[test]
    fn test_media_kind_from_mime_type() {
        assert_eq!(attrs(Some("video/mp4"), None).media_kind(), Some(MediaKind::Video));
        assert_eq!(attrs(Some("audio/mp4"), None).media_kind(), Some(MediaKind::Audio));
        assert_eq!(attrs(Some("text/vtt"), None).media_kind(), Some(MediaKind::Text));
    }

    #[test]
    fn test_media_kind_from_content_type() {
        assert_eq!(attrs(None, Some("video")).media_kind(), Some(MediaKind::Video));
        assert_eq!(attrs(None, Some("audio")).media_kind(), Some(MediaKind::Audio));
        assert_eq!(attrs(None, Some("text")).media_kind(), Some(MediaKind::Text));
    }

    #[test]
    fn test_media_kind_unmatched() {
        assert_eq!(attrs(Some("application/ttml+xml"), None).media_kind(), None);
        assert_eq!(attrs(Some("video/webm"), Some("image")).media_kind(), None);
        assert_eq!(attrs(None, None).media_kind(), None);
    }

    #[test]
    fn test_media_kind_either_field_matches() {
        // a non-matching mimeType does not hide a matching contentType
        assert_eq!(
            attrs(Some("video/webm"), Some("video")).media_kind(),
            Some(MediaKind::Video)
        );
    }

    #[test]
    fn test_media_kind_display() {
        assert_eq!(MediaKind::Video.to_string(), "video");
        assert_eq!(MediaKind::Audio.to_string(), "audio");
        assert_eq!(MediaKind::Text.to_string(), "text");
    }

    #[test]
    fn test_missing_period_index_stays_missing() {
        let reps = load_representations(r#"[{ "attributes": { "id": "a" } }]"#).unwrap();
        assert_eq!(reps[0].attributes.period_index, None);

        let json = serde_json::to_value(&reps[0]).unwrap();
        assert!(json["attributes"].get("periodIndex").is_none());
    }

    #[test]
    fn test_integer_accessors() {
        let attributes = RepresentationAttributes {
            bandwidth: Some(AttributeValue::from("128000")),
            width: Some(AttributeValue::from(1280_i64)),
            ..Default::default()
        };
        assert_eq!(attributes.bandwidth_int(), Numeric::Int(128_000));
        assert_eq!(attributes.width_int(), Numeric::Int(1280));
        assert_eq!(attributes.height_int(), Numeric::NaN);
    }

    #[test]
    fn test_empty_lang_and_role_are_absent() {
        let attributes = RepresentationAttributes {
            lang: Some(String::new()),
            role: Some(Role::new("")),
            ..Default::default()
        };
        assert_eq!(attributes.language(), None);
        assert_eq!(attributes.role_value(), None);
    }

    #[test]
    fn test_load_representations() {
        let json = r#"[
            {
                "attributes": {
                    "id": "video=800000",
                    "mimeType": "video/mp4",
                    "bandwidth": 800000,
                    "width": 1280,
                    "height": 720,
                    "periodIndex": 0,
                    "sourceDuration": 120,
                    "role": { "value": "main" },
                    "frameRate": "25"
                },
                "segments": [
                    { "uri": "seg-1.m4s", "timeline": 0, "duration": 2, "number": 1 }
                ]
            },
            { "attributes": { "id": "subs", "mimeType": "text/vtt", "lang": "en" } }
        ]"#;

        let reps = load_representations(json).unwrap();
        assert_eq!(reps.len(), 2);

        let video = &reps[0];
        assert_eq!(video.media_kind(), Some(MediaKind::Video));
        assert_eq!(video.attributes.bandwidth_int(), Numeric::Int(800_000));
        assert_eq!(video.attributes.source_duration, Some(120.0));
        assert_eq!(video.attributes.period_index, Some(0));
        assert_eq!(video.attributes.role_value(), Some("main"));
        assert_eq!(
            video.attributes.other.get("frameRate"),
            Some(&AttributeValue::Text("25".into()))
        );

        let segments = video.segments.as_ref().unwrap();
        assert_eq!(segments[0].uri.as_deref(), Some("seg-1.m4s"));
        assert_eq!(segments[0].extra["number"], serde_json::json!(1));

        assert!(reps[1].segments.is_none());
        assert_eq!(reps[1].attributes.language(), Some("en"));
    }

    #[test]
    fn test_load_representations_rejects_non_array() {
        assert!(load_representations(r#"{"attributes": {}}"#).is_err());
    }
}
