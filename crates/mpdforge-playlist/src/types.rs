//! Master playlist model.
//!
//! Field and key spellings (`BANDWIDTH`, `PROGRAM-ID`, `mediaGroups`,
//! `resolvedUri`, ...) are what downstream players read and must not change.

use mpdforge_manifest::{Numeric, Segment};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Group id every video playlist uses to reference audio.
pub const AUDIO_GROUP_ID: &str = "audio";
/// Group id every video playlist uses to reference subtitles.
pub const SUBTITLES_GROUP_ID: &str = "subs";

/// Pixel dimensions of a video playlist.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub width: Numeric,
    pub height: Numeric,
}

/// HLS-style attributes of a playlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlaylistAttributes {
    #[serde(rename = "NAME", default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "AUDIO", default, skip_serializing_if = "Option::is_none")]
    pub audio: Option<String>,
    #[serde(rename = "SUBTITLES", default, skip_serializing_if = "Option::is_none")]
    pub subtitles: Option<String>,
    #[serde(rename = "RESOLUTION", default, skip_serializing_if = "Option::is_none")]
    pub resolution: Option<Resolution>,
    #[serde(rename = "CODECS", default, skip_serializing_if = "Option::is_none")]
    pub codecs: Option<String>,
    #[serde(rename = "BANDWIDTH")]
    pub bandwidth: Numeric,
    #[serde(rename = "PROGRAM-ID")]
    pub program_id: u32,
}

/// A single media playlist: one video variant, or one audio or subtitle
/// rendition nested in a media group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Playlist {
    pub attributes: PlaylistAttributes,
    pub uri: String,
    pub end_list: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeline: Option<u64>,
    pub resolved_uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub segments: Option<Vec<Segment>>,
}

/// A labeled alternate rendition inside a media group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaGroup {
    pub language: String,
    pub autoselect: bool,
    pub default: bool,
    pub playlists: Vec<Playlist>,
    pub uri: String,
}

/// Renditions of one group id, keyed by label.
pub type MediaGroupMap = BTreeMap<String, MediaGroup>;

/// Media groups by type, then by group id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaGroups {
    #[serde(rename = "AUDIO")]
    pub audio: BTreeMap<String, MediaGroupMap>,
    #[serde(rename = "VIDEO")]
    pub video: BTreeMap<String, MediaGroupMap>,
    #[serde(rename = "CLOSED-CAPTIONS")]
    pub closed_captions: BTreeMap<String, MediaGroupMap>,
    #[serde(rename = "SUBTITLES")]
    pub subtitles: BTreeMap<String, MediaGroupMap>,
}

impl MediaGroups {
    /// Audio renditions under the fixed `audio` group id.
    pub fn audio_group(&self) -> Option<&MediaGroupMap> {
        self.audio.get(AUDIO_GROUP_ID)
    }

    /// Subtitle renditions under the fixed `subs` group id.
    pub fn subtitle_group(&self) -> Option<&MediaGroupMap> {
        self.subtitles.get(SUBTITLES_GROUP_ID)
    }
}

/// The normalized master playlist.
///
/// `playlists` holds video variants only; audio and subtitle playlists live
/// in `media_groups`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MasterPlaylist {
    pub allow_cache: bool,
    pub discontinuity_starts: Vec<u64>,
    pub segments: Vec<Segment>,
    pub end_list: bool,
    pub media_groups: MediaGroups,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<f64>,
    pub playlists: Vec<Playlist>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn playlist() -> Playlist {
        Playlist {
            attributes: PlaylistAttributes {
                name: Some("v1".into()),
                audio: Some(AUDIO_GROUP_ID.into()),
                subtitles: Some(SUBTITLES_GROUP_ID.into()),
                resolution: Some(Resolution {
                    width: Numeric::Int(1920),
                    height: Numeric::Int(1080),
                }),
                codecs: Some("avc1.640028".into()),
                bandwidth: Numeric::Int(5_000_000),
                program_id: 1,
            },
            uri: String::new(),
            end_list: true,
            timeline: Some(0),
            resolved_uri: String::new(),
            segments: None,
        }
    }

    #[test]
    fn test_playlist_wire_keys() {
        let value = serde_json::to_value(playlist()).unwrap();
        assert_eq!(
            value,
            json!({
                "attributes": {
                    "NAME": "v1",
                    "AUDIO": "audio",
                    "SUBTITLES": "subs",
                    "RESOLUTION": { "width": 1920, "height": 1080 },
                    "CODECS": "avc1.640028",
                    "BANDWIDTH": 5000000,
                    "PROGRAM-ID": 1
                },
                "uri": "",
                "endList": true,
                "timeline": 0,
                "resolvedUri": ""
            })
        );
    }

    #[test]
    fn test_master_wire_keys() {
        let master = MasterPlaylist {
            allow_cache: true,
            discontinuity_starts: vec![],
            segments: vec![],
            end_list: true,
            media_groups: MediaGroups::default(),
            uri: String::new(),
            duration: Some(30.0),
            playlists: vec![],
        };

        let value = serde_json::to_value(&master).unwrap();
        assert_eq!(
            value,
            json!({
                "allowCache": true,
                "discontinuityStarts": [],
                "segments": [],
                "endList": true,
                "mediaGroups": {
                    "AUDIO": {},
                    "VIDEO": {},
                    "CLOSED-CAPTIONS": {},
                    "SUBTITLES": {}
                },
                "uri": "",
                "duration": 30.0,
                "playlists": []
            })
        );
    }

    #[test]
    fn test_master_json_roundtrip_keeps_groups() {
        let mut master = MasterPlaylist {
            allow_cache: true,
            discontinuity_starts: vec![],
            segments: vec![],
            end_list: true,
            media_groups: MediaGroups::default(),
            uri: String::new(),
            duration: None,
            playlists: vec![playlist()],
        };
        master.media_groups.audio.insert(
            AUDIO_GROUP_ID.into(),
            MediaGroupMap::from([(
                "main".to_string(),
                MediaGroup {
                    language: String::new(),
                    autoselect: true,
                    default: true,
                    playlists: vec![playlist()],
                    uri: String::new(),
                },
            )]),
        );

        let json = serde_json::to_string(&master).unwrap();
        let back: MasterPlaylist = serde_json::from_str(&json).unwrap();
        assert_eq!(back, master);
        assert!(back.media_groups.audio_group().is_some());
        assert!(back.media_groups.subtitle_group().is_none());
    }
}
