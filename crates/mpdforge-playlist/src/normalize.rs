//! Representation descriptors to master playlist.
//!
//! Video representations become variants one-to-one. Audio and text
//! representations are folded into labeled media groups with different
//! selection rules:
//!
//! - audio keeps the highest-bandwidth representation per label
//! - text keeps the first representation per label
//!
//! Descriptors that are neither video, audio nor text are dropped.

use mpdforge_manifest::{MediaKind, Representation, Segment};

use crate::types::{
    MasterPlaylist, MediaGroup, MediaGroupMap, MediaGroups, Playlist, PlaylistAttributes,
    Resolution, AUDIO_GROUP_ID, SUBTITLES_GROUP_ID,
};

const PROGRAM_ID: u32 = 1;
const MAIN_ROLE: &str = "main";
const DEFAULT_TEXT_LABEL: &str = "text";

/// Build the master playlist for one manifest.
///
/// Returns `None` for an empty descriptor list. The duration is taken from
/// the first descriptor and assumed uniform across the manifest.
pub fn to_master(representations: &[Representation]) -> Option<MasterPlaylist> {
    let first = representations.first()?;
    let duration = first.attributes.source_duration;

    let mut video = Vec::new();
    let mut audio = Vec::new();
    let mut text = Vec::new();

    for rep in representations {
        let kind = rep.media_kind();
        if let Some(kind) = kind {
            tracing::trace!(
                kind = %kind,
                id = rep.attributes.id.as_deref().unwrap_or_default(),
                "classified representation"
            );
        }

        match kind {
            Some(MediaKind::Video) => video.push(rep),
            Some(MediaKind::Audio) => audio.push(rep),
            Some(MediaKind::Text) => text.push(rep),
            None => tracing::debug!(
                id = rep.attributes.id.as_deref().unwrap_or_default(),
                mime_type = rep.attributes.mime_type.as_deref().unwrap_or_default(),
                content_type = rep.attributes.content_type.as_deref().unwrap_or_default(),
                "dropping representation with unrecognized media kind"
            ),
        }
    }

    let mut media_groups = MediaGroups::default();

    if !audio.is_empty() {
        media_groups
            .audio
            .insert(AUDIO_GROUP_ID.to_string(), organize_audio_playlists(&audio));
    }

    if !text.is_empty() {
        media_groups
            .subtitles
            .insert(SUBTITLES_GROUP_ID.to_string(), organize_vtt_playlists(&text));
    }

    let playlists: Vec<Playlist> = video.into_iter().map(format_video_playlist).collect();

    tracing::trace!(
        variants = playlists.len(),
        audio = audio.len(),
        text = text.len(),
        "built master playlist"
    );

    Some(MasterPlaylist {
        allow_cache: true,
        discontinuity_starts: Vec::new(),
        segments: Vec::new(),
        end_list: true,
        media_groups,
        uri: String::new(),
        duration,
        playlists,
    })
}

/// Serialize a master playlist, rendering `None` as an empty object.
pub fn master_to_json(
    master: Option<&MasterPlaylist>,
) -> serde_json::Result<serde_json::Value> {
    match master {
        Some(master) => serde_json::to_value(master),
        None => Ok(serde_json::Value::Object(Default::default())),
    }
}

/// Format a video representation as a master-level variant.
pub fn format_video_playlist(rep: &Representation) -> Playlist {
    let attrs = &rep.attributes;

    Playlist {
        attributes: PlaylistAttributes {
            name: attrs.id.clone(),
            audio: Some(AUDIO_GROUP_ID.to_string()),
            subtitles: Some(SUBTITLES_GROUP_ID.to_string()),
            resolution: Some(Resolution {
                width: attrs.width_int(),
                height: attrs.height_int(),
            }),
            codecs: attrs.codecs.clone(),
            bandwidth: attrs.bandwidth_int(),
            program_id: PROGRAM_ID,
        },
        uri: String::new(),
        end_list: true,
        timeline: attrs.period_index,
        resolved_uri: String::new(),
        segments: rep.segments.clone(),
    }
}

/// Format an audio representation as a media group rendition.
pub fn format_audio_playlist(rep: &Representation) -> Playlist {
    let attrs = &rep.attributes;

    Playlist {
        attributes: PlaylistAttributes {
            name: attrs.id.clone(),
            audio: None,
            subtitles: None,
            resolution: None,
            codecs: attrs.codecs.clone(),
            bandwidth: attrs.bandwidth_int(),
            program_id: PROGRAM_ID,
        },
        uri: String::new(),
        end_list: true,
        timeline: attrs.period_index,
        resolved_uri: String::new(),
        segments: rep.segments.clone(),
    }
}

/// Format a text representation as a subtitle rendition.
///
/// Without segments the track is a single file at `url`, so one segment
/// covering the whole presentation is synthesized.
pub fn format_vtt_playlist(rep: &Representation) -> Playlist {
    let attrs = &rep.attributes;
    let resolved_uri = attrs.url.clone().unwrap_or_default();

    let segments = rep.segments.clone().unwrap_or_else(|| {
        vec![Segment {
            uri: attrs.url.clone(),
            timeline: attrs.period_index,
            resolved_uri: Some(resolved_uri.clone()),
            duration: attrs.source_duration,
            extra: Default::default(),
        }]
    });

    Playlist {
        attributes: PlaylistAttributes {
            name: attrs.id.clone(),
            audio: None,
            subtitles: None,
            resolution: None,
            codecs: None,
            bandwidth: attrs.bandwidth_int(),
            program_id: PROGRAM_ID,
        },
        uri: String::new(),
        end_list: true,
        timeline: attrs.period_index,
        resolved_uri,
        segments: Some(segments),
    }
}

/// Group audio representations by `"{lang} ({role})"`, or `main` without a
/// language, keeping the highest-bandwidth representation per label.
///
/// A later representation replaces the stored one only when its bandwidth
/// is strictly greater. A stored NaN bandwidth is exceeded by any number; a
/// NaN candidate never replaces. Each group holds exactly one playlist.
pub fn organize_audio_playlists(reps: &[&Representation]) -> MediaGroupMap {
    let mut groups = MediaGroupMap::new();

    for rep in reps {
        let attrs = &rep.attributes;
        let role = attrs.role_value().unwrap_or(MAIN_ROLE);
        let language = attrs.language().unwrap_or_default();

        let label = if language.is_empty() {
            MAIN_ROLE.to_string()
        } else {
            format!("{} ({})", language, role)
        };

        if let Some(existing) = groups.get(&label) {
            let current = existing
                .playlists
                .first()
                .and_then(|p| p.attributes.bandwidth.as_f64());
            let candidate = attrs.bandwidth_int().as_f64();

            let exceeds = match (candidate, current) {
                (Some(c), Some(s)) => c > s,
                (Some(_), None) => true,
                (None, _) => false,
            };
            if !exceeds {
                tracing::debug!(
                    label = %label,
                    id = attrs.id.as_deref().unwrap_or_default(),
                    "discarding audio representation; group already has higher or equal bandwidth"
                );
                continue;
            }
        }

        groups.insert(
            label,
            MediaGroup {
                language: language.to_string(),
                autoselect: true,
                default: role == MAIN_ROLE,
                playlists: vec![format_audio_playlist(rep)],
                uri: String::new(),
            },
        );
    }

    groups
}

/// Group text representations by language (`text` without one), keeping
/// the first representation per label.
pub fn organize_vtt_playlists(reps: &[&Representation]) -> MediaGroupMap {
    let mut groups = MediaGroupMap::new();

    for rep in reps {
        let label = rep
            .attributes
            .language()
            .unwrap_or(DEFAULT_TEXT_LABEL)
            .to_string();

        if groups.contains_key(&label) {
            tracing::debug!(
                label = %label,
                id = rep.attributes.id.as_deref().unwrap_or_default(),
                "discarding duplicate subtitle representation"
            );
            continue;
        }

        groups.insert(
            label.clone(),
            MediaGroup {
                language: label,
                autoselect: false,
                default: false,
                playlists: vec![format_vtt_playlist(rep)],
                uri: String::new(),
            },
        );
    }

    groups
}
