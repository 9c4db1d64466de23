//! M3U8 rendering of the master playlist model.

use std::fmt::Write;

use crate::types::{MasterPlaylist, MediaGroupMap, Playlist, AUDIO_GROUP_ID, SUBTITLES_GROUP_ID};

/// Placeholder replaced by a playlist's `NAME` in [`RenderOptions::uri_template`].
pub const NAME_PLACEHOLDER: &str = "{name}";

/// Options for M3U8 output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderOptions {
    /// Value of `#EXT-X-VERSION`.
    pub version: u8,
    /// URI used for playlists whose `uri` is empty.
    pub uri_template: String,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            version: 6,
            uri_template: "{name}.m3u8".to_string(),
        }
    }
}

impl RenderOptions {
    fn playlist_uri(&self, playlist: &Playlist) -> String {
        if !playlist.uri.is_empty() {
            return playlist.uri.clone();
        }
        let name = playlist.attributes.name.as_deref().unwrap_or_default();
        self.uri_template.replace(NAME_PLACEHOLDER, name)
    }
}

/// Render a master playlist as M3U8 text.
///
/// Output includes:
/// - `#EXTM3U` and `#EXT-X-VERSION`
/// - `#EXT-X-MEDIA` for every audio and subtitle rendition
/// - `#EXT-X-STREAM-INF` for every video variant, referencing the audio and
///   subtitle groups only when they exist
pub fn render_master(master: &MasterPlaylist, options: &RenderOptions) -> String {
    let mut out = String::new();

    writeln!(out, "#EXTM3U").unwrap();
    writeln!(out, "#EXT-X-VERSION:{}", options.version).unwrap();

    let audio = master.media_groups.audio_group();
    let subtitles = master.media_groups.subtitle_group();

    if let Some(groups) = audio {
        write_media(&mut out, "AUDIO", AUDIO_GROUP_ID, groups, options);
    }
    if let Some(groups) = subtitles {
        write_media(&mut out, "SUBTITLES", SUBTITLES_GROUP_ID, groups, options);
    }

    for variant in &master.playlists {
        let attrs = &variant.attributes;

        write!(out, "#EXT-X-STREAM-INF:PROGRAM-ID={}", attrs.program_id).unwrap();
        if let Some(bandwidth) = attrs.bandwidth.as_f64() {
            write!(out, ",BANDWIDTH={}", bandwidth as u64).unwrap();
        }

        if let Some(resolution) = attrs.resolution {
            if let (Some(w), Some(h)) = (resolution.width.as_f64(), resolution.height.as_f64()) {
                write!(out, ",RESOLUTION={}x{}", w as u64, h as u64).unwrap();
            }
        }

        if let Some(codecs) = attrs.codecs.as_deref().filter(|c| !c.is_empty()) {
            write!(out, ",CODECS=\"{}\"", codecs).unwrap();
        }

        // Only reference groups the master actually declares.
        if let Some(group) = attrs.audio.as_deref().filter(|_| audio.is_some()) {
            write!(out, ",AUDIO=\"{}\"", group).unwrap();
        }
        if let Some(group) = attrs.subtitles.as_deref().filter(|_| subtitles.is_some()) {
            write!(out, ",SUBTITLES=\"{}\"", group).unwrap();
        }

        writeln!(out).unwrap();
        writeln!(out, "{}", options.playlist_uri(variant)).unwrap();
    }

    out
}

fn write_media(
    out: &mut String,
    media_type: &str,
    group_id: &str,
    groups: &MediaGroupMap,
    options: &RenderOptions,
) {
    for (label, group) in groups {
        write!(
            out,
            "#EXT-X-MEDIA:TYPE={},GROUP-ID=\"{}\",NAME=\"{}\"",
            media_type, group_id, label
        )
        .unwrap();

        if !group.language.is_empty() {
            write!(out, ",LANGUAGE=\"{}\"", group.language).unwrap();
        }

        write!(
            out,
            ",DEFAULT={},AUTOSELECT={}",
            yes_no(group.default),
            yes_no(group.autoselect)
        )
        .unwrap();

        if let Some(playlist) = group.playlists.first() {
            write!(out, ",URI=\"{}\"", options.playlist_uri(playlist)).unwrap();
        }

        writeln!(out).unwrap();
    }
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "YES"
    } else {
        "NO"
    }
}

/// Render one playlist as a VOD media playlist.
///
/// `#EXT-X-TARGETDURATION` is the longest segment duration rounded up.
/// Segments without a URI are skipped.
pub fn render_media(playlist: &Playlist) -> String {
    let mut out = String::new();
    let segments = playlist.segments.as_deref().unwrap_or_default();

    let target_duration = segments
        .iter()
        .filter_map(|s| s.duration)
        .fold(0.0_f64, f64::max)
        .ceil() as u64;

    writeln!(out, "#EXTM3U").unwrap();
    writeln!(out, "#EXT-X-VERSION:6").unwrap();
    writeln!(out, "#EXT-X-TARGETDURATION:{}", target_duration).unwrap();
    writeln!(out, "#EXT-X-MEDIA-SEQUENCE:0").unwrap();
    writeln!(out, "#EXT-X-PLAYLIST-TYPE:VOD").unwrap();

    let mut timeline = None;
    for segment in segments {
        let resolved = segment.resolved_uri.as_deref().filter(|u| !u.is_empty());
        let Some(uri) = resolved.or(segment.uri.as_deref()) else {
            continue;
        };

        if timeline.is_some() && segment.timeline.is_some() && segment.timeline != timeline {
            writeln!(out, "#EXT-X-DISCONTINUITY").unwrap();
        }
        if segment.timeline.is_some() {
            timeline = segment.timeline;
        }

        writeln!(out, "#EXTINF:{:.6},", segment.duration.unwrap_or_default()).unwrap();
        writeln!(out, "{}", uri).unwrap();
    }

    if playlist.end_list {
        writeln!(out, "#EXT-X-ENDLIST").unwrap();
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::to_master;
    use mpdforge_manifest::{AttributeValue, Representation, RepresentationAttributes, Segment};

    fn rep(id: &str, mime: &str, bandwidth: i64) -> Representation {
        Representation {
            attributes: RepresentationAttributes {
                id: Some(id.to_string()),
                mime_type: Some(mime.to_string()),
                bandwidth: Some(AttributeValue::from(bandwidth)),
                source_duration: Some(10.0),
                ..Default::default()
            },
            segments: None,
        }
    }

    fn video(id: &str, bandwidth: i64, width: i64, height: i64) -> Representation {
        let mut r = rep(id, "video/mp4", bandwidth);
        r.attributes.width = Some(AttributeValue::from(width));
        r.attributes.height = Some(AttributeValue::from(height));
        r.attributes.codecs = Some("avc1.64001f".into());
        r
    }

    #[test]
    fn test_render_master_video_only() {
        let master = to_master(&[
            video("1080p", 5_000_000, 1920, 1080),
            video("720p", 2_500_000, 1280, 720),
        ])
        .unwrap();

        let m3u8 = render_master(&master, &RenderOptions::default());

        let expected = "\
#EXTM3U
#EXT-X-VERSION:6
#EXT-X-STREAM-INF:PROGRAM-ID=1,BANDWIDTH=5000000,RESOLUTION=1920x1080,CODECS=\"avc1.64001f\"
1080p.m3u8
#EXT-X-STREAM-INF:PROGRAM-ID=1,BANDWIDTH=2500000,RESOLUTION=1280x720,CODECS=\"avc1.64001f\"
720p.m3u8
";
        assert_eq!(m3u8, expected);
    }

    #[test]
    fn test_render_master_with_groups() {
        let mut audio = rep("aac", "audio/mp4", 128_000);
        audio.attributes.lang = Some("en".into());
        let mut subs = rep("vtt", "text/vtt", 0);
        subs.attributes.lang = Some("fr".into());

        let master = to_master(&[video("hd", 3_000_000, 1280, 720), audio, subs]).unwrap();
        let options = RenderOptions {
            version: 4,
            uri_template: "streams/{name}/index.m3u8".into(),
        };
        let m3u8 = render_master(&master, &options);

        assert!(m3u8.contains("#EXT-X-VERSION:4"));
        assert!(m3u8.contains(
            "#EXT-X-MEDIA:TYPE=AUDIO,GROUP-ID=\"audio\",NAME=\"en (main)\",LANGUAGE=\"en\",DEFAULT=YES,AUTOSELECT=YES,URI=\"streams/aac/index.m3u8\""
        ));
        assert!(m3u8.contains(
            "#EXT-X-MEDIA:TYPE=SUBTITLES,GROUP-ID=\"subs\",NAME=\"fr\",LANGUAGE=\"fr\",DEFAULT=NO,AUTOSELECT=NO,URI=\"streams/vtt/index.m3u8\""
        ));
        assert!(m3u8.contains(",AUDIO=\"audio\",SUBTITLES=\"subs\"\nstreams/hd/index.m3u8\n"));
    }

    #[test]
    fn test_render_master_skips_nan_fields() {
        let mut v = video("v", 1, 0, 0);
        v.attributes.bandwidth = Some(AttributeValue::from("?"));
        v.attributes.width = None;
        let master = to_master(&[v]).unwrap();

        let m3u8 = render_master(&master, &RenderOptions::default());
        assert!(!m3u8.contains("BANDWIDTH="));
        assert!(!m3u8.contains("RESOLUTION="));
    }

    #[test]
    fn test_render_master_prefers_explicit_uri() {
        let mut master = to_master(&[video("v", 1, 2, 2)]).unwrap();
        master.playlists[0].uri = "https://cdn.example.com/v.m3u8".into();

        let m3u8 = render_master(&master, &RenderOptions::default());
        assert!(m3u8.ends_with("\nhttps://cdn.example.com/v.m3u8\n"));
    }

    #[test]
    fn test_render_media_vod() {
        let mut v = video("v", 1, 2, 2);
        v.segments = Some(vec![
            Segment {
                uri: Some("s1.m4s".into()),
                timeline: Some(0),
                duration: Some(4.0),
                ..Default::default()
            },
            Segment {
                uri: Some("s2.m4s".into()),
                timeline: Some(0),
                duration: Some(3.5),
                ..Default::default()
            },
            Segment {
                uri: Some("s3.m4s".into()),
                timeline: Some(1),
                duration: Some(4.2),
                ..Default::default()
            },
        ]);
        let master = to_master(&[v]).unwrap();

        let expected = "\
#EXTM3U
#EXT-X-VERSION:6
#EXT-X-TARGETDURATION:5
#EXT-X-MEDIA-SEQUENCE:0
#EXT-X-PLAYLIST-TYPE:VOD
#EXTINF:4.000000,
s1.m4s
#EXTINF:3.500000,
s2.m4s
#EXT-X-DISCONTINUITY
#EXTINF:4.200000,
s3.m4s
#EXT-X-ENDLIST
";
        assert_eq!(render_media(&master.playlists[0]), expected);
    }

    #[test]
    fn test_render_media_synthesized_vtt_segment() {
        let mut subs = rep("vtt", "text/vtt", 0);
        subs.attributes.url = Some("https://example.com/en.vtt".into());
        let master = to_master(&[subs]).unwrap();
        let playlist = &master.media_groups.subtitle_group().unwrap()["text"].playlists[0];

        let m3u8 = render_media(playlist);
        assert!(m3u8.contains("#EXT-X-TARGETDURATION:10"));
        assert!(m3u8.contains("#EXTINF:10.000000,\nhttps://example.com/en.vtt\n"));
    }

    #[test]
    fn test_render_media_no_segments() {
        let master = to_master(&[video("v", 1, 2, 2)]).unwrap();
        let m3u8 = render_media(&master.playlists[0]);
        assert!(m3u8.contains("#EXT-X-TARGETDURATION:0"));
        assert!(!m3u8.contains("#EXTINF"));
        assert!(m3u8.ends_with("#EXT-X-ENDLIST\n"));
    }
}
