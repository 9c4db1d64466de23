//! mpdforge-playlist: master playlist building from DASH representations.
//!
//! This crate turns the flat representation list produced by a manifest
//! walker into the master playlist model consumed by HLS-style players.
//!
//! # Modules
//!
//! - [`normalize`] - Classification, formatting and media group selection
//! - [`types`] - Master playlist, playlists and media groups
//! - [`render`] - M3U8 text output for master and media playlists

pub mod normalize;
pub mod render;
pub mod types;

pub use normalize::{
    format_audio_playlist, format_video_playlist, format_vtt_playlist, master_to_json,
    organize_audio_playlists, organize_vtt_playlists, to_master,
};
pub use render::{render_master, render_media, RenderOptions};
pub use types::{
    MasterPlaylist, MediaGroup, MediaGroupMap, MediaGroups, Playlist, PlaylistAttributes,
    Resolution,
};
