//! mpdforge - DASH representation descriptors to HLS-style master playlists
//!
//! This library crate exposes the command-line plumbing for integration testing.

pub mod config;
pub mod convert;

pub use mpdforge_manifest as manifest;
pub use mpdforge_playlist as playlist;

/// Crate version, as reported by `mpdforge version`.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
