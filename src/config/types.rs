use mpdforge_playlist::RenderOptions;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub render: RenderConfig,
}

/// Output document format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Master playlist object as JSON
    #[default]
    Json,
    /// Master playlist as M3U8 text
    M3u8,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub format: OutputFormat,

    /// Pretty-print JSON output
    #[serde(default = "default_pretty")]
    pub pretty: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            pretty: default_pretty(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RenderConfig {
    /// `#EXT-X-VERSION` written to M3U8 output
    #[serde(default = "default_version")]
    pub version: u8,

    /// URI for playlists without one; `{name}` is replaced by the playlist NAME
    #[serde(default = "default_uri_template")]
    pub uri_template: String,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            uri_template: default_uri_template(),
        }
    }
}

impl RenderConfig {
    pub fn options(&self) -> RenderOptions {
        RenderOptions {
            version: self.version,
            uri_template: self.uri_template.clone(),
        }
    }
}

fn default_pretty() -> bool {
    true
}

fn default_version() -> u8 {
    RenderOptions::default().version
}

fn default_uri_template() -> String {
    RenderOptions::default().uri_template
}
