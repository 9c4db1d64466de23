//! Descriptor file to output document.

use anyhow::{Context, Result};
use mpdforge_manifest::load_representations;
use mpdforge_playlist::{master_to_json, render_master, to_master, RenderOptions};
use std::path::Path;

use crate::config::OutputFormat;

/// Convert a JSON descriptor list into the requested output format.
///
/// An empty descriptor list produces `{}` as JSON and a bare header as M3U8.
pub fn convert_str(
    json: &str,
    format: OutputFormat,
    pretty: bool,
    options: &RenderOptions,
) -> Result<String> {
    let representations = load_representations(json)?;
    let master = to_master(&representations);

    if master.is_none() {
        tracing::warn!("Descriptor list is empty; emitting an empty document");
    }

    let output = match format {
        OutputFormat::Json => {
            let value = master_to_json(master.as_ref())?;
            let mut text = if pretty {
                serde_json::to_string_pretty(&value)?
            } else {
                serde_json::to_string(&value)?
            };
            text.push('\n');
            text
        }
        OutputFormat::M3u8 => match master {
            Some(master) => render_master(&master, options),
            None => format!("#EXTM3U\n#EXT-X-VERSION:{}\n", options.version),
        },
    };

    Ok(output)
}

/// Read a descriptor file and convert it.
pub fn convert_file(
    path: &Path,
    format: OutputFormat,
    pretty: bool,
    options: &RenderOptions,
) -> Result<String> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read descriptor file: {:?}", path))?;

    convert_str(&json, format, pretty, options)
        .with_context(|| format!("Failed to convert descriptor file: {:?}", path))
}
