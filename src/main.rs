mod cli;

use mpdforge::{config, convert, manifest};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use config::OutputFormat;
use std::path::Path;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "mpdforge=trace,mpdforge_manifest=trace,mpdforge_playlist=trace".to_string()
        } else {
            "mpdforge=info,mpdforge_manifest=warn,mpdforge_playlist=warn".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Convert {
            input,
            format,
            output,
        } => convert_command(
            &input,
            format,
            output.as_deref(),
            cli.config.as_deref(),
        ),
        Commands::Decode { name, value } => decode_command(&name, &value),
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_command(path.as_deref())
        }
        Commands::Version => {
            println!("mpdforge {}", mpdforge::VERSION);
            Ok(())
        }
    }
}

fn convert_command(
    input: &Path,
    format: Option<OutputFormat>,
    output: Option<&Path>,
    config_path: Option<&Path>,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let format = format.unwrap_or(config.output.format);

    tracing::info!("Converting {:?} to {:?}", input, format);

    let document = convert::convert_file(
        input,
        format,
        config.output.pretty,
        &config.render.options(),
    )?;

    match output {
        Some(path) => {
            std::fs::write(path, &document)
                .with_context(|| format!("Failed to write output file: {:?}", path))?;
            tracing::info!("Wrote {:?}", path);
        }
        None => print!("{}", document),
    }

    Ok(())
}

fn decode_command(name: &str, value: &str) -> Result<()> {
    let decoded = manifest::decode(name, value);
    tracing::debug!(
        "{} decoded with {:?} rule",
        name,
        manifest::AttributeName::from_name(name)
    );
    println!("{}", serde_json::to_string(&decoded)?);
    Ok(())
}

fn validate_command(config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    config::validate_config(&config)?;

    println!("Configuration is valid");
    println!("  Output format: {:?}", config.output.format);
    println!("  M3U8 version: {}", config.render.version);
    println!("  URI template: {}", config.render.uri_template);

    Ok(())
}
