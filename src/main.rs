use anyhow::Context;
use catchall_codec::models::{ContainerSummary, Kind, Version};
use catchall_codec::{Codec, CodecConfig, OverlapPolicy, Record};
use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "catchall_codec")]
#[command(about = "Round-trip JSON records through a raw-value preserving codec", version, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Decode a flat JSON object into a model and print it re-encoded
    Roundtrip {
        /// Model to bind the input to
        #[arg(short, long, value_enum)]
        kind: Kind,

        /// Which side keeps a key present both as declared field and raw value
        #[arg(long, value_enum, default_value_t = OverlapPolicy::DeclaredWins)]
        overlap: OverlapPolicy,

        /// Keep only what binding produced instead of capturing every input key
        #[arg(long)]
        no_capture: bool,

        /// Pretty-print the output
        #[arg(long)]
        pretty: bool,

        /// Enable verbose logging
        #[arg(short, long)]
        verbose: bool,

        /// Set log level (trace, debug, info, warn, error)
        #[arg(long, default_value = "warn")]
        log_level: String,

        /// Emit logs as JSON lines
        #[arg(long)]
        log_json: bool,

        /// Input file, stdin when omitted
        input: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Roundtrip {
            kind,
            overlap,
            no_capture,
            pretty,
            verbose,
            log_level,
            log_json,
            input,
        } => {
            let level = if verbose { "debug" } else { &log_level };
            let filter =
                EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

            let subscriber = tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(std::io::stderr);
            if log_json {
                subscriber.json().init();
            } else {
                subscriber.init();
            }

            let config = CodecConfig::default()
                .with_overlap(overlap)
                .with_capture_all(!no_capture);
            debug!("Codec config: {:?}", config);

            let text = read_input(input.as_deref())?;
            let codec = Codec::new(config);
            let output = match kind {
                Kind::Version => roundtrip::<Version>(&codec, &text, pretty)?,
                Kind::Container => roundtrip::<ContainerSummary>(&codec, &text, pretty)?,
            };
            println!("{}", output);
        }
    }

    Ok(())
}

fn read_input(path: Option<&Path>) -> anyhow::Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display())),
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .context("Failed to read stdin")?;
            Ok(text)
        }
    }
}

fn roundtrip<R: Record>(codec: &Codec, text: &str, pretty: bool) -> anyhow::Result<String> {
    let record: R = codec
        .from_str(text)
        .with_context(|| format!("Failed to decode {}", std::any::type_name::<R>()))?;

    for key in codec.unbound_keys(&record)? {
        info!("Unbound key preserved: {}", key);
    }

    let encoded = if pretty {
        codec.to_string_pretty(&record)?
    } else {
        codec.to_string(&record)?
    };
    Ok(encoded)
}
