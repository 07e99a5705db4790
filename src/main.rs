use clap::{Parser, Subcommand};
use imgcompress::imaging::{self, CompressSettings, CompressionRequest, RustBackend};
use imgcompress::{config, naming, output};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn version_string() -> &'static str {
    let on_tag = env!("ON_RELEASE_TAG");
    if on_tag == "true" {
        env!("CARGO_PKG_VERSION")
    } else {
        let hash = env!("GIT_HASH");
        if hash.is_empty() {
            "dev@unknown"
        } else {
            // Leaked once at startup — trivial, called exactly once
            Box::leak(format!("dev@{hash}").into_boxed_str())
        }
    }
}

/// Overrides for the `[compression]` config section.
#[derive(clap::Args, Clone)]
struct CompressArgs {
    /// JPEG quality, 1-100 (ignored for PNG)
    #[arg(short, long, allow_negative_numbers = true)]
    quality: Option<i32>,

    /// Maximum output width in pixels
    #[arg(long, allow_negative_numbers = true)]
    max_width: Option<i32>,

    /// Maximum output height in pixels
    #[arg(long, allow_negative_numbers = true)]
    max_height: Option<i32>,
}

#[derive(Parser)]
#[command(name = "imgcompress")]
#[command(about = "Resize and re-encode a JPEG or PNG")]
#[command(long_about = "\
Resize and re-encode a JPEG or PNG

The image is scaled down to fit inside --max-width x --max-height, keeping its
aspect ratio (it is never scaled up), then written in its original format:
JPEG at the chosen --quality, PNG losslessly at maximum compression.

Defaults come from imgcompress.toml in the working directory when present.
Run 'imgcompress gen-config' to print a documented one.

Set RUST_LOG=imgcompress=debug to trace each pipeline step.")]
#[command(version = version_string())]
struct Cli {
    /// Config file (default: ./imgcompress.toml if it exists)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show format, dimensions, size and modification time of an image
    Inspect {
        file: PathBuf,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Resize and re-encode an image
    Compress {
        file: PathBuf,
        /// Destination file (default: <name>-compressed.<ext> next to the source)
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[command(flatten)]
        settings: CompressArgs,
    },
    /// Print a stock imgcompress.toml with all options documented
    GenConfig,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    match run(Cli::parse()) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let backend = RustBackend::new();

    match cli.command {
        Command::Inspect { file, json } => {
            let meta = imaging::inspect(&backend, &file)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&meta)?);
            } else {
                output::print_inspect_output(&meta);
            }
        }
        Command::Compress {
            file,
            output: destination,
            settings,
        } => {
            let config = load_config(cli.config.as_deref())?;
            let request = CompressionRequest::new(file, resolve_settings(&config, &settings));
            let destination = destination.unwrap_or_else(|| naming::default_destination(&request));

            let source = imaging::inspect(&backend, &request.source_path)?;
            let written = imaging::compress(&backend, &request, &destination)?;
            output::print_compress_output(&source, &written);
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// Load the explicit config file, or the default one if it exists.
///
/// An explicit `--config` path that doesn't exist is an error; a missing
/// default file just means stock defaults.
fn load_config(explicit: Option<&Path>) -> Result<config::Config, config::ConfigError> {
    match explicit {
        Some(path) if !path.exists() => Err(config::ConfigError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            format!("config file not found: {}", path.display()),
        ))),
        Some(path) => config::load_config(path),
        None => config::load_config(Path::new(config::DEFAULT_CONFIG_FILE)),
    }
}

/// CLI flags win over config values.
fn resolve_settings(config: &config::Config, args: &CompressArgs) -> CompressSettings {
    let defaults = &config.compression;
    CompressSettings {
        quality: args.quality.unwrap_or(defaults.quality),
        max_width: args.max_width.unwrap_or(defaults.max_width),
        max_height: args.max_height.unwrap_or(defaults.max_height),
    }
}
