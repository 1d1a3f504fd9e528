//! Delta Uploader - Entry Point
//!
//! Uploads files as end-to-end storage deals and checks content status
//! against a Delta node.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use secrecy::SecretString;

use delta_uploader::app::options::{StatusOptions, TargetOptions, UploadOptions};
use delta_uploader::app::run::{init_settings, open_bridge, status, upload};
use delta_uploader::filesys::file::File;
use delta_uploader::http::client::HttpClient;
use delta_uploader::logs::{init_logging, LogLevel, LogOptions};
use delta_uploader::models::status::StatusKind;
use delta_uploader::storage::layout::StorageLayout;
use delta_uploader::storage::settings::Settings;
use delta_uploader::utils::version_info;

#[derive(Parser)]
#[command(name = "delta-uploader", version, about = "Delta end-to-end deal uploader")]
struct Cli {
    /// Settings file (defaults to settings.json in the uploader home)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true)]
    log_level: Option<LogLevel>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct TargetArgs {
    /// Base URL of the Delta node
    #[arg(long, conflicts_with = "preset")]
    url: Option<String>,

    /// Configured preset to take the base URL from
    #[arg(long)]
    preset: Option<String>,
}

impl From<TargetArgs> for TargetOptions {
    fn from(args: TargetArgs) -> Self {
        TargetOptions {
            url: args.url,
            preset: args.preset,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Upload a file as an end-to-end deal
    Upload {
        /// File to upload
        #[arg(long)]
        file: PathBuf,

        /// Storage provider ID
        #[arg(long)]
        miner: String,

        /// API key sent as a bearer token
        #[arg(long, env = "DELTA_API_KEY", hide_env_values = true)]
        api_key: String,

        /// Deal metadata JSON replacing the configured one
        #[arg(long)]
        metadata: Option<String>,

        #[command(flatten)]
        target: TargetArgs,
    },
    /// Request the status of a content ID
    Status {
        /// Content (or deal, miner, batch) identifier
        content_id: String,

        /// What the identifier refers to
        #[arg(long, default_value = "content")]
        kind: StatusKind,

        /// Status URL prefix to append the identifier to
        #[arg(long)]
        content_url: Option<String>,

        /// Save the response to the downloads directory
        #[arg(long)]
        save: bool,

        /// Save the response to this directory instead
        #[arg(long)]
        save_dir: Option<PathBuf>,

        #[command(flatten)]
        target: TargetArgs,
    },
    /// List configured base URL presets
    Presets,
    /// Write a default settings file
    Init,
    /// Print version information
    Version,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("{} {:#}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let layout = StorageLayout::default();
    let settings_file = cli
        .config
        .map(File::new)
        .unwrap_or_else(|| layout.settings_file());

    match cli.command {
        Commands::Version => {
            println!("{}", serde_json::to_string_pretty(&version_info())?);
            return Ok(());
        }
        Commands::Init => {
            let path = init_settings(&settings_file).await?;
            println!("{} {}", "Wrote".green(), path.display());
            return Ok(());
        }
        _ => {}
    }

    let settings = Settings::load(&settings_file).await?;

    // Initialize logging
    let log_options = LogOptions {
        log_level: cli.log_level.unwrap_or(settings.log_level),
        json_format: settings.json_logs,
        log_dir: settings.log_to_file.then(|| layout.logs_dir()),
        ..Default::default()
    };
    if let Err(e) = init_logging(log_options) {
        eprintln!("Failed to initialize logging: {e}");
    }

    let client = Arc::new(HttpClient::new(settings.request_timeout())?);
    let bridge = open_bridge(&settings, client).await;

    match cli.command {
        Commands::Upload {
            file,
            miner,
            api_key,
            metadata,
            target,
        } => {
            let options = UploadOptions {
                target: target.into(),
                file,
                miner_id: miner,
                api_key: SecretString::from(api_key),
                metadata,
            };
            println!("{}", upload(&bridge, options).await?);
        }
        Commands::Status {
            content_id,
            kind,
            content_url,
            save,
            save_dir,
            target,
        } => {
            let save_dir = save_dir.or_else(|| {
                save.then(|| {
                    settings
                        .download_dir
                        .clone()
                        .unwrap_or_else(|| layout.downloads_dir())
                })
            });
            let options = StatusOptions {
                target: target.into(),
                content_id,
                kind,
                content_url,
                save_dir,
            };
            let outcome = status(&bridge, options).await?;
            println!("{}", outcome.rendered);
            if let Some(path) = outcome.saved_to {
                eprintln!("{} {}", "Saved".green(), path.display());
            }
        }
        Commands::Presets => {
            for preset in bridge.presets() {
                let marker = if preset.url == settings.base_url { "*" } else { " " };
                println!("{} {:<16} {}", marker, preset.name.bold(), preset.url);
            }
        }
        Commands::Init | Commands::Version => {}
    }

    Ok(())
}
