//! Galleria CLI: the calculator and the image gatekeeper from the command line.
//!
//! Image commands read IMAGES_API_URL (and the rest of the server configuration)
//! from the environment or a `.env` file. Output is JSON on stdout.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use galleria_cli::{
    init_tracing, outcome_json, run_calc, to_json_string, upload_file, CalcCommand,
};
use galleria_core::Config;
use galleria_processing::Gatekeeper;
use galleria_storage::create_image_store;
use serde_json::json;

#[derive(Parser)]
#[command(name = "galleria", about = "Galleria calculator and image gatekeeper CLI")]
struct Cli {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Arithmetic operations
    Calc {
        #[command(subcommand)]
        sub: CalcCommand,
    },
    /// Remote image gallery
    Images {
        #[command(subcommand)]
        sub: ImageCommands,
    },
}

#[derive(Subcommand)]
enum ImageCommands {
    /// List images held by the remote store
    List,
    /// Validate a local image and upload it
    Upload {
        /// Path to the image file
        file: PathBuf,
        /// Override the content type guessed from the extension
        #[arg(long)]
        content_type: Option<String>,
    },
}

fn build_gatekeeper() -> anyhow::Result<Gatekeeper> {
    let config = Config::from_env().context("Failed to load configuration")?;
    let store = create_image_store(&config).context("Failed to create image store client")?;
    Ok(Gatekeeper::new(store))
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    init_tracing();

    let cli = Cli::parse();

    let (report, success) = match cli.command {
        Commands::Calc { sub } => {
            let value = run_calc(&sub)?;
            (json!({ "value": value }), true)
        }
        Commands::Images { sub } => {
            let gatekeeper = build_gatekeeper()?;
            match sub {
                ImageCommands::List => (json!(gatekeeper.list_images().await), true),
                ImageCommands::Upload { file, content_type } => {
                    let outcome = upload_file(&gatekeeper, &file, content_type).await?;
                    (outcome_json(&outcome), outcome.is_success())
                }
            }
        }
    };

    println!("{}", to_json_string(&report, cli.pretty)?);

    Ok(if success {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}
