//! Helpers behind the `galleria` binary.

use std::path::Path;

use anyhow::Context;
use clap::Subcommand;
use galleria_processing::{Gatekeeper, UploadCandidate, UploadOutcome};
use serde_json::json;
use tokio::fs::File;

/// Content type sent when the extension does not name an image type.
const FALLBACK_CONTENT_TYPE: &str = "application/octet-stream";

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum CalcCommand {
    /// Sum of the operands (0 when none are given)
    Add {
        #[arg(allow_hyphen_values = true)]
        values: Vec<f64>,
    },
    /// First operand minus the second
    Subtract {
        #[arg(allow_hyphen_values = true)]
        a: f64,
        #[arg(allow_hyphen_values = true)]
        b: f64,
    },
    /// Product of the operands (0 when none are given)
    Multiply {
        #[arg(allow_hyphen_values = true)]
        values: Vec<f64>,
    },
    /// First operand divided by the second; fails on a zero denominator
    Divide {
        #[arg(allow_hyphen_values = true)]
        a: f64,
        #[arg(allow_hyphen_values = true)]
        b: f64,
    },
    /// Evaluate "<number> <op> <number>", e.g. "3 * 4"
    Eval { expression: String },
}

/// Run a calculator command.
pub fn run_calc(command: &CalcCommand) -> anyhow::Result<f64> {
    let value = match command {
        CalcCommand::Add { values } => galleria_calc::add(values),
        CalcCommand::Subtract { a, b } => galleria_calc::subtract(*a, *b),
        CalcCommand::Multiply { values } => galleria_calc::multiply(values),
        CalcCommand::Divide { a, b } => galleria_calc::divide(*a, *b)?,
        CalcCommand::Eval { expression } => galleria_calc::evaluate(expression)
            .with_context(|| format!("Cannot evaluate '{}'", expression))?,
    };
    anyhow::ensure!(value.is_finite(), "Result {} is not a finite number", value);
    Ok(value)
}

/// Content type implied by the file extension.
pub fn guess_content_type(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase());

    match extension.as_deref() {
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("bmp") => "image/bmp",
        Some("webp") => "image/webp",
        _ => FALLBACK_CONTENT_TYPE,
    }
}

/// Open `path` as an upload candidate that streams from disk.
pub async fn open_candidate(
    path: &Path,
    content_type: Option<String>,
) -> anyhow::Result<UploadCandidate<File>> {
    let file = File::open(path)
        .await
        .with_context(|| format!("Failed to open {}", path.display()))?;
    let metadata = file
        .metadata()
        .await
        .with_context(|| format!("Failed to read metadata of {}", path.display()))?;

    let file_name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(UploadCandidate {
        file_name,
        content_type: content_type.unwrap_or_else(|| guess_content_type(path).to_string()),
        declared_length: metadata.len(),
        body: file,
    })
}

/// Validate and upload a local file through `gatekeeper`.
pub async fn upload_file(
    gatekeeper: &Gatekeeper,
    path: &Path,
    content_type: Option<String>,
) -> anyhow::Result<UploadOutcome> {
    let candidate = open_candidate(path, content_type).await?;
    Ok(gatekeeper.upload(candidate).await)
}

/// JSON report printed for an upload attempt.
pub fn outcome_json(outcome: &UploadOutcome) -> serde_json::Value {
    let mut report = json!({
        "success": outcome.is_success(),
        "message": outcome.message(),
    });

    match outcome {
        UploadOutcome::Uploaded { format } => {
            report["format"] = json!(format.name());
        }
        UploadOutcome::RemoteRejected { status } => {
            report["status"] = json!(status);
        }
        _ => {}
    }

    report
}

pub fn to_json_string(value: &serde_json::Value, pretty: bool) -> anyhow::Result<String> {
    let out = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    };
    out.context("Serialize output")
}

/// Initialize tracing for the CLI. Logs go to stderr so stdout stays JSON.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();
}
