//! Command-line front end for the folio pipeline.
//!
//! ```bash
//! # Built-in or stored template by name
//! folio generate --template invoice --data invoice.json
//!
//! # An organization's stored report
//! folio generate --org <uuid> --report <uuid> --data payload.json --base64
//!
//! # Built-in template names
//! folio templates
//! ```
//!
//! Set `RUST_LOG=debug` to follow each request through the pipeline.

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use folio::{FolioConfig, GenerationRequest, PipelineBuilder, TemplateRegistry};
use serde_json::Value;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "folio")]
#[command(about = "Generate PDF documents from templates and JSON payloads")]
struct Cli {
    /// Config file (defaults to $FOLIO_CONFIG, then ./folio.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document and store it
    Generate {
        /// Template name, stored or built in
        #[arg(long, conflicts_with_all = ["org", "report"], required_unless_present = "org")]
        template: Option<String>,

        /// Organization id
        #[arg(long, requires = "report")]
        org: Option<String>,

        /// Report id within the organization
        #[arg(long, requires = "org")]
        report: Option<String>,

        /// JSON payload file; an empty object when omitted
        #[arg(long)]
        data: Option<PathBuf>,

        /// Include the base64-encoded PDF in the output
        #[arg(long)]
        base64: bool,
    },

    /// List the built-in templates
    Templates,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Templates => {
            for name in TemplateRegistry::builtin().names() {
                println!("{}", name);
            }
            Ok(())
        }
        Commands::Generate {
            template,
            org,
            report,
            data,
            base64,
        } => {
            let config = match &cli.config {
                Some(path) => FolioConfig::load_from(Some(path.as_path())),
                None => FolioConfig::load(),
            }
            .context("loading configuration")?;
            let payload = match &data {
                Some(path) => read_payload(path)?,
                None => Value::Object(Default::default()),
            };

            let request = match (template, org, report) {
                (Some(name), _, _) => GenerationRequest::for_template(&name, payload),
                (None, Some(org), Some(report)) => GenerationRequest::for_report(&org, &report, payload),
                _ => bail!("either --template or both --org and --report are required"),
            };
            let request = match request {
                Ok(request) => request,
                Err(e) => bail!("{}: {}", e.caller_message(), e),
            };

            let pipeline = PipelineBuilder::from_config(config).build()?;
            match pipeline.generate(request).await {
                Ok(artifact) => {
                    println!("{}", serde_json::to_string_pretty(&artifact.summary(base64))?);
                    Ok(())
                }
                Err(e) => bail!("{}: {}", e.caller_message(), e),
            }
        }
    }
}

fn read_payload(path: &Path) -> anyhow::Result<Value> {
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("reading payload from {}", path.display()))?;
    serde_json::from_str(&source).with_context(|| format!("parsing payload in {}", path.display()))
}
