//! docgen CLI - render hospital documents from JSON requests

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use composer::{
    AtomicSequence, DocumentEngine, DocumentKind, DocumentRequest, EngineSettings,
    GenerationContext, HospitalBranding, SettingsLoader,
};

#[derive(Parser)]
#[command(name = "docgen")]
#[command(version)]
#[command(about = "Render hospital documents (bills, cards, reports) to PDF", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a document request to a PDF file
    Render {
        /// Request JSON, tagged with its "kind"
        #[arg(short, long, value_name = "FILE")]
        request: PathBuf,

        /// Hospital branding JSON
        #[arg(short, long, value_name = "FILE")]
        branding: Option<PathBuf>,

        /// Engine settings JSON
        #[arg(short, long, value_name = "FILE", env = "DOCGEN_SETTINGS")]
        settings: Option<PathBuf>,

        /// Output directory (overrides the settings file)
        #[arg(short, long, value_name = "DIR")]
        out_dir: Option<PathBuf>,

        /// Case number reserved by the caller for surgical case sheets
        #[arg(long, value_name = "N", default_value = "1")]
        case_number: u64,

        /// Print the layout tree as JSON instead of writing a PDF
        #[arg(long)]
        print_layout: bool,
    },

    /// List the supported document kinds
    Kinds,
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Render {
            request,
            branding,
            settings,
            out_dir,
            case_number,
            print_layout,
        } => render(
            &request,
            branding.as_deref(),
            settings.as_deref(),
            out_dir,
            case_number,
            print_layout,
        ),
        Commands::Kinds => {
            for kind in DocumentKind::ALL {
                println!("{:<20} {}", kind.tag(), kind.title());
            }
            Ok(())
        }
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path, what: &str) -> Result<T> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} file: {}", what, path.display()))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} file: {}", what, path.display()))
}

fn render(
    request_path: &Path,
    branding_path: Option<&Path>,
    settings_path: Option<&Path>,
    out_dir: Option<PathBuf>,
    case_number: u64,
    print_layout: bool,
) -> Result<()> {
    let request: DocumentRequest = read_json(request_path, "request")?;
    let branding: HospitalBranding = match branding_path {
        Some(path) => read_json(path, "branding")?,
        None => HospitalBranding::default(),
    };
    let mut settings = match settings_path {
        Some(path) => SettingsLoader::new(path).load()?,
        None => EngineSettings::default(),
    };
    if let Some(dir) = out_dir {
        settings.output_dir = dir;
    }
    let output_dir = settings.output_dir.clone();

    tracing::info!(kind = %request.kind(), "rendering {}", request_path.display());

    let engine = DocumentEngine::new(
        settings,
        &branding,
        Arc::new(AtomicSequence::starting_at(case_number)),
    );
    let ctx = GenerationContext::now();

    if print_layout {
        let tree = engine.layout(&request, &ctx)?;
        println!("{}", serde_json::to_string_pretty(&tree)?);
        return Ok(());
    }

    let artifact = engine.generate(&request, &ctx)?;
    let path = artifact
        .save_to(&output_dir)
        .with_context(|| format!("Failed to save artifact to {}", output_dir.display()))?;
    println!("{}", path.display());
    Ok(())
}
