use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(
    name = "regchunk",
    version,
    about = "Regulatory document structure recovery and clause chunking"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    Ingest(IngestArgs),
    Validate(ValidateArgs),
    Status(StatusArgs),
}

#[derive(Args, Debug, Clone)]
pub struct IngestArgs {
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    #[arg(long, default_value = "data/processed")]
    pub output_root: PathBuf,

    #[arg(long)]
    pub manifest_dir: Option<PathBuf>,

    #[arg(long = "doc")]
    pub doc_ids: Vec<String>,

    #[arg(long)]
    pub max_pages_per_doc: Option<usize>,

    #[arg(long, default_value_t = 2)]
    pub toc_pages: usize,

    #[arg(long, default_value_t = false)]
    pub fail_fast: bool,
}

#[derive(Args, Debug, Clone)]
pub struct ValidateArgs {
    #[arg(long, default_value = "config.json")]
    pub config: PathBuf,

    #[arg(long, default_value = "data/processed")]
    pub output_root: PathBuf,

    /// Validate a single chunks file instead of every configured document.
    #[arg(long)]
    pub chunks: Option<PathBuf>,

    #[arg(long, default_value_t = false)]
    pub write: bool,
}

#[derive(Args, Debug, Clone)]
pub struct StatusArgs {
    #[arg(long, default_value = "data/processed")]
    pub output_root: PathBuf,

    #[arg(long)]
    pub manifest_dir: Option<PathBuf>,
}

impl IngestArgs {
    pub fn resolved_manifest_dir(&self) -> PathBuf {
        self.manifest_dir
            .clone()
            .unwrap_or_else(|| self.output_root.join("manifests"))
    }
}

impl StatusArgs {
    pub fn resolved_manifest_dir(&self) -> PathBuf {
        self.manifest_dir
            .clone()
            .unwrap_or_else(|| self.output_root.join("manifests"))
    }
}
