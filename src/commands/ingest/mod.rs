use std::cmp::min;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{Context, Result, bail};
use chrono::Utc;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::cli::IngestArgs;
use crate::commands::validate::build_qa_report;
use crate::model::{
    Chunk, ChunkMetadata, ChunkSource, DocumentConfig, DocumentMeta, DocumentRunSummary,
    IngestCounts, IngestPaths, IngestRunManifest, JobConfig, QaReport, ToolVersions,
};
use crate::util::{
    ensure_directory, now_utc_string, read_json, sha256_file, utc_compact_string,
    write_json_pretty,
};

mod chunk_assembly;
mod clause_segmenter;
mod page_store;
mod pipeline;
mod range_inference;
mod run;
mod section_reconciler;
mod toc_parser;
mod types;

pub use run::{document_output_dir, run};

use chunk_assembly::*;
use clause_segmenter::*;
use page_store::*;
use pipeline::*;
use range_inference::*;
use section_reconciler::*;
use toc_parser::*;
use types::*;
