use std::collections::HashSet;
use std::path::{Path, PathBuf};

use anyhow::{Result, bail};
use indexmap::IndexMap;
use tracing::{info, warn};

use crate::cli::ValidateArgs;
use crate::commands::ingest::document_output_dir;
use crate::model::{Chunk, JobConfig, QaReport, RangeStats};
use crate::util::{read_json, write_json_pretty};

mod qa_report;
mod run;
#[cfg(test)]
mod tests;

pub use self::qa_report::build_qa_report;
pub use self::run::run;

use self::qa_report::*;
use self::run::*;
