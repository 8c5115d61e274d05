use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

pub const DEFAULT_CHUNK_ID_PREFIX: &str = "rbi_cb_gov";

/// Stand-in cutoff when a document declares no annex start page.
pub const NO_ANNEX_START_PAGE: i64 = 1_000_000_000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct JobConfig {
    #[serde(default)]
    pub documents: Vec<DocumentConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentConfig {
    pub id: String,
    pub pdf_path: String,
    pub title: String,
    pub regulator: String,
    pub jurisdiction: String,
    #[serde(default)]
    pub annex_start_page: Option<i64>,
    #[serde(default)]
    pub chunk_id_prefix: Option<String>,
}

impl DocumentConfig {
    /// Last page that may contribute content; pages past it belong to annexes.
    pub fn max_content_page(&self) -> i64 {
        self.annex_start_page.unwrap_or(NO_ANNEX_START_PAGE) - 1
    }

    pub fn chunk_id_prefix(&self) -> &str {
        self.chunk_id_prefix
            .as_deref()
            .filter(|prefix| !prefix.trim().is_empty())
            .unwrap_or(DEFAULT_CHUNK_ID_PREFIX)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocumentMeta {
    pub id: String,
    pub title: String,
    pub regulator: String,
    pub jurisdiction: String,
    pub pdf_name: String,
    pub chunk_id_prefix: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    pub id: String,
    pub text: String,
    pub metadata: ChunkMetadata,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkMetadata {
    pub doc_title: String,
    pub regulator: String,
    pub jurisdiction: String,
    pub chapter_id: String,
    pub chapter_title: String,
    pub section_id: String,
    pub section_title: String,
    pub clause_number: String,
    pub has_subclauses: bool,
    pub page_start: i64,
    pub page_end: i64,
    pub source: ChunkSource,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChunkSource {
    pub pdf: String,
    pub page_range: [i64; 2],
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QaReport {
    pub total_chunks: usize,
    pub duplicate_ids: Vec<String>,
    pub chapters: IndexMap<String, RangeStats>,
    pub sections: IndexMap<String, RangeStats>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeStats {
    pub min: i64,
    pub max: i64,
    pub count: usize,
    pub missing: Vec<i64>,
}

impl QaReport {
    pub fn missing_clause_count(&self) -> usize {
        self.sections.values().map(|stats| stats.missing.len()).sum()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolVersions {
    pub pdftotext: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestPaths {
    pub config_path: String,
    pub output_root: String,
    pub manifest_dir: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IngestCounts {
    pub document_count: usize,
    pub processed_document_count: usize,
    pub failed_document_count: usize,
    pub chunks_total: usize,
    pub duplicate_ids_total: usize,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DocumentRunSummary {
    pub doc_id: String,
    pub pdf_path: String,
    pub source_sha256: Option<String>,
    pub status: String,
    pub page_count: usize,
    pub usable_page_count: i64,
    pub chapter_count: usize,
    pub section_count: usize,
    pub chunk_count: usize,
    pub duplicate_id_count: usize,
    pub missing_clause_count: usize,
    pub chunks_path: Option<String>,
    pub qa_report_path: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestRunManifest {
    pub manifest_version: u32,
    pub run_id: String,
    pub status: String,
    pub started_at: String,
    pub updated_at: String,
    pub command: String,
    pub tool_versions: ToolVersions,
    pub paths: IngestPaths,
    pub counts: IngestCounts,
    pub documents: Vec<DocumentRunSummary>,
    pub warnings: Vec<String>,
}
