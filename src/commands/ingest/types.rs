use super::*;

/// Section id given to the pseudo-section covering a chapter that the TOC
/// lists without any sections.
pub const CHAPTER_SECTION_ID: &str = "CHAPTER";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Page {
    pub page_no: i64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocChapter {
    pub chapter_id: String,
    pub chapter_title: String,
    pub start_page: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TocSection {
    pub section_id: String,
    pub section_title: String,
    pub start_page: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    pub chapter_id: String,
    pub chapter_title: String,
    pub start_page: i64,
    pub end_page: i64,
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub section_id: String,
    pub section_title: String,
    pub start_page: i64,
    pub end_page: i64,
    /// Body text recovered from the chapter; `None` means the text is read
    /// back from the page range when chunks are assembled.
    pub text: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Clause {
    pub number: String,
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    SynthesizedChapterSection,
    NoBodyHeaders,
    Reconciled { header_count: usize },
}

impl ReconcileOutcome {
    pub fn as_str(self) -> &'static str {
        match self {
            ReconcileOutcome::SynthesizedChapterSection => "synthesized_chapter_section",
            ReconcileOutcome::NoBodyHeaders => "no_body_headers",
            ReconcileOutcome::Reconciled { .. } => "reconciled",
        }
    }
}
