use super::*;

pub const DEFAULT_TOC_PAGES: usize = 2;

#[derive(Debug, Clone, Copy)]
pub struct PipelineOptions {
    pub toc_pages: usize,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            toc_pages: DEFAULT_TOC_PAGES,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ProcessedDocument {
    pub chapters: Vec<Chapter>,
    pub chunks: Vec<Chunk>,
    pub qa_report: QaReport,
    pub usable_page_count: i64,
    pub warnings: Vec<String>,
}

impl ProcessedDocument {
    pub fn section_count(&self) -> usize {
        self.chapters
            .iter()
            .map(|chapter| chapter.sections.len())
            .sum()
    }
}

/// Runs TOC parsing, range inference, in-body reconciliation, clause
/// segmentation, chunk assembly and QA over one document's pages.
#[derive(Debug)]
pub struct StructurePipeline {
    options: PipelineOptions,
    toc_parser: TocParser,
    reconciler: SectionReconciler,
    segmenter: ClauseSegmenter,
}

impl StructurePipeline {
    pub fn new(options: PipelineOptions) -> Result<Self> {
        Ok(Self {
            options,
            toc_parser: TocParser::new()?,
            reconciler: SectionReconciler::new()?,
            segmenter: ClauseSegmenter::new()?,
        })
    }

    pub fn process(
        &self,
        pages: &PageStore,
        meta: &DocumentMeta,
        max_content_page: i64,
    ) -> ProcessedDocument {
        let mut warnings = Vec::new();
        if pages.is_empty() {
            warn!(doc_id = %meta.id, "document has no non-empty pages");
        }

        let toc_text = pages.toc_text(self.options.toc_pages);
        let toc_chapters = self.toc_parser.parse_chapters(&toc_text);
        let toc_sections = self.toc_parser.parse_sections(&toc_text);
        info!(
            doc_id = %meta.id,
            chapters = toc_chapters.len(),
            sections = toc_sections.len(),
            "parsed table of contents"
        );

        if toc_chapters.is_empty() {
            let message = format!("{}: no chapters found in table of contents", meta.id);
            warn!(doc_id = %meta.id, "no chapters found in table of contents");
            warnings.push(message);
        }

        let usable_page_count = usable_page_count(pages.len(), max_content_page);
        let mut chapters = infer_chapter_ranges(toc_chapters, usable_page_count);
        let dropped = attach_sections_to_chapters(&mut chapters, toc_sections);
        if dropped > 0 {
            debug!(doc_id = %meta.id, dropped, "dropped sections outside chapter ranges");
        }

        for chapter in &mut chapters {
            infer_section_ranges(chapter);
            let outcome = self.reconciler.reconcile(chapter, pages, max_content_page);
            match outcome {
                ReconcileOutcome::SynthesizedChapterSection => warn!(
                    doc_id = %meta.id,
                    chapter_id = %chapter.chapter_id,
                    "chapter has no TOC sections; using whole chapter as one section"
                ),
                ReconcileOutcome::NoBodyHeaders => warn!(
                    doc_id = %meta.id,
                    chapter_id = %chapter.chapter_id,
                    "no in-body section headers; keeping TOC page ranges"
                ),
                ReconcileOutcome::Reconciled { header_count } => debug!(
                    doc_id = %meta.id,
                    chapter_id = %chapter.chapter_id,
                    header_count,
                    "reconciled sections with in-body headers"
                ),
            }
            debug!(
                doc_id = %meta.id,
                chapter_id = %chapter.chapter_id,
                start_page = chapter.start_page,
                end_page = chapter.end_page,
                sections = chapter.sections.len(),
                outcome = outcome.as_str(),
                "resolved chapter"
            );
        }

        for violation in check_structure_invariants(&chapters) {
            warn!(doc_id = %meta.id, violation = %violation, "structure invariant violated");
            warnings.push(format!("{}: {}", meta.id, violation));
        }

        let chunks = build_chunks(
            &chapters,
            pages,
            meta,
            max_content_page,
            &self.segmenter,
        );
        let qa_report = build_qa_report(&chunks);

        ProcessedDocument {
            chapters,
            chunks,
            qa_report,
            usable_page_count,
            warnings,
        }
    }
}

/// Every chapter must have `start_page <= end_page` and hold its sections'
/// ranges.
pub fn check_structure_invariants(chapters: &[Chapter]) -> Vec<String> {
    let mut violations = Vec::new();

    for chapter in chapters {
        if chapter.start_page > chapter.end_page {
            violations.push(format!(
                "{} has inverted page range {}-{}",
                chapter.chapter_id, chapter.start_page, chapter.end_page
            ));
        }

        for section in &chapter.sections {
            if section.start_page < chapter.start_page || section.end_page > chapter.end_page {
                violations.push(format!(
                    "{} section {} range {}-{} lies outside chapter range {}-{}",
                    chapter.chapter_id,
                    section.section_id,
                    section.start_page,
                    section.end_page,
                    chapter.start_page,
                    chapter.end_page
                ));
            }
        }
    }

    violations
}
