use super::*;

const SECTION_HEADER_PATTERN: &str = r"(?m)^\s*([A-Z])\.\s+(.+)$";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderBlock {
    pub section_id: String,
    pub section_title: String,
    pub text: String,
}

/// Re-derives section boundaries from the `A. Title` header lines found in
/// the chapter body, which wins over whatever the TOC claimed.
#[derive(Debug)]
pub struct SectionReconciler {
    section_header: Regex,
}

impl SectionReconciler {
    pub fn new() -> Result<Self> {
        Ok(Self {
            section_header: Regex::new(SECTION_HEADER_PATTERN)
                .context("failed to compile in-body section header regex")?,
        })
    }

    pub fn header_blocks(&self, chapter_text: &str) -> Vec<HeaderBlock> {
        let headers: Vec<_> = self.section_header.captures_iter(chapter_text).collect();

        headers
            .iter()
            .enumerate()
            .filter_map(|(index, captures)| {
                let whole = captures.get(0)?;
                let end = headers
                    .get(index + 1)
                    .and_then(|next| next.get(0))
                    .map_or(chapter_text.len(), |next| next.start());

                Some(HeaderBlock {
                    section_id: format!("{}.", captures.get(1)?.as_str()),
                    section_title: captures.get(2)?.as_str().trim().to_string(),
                    text: chapter_text[whole.start()..end].trim().to_string(),
                })
            })
            .collect()
    }

    pub fn reconcile(
        &self,
        chapter: &mut Chapter,
        pages: &PageStore,
        max_content_page: i64,
    ) -> ReconcileOutcome {
        let end_page = min(chapter.end_page, max_content_page);
        let chapter_text = pages.join_range(chapter.start_page, end_page);

        if chapter.sections.is_empty() {
            chapter.sections = vec![Section {
                section_id: CHAPTER_SECTION_ID.to_string(),
                section_title: chapter.chapter_title.clone(),
                start_page: chapter.start_page,
                end_page,
                text: Some(chapter_text.trim().to_string()),
            }];
            return ReconcileOutcome::SynthesizedChapterSection;
        }

        let blocks = self.header_blocks(&chapter_text);
        if blocks.is_empty() {
            return ReconcileOutcome::NoBodyHeaders;
        }

        let toc_sections: HashMap<String, Section> = chapter
            .sections
            .drain(..)
            .map(|section| (section.section_id.clone(), section))
            .collect();

        // A TOC section is one record however often its label recurs in the
        // body, so every occurrence ends up holding the last block's text.
        let mut shared_text: HashMap<&str, &str> = HashMap::new();
        for block in &blocks {
            if toc_sections.contains_key(&block.section_id) {
                shared_text.insert(block.section_id.as_str(), block.text.as_str());
            }
        }

        let header_count = blocks.len();
        chapter.sections = blocks
            .iter()
            .map(|block| match toc_sections.get(&block.section_id) {
                Some(section) => Section {
                    text: shared_text
                        .get(block.section_id.as_str())
                        .map(|text| text.to_string()),
                    ..section.clone()
                },
                None => Section {
                    section_id: block.section_id.clone(),
                    section_title: block.section_title.clone(),
                    start_page: chapter.start_page,
                    end_page: chapter.end_page,
                    text: Some(block.text.clone()),
                },
            })
            .collect();

        ReconcileOutcome::Reconciled { header_count }
    }
}
