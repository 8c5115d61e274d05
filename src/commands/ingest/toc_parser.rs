use super::*;

// Page numbers are ASCII digits only, the same set `str::parse` accepts.
const CHAPTER_TOC_PATTERN: &str = r"(Chapter-\s*[IVXLC]+)\s+(.+?)\.+\s*((?-u:\d)+)";
const SECTION_TOC_PATTERN: &str = r"(?m)^\s*([A-Z]\.)\s+(.*?)\s+((?-u:\d)+)\s*$";
const LEADER_DOTS_PATTERN: &str = r"\.{3,}";

/// Table-header words the section line pattern picks up ("Sl. No.", "Page").
const TOC_HEADER_ARTIFACTS: [&str; 3] = ["no", "page", "sl"];
const MIN_SECTION_TITLE_CHARS: usize = 5;

#[derive(Debug)]
pub struct TocParser {
    chapter_line: Regex,
    section_line: Regex,
    leader_dots: Regex,
}

impl TocParser {
    pub fn new() -> Result<Self> {
        Ok(Self {
            chapter_line: Regex::new(CHAPTER_TOC_PATTERN)
                .context("failed to compile TOC chapter regex")?,
            section_line: Regex::new(SECTION_TOC_PATTERN)
                .context("failed to compile TOC section regex")?,
            leader_dots: Regex::new(LEADER_DOTS_PATTERN)
                .context("failed to compile leader dots regex")?,
        })
    }

    /// Chapters in the order the TOC lists them.
    pub fn parse_chapters(&self, toc_text: &str) -> Vec<TocChapter> {
        let mut chapters = Vec::new();

        for captures in self.chapter_line.captures_iter(toc_text) {
            let (Some(id), Some(title), Some(page)) =
                (captures.get(1), captures.get(2), captures.get(3))
            else {
                continue;
            };
            let Ok(start_page) = page.as_str().parse::<i64>() else {
                continue;
            };

            chapters.push(TocChapter {
                chapter_id: id.as_str().trim().to_string(),
                chapter_title: title.as_str().trim().to_string(),
                start_page,
            });
        }

        chapters
    }

    pub fn parse_sections(&self, toc_text: &str) -> Vec<TocSection> {
        let mut sections = Vec::new();

        for captures in self.section_line.captures_iter(toc_text) {
            let (Some(id), Some(title), Some(page)) =
                (captures.get(1), captures.get(2), captures.get(3))
            else {
                continue;
            };
            let Ok(start_page) = page.as_str().parse::<i64>() else {
                continue;
            };

            let title = title.as_str().trim();
            if !is_valid_section_title(title) {
                continue;
            }

            sections.push(TocSection {
                section_id: id.as_str().to_string(),
                section_title: self.clean_title(title),
                start_page,
            });
        }

        sections
    }

    fn clean_title(&self, title: &str) -> String {
        self.leader_dots.replace_all(title, "").trim().to_string()
    }
}

/// Rejects short titles and the table-header words of the TOC itself.
pub fn is_valid_section_title(title: &str) -> bool {
    let trimmed = title.trim();
    if trimmed.chars().count() < MIN_SECTION_TITLE_CHARS {
        return false;
    }

    let lowered = trimmed.to_lowercase();
    !TOC_HEADER_ARTIFACTS.contains(&lowered.as_str())
}
