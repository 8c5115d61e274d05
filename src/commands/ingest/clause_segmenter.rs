use super::*;

const CLAUSE_START_PATTERN: &str = r"(?m)^\s*((?-u:\d)+)\.\s+";
const PAGE_NUMBER_LINE_PATTERN: &str = r"(?m)^\s*\d+\s*$";
const SUBCLAUSE_MARKER_PATTERN: &str = r"(?i)\(\s*[ivx]+\s*\)|\(\s*[a-z]\s*\)";

const MAX_CLAUSE_NUMBER: u64 = 500;

#[derive(Debug)]
pub struct ClauseSegmenter {
    clause_start: Regex,
    page_number_line: Regex,
    subclause_marker: Regex,
}

impl ClauseSegmenter {
    pub fn new() -> Result<Self> {
        Ok(Self {
            clause_start: Regex::new(CLAUSE_START_PATTERN)
                .context("failed to compile clause start regex")?,
            page_number_line: Regex::new(PAGE_NUMBER_LINE_PATTERN)
                .context("failed to compile page number line regex")?,
            subclause_marker: Regex::new(SUBCLAUSE_MARKER_PATTERN)
                .context("failed to compile subclause marker regex")?,
        })
    }

    /// Blanks out lines that hold nothing but a page number.
    pub fn strip_page_number_lines(&self, text: &str) -> String {
        self.page_number_line.replace_all(text, "").into_owned()
    }

    /// Slices `text` at every numbered-clause start, valid or not, then keeps
    /// only the slices whose own number passes [`is_valid_clause_number`].
    /// A rejected number still ends the clause before it.
    pub fn segment(&self, text: &str) -> Vec<Clause> {
        let text = self.strip_page_number_lines(text);

        let boundaries: Vec<(usize, &str)> = self
            .clause_start
            .captures_iter(&text)
            .filter_map(|captures| {
                let start = captures.get(0)?.start();
                let number = captures.get(1)?.as_str();
                Some((start, number))
            })
            .collect();

        boundaries
            .iter()
            .enumerate()
            .filter(|(_, (_, number))| is_valid_clause_number(number))
            .map(|(index, (start, number))| {
                let end = boundaries
                    .get(index + 1)
                    .map_or(text.len(), |(next_start, _)| *next_start);
                Clause {
                    number: number.to_string(),
                    text: text[*start..end].trim().to_string(),
                }
            })
            .collect()
    }

    pub fn has_subclauses(&self, clause_text: &str) -> bool {
        self.subclause_marker.is_match(clause_text)
    }
}

/// Years such as `1999` or `2024` and numbers outside `1..=500` are noise.
pub fn is_valid_clause_number(number: &str) -> bool {
    if number.chars().count() >= 4 && (number.starts_with("19") || number.starts_with("20")) {
        return false;
    }

    number
        .parse::<u64>()
        .map(|value| (1..=MAX_CLAUSE_NUMBER).contains(&value))
        .unwrap_or(false)
}
