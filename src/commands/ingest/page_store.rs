use super::*;

/// Ordered page texts of one document, addressable by page number.
#[derive(Debug, Clone, Default)]
pub struct PageStore {
    pages: Vec<Page>,
    index_by_page_no: HashMap<i64, usize>,
    last_page_no: i64,
}

impl PageStore {
    pub fn new(pages: Vec<Page>) -> Self {
        let mut index_by_page_no = HashMap::with_capacity(pages.len());
        for (index, page) in pages.iter().enumerate() {
            index_by_page_no.insert(page.page_no, index);
        }

        let last_page_no = pages.iter().map(|page| page.page_no).max().unwrap_or(0);

        Self {
            pages,
            index_by_page_no,
            last_page_no,
        }
    }

    /// Loads pages for `path`: a `.json` file is read as pre-extracted
    /// `[{page_no, text}]`, anything else goes through pdftotext.
    pub fn load(path: &Path, max_pages: Option<usize>) -> Result<Self> {
        if !path.exists() {
            bail!("input document not found: {}", path.display());
        }

        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let pages = if is_json {
            let mut pages: Vec<Page> = read_json(path)?;
            if let Some(max_pages) = max_pages {
                pages.truncate(max_pages);
            }
            pages
        } else {
            pages_from_raw_texts(extract_pages_with_pdftotext(path, max_pages)?)
        };

        Ok(Self::new(pages))
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    pub fn text(&self, page_no: i64) -> Option<&str> {
        self.index_by_page_no
            .get(&page_no)
            .and_then(|index| self.pages.get(*index))
            .map(|page| page.text.as_str())
    }

    /// Text of the first `max_pages` stored pages, one trailing newline each.
    pub fn toc_text(&self, max_pages: usize) -> String {
        let mut text = String::new();
        for page in self.pages.iter().take(max_pages) {
            text.push_str(&page.text);
            text.push('\n');
        }
        text
    }

    /// Concatenates pages `start..=end`; missing page numbers contribute an
    /// empty line. `end` is clamped to the last stored page, so a garbled TOC
    /// page number only costs the pages that exist.
    pub fn join_range(&self, start: i64, end: i64) -> String {
        let mut text = String::new();
        for page_no in start..=min(end, self.last_page_no) {
            text.push_str(self.text(page_no).unwrap_or(""));
            text.push('\n');
        }
        text
    }
}

/// Numbers raw page texts from 1, trims them and skips pages without text.
pub fn pages_from_raw_texts(raw_pages: Vec<String>) -> Vec<Page> {
    raw_pages
        .into_iter()
        .enumerate()
        .filter_map(|(index, raw)| {
            let text = raw.trim();
            if text.is_empty() {
                return None;
            }
            Some(Page {
                page_no: (index + 1) as i64,
                text: text.to_string(),
            })
        })
        .collect()
}

/// Runs `pdftotext` over the whole document (or its first `max_pages`) and
/// splits stdout on form feeds.
fn extract_pages_with_pdftotext(pdf_path: &Path, max_pages: Option<usize>) -> Result<Vec<String>> {
    let mut args = vec!["-enc".to_string(), "UTF-8".to_string()];
    if let Some(max_pages) = max_pages {
        args.extend(["-f".to_string(), "1".to_string()]);
        args.extend(["-l".to_string(), max_pages.to_string()]);
    }

    let output = Command::new("pdftotext")
        .args(&args)
        .arg(pdf_path)
        .arg("-")
        .output()
        .with_context(|| format!("failed to run pdftotext on {}", pdf_path.display()))?;

    if !output.status.success() {
        bail!(
            "pdftotext failed on {}: {}",
            pdf_path.display(),
            String::from_utf8_lossy(&output.stderr).trim()
        );
    }

    let mut pages: Vec<String> = String::from_utf8_lossy(&output.stdout)
        .split('\u{000C}')
        .map(|page| page.replace('\u{0000}', ""))
        .collect();

    // pdftotext closes the last page with a form feed too
    while pages.last().is_some_and(|page| page.trim().is_empty()) {
        pages.pop();
    }

    Ok(pages)
}

pub fn pdftotext_version() -> Option<String> {
    command_version_optional("pdftotext", &["-v"])
}

/// First non-empty line a tool prints for its version flag; some tools
/// answer on stderr. `None` when the tool is not installed.
pub fn command_version_optional(program: &str, args: &[&str]) -> Option<String> {
    let output = Command::new(program).args(args).output().ok()?;

    [output.stdout.as_slice(), output.stderr.as_slice()]
        .into_iter()
        .map(String::from_utf8_lossy)
        .find_map(|stream| {
            stream
                .lines()
                .map(str::trim)
                .find(|line| !line.is_empty())
                .map(str::to_string)
        })
}
