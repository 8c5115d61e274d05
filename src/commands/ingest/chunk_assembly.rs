use super::*;

/// Subtractive roman numeral decoding, read right to left. Characters that
/// are not roman digits count as zero.
pub fn roman_to_int(roman: &str) -> i64 {
    let mut total = 0i64;
    let mut previous = 0i64;

    for character in roman.chars().rev() {
        let value = match character.to_ascii_uppercase() {
            'I' => 1,
            'V' => 5,
            'X' => 10,
            'L' => 50,
            'C' => 100,
            'D' => 500,
            'M' => 1000,
            _ => 0,
        };

        if value < previous {
            total -= value;
        } else {
            total += value;
            previous = value;
        }
    }

    total
}

/// `Chapter-III` becomes `ch3`; ids without a usable numeral fall back to
/// their lowercase form.
pub fn chapter_key(chapter_id: &str) -> String {
    let roman = chapter_id.rsplit('-').next().unwrap_or(chapter_id);
    let number = roman_to_int(roman);
    if number > 0 {
        format!("ch{number}")
    } else {
        chapter_id.to_lowercase()
    }
}

pub fn section_key(section_id: &str) -> String {
    section_id.replace('.', "")
}

pub fn chunk_id(prefix: &str, chapter_key: &str, section_key: &str, clause_number: &str) -> String {
    format!("{prefix}_{chapter_key}_sec{section_key}_clause{clause_number}")
}

/// Text held by the section, or else its pages clipped at the content cutoff.
pub fn section_text(section: &Section, pages: &PageStore, max_content_page: i64) -> String {
    if let Some(text) = &section.text {
        return text.trim().to_string();
    }

    let end_page = min(section.end_page, max_content_page);
    pages
        .join_range(section.start_page, end_page)
        .trim()
        .to_string()
}

pub fn build_chunks(
    chapters: &[Chapter],
    pages: &PageStore,
    meta: &DocumentMeta,
    max_content_page: i64,
    segmenter: &ClauseSegmenter,
) -> Vec<Chunk> {
    let mut chunks = Vec::new();

    for chapter in chapters {
        let chapter_key = chapter_key(&chapter.chapter_id);

        for section in &chapter.sections {
            let section_key = section_key(&section.section_id);
            let text = section_text(section, pages, max_content_page);
            let clauses = segmenter.segment(&text);

            debug!(
                chapter_id = %chapter.chapter_id,
                section_id = %section_key,
                clauses = clauses.len(),
                "segmented section"
            );

            for clause in clauses {
                let has_subclauses = segmenter.has_subclauses(&clause.text);
                chunks.push(Chunk {
                    id: chunk_id(
                        &meta.chunk_id_prefix,
                        &chapter_key,
                        &section_key,
                        &clause.number,
                    ),
                    text: clause.text,
                    metadata: ChunkMetadata {
                        doc_title: meta.title.clone(),
                        regulator: meta.regulator.clone(),
                        jurisdiction: meta.jurisdiction.clone(),
                        chapter_id: chapter.chapter_id.clone(),
                        chapter_title: chapter.chapter_title.clone(),
                        section_id: section_key.clone(),
                        section_title: section.section_title.clone(),
                        clause_number: clause.number,
                        has_subclauses,
                        page_start: section.start_page,
                        page_end: section.end_page,
                        source: ChunkSource {
                            pdf: meta.pdf_name.clone(),
                            page_range: [section.start_page, section.end_page],
                        },
                    },
                });
            }
        }
    }

    chunks
}
