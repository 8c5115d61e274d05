use super::*;

/// Closes each TOC chapter's range at the page before the next declared
/// chapter. Declaration order is kept as document order, never re-sorted.
pub fn infer_chapter_ranges(toc_chapters: Vec<TocChapter>, total_pages: i64) -> Vec<Chapter> {
    let next_starts: Vec<Option<i64>> = toc_chapters
        .iter()
        .skip(1)
        .map(|chapter| Some(chapter.start_page))
        .chain(std::iter::once(None))
        .collect();

    toc_chapters
        .into_iter()
        .zip(next_starts)
        .map(|(chapter, next_start)| Chapter {
            end_page: next_start.map_or(total_pages, |start| start - 1),
            chapter_id: chapter.chapter_id,
            chapter_title: chapter.chapter_title,
            start_page: chapter.start_page,
            sections: Vec::new(),
        })
        .collect()
}

/// Hands each section to the first chapter whose range holds its start page.
/// Sections outside every chapter are dropped.
pub fn attach_sections_to_chapters(chapters: &mut [Chapter], sections: Vec<TocSection>) -> usize {
    let mut dropped = 0usize;

    for section in sections {
        let owner = chapters.iter_mut().find(|chapter| {
            chapter.start_page <= section.start_page && section.start_page <= chapter.end_page
        });

        match owner {
            Some(chapter) => {
                let end_page = chapter.end_page;
                chapter.sections.push(Section {
                    section_id: section.section_id,
                    section_title: section.section_title,
                    start_page: section.start_page,
                    end_page,
                    text: None,
                });
            }
            None => {
                debug!(
                    section_id = %section.section_id,
                    start_page = section.start_page,
                    "section start page falls outside every chapter"
                );
                dropped += 1;
            }
        }
    }

    dropped
}

/// Orders a chapter's sections by `(start_page, section_id)` and ends each at
/// the page before the next strictly later start, or at the chapter end.
pub fn infer_section_ranges(chapter: &mut Chapter) {
    chapter.sections.sort_by(|a, b| {
        a.start_page
            .cmp(&b.start_page)
            .then_with(|| a.section_id.cmp(&b.section_id))
    });

    let starts: Vec<i64> = chapter
        .sections
        .iter()
        .map(|section| section.start_page)
        .collect();

    for (index, section) in chapter.sections.iter_mut().enumerate() {
        section.end_page = starts[index + 1..]
            .iter()
            .find(|next_start| **next_start > section.start_page)
            .map_or(chapter.end_page, |next_start| next_start - 1);
    }
}

/// Page count the ranges may span: stored pages, clipped before any annex.
pub fn usable_page_count(page_count: usize, max_content_page: i64) -> i64 {
    min(page_count as i64, max_content_page)
}
