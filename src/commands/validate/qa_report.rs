use super::*;

/// Builds the QA report for an ordered chunk list: ids seen more than once
/// (each repeat listed, never the first occurrence) and clause-number gaps per
/// chapter and per `chapter_id:section_id`.
pub fn build_qa_report(chunks: &[Chunk]) -> QaReport {
    let mut chapter_numbers: IndexMap<String, Vec<i64>> = IndexMap::new();
    let mut section_numbers: IndexMap<String, Vec<i64>> = IndexMap::new();

    for chunk in chunks {
        let Ok(number) = chunk.metadata.clause_number.parse::<i64>() else {
            warn!(chunk_id = %chunk.id, clause_number = %chunk.metadata.clause_number, "non-numeric clause number");
            continue;
        };

        chapter_numbers
            .entry(chunk.metadata.chapter_id.clone())
            .or_default()
            .push(number);
        section_numbers
            .entry(format!(
                "{}:{}",
                chunk.metadata.chapter_id, chunk.metadata.section_id
            ))
            .or_default()
            .push(number);
    }

    QaReport {
        total_chunks: chunks.len(),
        duplicate_ids: duplicate_ids(chunks),
        chapters: range_stats_by_key(chapter_numbers),
        sections: range_stats_by_key(section_numbers),
    }
}

pub fn duplicate_ids(chunks: &[Chunk]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();

    for chunk in chunks {
        if !seen.insert(chunk.id.as_str()) {
            duplicates.push(chunk.id.clone());
        }
    }

    duplicates
}

/// Stats over the distinct numbers; `None` for an empty group.
pub fn range_stats(numbers: &[i64]) -> Option<RangeStats> {
    let mut distinct = numbers.to_vec();
    distinct.sort_unstable();
    distinct.dedup();

    let (&min, &max) = (distinct.first()?, distinct.last()?);
    let present: HashSet<i64> = distinct.iter().copied().collect();
    let missing = (min..=max)
        .filter(|number| !present.contains(number))
        .collect();

    Some(RangeStats {
        min,
        max,
        count: distinct.len(),
        missing,
    })
}

fn range_stats_by_key(groups: IndexMap<String, Vec<i64>>) -> IndexMap<String, RangeStats> {
    groups
        .into_iter()
        .filter_map(|(key, numbers)| range_stats(&numbers).map(|stats| (key, stats)))
        .collect()
}
