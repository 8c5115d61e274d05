use super::*;
use crate::model::{ChunkMetadata, ChunkSource, DocumentConfig};

fn chunk(id: &str, chapter_id: &str, section_id: &str, clause_number: &str) -> Chunk {
    Chunk {
        id: id.to_string(),
        text: format!("{clause_number}. Clause text."),
        metadata: ChunkMetadata {
            doc_title: "Master Direction".to_string(),
            regulator: "Reserve Bank of India".to_string(),
            jurisdiction: "IN".to_string(),
            chapter_id: chapter_id.to_string(),
            chapter_title: "Governance".to_string(),
            section_id: section_id.to_string(),
            section_title: "Board of directors".to_string(),
            clause_number: clause_number.to_string(),
            has_subclauses: false,
            page_start: 3,
            page_end: 4,
            source: ChunkSource {
                pdf: "master_direction.pdf".to_string(),
                page_range: [3, 4],
            },
        },
    }
}

fn temp_path(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("regchunk_validate_{}_{name}", std::process::id()))
}

#[test]
fn range_stats_reports_gaps_over_distinct_numbers() {
    let stats = range_stats(&[5, 1, 2, 4, 2]).expect("non-empty group");

    assert_eq!(
        stats,
        RangeStats {
            min: 1,
            max: 5,
            count: 4,
            missing: vec![3],
        }
    );
}

#[test]
fn range_stats_is_none_for_empty_group() {
    assert_eq!(range_stats(&[]), None);
}

#[test]
fn duplicate_ids_lists_each_repeat_but_not_first_occurrence() {
    let chunks = vec![
        chunk("x_ch1_secA_clause1", "Chapter-I", "A.", "1"),
        chunk("x_ch1_secA_clause2", "Chapter-I", "A.", "2"),
        chunk("x_ch1_secA_clause1", "Chapter-I", "A.", "1"),
        chunk("x_ch1_secA_clause1", "Chapter-I", "A.", "1"),
    ];

    assert_eq!(
        duplicate_ids(&chunks),
        vec!["x_ch1_secA_clause1", "x_ch1_secA_clause1"]
    );
}

#[test]
fn qa_report_groups_by_chapter_and_section_in_first_seen_order() {
    let chunks = vec![
        chunk("a", "Chapter-II", "C.", "1"),
        chunk("b", "Chapter-I", "A.", "1"),
        chunk("c", "Chapter-I", "A.", "3"),
        chunk("d", "Chapter-I", "B.", "2"),
    ];

    let report = build_qa_report(&chunks);

    assert_eq!(report.total_chunks, 4);
    assert!(report.duplicate_ids.is_empty());
    assert_eq!(
        report.chapters.keys().collect::<Vec<_>>(),
        vec!["Chapter-II", "Chapter-I"]
    );
    assert_eq!(
        report.sections.keys().collect::<Vec<_>>(),
        vec!["Chapter-II:C.", "Chapter-I:A.", "Chapter-I:B."]
    );
    assert_eq!(report.chapters["Chapter-I"].missing, Vec::<i64>::new());
    assert_eq!(report.sections["Chapter-I:A."].missing, vec![2]);
    assert_eq!(report.missing_clause_count(), 1);
}

#[test]
fn qa_report_skips_non_numeric_clause_numbers() {
    let chunks = vec![
        chunk("a", "Chapter-I", "A.", "1"),
        chunk("b", "Chapter-I", "A.", "x"),
    ];

    let report = build_qa_report(&chunks);

    assert_eq!(report.total_chunks, 2);
    assert_eq!(report.chapters["Chapter-I"].count, 1);
}

#[test]
fn qa_report_is_empty_for_no_chunks() {
    assert_eq!(build_qa_report(&[]), QaReport::default());
}

#[test]
fn stored_report_state_detects_missing_fresh_and_stale() {
    let path = temp_path("qa_report.json");
    let _ = std::fs::remove_file(&path);

    let report = build_qa_report(&[
        chunk("a", "Chapter-I", "A.", "1"),
        chunk("b", "Chapter-I", "A.", "3"),
    ]);

    assert_eq!(
        stored_report_state(&path, &report).expect("missing report"),
        StoredReportState::Missing
    );

    write_json_pretty(&path, &report).expect("write report");
    assert_eq!(
        stored_report_state(&path, &report).expect("fresh report"),
        StoredReportState::Fresh
    );

    let changed = build_qa_report(&[chunk("a", "Chapter-I", "A.", "1")]);
    assert_eq!(
        stored_report_state(&path, &changed).expect("stale report"),
        StoredReportState::Stale
    );

    let _ = std::fs::remove_file(&path);
}

#[test]
fn targets_for_config_point_at_document_output_dirs() {
    let config = JobConfig {
        documents: vec![DocumentConfig {
            id: "rbi-cb-gov".to_string(),
            pdf_path: "data/raw/master_direction.pdf".to_string(),
            title: "Master Direction".to_string(),
            regulator: "Reserve Bank of India".to_string(),
            jurisdiction: "IN".to_string(),
            annex_start_page: None,
            chunk_id_prefix: None,
        }],
    };

    let targets = targets_for_config(&config, Path::new("out"));

    assert_eq!(
        targets,
        vec![ValidationTarget {
            label: "rbi-cb-gov".to_string(),
            chunks_path: PathBuf::from("out/rbi-cb-gov/chunks.json"),
            qa_report_path: PathBuf::from("out/rbi-cb-gov/qa_report.json"),
        }]
    );
}

#[test]
fn explicit_chunks_path_pairs_with_sibling_qa_report() {
    let args = ValidateArgs {
        config: PathBuf::from("config-not-read.json"),
        output_root: PathBuf::from("out"),
        chunks: Some(PathBuf::from("elsewhere/doc/chunks.json")),
        write: false,
    };

    let targets = resolve_targets(&args).expect("resolve explicit chunks path");

    assert_eq!(targets.len(), 1);
    assert_eq!(
        targets[0].qa_report_path,
        PathBuf::from("elsewhere/doc/qa_report.json")
    );
}
