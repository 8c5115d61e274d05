use super::*;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationTarget {
    pub label: String,
    pub chunks_path: PathBuf,
    pub qa_report_path: PathBuf,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoredReportState {
    Missing,
    Fresh,
    Stale,
}

impl StoredReportState {
    pub fn as_str(self) -> &'static str {
        match self {
            StoredReportState::Missing => "missing",
            StoredReportState::Fresh => "fresh",
            StoredReportState::Stale => "stale",
        }
    }
}

pub fn run(args: ValidateArgs) -> Result<()> {
    let targets = resolve_targets(&args)?;
    if targets.is_empty() {
        warn!(config = %args.config.display(), "no documents to validate");
        return Ok(());
    }

    let mut problems = Vec::new();

    for target in &targets {
        if !target.chunks_path.exists() {
            warn!(document = %target.label, path = %target.chunks_path.display(), "chunks file missing");
            problems.push(format!("{}: chunks file missing", target.label));
            continue;
        }

        let chunks: Vec<Chunk> = read_json(&target.chunks_path)?;
        let report = build_qa_report(&chunks);
        log_report(&target.label, &report);

        let state = stored_report_state(&target.qa_report_path, &report)?;
        info!(
            document = %target.label,
            stored_report = state.as_str(),
            "compared stored QA report"
        );

        if args.write {
            if state != StoredReportState::Fresh {
                write_json_pretty(&target.qa_report_path, &report)?;
                info!(path = %target.qa_report_path.display(), "wrote QA report");
            }
        } else if state != StoredReportState::Fresh {
            problems.push(format!(
                "{}: stored QA report is {}",
                target.label,
                state.as_str()
            ));
        }
    }

    if !problems.is_empty() {
        bail!(
            "validation found {} problem(s): {}",
            problems.len(),
            problems.join("; ")
        );
    }

    info!(targets = targets.len(), "validation completed");
    Ok(())
}

pub fn resolve_targets(args: &ValidateArgs) -> Result<Vec<ValidationTarget>> {
    if let Some(chunks_path) = &args.chunks {
        let qa_report_path = chunks_path.with_file_name("qa_report.json");
        return Ok(vec![ValidationTarget {
            label: chunks_path.display().to_string(),
            chunks_path: chunks_path.clone(),
            qa_report_path,
        }]);
    }

    let config: JobConfig = read_json(&args.config)?;
    Ok(targets_for_config(&config, &args.output_root))
}

pub fn targets_for_config(config: &JobConfig, output_root: &Path) -> Vec<ValidationTarget> {
    config
        .documents
        .iter()
        .map(|doc| {
            let dir = document_output_dir(output_root, &doc.id);
            ValidationTarget {
                label: doc.id.clone(),
                chunks_path: dir.join("chunks.json"),
                qa_report_path: dir.join("qa_report.json"),
            }
        })
        .collect()
}

pub fn stored_report_state(path: &Path, recomputed: &QaReport) -> Result<StoredReportState> {
    if !path.exists() {
        return Ok(StoredReportState::Missing);
    }

    let stored: QaReport = read_json(path)?;
    if &stored == recomputed {
        Ok(StoredReportState::Fresh)
    } else {
        Ok(StoredReportState::Stale)
    }
}

fn log_report(label: &str, report: &QaReport) {
    info!(
        document = %label,
        chunks = report.total_chunks,
        duplicates = report.duplicate_ids.len(),
        chapters = report.chapters.len(),
        sections = report.sections.len(),
        "recomputed QA report"
    );

    for id in &report.duplicate_ids {
        warn!(document = %label, chunk_id = %id, "duplicate chunk id");
    }

    for (key, stats) in &report.sections {
        if !stats.missing.is_empty() {
            warn!(
                document = %label,
                section = %key,
                min = stats.min,
                max = stats.max,
                missing = ?stats.missing,
                "clause numbering gap"
            );
        }
    }
}
