use super::*;

const MANIFEST_VERSION: u32 = 1;

pub fn run(args: IngestArgs) -> Result<()> {
    let started_ts = Utc::now();
    let started_at = now_utc_string();
    let run_id = format!("run-{}", utc_compact_string(started_ts));

    let manifest_dir = args.resolved_manifest_dir();
    ensure_directory(&manifest_dir)?;
    let manifest_path = manifest_dir.join(format!(
        "ingest_run_{}.json",
        utc_compact_string(started_ts)
    ));

    info!(config = %args.config.display(), run_id = %run_id, "starting ingest");

    let config: JobConfig = read_json(&args.config)?;
    let documents = select_documents(&config, &args.doc_ids);
    if documents.is_empty() {
        warn!(config = %args.config.display(), "no documents selected for ingest");
    }

    let pipeline = StructurePipeline::new(PipelineOptions {
        toc_pages: args.toc_pages,
    })?;

    let mut summaries = Vec::with_capacity(documents.len());
    let mut warnings = Vec::new();

    for doc in documents {
        match process_document(&pipeline, doc, &args) {
            Ok((summary, doc_warnings)) => {
                info!(
                    doc_id = %doc.id,
                    chunks = summary.chunk_count,
                    duplicates = summary.duplicate_id_count,
                    missing_clauses = summary.missing_clause_count,
                    path = %summary.chunks_path.as_deref().unwrap_or_default(),
                    "wrote document chunks"
                );
                summaries.push(summary);
                warnings.extend(doc_warnings);
            }
            Err(err) => {
                if args.fail_fast {
                    return Err(err).with_context(|| format!("failed to process {}", doc.id));
                }
                warn!(doc_id = %doc.id, error = %err, "document processing failed");
                summaries.push(DocumentRunSummary {
                    doc_id: doc.id.clone(),
                    pdf_path: doc.pdf_path.clone(),
                    status: "failed".to_string(),
                    error: Some(format!("{err:#}")),
                    ..DocumentRunSummary::default()
                });
            }
        }
    }

    let counts = summarize_counts(&summaries);
    let status = if counts.failed_document_count > 0 {
        "completed_with_failures"
    } else {
        "completed"
    };

    let manifest = IngestRunManifest {
        manifest_version: MANIFEST_VERSION,
        run_id,
        status: status.to_string(),
        started_at,
        updated_at: now_utc_string(),
        command: render_ingest_command(&args),
        tool_versions: ToolVersions {
            pdftotext: pdftotext_version(),
        },
        paths: IngestPaths {
            config_path: args.config.display().to_string(),
            output_root: args.output_root.display().to_string(),
            manifest_dir: manifest_dir.display().to_string(),
        },
        counts: counts.clone(),
        documents: summaries,
        warnings,
    };

    write_json_pretty(&manifest_path, &manifest)?;

    info!(path = %manifest_path.display(), "wrote ingest run manifest");
    info!(
        documents = counts.processed_document_count,
        failed = counts.failed_document_count,
        chunks = counts.chunks_total,
        "ingest completed"
    );

    if counts.failed_document_count > 0 {
        bail!(
            "{} of {} documents failed; see {}",
            counts.failed_document_count,
            counts.document_count,
            manifest_path.display()
        );
    }

    Ok(())
}

pub fn select_documents<'a>(config: &'a JobConfig, doc_ids: &[String]) -> Vec<&'a DocumentConfig> {
    config
        .documents
        .iter()
        .filter(|doc| doc_ids.is_empty() || doc_ids.iter().any(|id| id == &doc.id))
        .collect()
}

pub fn document_meta(doc: &DocumentConfig, pdf_path: &Path) -> DocumentMeta {
    DocumentMeta {
        id: doc.id.clone(),
        title: doc.title.clone(),
        regulator: doc.regulator.clone(),
        jurisdiction: doc.jurisdiction.clone(),
        pdf_name: pdf_path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| doc.pdf_path.clone()),
        chunk_id_prefix: doc.chunk_id_prefix().to_string(),
    }
}

pub fn document_output_dir(output_root: &Path, doc_id: &str) -> PathBuf {
    output_root.join(doc_id)
}

fn process_document(
    pipeline: &StructurePipeline,
    doc: &DocumentConfig,
    args: &IngestArgs,
) -> Result<(DocumentRunSummary, Vec<String>)> {
    let pdf_path = PathBuf::from(&doc.pdf_path);
    if !pdf_path.exists() {
        bail!("input document not found: {}", pdf_path.display());
    }

    info!(doc_id = %doc.id, path = %pdf_path.display(), "processing document");

    let source_sha256 = sha256_file(&pdf_path)?;
    let pages = PageStore::load(&pdf_path, args.max_pages_per_doc)
        .with_context(|| format!("failed to load pages for {}", doc.id))?;
    let meta = document_meta(doc, &pdf_path);

    let processed = pipeline.process(&pages, &meta, doc.max_content_page());

    let out_dir = document_output_dir(&args.output_root, &doc.id);
    ensure_directory(&out_dir)?;
    let chunks_path = out_dir.join("chunks.json");
    let qa_report_path = out_dir.join("qa_report.json");
    write_json_pretty(&chunks_path, &processed.chunks)?;
    write_json_pretty(&qa_report_path, &processed.qa_report)?;

    let summary = DocumentRunSummary {
        doc_id: doc.id.clone(),
        pdf_path: doc.pdf_path.clone(),
        source_sha256: Some(source_sha256),
        status: "completed".to_string(),
        page_count: pages.len(),
        usable_page_count: processed.usable_page_count,
        chapter_count: processed.chapters.len(),
        section_count: processed.section_count(),
        chunk_count: processed.chunks.len(),
        duplicate_id_count: processed.qa_report.duplicate_ids.len(),
        missing_clause_count: processed.qa_report.missing_clause_count(),
        chunks_path: Some(chunks_path.display().to_string()),
        qa_report_path: Some(qa_report_path.display().to_string()),
        error: None,
    };

    Ok((summary, processed.warnings))
}

fn summarize_counts(summaries: &[DocumentRunSummary]) -> IngestCounts {
    let failed_document_count = summaries
        .iter()
        .filter(|summary| summary.status == "failed")
        .count();

    IngestCounts {
        document_count: summaries.len(),
        processed_document_count: summaries.len() - failed_document_count,
        failed_document_count,
        chunks_total: summaries.iter().map(|summary| summary.chunk_count).sum(),
        duplicate_ids_total: summaries
            .iter()
            .map(|summary| summary.duplicate_id_count)
            .sum(),
    }
}

fn render_ingest_command(args: &IngestArgs) -> String {
    let mut command = vec![
        "regchunk".to_string(),
        "ingest".to_string(),
        "--config".to_string(),
        args.config.display().to_string(),
        "--output-root".to_string(),
        args.output_root.display().to_string(),
    ];

    if let Some(path) = &args.manifest_dir {
        command.push("--manifest-dir".to_string());
        command.push(path.display().to_string());
    }
    for doc_id in &args.doc_ids {
        command.push("--doc".to_string());
        command.push(doc_id.clone());
    }
    if let Some(max_pages) = args.max_pages_per_doc {
        command.push("--max-pages-per-doc".to_string());
        command.push(max_pages.to_string());
    }
    if args.toc_pages != DEFAULT_TOC_PAGES {
        command.push("--toc-pages".to_string());
        command.push(args.toc_pages.to_string());
    }
    if args.fail_fast {
        command.push("--fail-fast".to_string());
    }

    command.join(" ")
}
