use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{info, warn};

use crate::cli::StatusArgs;
use crate::model::IngestRunManifest;
use crate::util::read_json;

pub fn run(args: StatusArgs) -> Result<()> {
    let manifest_dir = args.resolved_manifest_dir();

    info!(manifest_dir = %manifest_dir.display(), "status requested");

    let Some(manifest_path) = latest_run_manifest(&manifest_dir)? else {
        warn!(path = %manifest_dir.display(), "no ingest run manifest found");
        return Ok(());
    };

    let manifest: IngestRunManifest = read_json(&manifest_path)?;
    info!(
        path = %manifest_path.display(),
        run_id = %manifest.run_id,
        status = %manifest.status,
        started_at = %manifest.started_at,
        updated_at = %manifest.updated_at,
        documents = manifest.counts.document_count,
        failed = manifest.counts.failed_document_count,
        chunks = manifest.counts.chunks_total,
        duplicate_ids = manifest.counts.duplicate_ids_total,
        "loaded ingest run manifest"
    );

    for doc in &manifest.documents {
        if let Some(error) = &doc.error {
            warn!(doc_id = %doc.doc_id, status = %doc.status, error = %error, "document failed");
            continue;
        }

        info!(
            doc_id = %doc.doc_id,
            status = %doc.status,
            pages = doc.page_count,
            chapters = doc.chapter_count,
            sections = doc.section_count,
            chunks = doc.chunk_count,
            duplicate_ids = doc.duplicate_id_count,
            missing_clauses = doc.missing_clause_count,
            "document status"
        );
    }

    for warning in &manifest.warnings {
        warn!(warning = %warning, "ingest warning");
    }

    Ok(())
}

/// Newest `ingest_run_*.json`; the compact UTC stamp in the name sorts
/// chronologically.
pub fn latest_run_manifest(manifest_dir: &Path) -> Result<Option<PathBuf>> {
    if !manifest_dir.exists() {
        return Ok(None);
    }

    let entries = fs::read_dir(manifest_dir)
        .with_context(|| format!("failed to read {}", manifest_dir.display()))?;

    let mut manifests = Vec::new();
    for entry in entries {
        let entry =
            entry.with_context(|| format!("failed to read entry in {}", manifest_dir.display()))?;
        let path = entry.path();

        let is_run_manifest = path
            .file_name()
            .and_then(|name| name.to_str())
            .map(|name| name.starts_with("ingest_run_") && name.ends_with(".json"))
            .unwrap_or(false);

        if is_run_manifest {
            manifests.push(path);
        }
    }

    manifests.sort();
    Ok(manifests.pop())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn latest_run_manifest_picks_newest_stamp() {
        let dir = std::env::temp_dir().join(format!("regchunk_status_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("create temp manifest dir");
        for name in [
            "ingest_run_20250101T000000Z.json",
            "ingest_run_20250301T120000Z.json",
            "ingest_run_20250201T000000Z.json",
            "notes.json",
        ] {
            fs::write(dir.join(name), "{}").expect("write manifest stub");
        }

        let latest = latest_run_manifest(&dir).expect("scan manifest dir");
        let _ = fs::remove_dir_all(&dir);

        assert_eq!(
            latest.and_then(|path| path.file_name().map(|name| name.to_string_lossy().into_owned())),
            Some("ingest_run_20250301T120000Z.json".to_string())
        );
    }

    #[test]
    fn latest_run_manifest_is_none_for_missing_dir() {
        let dir = std::env::temp_dir().join("regchunk_status_missing_dir_never_created");
        assert_eq!(latest_run_manifest(&dir).expect("scan missing dir"), None);
    }
}
