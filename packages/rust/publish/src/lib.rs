//! Publication step: persists rendered documents to the output directory.
//!
//! The previous entity-scoped subtree is removed first so records deleted
//! from the catalog do not linger as stale pages. Each document is written
//! atomically (temp file, then rename) and its checksum recorded, so a build
//! report can account for every published byte. Paths derive solely from
//! entity id and document kind — the publisher never inspects content.

use std::path::{Path, PathBuf};

use sha2::{Digest, Sha256};
use tracing::{debug, info, instrument};

use placepress_shared::{Document, ENTITY_ROOT, PlacepressError, Result};

/// Metadata for a single published document.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PublishedDoc {
    pub rel_path: String,
    pub sha256: String,
    pub size_bytes: usize,
}

/// Outcome of a successful publication.
#[derive(Debug)]
pub struct PublishResult {
    /// Absolute or caller-relative output directory.
    pub out_dir: PathBuf,
    /// One entry per written document, in input order.
    pub documents: Vec<PublishedDoc>,
}

/// Write all documents under `out_dir`, replacing any prior entity output.
#[instrument(skip_all, fields(out_dir = %out_dir.display(), doc_count = documents.len()))]
pub fn publish(out_dir: &Path, documents: &[Document]) -> Result<PublishResult> {
    let entity_dir = out_dir.join(ENTITY_ROOT);
    if entity_dir.exists() {
        std::fs::remove_dir_all(&entity_dir)
            .map_err(|e| PlacepressError::io(&entity_dir, e))?;
        debug!(path = %entity_dir.display(), "removed previous entity output");
    }

    std::fs::create_dir_all(out_dir).map_err(|e| PlacepressError::io(out_dir, e))?;

    let mut metas = Vec::with_capacity(documents.len());
    for doc in documents {
        metas.push(write_document(out_dir, doc)?);
    }

    info!(count = metas.len(), "publication complete");

    Ok(PublishResult {
        out_dir: out_dir.to_path_buf(),
        documents: metas,
    })
}

/// Write one document atomically and return its metadata.
fn write_document(out_dir: &Path, doc: &Document) -> Result<PublishedDoc> {
    let target = out_dir.join(&doc.rel_path);

    if let Some(parent) = target.parent() {
        std::fs::create_dir_all(parent).map_err(|e| PlacepressError::io(parent, e))?;
    }

    let file_name = target
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document".to_string());
    let temp = target.with_file_name(format!(".{file_name}.tmp"));

    std::fs::write(&temp, &doc.content).map_err(|e| PlacepressError::io(&temp, e))?;
    std::fs::rename(&temp, &target).map_err(|e| PlacepressError::io(&target, e))?;

    let mut hasher = Sha256::new();
    hasher.update(doc.content.as_bytes());
    let hash = format!("{:x}", hasher.finalize());

    debug!(path = %doc.rel_path, size = doc.content.len(), "wrote document");

    Ok(PublishedDoc {
        rel_path: doc.rel_path.clone(),
        sha256: hash,
        size_bytes: doc.content.len(),
    })
}
