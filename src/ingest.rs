use std::path::Path;

use log::{debug, warn};
use walkdir::WalkDir;

use crate::openwebui::OpenWebUiApi;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct IngestReport {
    pub uploaded: usize,
    pub failed: usize,
}

fn has_pdf_extension(name: &str) -> bool {
    name.to_lowercase().ends_with(".pdf")
}

/// Uploads every PDF under `root`, one file at a time. A failure on one file
/// is printed and counted, then the walk moves on.
pub async fn ingest_all_pdfs(client: &dyn OpenWebUiApi, root: &Path) -> IngestReport {
    let mut report = IngestReport::default();

    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                let path = e.path().unwrap_or(root).display().to_string();
                warn!("Skipping unreadable entry {}: {}", path, e);
                println!("❌ Error reading {}: {}", path, e);
                report.failed += 1;
                continue;
            }
        };

        // Symlinks are not followed by the walk, so resolve them here: a link
        // to a PDF is uploaded and a dangling one fails on read.
        if entry.path().is_dir() {
            continue;
        }

        let fname = entry.file_name().to_string_lossy().to_string();
        if !has_pdf_extension(&fname) {
            debug!("Skipping non-PDF file {}", entry.path().display());
            continue;
        }

        let result = match tokio::fs::read(entry.path()).await {
            Ok(bytes) => client.upload_file(bytes, &fname).await.map_err(anyhow::Error::from),
            Err(e) => Err(anyhow::Error::from(e)),
        };

        match result {
            Ok(file_id) => {
                println!("✅ {} uploaded as {}", fname, file_id);
                report.uploaded += 1;
            }
            Err(e) => {
                println!("❌ Error uploading {}: {}", fname, e);
                report.failed += 1;
            }
        }
    }

    report
}
