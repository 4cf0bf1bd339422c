use std::sync::Arc;

use log::{error, info};

use crate::openwebui::{OpenWebUiApi, UpstreamError};

/// A file received from a client, fully buffered.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub bytes: Vec<u8>,
    pub filename: String,
}

pub struct DocumentService {
    client: Arc<dyn OpenWebUiApi>,
}

impl DocumentService {
    pub fn new(client: Arc<dyn OpenWebUiApi>) -> Self {
        Self { client }
    }

    /// Forwards the document to Open WebUI. Errors are logged and returned
    /// to the caller unchanged.
    pub async fn upload_document(&self, file: UploadedFile) -> Result<String, UpstreamError> {
        let UploadedFile { bytes, filename } = file;
        info!("Uploading document: {}", filename);

        match self.client.upload_file(bytes, &filename).await {
            Ok(file_id) => {
                info!("Uploaded document with ID: {}", file_id);
                Ok(file_id)
            }
            Err(e) => {
                error!("Document upload failed: {}", e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::openwebui::testing::FakeOpenWebUi;

    #[actix_web::test]
    async fn returns_upstream_id() {
        let fake = Arc::new(FakeOpenWebUi::answering(""));
        let service = DocumentService::new(fake.clone());

        let id = service
            .upload_document(UploadedFile {
                bytes: b"%PDF-1.4".to_vec(),
                filename: "syllabus.pdf".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(id, "file-1");
        assert_eq!(fake.uploaded_names(), vec!["syllabus.pdf".to_string()]);
    }

    #[actix_web::test]
    async fn propagates_upload_errors() {
        let fake = Arc::new(FakeOpenWebUi::answering("").failing_upload_of("broken.pdf"));
        let service = DocumentService::new(fake);

        let err = service
            .upload_document(UploadedFile {
                bytes: Vec::new(),
                filename: "broken.pdf".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, UpstreamError::Status { status: 500, .. }));
    }
}
