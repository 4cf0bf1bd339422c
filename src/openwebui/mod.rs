use std::time::Duration;

use anyhow::Result;
use async_trait::async_trait;
use log::{debug, info};
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

use crate::config::Settings;
use crate::web::models::Message;

pub const CHAT_TIMEOUT: Duration = Duration::from_secs(120);
pub const UPLOAD_CONTENT_TYPE: &str = "application/pdf";

#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("unexpected response shape: {0}")]
    Shape(String),
}

/// The two calls this backend makes against Open WebUI.
#[async_trait]
pub trait OpenWebUiApi: Send + Sync {
    /// Runs a chat completion and returns `choices[0].message.content`.
    async fn send_chat_completion(
        &self,
        messages: &[Message],
        model: Option<&str>,
        file_ids: &[String],
    ) -> Result<String, UpstreamError>;

    /// Uploads a document and returns the id Open WebUI assigned to it.
    async fn upload_file(&self, bytes: Vec<u8>, filename: &str) -> Result<String, UpstreamError>;
}

#[derive(Debug, Serialize)]
pub struct FileRef<'a> {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct CompletionRequest<'a> {
    pub model: &'a str,
    pub messages: &'a [Message],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<FileRef<'a>>,
}

impl<'a> CompletionRequest<'a> {
    pub fn new(model: &'a str, messages: &'a [Message], file_ids: &'a [String]) -> Self {
        Self {
            model,
            messages,
            files: file_ids
                .iter()
                .map(|id| FileRef { kind: "file", id })
                .collect(),
        }
    }
}

// HTTP client for an Open WebUI instance
pub struct OpenWebUiClient {
    base_url: String,
    default_model: String,
    client: Client,
}

impl OpenWebUiClient {
    pub fn new(settings: &Settings) -> Result<Self> {
        info!("Using Open WebUI at: {}", settings.openwebui_url);

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", settings.api_key))
            .map_err(|e| anyhow::anyhow!("Invalid API key for Authorization header: {}", e))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);

        let client = Client::builder().default_headers(headers).build()?;

        Ok(Self {
            base_url: settings.openwebui_url.trim_end_matches('/').to_string(),
            default_model: settings.default_model.clone(),
            client,
        })
    }

    async fn check_status(response: Response) -> Result<Response, UpstreamError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        Err(UpstreamError::Status {
            status: status.as_u16(),
            body,
        })
    }

    async fn read_json(response: Response) -> Result<Value, UpstreamError> {
        let text = response.text().await?;
        serde_json::from_str(&text)
            .map_err(|e| UpstreamError::Shape(format!("response is not JSON: {}", e)))
    }
}

#[async_trait]
impl OpenWebUiApi for OpenWebUiClient {
    async fn send_chat_completion(
        &self,
        messages: &[Message],
        model: Option<&str>,
        file_ids: &[String],
    ) -> Result<String, UpstreamError> {
        let model = model.unwrap_or(&self.default_model);
        let payload = CompletionRequest::new(model, messages, file_ids);
        let url = format!("{}/api/chat/completions", self.base_url);

        info!(
            "Sending chat completion to Open WebUI (model: {}, files: {})",
            model,
            file_ids.len()
        );
        debug!("Payload: {:?}", payload);

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .timeout(CHAT_TIMEOUT)
            .send()
            .await?;
        let response = Self::check_status(response).await?;

        let response_json = Self::read_json(response).await?;
        debug!("Response JSON: {}", response_json);

        extract_content(&response_json)
    }

    async fn upload_file(&self, bytes: Vec<u8>, filename: &str) -> Result<String, UpstreamError> {
        let url = format!("{}/api/v1/files/", self.base_url);
        info!("Uploading {} ({} bytes) to Open WebUI", filename, bytes.len());

        let part = Part::bytes(bytes)
            .file_name(filename.to_string())
            .mime_str(UPLOAD_CONTENT_TYPE)?;
        let form = Form::new().part("file", part);

        let response = self.client.post(&url).multipart(form).send().await?;
        let response = Self::check_status(response).await?;

        let response_json = Self::read_json(response).await?;
        debug!("Response JSON: {}", response_json);

        extract_file_id(&response_json)
    }
}

/// Pulls the assistant reply out of a chat completion response.
pub fn extract_content(response: &Value) -> Result<String, UpstreamError> {
    response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(|content| content.as_str())
        .map(str::to_string)
        .ok_or_else(|| UpstreamError::Shape("missing choices[0].message.content".to_string()))
}

pub fn extract_file_id(response: &Value) -> Result<String, UpstreamError> {
    response
        .get("id")
        .and_then(|id| id.as_str())
        .map(str::to_string)
        .ok_or_else(|| UpstreamError::Shape("missing id".to_string()))
}
