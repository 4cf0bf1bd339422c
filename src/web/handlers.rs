use actix_multipart::form::{bytes::Bytes, MultipartForm};
use actix_web::{web, HttpResponse, Responder};
use log::{error, info};
use serde_json::json;

use crate::services::UploadedFile;
use crate::web::models::{ChatRequest, ChatResponse, ErrorResponse, UploadResponse};
use crate::web::AppState;

#[derive(MultipartForm)]
pub struct UploadForm {
    pub file: Bytes,
}

fn bad_request(detail: &str) -> HttpResponse {
    HttpResponse::BadRequest().json(ErrorResponse {
        detail: detail.to_string(),
    })
}

fn is_pdf(filename: &str) -> bool {
    filename.to_lowercase().ends_with(".pdf")
}

// Health check endpoint
pub async fn health_check() -> impl Responder {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

// Chat API endpoint
pub async fn chat(data: web::Data<AppState>, req: web::Json<ChatRequest>) -> impl Responder {
    let ChatRequest { message, files } = req.into_inner();

    let Some(message) = message else {
        return bad_request("Missing 'message'");
    };

    let answer = data.chat.process_user_message(&message, &files).await;
    HttpResponse::Ok().json(ChatResponse { answer })
}

// Upload API endpoint. Only the filename is checked, not the content.
pub async fn upload(
    data: web::Data<AppState>,
    MultipartForm(form): MultipartForm<UploadForm>,
) -> impl Responder {
    let filename = form.file.file_name.clone().unwrap_or_default();
    if !is_pdf(&filename) {
        info!("Rejected upload of non-PDF file: {:?}", filename);
        return bad_request("Only PDF files allowed");
    }

    let file = UploadedFile {
        bytes: form.file.data.to_vec(),
        filename,
    };

    match data.documents.upload_document(file).await {
        Ok(file_id) => HttpResponse::Ok().json(UploadResponse { file_id }),
        Err(e) => {
            error!("Upload request failed: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse {
                detail: "Internal Server Error".to_string(),
            })
        }
    }
}
