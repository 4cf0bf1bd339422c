pub mod handlers;
pub mod models;
pub mod routes;

use crate::services::{ChatService, DocumentService};

// Shared by every worker, read-only after startup
pub struct AppState {
    pub chat: ChatService,
    pub documents: DocumentService,
}
