pub mod chat;
pub mod document;

pub use chat::{ChatService, FALLBACK_ANSWER, SYSTEM_PROMPT};
pub use document::{DocumentService, UploadedFile};
