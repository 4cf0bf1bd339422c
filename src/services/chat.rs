use std::sync::Arc;

use log::{error, info};

use crate::openwebui::OpenWebUiApi;
use crate::web::models::Message;

pub const SYSTEM_PROMPT: &str = "You are the University AI Assistant. Answer based on facts.";
pub const FALLBACK_ANSWER: &str = "⚠️ Sorry, I couldn't process your request right now.";

pub struct ChatService {
    client: Arc<dyn OpenWebUiApi>,
    model: String,
}

impl ChatService {
    pub fn new(client: Arc<dyn OpenWebUiApi>, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Asks the assistant about `user_message`. Never fails: any upstream
    /// error is logged and answered with [`FALLBACK_ANSWER`].
    pub async fn process_user_message(&self, user_message: &str, file_ids: &[String]) -> String {
        info!(
            "Processing user message: {} with files {:?}",
            user_message, file_ids
        );

        let messages = [Message::system(SYSTEM_PROMPT), Message::user(user_message)];

        match self
            .client
            .send_chat_completion(&messages, Some(self.model.as_str()), file_ids)
            .await
        {
            Ok(answer) => {
                info!("Received answer: {}", answer);
                answer
            }
            Err(e) => {
                error!("Chat completion failed: {:?}", e);
                FALLBACK_ANSWER.to_string()
            }
        }
    }
}
