use crate::domains::records::{AppSettings, Message};
use crate::error::Result;
use crate::interfaces::providers::ChatRequest;

/// Appended as the assistant's turn whenever a completion fails, whatever
/// the cause.
pub const CHAT_ERROR_MESSAGE: &str =
    "Συγγνώμη, προέκυψε ένα σφάλμα κατά την επεξεργασία του αιτήματός σας.";

/// Whether `input` is worth sending at all.
pub fn is_sendable(input: &str) -> bool {
    !input.trim().is_empty()
}

pub fn build_request(history: &[Message], settings: &AppSettings) -> ChatRequest {
    ChatRequest {
        model: settings.model.clone(),
        api_key: settings.api_key.clone(),
        messages: history.to_vec(),
    }
}

/// The assistant turn recorded for a finished completion.
pub fn reply_message(result: Result<String>) -> Message {
    match result {
        Ok(text) => Message::assistant(text),
        Err(err) => {
            tracing::error!(error = %err, "chat completion failed");
            Message::assistant(CHAT_ERROR_MESSAGE)
        }
    }
}
