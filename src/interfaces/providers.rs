use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domains::records::Message;
use crate::error::Result;

/// Everything one completion call needs, captured at send time so the
/// controller stays free while the request is in flight.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub model: String,
    pub api_key: String,
    pub messages: Vec<Message>,
}

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// Returns the assistant reply text for the full message history.
    async fn complete(&self, request: ChatRequest) -> Result<String>;
}
