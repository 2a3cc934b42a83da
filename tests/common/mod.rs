#![allow(dead_code)]

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use deskmate::domains::date::RecordDate;
use deskmate::domains::records::{
    AiAgent, AppSettings, CalendarEvent, Contact, Message, Note, SavedConversation, ScriptFormula,
};
use deskmate::error::{DeskmateError, Result};
use deskmate::interfaces::providers::{ChatProvider, ChatRequest};
use deskmate::providers::memory::MemorySlot;
use deskmate::{AppController, AppData};

/// Replies from a queue and remembers every request it saw.
pub struct QueueChatProvider {
    replies: Mutex<VecDeque<Result<String>>>,
    pub requests: Mutex<Vec<ChatRequest>>,
}

impl QueueChatProvider {
    pub fn new(replies: Vec<Result<String>>) -> Self {
        Self {
            replies: Mutex::new(VecDeque::from(replies)),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

#[async_trait]
impl ChatProvider for QueueChatProvider {
    async fn complete(&self, request: ChatRequest) -> Result<String> {
        self.requests.lock().await.push(request);
        self.replies
            .lock()
            .await
            .pop_front()
            .unwrap_or_else(|| Err(DeskmateError::Http("queue exhausted".to_string())))
    }
}

pub fn memory_controller() -> (AppController, MemorySlot) {
    let slot = MemorySlot::new("appData");
    let controller = AppController::open(Box::new(slot.clone()));
    (controller, slot)
}

pub fn sample_data() -> AppData {
    AppData {
        notes: vec![Note {
            id: 1_700_000_000_001,
            date: RecordDate::parse("2024-04-01T09:30:00Z"),
            content: "Renew passport".to_string(),
            keywords: vec!["admin".to_string(), "travel".to_string()],
        }],
        contacts: vec![Contact {
            id: 1_700_000_000_002,
            photo: "https://example.com/ada.png".to_string(),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            profession: "Mathematician".to_string(),
            email: "ada@example.com".to_string(),
            phone: "+44 20 0000 0000".to_string(),
            personality_description: "Curious".to_string(),
            relationship_type: "mentor".to_string(),
            date_of_birth: RecordDate::parse("1815-12-10T00:00:00Z"),
            address: "London".to_string(),
        }],
        events: vec![CalendarEvent {
            id: 1_700_000_000_003,
            title: "Dentist".to_string(),
            date: RecordDate::parse("2024-04-15T14:00:00.500Z"),
            description: "Check-up".to_string(),
        }],
        saved_conversations: vec![SavedConversation {
            id: 1_700_000_000_004,
            title: "Trip ideas".to_string(),
            date: RecordDate::parse("2024-03-20T18:45:00Z"),
            messages: vec![
                Message::user("Where should I go?"),
                Message::assistant("Try Crete."),
            ],
        }],
        scripts: vec![ScriptFormula {
            id: 1_700_000_000_005,
            name: "sum".to_string(),
            description: "adds numbers".to_string(),
            code: "print(1 + 2)".to_string(),
            language: "python".to_string(),
        }],
        agents: vec![AiAgent {
            id: 1_700_000_000_006,
            name: "Planner".to_string(),
            prompt: "You plan trips.".to_string(),
            skills: vec!["maps".to_string(), "budgets".to_string()],
            attachment: Some("itinerary.txt".to_string()),
            model: "gpt-4o-mini".to_string(),
        }],
        messages: vec![Message::user("hi"), Message::assistant("hello")],
        settings: AppSettings {
            api_key: "sk-test".to_string(),
            model: "gpt-4o-mini".to_string(),
        },
    }
}
