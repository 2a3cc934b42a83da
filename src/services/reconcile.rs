//! Rebuilds an [`AppData`] from whatever JSON we were handed, one field at a
//! time. A missing or malformed collection becomes empty without affecting
//! its siblings, and date fields are revived from text on the way in.

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::domains::records::{
    AiAgent, AppSettings, CalendarEvent, Contact, Message, Note, SavedConversation, ScriptFormula,
};
use crate::domains::state::{AppData, Record};

pub fn reconcile(root: &Map<String, Value>) -> AppData {
    AppData {
        notes: collection::<Note>(root, Note::COLLECTION),
        contacts: collection::<Contact>(root, Contact::COLLECTION),
        events: collection::<CalendarEvent>(root, CalendarEvent::COLLECTION),
        saved_conversations: collection::<SavedConversation>(root, SavedConversation::COLLECTION),
        scripts: collection::<ScriptFormula>(root, ScriptFormula::COLLECTION),
        agents: collection::<AiAgent>(root, AiAgent::COLLECTION),
        messages: collection::<Message>(root, "messages"),
        settings: settings(root),
    }
}

/// Decodes a single record object the same way a collection entry is
/// decoded. Returns `None` for non-objects.
pub fn record_from_value<T: DeserializeOwned>(value: Value) -> Option<T> {
    if !value.is_object() {
        return None;
    }
    serde_json::from_value(value).ok()
}

fn collection<T: DeserializeOwned>(root: &Map<String, Value>, key: &str) -> Vec<T> {
    let Some(Value::Array(items)) = root.get(key) else {
        if root.contains_key(key) {
            tracing::warn!(collection = key, "collection is not an array, using empty");
        }
        return Vec::new();
    };

    let mut records = Vec::with_capacity(items.len());
    let mut dropped = 0usize;
    for item in items {
        match record_from_value::<T>(item.clone()) {
            Some(record) => records.push(record),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        tracing::warn!(collection = key, dropped, "dropped malformed entries");
    }
    records
}

fn settings(root: &Map<String, Value>) -> AppSettings {
    root.get("settings")
        .cloned()
        .and_then(record_from_value::<AppSettings>)
        .unwrap_or_default()
}
