use std::path::{Path, PathBuf};

use crate::domains::date::RecordDate;
use crate::domains::records::{AppSettings, Message, SavedConversation};
use crate::domains::state::{
    find_record, insert_record, remove_record, replace_record, AppData, Record,
};
use crate::error::Result;
use crate::ids::IdGenerator;
use crate::interfaces::providers::{ChatProvider, ChatRequest};
use crate::interfaces::storage::StateSlot;
use crate::services::{conversation, persistence, transfer};

/// Sole owner of the in-memory state. Every mutation goes through here and
/// is mirrored to the slot before the method returns.
pub struct AppController {
    data: AppData,
    ids: IdGenerator,
    slot: Box<dyn StateSlot>,
    draft: String,
}

impl AppController {
    /// Loads whatever the slot holds, or starts empty.
    pub fn open(mut slot: Box<dyn StateSlot>) -> Self {
        let data = persistence::load(slot.as_mut());
        let ids = IdGenerator::seeded(data.max_id());
        tracing::debug!(
            slot = slot.name(),
            notes = data.notes.len(),
            messages = data.messages.len(),
            "controller ready"
        );
        Self {
            data,
            ids,
            slot,
            draft: String::new(),
        }
    }

    pub fn data(&self) -> &AppData {
        &self.data
    }

    pub fn settings(&self) -> &AppSettings {
        &self.data.settings
    }

    pub fn messages(&self) -> &[Message] {
        &self.data.messages
    }

    pub fn list<T: Record>(&self) -> &[T] {
        T::collection(&self.data)
    }

    pub fn get<T: Record>(&self, id: i64) -> Option<&T> {
        find_record(T::collection(&self.data), id)
    }

    /// Appends `record` with a fresh id; any id it carried is discarded.
    pub fn add<T: Record>(&mut self, record: T) -> T {
        let id = self.ids.next_id();
        let stored = insert_record(T::collection_mut(&mut self.data), record, id);
        tracing::debug!(collection = T::COLLECTION, id, "record added");
        self.persist();
        stored
    }

    /// Replaces the record with the same id. Unknown ids change nothing.
    pub fn edit<T: Record>(&mut self, record: T) -> bool {
        let id = record.id();
        let replaced = replace_record(T::collection_mut(&mut self.data), record);
        if !replaced {
            tracing::debug!(collection = T::COLLECTION, id, "edit ignored, no such record");
        }
        self.persist();
        replaced
    }

    pub fn delete<T: Record>(&mut self, id: i64) -> bool {
        let removed = remove_record(T::collection_mut(&mut self.data), id);
        tracing::debug!(collection = T::COLLECTION, id, removed, "record delete");
        self.persist();
        removed
    }

    pub fn update_settings(&mut self, settings: AppSettings) {
        self.data.settings = settings;
        self.persist();
    }

    pub fn clear_messages(&mut self) {
        self.data.messages.clear();
        self.persist();
    }

    /// Files the current chat under `title` as a new saved conversation.
    pub fn save_current_conversation(&mut self, title: impl Into<String>) -> SavedConversation {
        let conversation = SavedConversation {
            id: 0,
            title: title.into(),
            date: RecordDate::now(),
            messages: self.data.messages.clone(),
        };
        self.add(conversation)
    }

    /// Replaces the whole state with the file's contents. On error nothing
    /// changes.
    pub fn import_json(&mut self, text: &str) -> Result<()> {
        let imported = transfer::import_json(text)?;
        self.replace_all(imported);
        Ok(())
    }

    pub fn import_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let imported = transfer::read_import_file(path.as_ref())?;
        tracing::info!(path = %path.as_ref().display(), "importing data");
        self.replace_all(imported);
        Ok(())
    }

    pub fn export_json(&self) -> Result<String> {
        transfer::export_json(&self.data)
    }

    pub fn export_to_dir(&self, dir: impl AsRef<Path>) -> Result<PathBuf> {
        transfer::export_to_dir(&self.data, dir)
    }

    pub fn set_draft(&mut self, text: impl Into<String>) {
        self.draft = text.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    /// Records the user's turn and returns the request to send. Blank input
    /// is ignored and yields `None`.
    pub fn begin_send(&mut self, input: &str) -> Option<ChatRequest> {
        if !conversation::is_sendable(input) {
            return None;
        }
        self.data.messages.push(Message::user(input));
        self.draft.clear();
        self.persist();
        Some(conversation::build_request(
            &self.data.messages,
            &self.data.settings,
        ))
    }

    /// Appends exactly one assistant turn for a completed request.
    pub fn finish_send(&mut self, result: Result<String>) -> Message {
        let reply = conversation::reply_message(result);
        self.data.messages.push(reply.clone());
        self.persist();
        reply
    }

    pub async fn send_message<P>(&mut self, provider: &P, input: &str) -> Option<Message>
    where
        P: ChatProvider + ?Sized,
    {
        let request = self.begin_send(input)?;
        let result = provider.complete(request).await;
        Some(self.finish_send(result))
    }

    pub async fn submit_draft<P>(&mut self, provider: &P) -> Option<Message>
    where
        P: ChatProvider + ?Sized,
    {
        let input = std::mem::take(&mut self.draft);
        let reply = self.send_message(provider, &input).await;
        if reply.is_none() {
            self.draft = input;
        }
        reply
    }

    fn replace_all(&mut self, data: AppData) {
        self.ids.observe(data.max_id());
        self.data = data;
        self.persist();
    }

    fn persist(&mut self) {
        persistence::save(self.slot.as_mut(), &self.data);
    }
}
