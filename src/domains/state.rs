use serde::{Deserialize, Serialize};

use crate::domains::records::{
    AiAgent, AppSettings, CalendarEvent, Contact, Message, Note, SavedConversation, ScriptFormula,
};

/// The whole persisted aggregate: seven collections plus the settings
/// singleton. Field order matches the stored and exported JSON.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppData {
    pub notes: Vec<Note>,
    pub contacts: Vec<Contact>,
    pub events: Vec<CalendarEvent>,
    pub saved_conversations: Vec<SavedConversation>,
    pub scripts: Vec<ScriptFormula>,
    pub agents: Vec<AiAgent>,
    pub messages: Vec<Message>,
    pub settings: AppSettings,
}

impl AppData {
    /// Largest record id across every identified collection.
    pub fn max_id(&self) -> Option<i64> {
        let notes = self.notes.iter().map(|r| r.id);
        let contacts = self.contacts.iter().map(|r| r.id);
        let events = self.events.iter().map(|r| r.id);
        let conversations = self.saved_conversations.iter().map(|r| r.id);
        let scripts = self.scripts.iter().map(|r| r.id);
        let agents = self.agents.iter().map(|r| r.id);
        notes
            .chain(contacts)
            .chain(events)
            .chain(conversations)
            .chain(scripts)
            .chain(agents)
            .max()
    }
}

/// An identified record that lives in one of the aggregate's collections.
pub trait Record: Clone {
    /// Collection key as it appears in the stored JSON.
    const COLLECTION: &'static str;

    fn id(&self) -> i64;
    fn set_id(&mut self, id: i64);
    fn collection(data: &AppData) -> &Vec<Self>;
    fn collection_mut(data: &mut AppData) -> &mut Vec<Self>;
}

macro_rules! impl_record {
    ($ty:ty, $key:literal, $field:ident) => {
        impl Record for $ty {
            const COLLECTION: &'static str = $key;

            fn id(&self) -> i64 {
                self.id
            }

            fn set_id(&mut self, id: i64) {
                self.id = id;
            }

            fn collection(data: &AppData) -> &Vec<Self> {
                &data.$field
            }

            fn collection_mut(data: &mut AppData) -> &mut Vec<Self> {
                &mut data.$field
            }
        }
    };
}

impl_record!(Note, "notes", notes);
impl_record!(Contact, "contacts", contacts);
impl_record!(CalendarEvent, "events", events);
impl_record!(SavedConversation, "savedConversations", saved_conversations);
impl_record!(ScriptFormula, "scripts", scripts);
impl_record!(AiAgent, "agents", agents);

/// Appends `record` under `id`. The caller supplies a fresh id.
pub fn insert_record<T: Record>(records: &mut Vec<T>, mut record: T, id: i64) -> T {
    record.set_id(id);
    records.push(record.clone());
    record
}

/// Replaces the record sharing `record`'s id. Returns false and leaves the
/// collection untouched when no such record exists.
pub fn replace_record<T: Record>(records: &mut [T], record: T) -> bool {
    match records.iter_mut().find(|existing| existing.id() == record.id()) {
        Some(slot) => {
            *slot = record;
            true
        }
        None => false,
    }
}

/// Removes every record with `id`. Returns whether anything was removed.
pub fn remove_record<T: Record>(records: &mut Vec<T>, id: i64) -> bool {
    let before = records.len();
    records.retain(|record| record.id() != id);
    records.len() != before
}

pub fn find_record<T: Record>(records: &[T], id: i64) -> Option<&T> {
    records.iter().find(|record| record.id() == id)
}
