mod common;

use std::fmt::Debug;

use deskmate::domains::records::{
    AiAgent, CalendarEvent, Contact, Message, Note, SavedConversation, ScriptFormula,
};
use deskmate::ids::MAX_RECORD_ID;
use deskmate::providers::memory::MemorySlot;
use deskmate::services::persistence;
use deskmate::{AppController, Record};

use common::{memory_controller, sample_data};

fn exercise_collection<T>(first: T, second: T, edited: impl Fn(T) -> T)
where
    T: Record + PartialEq + Debug,
{
    let (mut controller, slot) = memory_controller();

    let stored = controller.add(first.clone());
    let mut expected = first.clone();
    expected.set_id(stored.id());
    assert_eq!(controller.get::<T>(stored.id()), Some(&expected));
    assert_eq!(stored, expected);

    let other = controller.add(second);
    assert_ne!(other.id(), stored.id());
    assert_eq!(controller.list::<T>().len(), 2);

    // Unknown id: edit and delete change nothing.
    let before = controller.list::<T>().to_vec();
    let mut stranger = first.clone();
    stranger.set_id(other.id() + 1_000);
    assert!(!controller.edit(stranger));
    assert!(!controller.delete::<T>(other.id() + 1_000));
    assert_eq!(controller.list::<T>(), before.as_slice());

    let changed = edited(stored.clone());
    assert!(controller.edit(changed.clone()));
    assert_eq!(controller.get::<T>(stored.id()), Some(&changed));
    assert_eq!(controller.list::<T>()[0], changed);

    assert!(controller.delete::<T>(stored.id()));
    assert_eq!(controller.list::<T>().len(), 1);
    assert!(controller.get::<T>(stored.id()).is_none());
    assert_eq!(controller.list::<T>()[0], other);

    // Every mutation was mirrored.
    let mut reader = slot.clone();
    let mirrored = persistence::load(&mut reader);
    assert_eq!(&mirrored, controller.data());
}

#[test]
fn notes_follow_collection_contract() {
    let data = sample_data();
    let note = data.notes[0].clone();
    let mut second = note.clone();
    second.content = "Buy milk".to_string();
    exercise_collection(note, second, |mut n| {
        n.keywords.push("urgent".to_string());
        n
    });
}

#[test]
fn contacts_follow_collection_contract() {
    let data = sample_data();
    let contact = data.contacts[0].clone();
    let second = Contact {
        first_name: "Alan".to_string(),
        ..contact.clone()
    };
    exercise_collection(contact, second, |mut c| {
        c.phone = "555".to_string();
        c
    });
}

#[test]
fn events_follow_collection_contract() {
    let data = sample_data();
    let event = data.events[0].clone();
    let second = CalendarEvent {
        title: "Gym".to_string(),
        ..event.clone()
    };
    exercise_collection(event, second, |mut e| {
        e.description = "moved".to_string();
        e
    });
}

#[test]
fn saved_conversations_follow_collection_contract() {
    let data = sample_data();
    let conversation = data.saved_conversations[0].clone();
    let second = SavedConversation {
        title: "Other".to_string(),
        messages: Vec::new(),
        ..conversation.clone()
    };
    exercise_collection(conversation, second, |mut c| {
        c.messages.push(Message::user("more"));
        c
    });
}

#[test]
fn scripts_follow_collection_contract() {
    let data = sample_data();
    let script = data.scripts[0].clone();
    let second = ScriptFormula {
        language: "javascript".to_string(),
        ..script.clone()
    };
    exercise_collection(script, second, |mut s| {
        s.code = "print(3)".to_string();
        s
    });
}

#[test]
fn agents_follow_collection_contract() {
    let data = sample_data();
    let agent = data.agents[0].clone();
    let second = AiAgent {
        attachment: None,
        ..agent.clone()
    };
    exercise_collection(agent, second, |mut a| {
        a.model = "gpt-4o".to_string();
        a
    });
}

#[test]
fn rapid_adds_never_reuse_ids() {
    let (mut controller, _slot) = memory_controller();
    let ids: Vec<i64> = (0..200)
        .map(|i| {
            controller
                .add(Note {
                    content: format!("note {i}"),
                    ..Note::default()
                })
                .id
        })
        .collect();
    assert!(ids.windows(2).all(|pair| pair[0] < pair[1]));
}

#[test]
fn new_ids_start_above_loaded_ids() {
    let mut data = sample_data();
    let far_future = MAX_RECORD_ID - 10;
    data.notes[0].id = far_future;
    let slot = MemorySlot::new("appData");
    let mut writer = slot.clone();
    persistence::try_save(&mut writer, &data).unwrap();

    let mut controller = AppController::open(Box::new(slot));
    let added = controller.add(ScriptFormula::default());
    assert_eq!(added.id, far_future + 1);
}

#[test]
fn imported_extreme_ids_do_not_pin_the_generator() {
    let (mut controller, _slot) = memory_controller();
    controller
        .import_json(r#"{"notes":[{"id":9223372036854775807,"content":"max"}],"scripts":[{"id":1e19}]}"#)
        .unwrap();
    let loaded = controller.list::<Note>()[0].id;

    let a = controller.add(Note::default()).id;
    let b = controller.add(Note::default()).id;
    assert_ne!(a, loaded);
    assert_ne!(b, loaded);
    assert!(a < b);
    assert!(controller.delete::<Note>(a));
    assert_eq!(controller.list::<Note>().len(), 2);
    assert!(controller.get::<Note>(b).is_some());
}

#[test]
fn reopening_restores_mutations() {
    let slot = MemorySlot::new("appData");
    let mut controller = AppController::open(Box::new(slot.clone()));
    let note = controller.add(Note {
        content: "persist me".to_string(),
        ..Note::default()
    });
    controller.update_settings(deskmate::domains::records::AppSettings {
        api_key: "sk-live".to_string(),
        model: "gpt-4o-mini".to_string(),
    });
    drop(controller);

    let reopened = AppController::open(Box::new(slot));
    assert_eq!(reopened.get::<Note>(note.id), Some(&note));
    assert_eq!(reopened.settings().api_key, "sk-live");
}

#[test]
fn failing_storage_does_not_block_mutations() {
    let mut controller = AppController::open(Box::new(MemorySlot::failing("appData")));
    let note = controller.add(Note::default());
    assert_eq!(controller.list::<Note>().len(), 1);
    assert!(controller.delete::<Note>(note.id));
}

#[test]
fn save_current_conversation_snapshots_messages() {
    let (mut controller, _slot) = memory_controller();
    controller.import_json(&serde_json::to_string(&sample_data()).unwrap()).unwrap();
    let saved = controller.save_current_conversation("Greeting");
    assert_eq!(saved.messages, sample_data().messages);
    assert!(saved.date.is_valid());
    assert_eq!(controller.list::<SavedConversation>().len(), 2);

    controller.clear_messages();
    assert!(controller.messages().is_empty());
    assert_eq!(
        controller.get::<SavedConversation>(saved.id).unwrap().messages.len(),
        2
    );
}
