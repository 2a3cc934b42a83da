use clap::{Parser, Subcommand, ValueEnum};
use console::style;
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{Map, Value};
use time::OffsetDateTime;
use tracing_subscriber::EnvFilter;

use deskmate::config::Config;
use deskmate::domains::calendar::{month_agenda, shift_month};
use deskmate::domains::date::RecordDate;
use deskmate::domains::records::{
    join_tag_list, parse_tag_list, AiAgent, CalendarEvent, Contact, Message, Note, Role,
    SavedConversation, ScriptFormula, SUPPORTED_MODELS,
};
use deskmate::error::{DeskmateError, Result};
use deskmate::providers::openai::OpenAiChat;
use deskmate::providers::sqlite::SqliteSlot;
use deskmate::services::reconcile::record_from_value;
use deskmate::services::transfer::{EXPORT_CONTENT_TYPE, IMPORT_ERROR_NOTICE};
use deskmate::{AppController, Record};

#[derive(Parser, Debug)]
#[command(name = "deskmate")]
#[command(about = "Notes, contacts, calendar and an assistant chat, kept in one local store")]
struct Cli {
    #[arg(long, env = "DESKMATE_CONFIG")]
    config: Option<String>,

    #[arg(long, env = "DESKMATE_DB")]
    db: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    List {
        collection: Collection,
    },
    Add {
        collection: Collection,
        #[arg(long, default_value = "{}")]
        json: String,
        /// Comma separated keywords (notes) or skills (agents).
        #[arg(long)]
        tags: Option<String>,
    },
    Edit {
        collection: Collection,
        #[arg(long)]
        json: String,
        #[arg(long)]
        tags: Option<String>,
    },
    Delete {
        collection: Collection,
        #[arg(long)]
        id: i64,
    },
    Chat {
        text: Vec<String>,
    },
    History,
    ClearChat,
    SaveChat {
        #[arg(long)]
        title: String,
    },
    Calendar {
        #[arg(long)]
        year: Option<i32>,
        #[arg(long)]
        month: Option<u8>,
        #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
        shift: i32,
    },
    Settings {
        #[command(subcommand)]
        command: SettingsCommand,
    },
    Export {
        #[arg(long, default_value = ".")]
        dir: String,
    },
    Import {
        #[arg(long)]
        path: String,
    },
}

#[derive(Subcommand, Debug)]
enum SettingsCommand {
    Show,
    Set {
        #[arg(long)]
        api_key: Option<String>,
        #[arg(long)]
        model: Option<String>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug)]
enum Collection {
    Notes,
    Contacts,
    Events,
    Conversations,
    Scripts,
    Agents,
}

impl Collection {
    /// Date field stamped with the current time when an added record omits it.
    fn date_field(self) -> Option<&'static str> {
        match self {
            Self::Notes | Self::Events | Self::Conversations => Some("date"),
            Self::Contacts => Some("dateOfBirth"),
            Self::Scripts | Self::Agents => None,
        }
    }

    fn tag_field(self) -> Option<&'static str> {
        match self {
            Self::Notes => Some("keywords"),
            Self::Agents => Some("skills"),
            _ => None,
        }
    }
}

/// Builds the record fields from `--json`, with `--tags` filling the
/// collection's tag list.
fn record_fields(
    collection: Collection,
    json: &str,
    tags: Option<&str>,
) -> Result<Map<String, Value>> {
    let mut map = parse_object(json)?;
    let Some(tags) = tags else {
        return Ok(map);
    };
    let field = collection.tag_field().ok_or_else(|| {
        DeskmateError::Runtime(format!("{collection:?} records have no tag list"))
    })?;
    let items = parse_tag_list(tags);
    println!("{} {}", style(field).dim(), join_tag_list(&items));
    map.insert(field.to_string(), Value::from(items));
    Ok(map)
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value)
        .map_err(|e| DeskmateError::Serialization(e.to_string()))?;
    println!("{text}");
    Ok(())
}

fn parse_object(json: &str) -> Result<Map<String, Value>> {
    match serde_json::from_str::<Value>(json) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(_) => Err(DeskmateError::Runtime(
            "record must be a JSON object".to_string(),
        )),
        Err(e) => Err(DeskmateError::Serialization(e.to_string())),
    }
}

fn decode_record<T: DeserializeOwned>(map: Map<String, Value>) -> Result<T> {
    record_from_value(Value::Object(map))
        .ok_or_else(|| DeskmateError::Runtime("record could not be decoded".to_string()))
}

fn add_record<T>(
    controller: &mut AppController,
    mut map: Map<String, Value>,
    date_field: Option<&str>,
) -> Result<()>
where
    T: Record + Serialize + DeserializeOwned,
{
    if let Some(field) = date_field {
        if !map.contains_key(field) {
            let now = serde_json::to_value(RecordDate::now())
                .map_err(|e| DeskmateError::Serialization(e.to_string()))?;
            map.insert(field.to_string(), now);
        }
    }
    let stored = controller.add(decode_record::<T>(map)?);
    print_json(&stored)
}

/// Applies the given fields on top of the stored record with the same id.
fn edit_record<T>(controller: &mut AppController, patch: Map<String, Value>) -> Result<()>
where
    T: Record + Serialize + DeserializeOwned,
{
    let id = patch
        .get("id")
        .and_then(Value::as_i64)
        .ok_or_else(|| DeskmateError::Runtime("edit requires a numeric \"id\"".to_string()))?;
    let Some(existing) = controller.get::<T>(id) else {
        println!("{} no {} record with id {id}", style("!").yellow(), T::COLLECTION);
        return Ok(());
    };
    let mut merged = match serde_json::to_value(existing) {
        Ok(Value::Object(map)) => map,
        Ok(_) => Map::new(),
        Err(e) => return Err(DeskmateError::Serialization(e.to_string())),
    };
    merged.extend(patch);
    let record = decode_record::<T>(merged)?;
    controller.edit(record.clone());
    print_json(&record)
}

fn delete_record<T: Record>(controller: &mut AppController, id: i64) {
    if controller.delete::<T>(id) {
        println!("Deleted {} {id}", T::COLLECTION);
    } else {
        println!("{} no {} record with id {id}", style("!").yellow(), T::COLLECTION);
    }
}

fn print_message(message: &Message) {
    match message.role {
        Role::User => println!(
            "{} {}",
            style("➜ You").color256(81).bold(),
            message.content
        ),
        Role::Assistant => println!(
            "{} {}",
            style("✦ Assistant").color256(214).bold(),
            message.content
        ),
    }
}

fn print_calendar(controller: &AppController, year: i32, month: u8) -> Result<()> {
    let agenda = month_agenda(&controller.data().events, year, month)?;
    println!("{}", style(format!("{year}-{month:02}")).bold());
    for day in agenda {
        println!("{:>2} {}", day.day, style(day.weekday).color256(250));
        for event in day.events {
            println!(
                "     [{}] {} {}",
                event.id,
                style(&event.title).bold(),
                event.description
            );
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,deskmate=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => Config::from_file(path)?,
        None => Config::default(),
    };
    if let Some(db) = &cli.db {
        config = config.with_sqlite_path(db);
    }

    let slot = SqliteSlot::open(config.sqlite_path(), config.slot_name())?;
    let mut controller = AppController::open(Box::new(slot));

    match cli.command {
        Commands::List { collection } => match collection {
            Collection::Notes => print_json(controller.list::<Note>())?,
            Collection::Contacts => print_json(controller.list::<Contact>())?,
            Collection::Events => print_json(controller.list::<CalendarEvent>())?,
            Collection::Conversations => print_json(controller.list::<SavedConversation>())?,
            Collection::Scripts => print_json(controller.list::<ScriptFormula>())?,
            Collection::Agents => print_json(controller.list::<AiAgent>())?,
        },
        Commands::Add {
            collection,
            json,
            tags,
        } => {
            let fields = record_fields(collection, &json, tags.as_deref())?;
            let date_field = collection.date_field();
            match collection {
                Collection::Notes => add_record::<Note>(&mut controller, fields, date_field)?,
                Collection::Contacts => add_record::<Contact>(&mut controller, fields, date_field)?,
                Collection::Events => {
                    add_record::<CalendarEvent>(&mut controller, fields, date_field)?
                }
                Collection::Conversations => {
                    add_record::<SavedConversation>(&mut controller, fields, date_field)?
                }
                Collection::Scripts => {
                    add_record::<ScriptFormula>(&mut controller, fields, date_field)?
                }
                Collection::Agents => add_record::<AiAgent>(&mut controller, fields, date_field)?,
            }
        }
        Commands::Edit {
            collection,
            json,
            tags,
        } => {
            let patch = record_fields(collection, &json, tags.as_deref())?;
            match collection {
                Collection::Notes => edit_record::<Note>(&mut controller, patch)?,
                Collection::Contacts => edit_record::<Contact>(&mut controller, patch)?,
                Collection::Events => edit_record::<CalendarEvent>(&mut controller, patch)?,
                Collection::Conversations => {
                    edit_record::<SavedConversation>(&mut controller, patch)?
                }
                Collection::Scripts => edit_record::<ScriptFormula>(&mut controller, patch)?,
                Collection::Agents => edit_record::<AiAgent>(&mut controller, patch)?,
            }
        }
        Commands::Delete { collection, id } => match collection {
            Collection::Notes => delete_record::<Note>(&mut controller, id),
            Collection::Contacts => delete_record::<Contact>(&mut controller, id),
            Collection::Events => delete_record::<CalendarEvent>(&mut controller, id),
            Collection::Conversations => delete_record::<SavedConversation>(&mut controller, id),
            Collection::Scripts => delete_record::<ScriptFormula>(&mut controller, id),
            Collection::Agents => delete_record::<AiAgent>(&mut controller, id),
        },
        Commands::Chat { text } => {
            if controller.settings().api_key.trim().is_empty() {
                tracing::warn!("no API key configured, run `deskmate settings set --api-key`");
            }
            let provider = OpenAiChat::new(Some(config.openai_base_url()));
            controller.set_draft(text.join(" "));
            match controller.submit_draft(&provider).await {
                Some(reply) => print_message(&reply),
                None => println!("{} nothing to send", style("!").yellow()),
            }
        }
        Commands::History => {
            for message in controller.messages() {
                print_message(message);
            }
        }
        Commands::ClearChat => {
            controller.clear_messages();
            println!("Chat cleared.");
        }
        Commands::SaveChat { title } => {
            let saved = controller.save_current_conversation(title);
            println!(
                "Saved conversation {} ({} messages)",
                saved.id,
                saved.messages.len()
            );
        }
        Commands::Calendar { year, month, shift } => {
            let today = OffsetDateTime::now_utc();
            let year = year.unwrap_or_else(|| today.year());
            let month = month.unwrap_or_else(|| u8::from(today.month()));
            let (year, month) = shift_month(year, month, shift);
            print_calendar(&controller, year, month)?;
        }
        Commands::Settings { command } => match command {
            SettingsCommand::Show => {
                let settings = controller.settings();
                let key_state = if settings.api_key.is_empty() {
                    "not set"
                } else {
                    "set"
                };
                println!("model:   {}", settings.model);
                println!("api key: {key_state}");
            }
            SettingsCommand::Set { api_key, model } => {
                let mut settings = controller.settings().clone();
                if let Some(api_key) = api_key {
                    settings.api_key = api_key;
                }
                if let Some(model) = model {
                    settings.model = model;
                }
                if !settings.has_supported_model() {
                    tracing::warn!(
                        model = %settings.model,
                        supported = ?SUPPORTED_MODELS,
                        "model is not one of the supported tags"
                    );
                }
                controller.update_settings(settings);
                println!("Settings saved.");
            }
        },
        Commands::Export { dir } => {
            let path = controller.export_to_dir(&dir)?;
            println!("Exported to {} ({EXPORT_CONTENT_TYPE})", path.display());
        }
        Commands::Import { path } => {
            if let Err(err) = controller.import_file(&path) {
                eprintln!("{}", style(IMPORT_ERROR_NOTICE).red());
                return Err(err);
            }
            println!("Imported {path}");
        }
    }

    Ok(())
}
