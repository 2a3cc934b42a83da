pub mod config;
pub mod domains;
pub mod error;
pub mod ids;
pub mod interfaces;
pub mod providers;
pub mod services;

pub use crate::config::Config;
pub use crate::domains::state::{AppData, Record};
pub use crate::error::{DeskmateError, Result};
pub use crate::interfaces::providers::{ChatProvider, ChatRequest};
pub use crate::interfaces::storage::StateSlot;
pub use crate::services::controller::AppController;
