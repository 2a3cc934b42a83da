use std::sync::{Arc, Mutex};

use crate::error::{DeskmateError, Result};
use crate::interfaces::storage::StateSlot;

/// In-process slot. Clones share the same cell, so a test can keep a handle
/// and inspect what the controller wrote.
#[derive(Debug, Clone, Default)]
pub struct MemorySlot {
    name: String,
    cell: Arc<Mutex<Option<String>>>,
    fail_writes: bool,
}

impl MemorySlot {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cell: Arc::new(Mutex::new(None)),
            fail_writes: false,
        }
    }

    pub fn with_payload(name: impl Into<String>, payload: impl Into<String>) -> Self {
        let slot = Self::new(name);
        if let Ok(mut guard) = slot.cell.lock() {
            *guard = Some(payload.into());
        }
        slot
    }

    /// A slot whose writes always fail, like a storage quota being hit.
    pub fn failing(name: impl Into<String>) -> Self {
        Self {
            fail_writes: true,
            ..Self::new(name)
        }
    }

    pub fn payload(&self) -> Option<String> {
        self.cell.lock().ok().and_then(|guard| guard.clone())
    }
}

impl StateSlot for MemorySlot {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&mut self) -> Result<Option<String>> {
        let guard = self
            .cell
            .lock()
            .map_err(|e| DeskmateError::Storage(e.to_string()))?;
        Ok(guard.clone())
    }

    fn write(&mut self, payload: &str) -> Result<()> {
        if self.fail_writes {
            return Err(DeskmateError::Storage(format!(
                "slot {} rejected write",
                self.name
            )));
        }
        let mut guard = self
            .cell
            .lock()
            .map_err(|e| DeskmateError::Storage(e.to_string()))?;
        *guard = Some(payload.to_string());
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        let mut guard = self
            .cell
            .lock()
            .map_err(|e| DeskmateError::Storage(e.to_string()))?;
        *guard = None;
        Ok(())
    }
}
