use serde_json::Value;

use crate::domains::state::AppData;
use crate::error::{DeskmateError, Result};
use crate::interfaces::storage::StateSlot;
use crate::services::reconcile::reconcile;

/// Parses a stored or imported payload into the aggregate. Fails only when
/// the text is not JSON or its top level is not an object; everything
/// below that is reconciled field by field.
pub fn decode(payload: &str) -> Result<AppData> {
    let value: Value =
        serde_json::from_str(payload).map_err(|e| DeskmateError::Serialization(e.to_string()))?;
    let Value::Object(root) = value else {
        return Err(DeskmateError::Serialization(
            "expected a JSON object at the top level".to_string(),
        ));
    };
    Ok(reconcile(&root))
}

pub fn encode(data: &AppData) -> Result<String> {
    serde_json::to_string(data).map_err(|e| DeskmateError::Serialization(e.to_string()))
}

/// Loads the aggregate from `slot`. Never fails: an empty slot, a read error
/// or an unreadable payload all produce the default state.
pub fn load(slot: &mut dyn StateSlot) -> AppData {
    let payload = match slot.read() {
        Ok(Some(payload)) => payload,
        Ok(None) => {
            tracing::info!(slot = slot.name(), "no stored state, starting empty");
            return AppData::default();
        }
        Err(err) => {
            tracing::warn!(slot = slot.name(), error = %err, "failed to read stored state");
            return AppData::default();
        }
    };

    match decode(&payload) {
        Ok(data) => data,
        Err(err) => {
            tracing::warn!(slot = slot.name(), error = %err, "stored state unreadable, starting empty");
            AppData::default()
        }
    }
}

pub fn try_save(slot: &mut dyn StateSlot, data: &AppData) -> Result<()> {
    let payload = encode(data)?;
    slot.write(&payload)
}

/// Mirrors `data` into `slot`. Failures are logged and dropped.
pub fn save(slot: &mut dyn StateSlot, data: &AppData) {
    if let Err(err) = try_save(slot, data) {
        tracing::warn!(slot = slot.name(), error = %err, "failed to persist state");
    }
}
