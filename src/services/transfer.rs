use std::fs;
use std::path::{Path, PathBuf};

use crate::domains::state::AppData;
use crate::error::{DeskmateError, Result};
use crate::services::persistence::decode;

pub const EXPORT_FILE_NAME: &str = "data.json";
pub const EXPORT_CONTENT_TYPE: &str = "application/json";

/// Shown to the user when an import file cannot be read.
pub const IMPORT_ERROR_NOTICE: &str = "Σφάλμα κατά την εισαγωγή των δεδομένων. Βεβαιωθείτε ότι το αρχείο είναι σε έγκυρη μορφή JSON.";

/// Pretty-printed aggregate, two-space indented.
pub fn export_json(data: &AppData) -> Result<String> {
    serde_json::to_string_pretty(data).map_err(|e| DeskmateError::Serialization(e.to_string()))
}

/// Writes the export under its fixed file name inside `dir`.
pub fn export_to_dir(data: &AppData, dir: impl AsRef<Path>) -> Result<PathBuf> {
    let dir = dir.as_ref();
    fs::create_dir_all(dir).map_err(|e| DeskmateError::Runtime(e.to_string()))?;
    let path = dir.join(EXPORT_FILE_NAME);
    fs::write(&path, export_json(data)?).map_err(|e| DeskmateError::Runtime(e.to_string()))?;
    tracing::info!(path = %path.display(), "exported data");
    Ok(path)
}

pub fn import_json(text: &str) -> Result<AppData> {
    decode(text).map_err(|e| match e {
        DeskmateError::Serialization(msg) => DeskmateError::Import(msg),
        other => other,
    })
}

pub fn read_import_file(path: impl AsRef<Path>) -> Result<AppData> {
    let text =
        fs::read_to_string(path.as_ref()).map_err(|e| DeskmateError::Import(e.to_string()))?;
    import_json(&text)
}
