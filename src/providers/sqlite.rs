use std::path::Path;

use diesel::prelude::*;
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use time::OffsetDateTime;

use crate::error::{DeskmateError, Result};
use crate::interfaces::storage::StateSlot;

mod schema;
use schema::app_slots;

const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

#[derive(Insertable)]
#[diesel(table_name = app_slots)]
struct NewSlotRow<'a> {
    name: &'a str,
    payload: &'a str,
    updated_at: i64,
}

/// A named slot stored as one row of the `app_slots` table.
pub struct SqliteSlot {
    conn: SqliteConnection,
    name: String,
}

impl SqliteSlot {
    pub fn open(sqlite_path: impl AsRef<str>, name: impl Into<String>) -> Result<Self> {
        let sqlite_path = sqlite_path.as_ref();
        ensure_parent_dir(sqlite_path)?;
        let mut conn = SqliteConnection::establish(sqlite_path)
            .map_err(|e| DeskmateError::Storage(e.to_string()))?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| DeskmateError::Storage(e.to_string()))?;
        let name = name.into();
        tracing::debug!(path = sqlite_path, slot = %name, "opened sqlite slot");
        Ok(Self { conn, name })
    }
}

impl StateSlot for SqliteSlot {
    fn name(&self) -> &str {
        &self.name
    }

    fn read(&mut self) -> Result<Option<String>> {
        app_slots::table
            .filter(app_slots::name.eq(&self.name))
            .select(app_slots::payload)
            .first::<String>(&mut self.conn)
            .optional()
            .map_err(|e| DeskmateError::Storage(e.to_string()))
    }

    fn write(&mut self, payload: &str) -> Result<()> {
        let row = NewSlotRow {
            name: &self.name,
            payload,
            updated_at: OffsetDateTime::now_utc().unix_timestamp(),
        };
        diesel::replace_into(app_slots::table)
            .values(&row)
            .execute(&mut self.conn)
            .map_err(|e| DeskmateError::Storage(e.to_string()))?;
        Ok(())
    }

    fn clear(&mut self) -> Result<()> {
        diesel::delete(app_slots::table.filter(app_slots::name.eq(&self.name)))
            .execute(&mut self.conn)
            .map_err(|e| DeskmateError::Storage(e.to_string()))?;
        Ok(())
    }
}

fn ensure_parent_dir(path: &str) -> Result<()> {
    let path = Path::new(path);
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| DeskmateError::Storage(e.to_string()))?;
    }
    Ok(())
}
