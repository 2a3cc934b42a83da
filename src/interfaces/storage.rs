use crate::error::Result;

/// A single named slot of durable text. Writes overwrite whatever the slot
/// held before.
pub trait StateSlot: Send {
    fn name(&self) -> &str;

    /// Returns `None` when nothing has been written to the slot yet.
    fn read(&mut self) -> Result<Option<String>>;

    fn write(&mut self, payload: &str) -> Result<()>;

    fn clear(&mut self) -> Result<()>;
}
