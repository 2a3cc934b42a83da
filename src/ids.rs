use time::OffsetDateTime;

/// Largest id honoured when reading stored or imported records. Anything
/// beyond it cannot round-trip through a JSON number exactly.
pub const MAX_RECORD_ID: i64 = (1 << 53) - 1;

/// Hands out record ids derived from the wall clock in epoch milliseconds,
/// bumped past the previously issued id so two records created in the same
/// millisecond still get distinct ids.
#[derive(Debug, Clone, Default)]
pub struct IdGenerator {
    last: i64,
}

impl IdGenerator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts above every id already present in loaded data.
    pub fn seeded(max_existing: Option<i64>) -> Self {
        let mut generator = Self::new();
        generator.observe(max_existing);
        generator
    }

    pub fn observe(&mut self, max_existing: Option<i64>) {
        if let Some(max) = max_existing {
            self.last = self.last.max(max.min(MAX_RECORD_ID));
        }
    }

    pub fn next_id(&mut self) -> i64 {
        let next = now_millis().max(self.last + 1);
        self.last = next;
        next
    }
}

/// Reduces a decoded id to the honoured range; out-of-range ids read as 0.
pub fn sanitize_id(id: i64) -> i64 {
    if (-MAX_RECORD_ID..=MAX_RECORD_ID).contains(&id) {
        id
    } else {
        0
    }
}

fn now_millis() -> i64 {
    let nanos = OffsetDateTime::now_utc().unix_timestamp_nanos();
    i64::try_from(nanos / 1_000_000).unwrap_or(MAX_RECORD_ID)
}
