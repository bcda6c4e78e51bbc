//! Per-operation tally of a decoded feed.

use feed_core::{Document, Operation};
use std::fmt;

/// Counts of each operation kind seen in a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FeedSummary {
    pub puts: u64,
    pub updates: u64,
    pub removes: u64,
    /// Operations carrying a test-and-set condition
    pub conditional: u64,
    /// Total bytes of raw field payload
    pub field_bytes: u64,
}

impl FeedSummary {
    pub fn record(&mut self, doc: &Document) {
        match doc.operation {
            Operation::Put => self.puts += 1,
            Operation::Update => self.updates += 1,
            Operation::Remove => self.removes += 1,
        }
        if !doc.condition.is_empty() {
            self.conditional += 1;
        }
        self.field_bytes += doc.fields_json().map_or(0, str::len) as u64;
    }

    pub fn total(&self) -> u64 {
        self.puts + self.updates + self.removes
    }
}

impl fmt::Display for FeedSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} operations ({} put, {} update, {} remove; {} conditional), {} bytes of fields",
            self.total(),
            self.puts,
            self.updates,
            self.removes,
            self.conditional,
            self.field_bytes
        )
    }
}
