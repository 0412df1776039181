//! The per-pass value deduplication ledger.

use crate::descriptor::{Field, FieldKind};

/// One ledger entry: a field value and the record that introduced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    pub field: Field,
    pub record_index: usize,
}

/// Ordered log of field values seen during one encode or decode pass.
///
/// A table is created fresh for every pass and threaded through the codec;
/// it is never shared between calls, so interleaved operations cannot
/// observe each other's deduplication state. Entry indices are what
/// back-reference payloads point at (table index, not record index).
#[derive(Debug, Default)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Index of the first entry equal to `field` in both kind and value.
    pub fn find(&self, field: &Field) -> Option<usize> {
        self.entries.iter().position(|e| e.field == *field)
    }

    /// Value of the first entry whose field kind matches.
    ///
    /// Reference resolution deliberately ignores the index stored in the
    /// reference payload; see the codec documentation.
    pub fn resolve(&self, kind: FieldKind) -> Option<&Field> {
        self.entries
            .iter()
            .find(|e| e.field.kind() == kind)
            .map(|e| &e.field)
    }

    /// Appends an entry unless an equal (kind, value) entry already
    /// exists. Returns true when the entry was added.
    pub fn insert(&mut self, field: &Field, record_index: usize) -> bool {
        if self.find(field).is_some() {
            return false;
        }
        self.entries.push(HistoryEntry {
            field: field.clone(),
            record_index,
        });
        true
    }
}
