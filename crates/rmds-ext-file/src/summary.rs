//! Load outcome bookkeeping.

use std::fmt;

use rmds_core::ErrorKind;

/// An entity skipped while loading.
#[derive(Debug, Clone, PartialEq)]
pub struct SkippedItem {
    /// Where in the file the item starts (`path:line`).
    pub location: String,
    /// Failure category.
    pub kind: ErrorKind,
    /// Error message.
    pub message: String,
}

/// What a loader accepted and what it skipped.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LoadSummary {
    /// Entities added.
    pub loaded: usize,
    /// Entities rejected, in file order.
    pub skipped: Vec<SkippedItem>,
}

impl LoadSummary {
    /// Records a skipped entity.
    pub(crate) fn skip(&mut self, location: String, kind: ErrorKind, message: String) {
        self.skipped.push(SkippedItem {
            location,
            kind,
            message,
        });
    }

    /// Returns true if nothing was skipped.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.skipped.is_empty()
    }
}

impl fmt::Display for LoadSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} loaded, {} skipped", self.loaded, self.skipped.len())
    }
}
