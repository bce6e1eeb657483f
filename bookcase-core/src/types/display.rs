//! Presentation records

use super::{BookId, MetaKey};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One `label: value` line of a display record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaLine {
    pub key: MetaKey,
    pub label: String,
    pub value: String,
}

impl MetaLine {
    pub fn new(key: MetaKey, value: impl Into<String>) -> Self {
        Self {
            key,
            label: key.label().to_string(),
            value: value.into(),
        }
    }
}

impl fmt::Display for MetaLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.label, self.value)
    }
}

/// The rendered view of one matched book. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisplayRecord {
    pub id: BookId,
    pub title: String,
    pub body: String,
    pub meta: Vec<MetaLine>,
}

impl DisplayRecord {
    /// Value of the line for `key`, if rendered
    pub fn line(&self, key: MetaKey) -> Option<&MetaLine> {
        self.meta.iter().find(|l| l.key == key)
    }
}
