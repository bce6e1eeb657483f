//! Scalar book metadata

use super::BookId;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// The metadata keys a book can carry.
///
/// Declaration order is display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum MetaKey {
    #[serde(rename = "author-name")]
    AuthorName,
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "publisher")]
    Publisher,
    #[serde(rename = "year")]
    Year,
    #[serde(rename = "edition")]
    Edition,
    #[serde(rename = "url")]
    Url,
}

impl MetaKey {
    /// All keys in display order
    pub const ALL: [MetaKey; 6] = [
        MetaKey::AuthorName,
        MetaKey::Price,
        MetaKey::Publisher,
        MetaKey::Year,
        MetaKey::Edition,
        MetaKey::Url,
    ];

    /// Storage key
    pub fn as_str(self) -> &'static str {
        match self {
            MetaKey::AuthorName => "author-name",
            MetaKey::Price => "price",
            MetaKey::Publisher => "publisher",
            MetaKey::Year => "year",
            MetaKey::Edition => "edition",
            MetaKey::Url => "url",
        }
    }

    /// Human-readable label
    pub fn label(self) -> &'static str {
        match self {
            MetaKey::AuthorName => "Author",
            MetaKey::Price => "Price",
            MetaKey::Publisher => "Publisher",
            MetaKey::Year => "Year",
            MetaKey::Edition => "Edition",
            MetaKey::Url => "URL",
        }
    }
}

impl fmt::Display for MetaKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a string names no known metadata key
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown metadata key: {0}")]
pub struct UnknownMetaKey(pub String);

impl FromStr for MetaKey {
    type Err = UnknownMetaKey;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        MetaKey::ALL
            .into_iter()
            .find(|k| k.as_str() == s)
            .ok_or_else(|| UnknownMetaKey(s.to_string()))
    }
}

/// One `(book, key, value)` triple
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetadataEntry {
    pub book_id: BookId,
    pub key: MetaKey,
    pub value: String,
}

impl MetadataEntry {
    pub fn new(book_id: BookId, key: MetaKey, value: impl Into<String>) -> Self {
        Self {
            book_id,
            key,
            value: value.into(),
        }
    }
}
