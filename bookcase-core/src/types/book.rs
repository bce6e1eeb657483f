//! The book content item

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Identifier of a book item. Ordering by ID is creation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BookId(pub u64);

impl fmt::Display for BookId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for BookId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(BookId)
    }
}

impl From<u64> for BookId {
    fn from(id: u64) -> Self {
        BookId(id)
    }
}

/// Publication status of a book item
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PostStatus {
    #[default]
    Draft,
    Published,
}

/// A book content item as held by the content store
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BookItem {
    /// Unique identifier
    pub id: BookId,

    /// Book title
    pub title: String,

    /// Body text, rendered verbatim
    pub body: String,

    /// Draft or published
    #[serde(default)]
    pub status: PostStatus,

    /// When the item was created
    pub created_at: DateTime<Utc>,
}

impl BookItem {
    /// Create a published book item
    pub fn new(id: u64, title: impl Into<String>) -> Self {
        Self {
            id: BookId(id),
            title: title.into(),
            body: String::new(),
            status: PostStatus::Published,
            created_at: Utc::now(),
        }
    }

    /// Set the body text
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = body.into();
        self
    }

    /// Set the publication status
    pub fn with_status(mut self, status: PostStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_published(&self) -> bool {
        self.status == PostStatus::Published
    }
}
