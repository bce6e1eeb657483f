//! Typed filter criteria

use super::BookId;
use serde::{Deserialize, Serialize};

/// The normalized filter request driving match resolution.
///
/// Every field is independently optional. A criteria value with no field set
/// matches nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub id: Option<BookId>,
    pub author_name: Option<String>,
    pub year: Option<String>,
    pub publisher: Option<String>,
    pub category: Option<String>,
    pub tag: Option<String>,
}

impl FilterCriteria {
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.author_name.is_none()
            && self.year.is_none()
            && self.publisher.is_none()
            && self.category.is_none()
            && self.tag.is_none()
    }

    pub fn with_id(mut self, id: u64) -> Self {
        self.id = Some(BookId(id));
        self
    }

    pub fn with_author_name(mut self, author: impl Into<String>) -> Self {
        self.author_name = Some(author.into());
        self
    }

    pub fn with_year(mut self, year: impl Into<String>) -> Self {
        self.year = Some(year.into());
        self
    }

    pub fn with_publisher(mut self, publisher: impl Into<String>) -> Self {
        self.publisher = Some(publisher.into());
        self
    }

    pub fn with_category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tag = Some(tag.into());
        self
    }
}
