//! Bookcase Core Library
//!
//! Catalog types for book items, their scalar metadata and their categories
//! and tags, plus the filter & presentation engine that turns a raw filter
//! map into rendered display records.

pub mod catalog;
pub mod config;
pub mod engine;
pub mod error;
pub mod storage;
pub mod types;

pub use config::Settings;
pub use engine::{parse_criteria, Engine, MatchResolver, Renderer};
pub use error::{BookcaseError, ConfigError, Result, StorageError};
pub use storage::{ContentStore, Library, MemoryStore, MetadataAccessor, Page};
pub use types::{
    BookId, BookItem, DisplayRecord, FilterCriteria, MetaKey, MetaLine, MetadataEntry,
    PostStatus, Taxonomy, TaxonomyTerm, TermId,
};
