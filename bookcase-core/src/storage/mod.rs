//! Content store abstraction
//!
//! The engine reads books, metadata and taxonomy membership through these
//! traits. Persistence lives behind them; [`MemoryStore`] is the in-process
//! implementation used by the server, the CLI and the tests.

mod memory;

pub use memory::{Library, MemoryStore};

use crate::error::StorageError;
use crate::types::{BookId, BookItem, MetaKey, Taxonomy, TaxonomyQuery, TaxonomyTerm};
use async_trait::async_trait;
use serde::Serialize;

/// Result type for storage operations
pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// One page of a listing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Total number of items across all pages
    pub total: usize,
    /// 1-indexed page number
    pub page: u32,
    pub per_page: u32,
}

/// Access to published book items and their classification
#[async_trait]
pub trait ContentStore: Send + Sync {
    /// Published items whose ID is in `ids`, ascending by ID, each at most once
    async fn published_by_ids(&self, ids: &[BookId]) -> StorageResult<Vec<BookItem>>;

    /// Published items satisfying `query`, skipping any ID in `exclude`,
    /// ascending by ID
    async fn published_by_taxonomy(
        &self,
        query: &TaxonomyQuery,
        exclude: &[BookId],
    ) -> StorageResult<Vec<BookItem>>;

    /// Published items ascending by ID, `limit` of them starting at `offset`.
    /// Returns the page plus the total number of published items.
    async fn published_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> StorageResult<(Vec<BookItem>, usize)>;

    /// All terms of a taxonomy, including empty ones
    async fn terms(&self, taxonomy: Taxonomy) -> StorageResult<Vec<TaxonomyTerm>>;
}

/// Scalar metadata attached to book items
#[async_trait]
pub trait MetadataAccessor: Send + Sync {
    /// The value stored for `key` on `book`
    async fn get_value(&self, book: BookId, key: MetaKey) -> StorageResult<Option<String>>;

    /// IDs of every book whose `key` equals `value` exactly, ascending
    async fn find_ids_by_exact_value(&self, key: MetaKey, value: &str)
        -> StorageResult<Vec<BookId>>;

    /// Store `value` for `key`, replacing any previous value
    async fn set_value(&self, book: BookId, key: MetaKey, value: String) -> StorageResult<()>;

    /// Remove the entry for `key`; removing a missing entry is not an error
    async fn delete_value(&self, book: BookId, key: MetaKey) -> StorageResult<()>;
}
