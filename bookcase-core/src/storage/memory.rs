//! In-memory content store with JSON snapshots

use super::{ContentStore, MetadataAccessor, StorageResult};
use crate::error::{Result, StorageError};
use crate::types::{
    BookId, BookItem, MetaKey, MetadataEntry, PostStatus, Taxonomy, TaxonomyQuery, TaxonomyTerm,
    TermId,
};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// Everything the store holds. This is also the on-disk snapshot format.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Library {
    /// Books, kept sorted by ID
    #[serde(default)]
    pub books: Vec<BookItem>,

    #[serde(default)]
    pub meta: Vec<MetadataEntry>,

    #[serde(default)]
    pub terms: Vec<TaxonomyTerm>,
}

impl Library {
    /// Load a library from a JSON file; a missing file yields an empty library
    pub async fn load(path: &Path) -> Result<Self> {
        match tokio::fs::read_to_string(path).await {
            Ok(data) => {
                let mut library: Library = serde_json::from_str(&data).map_err(|e| {
                    StorageError::Corrupt(format!("{}: {}", path.display(), e))
                })?;
                library.books.sort_by_key(|b| b.id);
                Ok(library)
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    /// Save the library atomically
    /// Writes to a temp file then renames to avoid partial writes
    pub async fn save(&self, path: &Path) -> Result<()> {
        let data = serde_json::to_string_pretty(self)?;
        let temp_path = path.with_extension("json.tmp");
        tokio::fs::write(&temp_path, &data).await?;
        tokio::fs::rename(&temp_path, path).await?;
        Ok(())
    }

    fn published(&self) -> impl Iterator<Item = &BookItem> {
        self.books.iter().filter(|b| b.is_published())
    }
}

fn next_id(library: &Library) -> BookId {
    BookId(library.books.last().map_or(1, |b| b.id.0 + 1))
}

/// First of `base`, `base-2`, `base-3`, ... not yet taken in `taxonomy`
fn unique_slug(library: &Library, taxonomy: Taxonomy, base: &str) -> String {
    let taken = |slug: &str| {
        library
            .terms
            .iter()
            .any(|t| t.taxonomy == taxonomy && t.slug == slug)
    };
    if !taken(base) {
        return base.to_string();
    }
    (2..)
        .map(|n| format!("{}-{}", base, n))
        .find(|slug| !taken(slug))
        .unwrap_or_default()
}

/// In-memory store implementing both [`ContentStore`] and [`MetadataAccessor`]
#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<Library>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_library(mut library: Library) -> Self {
        library.books.sort_by_key(|b| b.id);
        Self {
            data: RwLock::new(library),
        }
    }

    /// Load a store from a library snapshot on disk
    pub async fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_library(Library::load(path).await?))
    }

    /// Write the current contents to disk
    pub async fn save(&self, path: &Path) -> Result<()> {
        let snapshot = self.snapshot()?;
        snapshot.save(path).await
    }

    /// Copy of the current contents
    pub fn snapshot(&self) -> StorageResult<Library> {
        Ok(self.read()?.clone())
    }

    fn read(&self) -> StorageResult<RwLockReadGuard<'_, Library>> {
        self.data
            .read()
            .map_err(|_| StorageError::BackendError("store lock poisoned".to_string()))
    }

    fn write(&self) -> StorageResult<RwLockWriteGuard<'_, Library>> {
        self.data
            .write()
            .map_err(|_| StorageError::BackendError("store lock poisoned".to_string()))
    }

    /// Create a book under the next free ID
    pub fn create_book(
        &self,
        title: impl Into<String>,
        body: impl Into<String>,
        status: PostStatus,
    ) -> StorageResult<BookItem> {
        let mut library = self.write()?;
        let book = BookItem::new(next_id(&library).0, title)
            .with_body(body)
            .with_status(status);
        library.books.push(book.clone());
        Ok(book)
    }

    /// Look up a book regardless of status
    pub fn book(&self, id: BookId) -> StorageResult<Option<BookItem>> {
        let library = self.read()?;
        Ok(library.books.iter().find(|b| b.id == id).cloned())
    }

    /// Insert a book, replacing any book with the same ID
    pub fn insert_book(&self, book: BookItem) -> StorageResult<()> {
        let mut library = self.write()?;
        match library.books.binary_search_by_key(&book.id, |b| b.id) {
            Ok(pos) => library.books[pos] = book,
            Err(pos) => library.books.insert(pos, book),
        }
        Ok(())
    }

    /// Create a term and return its ID. Reuses an existing term of the same
    /// taxonomy and name. Slugs stay unique within a taxonomy: a name that
    /// slugifies to a taken slug gets a numeric suffix.
    pub fn add_term(
        &self,
        taxonomy: Taxonomy,
        name: &str,
        parent: Option<TermId>,
    ) -> StorageResult<TermId> {
        let mut library = self.write()?;

        if let Some(existing) = library
            .terms
            .iter()
            .find(|t| t.taxonomy == taxonomy && t.name == name)
        {
            return Ok(existing.id);
        }

        if let Some(parent) = parent {
            if !taxonomy.is_hierarchical() {
                return Err(StorageError::BackendError(format!(
                    "{:?} terms cannot have a parent",
                    taxonomy
                )));
            }
            if !library.terms.iter().any(|t| t.id == parent) {
                return Err(StorageError::NotFound(format!("term {}", parent)));
            }
        }

        let id = TermId(library.terms.iter().map(|t| t.id.0).max().unwrap_or(0) + 1);
        let mut term = TaxonomyTerm::new(id, taxonomy, name);
        term.slug = unique_slug(&library, taxonomy, &term.slug);
        term.parent = parent;
        library.terms.push(term);
        Ok(id)
    }

    /// Remove a book with its metadata and term memberships. Returns whether
    /// the book existed.
    pub fn remove_book(&self, id: BookId) -> StorageResult<bool> {
        let mut library = self.write()?;
        let before = library.books.len();
        library.books.retain(|b| b.id != id);
        library.meta.retain(|e| e.book_id != id);
        for term in &mut library.terms {
            term.members.remove(&id);
        }
        Ok(library.books.len() != before)
    }

    /// File a book under a term
    pub fn assign_term(&self, term: TermId, book: BookId) -> StorageResult<()> {
        let mut library = self.write()?;
        if !library.books.iter().any(|b| b.id == book) {
            return Err(StorageError::NotFound(format!("book {}", book)));
        }
        let entry = library
            .terms
            .iter_mut()
            .find(|t| t.id == term)
            .ok_or_else(|| StorageError::NotFound(format!("term {}", term)))?;
        entry.members.insert(book);
        Ok(())
    }
}

#[async_trait]
impl ContentStore for MemoryStore {
    async fn published_by_ids(&self, ids: &[BookId]) -> StorageResult<Vec<BookItem>> {
        let wanted: BTreeSet<BookId> = ids.iter().copied().collect();
        let library = self.read()?;
        Ok(library
            .published()
            .filter(|b| wanted.contains(&b.id))
            .cloned()
            .collect())
    }

    async fn published_by_taxonomy(
        &self,
        query: &TaxonomyQuery,
        exclude: &[BookId],
    ) -> StorageResult<Vec<BookItem>> {
        let excluded: BTreeSet<BookId> = exclude.iter().copied().collect();
        let library = self.read()?;
        Ok(library
            .published()
            .filter(|b| !excluded.contains(&b.id))
            .filter(|b| query.matches(b.id, &library.terms))
            .cloned()
            .collect())
    }

    async fn published_page(
        &self,
        offset: usize,
        limit: usize,
    ) -> StorageResult<(Vec<BookItem>, usize)> {
        let library = self.read()?;
        let total = library.published().count();
        let items = library
            .published()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect();
        Ok((items, total))
    }

    async fn terms(&self, taxonomy: Taxonomy) -> StorageResult<Vec<TaxonomyTerm>> {
        let library = self.read()?;
        Ok(library
            .terms
            .iter()
            .filter(|t| t.taxonomy == taxonomy)
            .cloned()
            .collect())
    }
}

#[async_trait]
impl MetadataAccessor for MemoryStore {
    async fn get_value(&self, book: BookId, key: MetaKey) -> StorageResult<Option<String>> {
        let library = self.read()?;
        Ok(library
            .meta
            .iter()
            .find(|e| e.book_id == book && e.key == key)
            .map(|e| e.value.clone()))
    }

    async fn find_ids_by_exact_value(
        &self,
        key: MetaKey,
        value: &str,
    ) -> StorageResult<Vec<BookId>> {
        let library = self.read()?;
        let ids: BTreeSet<BookId> = library
            .meta
            .iter()
            .filter(|e| e.key == key && e.value == value)
            .map(|e| e.book_id)
            .collect();
        Ok(ids.into_iter().collect())
    }

    async fn set_value(&self, book: BookId, key: MetaKey, value: String) -> StorageResult<()> {
        let mut library = self.write()?;
        match library
            .meta
            .iter_mut()
            .find(|e| e.book_id == book && e.key == key)
        {
            Some(entry) => entry.value = value,
            None => library.meta.push(MetadataEntry {
                book_id: book,
                key,
                value,
            }),
        }
        Ok(())
    }

    async fn delete_value(&self, book: BookId, key: MetaKey) -> StorageResult<()> {
        let mut library = self.write()?;
        library.meta.retain(|e| !(e.book_id == book && e.key == key));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::BookcaseError;
    use crate::types::{Relation, TaxonomyPredicate};

    fn ids(books: &[BookItem]) -> Vec<u64> {
        books.iter().map(|b| b.id.0).collect()
    }

    fn store_with_books(n: u64) -> MemoryStore {
        let store = MemoryStore::new();
        for i in (1..=n).rev() {
            store
                .insert_book(BookItem::new(i, format!("Book {}", i)))
                .unwrap();
        }
        store
    }

    #[tokio::test]
    async fn test_published_by_ids_sorts_and_dedups() {
        let store = store_with_books(4);
        store
            .insert_book(BookItem::new(2, "Draft").with_status(PostStatus::Draft))
            .unwrap();

        let books = store
            .published_by_ids(&[BookId(4), BookId(1), BookId(4), BookId(2), BookId(9)])
            .await
            .unwrap();
        assert_eq!(ids(&books), vec![1, 4]);
    }

    #[tokio::test]
    async fn test_taxonomy_query_with_exclusion() {
        let store = store_with_books(4);
        let fiction = store.add_term(Taxonomy::Category, "Fiction", None).unwrap();
        let classic = store.add_term(Taxonomy::Tag, "Classic", None).unwrap();
        store.assign_term(fiction, BookId(1)).unwrap();
        store.assign_term(fiction, BookId(2)).unwrap();
        store.assign_term(classic, BookId(3)).unwrap();

        let query = TaxonomyQuery::new(Relation::Or)
            .with(TaxonomyPredicate::by_name(Taxonomy::Category, "Fiction"))
            .with(TaxonomyPredicate::by_name(Taxonomy::Tag, "Classic"));

        let books = store
            .published_by_taxonomy(&query, &[BookId(2)])
            .await
            .unwrap();
        assert_eq!(ids(&books), vec![1, 3]);
    }

    #[tokio::test]
    async fn test_metadata_last_write_wins() {
        let store = store_with_books(2);
        store
            .set_value(BookId(1), MetaKey::Year, "1951".into())
            .await
            .unwrap();
        store
            .set_value(BookId(1), MetaKey::Year, "1952".into())
            .await
            .unwrap();

        assert_eq!(
            store.get_value(BookId(1), MetaKey::Year).await.unwrap(),
            Some("1952".to_string())
        );
        assert!(store
            .find_ids_by_exact_value(MetaKey::Year, "1951")
            .await
            .unwrap()
            .is_empty());

        store.delete_value(BookId(1), MetaKey::Year).await.unwrap();
        store.delete_value(BookId(1), MetaKey::Year).await.unwrap();
        assert_eq!(store.get_value(BookId(1), MetaKey::Year).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_exact_value_lookup_is_ascending() {
        let store = store_with_books(3);
        for id in [3, 1] {
            store
                .set_value(BookId(id), MetaKey::Publisher, "Gnome Press".into())
                .await
                .unwrap();
        }
        let found = store
            .find_ids_by_exact_value(MetaKey::Publisher, "Gnome Press")
            .await
            .unwrap();
        assert_eq!(found, vec![BookId(1), BookId(3)]);
    }

    #[tokio::test]
    async fn test_published_page() {
        let store = store_with_books(7);
        store
            .insert_book(BookItem::new(3, "Hidden").with_status(PostStatus::Draft))
            .unwrap();

        let (page, total) = store.published_page(2, 2).await.unwrap();
        assert_eq!(total, 6);
        assert_eq!(ids(&page), vec![4, 5]);
    }

    #[test]
    fn test_terms_are_reused_and_validated() {
        let store = store_with_books(1);
        let a = store.add_term(Taxonomy::Category, "Fiction", None).unwrap();
        let b = store.add_term(Taxonomy::Category, "Fiction", None).unwrap();
        assert_eq!(a, b);

        assert!(store.add_term(Taxonomy::Tag, "Nested", Some(a)).is_err());
        assert!(store
            .add_term(Taxonomy::Category, "Orphan", Some(TermId(99)))
            .is_err());
        assert!(matches!(
            store.assign_term(a, BookId(42)),
            Err(StorageError::NotFound(_))
        ));
    }

    #[tokio::test]
    async fn test_remove_book() {
        let store = store_with_books(2);
        let tag = store.add_term(Taxonomy::Tag, "Award", None).unwrap();
        store.assign_term(tag, BookId(2)).unwrap();
        store
            .set_value(BookId(2), MetaKey::Year, "1965".into())
            .await
            .unwrap();

        assert!(store.remove_book(BookId(2)).unwrap());
        assert!(!store.remove_book(BookId(2)).unwrap());

        let library = store.snapshot().unwrap();
        assert_eq!(ids(&library.books), vec![1]);
        assert!(library.meta.is_empty());
        assert!(library.terms[0].members.is_empty());
    }

    #[test]
    fn test_colliding_slugs_get_suffix() {
        let store = store_with_books(1);
        let a = store.add_term(Taxonomy::Category, "Sci Fi", None).unwrap();
        let b = store.add_term(Taxonomy::Category, "Sci-Fi", None).unwrap();
        let c = store.add_term(Taxonomy::Category, "sci fi", None).unwrap();
        let tag = store.add_term(Taxonomy::Tag, "Sci Fi", None).unwrap();
        assert_ne!(a, b);

        let slugs: Vec<(TermId, String)> = store
            .snapshot()
            .unwrap()
            .terms
            .into_iter()
            .map(|t| (t.id, t.slug))
            .collect();
        assert_eq!(
            slugs,
            vec![
                (a, "sci-fi".to_string()),
                (b, "sci-fi-2".to_string()),
                (c, "sci-fi-3".to_string()),
                (tag, "sci-fi".to_string()),
            ]
        );
    }

    #[test]
    fn test_create_book() {
        let store = store_with_books(2);
        let book = store
            .create_book("Dune", "Spice.", PostStatus::Draft)
            .unwrap();
        assert_eq!(book.id, BookId(3));
        assert_eq!(store.book(BookId(3)).unwrap(), Some(book));
        assert_eq!(store.book(BookId(4)).unwrap(), None);
    }

    #[tokio::test]
    async fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");

        let store = store_with_books(2);
        let tag = store.add_term(Taxonomy::Tag, "Award", None).unwrap();
        store.assign_term(tag, BookId(2)).unwrap();
        store
            .set_value(BookId(1), MetaKey::Price, "20".into())
            .await
            .unwrap();
        store.save(&path).await.unwrap();

        let loaded = MemoryStore::load(&path).await.unwrap();
        assert_eq!(loaded.snapshot().unwrap(), store.snapshot().unwrap());

        let missing = MemoryStore::load(&dir.path().join("none.json")).await.unwrap();
        assert!(missing.snapshot().unwrap().books.is_empty());
    }

    #[tokio::test]
    async fn test_load_corrupt_library() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("library.json");
        tokio::fs::write(&path, "{ \"books\": [").await.unwrap();

        let result = MemoryStore::load(&path).await;
        assert!(matches!(
            result,
            Err(BookcaseError::Storage(StorageError::Corrupt(_)))
        ));
    }
}
