//! Catalog operations around the engine: saving metadata, category listings,
//! category rankings and the paged archive.

use crate::config::Settings;
use crate::error::Result;
use crate::storage::{ContentStore, MetadataAccessor, Page};
use crate::types::{
    BookId, BookItem, MetaKey, Relation, Taxonomy, TaxonomyPredicate, TaxonomyQuery, TermId,
};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Write the six metadata fields of a book from a submitted form.
///
/// Form keys are the storage keys (`author-name`, `price`, ...). A non-empty
/// value is stored; an empty or missing one removes the entry.
pub async fn save_metadata(
    meta: &dyn MetadataAccessor,
    book: BookId,
    form: &HashMap<String, String>,
) -> Result<()> {
    for key in MetaKey::ALL {
        match form.get(key.as_str()).filter(|v| !v.is_empty()) {
            Some(value) => meta.set_value(book, key, value.clone()).await?,
            None => meta.delete_value(book, key).await?,
        }
    }
    Ok(())
}

/// A title linking to a book
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookLink {
    pub id: BookId,
    pub title: String,
}

impl From<&BookItem> for BookLink {
    fn from(book: &BookItem) -> Self {
        Self {
            id: book.id,
            title: book.title.clone(),
        }
    }
}

/// The books filed under one category
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryListing {
    pub term: TermId,
    pub name: String,
    pub books: Vec<BookLink>,
}

/// List the published books of a category.
///
/// `None` when the term does not exist or holds no published books.
pub async fn category_listing(
    content: &dyn ContentStore,
    term: TermId,
) -> Result<Option<CategoryListing>> {
    let terms = content.terms(Taxonomy::Category).await?;
    let Some(category) = terms.into_iter().find(|t| t.id == term) else {
        return Ok(None);
    };

    let query = TaxonomyQuery::new(Relation::Or)
        .with(TaxonomyPredicate::by_slug(Taxonomy::Category, category.slug.clone()));
    let books = content.published_by_taxonomy(&query, &[]).await?;
    if books.is_empty() {
        return Ok(None);
    }

    Ok(Some(CategoryListing {
        term: category.id,
        name: category.name,
        books: books.iter().map(BookLink::from).collect(),
    }))
}

/// A category and how many books it holds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryCount {
    pub term: TermId,
    pub name: String,
    pub count: usize,
}

/// Categories ranked by published book count (descending, ties by name),
/// empty ones included, at most `limit` of them
pub async fn top_categories(content: &dyn ContentStore, limit: usize) -> Result<Vec<CategoryCount>> {
    let terms = content.terms(Taxonomy::Category).await?;

    let query = terms.iter().fold(TaxonomyQuery::new(Relation::Or), |q, t| {
        q.with(TaxonomyPredicate::by_slug(Taxonomy::Category, t.slug.clone()))
    });
    let published: HashSet<BookId> = if query.is_empty() {
        HashSet::new()
    } else {
        content
            .published_by_taxonomy(&query, &[])
            .await?
            .iter()
            .map(|b| b.id)
            .collect()
    };

    let mut counts: Vec<CategoryCount> = terms
        .into_iter()
        .map(|t| CategoryCount {
            term: t.id,
            count: t.members.iter().filter(|id| published.contains(id)).count(),
            name: t.name,
        })
        .collect();

    counts.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    counts.truncate(limit);
    Ok(counts)
}

/// One page of the published archive. Page numbers start at 1; 0 is read as 1.
pub async fn archive_page(
    content: &dyn ContentStore,
    settings: &Settings,
    page: u32,
) -> Result<Page<BookItem>> {
    let page = page.max(1);
    let per_page = settings.page_size();
    let offset = (page as usize - 1) * per_page as usize;

    let (items, total) = content.published_page(offset, per_page as usize).await?;
    Ok(Page {
        items,
        total,
        page,
        per_page,
    })
}
