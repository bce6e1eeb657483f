//! Match resolution: criteria → ordered, deduplicated book items

use crate::error::Result;
use crate::storage::{ContentStore, MetadataAccessor};
use crate::types::{
    BookId, BookItem, FilterCriteria, MetaKey, Relation, Taxonomy, TaxonomyPredicate,
    TaxonomyQuery,
};

/// Resolves [`FilterCriteria`] against a content store and metadata accessor
pub struct MatchResolver<'a> {
    content: &'a dyn ContentStore,
    meta: &'a dyn MetadataAccessor,
}

impl<'a> MatchResolver<'a> {
    pub fn new(content: &'a dyn ContentStore, meta: &'a dyn MetadataAccessor) -> Self {
        Self { content, meta }
    }

    /// Resolve the matching published items.
    ///
    /// Items picked by ID or metadata come first, ascending by ID; items
    /// picked only through categories/tags follow, ascending by ID. No item
    /// appears twice.
    pub async fn resolve(&self, criteria: &FilterCriteria) -> Result<Vec<BookItem>> {
        if criteria.is_empty() {
            return Ok(Vec::new());
        }

        let direct_ids = self.direct_ids(criteria).await?;
        let query = taxonomy_query(criteria);

        let mut books = if direct_ids.is_empty() {
            Vec::new()
        } else {
            self.content.published_by_ids(&direct_ids).await?
        };

        if !query.is_empty() {
            let by_terms = self
                .content
                .published_by_taxonomy(&query, &direct_ids)
                .await?;
            books.extend(by_terms);
        }

        Ok(books)
    }

    /// IDs selected by the `id` field and the metadata predicates, in
    /// predicate order. May contain duplicates.
    async fn direct_ids(&self, criteria: &FilterCriteria) -> Result<Vec<BookId>> {
        let mut ids: Vec<BookId> = criteria.id.into_iter().collect();

        for (key, value) in metadata_predicates(criteria) {
            let found = self.meta.find_ids_by_exact_value(key, value).await?;
            ids.extend(found);
        }

        Ok(ids)
    }
}

/// Metadata predicates present in `criteria`, in resolution order
fn metadata_predicates(criteria: &FilterCriteria) -> Vec<(MetaKey, &str)> {
    [
        (MetaKey::AuthorName, criteria.author_name.as_deref()),
        (MetaKey::Year, criteria.year.as_deref()),
        (MetaKey::Publisher, criteria.publisher.as_deref()),
    ]
    .into_iter()
    .filter_map(|(key, value)| value.map(|v| (key, v)))
    .collect()
}

/// Category and tag predicates joined with OR
fn taxonomy_query(criteria: &FilterCriteria) -> TaxonomyQuery {
    let mut query = TaxonomyQuery::new(Relation::Or);
    if let Some(category) = &criteria.category {
        query.push(TaxonomyPredicate::by_name(Taxonomy::Category, category.clone()));
    }
    if let Some(tag) = &criteria.tag {
        query.push(TaxonomyPredicate::by_name(Taxonomy::Tag, tag.clone()));
    }
    query
}
