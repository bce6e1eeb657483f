//! Categories, tags, and taxonomy queries

use super::BookId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Identifier of a taxonomy term
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TermId(pub u64);

impl fmt::Display for TermId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// The two book taxonomies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Taxonomy {
    /// Hierarchical
    Category,
    /// Flat
    Tag,
}

impl Taxonomy {
    pub fn is_hierarchical(self) -> bool {
        matches!(self, Taxonomy::Category)
    }
}

/// A named classification node and the books filed under it
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TaxonomyTerm {
    pub id: TermId,
    pub taxonomy: Taxonomy,
    pub name: String,
    pub slug: String,

    /// Parent term, categories only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<TermId>,

    /// Member books
    #[serde(default)]
    pub members: BTreeSet<BookId>,
}

impl TaxonomyTerm {
    /// Create a term, deriving the slug from the name
    pub fn new(id: TermId, taxonomy: Taxonomy, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id,
            taxonomy,
            slug: slugify(&name),
            name,
            parent: None,
            members: BTreeSet::new(),
        }
    }
}

/// Normalize a term name into a slug.
///
/// Lowercases, collapses every run of non-alphanumeric characters into a
/// single `-`, and strips leading/trailing dashes.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_dash = false;

    for c in name.chars() {
        if c.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(c.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}

/// Which term field a predicate compares against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TermField {
    Name,
    Slug,
}

/// "Item is filed under a term of `taxonomy` whose `field` equals `value`"
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyPredicate {
    pub taxonomy: Taxonomy,
    pub field: TermField,
    pub value: String,
}

impl TaxonomyPredicate {
    /// Match terms by name
    pub fn by_name(taxonomy: Taxonomy, name: impl Into<String>) -> Self {
        Self {
            taxonomy,
            field: TermField::Name,
            value: name.into(),
        }
    }

    /// Match terms by slug
    pub fn by_slug(taxonomy: Taxonomy, slug: impl Into<String>) -> Self {
        Self {
            taxonomy,
            field: TermField::Slug,
            value: slug.into(),
        }
    }

    /// Whether `term` is selected by this predicate
    pub fn selects(&self, term: &TaxonomyTerm) -> bool {
        if term.taxonomy != self.taxonomy {
            return false;
        }
        match self.field {
            TermField::Name => term.name == self.value,
            TermField::Slug => term.slug == self.value,
        }
    }

    /// Whether `book` is a member of any term selected by this predicate
    pub fn is_satisfied_by(&self, book: BookId, terms: &[TaxonomyTerm]) -> bool {
        terms
            .iter()
            .any(|t| self.selects(t) && t.members.contains(&book))
    }
}

/// How the predicates of a query combine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Relation {
    And,
    #[default]
    Or,
}

/// A list of predicates plus the relation joining them
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxonomyQuery {
    pub relation: Relation,
    pub predicates: Vec<TaxonomyPredicate>,
}

impl TaxonomyQuery {
    pub fn new(relation: Relation) -> Self {
        Self {
            relation,
            predicates: Vec::new(),
        }
    }

    /// Add a predicate
    pub fn with(mut self, predicate: TaxonomyPredicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn push(&mut self, predicate: TaxonomyPredicate) {
        self.predicates.push(predicate);
    }

    pub fn is_empty(&self) -> bool {
        self.predicates.is_empty()
    }

    /// Evaluate the query for one book. An empty query matches nothing.
    pub fn matches(&self, book: BookId, terms: &[TaxonomyTerm]) -> bool {
        if self.predicates.is_empty() {
            return false;
        }
        let mut results = self.predicates.iter().map(|p| p.is_satisfied_by(book, terms));
        match self.relation {
            Relation::Or => results.any(|hit| hit),
            Relation::And => results.all(|hit| hit),
        }
    }
}
