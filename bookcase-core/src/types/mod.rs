//! Core types for the book catalog

mod book;
mod criteria;
mod display;
mod metadata;
mod taxonomy;

pub use book::{BookId, BookItem, PostStatus};
pub use criteria::FilterCriteria;
pub use display::{DisplayRecord, MetaLine};
pub use metadata::{MetaKey, MetadataEntry, UnknownMetaKey};
pub use taxonomy::{
    slugify, Relation, Taxonomy, TaxonomyPredicate, TaxonomyQuery, TaxonomyTerm, TermField, TermId,
};
