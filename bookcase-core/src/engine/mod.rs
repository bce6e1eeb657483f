//! The filter & presentation engine
//!
//! Raw filter attributes go through [`parse_criteria`], the resulting
//! [`FilterCriteria`] is resolved by [`MatchResolver`], and every match is
//! turned into a [`DisplayRecord`] by [`Renderer`]. [`Engine`] wires the three
//! together behind [`Engine::render_matches`].

mod parser;
mod render;
mod resolver;

pub use parser::parse_criteria;
pub use render::Renderer;
pub use resolver::MatchResolver;

use crate::config::Settings;
use crate::error::Result;
use crate::storage::{ContentStore, MetadataAccessor};
use crate::types::{BookItem, DisplayRecord, FilterCriteria};
use std::sync::Arc;

/// Stateless entry point over a content store and metadata accessor
#[derive(Clone)]
pub struct Engine {
    content: Arc<dyn ContentStore>,
    meta: Arc<dyn MetadataAccessor>,
    settings: Settings,
}

impl Engine {
    pub fn new(
        content: Arc<dyn ContentStore>,
        meta: Arc<dyn MetadataAccessor>,
        settings: Settings,
    ) -> Self {
        Self {
            content,
            meta,
            settings,
        }
    }

    /// Build an engine over a store that provides both collaborators
    pub fn over<S>(store: Arc<S>, settings: Settings) -> Self
    where
        S: ContentStore + MetadataAccessor + 'static,
    {
        Self::new(store.clone(), store, settings)
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Matching published items, direct matches first
    pub async fn find(&self, criteria: &FilterCriteria) -> Result<Vec<BookItem>> {
        MatchResolver::new(self.content.as_ref(), self.meta.as_ref())
            .resolve(criteria)
            .await
    }

    /// Display records for every item matching `criteria`
    pub async fn render(&self, criteria: &FilterCriteria) -> Result<Vec<DisplayRecord>> {
        let books = self.find(criteria).await?;
        Renderer::new(self.meta.as_ref(), &self.settings)
            .render_all(&books)
            .await
    }

    /// Parse a raw attribute map, resolve it and render the matches.
    ///
    /// An empty result means nothing matched.
    pub async fn render_matches<I, K, V>(&self, raw: I) -> Result<Vec<DisplayRecord>>
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let criteria = parse_criteria(raw);
        self.render(&criteria).await
    }
}
