//! Book item → [`DisplayRecord`]

use crate::config::Settings;
use crate::error::Result;
use crate::storage::MetadataAccessor;
use crate::types::{BookItem, DisplayRecord, MetaKey, MetaLine};

/// Builds display records from matched items
pub struct Renderer<'a> {
    meta: &'a dyn MetadataAccessor,
    currency: &'a str,
}

impl<'a> Renderer<'a> {
    pub fn new(meta: &'a dyn MetadataAccessor, settings: &'a Settings) -> Self {
        Self {
            meta,
            currency: settings.currency_code(),
        }
    }

    /// Render one item. Empty metadata values are skipped; the price carries
    /// the configured currency code.
    pub async fn render(&self, book: &BookItem) -> Result<DisplayRecord> {
        let mut meta = Vec::new();

        for key in MetaKey::ALL {
            let Some(value) = self.meta.get_value(book.id, key).await? else {
                continue;
            };
            if value.is_empty() {
                continue;
            }
            let value = match key {
                MetaKey::Price => format!("{} {}", value, self.currency),
                _ => value,
            };
            meta.push(MetaLine::new(key, value));
        }

        Ok(DisplayRecord {
            id: book.id,
            title: book.title.clone(),
            body: book.body.clone(),
            meta,
        })
    }

    /// Render every item, stopping at the first failure
    pub async fn render_all(&self, books: &[BookItem]) -> Result<Vec<DisplayRecord>> {
        let mut records = Vec::with_capacity(books.len());
        for book in books {
            records.push(self.render(book).await?);
        }
        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use crate::types::BookId;

    #[tokio::test]
    async fn test_price_gets_currency() {
        let store = MemoryStore::new();
        store
            .set_value(BookId(1), MetaKey::Price, "20".into())
            .await
            .unwrap();
        let settings = Settings::default().with_currency("USD");

        let record = Renderer::new(&store, &settings)
            .render(&BookItem::new(1, "Foundation"))
            .await
            .unwrap();
        assert_eq!(record.meta.len(), 1);
        assert_eq!(record.meta[0].to_string(), "Price: 20 USD");
    }

    #[tokio::test]
    async fn test_default_currency() {
        let store = MemoryStore::new();
        store
            .set_value(BookId(1), MetaKey::Price, "350".into())
            .await
            .unwrap();
        let settings = Settings::default();

        let record = Renderer::new(&store, &settings)
            .render(&BookItem::new(1, "Godan"))
            .await
            .unwrap();
        assert_eq!(record.line(MetaKey::Price).unwrap().value, "350 INR");
    }

    #[tokio::test]
    async fn test_lines_follow_display_order() {
        let store = MemoryStore::new();
        for (key, value) in [
            (MetaKey::Url, "https://example.com/foundation"),
            (MetaKey::Year, "1951"),
            (MetaKey::AuthorName, "Isaac Asimov"),
            (MetaKey::Edition, ""),
        ] {
            store
                .set_value(BookId(1), key, value.to_string())
                .await
                .unwrap();
        }
        let settings = Settings::default();

        let record = Renderer::new(&store, &settings)
            .render(&BookItem::new(1, "Foundation").with_body("Psychohistory."))
            .await
            .unwrap();
        let lines: Vec<String> = record.meta.iter().map(|l| l.to_string()).collect();
        assert_eq!(
            lines,
            vec![
                "Author: Isaac Asimov",
                "Year: 1951",
                "URL: https://example.com/foundation",
            ]
        );
        assert_eq!(record.body, "Psychohistory.");
    }

    #[tokio::test]
    async fn test_no_metadata_still_renders() {
        let store = MemoryStore::new();
        let settings = Settings::default();
        let record = Renderer::new(&store, &settings)
            .render(&BookItem::new(5, "Untitled"))
            .await
            .unwrap();
        assert_eq!(record.title, "Untitled");
        assert!(record.meta.is_empty());
    }
}
