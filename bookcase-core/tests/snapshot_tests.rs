//! Snapshot tests for rendered display records using insta
//!
//! These capture the serialized shape of display records so changes to
//! labels, ordering or the price suffix show up as snapshot diffs.

use bookcase_core::storage::{MemoryStore, MetadataAccessor};
use bookcase_core::types::{BookId, BookItem, MetaKey, Taxonomy};
use bookcase_core::{Engine, Settings};
use std::sync::Arc;

/// Helper to create a small catalog with every metadata field in use
async fn sample_store() -> Arc<MemoryStore> {
    let store = Arc::new(MemoryStore::new());

    store
        .insert_book(BookItem::new(1, "Foundation").with_body("The Galactic Empire is dying."))
        .unwrap();
    store
        .insert_book(BookItem::new(2, "Rendezvous with Rama").with_body("A cylinder arrives."))
        .unwrap();

    let full = [
        (MetaKey::Url, "https://example.com/foundation"),
        (MetaKey::Edition, "First"),
        (MetaKey::Year, "1951"),
        (MetaKey::Publisher, "Gnome Press"),
        (MetaKey::Price, "20"),
        (MetaKey::AuthorName, "Isaac Asimov"),
    ];
    for (key, value) in full {
        store.set_value(BookId(1), key, value.to_string()).await.unwrap();
    }
    store
        .set_value(BookId(2), MetaKey::AuthorName, "Arthur C. Clarke".to_string())
        .await
        .unwrap();

    let scifi = store.add_term(Taxonomy::Category, "SciFi", None).unwrap();
    store.assign_term(scifi, BookId(2)).unwrap();

    store
}

#[tokio::test]
async fn test_display_records_json_snapshot() {
    let store = sample_store().await;
    let engine = Engine::over(store, Settings::default().with_currency("USD"));

    let records = engine
        .render_matches([("author_name", "Isaac Asimov"), ("category", "SciFi")])
        .await
        .unwrap();
    let json = serde_json::to_string_pretty(&records).unwrap();
    insta::assert_snapshot!("display_records_json", json);
}
