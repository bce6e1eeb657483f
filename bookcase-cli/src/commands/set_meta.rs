//! Set-meta command implementation

use super::Context;
use anyhow::{bail, Context as _, Result};
use bookcase_core::catalog::save_metadata;
use bookcase_core::{BookId, MetaKey};
use std::collections::HashMap;

/// Replace a book's metadata and write the library back
pub async fn set_meta(ctx: &Context, book: u64, fields: Vec<(String, String)>) -> Result<()> {
    let id = BookId(book);
    if ctx.store.book(id)?.is_none() {
        bail!("Book {} not found", id);
    }

    for (key, _) in &fields {
        key.parse::<MetaKey>()?;
    }
    let form: HashMap<String, String> = fields.into_iter().collect();

    save_metadata(ctx.store.as_ref(), id, &form).await?;
    ctx.store
        .save(&ctx.library_path)
        .await
        .with_context(|| format!("Failed to write {}", ctx.library_path.display()))?;

    tracing::info!("Updated metadata of book {}", id);
    Ok(())
}
