//! Archive command implementation

use super::Context;
use anyhow::Result;
use bookcase_core::catalog::archive_page;

/// Print one page of published books
pub async fn archive(ctx: &Context, page: u32, json: bool) -> Result<()> {
    let page = archive_page(ctx.store.as_ref(), ctx.settings(), page).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&page)?);
        return Ok(());
    }

    let pages = page.total.div_ceil(page.per_page as usize).max(1);
    println!("Page {} of {} ({} books)", page.page, pages, page.total);
    for book in &page.items {
        println!("  {:>4}  {}", book.id, book.title);
    }

    Ok(())
}
