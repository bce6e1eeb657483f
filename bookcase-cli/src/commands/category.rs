//! Category command implementations

use super::Context;
use anyhow::Result;
use bookcase_core::catalog::{category_listing, top_categories as rank_categories};
use bookcase_core::TermId;

/// Print the published books of a category
pub async fn category(ctx: &Context, term: u64) -> Result<()> {
    match category_listing(ctx.store.as_ref(), TermId(term)).await? {
        Some(listing) => {
            println!("{}", listing.name);
            for book in &listing.books {
                println!("  {:>4}  {}", book.id, book.title);
            }
        }
        None => println!("No books in category {}", term),
    }
    Ok(())
}

/// Print categories ranked by number of books
pub async fn top_categories(ctx: &Context, limit: usize) -> Result<()> {
    let counts = rank_categories(ctx.store.as_ref(), limit).await?;
    if counts.is_empty() {
        println!("No categories found");
        return Ok(());
    }
    for c in &counts {
        println!("{} ({})", c.name, c.count);
    }
    Ok(())
}
