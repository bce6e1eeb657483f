//! Find command implementation

use super::Context;
use anyhow::Result;

/// Render the books matching `filters`
pub async fn find(ctx: &Context, filters: Vec<(String, String)>, json: bool) -> Result<()> {
    let records = ctx.engine.render_matches(filters).await?;
    tracing::debug!("Matched {} books", records.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
        return Ok(());
    }

    if records.is_empty() {
        println!("No books found");
        return Ok(());
    }

    for (i, record) in records.iter().enumerate() {
        if i > 0 {
            println!();
        }
        println!("{} (#{})", record.title, record.id);
        if !record.body.is_empty() {
            println!("  {}", record.body);
        }
        for line in &record.meta {
            println!("  {}", line);
        }
    }

    Ok(())
}
