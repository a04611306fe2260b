//! Show a single post

use anyhow::Result;

use crate::Journal;

/// Print a post's metadata and rendered HTML
pub async fn run(journal: &Journal, slug: &str, json: bool) -> Result<()> {
    let Some(post) = journal.store().get(slug).await else {
        anyhow::bail!("Post not found: {}", slug);
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    println!("{}", post.summary.title);
    println!("{}", post.summary.published_at.format("%B %-d, %Y"));
    if !post.summary.lead.is_empty() {
        println!("\n{}", post.summary.lead);
    }
    println!("\n{}", post.content);

    Ok(())
}
