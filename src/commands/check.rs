//! Validate every post directory

use anyhow::Result;

use crate::Journal;

/// Report posts that fail to load; errors if there are any
pub async fn run(journal: &Journal) -> Result<()> {
    let store = journal.store();
    let scan = store.scan().await;

    println!(
        "Checked {:?}: {} published, {} failed",
        store.posts_dir(),
        scan.posts.len(),
        scan.failures.len()
    );
    for failure in &scan.failures {
        println!("  {}: {}", failure.slug, failure.error);
    }

    if !scan.failures.is_empty() {
        anyhow::bail!("{} post(s) failed to load", scan.failures.len());
    }

    Ok(())
}
