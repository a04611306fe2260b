//! List published posts

use anyhow::Result;

use crate::config::SiteConfig;
use crate::Journal;

/// Print published posts, newest first
pub async fn run(journal: &Journal, json: bool) -> Result<()> {
    let posts = journal.store().list().await;

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    print!("{}", header(&journal.config));
    println!("Posts ({}):", posts.len());
    for post in posts {
        println!(
            "  {} - {} [{}]",
            post.published_at.format("%Y-%m-%d"),
            post.title,
            post.permalink(&journal.config.url)
        );
    }

    Ok(())
}

/// Site title and description shown above the listing
fn header(config: &SiteConfig) -> String {
    let mut header = format!("{}\n", config.title);
    if !config.description.is_empty() {
        header.push_str(&format!("{}\n", config.description));
    }
    header.push('\n');
    header
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_with_description() {
        let config = SiteConfig {
            title: "journal".to_string(),
            description: "A blog by Stevan Freeborn".to_string(),
            ..Default::default()
        };
        assert_eq!(header(&config), "journal\nA blog by Stevan Freeborn\n\n");
    }

    #[test]
    fn test_header_without_description() {
        assert_eq!(header(&SiteConfig::default()), "journal\n\n");
    }
}
