//! Post models

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::metadata::PostMetadata;

/// A published post as it appears in listings and feeds
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PostSummary {
    /// Post title
    pub title: String,

    /// Short excerpt shown in listings
    pub lead: String,

    /// Whether the post is published
    pub is_published: bool,

    /// Publication date, used for ordering
    pub published_at: DateTime<Utc>,

    /// Slug (name of the post directory)
    pub slug: String,
}

impl PostSummary {
    /// Build a summary from metadata; the metadata slug is discarded
    pub fn new(metadata: PostMetadata, slug: impl Into<String>) -> Self {
        Self {
            title: metadata.title,
            lead: metadata.lead,
            is_published: metadata.is_published,
            published_at: metadata.published_at,
            slug: slug.into(),
        }
    }

    /// Absolute URL of the post under `base_url`
    pub fn permalink(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.slug)
    }
}

/// A single post with its body rendered to HTML
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetail {
    #[serde(flatten)]
    pub summary: PostSummary,

    /// Rendered HTML content
    pub content: String,
}
