//! Post store - discovers post directories and loads their index documents

use std::path::{Component, Path, PathBuf};

use super::fs::{FileSystem, LocalFileSystem};
use super::markdown::{MarkdownDocument, MarkdownRenderer};
use super::metadata::PostMetadata;
use super::post::{PostDetail, PostSummary};
use crate::error::PostError;

/// File name of the index document inside each post directory
pub const INDEX_FILE: &str = "INDEX.md";

/// A post that was excluded because it failed to load
#[derive(Debug)]
pub struct PostFailure {
    /// Directory name of the failing post
    pub slug: String,
    pub error: PostError,
}

/// Result of scanning the posts directory
#[derive(Debug, Default)]
pub struct Scan {
    /// Published posts, newest first
    pub posts: Vec<PostSummary>,
    pub failures: Vec<PostFailure>,
}

/// Reads posts from `<posts_dir>/<slug>/INDEX.md`
///
/// Nothing is cached; every call re-reads the file system.
#[derive(Debug, Clone)]
pub struct PostStore<F = LocalFileSystem> {
    posts_dir: PathBuf,
    fs: F,
    renderer: MarkdownRenderer,
}

impl PostStore<LocalFileSystem> {
    /// Create a store over a directory on the local disk
    pub fn new<P: AsRef<Path>>(posts_dir: P) -> Self {
        Self::with_fs(posts_dir, LocalFileSystem)
    }
}

impl<F: FileSystem> PostStore<F> {
    pub fn with_fs<P: AsRef<Path>>(posts_dir: P, fs: F) -> Self {
        Self {
            posts_dir: posts_dir.as_ref().to_path_buf(),
            fs,
            renderer: MarkdownRenderer::new(),
        }
    }

    pub fn posts_dir(&self) -> &Path {
        &self.posts_dir
    }

    /// All published posts, newest first
    ///
    /// Posts that fail to load are logged and left out.
    pub async fn list(&self) -> Vec<PostSummary> {
        let scan = self.scan().await;
        for failure in &scan.failures {
            tracing::warn!(
                slug = %failure.slug,
                "Failed to load post {}: {}",
                failure.slug,
                failure.error
            );
        }
        scan.posts
    }

    /// Load every post directory, keeping failures apart from the posts
    pub async fn scan(&self) -> Scan {
        let mut scan = Scan::default();

        if !self.fs.dir_exists(&self.posts_dir).await {
            tracing::debug!("Posts directory {:?} does not exist", self.posts_dir);
            return scan;
        }

        let dirs = match self.fs.list_dirs(&self.posts_dir).await {
            Ok(dirs) => dirs,
            Err(e) => {
                tracing::warn!("Failed to list posts directory {:?}: {}", self.posts_dir, e);
                return scan;
            }
        };

        for dir in dirs {
            let Some(slug) = dir.file_name().and_then(|n| n.to_str()).map(str::to_string) else {
                tracing::debug!("Skipping non UTF-8 directory {:?}", dir);
                continue;
            };

            match self.load_summary(&dir, &slug).await {
                Ok(Some(post)) => scan.posts.push(post),
                Ok(None) => {}
                Err(error) => scan.failures.push(PostFailure { slug, error }),
            }
        }

        // Stable: equal dates keep enumeration order
        scan.posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));

        scan
    }

    /// A single published post with its body rendered, or `None`
    ///
    /// Missing, malformed and unpublished posts all come back as `None`.
    pub async fn get(&self, slug: &str) -> Option<PostDetail> {
        match self.load(slug).await {
            Ok(post) => post,
            Err(error) => {
                tracing::warn!(slug = %slug, "Failed to load post {}: {}", slug, error);
                None
            }
        }
    }

    /// Like [`get`](Self::get) but reports load failures
    pub async fn load(&self, slug: &str) -> Result<Option<PostDetail>, PostError> {
        if !is_safe_slug(slug) {
            tracing::debug!("Rejecting slug {:?}", slug);
            return Ok(None);
        }

        let dir = self.posts_dir.join(slug);
        if !self.fs.dir_exists(&dir).await {
            return Ok(None);
        }

        let Some(raw) = self.read_index(&dir).await? else {
            return Ok(None);
        };

        let Some((metadata, document)) = self.parse_published(&raw, slug)? else {
            return Ok(None);
        };

        let content = self.renderer.render(&document);
        Ok(Some(PostDetail {
            summary: PostSummary::new(metadata, slug),
            content,
        }))
    }

    async fn load_summary(&self, dir: &Path, slug: &str) -> Result<Option<PostSummary>, PostError> {
        let Some(raw) = self.read_index(dir).await? else {
            return Ok(None);
        };

        Ok(self
            .parse_published(&raw, slug)?
            .map(|(metadata, _)| PostSummary::new(metadata, slug)))
    }

    /// Raw index document text, or `None` if the directory has no index file
    async fn read_index(&self, dir: &Path) -> Result<Option<String>, PostError> {
        let path = dir.join(INDEX_FILE);
        if !self.fs.file_exists(&path).await {
            tracing::debug!("No {} in {:?}", INDEX_FILE, dir);
            return Ok(None);
        }

        self.fs
            .read_to_string(&path)
            .await
            .map(Some)
            .map_err(|e| PostError::io(path, e))
    }

    /// Split and deserialize an index document, dropping non-posts and drafts
    fn parse_published<'a>(
        &self,
        raw: &'a str,
        slug: &str,
    ) -> Result<Option<(PostMetadata, MarkdownDocument<'a>)>, PostError> {
        let document = self.renderer.split(raw);

        let Some(metadata_text) = document.metadata.as_deref() else {
            tracing::debug!("{}: no metadata block", slug);
            return Ok(None);
        };
        if document.is_empty() {
            tracing::debug!("{}: no content", slug);
            return Ok(None);
        }

        let metadata = PostMetadata::from_json(metadata_text)?;
        if !metadata.is_published {
            tracing::debug!("{}: not published", slug);
            return Ok(None);
        }

        Ok(Some((metadata, document)))
    }
}

/// A slug must be a single normal path component
fn is_safe_slug(slug: &str) -> bool {
    if slug.contains(['/', '\\']) {
        return false;
    }
    let mut components = Path::new(slug).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}
