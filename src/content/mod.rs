//! Content module - post discovery, metadata and markdown rendering

pub mod fs;
mod markdown;
mod metadata;
mod post;
pub mod store;

pub use fs::{FileSystem, LocalFileSystem};
pub use markdown::{MarkdownDocument, MarkdownRenderer, META_MARKER};
pub use metadata::PostMetadata;
pub use post::{PostDetail, PostSummary};
pub use store::{PostFailure, PostStore, Scan, INDEX_FILE};
