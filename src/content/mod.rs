//! Content module - projects and posts fetched from Notion

mod client;
mod markdown;
mod models;
pub mod normalize;

pub use client::ContentClient;
pub use markdown::{escape_html, MarkdownRenderer};
pub use models::{PostDetail, PostMarkdown, PostSummary, ProjectDetail, ProjectSummary, Tag};
pub use normalize::{format_date, get_tags};
