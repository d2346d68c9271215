//! Display-ready records for projects and blog posts

use serde::Serialize;

use crate::notion::MarkdownString;

/// A tag with its Notion color
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Tag {
    pub name: String,
    pub color: String,
}

/// A project as listed on the projects page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectSummary {
    pub name: String,
    pub description: String,
    /// Project URL; empty URL properties come through as `None`
    pub link: Option<String>,
    /// Technology names, in property order
    pub stack: Vec<String>,
    pub id: String,
}

/// A single project with its page content
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectDetail {
    #[serde(flatten)]
    pub project: ProjectSummary,
    /// Markdown body, empty when the page has no content
    pub content: String,
}

/// Metadata of a blog post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostSummary {
    pub id: String,
    pub title: String,
    pub tags: Vec<Tag>,
    pub description: String,
    /// Publication date, "March 5, 2024"
    pub date: String,
    pub last_edited: String,
    /// Cover image placeholder, always empty
    pub image: String,
    pub author: String,
}

/// A blog post with its markdown body
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PostDetail {
    pub metadata: PostSummary,
    pub markdown: PostMarkdown,
}

/// Body of a post
///
/// Unlike projects, an empty post body does not collapse to `""`: the raw
/// converter result is handed back instead.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PostMarkdown {
    Body(String),
    Raw(MarkdownString),
}

impl PostMarkdown {
    /// Markdown text to render
    pub fn as_str(&self) -> &str {
        match self {
            Self::Body(body) => body,
            Self::Raw(raw) => &raw.parent,
        }
    }
}

impl From<MarkdownString> for PostMarkdown {
    fn from(md: MarkdownString) -> Self {
        match md.body() {
            Some(body) => Self::Body(body.to_string()),
            None => Self::Raw(md),
        }
    }
}
