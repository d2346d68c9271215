//! List projects and posts

use anyhow::Result;

use crate::content::PostSummary;
use crate::Folio;

/// Which posts to list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PostFilter {
    Published,
    Tag(String),
    Author(String),
}

impl PostFilter {
    /// Build a filter from optional CLI arguments; a tag wins over an author
    pub fn from_args(tag: Option<String>, author: Option<String>) -> Self {
        match (tag, author) {
            (Some(tag), _) => Self::Tag(tag),
            (None, Some(author)) => Self::Author(author),
            (None, None) => Self::Published,
        }
    }
}

/// List all projects
pub async fn projects(folio: &Folio, json: bool) -> Result<()> {
    let projects = folio.content.list_projects().await?;
    tracing::debug!("Fetched {} projects", projects.len());

    if json {
        println!("{}", serde_json::to_string_pretty(&projects)?);
        return Ok(());
    }

    println!("Projects ({}):", projects.len());
    for project in projects {
        println!(
            "  {} - {} [{}] ({})",
            project.name,
            project.description,
            project.stack.join(", "),
            project.id
        );
    }

    Ok(())
}

/// List posts matching a filter
pub async fn posts(folio: &Folio, filter: &PostFilter, json: bool) -> Result<()> {
    let posts = fetch_posts(folio, filter).await?;
    tracing::debug!("Fetched {} posts for {:?}", posts.len(), filter);

    if json {
        println!("{}", serde_json::to_string_pretty(&posts)?);
        return Ok(());
    }

    println!("Posts ({}):", posts.len());
    for post in posts {
        let tags: Vec<&str> = post.tags.iter().map(|t| t.name.as_str()).collect();
        println!(
            "  {} - {} by {} [{}] ({})",
            post.date,
            post.title,
            post.author,
            tags.join(", "),
            post.id
        );
    }

    Ok(())
}

async fn fetch_posts(folio: &Folio, filter: &PostFilter) -> Result<Vec<PostSummary>> {
    let content = &folio.content;
    let posts = match filter {
        PostFilter::Published => content.list_posts().await?,
        PostFilter::Tag(tag) => content.list_posts_by_tag(tag).await?,
        PostFilter::Author(author) => content.list_posts_by_author(author).await?,
    };
    Ok(posts)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_from_args() {
        assert_eq!(PostFilter::from_args(None, None), PostFilter::Published);
        assert_eq!(
            PostFilter::from_args(Some("rust".into()), Some("Ada".into())),
            PostFilter::Tag("rust".into())
        );
        assert_eq!(
            PostFilter::from_args(None, Some("Ada".into())),
            PostFilter::Author("Ada".into())
        );
    }
}
