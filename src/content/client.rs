//! Content client - projects and blog posts backed by Notion databases

use anyhow::Result as AnyResult;
use chrono_tz::Tz;

use super::models::{PostDetail, PostSummary, ProjectDetail, ProjectSummary};
use super::normalize::{post_summary, project_summary};
use crate::config::{Credentials, SiteConfig};
use crate::notion::{
    DatabaseQuery, Direction, Filter, MarkdownConverter, MarkdownString, NotionClient, Page,
    Result,
};

/// Queries the projects and blog databases and shapes the results for display
///
/// Built once by the host application and shared; holds no mutable state.
#[derive(Debug, Clone)]
pub struct ContentClient {
    notion: NotionClient,
    converter: MarkdownConverter,
    projects_db: String,
    blog_db: String,
    timezone: Tz,
}

impl ContentClient {
    /// Create a content client from its parts
    pub fn new(
        notion: NotionClient,
        converter: MarkdownConverter,
        projects_db: impl Into<String>,
        blog_db: impl Into<String>,
        timezone: Tz,
    ) -> Self {
        Self {
            notion,
            converter,
            projects_db: projects_db.into(),
            blog_db: blog_db.into(),
            timezone,
        }
    }

    /// Create a content client from site configuration and credentials
    pub fn from_config(credentials: &Credentials, config: &SiteConfig) -> AnyResult<Self> {
        let notion = NotionClient::new(credentials.token.clone(), &config.notion)?;
        let converter = MarkdownConverter::new(config.notion.separate_child_pages);
        Ok(Self::new(
            notion,
            converter,
            &credentials.projects_id,
            &credentials.blog_db_id,
            config.display_timezone()?,
        ))
    }

    /// All projects, sorted by name
    pub async fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        let query = DatabaseQuery::new().sort("Name", Direction::Ascending);
        let pages = self.notion.query_database(&self.projects_db, &query).await?;
        pages.iter().map(project_summary).collect()
    }

    /// A single project with its content as markdown
    pub async fn get_project(&self, id: &str) -> Result<ProjectDetail> {
        let page = self.notion.retrieve_page(id).await?;
        let project = project_summary(&page)?;
        let markdown = self.page_markdown(&page).await?;

        Ok(ProjectDetail {
            project,
            content: markdown.body().unwrap_or_default().to_string(),
        })
    }

    /// Published posts, newest first
    pub async fn list_posts(&self) -> Result<Vec<PostSummary>> {
        self.query_posts(Filter::checkbox("Published", true)).await
    }

    /// Posts carrying `tag`, newest first
    pub async fn list_posts_by_tag(&self, tag: &str) -> Result<Vec<PostSummary>> {
        self.query_posts(Filter::multi_select_contains("Tags", tag)).await
    }

    /// Posts whose `Author` formula equals `author`, newest first
    pub async fn list_posts_by_author(&self, author: &str) -> Result<Vec<PostSummary>> {
        self.query_posts(Filter::formula_string_equals("Author", author))
            .await
    }

    /// A single post with its markdown body
    pub async fn get_post(&self, id: &str) -> Result<PostDetail> {
        let page = self.notion.retrieve_page(id).await?;
        let metadata = post_summary(&page, &self.timezone)?;
        let markdown = self.page_markdown(&page).await?;

        Ok(PostDetail {
            metadata,
            markdown: markdown.into(),
        })
    }

    async fn query_posts(&self, filter: Filter) -> Result<Vec<PostSummary>> {
        let query = DatabaseQuery::new()
            .filter(filter)
            .sort("Date", Direction::Descending);
        let pages = self.notion.query_database(&self.blog_db, &query).await?;
        pages
            .iter()
            .map(|page| post_summary(page, &self.timezone))
            .collect()
    }

    async fn page_markdown(&self, page: &Page) -> Result<MarkdownString> {
        let blocks = self.converter.page_to_markdown(&self.notion, &page.id).await?;
        Ok(self.converter.to_markdown_string(&blocks))
    }
}
