//! HTTP client for the Notion REST API

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::RequestBuilder;
use serde::de::DeserializeOwned;

use super::error::{NotionError, Result};
use super::query::DatabaseQuery;
use super::schema::{Block, Page, PaginatedList};
use crate::config::NotionConfig;

/// Public API endpoint
pub const DEFAULT_BASE_URL: &str = "https://api.notion.com/v1";

/// API version sent in the `Notion-Version` header
pub const DEFAULT_NOTION_VERSION: &str = "2022-06-28";

/// Characters escaped when an id is placed in a URL path segment
const SEGMENT: &AsciiSet = &NON_ALPHANUMERIC.remove(b'-').remove(b'_');

/// Encode an id as a single path segment
fn segment(id: &str) -> String {
    utf8_percent_encode(id, SEGMENT).to_string()
}

/// Authenticated handle to the Notion API
///
/// Cloning is cheap: the underlying connection pool is shared.
#[derive(Clone)]
pub struct NotionClient {
    http: reqwest::Client,
    base_url: String,
    token: String,
    version: String,
    page_size: u32,
}

impl std::fmt::Debug for NotionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NotionClient")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("page_size", &self.page_size)
            .finish_non_exhaustive()
    }
}

impl NotionClient {
    /// Create a client authenticated with an integration token
    pub fn new(token: impl Into<String>, config: &NotionConfig) -> Result<Self> {
        let token = token.into();
        if token.trim().is_empty() {
            return Err(NotionError::Unauthorized(
                "no Notion token configured".to_string(),
            ));
        }

        let http = reqwest::Client::builder()
            .user_agent(concat!("folio-rs/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            token,
            version: config.version.clone(),
            page_size: config.page_size.clamp(1, 100),
        })
    }

    /// Query a database, following pagination until all rows are collected
    pub async fn query_database(
        &self,
        database_id: &str,
        query: &DatabaseQuery,
    ) -> Result<Vec<Page>> {
        let url = format!("{}/databases/{}/query", self.base_url, segment(database_id));
        let mut query = query.clone();
        if query.page_size.is_none() {
            query.page_size = Some(self.page_size);
        }

        let mut pages = Vec::new();
        loop {
            tracing::debug!(
                "Querying database {} (cursor: {:?})",
                database_id,
                query.start_cursor
            );
            let list: PaginatedList<Page> = self.send(self.http.post(&url).json(&query)).await?;
            pages.extend(list.results);

            match list.next_cursor {
                Some(cursor) if list.has_more => query.start_cursor = Some(cursor),
                _ => break,
            }
        }

        Ok(pages)
    }

    /// Retrieve a single page with its properties
    pub async fn retrieve_page(&self, page_id: &str) -> Result<Page> {
        tracing::debug!("Retrieving page {}", page_id);
        let url = format!("{}/pages/{}", self.base_url, segment(page_id));
        self.send(self.http.get(&url)).await
    }

    /// List the direct children of a block (or page), following pagination
    pub async fn block_children(&self, block_id: &str) -> Result<Vec<Block>> {
        let url = format!("{}/blocks/{}/children", self.base_url, segment(block_id));
        let page_size = self.page_size.to_string();
        let mut cursor: Option<String> = None;
        let mut blocks = Vec::new();

        loop {
            tracing::debug!("Listing children of {} (cursor: {:?})", block_id, cursor);
            let mut request = self
                .http
                .get(&url)
                .query(&[("page_size", page_size.as_str())]);
            if let Some(cursor) = &cursor {
                request = request.query(&[("start_cursor", cursor.as_str())]);
            }

            let list: PaginatedList<Block> = self.send(request).await?;
            blocks.extend(list.results);

            match list.next_cursor {
                Some(next) if list.has_more => cursor = Some(next),
                _ => break,
            }
        }

        Ok(blocks)
    }

    /// Attach auth headers, send, and decode a JSON response
    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .bearer_auth(&self.token)
            .header("Notion-Version", &self.version)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(NotionError::from_response(status.as_u16(), &body));
        }

        let bytes = response.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| NotionError::Decode(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_token_is_unauthorized() {
        let err = NotionClient::new("  ", &NotionConfig::default()).unwrap_err();
        assert!(matches!(err, NotionError::Unauthorized(_)));
    }

    #[test]
    fn test_base_url_normalized() {
        let config = NotionConfig {
            base_url: "http://localhost:9000/v1/".to_string(),
            page_size: 500,
            ..NotionConfig::default()
        };
        let client = NotionClient::new("secret", &config).unwrap();
        assert_eq!(client.base_url, "http://localhost:9000/v1");
        assert_eq!(client.page_size, 100);
    }

    #[test]
    fn test_segment_keeps_ids_in_one_segment() {
        assert_eq!(segment("1a2b-3c4d_5e"), "1a2b-3c4d_5e");
        assert_eq!(segment("../users/me"), "%2E%2E%2Fusers%2Fme");
    }

    #[test]
    fn test_debug_hides_token() {
        let client = NotionClient::new("secret_token", &NotionConfig::default()).unwrap();
        assert!(!format!("{:?}", client).contains("secret_token"));
    }
}
