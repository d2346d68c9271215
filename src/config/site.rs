//! Site configuration (config.json)

use anyhow::{Context, Result};
use chrono_tz::Tz;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::notion::{DEFAULT_BASE_URL, DEFAULT_NOTION_VERSION};

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub timezone: String,
    pub font: String,

    // Per-route page metadata, keyed by route ("/cv", "/blog", ...)
    pub metadata: IndexMap<String, PageMetadata>,

    pub notion: NotionConfig,
    pub server: ServerConfig,
    pub highlight: HighlightConfig,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
            author: String::new(),
            language: "en".to_string(),
            timezone: "UTC".to_string(),
            font: "Outfit".to_string(),

            metadata: IndexMap::new(),

            notion: NotionConfig::default(),
            server: ServerConfig::default(),
            highlight: HighlightConfig::default(),
            extra: IndexMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        config.display_timezone()?;
        Ok(config)
    }

    /// Metadata for a route, falling back to the site title and description
    pub fn page_metadata(&self, route: &str) -> PageMetadata {
        let route = normalize_route(route);
        match self.metadata.get(route.as_str()) {
            Some(meta) => PageMetadata {
                title: non_empty_or(&meta.title, &self.title),
                description: non_empty_or(&meta.description, &self.description),
            },
            None => PageMetadata {
                title: self.title.clone(),
                description: self.description.clone(),
            },
        }
    }

    /// Timezone used when formatting dates
    pub fn display_timezone(&self) -> Result<Tz> {
        self.timezone
            .parse::<Tz>()
            .map_err(|e| anyhow::anyhow!("Invalid timezone '{}': {}", self.timezone, e))
    }
}

fn normalize_route(route: &str) -> String {
    let trimmed = route.trim_end_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}

fn non_empty_or(value: &str, fallback: &str) -> String {
    if value.is_empty() {
        fallback.to_string()
    } else {
        value.to_string()
    }
}

/// Title and description of a page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageMetadata {
    pub title: String,
    pub description: String,
}

/// Notion API settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct NotionConfig {
    pub base_url: String,
    pub version: String,
    pub page_size: u32,
    pub separate_child_pages: bool,
}

impl Default for NotionConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            version: DEFAULT_NOTION_VERSION.to_string(),
            page_size: 100,
            separate_child_pages: false,
        }
    }
}

/// Development server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub ip: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            ip: "localhost".to_string(),
            port: 3000,
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.timezone, "UTC");
        assert_eq!(config.notion.base_url, "https://api.notion.com/v1");
        assert_eq!(config.notion.page_size, 100);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "title": "Jane Doe",
            "description": "Personal site",
            "metadata": {
                "/cv": {"title": "CV | Jane Doe", "description": "Experience and skills"},
                "/blog": {"title": "Blog"}
            },
            "notion": {"page_size": 50},
            "analytics": "G-123"
        }"#;
        let config: SiteConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.title, "Jane Doe");
        assert_eq!(config.notion.page_size, 50);
        assert_eq!(config.notion.version, "2022-06-28");
        assert_eq!(config.extra.get("analytics"), Some(&serde_json::json!("G-123")));

        let cv = config.page_metadata("/cv");
        assert_eq!(cv.title, "CV | Jane Doe");
        assert_eq!(cv.description, "Experience and skills");

        let blog = config.page_metadata("blog/");
        assert_eq!(blog.title, "Blog");
        assert_eq!(blog.description, "Personal site");

        let other = config.page_metadata("/projects");
        assert_eq!(other.title, "Jane Doe");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"timezone": "Europe/Paris"}}"#).unwrap();
        let config = SiteConfig::load(file.path()).unwrap();
        assert_eq!(config.display_timezone().unwrap(), chrono_tz::Europe::Paris);
    }

    #[test]
    fn test_invalid_timezone_rejected() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"timezone": "Mars/Olympus"}}"#).unwrap();
        assert!(SiteConfig::load(file.path()).is_err());
    }
}
