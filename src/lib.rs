//! folio-rs: a personal site backed by Notion
//!
//! Projects and blog posts live in two Notion databases. This crate queries
//! them, shapes the records for display, converts page content to markdown
//! and serves the result as JSON and HTML.

pub mod commands;
pub mod config;
pub mod content;
pub mod layout;
pub mod notion;
pub mod server;

use anyhow::Result;
use std::path::{Path, PathBuf};

use config::{Credentials, SiteConfig};
use content::ContentClient;

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "config.json";

/// The site application
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content client shared by all commands and handlers
    pub content: ContentClient,
}

impl Folio {
    /// Create a new site from a directory and Notion credentials
    pub fn new<P: AsRef<Path>>(base_dir: P, credentials: &Credentials) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            SiteConfig::load(&config_path)?
        } else {
            tracing::debug!("No {} in {:?}, using defaults", CONFIG_FILE, base_dir);
            SiteConfig::default()
        };

        Self::with_config(base_dir, config, credentials)
    }

    /// Create a site from an already loaded configuration
    pub fn with_config(
        base_dir: PathBuf,
        config: SiteConfig,
        credentials: &Credentials,
    ) -> Result<Self> {
        let content = ContentClient::from_config(credentials, &config)?;
        Ok(Self {
            config,
            base_dir,
            content,
        })
    }

    /// Serve the site
    pub async fn serve(&self, ip: &str, port: u16) -> Result<()> {
        server::start(self, ip, port).await
    }
}
