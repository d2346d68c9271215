//! Configuration module

mod credentials;
mod site;

pub use credentials::{Credentials, BLOG_VAR, PROJECTS_VAR, TOKEN_VAR};
pub use site::HighlightConfig;
pub use site::NotionConfig;
pub use site::PageMetadata;
pub use site::ServerConfig;
pub use site::SiteConfig;
