//! Page layout: document shell, metadata and font
//!
//! Every HTML page is wrapped in the same shell. The `<title>` and
//! description come from the `metadata` table of the site config, looked up
//! by route, and the body carries the class of the configured font.

mod pages;

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::config::{PageMetadata, SiteConfig};
use crate::content::escape_html;

pub use pages::{post_list, post_page, project_list, project_page, tag_url};

/// Layout of a single page
#[derive(Debug, Clone, PartialEq)]
pub struct Layout {
    pub metadata: PageMetadata,
    pub font: String,
    pub language: String,
}

impl Layout {
    /// Layout for a route, with metadata resolved from the site config
    pub fn for_route(config: &SiteConfig, route: &str) -> Self {
        Self {
            metadata: config.page_metadata(route),
            font: config.font.clone(),
            language: config.language.clone(),
        }
    }

    /// Replace the page title, e.g. with a post title
    pub fn with_title(mut self, title: &str) -> Self {
        self.metadata.title = title.to_string();
        self
    }

    /// Replace the page description
    pub fn with_description(mut self, description: &str) -> Self {
        self.metadata.description = description.to_string();
        self
    }

    /// CSS class applied to `<body>`
    pub fn font_class(&self) -> String {
        font_class(&self.font)
    }

    /// Wrap an HTML body in the document shell
    pub fn render(&self, body: &str) -> String {
        let family = utf8_percent_encode(&self.font, NON_ALPHANUMERIC).to_string();
        let class = self.font_class();

        format!(
            r#"<!DOCTYPE html>
<html lang="{lang}">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<meta name="description" content="{description}">
<link rel="stylesheet" href="https://fonts.googleapis.com/css2?family={family}&display=swap">
<style>.{class} {{ font-family: '{font}', sans-serif; }}</style>
</head>
<body class="{class}">{body}</body>
</html>
"#,
            lang = escape_html(&self.language),
            title = escape_html(&self.metadata.title),
            description = escape_html(&self.metadata.description),
            family = family,
            class = class,
            font = escape_html(&self.font),
            body = body,
        )
    }
}

/// Class name derived from a font family ("Fira Sans" -> "font-fira-sans")
fn font_class(font: &str) -> String {
    format!("font-{}", slug::slugify(font))
}
