//! Convert Notion content blocks to markdown
//!
//! Conversion happens in two steps. [`MarkdownConverter::page_to_markdown`]
//! walks the block tree of a page over the API and renders each block into an
//! [`MdBlock`]; [`MarkdownConverter::to_markdown_string`] then joins the tree
//! into a single [`MarkdownString`].

use indexmap::IndexMap;
use serde::Serialize;
use std::future::Future;
use std::pin::Pin;

use super::client::NotionClient;
use super::error::Result;
use super::schema::{Block, BlockContent, RichText, TableBlock};

/// A block rendered to markdown, with its rendered children
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MdBlock {
    #[serde(rename = "type")]
    pub block_type: String,
    pub block_id: String,
    pub parent: String,
    pub children: Vec<MdBlock>,
}

impl MdBlock {
    pub fn new(block_type: &str, parent: impl Into<String>) -> Self {
        Self {
            block_type: block_type.to_string(),
            block_id: String::new(),
            parent: parent.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<MdBlock>) -> Self {
        self.children = children;
        self
    }

    fn is_list_item(&self) -> bool {
        matches!(
            self.block_type.as_str(),
            "bulleted_list_item" | "numbered_list_item" | "to_do"
        )
    }
}

/// Joined markdown of a page
///
/// `parent` is the page body. Child pages land in `child_pages` keyed by
/// title when they are rendered separately; they serialize as extra keys
/// next to `parent`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MarkdownString {
    pub parent: String,
    #[serde(flatten)]
    pub child_pages: IndexMap<String, String>,
}

impl MarkdownString {
    /// The page body, if there is one
    pub fn body(&self) -> Option<&str> {
        if self.parent.is_empty() {
            None
        } else {
            Some(&self.parent)
        }
    }
}

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Block-to-markdown converter
#[derive(Debug, Clone, Default)]
pub struct MarkdownConverter {
    separate_child_pages: bool,
}

impl MarkdownConverter {
    pub fn new(separate_child_pages: bool) -> Self {
        Self {
            separate_child_pages,
        }
    }

    /// Fetch and render the whole block tree of a page
    pub async fn page_to_markdown(
        &self,
        client: &NotionClient,
        page_id: &str,
    ) -> Result<Vec<MdBlock>> {
        let blocks = client.block_children(page_id).await?;
        self.convert_blocks(client, blocks).await
    }

    fn convert_blocks<'a>(
        &'a self,
        client: &'a NotionClient,
        blocks: Vec<Block>,
    ) -> BoxFuture<'a, Result<Vec<MdBlock>>> {
        Box::pin(async move {
            let mut rendered = Vec::with_capacity(blocks.len());
            let mut number = 0;

            for block in blocks {
                number = match block.content {
                    BlockContent::NumberedListItem { .. } => number + 1,
                    _ => 0,
                };

                let raw_children = if block.has_children {
                    client.block_children(&block.id).await?
                } else {
                    Vec::new()
                };

                let (parent, children) = match &block.content {
                    BlockContent::Table { table } => {
                        (table_to_markdown(table, &raw_children), Vec::new())
                    }
                    _ => (
                        self.block_to_markdown(&block, number),
                        self.convert_blocks(client, raw_children).await?,
                    ),
                };

                rendered.push(MdBlock {
                    block_type: block.content.type_name().to_string(),
                    block_id: block.id,
                    parent,
                    children,
                });
            }

            Ok(rendered)
        })
    }

    /// Render a single block, without its children
    ///
    /// `number` is the position of a numbered list item within its list.
    pub fn block_to_markdown(&self, block: &Block, number: usize) -> String {
        match &block.content {
            BlockContent::Paragraph { paragraph } => rich_text_to_markdown(&paragraph.rich_text),
            BlockContent::Heading1 { heading_1 } => {
                format!("# {}", rich_text_to_markdown(&heading_1.rich_text))
            }
            BlockContent::Heading2 { heading_2 } => {
                format!("## {}", rich_text_to_markdown(&heading_2.rich_text))
            }
            BlockContent::Heading3 { heading_3 } => {
                format!("### {}", rich_text_to_markdown(&heading_3.rich_text))
            }
            BlockContent::BulletedListItem { bulleted_list_item } => {
                format!("- {}", rich_text_to_markdown(&bulleted_list_item.rich_text))
            }
            BlockContent::NumberedListItem { numbered_list_item } => format!(
                "{}. {}",
                number.max(1),
                rich_text_to_markdown(&numbered_list_item.rich_text)
            ),
            BlockContent::ToDo { to_do } => format!(
                "- [{}] {}",
                if to_do.checked { "x" } else { " " },
                rich_text_to_markdown(&to_do.rich_text)
            ),
            BlockContent::Toggle { toggle } => rich_text_to_markdown(&toggle.rich_text),
            BlockContent::Quote { quote } => quote_lines(&rich_text_to_markdown(&quote.rich_text)),
            BlockContent::Callout { callout } => {
                let text = rich_text_to_markdown(&callout.rich_text);
                match callout.icon.as_ref().and_then(|i| i.emoji.as_deref()) {
                    Some(emoji) => quote_lines(&format!("{} {}", emoji, text)),
                    None => quote_lines(&text),
                }
            }
            BlockContent::Code { code } => {
                let language = match code.language.as_str() {
                    "plain text" => "text",
                    other => other,
                };
                let source = plain_text(&code.rich_text);
                let fence = "`".repeat(longest_backtick_run(&source).max(2) + 1);
                format!("{fence}{}\n{}\n{fence}", language, source, fence = fence)
            }
            BlockContent::Divider => "---".to_string(),
            BlockContent::Image { image } => {
                format!("![{}]({})", plain_text(&image.caption), image.url())
            }
            BlockContent::Video { video: media }
            | BlockContent::File { file: media }
            | BlockContent::Pdf { pdf: media } => {
                let caption = plain_text(&media.caption);
                let label = if caption.is_empty() {
                    block.content.type_name().to_string()
                } else {
                    caption
                };
                format!("[{}]({})", label, media.url())
            }
            BlockContent::Bookmark { bookmark: link }
            | BlockContent::Embed { embed: link }
            | BlockContent::LinkPreview { link_preview: link } => {
                let caption = plain_text(&link.caption);
                let label = if caption.is_empty() {
                    link.url.clone()
                } else {
                    caption
                };
                format!("[{}]({})", label, link.url)
            }
            BlockContent::Equation { equation } => format!("$$\n{}\n$$", equation.expression),
            BlockContent::ChildPage { child_page } => {
                if self.separate_child_pages {
                    child_page.title.clone()
                } else {
                    format!("## {}", child_page.title)
                }
            }
            BlockContent::Table { .. } | BlockContent::TableRow { .. } => String::new(),
            BlockContent::Unsupported => String::new(),
        }
    }

    /// Join rendered blocks into the final markdown
    pub fn to_markdown_string(&self, blocks: &[MdBlock]) -> MarkdownString {
        let mut child_pages = IndexMap::new();
        let parent = self.render_level(blocks, 0, &mut child_pages);
        MarkdownString {
            parent: parent.trim_matches('\n').to_string(),
            child_pages,
        }
    }

    fn render_level(
        &self,
        blocks: &[MdBlock],
        nesting: usize,
        child_pages: &mut IndexMap<String, String>,
    ) -> String {
        let mut out = String::new();

        for block in blocks {
            if block.block_type == "child_page" && self.separate_child_pages {
                let body = self.render_level(&block.children, 0, child_pages);
                child_pages.insert(block.parent.clone(), body.trim_matches('\n').to_string());
                continue;
            }

            if block.block_type == "toggle" {
                let inner = self.render_level(&block.children, 0, child_pages);
                let details = format!(
                    "<details>\n<summary>{}</summary>\n\n{}\n</details>",
                    block.parent,
                    inner.trim_matches('\n')
                );
                out.push_str(&indent(&format!("\n{}\n", details), nesting));
                continue;
            }

            if block.parent.is_empty() && block.children.is_empty() {
                continue;
            }

            if block.is_list_item() {
                out.push_str(&indent(&format!("{}\n", block.parent), nesting));
                out.push_str(&self.render_level(&block.children, nesting + 1, child_pages));
            } else if matches!(block.block_type.as_str(), "quote" | "callout") {
                // Children continue the blockquote
                let inner = self.render_level(&block.children, 0, child_pages);
                let inner = quote_lines(inner.trim_matches('\n'));
                let quoted = [block.parent.as_str(), inner.as_str()]
                    .into_iter()
                    .filter(|part| !part.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n>\n");
                out.push_str(&indent(&format!("\n{}\n", quoted), nesting));
            } else {
                if !block.parent.is_empty() {
                    out.push_str(&indent(&format!("\n{}\n", block.parent), nesting));
                }
                out.push_str(&self.render_level(&block.children, nesting, child_pages));
            }
        }

        out
    }
}

/// Render a table block from its row children
fn table_to_markdown(table: &TableBlock, rows: &[Block]) -> String {
    let rows: Vec<Vec<String>> = rows
        .iter()
        .filter_map(|row| match &row.content {
            BlockContent::TableRow { table_row } => Some(
                table_row
                    .cells
                    .iter()
                    .map(|cell| rich_text_to_markdown(cell).replace('|', "\\|"))
                    .collect(),
            ),
            _ => None,
        })
        .collect();

    let Some(width) = rows.iter().map(Vec::len).max() else {
        return String::new();
    };

    let format_row = |cells: &[String]| {
        let mut padded: Vec<&str> = cells.iter().map(String::as_str).collect();
        padded.resize(width, "");
        format!("| {} |", padded.join(" | "))
    };

    let (header, body) = if table.has_column_header {
        (format_row(rows[0].as_slice()), &rows[1..])
    } else {
        (format_row(vec![String::new(); width].as_slice()), &rows[..])
    };

    let mut lines = vec![header, format!("|{}", " --- |".repeat(width))];
    lines.extend(body.iter().map(|row| format_row(row.as_slice())));
    lines.join("\n")
}

/// Render rich text segments with their annotations
pub fn rich_text_to_markdown(segments: &[RichText]) -> String {
    segments.iter().map(segment_to_markdown).collect()
}

fn segment_to_markdown(segment: &RichText) -> String {
    if let Some(equation) = &segment.equation {
        return format!("${}$", equation.expression);
    }

    let text = segment.plain_text.as_str();
    let core = text.trim();
    if core.is_empty() {
        return text.to_string();
    }

    let annotations = &segment.annotations;
    let mut styled = core.to_string();
    if annotations.code {
        styled = format!("`{}`", styled);
    }
    if annotations.bold {
        styled = format!("**{}**", styled);
    }
    if annotations.italic {
        styled = format!("_{}_", styled);
    }
    if annotations.strikethrough {
        styled = format!("~~{}~~", styled);
    }
    if let Some(href) = &segment.href {
        styled = format!("[{}]({})", styled, href);
    }

    // Keep surrounding whitespace outside of the markers
    let leading = &text[..text.len() - text.trim_start().len()];
    let trailing = &text[text.trim_end().len()..];
    format!("{}{}{}", leading, styled, trailing)
}

fn plain_text(segments: &[RichText]) -> String {
    segments.iter().map(|s| s.plain_text.as_str()).collect()
}

/// Length of the longest run of consecutive backticks
fn longest_backtick_run(text: &str) -> usize {
    text.split(|c: char| c != '`').map(str::len).max().unwrap_or(0)
}

fn quote_lines(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.is_empty() {
                ">".to_string()
            } else {
                format!("> {}", line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn indent(text: &str, nesting: usize) -> String {
    if nesting == 0 {
        return text.to_string();
    }
    let tabs = "\t".repeat(nesting);
    text.split('\n')
        .map(|line| {
            if line.is_empty() {
                String::new()
            } else {
                format!("{}{}", tabs, line)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}
