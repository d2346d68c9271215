//! Notion API access
//!
//! A thin typed layer over the Notion REST API: the HTTP client, the
//! response schemas, database query bodies and the block-to-markdown
//! converter.

mod client;
mod error;
pub mod markdown;
mod query;
mod schema;

pub use client::{NotionClient, DEFAULT_BASE_URL, DEFAULT_NOTION_VERSION};
pub use error::{NotionError, Result};
pub use markdown::{MarkdownConverter, MarkdownString, MdBlock};
pub use query::{Condition, DatabaseQuery, Direction, Filter, Sort, StringCondition};
pub use schema::{
    Annotations, Block, BlockContent, DateValue, FormulaValue, Page, PaginatedList, PropertyValue,
    RichText, SelectOption,
};
