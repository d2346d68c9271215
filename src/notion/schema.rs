//! Response schemas for the Notion objects we consume
//!
//! Only the fields the site reads are modelled. Unknown property and block
//! types deserialize to an `Other`/`Unsupported` variant instead of failing,
//! while missing or empty required fields surface as
//! [`NotionError::MalformedRecord`] through the accessors on [`Page`].

use indexmap::IndexMap;
use serde::Deserialize;

use super::error::{NotionError, Result};

/// One page of a paginated list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct PaginatedList<T> {
    pub results: Vec<T>,
    #[serde(default)]
    pub has_more: bool,
    #[serde(default)]
    pub next_cursor: Option<String>,
}

/// A Notion page (a database row or a standalone page)
#[derive(Debug, Clone, Deserialize)]
pub struct Page {
    pub id: String,
    #[serde(default)]
    pub last_edited_time: String,
    #[serde(default)]
    pub properties: IndexMap<String, PropertyValue>,
}

/// A page property value, tagged by its `type` field
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PropertyValue {
    Title { title: Vec<RichText> },
    RichText { rich_text: Vec<RichText> },
    MultiSelect { multi_select: Vec<SelectOption> },
    Select { select: Option<SelectOption> },
    Date { date: Option<DateValue> },
    Url { url: Option<String> },
    Checkbox { checkbox: bool },
    Formula { formula: FormulaValue },
    #[serde(other)]
    Other,
}

/// Computed value of a formula property
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FormulaValue {
    String { string: Option<String> },
    Number { number: Option<f64> },
    Boolean { boolean: Option<bool> },
    Date { date: Option<DateValue> },
    #[serde(other)]
    Other,
}

/// Option of a select or multi-select property
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SelectOption {
    pub name: String,
    #[serde(default)]
    pub color: String,
}

/// Date property payload
#[derive(Debug, Clone, Deserialize)]
pub struct DateValue {
    pub start: String,
}

/// A rich text segment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RichText {
    #[serde(default)]
    pub plain_text: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default)]
    pub annotations: Annotations,
    #[serde(default)]
    pub equation: Option<InlineEquation>,
}

/// Inline equation payload of an `equation` rich text segment
#[derive(Debug, Clone, Default, Deserialize)]
pub struct InlineEquation {
    pub expression: String,
}

/// Text styling flags
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Annotations {
    pub bold: bool,
    pub italic: bool,
    pub strikethrough: bool,
    pub code: bool,
}

impl Page {
    /// Look up a property by name
    pub fn property(&self, name: &str) -> Result<&PropertyValue> {
        self.properties
            .get(name)
            .ok_or_else(|| NotionError::malformed(&self.id, name, "is missing"))
    }

    /// First segment of a `title` property
    pub fn title_text(&self, name: &str) -> Result<String> {
        match self.property(name)? {
            PropertyValue::Title { title } => self.first_segment(name, title),
            _ => Err(NotionError::malformed(&self.id, name, "is not a title")),
        }
    }

    /// First segment of a `rich_text` property
    pub fn rich_text(&self, name: &str) -> Result<String> {
        match self.property(name)? {
            PropertyValue::RichText { rich_text } => self.first_segment(name, rich_text),
            _ => Err(NotionError::malformed(&self.id, name, "is not rich text")),
        }
    }

    /// Text of a `rich_text` property or the string result of a `formula`
    pub fn text(&self, name: &str) -> Result<String> {
        match self.property(name)? {
            PropertyValue::RichText { rich_text } => self.first_segment(name, rich_text),
            PropertyValue::Formula {
                formula: FormulaValue::String { string: Some(s) },
            } => Ok(s.clone()),
            PropertyValue::Formula { .. } => Err(NotionError::malformed(
                &self.id,
                name,
                "has no string formula result",
            )),
            _ => Err(NotionError::malformed(&self.id, name, "is not text")),
        }
    }

    /// Options of a `multi_select` property
    pub fn multi_select(&self, name: &str) -> Result<&[SelectOption]> {
        match self.property(name)? {
            PropertyValue::MultiSelect { multi_select } => Ok(multi_select),
            _ => Err(NotionError::malformed(&self.id, name, "is not a multi-select")),
        }
    }

    /// Value of a `url` property, which may be empty
    pub fn url_value(&self, name: &str) -> Result<Option<&str>> {
        match self.property(name)? {
            PropertyValue::Url { url } => Ok(url.as_deref()),
            _ => Err(NotionError::malformed(&self.id, name, "is not a url")),
        }
    }

    /// Start of a `date` property
    pub fn date_start(&self, name: &str) -> Result<&str> {
        match self.property(name)? {
            PropertyValue::Date { date: Some(date) } => Ok(&date.start),
            PropertyValue::Date { date: None } => {
                Err(NotionError::malformed(&self.id, name, "has no date"))
            }
            _ => Err(NotionError::malformed(&self.id, name, "is not a date")),
        }
    }

    fn first_segment(&self, name: &str, segments: &[RichText]) -> Result<String> {
        segments
            .first()
            .map(|s| s.plain_text.clone())
            .ok_or_else(|| NotionError::malformed(&self.id, name, "is empty"))
    }
}

/// A content block
#[derive(Debug, Clone, Deserialize)]
pub struct Block {
    pub id: String,
    #[serde(default)]
    pub has_children: bool,
    #[serde(flatten)]
    pub content: BlockContent,
}

/// Block payload, tagged by the block `type`
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BlockContent {
    Paragraph {
        paragraph: TextBlock,
    },
    #[serde(rename = "heading_1")]
    Heading1 {
        heading_1: TextBlock,
    },
    #[serde(rename = "heading_2")]
    Heading2 {
        heading_2: TextBlock,
    },
    #[serde(rename = "heading_3")]
    Heading3 {
        heading_3: TextBlock,
    },
    BulletedListItem {
        bulleted_list_item: TextBlock,
    },
    NumberedListItem {
        numbered_list_item: TextBlock,
    },
    ToDo {
        to_do: ToDoBlock,
    },
    Toggle {
        toggle: TextBlock,
    },
    Quote {
        quote: TextBlock,
    },
    Callout {
        callout: CalloutBlock,
    },
    Code {
        code: CodeBlock,
    },
    Divider,
    Image {
        image: MediaBlock,
    },
    Video {
        video: MediaBlock,
    },
    File {
        file: MediaBlock,
    },
    Pdf {
        pdf: MediaBlock,
    },
    Bookmark {
        bookmark: LinkBlock,
    },
    Embed {
        embed: LinkBlock,
    },
    LinkPreview {
        link_preview: LinkBlock,
    },
    Equation {
        equation: InlineEquation,
    },
    Table {
        table: TableBlock,
    },
    TableRow {
        table_row: TableRowBlock,
    },
    ChildPage {
        child_page: ChildPageBlock,
    },
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TextBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ToDoBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub checked: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CalloutBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub icon: Option<Icon>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Icon {
    #[serde(default)]
    pub emoji: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CodeBlock {
    #[serde(default)]
    pub rich_text: Vec<RichText>,
    #[serde(default)]
    pub language: String,
}

/// Image, video and file blocks: hosted by Notion or external
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MediaBlock {
    #[serde(default)]
    pub caption: Vec<RichText>,
    #[serde(default)]
    pub external: Option<FileUrl>,
    #[serde(default)]
    pub file: Option<FileUrl>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FileUrl {
    pub url: String,
}

impl MediaBlock {
    pub fn url(&self) -> &str {
        self.external
            .as_ref()
            .or(self.file.as_ref())
            .map(|f| f.url.as_str())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LinkBlock {
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub caption: Vec<RichText>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableBlock {
    #[serde(default)]
    pub has_column_header: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct TableRowBlock {
    #[serde(default)]
    pub cells: Vec<Vec<RichText>>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ChildPageBlock {
    pub title: String,
}

impl BlockContent {
    /// The Notion `type` name of this block
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Paragraph { .. } => "paragraph",
            Self::Heading1 { .. } => "heading_1",
            Self::Heading2 { .. } => "heading_2",
            Self::Heading3 { .. } => "heading_3",
            Self::BulletedListItem { .. } => "bulleted_list_item",
            Self::NumberedListItem { .. } => "numbered_list_item",
            Self::ToDo { .. } => "to_do",
            Self::Toggle { .. } => "toggle",
            Self::Quote { .. } => "quote",
            Self::Callout { .. } => "callout",
            Self::Code { .. } => "code",
            Self::Divider => "divider",
            Self::Image { .. } => "image",
            Self::Video { .. } => "video",
            Self::File { .. } => "file",
            Self::Pdf { .. } => "pdf",
            Self::Bookmark { .. } => "bookmark",
            Self::Embed { .. } => "embed",
            Self::LinkPreview { .. } => "link_preview",
            Self::Equation { .. } => "equation",
            Self::Table { .. } => "table",
            Self::TableRow { .. } => "table_row",
            Self::ChildPage { .. } => "child_page",
            Self::Unsupported => "unsupported",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn post_page() -> Page {
        serde_json::from_value(json!({
            "object": "page",
            "id": "post-1",
            "created_time": "2024-03-01T10:00:00.000Z",
            "last_edited_time": "2024-03-06T08:30:00.000Z",
            "properties": {
                "Name": {"id": "title", "type": "title", "title": [{"type": "text", "plain_text": "Hello"}]},
                "Description": {"id": "d", "type": "rich_text", "rich_text": []},
                "Tags": {"id": "t", "type": "multi_select", "multi_select": [{"id": "x", "name": "Go", "color": "blue"}]},
                "Date": {"id": "dt", "type": "date", "date": null},
                "Author": {"id": "a", "type": "formula", "formula": {"type": "string", "string": "Ada"}},
                "Published": {"id": "p", "type": "checkbox", "checkbox": true},
                "Rating": {"id": "r", "type": "number", "number": 4}
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_title_text() {
        assert_eq!(post_page().title_text("Name").unwrap(), "Hello");
    }

    #[test]
    fn test_empty_rich_text_is_malformed() {
        let err = post_page().rich_text("Description").unwrap_err();
        match err {
            NotionError::MalformedRecord { page_id, field, .. } => {
                assert_eq!(page_id, "post-1");
                assert_eq!(field, "Description");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_missing_property_is_malformed() {
        assert!(matches!(
            post_page().title_text("Missing"),
            Err(NotionError::MalformedRecord { .. })
        ));
    }

    #[test]
    fn test_wrong_property_type_is_malformed() {
        assert!(post_page().title_text("Tags").is_err());
    }

    #[test]
    fn test_null_date_is_malformed() {
        assert!(post_page().date_start("Date").is_err());
    }

    #[test]
    fn test_formula_text() {
        assert_eq!(post_page().text("Author").unwrap(), "Ada");
    }

    #[test]
    fn test_unknown_property_type() {
        let page = post_page();
        assert!(matches!(
            page.property("Rating").unwrap(),
            PropertyValue::Other
        ));
    }

    #[test]
    fn test_block_deserialize() {
        let block: Block = serde_json::from_value(json!({
            "object": "block",
            "id": "b1",
            "has_children": false,
            "type": "heading_2",
            "heading_2": {"rich_text": [{"plain_text": "Intro"}], "is_toggleable": false}
        }))
        .unwrap();
        assert_eq!(block.content.type_name(), "heading_2");
        match block.content {
            BlockContent::Heading2 { heading_2 } => assert_eq!(heading_2.rich_text[0].plain_text, "Intro"),
            other => panic!("unexpected block: {:?}", other),
        }
    }

    #[test]
    fn test_unsupported_block() {
        let block: Block = serde_json::from_value(json!({
            "id": "b2",
            "has_children": false,
            "type": "synced_block",
            "synced_block": {"synced_from": null}
        }))
        .unwrap();
        assert!(matches!(block.content, BlockContent::Unsupported));
    }

    #[test]
    fn test_media_url() {
        let media: MediaBlock = serde_json::from_value(json!({
            "type": "file",
            "file": {"url": "https://files.example/a.png", "expiry_time": "2024-01-01T00:00:00.000Z"},
            "caption": []
        }))
        .unwrap();
        assert_eq!(media.url(), "https://files.example/a.png");
    }
}
