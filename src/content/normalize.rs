//! Projection of Notion pages into display records

use chrono::{DateTime, Datelike, NaiveDate, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use super::models::{PostSummary, ProjectSummary, Tag};
use crate::notion::{NotionError, Page, Result, SelectOption};

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Map multi-select options to tags, keeping their order
pub fn get_tags(options: &[SelectOption]) -> Vec<Tag> {
    options
        .iter()
        .map(|option| Tag {
            name: option.name.clone(),
            color: option.color.clone(),
        })
        .collect()
}

/// Format a Notion date as "March 5, 2024"
///
/// Date-times are shifted into `tz` before the calendar date is taken;
/// plain dates are used as they are. Returns `None` when the input does not
/// parse.
pub fn format_date(datestring: &str, tz: &Tz) -> Option<String> {
    let datestring = datestring.trim();
    let date = if let Ok(dt) = DateTime::parse_from_rfc3339(datestring) {
        dt.with_timezone(tz).date_naive()
    } else if let Ok(naive) = NaiveDateTime::parse_from_str(datestring, "%Y-%m-%dT%H:%M:%S%.f") {
        tz.from_local_datetime(&naive).earliest()?.date_naive()
    } else {
        NaiveDate::parse_from_str(datestring, "%Y-%m-%d").ok()?
    };

    Some(format!(
        "{} {}, {}",
        MONTHS[date.month0() as usize],
        date.day(),
        date.year()
    ))
}

/// Build a project summary from a projects database row
pub fn project_summary(page: &Page) -> Result<ProjectSummary> {
    Ok(ProjectSummary {
        name: page.title_text("Name")?,
        description: page.rich_text("Description")?,
        link: page.url_value("URL")?.map(str::to_string),
        stack: page
            .multi_select("Stack")?
            .iter()
            .map(|option| option.name.clone())
            .collect(),
        id: page.id.clone(),
    })
}

/// Build post metadata from a blog database row
pub fn post_summary(page: &Page, tz: &Tz) -> Result<PostSummary> {
    let date = page.date_start("Date")?;

    Ok(PostSummary {
        id: page.id.clone(),
        title: page.title_text("Name")?,
        tags: get_tags(page.multi_select("Tags")?),
        description: page.rich_text("Description")?,
        date: format_date(date, tz)
            .ok_or_else(|| NotionError::malformed(&page.id, "Date", "is not a valid date"))?,
        last_edited: format_date(&page.last_edited_time, tz).ok_or_else(|| {
            NotionError::malformed(&page.id, "last_edited_time", "is not a valid date")
        })?,
        image: String::new(),
        author: page.text("Author")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn page(value: serde_json::Value) -> Page {
        serde_json::from_value(value).unwrap()
    }

    fn rich(text: &str) -> serde_json::Value {
        json!([{"type": "text", "plain_text": text}])
    }

    fn post_json(id: &str, title: &str) -> serde_json::Value {
        json!({
            "object": "page",
            "id": id,
            "last_edited_time": "2024-03-10T16:45:00.000Z",
            "properties": {
                "Name": {"type": "title", "title": rich(title)},
                "Description": {"type": "rich_text", "rich_text": rich("About things")},
                "Tags": {"type": "multi_select", "multi_select": [
                    {"name": "rust", "color": "orange"},
                    {"name": "web", "color": "blue"}
                ]},
                "Date": {"type": "date", "date": {"start": "2024-03-05", "end": null}},
                "Author": {"type": "rich_text", "rich_text": rich("Ada")},
                "Published": {"type": "checkbox", "checkbox": true}
            }
        })
    }

    #[test]
    fn test_format_date_utc() {
        assert_eq!(
            format_date("2024-03-05T00:00:00.000Z", &Tz::UTC).as_deref(),
            Some("March 5, 2024")
        );
    }

    #[test]
    fn test_format_date_plain_date() {
        assert_eq!(
            format_date("2023-12-25", &Tz::UTC).as_deref(),
            Some("December 25, 2023")
        );
    }

    #[test]
    fn test_format_date_shifts_timezone() {
        assert_eq!(
            format_date("2024-03-05T00:00:00.000Z", &chrono_tz::America::New_York).as_deref(),
            Some("March 4, 2024")
        );
    }

    #[test]
    fn test_format_date_invalid() {
        assert_eq!(format_date("not a date", &Tz::UTC), None);
        assert_eq!(format_date("", &Tz::UTC), None);
    }

    #[test]
    fn test_get_tags_preserves_order() {
        let options = vec![
            SelectOption {
                name: "Go".to_string(),
                color: "blue".to_string(),
            },
            SelectOption {
                name: "Rust".to_string(),
                color: "orange".to_string(),
            },
        ];
        let tags = get_tags(&options);
        assert_eq!(tags.len(), 2);
        assert_eq!(
            tags[0],
            Tag {
                name: "Go".to_string(),
                color: "blue".to_string()
            }
        );
        assert_eq!(tags[1].name, "Rust");
    }

    #[test]
    fn test_project_summary() {
        let project = project_summary(&page(json!({
            "id": "proj-1",
            "properties": {
                "Name": {"type": "title", "title": rich("folio")},
                "Description": {"type": "rich_text", "rich_text": rich("This site")},
                "URL": {"type": "url", "url": "https://github.com/jane/folio"},
                "Stack": {"type": "multi_select", "multi_select": [
                    {"name": "Rust", "color": "orange"},
                    {"name": "Notion", "color": "gray"}
                ]}
            }
        })))
        .unwrap();
        assert_eq!(project.name, "folio");
        assert_eq!(project.link.as_deref(), Some("https://github.com/jane/folio"));
        assert_eq!(project.stack, vec!["Rust", "Notion"]);
        assert_eq!(project.id, "proj-1");
    }

    #[test]
    fn test_project_without_url() {
        let project = project_summary(&page(json!({
            "id": "proj-2",
            "properties": {
                "Name": {"type": "title", "title": rich("draft")},
                "Description": {"type": "rich_text", "rich_text": rich("tbd")},
                "URL": {"type": "url", "url": null},
                "Stack": {"type": "multi_select", "multi_select": []}
            }
        })))
        .unwrap();
        assert_eq!(project.link, None);
        assert!(project.stack.is_empty());
    }

    #[test]
    fn test_post_summary() {
        let post = post_summary(&page(post_json("post-1", "Hello")), &Tz::UTC).unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.date, "March 5, 2024");
        assert_eq!(post.last_edited, "March 10, 2024");
        assert_eq!(post.image, "");
        assert_eq!(post.author, "Ada");
        assert_eq!(post.tags.len(), 2);
        assert_eq!(post.tags[0].color, "orange");
    }

    #[test]
    fn test_post_with_empty_title_is_malformed() {
        let mut value = post_json("post-2", "x");
        value["properties"]["Name"]["title"] = json!([]);
        let err = post_summary(&page(value), &Tz::UTC).unwrap_err();
        assert!(matches!(err, NotionError::MalformedRecord { ref field, .. } if field == "Name"));
    }

    #[test]
    fn test_post_with_bad_date_is_malformed() {
        let mut value = post_json("post-3", "x");
        value["properties"]["Date"]["date"]["start"] = json!("soon");
        assert!(post_summary(&page(value), &Tz::UTC).is_err());
    }
}
