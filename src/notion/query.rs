//! Database query bodies

use serde::Serialize;

/// Body of `POST /v1/databases/{id}/query`
#[derive(Debug, Clone, Default, Serialize)]
pub struct DatabaseQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub sorts: Vec<Sort>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_cursor: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_size: Option<u32>,
}

impl DatabaseQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }

    pub fn sort(mut self, property: &str, direction: Direction) -> Self {
        self.sorts.push(Sort {
            property: property.to_string(),
            direction,
        });
        self
    }
}

/// A property filter
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Filter {
    pub property: String,
    #[serde(flatten)]
    pub condition: Condition,
}

/// Filter condition, keyed by the property type it applies to
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Checkbox { equals: bool },
    MultiSelect { contains: String },
    Formula { string: StringCondition },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StringCondition {
    Equals(String),
}

impl Filter {
    /// Checkbox property equals `value`
    pub fn checkbox(property: &str, value: bool) -> Self {
        Self {
            property: property.to_string(),
            condition: Condition::Checkbox { equals: value },
        }
    }

    /// Multi-select property contains the option `value`
    pub fn multi_select_contains(property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            condition: Condition::MultiSelect {
                contains: value.to_string(),
            },
        }
    }

    /// Formula property with a string result equal to `value`
    pub fn formula_string_equals(property: &str, value: &str) -> Self {
        Self {
            property: property.to_string(),
            condition: Condition::Formula {
                string: StringCondition::Equals(value.to_string()),
            },
        }
    }
}

/// Sort on a single property
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Sort {
    pub property: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Ascending,
    Descending,
}
