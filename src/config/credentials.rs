//! Notion credentials supplied through flags or the environment

use anyhow::{Context, Result};

/// Environment variable holding the integration token
pub const TOKEN_VAR: &str = "NOTION_TOKEN";
/// Environment variable holding the projects database id
pub const PROJECTS_VAR: &str = "PROJECTS_ID";
/// Environment variable holding the blog database id
pub const BLOG_VAR: &str = "BLOG_DB_ID";

/// Token and database ids for the Notion workspace
#[derive(Clone)]
pub struct Credentials {
    pub token: String,
    pub projects_id: String,
    pub blog_db_id: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("token", &"<redacted>")
            .field("projects_id", &self.projects_id)
            .field("blog_db_id", &self.blog_db_id)
            .finish()
    }
}

impl Credentials {
    pub fn new(
        token: impl Into<String>,
        projects_id: impl Into<String>,
        blog_db_id: impl Into<String>,
    ) -> Self {
        Self {
            token: token.into(),
            projects_id: projects_id.into(),
            blog_db_id: blog_db_id.into(),
        }
    }

    /// Read credentials through an arbitrary lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .with_context(|| format!("{} is not set", key))
        };

        Ok(Self {
            token: get(TOKEN_VAR)?,
            projects_id: get(PROJECTS_VAR)?,
            blog_db_id: get(BLOG_VAR)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = [
            ("NOTION_TOKEN", "secret"),
            ("PROJECTS_ID", "proj"),
            ("BLOG_DB_ID", "blog"),
        ]
        .into_iter()
        .collect();
        let creds = Credentials::from_lookup(|k| vars.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(creds.projects_id, "proj");
        assert_eq!(creds.blog_db_id, "blog");
        assert!(!format!("{:?}", creds).contains("secret"));
    }

    #[test]
    fn test_missing_var() {
        let err = Credentials::from_lookup(|k| {
            (k != "BLOG_DB_ID").then(|| "x".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("BLOG_DB_ID"));
    }
}
