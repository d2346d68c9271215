//! HTML bodies for project and post pages

use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

use crate::content::{
    escape_html, MarkdownRenderer, PostDetail, PostSummary, ProjectDetail, ProjectSummary, Tag,
};

/// URL of the listing for a tag
pub fn tag_url(tag: &str) -> String {
    format!("/blog/tag/{}", utf8_percent_encode(tag, NON_ALPHANUMERIC))
}

fn tag_badges(tags: &[Tag]) -> String {
    tags.iter()
        .map(|tag| {
            format!(
                r#"<a class="tag tag-{}" href="{}">{}</a>"#,
                escape_html(&tag.color),
                tag_url(&tag.name),
                escape_html(&tag.name)
            )
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn stack_badges(stack: &[String]) -> String {
    stack
        .iter()
        .map(|name| format!(r#"<span class="stack">{}</span>"#, escape_html(name)))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Project listing
pub fn project_list(projects: &[ProjectSummary]) -> String {
    let mut html = String::from("<main><h1>Projects</h1><ul class=\"projects\">");
    for project in projects {
        html.push_str(&format!(
            r#"<li><a href="/projects/{}">{}</a><p>{}</p><div>{}</div></li>"#,
            escape_html(&project.id),
            escape_html(&project.name),
            escape_html(&project.description),
            stack_badges(&project.stack)
        ));
    }
    html.push_str("</ul></main>");
    html
}

/// A single project
pub fn project_page(project: &ProjectDetail, renderer: &MarkdownRenderer) -> String {
    let summary = &project.project;
    let link = summary
        .link
        .as_deref()
        .map(|url| {
            format!(
                r#"<a class="project-link" href="{0}">{0}</a>"#,
                escape_html(url)
            )
        })
        .unwrap_or_default();

    format!(
        r#"<main><article><h1>{}</h1><p>{}</p>{}<div>{}</div><section>{}</section></article></main>"#,
        escape_html(&summary.name),
        escape_html(&summary.description),
        link,
        stack_badges(&summary.stack),
        renderer.render(&project.content)
    )
}

/// Post listing under a heading
pub fn post_list(heading: &str, posts: &[PostSummary]) -> String {
    let mut html = format!(
        r#"<main><h1>{}</h1><ul class="posts">"#,
        escape_html(heading)
    );
    for post in posts {
        html.push_str(&format!(
            r#"<li><a href="/blog/{}">{}</a> <time>{}</time><p>{}</p><div>{}</div></li>"#,
            escape_html(&post.id),
            escape_html(&post.title),
            escape_html(&post.date),
            escape_html(&post.description),
            tag_badges(&post.tags)
        ));
    }
    html.push_str("</ul></main>");
    html
}

/// A single post
pub fn post_page(post: &PostDetail, renderer: &MarkdownRenderer) -> String {
    let meta = &post.metadata;
    format!(
        r#"<main><article><h1>{}</h1><p class="meta">{} &middot; {} &middot; updated {}</p><div>{}</div><section>{}</section></article></main>"#,
        escape_html(&meta.title),
        escape_html(&meta.author),
        escape_html(&meta.date),
        escape_html(&meta.last_edited),
        tag_badges(&meta.tags),
        renderer.render(post.markdown.as_str())
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::PostMarkdown;

    fn summary() -> PostSummary {
        PostSummary {
            id: "p1".to_string(),
            title: "Hello <world>".to_string(),
            tags: vec![Tag {
                name: "c++".to_string(),
                color: "red".to_string(),
            }],
            description: "desc".to_string(),
            date: "March 5, 2024".to_string(),
            last_edited: "March 6, 2024".to_string(),
            image: String::new(),
            author: "Ada".to_string(),
        }
    }

    #[test]
    fn test_tag_url_encoded() {
        assert_eq!(tag_url("c++"), "/blog/tag/c%2B%2B");
    }

    #[test]
    fn test_post_list() {
        let html = post_list("Blog", &[summary()]);
        assert!(html.contains(r#"<a href="/blog/p1">Hello &lt;world&gt;</a>"#));
        assert!(html.contains("/blog/tag/c%2B%2B"));
    }

    #[test]
    fn test_post_page_renders_markdown() {
        let post = PostDetail {
            metadata: summary(),
            markdown: PostMarkdown::Body("**bold**".to_string()),
        };
        let html = post_page(&post, &MarkdownRenderer::new());
        assert!(html.contains("<strong>bold</strong>"));
    }

    #[test]
    fn test_project_page_without_link() {
        let project = ProjectDetail {
            project: ProjectSummary {
                name: "folio".to_string(),
                description: "site".to_string(),
                link: None,
                stack: vec!["Rust".to_string()],
                id: "x".to_string(),
            },
            content: String::new(),
        };
        let html = project_page(&project, &MarkdownRenderer::new());
        assert!(!html.contains("project-link"));
        assert!(html.contains(r#"<span class="stack">Rust</span>"#));
    }
}
