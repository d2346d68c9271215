//! Show a single project or post

use anyhow::Result;

use crate::Folio;

/// Print a project with its markdown content
pub async fn project(folio: &Folio, id: &str, json: bool) -> Result<()> {
    let project = folio.content.get_project(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&project)?);
        return Ok(());
    }

    let summary = &project.project;
    println!("# {}", summary.name);
    println!();
    println!("{}", summary.description);
    if let Some(link) = &summary.link {
        println!("Link: {}", link);
    }
    if !summary.stack.is_empty() {
        println!("Stack: {}", summary.stack.join(", "));
    }
    if !project.content.is_empty() {
        println!();
        println!("{}", project.content);
    }

    Ok(())
}

/// Print a post with its markdown body
pub async fn post(folio: &Folio, id: &str, json: bool) -> Result<()> {
    let post = folio.content.get_post(id).await?;

    if json {
        println!("{}", serde_json::to_string_pretty(&post)?);
        return Ok(());
    }

    let meta = &post.metadata;
    let tags: Vec<&str> = meta.tags.iter().map(|t| t.name.as_str()).collect();
    println!("# {}", meta.title);
    println!();
    println!("{} by {} (updated {})", meta.date, meta.author, meta.last_edited);
    if !tags.is_empty() {
        println!("Tags: {}", tags.join(", "));
    }
    println!();
    println!("{}", post.markdown.as_str());

    Ok(())
}
