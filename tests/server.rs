//! Site server routes against a mocked Notion API

use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::Arc;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use folio_rs::config::{Credentials, SiteConfig};
use folio_rs::server::{router, AppState};
use folio_rs::Folio;

fn rich(text: &str) -> Value {
    json!([{"type": "text", "plain_text": text}])
}

fn project(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "properties": {
            "Name": {"type": "title", "title": rich(name)},
            "Description": {"type": "rich_text", "rich_text": rich("Built with Rust")},
            "URL": {"type": "url", "url": null},
            "Stack": {"type": "multi_select", "multi_select": [{"name": "Rust", "color": "orange"}]}
        }
    })
}

/// Start the site against a mock Notion and return its base URL
async fn start_site(notion: &MockServer) -> String {
    let mut config: SiteConfig = serde_json::from_value(json!({
        "title": "Jane Doe",
        "author": "Jane Doe",
        "metadata": {"/cv": {"title": "CV | Jane Doe", "description": "Engineer"}}
    }))
    .unwrap();
    config.notion.base_url = format!("{}/v1", notion.uri());

    let credentials = Credentials::new("secret", "projects-db", "blog-db");
    let folio = Folio::with_config(PathBuf::from("."), config, &credentials).unwrap();
    let app = router(Arc::new(AppState::new(folio)));

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{}", addr)
}

async fn mock_projects(notion: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/databases/projects-db/query"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "results": [project("p1", "Alpha")],
            "has_more": false,
            "next_cursor": null
        })))
        .mount(notion)
        .await;
}

#[tokio::test]
async fn test_api_projects() {
    let notion = MockServer::start().await;
    mock_projects(&notion).await;
    let base = start_site(&notion).await;

    let response = reqwest::get(format!("{}/api/projects", base)).await.unwrap();
    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!([{
            "name": "Alpha",
            "description": "Built with Rust",
            "link": null,
            "stack": ["Rust"],
            "id": "p1"
        }])
    );
}

#[tokio::test]
async fn test_cv_page_uses_route_metadata() {
    let notion = MockServer::start().await;
    mock_projects(&notion).await;
    let base = start_site(&notion).await;

    let response = reqwest::get(format!("{}/cv", base)).await.unwrap();
    assert_eq!(response.status(), 200);
    let html = response.text().await.unwrap();
    assert!(html.contains("<title>CV | Jane Doe</title>"));
    assert!(html.contains(r#"<meta name="description" content="Engineer">"#));
    assert!(html.contains(r#"<body class="font-outfit">"#));
    assert!(html.contains(r#"<a href="/projects/p1">Alpha</a>"#));
}

#[tokio::test]
async fn test_missing_post_is_404() {
    let notion = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v1/pages/nope"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "object": "error", "status": 404, "code": "object_not_found", "message": "Could not find page with ID: nope."
        })))
        .mount(&notion)
        .await;
    let base = start_site(&notion).await;

    let response = reqwest::get(format!("{}/api/posts/nope", base)).await.unwrap();
    assert_eq!(response.status(), 404);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"].as_str().unwrap().contains("nope"));
}
