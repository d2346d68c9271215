//! Site server: JSON API and rendered pages

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::trace::TraceLayer;

use crate::content::{
    escape_html, MarkdownRenderer, PostDetail, PostSummary, ProjectDetail, ProjectSummary,
};
use crate::layout::{self, Layout};
use crate::notion::NotionError;
use crate::Folio;

/// Server state, built once at startup and shared by all handlers
pub struct AppState {
    folio: Folio,
    renderer: MarkdownRenderer,
}

impl AppState {
    pub fn new(folio: Folio) -> Self {
        let renderer = MarkdownRenderer::with_options(&folio.config.highlight);
        Self { folio, renderer }
    }
}

type SharedState = Arc<AppState>;

/// Build the router
pub fn router(state: SharedState) -> Router {
    Router::new()
        .route("/api/projects", get(api_projects))
        .route("/api/projects/:id", get(api_project))
        .route("/api/posts", get(api_posts))
        .route("/api/posts/:id", get(api_post))
        .route("/", get(cv_page))
        .route("/cv", get(cv_page))
        .route("/projects", get(projects_page))
        .route("/projects/:id", get(project_page))
        .route("/blog", get(blog_page))
        .route("/blog/:id", get(post_page))
        .route("/blog/tag/:tag", get(tag_page))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(folio: &Folio, ip: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState::new(folio.clone()));
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    println!("Server running at http://{}:{}", ip, port);
    println!("Press Ctrl+C to stop.");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Filters accepted by `/api/posts`
#[derive(Debug, Default, Deserialize)]
pub struct PostsQuery {
    pub tag: Option<String>,
    pub author: Option<String>,
}

/// A Notion failure turned into an HTTP response
#[derive(Debug)]
pub struct ServerError(NotionError);

impl From<NotionError> for ServerError {
    fn from(err: NotionError) -> Self {
        Self(err)
    }
}

/// HTTP status reported for a Notion failure
pub fn status_for(err: &NotionError) -> StatusCode {
    match err {
        NotionError::NotFound(_) => StatusCode::NOT_FOUND,
        NotionError::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        NotionError::Unauthorized(_)
        | NotionError::InvalidRequest { .. }
        | NotionError::Decode(_)
        | NotionError::MalformedRecord { .. } => StatusCode::BAD_GATEWAY,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = status_for(&self.0);
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        } else {
            tracing::debug!("Request failed: {}", self.0);
        }
        let body = Json(serde_json::json!({ "error": self.0.to_string() }));
        (status, body).into_response()
    }
}

type ApiResult<T> = std::result::Result<T, ServerError>;

async fn api_projects(State(state): State<SharedState>) -> ApiResult<Json<Vec<ProjectSummary>>> {
    Ok(Json(state.folio.content.list_projects().await?))
}

async fn api_project(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<ProjectDetail>> {
    Ok(Json(state.folio.content.get_project(&id).await?))
}

async fn api_posts(
    State(state): State<SharedState>,
    Query(query): Query<PostsQuery>,
) -> ApiResult<Json<Vec<PostSummary>>> {
    let content = &state.folio.content;
    let posts = match (query.tag.as_deref(), query.author.as_deref()) {
        (Some(tag), _) => content.list_posts_by_tag(tag).await?,
        (None, Some(author)) => content.list_posts_by_author(author).await?,
        (None, None) => content.list_posts().await?,
    };
    Ok(Json(posts))
}

async fn api_post(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Json<PostDetail>> {
    Ok(Json(state.folio.content.get_post(&id).await?))
}

async fn cv_page(State(state): State<SharedState>) -> ApiResult<Html<String>> {
    let config = &state.folio.config;
    let projects = state.folio.content.list_projects().await?;
    let shell = Layout::for_route(config, "/cv");

    let body = format!(
        r#"<header><h1>{}</h1><p>{}</p></header>{}"#,
        escape_html(&config.author),
        escape_html(&shell.metadata.description),
        layout::project_list(&projects)
    );
    Ok(Html(shell.render(&body)))
}

async fn projects_page(State(state): State<SharedState>) -> ApiResult<Html<String>> {
    let projects = state.folio.content.list_projects().await?;
    let shell = Layout::for_route(&state.folio.config, "/projects");
    Ok(Html(shell.render(&layout::project_list(&projects))))
}

async fn project_page(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let project = state.folio.content.get_project(&id).await?;
    let shell = Layout::for_route(&state.folio.config, "/projects")
        .with_title(&project.project.name)
        .with_description(&project.project.description);
    Ok(Html(shell.render(&layout::project_page(&project, &state.renderer))))
}

async fn blog_page(State(state): State<SharedState>) -> ApiResult<Html<String>> {
    let posts = state.folio.content.list_posts().await?;
    let shell = Layout::for_route(&state.folio.config, "/blog");
    let heading = shell.metadata.title.clone();
    Ok(Html(shell.render(&layout::post_list(&heading, &posts))))
}

async fn post_page(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> ApiResult<Html<String>> {
    let post = state.folio.content.get_post(&id).await?;
    let shell = Layout::for_route(&state.folio.config, "/blog")
        .with_title(&post.metadata.title)
        .with_description(&post.metadata.description);
    Ok(Html(shell.render(&layout::post_page(&post, &state.renderer))))
}

async fn tag_page(
    State(state): State<SharedState>,
    Path(tag): Path<String>,
) -> ApiResult<Html<String>> {
    let posts = state.folio.content.list_posts_by_tag(&tag).await?;
    let shell = Layout::for_route(&state.folio.config, "/blog");
    let heading = format!("Posts tagged \"{}\"", tag);
    Ok(Html(shell.render(&layout::post_list(&heading, &posts))))
}
