//! HTTP server rendering pages on request
//!
//! Listing and post pages are fetched and rendered per request, `/api/more`
//! answers client-side "load more" calls, everything else is served from the
//! public directory.

use anyhow::Result;
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};

use crate::api::{self, is_same_origin, ContentClient, ContentSource};
use crate::content::pagination::collect_pages;
use crate::content::{Post, PostPagination};
use crate::helpers::{html_escape, page_path, url_for, DateFormatter};
use crate::templates::TemplateRenderer;
use crate::Blog;

/// Highest `/page/{n}` served when `max_pages` is unset. Each page costs one
/// upstream request per load-more step.
pub const DEFAULT_MAX_PAGES: usize = 100;

/// Server state
pub struct ServerState {
    client: ContentClient,
    query: api::Query,
    document_type: String,
    dates: DateFormatter,
    renderer: TemplateRenderer,
    root: String,
    max_pages: usize,
    public_dir: PathBuf,
}

impl ServerState {
    pub fn new(blog: &Blog) -> Result<Self> {
        Ok(Self {
            client: blog.client()?,
            query: blog.query(),
            document_type: blog.config.api.document_type.clone(),
            dates: blog.dates(),
            renderer: TemplateRenderer::new(&blog.config, &blog.i18n()?)?,
            root: blog.config.root.clone(),
            max_pages: blog.config.max_pages.unwrap_or(DEFAULT_MAX_PAGES),
            public_dir: blog.public_dir.clone(),
        })
    }
}

/// Build the application router
pub fn router(state: Arc<ServerState>) -> Router {
    let static_files = ServeDir::new(&state.public_dir).append_index_html_on_directories(true);

    Router::new()
        .route("/", get(home_handler))
        .route("/page/:n", get(page_handler))
        .route("/page/:n/", get(page_handler))
        .route("/post/:uid", get(post_handler))
        .route("/post/:uid/", get(post_handler))
        .route("/api/more", get(more_handler))
        .fallback_service(static_files)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Start the server
pub async fn start(blog: &Blog, ip: &str, port: u16, open: bool) -> Result<()> {
    let state = Arc::new(ServerState::new(blog)?);
    let app = router(state);

    // Parse address - handle "localhost" specially
    let bind_ip = if ip == "localhost" { "127.0.0.1" } else { ip };
    let addr: SocketAddr = format!("{}:{}", bind_ip, port).parse()?;

    let url = format!("http://{}:{}", ip, port);
    println!("Server running at {}", url);
    println!("Press Ctrl+C to stop.");

    if open {
        if let Err(e) = open_browser(&url) {
            tracing::warn!("Failed to open browser: {}", e);
        }
    }

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn home_handler(State(state): State<Arc<ServerState>>) -> Response {
    render_listing(&state, 1).await
}

async fn page_handler(State(state): State<Arc<ServerState>>, Path(n): Path<usize>) -> Response {
    if n == 0 || n > state.max_pages {
        return error_page(&state, StatusCode::NOT_FOUND, "not_found");
    }
    render_listing(&state, n).await
}

/// Render listing page `n`: the first page plus `n - 1` load-more steps
async fn render_listing(state: &ServerState, n: usize) -> Response {
    let pagination = match collect_pages(&state.client, &state.query, &state.dates, n).await {
        Ok(pagination) => pagination,
        Err(e) => {
            tracing::error!("Failed to load listing page {}: {}", n, e);
            return error_page(state, StatusCode::BAD_GATEWAY, "upstream_error");
        }
    };

    let next_link = n
        .checked_add(1)
        .filter(|next| *next <= state.max_pages)
        .map(|next| url_for(&state.root, &page_path(next)));
    html_response(state, state.renderer.render_index(&pagination, next_link.as_deref()))
}

async fn post_handler(State(state): State<Arc<ServerState>>, Path(uid): Path<String>) -> Response {
    match state.client.get_by_uid(&state.document_type, &uid).await {
        Ok(Some(doc)) => {
            let post = Post::from_document(doc, &state.dates);
            html_response(&state, state.renderer.render_post(&post))
        }
        Ok(None) => error_page(&state, StatusCode::NOT_FOUND, "not_found"),
        Err(e) => {
            tracing::error!("Failed to load post {}: {}", uid, e);
            error_page(&state, StatusCode::BAD_GATEWAY, "upstream_error")
        }
    }
}

#[derive(Debug, Deserialize)]
struct MoreParams {
    cursor: String,
}

/// One page of posts behind `cursor`, mapped to the view model
async fn more_handler(
    State(state): State<Arc<ServerState>>,
    Query(params): Query<MoreParams>,
) -> Response {
    if !is_same_origin(state.client.endpoint(), &params.cursor) {
        tracing::warn!("Rejected foreign cursor: {}", params.cursor);
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "cursor does not belong to the content API" })),
        )
            .into_response();
    }

    match state.client.fetch_page(&params.cursor).await {
        Ok(response) => Json(PostPagination::from_response(response, &state.dates)).into_response(),
        Err(e) => {
            tracing::error!("Failed to load more posts: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

fn html_response(state: &ServerState, rendered: Result<String>) -> Response {
    match rendered {
        Ok(html) => Html(html).into_response(),
        Err(e) => {
            tracing::error!("Template error: {:#}", e);
            error_page(state, StatusCode::INTERNAL_SERVER_ERROR, "server_error")
        }
    }
}

fn error_page(state: &ServerState, status: StatusCode, message_key: &str) -> Response {
    let message = state.renderer.translate(message_key);
    match state.renderer.render_error(status.as_u16(), &message) {
        Ok(html) => (status, Html(html)).into_response(),
        Err(e) => {
            tracing::error!("Error template failed: {:#}", e);
            plain_error_page(status, &message)
        }
    }
}

/// Minimal error page for when the templates themselves fail
fn plain_error_page(status: StatusCode, message: &str) -> Response {
    let html = format!(
        "<!DOCTYPE html>\n<html><head><title>{}</title></head><body><h1>{}</h1></body></html>",
        status.as_u16(),
        html_escape(message)
    );
    (status, Html(html)).into_response()
}

/// Open a URL in the default browser
fn open_browser(url: &str) -> Result<()> {
    #[cfg(target_os = "macos")]
    {
        std::process::Command::new("open").arg(url).spawn()?;
    }

    #[cfg(target_os = "linux")]
    {
        std::process::Command::new("xdg-open").arg(url).spawn()?;
    }

    #[cfg(target_os = "windows")]
    {
        std::process::Command::new("cmd")
            .args(["/c", "start", url])
            .spawn()?;
    }

    Ok(())
}
