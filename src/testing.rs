//! Test fixtures: sample documents, an in-memory content source and a local
//! fake of the content API.

use axum::{
    extract::{Query as QueryParams, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use std::collections::HashMap;

use crate::api::{ApiResponse, ContentSource, Document, DocumentData, Error, Query};

/// (uid, title, subtitle, author, publication date)
pub const SAMPLE_POSTS: [(&str, &str, &str, &str, &str); 3] = [
    (
        "como-utilizar-hooks",
        "Como utilizar Hooks",
        "Pensando em sincronização em vez de ciclos de vida",
        "Joseph Oliveira",
        "2021-03-15T19:25:28+0000",
    ),
    (
        "criando-um-app-cra-do-zero",
        "Criando um app CRA do zero",
        "Tudo sobre como criar a sua primeira aplicação utilizando Create React App",
        "Danilo Vieira",
        "2021-03-25T19:27:35+0000",
    ),
    (
        "rust-para-iniciantes",
        "Rust para iniciantes",
        "Ownership, borrowing e <lifetimes>",
        "Ana & Bia",
        "2021-04-02T10:00:00+0000",
    ),
];

pub fn sample_document(index: usize) -> Document {
    let (uid, title, subtitle, author, date) = SAMPLE_POSTS[index];
    Document {
        id: format!("doc-{}", index),
        uid: Some(uid.to_string()),
        document_type: "post".to_string(),
        first_publication_date: Some(date.to_string()),
        last_publication_date: Some(date.to_string()),
        data: DocumentData {
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            author: author.to_string(),
        },
    }
}

/// In-memory source serving one sample post per page
///
/// Cursors look like `mem://page/<n>`.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    /// Page numbers (1-based) whose fetch fails
    pub failing_pages: Vec<usize>,
}

impl MemorySource {
    pub fn page(index: usize) -> ApiResponse {
        let next_page = if index + 1 < SAMPLE_POSTS.len() {
            Some(format!("mem://page/{}", index + 2))
        } else {
            None
        };
        ApiResponse {
            page: index as u32 + 1,
            results_per_page: 1,
            results_size: 1,
            total_results_size: SAMPLE_POSTS.len() as u32,
            total_pages: SAMPLE_POSTS.len() as u32,
            next_page,
            prev_page: None,
            results: vec![sample_document(index)],
        }
    }
}

impl ContentSource for MemorySource {
    async fn query(&self, _query: &Query) -> Result<ApiResponse, Error> {
        Ok(Self::page(0))
    }

    async fn fetch_page(&self, url: &str) -> Result<ApiResponse, Error> {
        let page: usize = url
            .strip_prefix("mem://page/")
            .and_then(|n| n.parse().ok())
            .ok_or_else(|| Error::Url(url.to_string()))?;
        if self.failing_pages.contains(&page) || page == 0 || page > SAMPLE_POSTS.len() {
            return Err(Error::StatusCode(500));
        }
        Ok(Self::page(page - 1))
    }

    async fn get_by_uid(&self, _document_type: &str, uid: &str) -> Result<Option<Document>, Error> {
        Ok((0..SAMPLE_POSTS.len())
            .map(sample_document)
            .find(|d| d.uid.as_deref() == Some(uid)))
    }
}

/// Start a fake content API on an ephemeral port and return its endpoint
/// (`http://127.0.0.1:<port>/api/v2`)
pub async fn spawn_fake_api() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let endpoint = format!("http://{}/api/v2", listener.local_addr().unwrap());

    let app = Router::new()
        .route("/api/v2", get(api_root))
        .route("/api/v2/documents/search", get(search))
        .with_state(endpoint.clone());

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    endpoint
}

async fn api_root() -> Json<serde_json::Value> {
    Json(json!({
        "refs": [
            {"id": "master", "ref": "master-ref", "label": "Master", "isMasterRef": true}
        ],
        "types": {"post": "Post"}
    }))
}

async fn search(
    State(endpoint): State<String>,
    QueryParams(params): QueryParams<HashMap<String, String>>,
) -> Response {
    if params.get("ref").map(String::as_str) != Some("master-ref") {
        return (StatusCode::BAD_REQUEST, "missing ref").into_response();
    }

    let q = params.get("q").cloned().unwrap_or_default();
    if q.contains(".uid") {
        let results: Vec<Document> = (0..SAMPLE_POSTS.len())
            .map(sample_document)
            .filter(|d| {
                d.uid
                    .as_deref()
                    .is_some_and(|uid| q.contains(&format!("\"{}\"", uid)))
            })
            .collect();
        return Json(ApiResponse {
            next_page: None,
            results,
            ..ApiResponse::default()
        })
        .into_response();
    }

    let page: usize = params
        .get("page")
        .and_then(|p| p.parse().ok())
        .unwrap_or(1);
    if page == 0 || page > SAMPLE_POSTS.len() {
        return (StatusCode::NOT_FOUND, "no such page").into_response();
    }

    let mut response = MemorySource::page(page - 1);
    response.next_page = response.next_page.map(|_| {
        format!(
            "{}/documents/search?ref=master-ref&page={}&pageSize=1",
            endpoint,
            page + 1
        )
    });
    Json(response).into_response()
}
