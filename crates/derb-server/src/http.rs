//! Public HTTP API: JSON-LD documents for crawlers and LLM agents, search,
//! guide pages, Nexus footer/legal sheets, RSS, sitemap and robots.txt.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use derb_common::mcp_api::{summarize, GuideDetailResponse, QuestionSummary};
use derb_content::{feed, jsonld, Category, SearchFilter};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use crate::state::AppState;

const CACHE_CONTROL: &str = "public, s-maxage=3600, stale-while-revalidate=86400";
const LD_JSON: &str = "application/ld+json";
const CRAWLERS: [&str; 5] = ["*", "GPTBot", "ChatGPT-User", "ClaudeBot", "Googlebot"];

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/questions", get(list_questions))
        .route("/api/questions/{slug}", get(get_question))
        .route("/api/search", get(search))
        .route("/api/guides/{slug}", get(get_guide))
        .route("/api/footer", get(footer))
        .route("/api/sheets/{sheet}", get(sheet))
        .route("/feed.xml", get(rss))
        .route("/sitemap.xml", get(sitemap))
        .route("/robots.txt", get(robots))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn serve(addr: &str, state: Arc<AppState>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!(listen_addr = %listener.local_addr()?, "HTTP API ready");
    axum::serve(listener, router(state)).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "error": message }))).into_response()
}

fn cached(content_type: &'static str, body: impl IntoResponse) -> Response {
    (
        [
            (header::CONTENT_TYPE, content_type),
            (header::CACHE_CONTROL, CACHE_CONTROL),
        ],
        body,
    )
        .into_response()
}

async fn list_questions(State(state): State<Arc<AppState>>) -> Response {
    let doc = jsonld::item_list(&state.site, state.catalog.store().all());
    cached(LD_JSON, Json(doc))
}

async fn get_question(
    State(state): State<Arc<AppState>>,
    Path(slug): Path<String>,
) -> Response {
    match state.catalog.store().get(&slug) {
        Some(record) => cached(LD_JSON, Json(jsonld::article_document(&state.site, record))),
        None => error(StatusCode::NOT_FOUND, "Question not found"),
    }
}

#[derive(Debug, Default, Deserialize)]
struct SearchQuery {
    q: Option<String>,
    c: Option<String>,
    tag: Option<String>,
}

#[derive(Debug, Serialize)]
struct SearchResponse {
    total: usize,
    results: Vec<QuestionSummary>,
}

async fn search(
    State(state): State<Arc<AppState>>,
    Query(query): Query<SearchQuery>,
) -> Response {
    let category = match query.c.as_deref().map(str::trim) {
        None | Some("") | Some("all") => None,
        Some(raw) => match raw.parse::<Category>() {
            Ok(category) => Some(category),
            Err(_) => return error(StatusCode::BAD_REQUEST, &format!("Unknown category: {raw}")),
        },
    };
    let filter = SearchFilter::new()
        .with_query(query.q.as_deref().unwrap_or_default())
        .with_category(category)
        .with_tag(query.tag.as_deref());

    let hits = state.search(&filter).await;
    Json(SearchResponse {
        total: hits.len(),
        results: summarize(hits),
    })
    .into_response()
}

async fn get_guide(State(state): State<Arc<AppState>>, Path(slug): Path<String>) -> Response {
    match GuideDetailResponse::build(&state.catalog, &slug) {
        Some(detail) => cached("application/json", Json(detail)),
        None => error(StatusCode::NOT_FOUND, "Guide not found"),
    }
}

async fn footer(State(state): State<Arc<AppState>>) -> Response {
    Json(json!({ "contentSites": state.content_sites().await })).into_response()
}

#[derive(Debug, Default, Deserialize)]
struct SheetQuery {
    page: Option<String>,
}

async fn sheet(
    State(state): State<Arc<AppState>>,
    Path(sheet): Path<String>,
    Query(query): Query<SheetQuery>,
) -> Response {
    match sheet.as_str() {
        "nexus-footer" => Json(json!({
            "success": true,
            "contentSites": state.content_sites().await,
        }))
        .into_response(),
        "nexus-legal" => {
            let Some(page) = query.page.filter(|p| !p.trim().is_empty()) else {
                return error(StatusCode::BAD_REQUEST, "page parameter required");
            };
            let content = state.links.legal_page(&page).await;
            if content.is_empty() {
                return error(StatusCode::OK, "Page not found");
            }
            Json(content).into_response()
        }
        _ => error(StatusCode::NOT_FOUND, "Unknown sheet"),
    }
}

async fn rss(State(state): State<Arc<AppState>>) -> Response {
    let xml = feed::rss_feed(&state.site, state.catalog.store().all(), chrono::Utc::now());
    cached("application/xml; charset=utf-8", xml)
}

async fn sitemap(State(state): State<Arc<AppState>>) -> Response {
    let xml = feed::sitemap(&state.site, &state.catalog, chrono::Utc::now());
    cached("application/xml; charset=utf-8", xml)
}

async fn robots(State(state): State<Arc<AppState>>) -> Response {
    let agents: String = CRAWLERS
        .iter()
        .map(|agent| format!("User-agent: {agent}\nAllow: /\n\n"))
        .collect();
    let body = format!(
        "{agents}Sitemap: {}\nHost: {}\n",
        state.site.page_url("sitemap.xml"),
        state.site.base_url,
    );
    cached("text/plain; charset=utf-8", body)
}
