//! HTTP surface for the provider.
//!
//! A single `GET /search` route behind a presence-only `Authorization`
//! check, returning the Audiobookshelf custom-provider match schema.
//! Internal failures never reach the wire as errors: the provider returns
//! an empty match list, and a panicking handler is converted to a JSON 500.

use std::sync::Arc;

use axum::extract::{Query, Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;

use crate::provider::Provider;
use crate::types::BookRecord;

/// Build the application router around a shared provider.
pub fn build_router(provider: Arc<Provider>) -> Router {
    Router::new()
        .route("/search", get(search))
        .layer(middleware::from_fn(require_auth))
        .layer(CorsLayer::permissive())
        .layer(CatchPanicLayer::custom(handle_panic))
        .with_state(provider)
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

fn error_response(status: StatusCode, message: &str) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// Presence-only authorization gate: any non-empty `Authorization` header
/// passes; the credential itself is not validated.
async fn require_auth(request: Request, next: Next) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .is_some_and(|value| !value.is_empty());
    if !authorized {
        return error_response(StatusCode::UNAUTHORIZED, "Unauthorized");
    }
    next.run(request).await
}

fn handle_panic(_err: Box<dyn std::any::Any + Send + 'static>) -> axum::http::Response<axum::body::Body> {
    tracing::error!("search handler panicked");
    let body = serde_json::json!({"error": "Internal server error"}).to_string();
    let mut response = axum::http::Response::new(axum::body::Body::from(body));
    *response.status_mut() = StatusCode::INTERNAL_SERVER_ERROR;
    response
        .headers_mut()
        .insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
    response
}

#[derive(Debug, Deserialize)]
struct SearchParams {
    query: Option<String>,
    author: Option<String>,
}

async fn search(
    State(provider): State<Arc<Provider>>,
    Query(params): Query<SearchParams>,
) -> Response {
    let Some(query) = params
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
    else {
        return error_response(StatusCode::BAD_REQUEST, "Query parameter is required");
    };

    let records = provider.search_books(query, params.author.as_deref()).await;
    let response = SearchResponse {
        matches: records.iter().map(BookMatch::from_record).collect(),
    };
    (StatusCode::OK, Json(response)).into_response()
}

/// Wire envelope for `GET /search`.
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub matches: Vec<BookMatch>,
}

/// One match in the Audiobookshelf custom-provider schema. Absent optional
/// fields are omitted from the JSON body entirely.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BookMatch {
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    /// Comma-joined author names.
    pub author: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub narrator: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publisher: Option<String>,
    /// Four-digit year derived from the release date.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub published_year: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub isbn: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub asin: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub genres: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<Vec<SeriesEntry>>,
    /// First of the record's language codes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub duration: Option<u64>,
    #[serde(rename = "type")]
    pub media_type: crate::types::MediaType,
    pub similarity: f64,
}

/// Series membership as a one-element list, per the provider schema.
#[derive(Debug, Serialize)]
pub struct SeriesEntry {
    pub series: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sequence: Option<String>,
}

impl BookMatch {
    /// Map an enriched record onto the wire schema.
    pub fn from_record(record: &BookRecord) -> Self {
        let candidate = &record.ranked.candidate;
        Self {
            title: candidate.title.clone(),
            // The catalog exposes neither subtitles nor ASINs; the fields
            // exist for schema parity and are always omitted.
            subtitle: None,
            author: candidate.authors.join(", "),
            narrator: record.narrator.clone(),
            publisher: record.publisher.clone(),
            published_year: record
                .published_date
                .map(|date| date.format("%Y").to_string()),
            description: record.description.clone(),
            cover: record.cover.clone(),
            isbn: record.identifiers.isbn.clone(),
            asin: None,
            genres: record.genres.clone(),
            tags: record.tags.clone(),
            series: record.series.clone().map(|series| {
                vec![SeriesEntry {
                    series,
                    sequence: record.series_index.map(|index| index.to_string()),
                }]
            }),
            language: record.languages.first().cloned(),
            duration: record.duration,
            media_type: candidate.media_type,
            similarity: record.ranked.similarity,
        }
    }
}
