use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::warn;

use notion_client::NotionClient;

use crate::delivery::MessageSink;
use crate::dispatch::{dispatch, RequestOptions};
use crate::filter::EventFilter;
use crate::traits::NotionLookup;

pub const WEBHOOK_PATH: &str = "/api/v1/external/notion";

pub struct AppState {
    /// Client without a token; each request attaches its own.
    pub notion: NotionClient,
    pub default_notion_token: String,
    pub sink: Arc<dyn MessageSink>,
}

// --- Query structs ---

#[derive(Debug, Default, Deserialize)]
pub struct WebhookQuery {
    notion_token: Option<String>,
    topic: Option<String>,
    #[serde(default)]
    map_pages_to_topics: bool,
    only_events: Option<String>,
    exclude_events: Option<String>,
}

impl WebhookQuery {
    fn options(&self) -> RequestOptions {
        RequestOptions {
            user_specified_topic: self.topic.clone(),
            map_pages_to_topics: self.map_pages_to_topics,
            filter: EventFilter::from_query(
                self.only_events.as_deref(),
                self.exclude_events.as_deref(),
            ),
        }
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(|| async { "ok" }))
        .route(WEBHOOK_PATH, post(notion_webhook))
        .with_state(state)
        // Method + path only; query strings carry tokens.
        .layer(
            tower_http::trace::TraceLayer::new_for_http().make_span_with(
                |request: &axum::http::Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        path = %request.uri().path(),
                    )
                },
            ),
        )
}

pub async fn notion_webhook(
    State(state): State<Arc<AppState>>,
    Query(query): Query<WebhookQuery>,
    Json(payload): Json<Value>,
) -> Response {
    let options = query.options();

    let token = query
        .notion_token
        .filter(|t| !t.is_empty())
        .unwrap_or_else(|| state.default_notion_token.clone());
    let client = Some(state.notion.with_token(token)).filter(NotionClient::has_token);
    let lookup = client.as_ref().map(|c| c as &dyn NotionLookup);

    match dispatch(&payload, &options, lookup, state.sink.as_ref()).await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({ "result": "success", "msg": "" })),
        )
            .into_response(),
        Err(e) => {
            warn!(error = %e, code = e.code(), "Rejected Notion webhook");
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "result": "error", "msg": e.to_string(), "code": e.code() })),
            )
                .into_response()
        }
    }
}
