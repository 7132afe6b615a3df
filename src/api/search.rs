//! Search API endpoints
//!
//! - POST /api/v1/search - Natural-language search over all three collections
//! - GET /api/v1/search/recent - Recent queries, most recent first

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::api::common::ViewQuery;
use crate::api::middleware::{ApiError, AppState};
use crate::models::Entry;
use crate::services::{DisplaySource, ViewHints};

/// Request body for a search
#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    #[serde(default)]
    pub query: String,
    #[serde(flatten)]
    pub view: ViewQuery,
}

/// Response for a finished search
#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub query: String,
    pub intent: String,
    /// The model call fell back or a collection could not be searched
    pub degraded: bool,
    pub tools: Vec<Entry>,
    pub repositories: Vec<Entry>,
    pub models: Vec<Entry>,
    pub total: usize,
    pub view: ViewHints,
}

#[derive(Debug, Serialize)]
pub struct RecentSearchesResponse {
    pub searches: Vec<String>,
}

/// Build the search router
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", post(run_search))
        .route("/recent", get(recent_searches))
}

/// POST /api/v1/search
///
/// A blank query does nothing and answers 204, before any view option is resolved.
async fn run_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Response, ApiError> {
    if request.query.trim().is_empty() {
        return Ok(StatusCode::NO_CONTENT.into_response());
    }
    let options = request.view.resolve(&state).await?;

    let Some(outcome) = state.search_service.search(&request.query).await else {
        return Ok(StatusCode::NO_CONTENT.into_response());
    };

    let result = DisplaySource::Search(outcome.result).render(&options);
    Ok(Json(SearchResponse {
        query: outcome.query,
        intent: outcome.intent,
        degraded: outcome.degraded,
        tools: result.tools,
        repositories: result.repositories,
        models: result.models,
        total: result.total,
        view: options.hints(),
    })
    .into_response())
}

/// GET /api/v1/search/recent
async fn recent_searches(State(state): State<AppState>) -> Json<RecentSearchesResponse> {
    Json(RecentSearchesResponse {
        searches: state.search_service.recent_searches().await,
    })
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{seeded_state, test_server};
    use crate::services::interpreter::testing::MockGenerator;
    use crate::services::DEFAULT_RECENT_SEARCHES;
    use axum::http::StatusCode;
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_search_returns_interpreted_results() {
        let generator = MockGenerator::replying(
            r#"{"keywords":["classification"],"categories":["models"],"tags":[],"intent":"Find text classifiers"}"#,
        );
        let server = test_server(seeded_state(generator.clone()).await);

        let response = server
            .post("/api/v1/search")
            .json(&json!({"query": "  machine learning models for text analysis "}))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();

        assert_eq!(body["query"], "machine learning models for text analysis");
        assert_eq!(body["intent"], "Find text classifiers");
        assert_eq!(body["degraded"], false);
        assert_eq!(body["models"].as_array().unwrap().len(), 2);
        assert_eq!(body["total"], 2);
        assert_eq!(generator.calls(), 1);

        let recent: Value = server.get("/api/v1/search/recent").await.json();
        assert_eq!(recent["searches"][0], "machine learning models for text analysis");
        assert_eq!(recent["searches"].as_array().unwrap().len(), 4);
    }

    #[tokio::test]
    async fn test_search_applies_view_options() {
        let generator = MockGenerator::replying(r#"{"keywords":["model"]}"#);
        let server = test_server(seeded_state(generator).await);

        let body: Value = server
            .post("/api/v1/search")
            .json(&json!({"query": "models", "sort": "downloads", "view": "list", "category": 1}))
            .await
            .json();

        // Models sit in category 2, so filtering by category 1 hides them
        assert!(body["models"].as_array().unwrap().is_empty());
        assert_eq!(body["total"], 0);
        assert_eq!(body["view"]["mode"], "list");
    }

    #[tokio::test]
    async fn test_degraded_search_is_flagged() {
        let server = test_server(seeded_state(MockGenerator::failing("connection refused")).await);

        let body: Value = server
            .post("/api/v1/search")
            .json(&json!({"query": "image labelling"}))
            .await
            .json();

        assert_eq!(body["degraded"], true);
        assert_eq!(body["intent"], "image labelling");
        assert_eq!(body["tools"][0]["name"], "image-tagger");
    }

    #[tokio::test]
    async fn test_blank_query_is_no_content() {
        let generator = MockGenerator::replying(r#"{"keywords":["x"]}"#);
        let server = test_server(seeded_state(generator.clone()).await);

        let response = server.post("/api/v1/search").json(&json!({"query": "   "})).await;
        response.assert_status(StatusCode::NO_CONTENT);
        assert_eq!(generator.calls(), 0);

        let recent: Value = server.get("/api/v1/search/recent").await.json();
        assert_eq!(recent["searches"], json!(DEFAULT_RECENT_SEARCHES));
    }

    #[tokio::test]
    async fn test_blank_query_skips_view_resolution() {
        let generator = MockGenerator::replying(r#"{"keywords":["x"]}"#);
        let state = seeded_state(generator.clone()).await;
        // Resolving a category filter now fails, so only an early return can answer 204
        state.pool.execute("DROP TABLE categories").await.unwrap();
        let server = test_server(state);

        server
            .post("/api/v1/search")
            .json(&json!({"query": "   ", "category": 1}))
            .await
            .assert_status(StatusCode::NO_CONTENT);
        assert_eq!(generator.calls(), 0);

        server
            .post("/api/v1/search")
            .json(&json!({"query": "bert", "category": 1}))
            .await
            .assert_status(StatusCode::INTERNAL_SERVER_ERROR);
    }
}
