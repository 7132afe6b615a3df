//! Moderation API endpoints
//!
//! - PUT /api/v1/admin/entries/{kind}/{id}/status - Approve or reject an entry
//!
//! Mounted behind the session middleware.

use axum::{
    extract::{Path, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::api::common::parse_kind;
use crate::api::middleware::{ApiError, AppState, SignedInUser};
use crate::models::{Entry, EntryStatus};

#[derive(Debug, Deserialize)]
pub struct UpdateStatusRequest {
    pub status: String,
}

/// PUT /api/v1/admin/entries/{kind}/{id}/status
pub async fn update_entry_status(
    State(state): State<AppState>,
    Extension(SignedInUser(user)): Extension<SignedInUser>,
    Path((kind, id)): Path<(String, i64)>,
    Json(request): Json<UpdateStatusRequest>,
) -> Result<Json<Entry>, ApiError> {
    let kind = parse_kind(&kind)?;
    let status = EntryStatus::from_str(&request.status).ok_or_else(|| {
        ApiError::validation_error(format!("Unknown status: {}", request.status))
    })?;

    tracing::info!("{} sets {} {} to {}", user.id, kind, id, status);
    let entry = state.catalog_service.set_status(kind, id, status).await?;
    Ok(Json(entry))
}

#[cfg(test)]
mod tests {
    use crate::api::testing::{bearer, seeded_state, sign_in, test_server};
    use crate::services::interpreter::testing::MockGenerator;
    use axum::http::{header, StatusCode};
    use serde_json::{json, Value};

    #[tokio::test]
    async fn test_approval_makes_entry_visible() {
        let state = seeded_state(MockGenerator::replying(r#"{"keywords":["x"]}"#)).await;
        let token = sign_in(&state);
        let server = test_server(state);

        // Warm the caches first so approval has to invalidate them
        let before: Value = server.get("/api/v1/catalog/models").await.json();
        assert_eq!(before["items"].as_array().unwrap().len(), 2);
        let categories: Value = server.get("/api/v1/categories").await.json();
        let total_before = categories["total"].as_i64().unwrap();

        // Each collection has its own ids; the pending model is the third model
        let response = server
            .put("/api/v1/admin/entries/models/3/status")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({"status": "approved"}))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["name"], "hidden-model");
        assert_eq!(body["status"], "approved");

        let after: Value = server.get("/api/v1/catalog/models").await.json();
        assert_eq!(after["items"][0]["name"], "hidden-model");
        let categories: Value = server.get("/api/v1/categories").await.json();
        assert_eq!(categories["total"].as_i64().unwrap(), total_before + 1);
    }

    #[tokio::test]
    async fn test_status_errors() {
        let state = seeded_state(MockGenerator::replying(r#"{"keywords":["x"]}"#)).await;
        let token = sign_in(&state);
        let server = test_server(state);

        server
            .put("/api/v1/admin/entries/models/1/status")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({"status": "archived"}))
            .await
            .assert_status(StatusCode::BAD_REQUEST);

        server
            .put("/api/v1/admin/entries/models/999/status")
            .add_header(header::AUTHORIZATION, bearer(&token))
            .json(&json!({"status": "rejected"}))
            .await
            .assert_status(StatusCode::NOT_FOUND);
    }
}
