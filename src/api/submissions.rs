//! Submission API endpoints
//!
//! - POST /api/v1/submissions/{kind} - Submit a tool, repository or model for review
//!
//! Requires a signed-in session. The collection comes from the path; a body
//! naming a different `kind` is rejected.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde_json::Value;

use crate::api::common::parse_kind;
use crate::api::middleware::{ApiError, AppState, SignedInUser};
use crate::models::{ContentKind, Entry, NewEntryInput};

/// POST /api/v1/submissions/{kind}
pub async fn create_submission(
    State(state): State<AppState>,
    Extension(SignedInUser(user)): Extension<SignedInUser>,
    Path(kind): Path<String>,
    Json(body): Json<Value>,
) -> Result<(StatusCode, Json<Entry>), ApiError> {
    let kind = parse_kind(&kind)?;
    let input = parse_submission(kind, body)?;

    let entry = state.catalog_service.submit(input, &user.id).await?;
    Ok((StatusCode::CREATED, Json(entry)))
}

/// Read a submission body for `kind`
fn parse_submission(kind: ContentKind, mut body: Value) -> Result<NewEntryInput, ApiError> {
    let Some(fields) = body.as_object_mut() else {
        return Err(ApiError::validation_error("Submission must be a JSON object"));
    };

    match fields.get("kind").and_then(Value::as_str) {
        Some(named) if ContentKind::from_str(named) != Some(kind) => {
            return Err(ApiError::validation_error(format!(
                "Submission kind '{}' does not match collection '{}'",
                named, kind
            )));
        }
        _ => {
            fields.insert("kind".to_string(), Value::from(kind.as_str()));
        }
    }

    serde_json::from_value(body)
        .map_err(|e| ApiError::validation_error(format!("Invalid submission: {}", e)))
}
