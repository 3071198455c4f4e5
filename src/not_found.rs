use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// The fallback route handler for paths that match no route.
pub async fn get_404_not_found() -> Response {
    get_404_not_found_response()
}

/// A 404 response with a JSON error body.
pub fn get_404_not_found_response() -> Response {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Not found" })),
    )
        .into_response()
}
