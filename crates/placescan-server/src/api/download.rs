use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use placescan_pipeline::XLSX_CONTENT_TYPE;
use uuid::Uuid;

use super::AppState;

const DOWNLOAD_DISPOSITION: &str = "attachment; filename=\"results.xlsx\"";

/// Serves a cached workbook. Malformed, unknown and evicted ids are all 404.
pub(super) async fn download(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let cached = match Uuid::parse_str(&id) {
        Ok(id) => state.exports.get(&id).await,
        Err(_) => None,
    };

    let Some(bytes) = cached else {
        tracing::debug!(export_id = %id, "export not found");
        return (
            StatusCode::NOT_FOUND,
            "Export nicht gefunden oder abgelaufen.",
        )
            .into_response();
    };

    (
        [
            (header::CONTENT_TYPE, XLSX_CONTENT_TYPE),
            (header::CONTENT_DISPOSITION, DOWNLOAD_DISPOSITION),
        ],
        bytes,
    )
        .into_response()
}
