//! Failure-to-response translation.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use opsboard_config::Environment;
use opsboard_core::store::StoreError;

/// Wire shape of every error response.
#[derive(Debug, Serialize)]
pub(crate) struct ErrorBody {
    pub message: String,
    /// Diagnostic detail, only populated outside production mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

pub(crate) type Failure = (StatusCode, Json<ErrorBody>);

pub(crate) fn bad_request(message: impl Into<String>) -> Failure {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorBody {
            message: message.into(),
            detail: None,
        }),
    )
}

pub(crate) fn not_found() -> Failure {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody {
            message: "Not found".to_string(),
            detail: None,
        }),
    )
}

/// Store failures become responses here. NotFound keeps the original's flat
/// "Not found" body; anything else is a 500 whose body stays opaque in
/// production mode.
pub(crate) fn map_store_error(environment: Environment, err: StoreError) -> Failure {
    match err {
        StoreError::NotFound(_) => not_found(),
        other => {
            tracing::error!("store failure: {}", other);
            let detail = (!environment.is_production()).then(|| other.to_string());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    message: "Internal server error".to_string(),
                    detail,
                }),
            )
        }
    }
}
