//! `AppError` and the JSON error body it renders to

use super::category::ErrorCategory;
use super::codes::ErrorCode;
use http::StatusCode;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use thiserror::Error;

/// Error returned by every handler
///
/// Carries a stable [`ErrorCode`], a message for humans and optional
/// structured details (offending fields, ids, the completed part of a
/// partially applied operation).
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct AppError {
    pub code: ErrorCode,
    pub message: String,
    pub details: Option<HashMap<String, Value>>,
}

impl AppError {
    /// Error with the default message of its code
    pub fn new(code: ErrorCode) -> Self {
        Self {
            message: code.message().to_string(),
            code,
            details: None,
        }
    }

    pub fn with_message(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Add a detail entry
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.details
            .get_or_insert_with(HashMap::new)
            .insert(key.into(), value.into());
        self
    }

    pub fn http_status(&self) -> StatusCode {
        self.code.http_status()
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::with_message(ErrorCode::ValidationFailed, msg)
    }

    /// Required-field error naming every missing field at once
    pub fn required_fields(fields: &[&str]) -> Self {
        Self::with_message(
            ErrorCode::RequiredField,
            format!("Required fields missing: {}", fields.join(", ")),
        )
        .with_detail("fields", fields.to_vec())
    }

    /// The first step committed, a later one failed; `completed` is what went through
    pub fn partial_failure(msg: impl Into<String>, completed: impl Into<Value>) -> Self {
        Self::with_message(ErrorCode::PartialFailure, msg).with_detail("completed", completed)
    }
}

/// Error body: `{"code": u16, "message": ..., "details": {...}?}`
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse {
    pub code: u16,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<HashMap<String, Value>>,
}

impl From<&AppError> for ApiResponse {
    fn from(err: &AppError) -> Self {
        Self {
            code: err.code.code(),
            message: err.message.clone(),
            details: err.details.clone(),
        }
    }
}

// ===== Axum Integration =====

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.http_status();
        let body = ApiResponse::from(&self);

        if self.code.category() == ErrorCategory::System {
            tracing::error!(
                code = %self.code,
                message = %self.message,
                "System error occurred"
            );
        }

        (status, axum::Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::response::IntoResponse;

    #[test]
    fn test_new_uses_default_message() {
        let err = AppError::new(ErrorCode::TableOccupied);
        assert_eq!(err.code, ErrorCode::TableOccupied);
        assert_eq!(err.message, "Table is already occupied");
        assert!(err.details.is_none());
    }

    #[test]
    fn test_with_detail_accumulates() {
        let err = AppError::validation("quantidade must be positive")
            .with_detail("field", "quantidade")
            .with_detail("index", 2);

        assert_eq!(err.code, ErrorCode::ValidationFailed);
        let details = err.details.unwrap();
        assert_eq!(details["field"], "quantidade");
        assert_eq!(details["index"], 2);
    }

    #[test]
    fn test_display_is_message() {
        let err = AppError::with_message(ErrorCode::OrderNotFound, "Pedido 9 not found");
        assert_eq!(err.to_string(), "Pedido 9 not found");
    }

    #[test]
    fn test_required_fields_lists_all() {
        let err = AppError::required_fields(&["nome_cliente", "mesa_id"]);
        assert_eq!(err.code, ErrorCode::RequiredField);
        assert_eq!(err.message, "Required fields missing: nome_cliente, mesa_id");
        let fields = err.details.unwrap().remove("fields").unwrap();
        assert_eq!(fields, serde_json::json!(["nome_cliente", "mesa_id"]));
    }

    #[test]
    fn test_partial_failure_keeps_completed() {
        let err = AppError::partial_failure(
            "Comanda closed but total unavailable",
            serde_json::json!({"id": 5, "status": "closed"}),
        );
        assert_eq!(err.http_status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.details.unwrap()["completed"]["status"], "closed");
    }

    #[test]
    fn test_error_body_shape() {
        let err = AppError::with_message(ErrorCode::TableNotFound, "Mesa 12 not found")
            .with_detail("mesa_id", 12);
        let json = serde_json::to_value(ApiResponse::from(&err)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"code": 7001, "message": "Mesa 12 not found", "details": {"mesa_id": 12}})
        );

        let json = serde_json::to_value(ApiResponse::from(&AppError::new(ErrorCode::OrderEmpty))).unwrap();
        assert!(json.get("details").is_none());
    }

    #[test]
    fn test_into_response_status() {
        let response = AppError::new(ErrorCode::ComandaClosed).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let response = AppError::new(ErrorCode::ProductNotFound).into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
