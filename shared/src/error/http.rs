//! HTTP status code mapping for error codes

use super::codes::ErrorCode;
use http::StatusCode;

impl ErrorCode {
    /// Get the appropriate HTTP status code for this error code
    ///
    /// Guard violations (occupied table, closed comanda, unavailable
    /// product, bad status transition) are client errors and map to 400,
    /// the same as validation failures.
    pub fn http_status(&self) -> StatusCode {
        match self {
            // Success
            Self::Success => StatusCode::OK,

            // 404 Not Found
            Self::NotFound
            | Self::ComandaNotFound
            | Self::OrderNotFound
            | Self::ProductNotFound
            | Self::TableNotFound => StatusCode::NOT_FOUND,

            // 500 Internal Server Error
            Self::Unknown
            | Self::InternalError
            | Self::DatabaseError
            | Self::ConfigError
            | Self::PartialFailure => StatusCode::INTERNAL_SERVER_ERROR,

            // 400 Bad Request (validation and guard violations)
            _ => StatusCode::BAD_REQUEST,
        }
    }
}
