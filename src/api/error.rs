//! HTTP error mapping - one variant per failure the endpoints can report.

use crate::core::{Rejection, StorageError};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

const CREATE_HELP: &str =
    "Campos obrigatórios: nome, telefone, quantidade_pecas (ou quantidadePecas). Email é opcional.";
const QUANTITY_HELP: &str = "Use 'quantidade_pecas' ou 'quantidadePecas' com valor maior que 0";

/// Failures returned by the budget request endpoints
#[derive(Debug, Error)]
pub enum ApiError {
    /// The submission did not parse or failed a field check
    #[error("Invalid request data")]
    InvalidPayload {
        /// Parser or validator message
        details: String,
        /// The body as received
        received_json: String,
    },

    /// No positive quantity in either quantity field
    #[error("Quantidade de peças é obrigatória")]
    MissingQuantity,

    /// Storing a valid submission failed
    #[error("Failed to create orcamento")]
    CreateFailed(#[source] StorageError),

    /// The path id is not an unsigned integer
    #[error("Invalid ID format")]
    InvalidId,

    /// Lookup by id failed
    #[error("Orçamento não encontrado")]
    NotFound,

    /// Listing failed
    #[error("Failed to fetch orcamentos")]
    ListFailed(#[source] StorageError),
}

impl ApiError {
    /// Maps a normalizer rejection, keeping the raw body for the client.
    #[must_use]
    pub fn from_rejection(rejection: Rejection, raw: &[u8]) -> Self {
        match rejection {
            Rejection::InvalidPayload { details } => Self::InvalidPayload {
                details,
                received_json: String::from_utf8_lossy(raw).into_owned(),
            },
            Rejection::MissingQuantity => Self::MissingQuantity,
        }
    }

    /// HTTP status for this failure
    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::InvalidPayload { .. } | Self::MissingQuantity | Self::InvalidId => {
                StatusCode::BAD_REQUEST
            }
            Self::NotFound => StatusCode::NOT_FOUND,
            Self::CreateFailed(_) | Self::ListFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = self.to_string();
        let body = match self {
            Self::InvalidPayload {
                details,
                received_json,
            } => json!({
                "error": error,
                "details": details,
                "received_json": received_json,
                "help": CREATE_HELP,
            }),
            Self::MissingQuantity => json!({ "error": error, "help": QUANTITY_HELP }),
            Self::CreateFailed(source) | Self::ListFailed(source) => {
                json!({ "error": error, "details": source.to_string() })
            }
            Self::InvalidId | Self::NotFound => json!({ "error": error }),
        };
        (status, Json(body)).into_response()
    }
}

/// Result type for handlers
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;
    use sea_orm::DbErr;

    #[test]
    fn test_rejection_mapping() {
        let invalid = ApiError::from_rejection(
            Rejection::InvalidPayload {
                details: "missing field `nome`".to_string(),
            },
            br#"{"telefone":"1"}"#,
        );
        assert_eq!(invalid.status(), StatusCode::BAD_REQUEST);
        let ApiError::InvalidPayload { received_json, .. } = &invalid else {
            unreachable!("InvalidPayload maps to InvalidPayload");
        };
        assert_eq!(received_json, r#"{"telefone":"1"}"#);

        let missing = ApiError::from_rejection(Rejection::MissingQuantity, b"{}");
        assert!(matches!(missing, ApiError::MissingQuantity));
    }

    #[test]
    fn test_statuses() {
        assert_eq!(ApiError::InvalidId.status(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::NotFound.status(), StatusCode::NOT_FOUND);
        assert_eq!(
            ApiError::CreateFailed(StorageError::Database(DbErr::Custom("x".to_string()))).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            ApiError::ListFailed(StorageError::NotFound { id: 1 }).status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
