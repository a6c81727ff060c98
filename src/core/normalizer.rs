//! Request normalizer - Turns an untrusted JSON submission into a [`NewBudgetRequest`].
//!
//! The client population is loosely specified: the piece count arrives as either
//! `quantidade_pecas` or `quantidadePecas`, email may be missing, and `anexo` may be
//! any JSON value. All of that tolerance lives here so storage and the HTTP layer
//! only ever see a validated submission.

use crate::entities::NewBudgetRequest;
use serde::Deserialize;
use serde::de::IgnoredAny;
use thiserror::Error;
use tracing::debug;
use validator::Validate;

/// Reasons a submission is refused.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Rejection {
    /// Malformed JSON or a structural field check failed
    #[error("{details}")]
    InvalidPayload {
        /// Parser or validator message
        details: String,
    },
    /// Neither quantity field carries a positive value
    #[error("Quantidade de peças é obrigatória")]
    MissingQuantity,
}

/// `anexo` as submitted: only a string is a usable reference.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum AttachmentField {
    Reference(String),
    Discarded(IgnoredAny),
}

impl AttachmentField {
    fn into_reference(self) -> Option<String> {
        match self {
            Self::Reference(reference) => Some(reference),
            Self::Discarded(_) => None,
        }
    }
}

/// Wire shape of `POST /orcament`.
#[derive(Debug, Deserialize, Validate)]
struct Submission {
    #[serde(rename = "nome")]
    #[validate(length(min = 1, message = "nome is required"))]
    name: String,
    #[validate(email(message = "email must be a valid address"))]
    email: Option<String>,
    #[serde(rename = "telefone")]
    #[validate(length(min = 1, message = "telefone is required"))]
    phone: String,
    #[serde(rename = "quantidade_pecas")]
    quantity: Option<i64>,
    #[serde(rename = "quantidadePecas")]
    quantity_alias: Option<i64>,
    #[serde(rename = "descricao")]
    description: Option<String>,
    #[serde(rename = "anexo")]
    attachment: Option<AttachmentField>,
    #[serde(rename = "fileUploadEnabled")]
    file_upload_enabled: Option<bool>,
}

/// Validates a raw request body and resolves it into a [`NewBudgetRequest`].
///
/// Structural problems (bad JSON, missing `nome`/`telefone`, bad email) are
/// reported before the quantity rule is looked at.
///
/// # Errors
/// - [`Rejection::InvalidPayload`] when the body does not parse or a field check fails
/// - [`Rejection::MissingQuantity`] when no positive quantity was supplied
pub fn normalize(raw: &[u8]) -> Result<NewBudgetRequest, Rejection> {
    let mut submission: Submission =
        serde_json::from_slice(raw).map_err(|e| Rejection::InvalidPayload {
            details: e.to_string(),
        })?;

    // An empty email means "not provided", not "invalid"
    submission.email = non_empty(submission.email);
    submission
        .validate()
        .map_err(|e| Rejection::InvalidPayload {
            details: e.to_string(),
        })?;

    debug!(
        submission = ?submission,
        file_upload_enabled = ?submission.file_upload_enabled,
        "Submission parsed"
    );

    let quantity = resolve_quantity(submission.quantity, submission.quantity_alias)
        .ok_or(Rejection::MissingQuantity)?;

    Ok(NewBudgetRequest {
        name: submission.name,
        phone: submission.phone,
        email: submission.email,
        description: non_empty(submission.description),
        quantity,
        attachment_ref: non_empty(
            submission
                .attachment
                .and_then(AttachmentField::into_reference),
        ),
    })
}

/// First positive value wins, canonical field before the alias.
fn resolve_quantity(canonical: Option<i64>, alias: Option<i64>) -> Option<i64> {
    [canonical, alias]
        .into_iter()
        .flatten()
        .find(|quantity| *quantity > 0)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    #![allow(clippy::panic)]
    use super::*;

    fn normalize_json(value: &serde_json::Value) -> Result<NewBudgetRequest, Rejection> {
        normalize(value.to_string().as_bytes())
    }

    #[test]
    fn test_canonical_quantity_field() {
        let request = normalize_json(&serde_json::json!({
            "nome": "Ana",
            "telefone": "111",
            "quantidade_pecas": 5
        }))
        .unwrap();

        assert_eq!(request.quantity, 5);
        assert_eq!(request.name, "Ana");
        assert_eq!(request.phone, "111");
    }

    #[test]
    fn test_alias_quantity_field() {
        let request = normalize_json(&serde_json::json!({
            "nome": "Ana",
            "telefone": "111",
            "quantidadePecas": 3
        }))
        .unwrap();

        assert_eq!(request.quantity, 3);
    }

    #[test]
    fn test_canonical_field_wins_over_alias() {
        let request = normalize_json(&serde_json::json!({
            "nome": "Ana",
            "telefone": "111",
            "quantidade_pecas": 7,
            "quantidadePecas": 2
        }))
        .unwrap();

        assert_eq!(request.quantity, 7);

        // A non-positive canonical value falls through to the alias
        let request = normalize_json(&serde_json::json!({
            "nome": "Ana",
            "telefone": "111",
            "quantidade_pecas": 0,
            "quantidadePecas": 4
        }))
        .unwrap();

        assert_eq!(request.quantity, 4);
    }

    #[test]
    fn test_quantity_beyond_32_bits() {
        let request = normalize_json(&serde_json::json!({
            "nome": "Ana",
            "telefone": "111",
            "quantidade_pecas": 3_000_000_000_i64
        }))
        .unwrap();

        assert_eq!(request.quantity, 3_000_000_000);
    }

    #[test]
    fn test_missing_quantity() {
        let absent = normalize_json(&serde_json::json!({"nome": "Ana", "telefone": "111"}));
        assert_eq!(absent.unwrap_err(), Rejection::MissingQuantity);

        let non_positive = normalize_json(&serde_json::json!({
            "nome": "Ana",
            "telefone": "111",
            "quantidade_pecas": 0,
            "quantidadePecas": -2
        }));
        assert_eq!(non_positive.unwrap_err(), Rejection::MissingQuantity);
    }

    #[test]
    fn test_missing_name_is_rejected_before_quantity() {
        // No quantity either: the structural failure must be the one reported
        let result = normalize_json(&serde_json::json!({"telefone": "111"}));
        assert!(matches!(result, Err(Rejection::InvalidPayload { .. })));

        let result = normalize_json(&serde_json::json!({"nome": "", "telefone": "111"}));
        assert!(matches!(result, Err(Rejection::InvalidPayload { .. })));
    }

    #[test]
    fn test_missing_phone() {
        let result = normalize_json(&serde_json::json!({"nome": "Ana", "quantidade_pecas": 1}));
        let Err(Rejection::InvalidPayload { details }) = &result else {
            panic!("expected InvalidPayload, got {result:?}");
        };
        assert!(details.contains("telefone"));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            normalize(b"{\"nome\": \"Ana\","),
            Err(Rejection::InvalidPayload { .. })
        ));
        assert!(matches!(
            normalize(b""),
            Err(Rejection::InvalidPayload { .. })
        ));
        assert!(matches!(
            normalize(b"[1, 2, 3]"),
            Err(Rejection::InvalidPayload { .. })
        ));
    }

    #[test]
    fn test_non_integer_quantity_is_invalid_payload() {
        let result = normalize_json(&serde_json::json!({
            "nome": "Ana",
            "telefone": "111",
            "quantidade_pecas": "cinco"
        }));
        assert!(matches!(result, Err(Rejection::InvalidPayload { .. })));
    }

    #[test]
    fn test_attachment_narrowing() {
        let with_string = normalize_json(&serde_json::json!({
            "nome": "Ana",
            "telefone": "111",
            "quantidade_pecas": 1,
            "anexo": "uploads/planta.pdf"
        }))
        .unwrap();
        assert_eq!(
            with_string.attachment_ref.as_deref(),
            Some("uploads/planta.pdf")
        );

        for anexo in [
            serde_json::json!(42),
            serde_json::json!({"file": "x"}),
            serde_json::json!(["a"]),
            serde_json::json!(true),
            serde_json::Value::Null,
        ] {
            let request = normalize_json(&serde_json::json!({
                "nome": "Ana",
                "telefone": "111",
                "quantidade_pecas": 1,
                "anexo": anexo
            }))
            .unwrap();
            assert_eq!(request.attachment_ref, None);
        }
    }

    #[test]
    fn test_email_validation() {
        let invalid = normalize_json(&serde_json::json!({
            "nome": "Ana",
            "telefone": "111",
            "quantidade_pecas": 1,
            "email": "not-an-email"
        }));
        assert!(matches!(invalid, Err(Rejection::InvalidPayload { .. })));

        let omitted = normalize_json(&serde_json::json!({
            "nome": "Ana",
            "telefone": "111",
            "quantidade_pecas": 1
        }))
        .unwrap();
        assert_eq!(omitted.email, None);

        let empty = normalize_json(&serde_json::json!({
            "nome": "Ana",
            "telefone": "111",
            "quantidade_pecas": 1,
            "email": ""
        }))
        .unwrap();
        assert_eq!(empty.email, None);

        let valid = normalize_json(&serde_json::json!({
            "nome": "Ana",
            "telefone": "111",
            "quantidade_pecas": 1,
            "email": "ana@example.com"
        }))
        .unwrap();
        assert_eq!(valid.email.as_deref(), Some("ana@example.com"));
    }

    #[test]
    fn test_optional_text_and_unknown_fields() {
        let request = normalize_json(&serde_json::json!({
            "nome": "Ana",
            "telefone": "111",
            "quantidade_pecas": 1,
            "descricao": "",
            "fileUploadEnabled": true,
            "origem": "landing-page"
        }))
        .unwrap();

        assert_eq!(request.description, None);
    }
}
