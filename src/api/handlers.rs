//! Budget request endpoints.
//!
//! Each handler is a single stateless transaction: read the request, call the
//! normalizer and/or the storage port, map the outcome to a JSON response.

use crate::{
    api::{
        AppState,
        error::{ApiError, ApiResult},
    },
    core::{StorageError, normalize},
    entities::BudgetRequestModel,
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
};
use serde_json::{Value, json};
use tracing::{error, info, warn};

/// Service name reported by the health probe
pub const SERVICE_NAME: &str = "turning-back-api";

/// `POST /orcament` - validates and stores a submission.
pub async fn create_budget_request(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> ApiResult<(StatusCode, Json<Value>)> {
    info!(
        content_type = ?headers.get(header::CONTENT_TYPE),
        size = body.len(),
        raw_json = %String::from_utf8_lossy(&body),
        "Budget request received"
    );

    let request = normalize(&body).map_err(|rejection| {
        warn!(reason = %rejection, "Budget request rejected");
        ApiError::from_rejection(rejection, &body)
    })?;

    match &request.email {
        Some(email) => info!(email = %email, "Email provided"),
        None => info!("Email not provided - optional field"),
    }

    let created = state.repository.create(request).await.map_err(|e| {
        error!(error = %e, "Failed to store budget request");
        ApiError::CreateFailed(e)
    })?;

    info!(id = created.id, "Budget request created");
    Ok((
        StatusCode::CREATED,
        Json(json!({
            "message": "Orçamento criado com sucesso",
            "orcamento": created,
        })),
    ))
}

/// `GET /orcament/{id}` - fetches one live request.
pub async fn get_budget_request(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<BudgetRequestModel>> {
    let id: u32 = id.parse().map_err(|_| ApiError::InvalidId)?;

    // Any storage failure is reported to the client as not found
    let request = state
        .repository
        .get_by_id(i64::from(id))
        .await
        .map_err(|e| {
            match &e {
                StorageError::NotFound { .. } => info!(id, "Budget request not found"),
                _ => error!(id, error = %e, "Failed to fetch budget request"),
            }
            ApiError::NotFound
        })?;

    Ok(Json(request))
}

/// `GET /orcament` - lists every live request.
pub async fn list_budget_requests(State(state): State<AppState>) -> ApiResult<Json<Value>> {
    let requests = state.repository.get_all().await.map_err(|e| {
        error!(error = %e, "Failed to list budget requests");
        ApiError::ListFailed(e)
    })?;

    let total = requests.len();
    Ok(Json(json!({
        "orcamentos": requests,
        "total": total,
    })))
}

/// `GET /health` - liveness probe.
pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": SERVICE_NAME,
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// `GET /api/v1/ping`
pub async fn ping() -> Json<Value> {
    Json(json!({ "message": "pong" }))
}
