//! API handlers for schema provisioning.

use axum::{extract::State, response::Html, Json};
use serde::{Deserialize, Serialize};

use crate::http::error::ApiError;
use crate::http::server::AppState;
use crate::security::allowlist::{extract_host, is_host_allowed};
use crate::sqlgen::{generate_sql, render_env_file, FeatureSet};

/// Request body for `POST /api/connect`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectRequest {
    pub connection_string: Option<String>,
}

/// Request body for `POST /api/generate`.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub connection_string: Option<String>,
    pub features: Option<Vec<String>>,
}

/// Response body for operations that carry no artifact.
#[derive(Serialize)]
pub struct StatusResponse {
    pub success: bool,
    pub message: String,
}

/// Response body for a successful generate-and-execute.
#[derive(Serialize)]
pub struct GenerateResponse {
    pub success: bool,
    pub message: String,
    pub env: String,
    pub sql: String,
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub version: &'static str,
    pub status: &'static str,
}

/// Verify connectivity to the target database. Never mutates target data.
///
/// A failed connection attempt is a 200 with `success:false`; the driver's
/// message is passed through to the caller.
pub async fn connect(
    State(state): State<AppState>,
    Json(body): Json<ConnectRequest>,
) -> Result<Json<StatusResponse>, ApiError> {
    let connection_string = require_field(body.connection_string, "connectionString")?;
    let host = check_allowlist(&state, &connection_string)?;

    match state.executor.ping(&connection_string).await {
        Ok(()) => {
            tracing::info!(host = %host, "Connection verified");
            Ok(Json(StatusResponse {
                success: true,
                message: "Connection successful".to_string(),
            }))
        }
        Err(e) => {
            tracing::warn!(host = %host, error = %e, "Connection attempt failed");
            Ok(Json(StatusResponse {
                success: false,
                message: e.to_string(),
            }))
        }
    }
}

/// Generate the schema for the selected features and execute it against the
/// target database as a single batch.
pub async fn generate(
    State(state): State<AppState>,
    Json(body): Json<GenerateRequest>,
) -> Result<Json<GenerateResponse>, ApiError> {
    let connection_string = require_field(body.connection_string, "connectionString")?;
    let names = body.features.ok_or(ApiError::MissingField("features"))?;
    let host = check_allowlist(&state, &connection_string)?;

    let features = FeatureSet::from_names(names.iter().map(String::as_str));
    let sql = generate_sql(&features);
    if sql.is_empty() {
        return Err(ApiError::EmptyFeatureSelection);
    }

    state
        .executor
        .execute_batch(&connection_string, &sql)
        .await
        .map_err(|e| {
            tracing::warn!(host = %host, error = %e, "Schema execution failed");
            ApiError::Execution(e.to_string())
        })?;

    tracing::info!(host = %host, features = ?names, "Schema executed");

    let env = render_env_file(&connection_string, &features);
    Ok(Json(GenerateResponse {
        success: true,
        message: "Schema created successfully".to_string(),
        env,
        sql,
    }))
}

/// Service health and version.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        version: env!("CARGO_PKG_VERSION"),
        status: "operational",
    })
}

/// Embedded frontend document.
pub async fn index() -> Html<&'static str> {
    Html(include_str!("../../assets/index.html"))
}

fn require_field(value: Option<String>, name: &'static str) -> Result<String, ApiError> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(ApiError::MissingField(name)),
    }
}

/// Allowlist gate shared by both operations.
///
/// Returns the extracted host for logging; the raw connection string is
/// never logged.
fn check_allowlist(state: &AppState, connection_string: &str) -> Result<String, ApiError> {
    if !is_host_allowed(connection_string, &state.allowlist.suffixes) {
        tracing::warn!(
            host = extract_host(connection_string).as_deref().unwrap_or("<unparseable>"),
            "Rejected disallowed database host"
        );
        return Err(ApiError::HostNotAllowed);
    }
    // is_host_allowed fails closed, so the host parses here
    extract_host(connection_string).ok_or(ApiError::HostNotAllowed)
}
