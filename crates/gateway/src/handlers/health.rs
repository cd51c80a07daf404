//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;
use crate::AppState;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub checks: HealthChecks,
}

#[derive(Serialize)]
pub struct HealthChecks {
    pub knowledge: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    pub status: String,
    pub entries: usize,
}

/// Liveness probe - always returns healthy if server is running
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
    })
}

/// Readiness probe - the agent needs a non-empty knowledge base
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let entries = state.agent.knowledge().len();

    let knowledge_check = CheckResult {
        status: if entries > 0 { "up" } else { "down" }.to_string(),
        entries,
    };

    let all_healthy = knowledge_check.status == "up";

    Json(ReadyResponse {
        status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
        checks: HealthChecks {
            knowledge: knowledge_check,
        },
    })
}
