//! Knowledge base listing

use axum::{extract::State, Json};
use objexis_common::agent::KnowledgeEntry;
use serde::Serialize;

use crate::AppState;

#[derive(Serialize)]
pub struct KnowledgeResponse {
    pub entries: &'static [KnowledgeEntry],
}

/// List every knowledge entry in declaration order
pub async fn list_entries(State(state): State<AppState>) -> Json<KnowledgeResponse> {
    Json(KnowledgeResponse {
        entries: state.agent.knowledge().entries(),
    })
}
