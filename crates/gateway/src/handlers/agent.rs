//! Design agent handlers

use axum::{body::Bytes, extract::State, Json};
use objexis_common::{
    agent::phrases::{STARTER_PROMPTS, WELCOME_MESSAGE},
    errors::{AppError, Result},
    metrics::{self, RequestMetrics},
    History, Source,
};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

use crate::AppState;

/// Validation message for a missing or empty `message`
pub const MESSAGE_REQUIRED: &str = "Message is required.";

/// Parsed agent request
#[derive(Debug)]
pub struct AgentRequest {
    pub message: String,
    pub history: History,
}

impl AgentRequest {
    /// Parse a raw JSON body.
    ///
    /// An unparseable body is a serialization error; a missing, non-string
    /// or empty `message` is a validation error. `history` is kept as sent and
    /// only decoded if the reply template quotes it.
    pub fn parse(body: &[u8]) -> Result<Self> {
        let mut value: Value = serde_json::from_slice(body)?;

        let message = match value.get("message") {
            Some(Value::String(message)) if !message.is_empty() => message.clone(),
            _ => return Err(AppError::required("message", MESSAGE_REQUIRED)),
        };

        let history = value
            .get_mut("history")
            .map(|raw| History::Raw(raw.take()))
            .unwrap_or_default();

        Ok(Self { message, history })
    }
}

/// Agent reply response
#[derive(Serialize)]
pub struct AgentResponse {
    pub reply: String,
    pub sources: Vec<Source>,
}

/// Chat widget welcome payload
#[derive(Serialize)]
pub struct IntroResponse {
    pub greeting: &'static str,
    pub starter_prompts: &'static [&'static str],
}

/// Answer one chat message
pub async fn converse(State(state): State<AppState>, body: Bytes) -> Result<Json<AgentResponse>> {
    let request_metrics = RequestMetrics::start("POST", "/api/agent");

    let outcome = AgentRequest::parse(&body)
        .and_then(|request| state.agent.respond(&request.message, &request.history));

    match outcome {
        Ok(reply) => {
            info!(
                intent = %reply.intent,
                sources = reply.sources.len(),
                fallback = reply.fallback,
                latency_ms = (request_metrics.elapsed_secs() * 1000.0) as u64,
                "Agent reply composed"
            );

            metrics::record_agent_reply(reply.intent.as_str(), reply.sources.len(), reply.fallback);
            request_metrics.finish(200);

            Ok(Json(AgentResponse {
                reply: reply.reply,
                sources: reply.sources,
            }))
        }
        Err(err) => {
            metrics::record_agent_failure(err.code().as_str());
            request_metrics.finish(err.status_code().as_u16());
            Err(err)
        }
    }
}

/// Welcome payload for the chat widget
pub async fn intro() -> Json<IntroResponse> {
    Json(IntroResponse {
        greeting: WELCOME_MESSAGE,
        starter_prompts: STARTER_PROMPTS,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use objexis_common::agent::Role;

    #[test]
    fn test_parse_message_and_history() {
        let body = br#"{"message":"hi","history":[{"role":"user","content":"a"},{"role":"assistant","content":"b"}]}"#;
        let request = AgentRequest::parse(body).unwrap();
        assert_eq!(request.message, "hi");

        let turns = request.history.turns().unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[1].role, Role::Assistant);
    }

    #[test]
    fn test_parse_missing_message() {
        let bodies: [&[u8]; 4] = [b"{}", br#"{"message":""}"#, br#"{"message":42}"#, b"[]"];
        for body in bodies {
            let err = AgentRequest::parse(body).unwrap_err();
            assert!(err.is_client_error());
            assert_eq!(err.public_message(), MESSAGE_REQUIRED);
        }
    }

    #[test]
    fn test_parse_null_history() {
        let request = AgentRequest::parse(br#"{"message":"hi","history":null}"#).unwrap();
        assert!(request.history.is_absent());

        let request = AgentRequest::parse(br#"{"message":"hi"}"#).unwrap();
        assert!(request.history.turns().unwrap().is_empty());
    }

    #[test]
    fn test_parse_malformed_body() {
        let err = AgentRequest::parse(b"{not json").unwrap_err();
        assert!(err.is_server_error());
    }

    #[test]
    fn test_parse_defers_history_decoding() {
        let request = AgentRequest::parse(br#"{"message":"hi","history":"yesterday"}"#).unwrap();
        assert_eq!(request.message, "hi");
        assert!(request.history.turns().unwrap_err().is_server_error());

        let request = AgentRequest::parse(br#"{"message":"hi","history":[{"role":"user"}]}"#).unwrap();
        assert_eq!(request.history.turns().unwrap()[0].render(), "You: ");
    }

    #[test]
    fn test_whitespace_message_is_accepted() {
        let request = AgentRequest::parse(br#"{"message":"   "}"#).unwrap();
        assert_eq!(request.message, "   ");
    }
}
