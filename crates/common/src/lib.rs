//! Objexis Common Library
//!
//! Shared code for the Objexis design agent including:
//! - The design agent core (knowledge base, relevance, intent, synthesis)
//! - Error types and handling
//! - Configuration management
//! - Metrics and observability

pub mod agent;
pub mod config;
pub mod errors;
pub mod metrics;

// Re-export commonly used types
pub use agent::{AgentReply, DesignAgent, History, HistoryTurn, Intent, Source};
pub use config::AppConfig;
pub use errors::{AppError, Result};

/// Application version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
