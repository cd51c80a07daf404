//! Caller-supplied conversation history
//!
//! History arrives as loosely shaped JSON and only the concept template
//! quotes it, so decoding is deferred until a template asks for the turns.

use crate::errors::Result;
use serde_json::Value;
use std::borrow::Cow;

/// Author of a history turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    /// Any role other than "user" is rendered as the agent
    Assistant,
}

impl Role {
    /// Label used when quoting the turn back in a reply
    pub fn speaker(&self) -> &'static str {
        match self {
            Role::User => "You",
            Role::Assistant => "Agent",
        }
    }
}

/// One prior message in the conversation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryTurn {
    pub role: Role,
    pub content: String,
}

impl HistoryTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }

    /// Decode one turn without rejecting it.
    ///
    /// A role other than the string "user" becomes the agent. Missing or null
    /// content is empty; non-string content is kept as its JSON text.
    pub fn from_value(value: &Value) -> Self {
        let role = match value.get("role").and_then(Value::as_str) {
            Some("user") => Role::User,
            _ => Role::Assistant,
        };

        let content = match value.get("content") {
            Some(Value::String(content)) => content.clone(),
            None | Some(Value::Null) => String::new(),
            Some(other) => other.to_string(),
        };

        Self { role, content }
    }

    /// `"<You|Agent>: <content>"`
    pub fn render(&self) -> String {
        format!("{}: {}", self.role.speaker(), self.content)
    }
}

/// Conversation history as handed to the agent
#[derive(Debug, Clone)]
pub enum History {
    /// Turns already decoded by the caller
    Turns(Vec<HistoryTurn>),
    /// The request's `history` field exactly as received
    Raw(Value),
}

impl History {
    /// Decoded turns in order.
    ///
    /// Null means no history. Raw history that is not an array is a
    /// serialization error; individual turns never fail.
    pub fn turns(&self) -> Result<Cow<'_, [HistoryTurn]>> {
        match self {
            History::Turns(turns) => Ok(Cow::Borrowed(turns.as_slice())),
            History::Raw(Value::Null) => Ok(Cow::Owned(Vec::new())),
            History::Raw(raw) => {
                let items: Vec<Value> = serde_json::from_value(raw.clone())?;
                Ok(Cow::Owned(items.iter().map(HistoryTurn::from_value).collect()))
            }
        }
    }

    /// True when the caller supplied nothing worth decoding
    pub fn is_absent(&self) -> bool {
        match self {
            History::Turns(turns) => turns.is_empty(),
            History::Raw(Value::Null) => true,
            History::Raw(_) => false,
        }
    }
}

impl Default for History {
    fn default() -> Self {
        History::Turns(Vec::new())
    }
}

impl From<Vec<HistoryTurn>> for History {
    fn from(turns: Vec<HistoryTurn>) -> Self {
        History::Turns(turns)
    }
}

impl From<Value> for History {
    fn from(raw: Value) -> Self {
        History::Raw(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_render() {
        assert_eq!(HistoryTurn::user("hi").render(), "You: hi");
        assert_eq!(HistoryTurn::assistant("hello").render(), "Agent: hello");
    }

    #[test]
    fn test_unknown_role_is_agent() {
        let turn = HistoryTurn::from_value(&json!({ "role": "system", "content": "boot" }));
        assert_eq!(turn.role, Role::Assistant);
        assert_eq!(turn.render(), "Agent: boot");

        let turn = HistoryTurn::from_value(&json!({ "role": 7, "content": "x" }));
        assert_eq!(turn.role, Role::Assistant);
    }

    #[test]
    fn test_loose_content_is_coerced() {
        let turn = HistoryTurn::from_value(&json!({ "role": "user" }));
        assert_eq!(turn.render(), "You: ");

        let turn = HistoryTurn::from_value(&json!({ "role": "user", "content": 42 }));
        assert_eq!(turn.content, "42");

        let turn = HistoryTurn::from_value(&json!("just text"));
        assert_eq!(turn, HistoryTurn::assistant(""));
    }

    #[test]
    fn test_raw_history_turns() {
        let history = History::from(json!([
            { "role": "user", "content": "a" },
            { "role": "assistant", "content": "b" },
        ]));
        let turns = history.turns().unwrap();
        assert_eq!(turns.len(), 2);
        assert_eq!(turns[0], HistoryTurn::user("a"));
        assert!(!history.is_absent());
    }

    #[test]
    fn test_null_history_is_empty() {
        let history = History::from(Value::Null);
        assert!(history.is_absent());
        assert!(history.turns().unwrap().is_empty());
        assert!(History::default().turns().unwrap().is_empty());
    }

    #[test]
    fn test_non_array_history_fails_on_decode() {
        let history = History::from(json!("yesterday"));
        let err = history.turns().unwrap_err();
        assert!(err.is_server_error());
        assert!(err.to_string().contains("expected a sequence"));
    }
}
