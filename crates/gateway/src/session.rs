//! Conversation state.
//!
//! [`ChatSession`] is the history sent to the AI service on every turn. [`ChatMessage`] is what
//! the user sees; the two differ because the hidden context turns never appear in the
//! transcript and failed replies only appear there.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Model,
}

impl ChatRole {
    pub fn as_str(self) -> &'static str {
        match self {
            ChatRole::User => "user",
            ChatRole::Model => "model",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Model,
            text: text.into(),
        }
    }
}

/// One multi-turn conversation with the AI service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatSession {
    system_instruction: String,
    history: Vec<ChatTurn>,
}

impl ChatSession {
    pub fn new(system_instruction: impl Into<String>, history: Vec<ChatTurn>) -> Self {
        Self {
            system_instruction: system_instruction.into(),
            history,
        }
    }

    pub fn system_instruction(&self) -> &str {
        &self.system_instruction
    }

    pub fn history(&self) -> &[ChatTurn] {
        &self.history
    }

    /// Records a completed exchange. Only called once the reply has arrived.
    pub fn record_exchange(&mut self, user_text: impl Into<String>, reply: impl Into<String>) {
        self.history.push(ChatTurn::user(user_text));
        self.history.push(ChatTurn::model(reply));
    }
}

/// Who wrote a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Ai,
}

/// One entry in the visible chat transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            text: text.into(),
        }
    }

    pub fn ai(text: impl Into<String>) -> Self {
        Self {
            sender: Sender::Ai,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_exchange_appends_user_then_model() {
        let mut session = ChatSession::new("sys", vec![ChatTurn::user("ctx")]);
        session.record_exchange("hi", "hello");
        assert_eq!(
            session.history(),
            &[
                ChatTurn::user("ctx"),
                ChatTurn::user("hi"),
                ChatTurn::model("hello")
            ]
        );
    }

    #[test]
    fn transcript_serialises_sender_in_lowercase() {
        let json = serde_json::to_value(ChatMessage::ai("hello")).unwrap();
        assert_eq!(json, serde_json::json!({"sender": "ai", "text": "hello"}));
    }
}
