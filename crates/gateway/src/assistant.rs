//! The per-process chat assistant.
//!
//! Holds at most one conversation. Starting a new chat discards the previous one, including
//! its transcript.
//!
//! The assistant is shared behind an async mutex, but the lock is never held while the AI
//! service is working. A turn copies the session out, releases the lock for the call and
//! re-acquires it to record the outcome. Replies that arrive after the chat was restarted are
//! returned to their caller and otherwise dropped.

use crate::gateway::MedicineGateway;
use crate::prompts::{CHAT_APOLOGY, CHAT_GREETING};
use crate::session::{ChatMessage, ChatSession};
use crate::{GatewayError, GatewayResult};
use medtrack_core::{context_snapshot, Medicine, Reminder};
use tokio::sync::Mutex;

#[derive(Debug, Default)]
pub struct ChatAssistant {
    session: Option<ChatSession>,
    transcript: Vec<ChatMessage>,
    /// Bumped on every (re)start so in-flight turns can tell they are stale.
    generation: u64,
}

/// A turn whose reply is still being produced.
struct PendingTurn {
    generation: u64,
    session: ChatSession,
}

impl ChatAssistant {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_started(&self) -> bool {
        self.session.is_some()
    }

    /// Messages shown to the user, oldest first.
    pub fn transcript(&self) -> &[ChatMessage] {
        &self.transcript
    }

    /// Starts (or restarts) the conversation from the current medicines and reminders.
    ///
    /// The transcript is reset to the greeting.
    pub fn start_chat(
        &mut self,
        gateway: &dyn MedicineGateway,
        medicines: &[Medicine],
        reminders: &[Reminder],
    ) -> &ChatMessage {
        let snapshot = context_snapshot(medicines, reminders);
        tracing::info!(
            medicines = medicines.len(),
            reminders = reminders.len(),
            restarted = self.session.is_some(),
            "starting chat session"
        );

        self.generation += 1;
        self.session = Some(gateway.start_conversation(&snapshot));
        self.transcript = vec![ChatMessage::ai(CHAT_GREETING)];
        &self.transcript[0]
    }

    /// Re-seeds a running chat after the medicines or reminders changed.
    ///
    /// Does nothing if no chat has been started.
    ///
    /// # Returns
    ///
    /// `true` if the chat was restarted.
    pub fn refresh(
        &mut self,
        gateway: &dyn MedicineGateway,
        medicines: &[Medicine],
        reminders: &[Reminder],
    ) -> bool {
        if !self.is_started() {
            return false;
        }
        self.start_chat(gateway, medicines, reminders);
        true
    }

    /// Sends `text` to the assistant and records both sides in the transcript.
    ///
    /// The user message is visible in the transcript while the reply is pending.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::SessionNotStarted` without touching the transcript if no chat has
    /// been started. Any other gateway error is returned after the apology message has been
    /// appended to the transcript; the session history is left as it was.
    pub async fn chat_response(
        assistant: &Mutex<Self>,
        gateway: &dyn MedicineGateway,
        text: &str,
    ) -> GatewayResult<String> {
        let mut turn = assistant.lock().await.begin_turn(text)?;
        let result = gateway.send_message(&mut turn.session, text).await;
        assistant.lock().await.finish_turn(turn, text, &result);
        result
    }

    fn begin_turn(&mut self, text: &str) -> GatewayResult<PendingTurn> {
        let session = self
            .session
            .clone()
            .ok_or(GatewayError::SessionNotStarted)?;
        self.transcript.push(ChatMessage::user(text));
        Ok(PendingTurn {
            generation: self.generation,
            session,
        })
    }

    fn finish_turn(&mut self, turn: PendingTurn, text: &str, result: &GatewayResult<String>) {
        if turn.generation != self.generation {
            tracing::debug!("dropping reply for a chat that has since been restarted");
            return;
        }
        match result {
            Ok(reply) => {
                if let Some(session) = self.session.as_mut() {
                    session.record_exchange(text, reply.clone());
                }
                self.transcript.push(ChatMessage::ai(reply.clone()));
            }
            Err(_) => self.transcript.push(ChatMessage::ai(CHAT_APOLOGY)),
        }
    }
}
