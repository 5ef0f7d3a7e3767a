//! The seam between the application and the AI service.

use crate::prompts::{context_preamble, CHAT_SYSTEM_INSTRUCTION, CONTEXT_ACKNOWLEDGEMENT};
use crate::session::{ChatSession, ChatTurn};
use crate::GatewayResult;
use async_trait::async_trait;
use medtrack_core::MedicineFields;

/// Medicine lookup and conversation against a generative AI service.
///
/// Implementations never retry and never touch the medication store.
#[async_trait]
pub trait MedicineGateway: Send + Sync {
    /// Identifies a medicine from its name.
    ///
    /// # Errors
    ///
    /// Returns a `GatewayError` if the request fails or the reply cannot be read as
    /// `MedicineFields`.
    async fn lookup_by_name(&self, drug_name: &str) -> GatewayResult<MedicineFields>;

    /// Identifies a medicine from a photo of its packaging.
    ///
    /// # Arguments
    ///
    /// * `image` - raw image bytes
    /// * `mime_type` - e.g. `image/jpeg`
    ///
    /// # Errors
    ///
    /// As for [`MedicineGateway::lookup_by_name`].
    async fn lookup_by_image(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> GatewayResult<MedicineFields>;

    /// Opens a conversation grounded in `context_snapshot`.
    ///
    /// The history starts with the snapshot as a user turn followed by a scripted
    /// acknowledgement from the model. No request is made.
    fn start_conversation(&self, context_snapshot: &str) -> ChatSession {
        ChatSession::new(
            CHAT_SYSTEM_INSTRUCTION,
            vec![
                ChatTurn::user(context_preamble(context_snapshot)),
                ChatTurn::model(CONTEXT_ACKNOWLEDGEMENT),
            ],
        )
    }

    /// Sends one user message and returns the model's reply.
    ///
    /// On success both turns are appended to `session`; on failure it is left unchanged.
    async fn send_message(&self, session: &mut ChatSession, text: &str) -> GatewayResult<String>;
}
