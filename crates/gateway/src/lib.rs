//! # medtrack gateway
//!
//! Talks to the generative AI service on behalf of the medication tracker:
//! - [`MedicineGateway`]: medicine lookup by name or photo, and multi-turn chat
//! - [`GeminiGateway`]: the HTTP implementation against the Gemini `generateContent` API
//! - [`ChatAssistant`]: the single per-process conversation and its visible transcript
//!
//! The gateway never touches the medication store. Callers take a context snapshot from the
//! store and pass plain values in.

pub mod assistant;
pub mod config;
pub mod error;
pub mod gateway;
pub mod gemini;
pub mod prompts;
pub mod session;

pub use assistant::ChatAssistant;
pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use gateway::MedicineGateway;
pub use gemini::GeminiGateway;
pub use session::{ChatMessage, ChatRole, ChatSession, ChatTurn, Sender};
