//! Gemini implementation of [`MedicineGateway`].
//!
//! Every call is a single `POST {base_url}/models/{model}:generateContent` with the key in the
//! `x-goog-api-key` header. Lookups ask for a JSON reply constrained by
//! [`medicine_schema`](crate::prompts::medicine_schema); chat sends the whole session history.

use crate::config::GatewayConfig;
use crate::error::http_error;
use crate::gateway::MedicineGateway;
use crate::prompts::{medicine_schema, name_lookup_prompt, MEDICINE_INFO_PROMPT};
use crate::session::{ChatSession, ChatTurn};
use crate::{GatewayError, GatewayResult};
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use medtrack_core::MedicineFields;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ============================================================================
// WIRE TYPES
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

#[derive(Debug, Serialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<&'static str>,
    parts: Vec<Part>,
}

impl Content {
    fn user(parts: Vec<Part>) -> Self {
        Self {
            role: Some("user"),
            parts,
        }
    }
}

impl From<&ChatTurn> for Content {
    fn from(turn: &ChatTurn) -> Self {
        Self {
            role: Some(turn.role.as_str()),
            parts: vec![Part::Text(turn.text.clone())],
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
enum Part {
    Text(String),
    InlineData(InlineData),
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    response_schema: Value,
}

impl GenerationConfig {
    fn medicine_json() -> Self {
        Self {
            response_mime_type: "application/json",
            response_schema: medicine_schema(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    text: Option<String>,
}

impl GenerateContentResponse {
    /// Concatenated text parts of the first candidate.
    fn text(self) -> Option<String> {
        let content = self.candidates.into_iter().next()?.content?;
        let text: String = content
            .parts
            .into_iter()
            .filter_map(|part| part.text)
            .collect();
        (!text.is_empty()).then_some(text)
    }
}

// ============================================================================
// REQUEST BUILDERS
// ============================================================================

fn name_lookup_request(drug_name: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content::user(vec![Part::Text(name_lookup_prompt(drug_name))])],
        system_instruction: None,
        generation_config: Some(GenerationConfig::medicine_json()),
    }
}

fn image_lookup_request(image: &[u8], mime_type: &str) -> GenerateContentRequest {
    let image_part = Part::InlineData(InlineData {
        mime_type: mime_type.to_string(),
        data: STANDARD.encode(image),
    });
    GenerateContentRequest {
        contents: vec![Content::user(vec![
            image_part,
            Part::Text(MEDICINE_INFO_PROMPT.to_string()),
        ])],
        system_instruction: None,
        generation_config: Some(GenerationConfig::medicine_json()),
    }
}

fn chat_request(session: &ChatSession, text: &str) -> GenerateContentRequest {
    let mut contents: Vec<Content> = session.history().iter().map(Content::from).collect();
    contents.push(Content::user(vec![Part::Text(text.to_string())]));
    GenerateContentRequest {
        contents,
        system_instruction: Some(Content {
            role: None,
            parts: vec![Part::Text(session.system_instruction().to_string())],
        }),
        generation_config: None,
    }
}

/// Reads a lookup reply as medicine fields.
fn parse_medicine_fields(text: &str) -> GatewayResult<MedicineFields> {
    Ok(serde_json::from_str(text.trim())?)
}

// ============================================================================
// GATEWAY
// ============================================================================

pub struct GeminiGateway {
    client: reqwest::Client,
    config: GatewayConfig,
}

impl GeminiGateway {
    /// Create a new `GeminiGateway`.
    ///
    /// # Errors
    ///
    /// Returns `GatewayError::Network` if the HTTP client cannot be built.
    pub fn new(config: GatewayConfig) -> GatewayResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;
        Ok(Self { client, config })
    }

    async fn generate(&self, request: &GenerateContentRequest) -> GatewayResult<String> {
        tracing::debug!(model = self.config.model(), "calling generateContent");

        let response = self
            .client
            .post(self.config.generate_content_url())
            .header("x-goog-api-key", self.config.api_key())
            .json(request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(http_error(status.as_u16(), &body));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        parsed.text().ok_or(GatewayError::EmptyResponse)
    }
}

#[async_trait]
impl MedicineGateway for GeminiGateway {
    async fn lookup_by_name(&self, drug_name: &str) -> GatewayResult<MedicineFields> {
        let text = self.generate(&name_lookup_request(drug_name)).await?;
        parse_medicine_fields(&text)
    }

    async fn lookup_by_image(
        &self,
        image: &[u8],
        mime_type: &str,
    ) -> GatewayResult<MedicineFields> {
        let text = self.generate(&image_lookup_request(image, mime_type)).await?;
        parse_medicine_fields(&text)
    }

    async fn send_message(&self, session: &mut ChatSession, text: &str) -> GatewayResult<String> {
        let reply = self.generate(&chat_request(session, text)).await?;
        session.record_exchange(text, reply.clone());
        Ok(reply)
    }
}
