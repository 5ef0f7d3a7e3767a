//! Route handlers.
//!
//! The store lock is held only for the in-memory work of a request and is always released
//! before the AI gateway is called. The assistant lock is likewise released while a chat reply
//! is pending.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use medtrack_core::{
    AdherenceStatus, IdGenerator, Medicine, MedicineIcon, MedicineId, NewReminder, NonEmptyText,
    Reminder, ReminderId,
};
use medtrack_gateway::prompts::{CHAT_APOLOGY, LOOKUP_FAILED};
use medtrack_gateway::{ChatAssistant, GatewayError, MedicineGateway};

use crate::dto::{
    AddMedicineReq, AddReminderReq, AdherenceLogRes, AdherenceReq, ChatMessageRes, ChatReplyRes,
    ChatSendReq, ErrorRes, HealthRes, LookupReq, MedicineCardRes, MedicineFieldsRes, MedicineRes,
    ReminderRes, ScheduleRes,
};
use crate::AppState;

pub const EMPTY_LOOKUP: &str = "Please enter a drug name or upload a picture.";

/// Largest accepted `POST /medicines/lookup` body. Phone photos sent as base64 easily exceed
/// the default 2 MB.
pub const LOOKUP_BODY_LIMIT: usize = 20 * 1024 * 1024;

pub type ApiError = (StatusCode, Json<ErrorRes>);

fn api_error(status: StatusCode, message: impl Into<String>) -> ApiError {
    (
        status,
        Json(ErrorRes {
            error: message.into(),
        }),
    )
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Liveness probe.
pub async fn health() -> Json<HealthRes> {
    Json(HealthRes {
        ok: true,
        message: "Medication tracker REST API is alive".into(),
    })
}

// ============================================================================
// MEDICINES
// ============================================================================

#[utoipa::path(
    get,
    path = "/medicines",
    responses(
        (status = 200, description = "Dashboard cards in insertion order", body = [MedicineCardRes])
    )
)]
/// List medicines with their display icon and all-time skipped count.
pub async fn list_medicines(State(state): State<AppState>) -> Json<Vec<MedicineCardRes>> {
    let cards = state.store.lock().await.medicine_cards();
    Json(cards.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    post,
    path = "/medicines/lookup",
    request_body = LookupReq,
    responses(
        (status = 200, description = "Identified medicine", body = MedicineFieldsRes),
        (status = 400, description = "No usable drug name or picture", body = ErrorRes),
        (status = 502, description = "AI service failed", body = ErrorRes)
    )
)]
/// Identify a medicine from a picture or a drug name.
///
/// The picture is used when both are supplied. A drug name is forwarded exactly as typed once it
/// is known not to be blank. Nothing is stored; the caller reviews the result and adds it with
/// `POST /medicines`.
///
/// # Errors
/// Returns `400 Bad Request` if:
/// - neither a drug name nor a picture is given,
/// - the picture is not valid base64 or has no MIME type.
///
/// Returns `502 Bad Gateway` if the AI service call fails.
pub async fn lookup_medicine(
    State(state): State<AppState>,
    Json(req): Json<LookupReq>,
) -> Result<Json<MedicineFieldsRes>, ApiError> {
    let result = if let Some(image) = NonEmptyText::optional(req.image_base64.as_deref()) {
        let (bytes, mime_type) = decode_image(image.as_str(), req.mime_type.as_deref())?;
        state.gateway.lookup_by_image(&bytes, &mime_type).await
    } else if let Some(drug_name) = req.drug_name.as_deref().filter(|s| !s.trim().is_empty()) {
        state.gateway.lookup_by_name(drug_name).await
    } else {
        return Err(api_error(StatusCode::BAD_REQUEST, EMPTY_LOOKUP));
    };

    match result {
        Ok(fields) => Ok(Json(fields.into())),
        Err(e) => {
            tracing::error!("Medicine lookup error: {:?}", e);
            Err(api_error(StatusCode::BAD_GATEWAY, LOOKUP_FAILED))
        }
    }
}

/// Splits an optional `data:` URL prefix off and decodes the payload.
fn decode_image(image: &str, mime_type: Option<&str>) -> Result<(Vec<u8>, String), ApiError> {
    let (data_url_mime, data) = match image.strip_prefix("data:").and_then(|s| s.split_once(',')) {
        Some((header, data)) => (header.split(';').next().map(str::to_string), data),
        None => (None, image),
    };

    let mime_type = NonEmptyText::optional(mime_type)
        .map(NonEmptyText::into_string)
        .or(data_url_mime.filter(|m| !m.is_empty()))
        .ok_or_else(|| {
            api_error(
                StatusCode::BAD_REQUEST,
                "mimeType is required when uploading a picture.",
            )
        })?;

    let bytes = STANDARD
        .decode(data.trim())
        .map_err(|_| api_error(StatusCode::BAD_REQUEST, "Picture is not valid base64."))?;

    Ok((bytes, mime_type))
}

#[utoipa::path(
    post,
    path = "/medicines",
    request_body = AddMedicineReq,
    responses(
        (status = 201, description = "Medicine added", body = MedicineRes),
        (status = 400, description = "Unknown icon", body = ErrorRes)
    )
)]
/// Add a medicine from reviewed lookup fields and a chosen icon.
///
/// The identifier is assigned by the server. Names are not de-duplicated. A running chat is
/// restarted so the assistant sees the new medicine.
pub async fn add_medicine(
    State(state): State<AppState>,
    Json(req): Json<AddMedicineReq>,
) -> Result<(StatusCode, Json<MedicineRes>), ApiError> {
    let icon = req
        .icon
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse::<MedicineIcon>)
        .transpose()
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    let id = MedicineId::new(state.ids.next_id());
    let mut medicine = Medicine::from_fields(id, req.fields(), icon);
    if let Some(image_url) = NonEmptyText::optional(req.image_url.as_deref()) {
        medicine = medicine.with_image_url(image_url.into_string());
    }

    state.store.lock().await.add_medicine(medicine.clone());
    refresh_chat(&state).await;
    Ok((StatusCode::CREATED, Json(medicine.into())))
}

// ============================================================================
// REMINDERS
// ============================================================================

#[utoipa::path(
    get,
    path = "/reminders",
    responses(
        (status = 200, description = "All reminders in insertion order", body = [ReminderRes])
    )
)]
pub async fn list_reminders(State(state): State<AppState>) -> Json<Vec<ReminderRes>> {
    let reminders = state.store.lock().await.reminders().to_vec();
    Json(reminders.into_iter().map(Into::into).collect())
}

#[utoipa::path(
    post,
    path = "/reminders",
    request_body = AddReminderReq,
    responses(
        (status = 201, description = "Reminder added", body = ReminderRes),
        (status = 400, description = "Invalid day or time", body = ErrorRes),
        (status = 404, description = "Medicine not found", body = ErrorRes)
    )
)]
/// Add a weekly reminder for an existing medicine.
///
/// A running chat is restarted so the assistant sees the new reminder.
///
/// # Errors
/// Returns `400 Bad Request` if `day` is outside `0..=6` or `time` is not `HH:MM`.
/// Returns `404 Not Found` if `medicineId` names no medicine; nothing is stored.
pub async fn add_reminder(
    State(state): State<AppState>,
    Json(req): Json<AddReminderReq>,
) -> Result<(StatusCode, Json<ReminderRes>), ApiError> {
    let new_reminder = NewReminder::parse(req.medicine_id, req.day, &req.time)
        .map_err(|e| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    let added = state.store.lock().await.add_reminder(new_reminder);
    match added {
        Some(reminder) => {
            refresh_chat(&state).await;
            Ok((StatusCode::CREATED, Json(reminder.into())))
        }
        None => Err(api_error(StatusCode::NOT_FOUND, "Medicine not found")),
    }
}

#[utoipa::path(
    get,
    path = "/schedule",
    responses(
        (status = 200, description = "Seven day columns, Sunday first", body = ScheduleRes)
    )
)]
/// The weekly grid, with today's adherence resolved in today's column.
pub async fn schedule(State(state): State<AppState>) -> Json<ScheduleRes> {
    let store = state.store.lock().await;
    let res = ScheduleRes::new(store.today(), store.weekly_grid());
    Json(res)
}

// ============================================================================
// ADHERENCE
// ============================================================================

#[utoipa::path(
    post,
    path = "/reminders/{id}/adherence",
    request_body = AdherenceReq,
    params(
        ("id" = String, Path, description = "Reminder identifier")
    ),
    responses(
        (status = 200, description = "Today's decision recorded", body = AdherenceLogRes),
        (status = 400, description = "Unknown status", body = ErrorRes)
    )
)]
/// Record today's taken/skipped decision, replacing any earlier decision for today.
///
/// The reminder identifier is not checked.
pub async fn log_adherence(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<AdherenceReq>,
) -> Result<Json<AdherenceLogRes>, ApiError> {
    let status: AdherenceStatus = req
        .status
        .parse()
        .map_err(|e: medtrack_core::ValueError| api_error(StatusCode::BAD_REQUEST, e.to_string()))?;

    let log = state
        .store
        .lock()
        .await
        .log_adherence(&ReminderId::new(id), status);
    Ok(Json(log.into()))
}

#[utoipa::path(
    get,
    path = "/adherence",
    responses(
        (status = 200, description = "All adherence logs", body = [AdherenceLogRes])
    )
)]
pub async fn list_adherence(State(state): State<AppState>) -> Json<Vec<AdherenceLogRes>> {
    let logs = state.store.lock().await.adherence_logs().to_vec();
    Json(logs.into_iter().map(Into::into).collect())
}

// ============================================================================
// CHAT
// ============================================================================

#[utoipa::path(
    post,
    path = "/chat/session",
    responses(
        (status = 200, description = "Chat (re)started; returns the greeting", body = ChatMessageRes)
    )
)]
/// Start or restart the chat from the current medicines and reminders.
///
/// Adding a medicine or a reminder later restarts a running chat the same way, so the
/// transcript goes back to the greeting.
pub async fn start_chat(State(state): State<AppState>) -> Json<ChatMessageRes> {
    let (medicines, reminders) = store_contents(&state).await;

    let mut assistant = state.assistant.lock().await;
    let greeting: ChatMessageRes = assistant
        .start_chat(state.gateway.as_ref(), &medicines, &reminders)
        .into();
    Json(greeting)
}

#[utoipa::path(
    get,
    path = "/chat/messages",
    responses(
        (status = 200, description = "Transcript, oldest first", body = [ChatMessageRes])
    )
)]
pub async fn list_chat_messages(State(state): State<AppState>) -> Json<Vec<ChatMessageRes>> {
    let assistant = state.assistant.lock().await;
    let messages: Vec<ChatMessageRes> = assistant.transcript().iter().map(Into::into).collect();
    Json(messages)
}

#[utoipa::path(
    post,
    path = "/chat/messages",
    request_body = ChatSendReq,
    responses(
        (status = 200, description = "Assistant reply", body = ChatReplyRes),
        (status = 400, description = "Empty message", body = ErrorRes),
        (status = 409, description = "Chat not started", body = ErrorRes),
        (status = 502, description = "AI service failed", body = ErrorRes)
    )
)]
/// Send a message to the assistant.
///
/// The text is forwarded exactly as typed once it is known not to be blank.
///
/// # Errors
/// Returns `409 Conflict` if no chat has been started, and `502 Bad Gateway` with the apology
/// text if the AI service fails. The apology is also appended to the transcript.
pub async fn send_chat_message(
    State(state): State<AppState>,
    Json(req): Json<ChatSendReq>,
) -> Result<Json<ChatReplyRes>, ApiError> {
    if req.text.trim().is_empty() {
        return Err(api_error(StatusCode::BAD_REQUEST, "Message cannot be empty."));
    }

    let result =
        ChatAssistant::chat_response(&state.assistant, state.gateway.as_ref(), &req.text).await;
    match result {
        Ok(reply) => Ok(Json(ChatReplyRes { reply })),
        Err(GatewayError::SessionNotStarted) => Err(api_error(
            StatusCode::CONFLICT,
            "Chat session not started. Call POST /chat/session first.",
        )),
        Err(e) => {
            tracing::error!("Chat error: {:?}", e);
            Err(api_error(StatusCode::BAD_GATEWAY, CHAT_APOLOGY))
        }
    }
}

/// Copies medicines and reminders out so the store lock is not held while chatting.
async fn store_contents(state: &AppState) -> (Vec<Medicine>, Vec<Reminder>) {
    let store = state.store.lock().await;
    (store.medicines().to_vec(), store.reminders().to_vec())
}

/// Re-seeds a running chat from the store after a mutation.
async fn refresh_chat(state: &AppState) {
    let (medicines, reminders) = store_contents(state).await;
    let restarted = state
        .assistant
        .lock()
        .await
        .refresh(state.gateway.as_ref(), &medicines, &reminders);
    if restarted {
        tracing::debug!("chat restarted after store change");
    }
}
