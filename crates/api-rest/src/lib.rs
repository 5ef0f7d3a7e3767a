//! # API REST
//!
//! REST API for the medication tracker.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON shapes, status codes, CORS)
//!
//! Domain rules live in `medtrack-core`; AI calls go through `medtrack-gateway`.

#![warn(rust_2018_idioms)]

pub mod dto;
pub mod handlers;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use medtrack_core::{IdGenerator, MedicationStore};
use medtrack_gateway::{ChatAssistant, MedicineGateway};
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use handlers::*;

/// Application state shared across REST API handlers.
///
/// One store and one chat assistant per process, each behind its own async mutex.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Mutex<MedicationStore>>,
    pub assistant: Arc<Mutex<ChatAssistant>>,
    pub gateway: Arc<dyn MedicineGateway>,
    /// Allocates medicine identifiers.
    pub ids: Arc<dyn IdGenerator>,
}

impl AppState {
    pub fn new(
        store: MedicationStore,
        gateway: Arc<dyn MedicineGateway>,
        ids: Arc<dyn IdGenerator>,
    ) -> Self {
        Self {
            store: Arc::new(Mutex::new(store)),
            assistant: Arc::new(Mutex::new(ChatAssistant::new())),
            gateway,
            ids,
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        list_medicines,
        lookup_medicine,
        add_medicine,
        list_reminders,
        add_reminder,
        schedule,
        log_adherence,
        list_adherence,
        start_chat,
        list_chat_messages,
        send_chat_message,
    ),
    components(schemas(
        dto::HealthRes,
        dto::ErrorRes,
        dto::LookupReq,
        dto::MedicineFieldsRes,
        dto::AddMedicineReq,
        dto::MedicineRes,
        dto::MedicineCardRes,
        dto::AddReminderReq,
        dto::ReminderRes,
        dto::ReminderCellRes,
        dto::DayColumnRes,
        dto::ScheduleRes,
        dto::AdherenceReq,
        dto::AdherenceLogRes,
        dto::ChatMessageRes,
        dto::ChatSendReq,
        dto::ChatReplyRes,
    ))
)]
pub struct ApiDoc;

/// Builds the REST router with OpenAPI docs and permissive CORS.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/medicines", get(list_medicines).post(add_medicine))
        .route(
            "/medicines/lookup",
            post(lookup_medicine).layer(DefaultBodyLimit::max(LOOKUP_BODY_LIMIT)),
        )
        .route("/reminders", get(list_reminders).post(add_reminder))
        .route("/reminders/:id/adherence", post(log_adherence))
        .route("/schedule", get(schedule))
        .route("/adherence", get(list_adherence))
        .route("/chat/session", post(start_chat))
        .route(
            "/chat/messages",
            get(list_chat_messages).post(send_chat_message),
        )
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use axum::body::Body;
    use base64::{engine::general_purpose::STANDARD, Engine as _};
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use http_body_util::BodyExt;
    use medtrack_core::{FixedClock, MedicineFields, SequentialIdGenerator};
    use medtrack_gateway::prompts::{CHAT_APOLOGY, CHAT_GREETING, LOOKUP_FAILED};
    use medtrack_gateway::{ChatSession, GatewayError, GatewayResult};
    use serde_json::{json, Value};
    use std::sync::Mutex as StdMutex;
    use tower::ServiceExt;

    /// Canned gateway recording what it was asked.
    #[derive(Default)]
    struct StubGateway {
        fail: bool,
        calls: StdMutex<Vec<String>>,
    }

    impl StubGateway {
        fn record(&self, call: String) {
            self.calls.lock().unwrap().push(call);
        }

        fn result(&self, name: &str) -> GatewayResult<MedicineFields> {
            if self.fail {
                return Err(GatewayError::EmptyResponse);
            }
            Ok(MedicineFields {
                name: name.to_string(),
                description: "Pain relief.".into(),
                active_ingredients: vec!["acetylsalicylic acid".into()],
                interactions: vec!["Warfarin".into()],
                dosage: "1 tablet daily".into(),
            })
        }
    }

    #[async_trait]
    impl MedicineGateway for StubGateway {
        async fn lookup_by_name(&self, drug_name: &str) -> GatewayResult<MedicineFields> {
            self.record(format!("name:{drug_name}"));
            self.result(drug_name)
        }

        async fn lookup_by_image(
            &self,
            image: &[u8],
            mime_type: &str,
        ) -> GatewayResult<MedicineFields> {
            self.record(format!("image:{mime_type}:{}", String::from_utf8_lossy(image)));
            self.result("From Image")
        }

        fn start_conversation(&self, context_snapshot: &str) -> ChatSession {
            self.record(format!("start:{context_snapshot}"));
            ChatSession::new("stub", Vec::new())
        }

        async fn send_message(
            &self,
            session: &mut ChatSession,
            text: &str,
        ) -> GatewayResult<String> {
            self.record(format!("chat:{text}"));
            if self.fail {
                return Err(GatewayError::EmptyResponse);
            }
            let reply = format!("You said {text}");
            session.record_exchange(text, reply.clone());
            Ok(reply)
        }
    }

    // 2026-10-19 is a Monday.
    fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    fn test_app(gateway: Arc<StubGateway>) -> Router {
        let store = MedicationStore::new(
            Arc::new(FixedClock::new(monday())),
            Arc::new(SequentialIdGenerator::new("rem")),
        );
        router(AppState::new(
            store,
            gateway,
            Arc::new(SequentialIdGenerator::new("med")),
        ))
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let builder = Request::builder().method(method).uri(uri);
        let request = match body {
            Some(body) => builder
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn add_aspirin(app: &Router) -> Value {
        let (status, body) = send(
            app,
            "POST",
            "/medicines",
            Some(json!({
                "name": "Aspirin",
                "dosage": "1 tablet daily",
                "interactions": ["Warfarin"],
                "icon": "tablet"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        body
    }

    #[tokio::test]
    async fn health_reports_ok() {
        let app = test_app(Arc::new(StubGateway::default()));
        let (status, body) = send(&app, "GET", "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
    }

    #[tokio::test]
    async fn openapi_document_lists_routes() {
        let app = test_app(Arc::new(StubGateway::default()));
        let (status, body) = send(&app, "GET", "/api-docs/openapi.json", None).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["paths"]["/reminders/{id}/adherence"].is_object());
        assert!(body["paths"]["/chat/messages"].is_object());
    }

    #[tokio::test]
    async fn lookup_requires_name_or_picture() {
        let gateway = Arc::new(StubGateway::default());
        let app = test_app(gateway.clone());

        let (status, body) = send(
            &app,
            "POST",
            "/medicines/lookup",
            Some(json!({"drugName": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], handlers::EMPTY_LOOKUP);
        assert!(gateway.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn lookup_prefers_the_picture() {
        let gateway = Arc::new(StubGateway::default());
        let app = test_app(gateway.clone());

        // "img" in base64
        let (status, body) = send(
            &app,
            "POST",
            "/medicines/lookup",
            Some(json!({
                "drugName": "Aspirin",
                "imageBase64": "data:image/png;base64,aW1n"
            })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "From Image");
        assert_eq!(body["activeIngredients"][0], "acetylsalicylic acid");
        assert_eq!(*gateway.calls.lock().unwrap(), vec!["image:image/png:img".to_string()]);
    }

    #[tokio::test]
    async fn lookup_by_name_and_gateway_failure() {
        let gateway = Arc::new(StubGateway::default());
        let app = test_app(gateway.clone());
        let (status, body) = send(
            &app,
            "POST",
            "/medicines/lookup",
            Some(json!({"drugName": " Ibuprofen "})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], " Ibuprofen ");
        assert_eq!(*gateway.calls.lock().unwrap(), vec!["name: Ibuprofen ".to_string()]);

        let failing = test_app(Arc::new(StubGateway {
            fail: true,
            ..StubGateway::default()
        }));
        let (status, body) = send(
            &failing,
            "POST",
            "/medicines/lookup",
            Some(json!({"drugName": "Ibuprofen"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], LOOKUP_FAILED);
    }

    #[tokio::test]
    async fn lookup_accepts_pictures_over_two_megabytes() {
        let gateway = Arc::new(StubGateway::default());
        let app = test_app(gateway.clone());
        let photo = vec![b'x'; 3 * 1024 * 1024];

        let (status, body) = send(
            &app,
            "POST",
            "/medicines/lookup",
            Some(json!({"imageBase64": STANDARD.encode(&photo), "mimeType": "image/jpeg"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["name"], "From Image");

        let calls = gateway.calls.lock().unwrap();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].len(), "image:image/jpeg:".len() + photo.len());
    }

    #[tokio::test]
    async fn lookup_rejects_undecodable_picture() {
        let app = test_app(Arc::new(StubGateway::default()));
        let (status, _) = send(
            &app,
            "POST",
            "/medicines/lookup",
            Some(json!({"imageBase64": "%%%", "mimeType": "image/jpeg"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/medicines/lookup",
            Some(json!({"imageBase64": "aW1n"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn medicines_get_server_ids_and_cards() {
        let app = test_app(Arc::new(StubGateway::default()));
        let created = add_aspirin(&app).await;
        assert_eq!(created["id"], "med-1");
        assert_eq!(created["icon"], "tablet");

        let (status, _) = send(
            &app,
            "POST",
            "/medicines",
            Some(json!({"name": "Mystery", "icon": "syringe"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, plain) = send(&app, "POST", "/medicines", Some(json!({"name": "Plain"}))).await;
        assert_eq!(plain["icon"], Value::Null);

        let (status, cards) = send(&app, "GET", "/medicines", None).await;
        assert_eq!(status, StatusCode::OK);
        let cards = cards.as_array().unwrap();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[0]["medicine"]["name"], "Aspirin");
        assert_eq!(cards[0]["skippedCount"], 0);
        assert_eq!(cards[1]["displayIcon"], "pill");
    }

    #[tokio::test]
    async fn reminders_validate_and_check_medicine() {
        let app = test_app(Arc::new(StubGateway::default()));
        add_aspirin(&app).await;

        let (status, _) = send(
            &app,
            "POST",
            "/reminders",
            Some(json!({"medicineId": "med-1", "day": 7, "time": "08:00"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/reminders",
            Some(json!({"medicineId": "med-1", "day": 1, "time": "25:00"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, _) = send(
            &app,
            "POST",
            "/reminders",
            Some(json!({"medicineId": "nope", "day": 1, "time": "08:00"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, reminder) = send(
            &app,
            "POST",
            "/reminders",
            Some(json!({"medicineId": "med-1", "day": 1, "time": "08:00"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(reminder["id"], "rem-1");
        assert_eq!(reminder["medicineName"], "Aspirin");
        assert_eq!(reminder["dayName"], "Monday");

        let (_, all) = send(&app, "GET", "/reminders", None).await;
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn adherence_flows_into_schedule_and_cards() {
        let app = test_app(Arc::new(StubGateway::default()));
        add_aspirin(&app).await;
        send(
            &app,
            "POST",
            "/reminders",
            Some(json!({"medicineId": "med-1", "day": 1, "time": "08:00"})),
        )
        .await;

        let (_, grid) = send(&app, "GET", "/schedule", None).await;
        assert_eq!(grid["today"], "2026-10-19");
        assert_eq!(grid["days"][1]["isToday"], true);
        assert_eq!(grid["days"][1]["reminders"][0]["today"], "undecided");

        let (status, _) = send(
            &app,
            "POST",
            "/reminders/rem-1/adherence",
            Some(json!({"status": "maybe"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        for status in ["taken", "skipped"] {
            let (code, log) = send(
                &app,
                "POST",
                "/reminders/rem-1/adherence",
                Some(json!({"status": status})),
            )
            .await;
            assert_eq!(code, StatusCode::OK);
            assert_eq!(log["date"], "2026-10-19");
        }

        let (_, logs) = send(&app, "GET", "/adherence", None).await;
        assert_eq!(logs.as_array().unwrap().len(), 1);
        assert_eq!(logs[0]["status"], "skipped");

        let (_, grid) = send(&app, "GET", "/schedule", None).await;
        assert_eq!(grid["days"][1]["reminders"][0]["today"], "skipped");
        assert_eq!(grid["days"][1]["reminders"][0]["displayIcon"], "tablet");

        let (_, cards) = send(&app, "GET", "/medicines", None).await;
        assert_eq!(cards[0]["skippedCount"], 1);
    }

    #[tokio::test]
    async fn chat_requires_a_session() {
        let app = test_app(Arc::new(StubGateway::default()));
        let (status, _) = send(
            &app,
            "POST",
            "/chat/messages",
            Some(json!({"text": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn chat_round_trip_and_transcript() {
        let app = test_app(Arc::new(StubGateway::default()));
        add_aspirin(&app).await;

        let (status, greeting) = send(&app, "POST", "/chat/session", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(greeting["sender"], "ai");
        assert_eq!(greeting["text"], CHAT_GREETING);

        let (status, _) = send(&app, "POST", "/chat/messages", Some(json!({"text": " "}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, reply) = send(
            &app,
            "POST",
            "/chat/messages",
            Some(json!({"text": "What do I take?"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply["reply"], "You said What do I take?");

        let (_, transcript) = send(&app, "GET", "/chat/messages", None).await;
        let senders: Vec<&str> = transcript
            .as_array()
            .unwrap()
            .iter()
            .map(|m| m["sender"].as_str().unwrap())
            .collect();
        assert_eq!(senders, vec!["ai", "user", "ai"]);
    }

    #[tokio::test]
    async fn chat_failure_returns_apology() {
        let app = test_app(Arc::new(StubGateway {
            fail: true,
            ..StubGateway::default()
        }));
        send(&app, "POST", "/chat/session", None).await;

        let (status, body) = send(
            &app,
            "POST",
            "/chat/messages",
            Some(json!({"text": "hello"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], CHAT_APOLOGY);

        let (_, transcript) = send(&app, "GET", "/chat/messages", None).await;
        assert_eq!(transcript[2]["text"], CHAT_APOLOGY);
    }

    #[tokio::test]
    async fn chat_text_is_forwarded_as_typed() {
        let gateway = Arc::new(StubGateway::default());
        let app = test_app(gateway.clone());
        send(&app, "POST", "/chat/session", None).await;

        let (status, reply) = send(
            &app,
            "POST",
            "/chat/messages",
            Some(json!({"text": "  Can I take   both?\n"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(reply["reply"], "You said   Can I take   both?\n");
        assert_eq!(
            gateway.calls.lock().unwrap().last(),
            Some(&"chat:  Can I take   both?\n".to_string())
        );
    }

    #[tokio::test]
    async fn store_changes_restart_a_running_chat() {
        let gateway = Arc::new(StubGateway::default());
        let app = test_app(gateway.clone());

        // No chat yet: adding a medicine starts nothing.
        add_aspirin(&app).await;
        assert!(gateway.calls.lock().unwrap().is_empty());

        send(&app, "POST", "/chat/session", None).await;
        send(&app, "POST", "/chat/messages", Some(json!({"text": "hi"}))).await;
        let (_, transcript) = send(&app, "GET", "/chat/messages", None).await;
        assert_eq!(transcript.as_array().unwrap().len(), 3);

        send(
            &app,
            "POST",
            "/reminders",
            Some(json!({"medicineId": "med-1", "day": 1, "time": "08:00"})),
        )
        .await;

        let (_, transcript) = send(&app, "GET", "/chat/messages", None).await;
        assert_eq!(transcript, json!([{"sender": "ai", "text": CHAT_GREETING}]));

        let calls = gateway.calls.lock().unwrap();
        let starts: Vec<&String> = calls.iter().filter(|c| c.starts_with("start:")).collect();
        assert_eq!(starts.len(), 2);
        assert!(!starts[0].contains("08:00: Take Aspirin"));
        assert!(starts[1].contains("Monday:\n  - 08:00: Take Aspirin\n"));
    }
}
