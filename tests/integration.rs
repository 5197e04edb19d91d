use chrono::{TimeZone, Utc};
use llm_client_adapter::{
    ai::{
        self, normalize, ChatService, MockChatClient, OpenAiChatClient, Prompt, VertexChatClient,
        DEFAULT_IMAGE_PROMPT,
    },
    config::{self, AzureLlamaConfig, VertexConfig},
    menu::{self, MenuOutcome},
    models::ResponseShape,
    provider::{Provider, ProviderConfig},
    residency::{Inventory, ResidencyReport},
    Error,
};
use serde_json::json;
use std::io::Cursor;
use std::path::PathBuf;
use wiremock::matchers::{body_partial_json, header, method, path, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn write_image(dir: &tempfile::TempDir, name: &str, bytes: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, bytes).unwrap();
    path
}

fn vertex_config(server: &MockServer) -> VertexConfig {
    VertexConfig {
        project: "demo-project".to_string(),
        access_token: "ya29.token".to_string(),
        location: "europe-west4".to_string(),
        model: "gemini-1.5-pro".to_string(),
        api_endpoint: server.uri(),
    }
}

#[tokio::test]
async fn test_menu_text_round_trip_with_mock() {
    let chat = MockChatClient::new()
        .with_label("Llama-3 (via Azure AI)".to_string())
        .with_response("Paris.".to_string());

    let mut input = Cursor::new(b"1\nCapital of France?\n".to_vec());
    let mut out = Vec::new();
    let outcome = menu::run_menu(&chat, None, &mut input, &mut out)
        .await
        .unwrap();

    let output = String::from_utf8(out).unwrap();
    assert!(matches!(outcome, MenuOutcome::Answered(ref r) if r.text == "Paris."));
    assert!(output.contains("Sending text message to Llama-3 (via Azure AI)..."));
    assert!(output.contains("--- Llama-3 (via Azure AI) Response ---"));
    assert_eq!(chat.last_prompt().unwrap().user_text(), "Capital of France?");
}

#[tokio::test]
async fn test_http_error_is_reported_as_request_error() {
    let chat = MockChatClient::new().with_http_error(429, "Too Many Requests".to_string());

    let mut input = Cursor::new(b"1\nhello\n".to_vec());
    let mut out = Vec::new();
    let outcome = menu::run_menu(&chat, None, &mut input, &mut out)
        .await
        .unwrap();

    assert_eq!(outcome, MenuOutcome::Failed);
    let output = String::from_utf8(out).unwrap();
    assert!(output.contains("Request Error"));
    assert!(output.contains("429"));
}

#[test]
fn test_normalizer_handles_every_known_shape() {
    let cases = [
        (
            json!({ "choices": [{ "message": { "content": " Hello! " } }] }),
            "Hello!",
            ResponseShape::ChatMessage,
        ),
        (
            json!({ "choices": [{ "text": "legacy" }] }),
            "legacy",
            ResponseShape::LegacyCompletion,
        ),
        (json!({ "output": "plain" }), "plain", ResponseShape::Output),
        (
            json!([{ "generated_text": "hf" }]),
            "hf",
            ResponseShape::GeneratedText,
        ),
        (
            json!({ "candidates": [{ "content": { "parts": [{ "text": "A cat." }] } }] }),
            "A cat.",
            ResponseShape::VertexCandidates,
        ),
    ];

    for (raw, text, shape) in cases {
        let result = normalize::extract(raw).unwrap();
        assert_eq!(result.text, text);
        assert_eq!(result.shape, shape);
    }

    assert!(matches!(
        normalize::extract(json!({ "foo": "bar" })),
        Err(Error::UnrecognizedResponseShape(_))
    ));
}

#[tokio::test]
async fn test_llama_image_request_end_to_end() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let image = write_image(&dir, "photo.PNG", b"\x89PNG");

    Mock::given(method("POST"))
        .and(path("/score"))
        .and(header("authorization", "Bearer llama-key"))
        .and(body_partial_json(json!({
            "messages": [
                { "role": "system", "content": "You are a helpful assistant that can analyze images." },
                {
                    "role": "user",
                    "content": [
                        { "type": "text", "text": DEFAULT_IMAGE_PROMPT },
                        { "type": "image_url", "image_url": { "url": "data:image/png;base64,iVBORw==" } }
                    ]
                }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "output": "A tiny PNG header."
        })))
        .expect(1)
        .mount(&server)
        .await;

    let config = AzureLlamaConfig {
        endpoint_url: format!("{}/score", server.uri()),
        api_key: "llama-key".to_string(),
        model_name: "Llama-3".to_string(),
    };
    let client = OpenAiChatClient::azure_llama(&config).unwrap();

    let result = ai::send_image(
        &client,
        ai::DEFAULT_IMAGE_SYSTEM_INSTRUCTION,
        &image,
        DEFAULT_IMAGE_PROMPT,
    )
    .await
    .unwrap();

    assert_eq!(result.text, "A tiny PNG header.");
    assert_eq!(result.shape, ResponseShape::Output);
}

#[tokio::test]
async fn test_vertex_multimodal_request_end_to_end() {
    let server = MockServer::start().await;
    let dir = tempfile::tempdir().unwrap();
    let first = write_image(&dir, "a.jpg", b"a");
    let second = write_image(&dir, "b.webp", b"b");

    Mock::given(method("POST"))
        .and(path_regex(
            r"^/v1/projects/demo-project/locations/europe-west4/publishers/google/models/gemini-1\.5-pro:generateContent$",
        ))
        .and(header("authorization", "Bearer ya29.token"))
        .and(body_partial_json(json!({
            "contents": [{
                "role": "user",
                "parts": [
                    { "text": "System: Compare.\n\nUser: Which is brighter?" },
                    { "inlineData": { "mimeType": "image/jpeg", "data": "YQ==" } },
                    { "inlineData": { "mimeType": "image/webp", "data": "Yg==" } }
                ]
            }],
            "generationConfig": { "maxOutputTokens": 2048, "topK": 40 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "The first " }, { "text": "one. " }] },
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = VertexChatClient::new(&vertex_config(&server)).unwrap();
    assert_eq!(client.model_label(), "gemini-1.5-pro");

    let result = ai::send_multimodal(&client, "Compare.", "Which is brighter?", &[first, second])
        .await
        .unwrap();

    assert_eq!(result.text, "The first one.");
    assert_eq!(result.shape, ResponseShape::VertexCandidates);
}

#[tokio::test]
async fn test_vertex_safety_block_surfaces_reason() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{ "finishReason": "SAFETY" }]
        })))
        .mount(&server)
        .await;

    let client = VertexChatClient::new(&vertex_config(&server)).unwrap();
    let err = client.complete(&Prompt::text("hi")).await.unwrap_err();

    assert!(matches!(err, Error::GenerationBlocked { ref reason } if reason == "SAFETY"));
    assert!(menu::describe_error(&err).contains("reason: SAFETY"));
}

#[test]
fn test_missing_provider_variable_is_named() {
    let lookup = |key: &str| match key {
        config::AZURE_OPENAI_ENDPOINT => Some("https://example.openai.azure.com".to_string()),
        _ => None,
    };

    let err = ProviderConfig::from_lookup(Provider::AzureOpenai, lookup).unwrap_err();
    assert!(
        matches!(err, Error::Configuration { ref variable, .. } if variable == config::AZURE_OPENAI_API_KEY)
    );
    assert!(menu::describe_error(&err).starts_with("Configuration Error:"));
}

#[test]
fn test_residency_report_from_inventory_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("inventory.json");
    std::fs::write(
        &path,
        json!({
            "log_sinks": [{ "name": "eu-audit", "destination": "logging.googleapis.com/projects/p/locations/europe-west1/buckets/audit" }],
            "datasets": [{ "id": "warehouse", "location": "europe-west3" }],
            "buckets": [{ "name": "uploads", "location": "US-CENTRAL1" }]
        })
        .to_string(),
    )
    .unwrap();

    let inventory = Inventory::from_path(&path).unwrap();
    let generated_at = Utc.with_ymd_and_hms(2026, 1, 2, 3, 4, 5).unwrap();
    let report = ResidencyReport::build("europe-west3", Some(&inventory), generated_at);

    assert!(report.vertex_compliant);
    assert!(report.has_non_compliant());

    let rendered = report.to_string();
    assert!(rendered.contains("Generated: 2026-01-02 03:04:05 UTC"));
    assert!(rendered.contains("✅ Found EU logging sinks: eu-audit"));
    assert!(rendered.contains("✅ EU BigQuery datasets: warehouse (europe-west3)"));
    assert!(rendered.contains("❌ Non-EU Storage buckets: uploads (US-CENTRAL1)"));
}
