//! Gemini synthesizer adapter tests against a mock HTTP server

use base64::Engine;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path_regex};
use wiremock::{Mock, MockServer, ResponseTemplate};

use aloud::application::ports::{SpeechSynthesizer, SynthesisError};
use aloud::infrastructure::GeminiSynthesizer;

fn synthesizer_for(server: &MockServer) -> GeminiSynthesizer {
    GeminiSynthesizer::with_base_url("test-key", format!("{}/v1beta/models", server.uri()))
}

fn audio_response(payload: &str) -> serde_json::Value {
    json!({
        "candidates": [{
            "content": {
                "parts": [{
                    "inlineData": {
                        "mimeType": "audio/pcm;rate=24000",
                        "data": payload,
                    }
                }]
            }
        }]
    })
}

#[tokio::test]
async fn synthesize_returns_inline_audio_payload() {
    let server = MockServer::start().await;
    let payload = base64::engine::general_purpose::STANDARD.encode([0u8, 1, 2, 3]);

    Mock::given(method("POST"))
        .and(path_regex(":generateContent$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(audio_response(&payload)))
        .expect(1)
        .mount(&server)
        .await;

    let result = synthesizer_for(&server).synthesize("Read me").await;

    assert_eq!(result.unwrap(), payload);
}

#[tokio::test]
async fn request_carries_audio_modality_and_voice() {
    let server = MockServer::start().await;
    let payload = base64::engine::general_purpose::STANDARD.encode([0u8, 0]);

    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "contents": [{"parts": [{"text": "Hello there"}]}],
            "generationConfig": {
                "responseModalities": ["AUDIO"],
                "speechConfig": {
                    "voiceConfig": {"prebuiltVoiceConfig": {"voiceName": "Charon"}}
                }
            }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(audio_response(&payload)))
        .expect(1)
        .mount(&server)
        .await;

    let result = synthesizer_for(&server).synthesize("Hello there").await;

    assert!(result.is_ok());
}

#[tokio::test]
async fn unauthorized_maps_to_invalid_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let result = synthesizer_for(&server).synthesize("text").await;

    assert!(matches!(result, Err(SynthesisError::InvalidApiKey)));
}

#[tokio::test]
async fn too_many_requests_maps_to_rate_limited() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = synthesizer_for(&server).synthesize("text").await;

    assert!(matches!(result, Err(SynthesisError::RateLimited)));
}

#[tokio::test]
async fn server_error_maps_to_api_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&server)
        .await;

    let result = synthesizer_for(&server).synthesize("text").await;

    match result {
        Err(SynthesisError::ApiError(message)) => {
            assert!(message.contains("500"));
        }
        other => panic!("Expected ApiError, got: {:?}", other),
    }
}

#[tokio::test]
async fn error_body_message_is_surfaced() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "error": {"message": "quota exceeded for project", "code": 8}
        })))
        .mount(&server)
        .await;

    let result = synthesizer_for(&server).synthesize("text").await;

    match result {
        Err(SynthesisError::ApiError(message)) => {
            assert!(message.contains("quota exceeded"));
        }
        other => panic!("Expected ApiError, got: {:?}", other),
    }
}

#[tokio::test]
async fn response_without_audio_is_empty_audio() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "no audio here"}]}}]
        })))
        .mount(&server)
        .await;

    let result = synthesizer_for(&server).synthesize("text").await;

    assert!(matches!(result, Err(SynthesisError::EmptyAudio)));
}

#[tokio::test]
async fn garbage_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json at all"))
        .mount(&server)
        .await;

    let result = synthesizer_for(&server).synthesize("text").await;

    assert!(matches!(result, Err(SynthesisError::ParseError(_))));
}
