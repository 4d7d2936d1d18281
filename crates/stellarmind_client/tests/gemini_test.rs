//! Tests for the generative-AI request and response envelopes.

use stellarmind_client::gemini::{
    GeminiEndpoints, GenerateContentResponse, PredictResponse, decode_json,
};
use stellarmind_client::{ClientConfig, TransportResponse};
use stellarmind_error::{JsonErrorKind, StellarmindErrorKind, UpstreamErrorKind};

fn endpoints() -> GeminiEndpoints {
    GeminiEndpoints::new(
        "https://ai.example.test/v1beta/",
        "gemini-2.0-flash",
        "imagen-3.0-generate-002",
        "sk-test",
    )
}

fn json_response(body: serde_json::Value) -> TransportResponse {
    TransportResponse::new(200, "OK", Some("application/json".to_string()), body.to_string())
}

#[test]
fn test_endpoint_urls() {
    let endpoints = endpoints();
    assert_eq!(
        endpoints.text_url(),
        "https://ai.example.test/v1beta/models/gemini-2.0-flash:generateContent?key=sk-test"
    );
    assert_eq!(
        endpoints.image_url(),
        "https://ai.example.test/v1beta/models/imagen-3.0-generate-002:predict?key=sk-test"
    );
}

#[test]
fn test_text_request_body() -> anyhow::Result<()> {
    let request = endpoints().text_request("Tell me a joke")?;

    assert_eq!(request.url(), &endpoints().text_url());
    assert_eq!(
        request.body().as_ref(),
        Some(&serde_json::json!({
            "contents": [{"role": "user", "parts": [{"text": "Tell me a joke"}]}]
        }))
    );
    assert!(
        request
            .headers()
            .iter()
            .any(|(name, value)| name == "Content-Type" && value == "application/json")
    );
    Ok(())
}

#[test]
fn test_image_request_body() -> anyhow::Result<()> {
    let request = endpoints().image_request("a red fox")?;

    assert_eq!(
        request.body().as_ref(),
        Some(&serde_json::json!({
            "instances": {"prompt": "a red fox"},
            "parameters": {"sampleCount": 1}
        }))
    );
    Ok(())
}

#[test]
fn test_from_config_uses_configured_models() {
    let config = ClientConfig {
        text_model: "text-x".to_string(),
        image_model: "image-y".to_string(),
        api_key_env: "STELLARMIND_TEST_KEY_THAT_IS_NOT_SET".to_string(),
        ..ClientConfig::default()
    };
    let endpoints = GeminiEndpoints::from_config(&config);

    assert!(endpoints.text_url().contains("/models/text-x:generateContent?key="));
    assert!(endpoints.image_url().contains("/models/image-y:predict?key="));
}

#[test]
fn test_first_text_of_first_candidate() -> anyhow::Result<()> {
    let response = json_response(serde_json::json!({
        "candidates": [
            {"content": {"role": "model", "parts": [{"text": "first"}, {"text": "second"}]}},
            {"content": {"role": "model", "parts": [{"text": "other"}]}}
        ]
    }));

    let decoded: GenerateContentResponse = decode_json(&response)?;

    assert_eq!(decoded.first_text(), Some("first"));
    Ok(())
}

#[test]
fn test_missing_candidates_is_not_an_error() -> anyhow::Result<()> {
    let decoded: GenerateContentResponse = decode_json(&json_response(serde_json::json!({})))?;
    assert_eq!(decoded.first_text(), None);

    let decoded: GenerateContentResponse =
        decode_json(&json_response(serde_json::json!({"candidates": [{}]})))?;
    assert_eq!(decoded.first_text(), None);
    Ok(())
}

#[test]
fn test_non_json_response_is_rejected_with_snippet() {
    let body = "x".repeat(500);
    let response = TransportResponse::new(200, "OK", Some("text/html".to_string()), body);

    let err = decode_json::<GenerateContentResponse>(&response).expect_err("html is rejected");

    match err.kind() {
        StellarmindErrorKind::Upstream(e) => match e.kind() {
            UpstreamErrorKind::UnexpectedContentType {
                content_type,
                snippet,
            } => {
                assert_eq!(content_type, "text/html");
                assert_eq!(snippet.len(), 200);
            }
            other => panic!("unexpected upstream error {:?}", other),
        },
        other => panic!("unexpected error {:?}", other),
    }
    assert!(err.user_message().starts_with("Expected JSON"));
    assert!(err.user_message().ends_with("..."));
}

#[test]
fn test_missing_content_type_is_rejected() {
    let response = TransportResponse::new(200, "OK", None, "{}");

    let err = decode_json::<GenerateContentResponse>(&response).expect_err("no content type");

    assert!(err.user_message().contains("no content type"));
}

#[test]
fn test_mismatched_json_is_a_decode_error() {
    let response = json_response(serde_json::json!({"candidates": "not a list"}));

    let err = decode_json::<GenerateContentResponse>(&response).expect_err("bad shape");

    assert!(matches!(
        err.kind(),
        StellarmindErrorKind::Upstream(e) if matches!(e.kind(), UpstreamErrorKind::Decode(_))
    ));
}

#[test]
fn test_raw_json_failure_is_tagged_as_decode() {
    let response = TransportResponse::new(200, "OK", Some("application/json".to_string()), "{oops");

    let err = response
        .json::<serde_json::Value>()
        .expect_err("truncated body");

    assert!(matches!(err.kind(), JsonErrorKind::Decode(_)));
    assert!(err.kind().to_string().starts_with("Failed to decode JSON: "));
    assert!(!err.kind().reason().starts_with("Failed"));
}

#[test]
fn test_first_image_builds_data_url() -> anyhow::Result<()> {
    let response: PredictResponse = decode_json(&json_response(serde_json::json!({
        "predictions": [{"bytesBase64Encoded": "iVBORw0KGgo="}]
    })))?;

    let image = response.first_image()?.expect("image present");

    assert_eq!(image.data_url, "data:image/png;base64,iVBORw0KGgo=");
    assert_eq!(&image.bytes[..4], &[0x89, b'P', b'N', b'G']);
    Ok(())
}

#[test]
fn test_missing_image_data_is_none() -> anyhow::Result<()> {
    let response: PredictResponse = decode_json(&json_response(serde_json::json!({
        "predictions": [{}]
    })))?;
    assert!(response.first_image()?.is_none());

    let response: PredictResponse = decode_json(&json_response(serde_json::json!({})))?;
    assert!(response.first_image()?.is_none());
    Ok(())
}

#[test]
fn test_invalid_base64_is_rejected() {
    let response = PredictResponse {
        predictions: vec![stellarmind_client::gemini::Prediction {
            bytes_base64_encoded: Some("not base64!!".to_string()),
        }],
    };

    let err = response.first_image().expect_err("invalid base64");

    assert!(err.user_message().starts_with("Image data could not be decoded"));
}
