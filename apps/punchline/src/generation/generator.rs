//! Routine generation: profile in, tight 10 out.
//!
//! Flow: resolve credential → render prompt → one LLM call with the routine schema →
//!       validate and decode → log anomalies → return the routine untouched.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::config::ConfigProvider;
use crate::errors::AppError;
use crate::generation::prompts::render_routine_prompt;
use crate::generation::schema::{parse_routine, routine_response_schema};
use crate::llm_client::{Endpoint, GenerationConfig, LlmClient, LlmError, ThinkingConfig};
use crate::models::{GeneratedRoutine, UserProfile};

/// Sampling temperature for routines. High on purpose: repeated runs should differ.
pub const ROUTINE_TEMPERATURE: f64 = 0.9;
/// Deliberation tokens the model may spend before writing the set.
pub const ROUTINE_THINKING_BUDGET: u32 = 1024;

/// Produces a routine for a profile. `Session` holds one of these.
#[async_trait]
pub trait RoutineGenerator: Send + Sync {
    async fn generate_routine(&self, profile: &UserProfile) -> Result<GeneratedRoutine, AppError>;
}

/// The generation config sent with every routine request.
pub fn routine_generation_config() -> GenerationConfig {
    GenerationConfig {
        temperature: ROUTINE_TEMPERATURE,
        thinking_config: Some(ThinkingConfig {
            thinking_budget: ROUTINE_THINKING_BUDGET,
        }),
        response_mime_type: Some("application/json".to_string()),
        response_schema: Some(routine_response_schema()),
    }
}

/// Gemini-backed generator.
pub struct GeminiRoutineGenerator {
    llm: LlmClient,
    config: Arc<dyn ConfigProvider>,
}

impl GeminiRoutineGenerator {
    pub fn new(llm: LlmClient, config: Arc<dyn ConfigProvider>) -> Self {
        Self { llm, config }
    }

    fn endpoint(&self) -> Result<Endpoint, AppError> {
        let api_key = self.config.api_key().ok_or_else(|| {
            AppError::Configuration(
                "API key is missing. Please set the API_KEY environment variable.".to_string(),
            )
        })?;

        Ok(Endpoint {
            base_url: self.config.base_url(),
            model: self.config.model(),
            api_key,
        })
    }
}

#[async_trait]
impl RoutineGenerator for GeminiRoutineGenerator {
    async fn generate_routine(&self, profile: &UserProfile) -> Result<GeneratedRoutine, AppError> {
        let endpoint = self.endpoint()?;
        let prompt = render_routine_prompt(profile);

        let text = self
            .llm
            .call_text(&endpoint, &prompt, &routine_generation_config())
            .await
            .map_err(|e| match &e {
                LlmError::EmptyContent { .. } => {
                    AppError::Generation(format!("Failed to generate routine: {e}"))
                }
                _ => AppError::Llm(e.to_string()),
            })?;

        let routine = parse_routine(&text)?;

        for anomaly in routine.anomalies() {
            warn!("Routine formatting anomaly: {anomaly}");
        }
        info!(
            "Generated routine with {} bits for '{}'",
            routine.bits.len(),
            profile.name
        );

        Ok(routine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::models::routine::fixtures::routine;
    use crate::models::ComedyStyle;
    use serde_json::{json, Value};
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, Request, ResponseTemplate};

    const GENERATE_PATH: &str = "/v1beta/models/gemini-2.5-flash:generateContent";

    fn profile() -> UserProfile {
        UserProfile {
            name: "Linda".to_string(),
            age: "38".to_string(),
            occupation: "Stay-at-home Mom".to_string(),
            hometown: "Suburban Chicago".to_string(),
            topics: "Tantrums, yoga pants".to_string(),
            context: "I haven't slept since 2018.".to_string(),
            style: ComedyStyle::SelfDeprecating,
            influences: vec!["Bill Burr".to_string(), "Mitch Hedberg".to_string()],
        }
    }

    fn generator(base_url: &str, api_key: Option<&str>) -> GeminiRoutineGenerator {
        let base_url = base_url.to_string();
        let api_key = api_key.map(str::to_string);
        let config = Config::from_lookup(move |key| match key {
            "GEMINI_BASE_URL" => Some(base_url.clone()),
            "API_KEY" => api_key.clone(),
            _ => None,
        })
        .unwrap();
        GeminiRoutineGenerator::new(LlmClient::new(), Arc::new(config))
    }

    fn candidate_text(text: &str) -> Value {
        json!({"candidates": [{"content": {"parts": [{"text": text}]}, "finishReason": "STOP"}]})
    }

    #[test]
    fn test_generation_config_shape() {
        let value = serde_json::to_value(routine_generation_config()).unwrap();
        assert!(value["temperature"].as_f64().unwrap() >= 0.8);
        assert_eq!(value["thinkingConfig"]["thinkingBudget"], 1024);
        assert_eq!(value["responseMimeType"], "application/json");
        assert_eq!(
            value["responseSchema"]["required"],
            json!(["opener", "bits", "closer"])
        );
    }

    #[tokio::test]
    async fn test_missing_key_is_configuration_error_without_network() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let err = generator(&server.uri(), None)
            .generate_routine(&profile())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[tokio::test]
    async fn test_conforming_payload_returned_unchanged() {
        let server = MockServer::start().await;
        let expected = routine(10);
        let body = candidate_text(&serde_json::to_string(&expected).unwrap());

        Mock::given(method("POST"))
            .and(path(GENERATE_PATH))
            .and(header("x-goog-api-key", "secret"))
            .and(body_partial_json(json!({
                "generationConfig": {
                    "responseMimeType": "application/json",
                    "thinkingConfig": {"thinkingBudget": 1024}
                }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .expect(1)
            .mount(&server)
            .await;

        let got = generator(&server.uri(), Some("secret"))
            .generate_routine(&profile())
            .await
            .unwrap();
        assert_eq!(got, expected);
    }

    #[tokio::test]
    async fn test_request_carries_rendered_prompt() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(candidate_text(&serde_json::to_string(&routine(10)).unwrap())),
            )
            .mount(&server)
            .await;

        generator(&server.uri(), Some("secret"))
            .generate_routine(&profile())
            .await
            .unwrap();

        let requests: Vec<Request> = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
        let sent: Value = serde_json::from_slice(&requests[0].body).unwrap();
        let prompt = sent["contents"][0]["parts"][0]["text"].as_str().unwrap();
        assert!(prompt.contains("Bill Burr, Mitch Hedberg"));
        assert!(prompt.contains("Suburban Chicago"));
        assert_eq!(sent["contents"][0]["role"], "user");
    }

    #[tokio::test]
    async fn test_short_routine_still_returned() {
        let server = MockServer::start().await;
        let short = routine(4);
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(candidate_text(&serde_json::to_string(&short).unwrap())),
            )
            .mount(&server)
            .await;

        let got = generator(&server.uri(), Some("secret"))
            .generate_routine(&profile())
            .await
            .unwrap();
        assert_eq!(got.bits.len(), 4);
        assert!(!got.anomalies().is_empty());
    }

    #[tokio::test]
    async fn test_empty_text_is_generation_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_text("")))
            .mount(&server)
            .await;

        let err = generator(&server.uri(), Some("secret"))
            .generate_routine(&profile())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Generation(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_whitespace_only_text_is_generation_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(candidate_text("   ")))
            .mount(&server)
            .await;

        let err = generator(&server.uri(), Some("secret"))
            .generate_routine(&profile())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Generation(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_no_candidates_is_generation_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .mount(&server)
            .await;

        let err = generator(&server.uri(), Some("secret"))
            .generate_routine(&profile())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Generation(_)), "got {err:?}");
    }

    #[tokio::test]
    async fn test_non_conforming_text_is_parse_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(candidate_text(r#"{"opener": "hi", "bits": []}"#)),
            )
            .mount(&server)
            .await;

        let err = generator(&server.uri(), Some("secret"))
            .generate_routine(&profile())
            .await
            .unwrap_err();
        match err {
            AppError::Parse(msg) => assert!(msg.contains("closer")),
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_http_failure_is_single_attempt_llm_error() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let err = generator(&server.uri(), Some("secret"))
            .generate_routine(&profile())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Llm(_)), "got {err:?}");
    }
}
