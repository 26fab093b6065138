//! Résumé generation — composes the prompt builder with the completion client.

use tracing::{debug, info};

use crate::generation::prompts::build_prompt;
use crate::llm_client::{GptClient, ProviderError};
use crate::models::profile::UserProfile;

/// Builds the prompt for `profile` and `style` and sends it to the model.
/// Errors from the completion client are propagated unchanged; this layer adds
/// no wrapping of its own.
pub async fn generate_resume(
    client: &GptClient,
    profile: &UserProfile,
    style: &str,
) -> Result<String, ProviderError> {
    let prompt = build_prompt(profile, style);
    debug!("Generation prompt built ({} chars)", prompt.len());

    let resume = client.complete(&prompt).await?;
    info!("Resume generated ({} chars, style: {style})", resume.len());
    Ok(resume)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use async_trait::async_trait;
    use serde_json::json;
    use wiremock::matchers::{body_string_contains, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use crate::config::Config;
    use crate::llm_client::iam::TokenProvider;

    struct StaticProvider(&'static str);

    #[async_trait]
    impl TokenProvider for StaticProvider {
        async fn obtain(&self) -> String {
            self.0.to_string()
        }
    }

    fn test_config() -> Config {
        Config {
            static_iam_token: String::new(),
            folder_id: "test-folder".to_string(),
            service_account_id: None,
            access_key_id: None,
            private_key: None,
            request_timeout_secs: 5,
            retry_interval_ms: 0,
            port: 8080,
            rust_log: "info".to_string(),
        }
    }

    #[tokio::test]
    async fn generate_resume_returns_completion_text_verbatim() {
        let server = MockServer::start().await;
        // The outgoing prompt must carry both skills as bullets; the stubbed
        // endpoint echoes a fixed document back.
        Mock::given(method("POST"))
            .and(path("/foundationModels/v1/completion"))
            .and(body_string_contains("- Python"))
            .and(body_string_contains("- Go"))
            .and(body_string_contains("Иван Иванов"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "result": {
                    "alternatives": [
                        {
                            "message": { "role": "assistant", "text": "# Resume\n- Python\n- Go" },
                            "status": "ALTERNATIVE_STATUS_FINAL"
                        }
                    ]
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let client = GptClient::with_endpoint(
            format!("{}/foundationModels/v1/completion", server.uri()),
            &test_config(),
            Arc::new(StaticProvider("static-token")),
        );

        let profile = UserProfile {
            name: "Иван Иванов".to_string(),
            skills: vec!["Python".to_string(), "Go".to_string()],
            ..Default::default()
        };

        let resume = generate_resume(&client, &profile, "it").await.unwrap();
        assert_eq!(resume, "# Resume\n- Python\n- Go");
    }

    #[tokio::test]
    async fn generate_resume_propagates_provider_errors_unchanged() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(403).set_body_string("folder access denied"))
            .expect(1)
            .mount(&server)
            .await;

        let client = GptClient::with_endpoint(
            format!("{}/foundationModels/v1/completion", server.uri()),
            &test_config(),
            Arc::new(StaticProvider("static-token")),
        );

        let profile = UserProfile {
            name: "Иван Иванов".to_string(),
            ..Default::default()
        };

        let err = generate_resume(&client, &profile, "standard").await.unwrap_err();
        assert!(matches!(err, ProviderError::Api { status: 403, .. }));
    }
}
