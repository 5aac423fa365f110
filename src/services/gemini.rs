// src/services/gemini.rs
use async_trait::async_trait;
use axum::http::StatusCode;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::config::AppConfig;

/// Returned when the upstream answers 200 but the candidate path is empty.
pub const FALLBACK_REPLY: &str = "I couldn't generate a response.";

/// One best-effort generation call. Implemented by the real Gemini client
/// and by fakes in tests, so handlers never touch the network directly.
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ModelError>;
}

#[derive(Debug, Error)]
pub enum ModelError {
    /// Non-success answer from the provider, message taken from its body.
    #[error("{message}")]
    Upstream { status: StatusCode, message: String },

    /// Transport failure or an unreadable success body.
    #[error("request to upstream failed")]
    Network(#[source] anyhow::Error),
}

impl From<reqwest::Error> for ModelError {
    fn from(err: reqwest::Error) -> Self {
        ModelError::Network(err.into())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
}

impl GenerateRequest {
    /// The fixed instruction and the user's message, as two ordered entries.
    pub fn for_chat(system_prompt: &str, user_message: &str) -> Self {
        Self {
            contents: vec![Content::user(system_prompt), Content::user(user_message)],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default)]
    pub parts: Vec<Part>,
}

impl Content {
    pub fn user(text: &str) -> Self {
        Self {
            role: Some("user".to_string()),
            parts: vec![Part {
                text: Some(text.to_string()),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Candidate {
    #[serde(default)]
    pub content: Option<Content>,
}

// Error body shape: { "error": { "message": "..." } }
#[derive(Debug, Default, Deserialize)]
struct UpstreamErrorBody {
    #[serde(default)]
    error: Option<UpstreamErrorDetail>,
}

#[derive(Debug, Default, Deserialize)]
struct UpstreamErrorDetail {
    #[serde(default)]
    message: String,
}

/// The generated text, if the response carries one.
pub fn extract_reply(response: &GenerateResponse) -> Option<&str> {
    response
        .candidates
        .first()?
        .content
        .as_ref()?
        .parts
        .first()?
        .text
        .as_deref()
}

/// Calls the generateContent endpoint of the generative-language API.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(config: &AppConfig) -> Self {
        info!("initialized Gemini client: model={}", config.model);
        Self {
            client: Client::new(),
            base_url: config.base_url.clone(),
            model: config.model.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
        }
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url, self.model
        )
    }
}

#[async_trait]
impl GenerativeModel for GeminiClient {
    async fn generate(&self, request: GenerateRequest) -> Result<GenerateResponse, ModelError> {
        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body: UpstreamErrorBody = response.json().await.unwrap_or_default();
            let message = body
                .error
                .map(|detail| detail.message)
                .filter(|message| !message.is_empty())
                .unwrap_or_else(|| "Upstream error".to_string());
            return Err(ModelError::Upstream { status, message });
        }

        Ok(response.json().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reply_with(text: &str) -> GenerateResponse {
        GenerateResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: Some("model".to_string()),
                    parts: vec![Part {
                        text: Some(text.to_string()),
                    }],
                }),
            }],
        }
    }

    #[test]
    fn chat_request_orders_system_prompt_first() {
        let request = GenerateRequest::for_chat("be gentle", "my back hurts");
        assert_eq!(request.contents.len(), 2);
        assert_eq!(request.contents[0].role.as_deref(), Some("user"));
        assert_eq!(request.contents[0].parts[0].text.as_deref(), Some("be gentle"));
        assert_eq!(request.contents[1].parts[0].text.as_deref(), Some("my back hurts"));
    }

    #[test]
    fn chat_request_serializes_to_wire_shape() {
        let request = GenerateRequest::for_chat("sys", "hi");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["contents"][0]["role"], "user");
        assert_eq!(json["contents"][1]["parts"][0]["text"], "hi");
    }

    #[test]
    fn extract_reply_reads_first_candidate() {
        let response = reply_with("Try Child's Pose");
        assert_eq!(extract_reply(&response), Some("Try Child's Pose"));
    }

    #[test]
    fn extract_reply_handles_missing_links() {
        assert_eq!(extract_reply(&GenerateResponse::default()), None);

        let no_content = GenerateResponse {
            candidates: vec![Candidate { content: None }],
        };
        assert_eq!(extract_reply(&no_content), None);

        let no_text = GenerateResponse {
            candidates: vec![Candidate {
                content: Some(Content {
                    role: None,
                    parts: vec![Part { text: None }],
                }),
            }],
        };
        assert_eq!(extract_reply(&no_text), None);
    }

    #[test]
    fn response_parses_with_unknown_fields_absent() {
        let response: GenerateResponse = serde_json::from_str(r#"{}"#).unwrap();
        assert!(response.candidates.is_empty());
    }

    #[test]
    fn endpoint_includes_configured_model() {
        let config = AppConfig {
            model: "gemini-1.5-pro".to_string(),
            ..AppConfig::default()
        };
        let client = GeminiClient::new(&config);
        assert_eq!(
            client.endpoint(),
            "https://generativelanguage.googleapis.com/v1beta/models/gemini-1.5-pro:generateContent"
        );
    }
}
