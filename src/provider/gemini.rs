use async_trait::async_trait;
use base64::Engine;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

use super::ImageDescriber;
use crate::config::GeminiConfig;
use crate::errors::CollaboratorError;

const ANALYSIS_INSTRUCTION: &str = "Analiza esta imagen de error y proporciona una descripción detallada del problema que muestra. \
Incluye cualquier mensaje de error, stack trace o información relevante que observes.";

/// Image describer backed by the Gemini `generateContent` endpoint.
pub struct GeminiDescriber {
    client: Client,
    cfg: GeminiConfig,
    api_key: String,
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    role: &'a str,
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Inline { inline_data: InlineData<'a> },
    Text { text: &'a str },
}

#[derive(Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    temperature: f32,
    top_p: f32,
    top_k: u32,
    max_output_tokens: u32,
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: Option<String>,
}

impl GeminiDescriber {
    /// Build a describer from an explicit configuration. Fails when no API key is set.
    pub fn new(cfg: GeminiConfig) -> Result<Self, CollaboratorError> {
        let api_key = cfg
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or(CollaboratorError::MissingApiKey)?;
        let client = Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()?;
        Ok(Self { client, cfg, api_key })
    }

    fn url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.cfg.endpoint.trim_end_matches('/'),
            self.cfg.model
        )
    }

    fn request_body<'a>(&self, image: &[u8], mime_type: &'a str) -> GenerateRequest<'a> {
        GenerateRequest {
            contents: vec![Content {
                role: "user",
                parts: vec![
                    Part::Inline {
                        inline_data: InlineData {
                            mime_type,
                            data: base64::engine::general_purpose::STANDARD.encode(image),
                        },
                    },
                    Part::Text { text: ANALYSIS_INSTRUCTION },
                ],
            }],
            generation_config: GenerationConfig {
                temperature: self.cfg.temperature,
                top_p: self.cfg.top_p,
                top_k: self.cfg.top_k,
                max_output_tokens: self.cfg.max_output_tokens,
            },
        }
    }
}

/// Concatenate the text parts of the first candidate.
fn extract_text(body: &str) -> Result<String, CollaboratorError> {
    let parsed: GenerateResponse =
        serde_json::from_str(body).map_err(|_| CollaboratorError::EmptyResponse)?;
    let text: String = parsed
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
        .unwrap_or_default();
    if text.trim().is_empty() {
        return Err(CollaboratorError::EmptyResponse);
    }
    Ok(text)
}

#[async_trait]
impl ImageDescriber for GeminiDescriber {
    async fn describe(&self, image: &[u8], mime_type: &str) -> Result<String, CollaboratorError> {
        let body = self.request_body(image, mime_type);
        debug!(model = %self.cfg.model, bytes = image.len(), mime_type, "describing error image");

        let resp = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            return Err(CollaboratorError::Api { status: status.as_u16(), body: text });
        }
        extract_text(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg_with_key(key: Option<&str>) -> GeminiConfig {
        GeminiConfig { api_key: key.map(str::to_string), ..GeminiConfig::default() }
    }

    #[test]
    fn test_new_requires_api_key() {
        assert!(matches!(GeminiDescriber::new(cfg_with_key(None)), Err(CollaboratorError::MissingApiKey)));
        assert!(matches!(GeminiDescriber::new(cfg_with_key(Some("  "))), Err(CollaboratorError::MissingApiKey)));
        assert!(GeminiDescriber::new(cfg_with_key(Some("k"))).is_ok());
    }

    #[test]
    fn test_request_body_shape() {
        let d = GeminiDescriber::new(cfg_with_key(Some("k"))).unwrap();
        let body = serde_json::to_value(d.request_body(b"abc", "image/png")).unwrap();

        let parts = &body["contents"][0]["parts"];
        assert_eq!(parts[0]["inline_data"]["mime_type"], "image/png");
        assert_eq!(parts[0]["inline_data"]["data"], "YWJj");
        assert!(parts[1]["text"].as_str().unwrap().starts_with("Analiza esta imagen"));
        assert_eq!(body["generationConfig"]["topK"], 64);
        assert_eq!(body["generationConfig"]["maxOutputTokens"], 8192);
    }

    #[test]
    fn test_url_uses_model() {
        let d = GeminiDescriber::new(cfg_with_key(Some("k"))).unwrap();
        assert!(d.url().ends_with("/v1beta/models/gemini-exp-1121:generateContent"));
    }

    #[test]
    fn test_extract_text_joins_parts() {
        let body = r#"{"candidates":[{"content":{"parts":[{"text":"Stack "},{"text":"overflow"}]}}]}"#;
        assert_eq!(extract_text(body).unwrap(), "Stack overflow");
    }

    #[test]
    fn test_extract_text_empty() {
        assert!(matches!(extract_text(r#"{"candidates":[]}"#), Err(CollaboratorError::EmptyResponse)));
        assert!(matches!(extract_text("not json"), Err(CollaboratorError::EmptyResponse)));
    }
}
