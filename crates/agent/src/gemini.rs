use std::time::Duration;

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use glowguide_core::config::GeminiConfig;

use crate::llm::{AdviceModel, AdviceRequest};

/// Client for the Gemini `generateContent` REST endpoint.
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
    api_key: SecretString,
}

impl GeminiClient {
    /// Returns `None` when no API key is configured; callers then stay on the
    /// local rule-based path.
    pub fn from_config(config: &GeminiConfig) -> Result<Option<Self>> {
        let Some(api_key) = config.api_key.clone() else {
            return Ok(None);
        };

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .context("failed to build http client")?;

        Ok(Some(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
        }))
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url,
            self.model,
            urlencoding::encode(self.api_key.expose_secret()),
        )
    }
}

#[async_trait]
impl AdviceModel for GeminiClient {
    async fn generate(&self, request: &AdviceRequest) -> Result<String> {
        let mut parts = vec![Part::text(&request.prompt)];
        if let Some(image) = &request.image {
            parts.push(Part::inline_data(&image.mime_type, &image.data_base64));
        }

        let body = GenerateContentRequest {
            contents: vec![Content { role: "user".to_string(), parts }],
        };

        let response = self
            .http
            .post(self.endpoint())
            .json(&body)
            .send()
            .await
            .context("generative advice request failed")?;

        let status = response.status();
        if !status.is_success() {
            bail!("generative advice API error: {}", status.as_u16());
        }

        let payload: GenerateContentResponse =
            response.json().await.context("generative advice response was not valid JSON")?;

        Ok(payload.text())
    }
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(rename = "inlineData", skip_serializing_if = "Option::is_none")]
    inline_data: Option<InlineData>,
}

impl Part {
    fn text(value: &str) -> Self {
        Self { text: Some(value.to_string()), inline_data: None }
    }

    fn inline_data(mime_type: &str, data: &str) -> Self {
        Self {
            text: None,
            inline_data: Some(InlineData {
                mime_type: mime_type.to_string(),
                data: data.to_string(),
            }),
        }
    }
}

#[derive(Debug, Serialize)]
struct InlineData {
    #[serde(rename = "mimeType")]
    mime_type: String,
    data: String,
}

#[derive(Debug, Default, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

impl GenerateContentResponse {
    /// Joins the text parts of the first candidate; empty parts are skipped.
    fn text(&self) -> String {
        self.candidates
            .first()
            .map(|candidate| {
                candidate
                    .content
                    .parts
                    .iter()
                    .filter_map(|part| part.text.as_deref())
                    .filter(|text| !text.is_empty())
                    .collect::<Vec<_>>()
                    .join("\n")
            })
            .unwrap_or_default()
    }
}

#[derive(Debug, Default, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: CandidateContent,
}

#[derive(Debug, Default, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Default, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::GenerateContentResponse;

    #[test]
    fn response_text_joins_candidate_parts() {
        let payload: GenerateContentResponse = serde_json::from_str(
            r#"{
                "candidates": [{
                    "content": {
                        "parts": [
                            {"text": "Likely causes: ..."},
                            {"text": ""},
                            {"text": "Precautions: ..."}
                        ]
                    }
                }]
            }"#,
        )
        .expect("payload should deserialize");

        assert_eq!(payload.text(), "Likely causes: ...\nPrecautions: ...");
    }

    #[test]
    fn empty_response_yields_empty_text() {
        let payload: GenerateContentResponse =
            serde_json::from_str("{}").expect("empty payload should deserialize");

        assert_eq!(payload.text(), "");
    }
}
