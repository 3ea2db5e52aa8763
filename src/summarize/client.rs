use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::config::SummarizationConfig;
use crate::error::{Error, Result};
use crate::summarize::preset::Preset;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub contents: Vec<Content>,
    pub system_instruction: Content,
    pub generation_config: GenerationConfig,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_k: u32,
    pub top_p: f64,
    pub max_output_tokens: u32,
    pub response_mime_type: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

impl GenerateRequest {
    /// Build the request body for a transcript and preset. Sampling parameters
    /// are fixed except the temperature, which comes from the preset.
    pub fn new(text: &str, preset: &Preset) -> Self {
        Self {
            contents: vec![Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: text.to_string(),
                }],
            }],
            system_instruction: Content {
                role: "user".to_string(),
                parts: vec![Part {
                    text: preset.system_prompt.to_string(),
                }],
            },
            generation_config: GenerationConfig {
                temperature: preset.temperature,
                top_k: 40,
                top_p: 0.95,
                max_output_tokens: 8192,
                response_mime_type: "text/plain".to_string(),
            },
        }
    }
}

/// Blocking client for the Gemini generateContent endpoint. Stateless: one
/// request, one response, no retries.
pub struct GeminiClient {
    base_url: String,
    model: String,
    api_key: String,
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for GeminiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GeminiClient")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl GeminiClient {
    pub fn new(config: &SummarizationConfig, api_key: String) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .map_err(Error::SummarizationRequestFailed)?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            api_key,
            client,
        })
    }

    /// Run the transcript through the preset's prompt, returning the first
    /// candidate's text. A single failed attempt surfaces to the caller.
    pub fn summarize(&self, text: &str, preset: &Preset) -> Result<String> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );
        let request = GenerateRequest::new(text, preset);

        tracing::info!(
            "Requesting {} summarization ({} chars of transcript)",
            preset.name,
            text.len()
        );

        let response = self
            .client
            .post(&url)
            .json(&request)
            .send()
            .map_err(Error::SummarizationRequestFailed)?
            .error_for_status()
            .map_err(Error::SummarizationRequestFailed)?;

        let body: GenerateResponse = response
            .json()
            .map_err(Error::SummarizationRequestFailed)?;

        body.candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or(Error::NoSummaryCandidate)
    }
}
