use std::time::Duration;

use serde::Serialize;

use crate::config::TranscriptionConfig;
use crate::error::{Error, Result};
use crate::transcribe::job::{JobSnapshot, TranscriptionOptions};

/// Wire body for `POST /transcript`. Language detection, punctuation and text
/// formatting are always on; `speakers_expected` is only sent when diarization
/// is requested with an explicit count.
#[derive(Debug, Serialize)]
pub struct SubmitRequest<'a> {
    pub audio_url: &'a str,
    pub language_detection: bool,
    pub punctuate: bool,
    pub format_text: bool,
    pub speaker_labels: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub speakers_expected: Option<u32>,
}

impl<'a> SubmitRequest<'a> {
    pub fn new(audio_url: &'a str, options: &TranscriptionOptions) -> Self {
        Self {
            audio_url,
            language_detection: true,
            punctuate: true,
            format_text: true,
            speaker_labels: options.speaker_labels,
            speakers_expected: if options.speaker_labels {
                options.speakers_expected
            } else {
                None
            },
        }
    }
}

#[derive(Debug, serde::Deserialize)]
struct UploadResponse {
    #[serde(default)]
    upload_url: Option<String>,
}

#[derive(Debug, serde::Deserialize)]
struct SubmitResponse {
    #[serde(default)]
    id: Option<String>,
}

/// A missing or empty `upload_url` never comes back as an empty string.
fn upload_url_from(response: UploadResponse) -> Result<String> {
    match response.upload_url {
        Some(url) if !url.is_empty() => Ok(url),
        _ => Err(Error::UploadUrlMissing),
    }
}

fn job_id_from(response: SubmitResponse) -> Result<String> {
    match response.id {
        Some(id) if !id.is_empty() => Ok(id),
        _ => Err(Error::SubmitIdMissing),
    }
}

/// Blocking client for the AssemblyAI v2 API: upload, submit, status check.
/// Holds no job state; each call is independent and short-lived.
pub struct TranscriptionClient {
    base_url: String,
    api_key: String,
    /// Client for the upload call (large body, 120s timeout).
    upload_client: reqwest::blocking::Client,
    /// Client for submit/status calls (30s timeout).
    client: reqwest::blocking::Client,
}

impl std::fmt::Debug for TranscriptionClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranscriptionClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"[REDACTED]")
            .finish()
    }
}

impl TranscriptionClient {
    pub fn new(config: &TranscriptionConfig, api_key: String) -> Result<Self> {
        let upload_client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.upload_timeout_secs))
            .build()?;
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key,
            upload_client,
            client,
        })
    }

    /// Upload raw audio bytes, returning the remote URL to transcribe.
    pub fn upload(&self, audio_bytes: Vec<u8>) -> Result<String> {
        if audio_bytes.is_empty() {
            return Err(Error::EmptyAudio);
        }
        tracing::info!("Uploading {} bytes of audio", audio_bytes.len());

        let response = self
            .upload_client
            .post(format!("{}/upload", self.base_url))
            .header("Authorization", &self.api_key)
            .header("Content-Type", "application/octet-stream")
            .body(audio_bytes)
            .send()?;

        let status = response.status();
        tracing::debug!("Upload response status: {}", status);
        if !status.is_success() {
            return Err(Error::UploadFailed(status.as_u16()));
        }

        let body: UploadResponse = response.json()?;
        upload_url_from(body)
    }

    /// Submit a transcription job for a previously uploaded file, returning
    /// the service-assigned job ID.
    pub fn submit(&self, audio_url: &str, options: &TranscriptionOptions) -> Result<String> {
        let request = SubmitRequest::new(audio_url, options);
        tracing::debug!(
            "Transcription request: speaker_labels={}, speakers_expected={:?}",
            request.speaker_labels,
            request.speakers_expected
        );

        let response = self
            .client
            .post(format!("{}/transcript", self.base_url))
            .header("Authorization", &self.api_key)
            .json(&request)
            .send()?;

        let status = response.status();
        tracing::debug!("Transcription request status: {}", status);
        if !status.is_success() {
            return Err(Error::SubmitFailed(status.as_u16()));
        }

        let body: SubmitResponse = response.json()?;
        job_id_from(body)
    }

    /// Fetch the current state of a job. The returned snapshot replaces any
    /// previous one wholesale.
    pub fn check_status(&self, job_id: &str) -> Result<JobSnapshot> {
        let response = self
            .client
            .get(format!("{}/transcript/{}", self.base_url, job_id))
            .header("Authorization", &self.api_key)
            .send()?;

        let status = response.status();
        tracing::debug!("Status check for {}: {}", job_id, status);
        if !status.is_success() {
            return Err(Error::StatusCheckFailed(status.as_u16()));
        }

        Ok(response.json()?)
    }
}
