use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Options for a transcription job, fixed once the job is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptionOptions {
    pub speaker_labels: bool,
    /// Expected number of speakers, only meaningful with `speaker_labels`.
    pub speakers_expected: Option<u32>,
}

impl TranscriptionOptions {
    /// Validate and construct options. A speaker count outside 1..=10 is
    /// rejected here, before any network call; a count supplied without
    /// diarization is dropped rather than sent.
    pub fn new(speaker_labels: bool, speakers_expected: Option<u32>) -> Result<Self> {
        if let Some(count) = speakers_expected {
            if !(1..=10).contains(&count) {
                return Err(Error::InvalidSpeakerCount(count));
            }
        }
        Ok(Self {
            speaker_labels,
            speakers_expected: if speaker_labels { speakers_expected } else { None },
        })
    }

    /// Flat transcript, no diarization.
    pub fn plain() -> Self {
        Self {
            speaker_labels: false,
            speakers_expected: None,
        }
    }
}

/// Remote-reported job status. The service never reports anything else and we
/// invent no intermediate states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobStatus {
    Queued,
    Processing,
    Completed,
    Error,
}

impl std::fmt::Display for JobStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Queued => write!(f, "queued"),
            Self::Processing => write!(f, "processing"),
            Self::Completed => write!(f, "completed"),
            Self::Error => write!(f, "error"),
        }
    }
}

/// One diarized utterance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Utterance {
    pub speaker: String,
    pub text: String,
}

/// Full decoded state of a transcription job, replaced wholesale on each
/// successful status check.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobSnapshot {
    pub id: String,
    pub status: JobStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub utterances: Option<Vec<Utterance>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl JobSnapshot {
    /// Flatten the result into display text. Diarized jobs become
    /// `Speaker X: ...` blocks separated by blank lines; flat jobs return the
    /// transcript text as-is.
    pub fn formatted_text(&self) -> String {
        if let Some(utterances) = &self.utterances {
            if !utterances.is_empty() {
                return utterances
                    .iter()
                    .map(|u| format!("Speaker {}: {}", u.speaker, u.text))
                    .collect::<Vec<_>>()
                    .join("\n\n");
            }
        }
        self.text.clone().unwrap_or_default()
    }
}
