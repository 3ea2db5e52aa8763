/// Errors raised by the transcription, polling and summarization layers.
///
/// None of these are recovered from locally: a single failed HTTP call or a
/// single `error` job status is terminal for the invocation, and the binary
/// boundary is the only place they are rendered for the user.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("no API key configured for {0} (run `memoscribe set-key {0}`)")]
    CredentialMissing(&'static str),

    #[error("audio data is empty")]
    EmptyAudio,

    #[error("upload failed with status {0}")]
    UploadFailed(u16),

    #[error("no upload URL in response")]
    UploadUrlMissing,

    #[error("transcription request failed with status {0}")]
    SubmitFailed(u16),

    #[error("no transcription ID in response")]
    SubmitIdMissing,

    #[error("status check failed with status {0}")]
    StatusCheckFailed(u16),

    #[error("transcription failed: {0}")]
    TranscriptionFailed(String),

    #[error("transcription timed out")]
    TranscriptionTimedOut,

    #[error("expected speaker count must be between 1 and 10, got {0}")]
    InvalidSpeakerCount(u32),

    #[error("no response candidates from Gemini")]
    NoSummaryCandidate,

    #[error("summarization request failed")]
    SummarizationRequestFailed(#[source] reqwest::Error),

    #[error("unknown summarization preset: {0}")]
    UnknownPreset(String),

    /// Transport-level failure of an AssemblyAI call (timeout, DNS, TLS).
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
