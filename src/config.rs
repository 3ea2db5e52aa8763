use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub transcription: TranscriptionConfig,
    pub polling: PollingConfig,
    pub summarization: SummarizationConfig,
    pub delivery: DeliveryConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TranscriptionConfig {
    /// AssemblyAI API base URL.
    pub base_url: String,
    /// Timeout for the audio upload call (large request body).
    pub upload_timeout_secs: u64,
    /// Timeout for submit and status-check calls.
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PollingConfig {
    /// Maximum number of status checks before giving up.
    pub max_attempts: u32,
    /// Seconds to wait between status checks.
    pub interval_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SummarizationConfig {
    /// Gemini API base URL.
    pub base_url: String,
    /// Gemini model used for generateContent.
    pub model: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeliveryConfig {
    /// URL scheme of the note app ("bear" for bear://x-callback-url/create).
    pub note_scheme: String,
    /// Title used for notes created from transcripts.
    pub note_title: String,
}

// --- Default implementations ---

impl Default for TranscriptionConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.assemblyai.com/v2".to_string(),
            upload_timeout_secs: 120,
            request_timeout_secs: 30,
        }
    }
}

impl Default for PollingConfig {
    fn default() -> Self {
        Self {
            max_attempts: 40,
            interval_secs: 3,
        }
    }
}

impl Default for SummarizationConfig {
    fn default() -> Self {
        Self {
            base_url: "https://generativelanguage.googleapis.com/v1beta".to_string(),
            model: "gemini-2.0-flash-exp".to_string(),
            request_timeout_secs: 120,
        }
    }
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            note_scheme: "bear".to_string(),
            note_title: "Voice Memo Transcription".to_string(),
        }
    }
}

// --- Config loading ---

impl Config {
    /// Resolve the directory holding memoscribe.toml and keys.toml.
    pub fn config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("memoscribe")
    }

    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        // 1. Explicit path must exist and parse
        if let Some(p) = path {
            let content = std::fs::read_to_string(p).map_err(|e| {
                anyhow::anyhow!("Failed to read config file {}: {}", p.display(), e)
            })?;
            return Ok(toml::from_str(&content)?);
        }

        // 2. Platform config directory
        let platform_config = Self::config_dir().join("memoscribe.toml");
        if platform_config.exists() {
            let content = std::fs::read_to_string(&platform_config)?;
            return Ok(toml::from_str(&content)?);
        }

        // 3. Fall back to defaults
        tracing::info!("No config file found, using defaults");
        Ok(Config::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_wire_constants() {
        let config = Config::default();
        assert_eq!(config.transcription.base_url, "https://api.assemblyai.com/v2");
        assert_eq!(config.transcription.upload_timeout_secs, 120);
        assert_eq!(config.transcription.request_timeout_secs, 30);
        assert_eq!(config.polling.max_attempts, 40);
        assert_eq!(config.polling.interval_secs, 3);
        assert_eq!(
            config.summarization.base_url,
            "https://generativelanguage.googleapis.com/v1beta"
        );
        assert_eq!(config.summarization.model, "gemini-2.0-flash-exp");
        assert_eq!(config.delivery.note_scheme, "bear");
    }

    #[test]
    fn test_parse_partial_toml_config() {
        let toml_str = r#"
            [polling]
            interval_secs = 5

            [summarization]
            model = "gemini-1.5-pro"
        "#;
        let config: Config = toml::from_str(toml_str).unwrap();
        assert_eq!(config.polling.interval_secs, 5);
        assert_eq!(config.summarization.model, "gemini-1.5-pro");
        // Defaults still applied for unspecified fields
        assert_eq!(config.polling.max_attempts, 40);
        assert_eq!(config.transcription.upload_timeout_secs, 120);
    }

    #[test]
    fn test_config_roundtrip_serialize() {
        let config = Config::default();
        let toml_str = toml::to_string(&config).unwrap();
        let parsed: Config = toml::from_str(&toml_str).unwrap();
        assert_eq!(parsed.transcription.base_url, config.transcription.base_url);
        assert_eq!(parsed.polling.max_attempts, config.polling.max_attempts);
        assert_eq!(parsed.delivery.note_title, config.delivery.note_title);
    }

    #[test]
    fn test_load_nonexistent_path_errors() {
        let result = Config::load(Some(Path::new("/nonexistent/config.toml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_explicit_path() {
        let tmp = tempfile::TempDir::new().unwrap();
        let config_file = tmp.path().join("memoscribe.toml");
        std::fs::write(&config_file, "[polling]\nmax_attempts = 10\n").unwrap();

        let config = Config::load(Some(config_file.as_path())).unwrap();
        assert_eq!(config.polling.max_attempts, 10);
    }
}
