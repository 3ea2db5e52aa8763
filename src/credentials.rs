use std::collections::BTreeMap;
use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::config::Config;

/// The two remote services that require an API key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Service {
    /// AssemblyAI speech-to-text.
    Assemblyai,
    /// Gemini generative text.
    Gemini,
}

impl Service {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Assemblyai => "assemblyai",
            Self::Gemini => "gemini",
        }
    }

    fn env_var(&self) -> &'static str {
        match self {
            Self::Assemblyai => "MEMOSCRIBE_ASSEMBLYAI_KEY",
            Self::Gemini => "MEMOSCRIBE_GEMINI_KEY",
        }
    }
}

/// File-backed store for API keys, one `keys.toml` next to the config file.
/// Environment variables take precedence over stored keys, so CI and one-off
/// runs never need to touch the file.
pub struct KeyStore {
    path: PathBuf,
    keys: BTreeMap<String, String>,
}

impl fmt::Debug for KeyStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyStore")
            .field("path", &self.path)
            .field("keys", &format!("{} stored", self.keys.len()))
            .finish()
    }
}

impl KeyStore {
    /// Open the keystore in the given directory, loading existing keys if the
    /// file is present.
    pub fn open_in(dir: &Path) -> Result<Self> {
        let path = dir.join("keys.toml");
        let keys = if path.exists() {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?;
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse {}", path.display()))?
        } else {
            BTreeMap::new()
        };
        Ok(Self { path, keys })
    }

    /// Open the keystore in the platform config directory.
    pub fn open() -> Result<Self> {
        Self::open_in(&Config::config_dir())
    }

    /// Look up the key for a service: environment first, then the store.
    pub fn get(&self, service: Service) -> Option<String> {
        if let Ok(key) = std::env::var(service.env_var()) {
            if !key.is_empty() {
                return Some(key);
            }
        }
        self.keys.get(service.name()).cloned()
    }

    /// Store a key and persist the file immediately.
    pub fn set(&mut self, service: Service, secret: String) -> Result<()> {
        self.keys.insert(service.name().to_string(), secret);
        self.save()
    }

    fn save(&self) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }
        let content = toml::to_string(&self.keys)?;
        std::fs::write(&self.path, content)
            .with_context(|| format!("Failed to write {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_open_empty_dir() {
        let tmp = TempDir::new().unwrap();
        let store = KeyStore::open_in(tmp.path()).unwrap();
        assert!(store.keys.is_empty());
    }

    #[test]
    fn test_set_then_get_roundtrip() {
        let tmp = TempDir::new().unwrap();
        let mut store = KeyStore::open_in(tmp.path()).unwrap();
        store
            .set(Service::Assemblyai, "aai-key-123".to_string())
            .unwrap();

        // Reopen from disk
        let store = KeyStore::open_in(tmp.path()).unwrap();
        assert_eq!(store.keys.get("assemblyai").map(String::as_str), Some("aai-key-123"));
    }

    #[test]
    fn test_services_are_independent() {
        let tmp = TempDir::new().unwrap();
        let mut store = KeyStore::open_in(tmp.path()).unwrap();
        store.set(Service::Assemblyai, "a".to_string()).unwrap();
        store.set(Service::Gemini, "g".to_string()).unwrap();

        let store = KeyStore::open_in(tmp.path()).unwrap();
        assert_eq!(store.keys.get("assemblyai").map(String::as_str), Some("a"));
        assert_eq!(store.keys.get("gemini").map(String::as_str), Some("g"));
    }

    #[test]
    fn test_debug_hides_secrets() {
        let tmp = TempDir::new().unwrap();
        let mut store = KeyStore::open_in(tmp.path()).unwrap();
        store
            .set(Service::Gemini, "very-secret-value".to_string())
            .unwrap();
        let debug = format!("{:?}", store);
        assert!(!debug.contains("very-secret-value"));
    }

    #[test]
    fn test_corrupt_file_errors() {
        let tmp = TempDir::new().unwrap();
        std::fs::write(tmp.path().join("keys.toml"), "not [valid toml").unwrap();
        assert!(KeyStore::open_in(tmp.path()).is_err());
    }
}
