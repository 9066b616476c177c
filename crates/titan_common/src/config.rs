//! Uplink configuration
//!
//! Configuration lives in `$XDG_CONFIG_HOME/titan/config.toml` unless a path
//! is given explicitly. Every field has a default, so an absent or partial
//! file is fine.

use crate::error::Result;
use crate::loader::DocumentSource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

const CONFIG_DIR: &str = "titan";
const CONFIG_FILE: &str = "config.toml";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TitanConfig {
    /// Document index: URL or local path
    #[serde(default = "default_documents")]
    pub documents: String,

    /// Host name shown in the prompt and boot banner
    #[serde(default = "default_hostname")]
    pub hostname: String,

    /// Where `build` sends the user
    #[serde(default = "default_builder_url")]
    pub builder_url: String,

    /// Program handed the builder URL on navigation (e.g. `xdg-open`)
    #[serde(default)]
    pub open_command: Option<String>,

    #[serde(default)]
    pub credentials: Credentials,

    #[serde(default)]
    pub typing: TypingSettings,

    #[serde(default)]
    pub logging: LogSettings,
}

fn default_documents() -> String {
    "./documents.json".to_string()
}

fn default_hostname() -> String {
    "TITAN-1".to_string()
}

fn default_builder_url() -> String {
    "./builder.html".to_string()
}

impl Default for TitanConfig {
    fn default() -> Self {
        Self {
            documents: default_documents(),
            hostname: default_hostname(),
            builder_url: default_builder_url(),
            open_command: None,
            credentials: Credentials::default(),
            typing: TypingSettings::default(),
            logging: LogSettings::default(),
        }
    }
}

/// Plain-text secrets for `login`. Not a security boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credentials {
    #[serde(default = "default_builder_secret")]
    pub builder: String,

    #[serde(default = "default_admin_secret")]
    pub admin: String,
}

fn default_builder_secret() -> String {
    "builder".to_string()
}

fn default_admin_secret() -> String {
    "titan".to_string()
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            builder: default_builder_secret(),
            admin: default_admin_secret(),
        }
    }
}

/// Teletype pacing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingSettings {
    /// Base delay per typed character
    #[serde(default = "default_char_delay")]
    pub char_delay_ms: u64,

    /// Upper bound of random extra delay per character
    #[serde(default = "default_jitter")]
    pub jitter_ms: u64,

    /// Total duration of a `list` listing
    #[serde(default = "default_list_budget")]
    pub list_budget_ms: u64,

    /// Below this per-character delay, listings go line by line
    #[serde(default = "default_min_char_delay")]
    pub min_char_delay_ms: u64,

    /// Delay between `build` and navigation
    #[serde(default = "default_navigation_delay")]
    pub navigation_delay_ms: u64,
}

fn default_char_delay() -> u64 {
    15
}

fn default_jitter() -> u64 {
    10
}

fn default_list_budget() -> u64 {
    3000
}

fn default_min_char_delay() -> u64 {
    5
}

fn default_navigation_delay() -> u64 {
    1000
}

impl Default for TypingSettings {
    fn default() -> Self {
        Self {
            char_delay_ms: default_char_delay(),
            jitter_ms: default_jitter(),
            list_budget_ms: default_list_budget(),
            min_char_delay_ms: default_min_char_delay(),
            navigation_delay_ms: default_navigation_delay(),
        }
    }
}

impl TypingSettings {
    pub fn char_delay(&self) -> Duration {
        Duration::from_millis(self.char_delay_ms)
    }

    pub fn jitter(&self) -> Duration {
        Duration::from_millis(self.jitter_ms)
    }

    pub fn list_budget(&self) -> Duration {
        Duration::from_millis(self.list_budget_ms)
    }

    pub fn min_char_delay(&self) -> Duration {
        Duration::from_millis(self.min_char_delay_ms)
    }

    pub fn navigation_delay(&self) -> Duration {
        Duration::from_millis(self.navigation_delay_ms)
    }

    /// No delays at all; used by tests and non-interactive runs
    pub fn instant() -> Self {
        Self {
            char_delay_ms: 0,
            jitter_ms: 0,
            list_budget_ms: 0,
            min_char_delay_ms: 0,
            navigation_delay_ms: 0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogSettings {
    /// `tracing` filter directive
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Explicit log file; otherwise the XDG state directory is used
    #[serde(default)]
    pub file: Option<PathBuf>,
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

impl TitanConfig {
    /// Default config file location, if a config directory is known
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR).join(CONFIG_FILE))
    }

    /// Load from an explicit path, or the default location when it exists
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::load_from(path),
            None => match Self::default_path() {
                Some(path) if path.exists() => Self::load_from(&path),
                _ => Ok(Self::default()),
            },
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    pub fn document_source(&self) -> DocumentSource {
        DocumentSource::parse(&self.documents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = TitanConfig::default();
        assert_eq!(config.hostname, "TITAN-1");
        assert_eq!(config.credentials.admin, "titan");
        assert_eq!(config.credentials.builder, "builder");
        assert_eq!(config.typing.list_budget(), Duration::from_secs(3));
        assert_eq!(config.typing.min_char_delay_ms, 5);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = TitanConfig::parse(
            r#"
            hostname = "TITAN-2"
            [typing]
            char_delay_ms = 30
            "#,
        )
        .unwrap();
        assert_eq!(config.hostname, "TITAN-2");
        assert_eq!(config.typing.char_delay_ms, 30);
        assert_eq!(config.typing.jitter_ms, 10);
        assert_eq!(config.builder_url, "./builder.html");
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "documents = \"https://uplink.example/documents.json\"").unwrap();
        writeln!(file, "[credentials]\nadmin = \"omega\"").unwrap();
        let config = TitanConfig::load(Some(file.path())).unwrap();
        assert_eq!(config.credentials.admin, "omega");
        assert!(matches!(config.document_source(), DocumentSource::Remote(_)));
    }

    #[test]
    fn test_invalid_toml_is_config_error() {
        let err = TitanConfig::parse("hostname = [").unwrap_err();
        assert_eq!(err.kind(), "config");
    }
}
