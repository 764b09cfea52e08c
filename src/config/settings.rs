// src/config/settings.rs
//! Runtime settings loaded from `config/insight.toml`.
//!
//! TOML shape (every key optional):
//! ```toml
//! [extractor]
//! min_body_chars = 200
//! min_paragraph_chars = 25
//!
//! [summarizer]
//! default_sentence_count = 3
//! min_dimensions = 3
//! reduction_ratio = 1.0
//! smoothing = 0.4
//! inverse_sentence_frequency = false
//!
//! [fetch]
//! timeout_secs = 20
//! user_agent = "Mozilla/5.0 ..."
//! ```
//!
//! Resolution order: `$INSIGHT_CONFIG_PATH` (must exist), then the default
//! path, then built-in defaults. `INSIGHT_SENTENCE_COUNT` and
//! `INSIGHT_FETCH_TIMEOUT_SECS` override the file.

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::extract::ExtractorConfig;
use crate::fetch::FetchConfig;
use crate::summarize::SummarizerConfig;

// --- env defaults & names ---
pub const DEFAULT_CONFIG_PATH: &str = "config/insight.toml";
pub const ENV_CONFIG_PATH: &str = "INSIGHT_CONFIG_PATH";
pub const ENV_SENTENCE_COUNT: &str = "INSIGHT_SENTENCE_COUNT";
pub const ENV_FETCH_TIMEOUT_SECS: &str = "INSIGHT_FETCH_TIMEOUT_SECS";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InsightConfig {
    pub extractor: ExtractorConfig,
    pub summarizer: SummarizerConfig,
    pub fetch: FetchConfig,
}

impl InsightConfig {
    /// Load using env var + fallbacks (see module docs), then apply env overrides.
    pub fn from_toml() -> Result<Self> {
        let cfg = match std::env::var(ENV_CONFIG_PATH) {
            Ok(p) => {
                let path = PathBuf::from(p);
                if !path.exists() {
                    return Err(anyhow!(
                        "{ENV_CONFIG_PATH} points to non-existent path {}",
                        path.display()
                    ));
                }
                Self::load_from_file(&path)?
            }
            Err(_) => {
                let path = PathBuf::from(DEFAULT_CONFIG_PATH);
                if path.exists() {
                    Self::load_from_file(&path)?
                } else {
                    debug!(path = %path.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };
        Ok(cfg.with_env_overrides())
    }

    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("reading config from {}", path.display()))?;
        let cfg = Self::from_toml_str(&content)
            .with_context(|| format!("parsing config at {}", path.display()))?;
        info!(path = %path.display(), "config loaded");
        Ok(cfg)
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let cfg: InsightConfig = toml::from_str(s)?;
        Ok(cfg.sanitized())
    }

    /// Replace out-of-range values with their defaults.
    pub fn sanitized(self) -> Self {
        Self {
            extractor: self.extractor.sanitized(),
            summarizer: self.summarizer.sanitized(),
            fetch: self.fetch.sanitized(),
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Some(n) = parse_positive_env(std::env::var(ENV_SENTENCE_COUNT).ok()) {
            self.summarizer.default_sentence_count = n;
        }
        if let Some(secs) = parse_positive_env(std::env::var(ENV_FETCH_TIMEOUT_SECS).ok()) {
            self.fetch.timeout_secs = secs as u64;
        }
        self
    }
}

// parse optional positive integer env; zero and garbage are ignored
fn parse_positive_env(raw: Option<String>) -> Option<usize> {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&v| v > 0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;

    #[test]
    fn partial_toml_keeps_defaults() {
        let cfg = InsightConfig::from_toml_str(
            r#"
            [summarizer]
            default_sentence_count = 5
            "#,
        )
        .unwrap();
        assert_eq!(cfg.summarizer.default_sentence_count, 5);
        assert_eq!(cfg.summarizer.min_dimensions, 3);
        assert_eq!(cfg.extractor, ExtractorConfig::default());
        assert_eq!(cfg.fetch.timeout_secs, 20);
    }

    #[test]
    fn out_of_range_values_are_sanitized() {
        let cfg = InsightConfig::from_toml_str(
            r#"
            [summarizer]
            default_sentence_count = 0
            reduction_ratio = 7.5
            smoothing = -1.0

            [fetch]
            timeout_secs = 0
            "#,
        )
        .unwrap();
        let d = SummarizerConfig::default();
        assert_eq!(cfg.summarizer.default_sentence_count, d.default_sentence_count);
        assert_eq!(cfg.summarizer.reduction_ratio, d.reduction_ratio);
        assert_eq!(cfg.summarizer.smoothing, d.smoothing);
        assert_eq!(cfg.fetch.timeout_secs, FetchConfig::default().timeout_secs);
    }

    #[test]
    fn rejects_malformed_toml() {
        assert!(InsightConfig::from_toml_str("[summarizer\nsmoothing = ").is_err());
    }

    #[test]
    fn positive_env_parsing() {
        assert_eq!(parse_positive_env(Some(" 4 ".into())), Some(4));
        assert_eq!(parse_positive_env(Some("0".into())), None);
        assert_eq!(parse_positive_env(Some("many".into())), None);
        assert_eq!(parse_positive_env(None), None);
    }

    #[serial_test::serial]
    #[test]
    fn default_uses_env_then_fallbacks() {
        // Isolate CWD so a real config/ in the repo does not interfere
        let old = env::current_dir().unwrap();
        let tmp = tempfile::tempdir().unwrap();
        env::set_current_dir(tmp.path()).unwrap();
        env::remove_var(ENV_CONFIG_PATH);
        env::remove_var(ENV_SENTENCE_COUNT);

        // No file in temp CWD -> defaults
        let cfg = InsightConfig::from_toml().unwrap();
        assert_eq!(cfg, InsightConfig::default());

        // Env path wins, env override applies on top
        let p = tmp.path().join("custom.toml");
        fs::write(&p, "[extractor]\nmin_body_chars = 50\n").unwrap();
        env::set_var(ENV_CONFIG_PATH, p.display().to_string());
        env::set_var(ENV_SENTENCE_COUNT, "7");
        let cfg = InsightConfig::from_toml().unwrap();
        assert_eq!(cfg.extractor.min_body_chars, 50);
        assert_eq!(cfg.summarizer.default_sentence_count, 7);

        // Env path to a missing file is an error
        env::set_var(ENV_CONFIG_PATH, tmp.path().join("missing.toml").display().to_string());
        assert!(InsightConfig::from_toml().is_err());

        env::remove_var(ENV_CONFIG_PATH);
        env::remove_var(ENV_SENTENCE_COUNT);
        env::set_current_dir(&old).unwrap();
    }
}
