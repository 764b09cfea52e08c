// src/config/mod.rs
pub mod settings;

pub use settings::{
    InsightConfig, DEFAULT_CONFIG_PATH, ENV_CONFIG_PATH, ENV_FETCH_TIMEOUT_SECS,
    ENV_SENTENCE_COUNT,
};
