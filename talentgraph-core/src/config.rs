use config::{Config, ConfigError, File};
use serde::Deserialize;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct TalentGraphConfig {
    #[serde(default)]
    pub service: ServiceConfig,
    #[serde(default)]
    pub ranking: RankingConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServiceConfig {
    pub log_level: String,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

#[derive(Debug, Deserialize, Clone)]
pub struct RankingConfig {
    /// Result-size bound applied when the caller does not pass one.
    pub default_top_n: usize,
    /// Upper bound on in-flight experience lookups during a single rank call.
    pub experience_concurrency: usize,
}

impl Default for RankingConfig {
    fn default() -> Self {
        Self {
            default_top_n: 5,
            experience_concurrency: 8,
        }
    }
}

impl TalentGraphConfig {
    /// Load from a TOML file. A missing file yields the built-in defaults so
    /// the CLI works without any config on disk.
    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let s = Config::builder()
            .add_source(File::with_name(path).required(false))
            .build()?;
        s.try_deserialize()
    }
}
