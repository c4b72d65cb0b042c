use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};

use crate::error::ConfigError;
use crate::scoring::ScoreWeights;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderKind {
    Local,
    OpenAi,
    Claude,
}

impl ProviderKind {
    pub fn parse(value: &str) -> Result<Self, ConfigError> {
        match value.trim().to_lowercase().as_str() {
            "" | "local" | "none" => Ok(ProviderKind::Local),
            "openai" => Ok(ProviderKind::OpenAi),
            "claude" | "anthropic" => Ok(ProviderKind::Claude),
            _ => Err(ConfigError::UnknownProvider(value.to_string())),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ProviderKind::Local => "local",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Claude => "claude",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AiConfig {
    pub provider: String,
    pub api_key: String,
    pub model: String,
    pub base_url: Option<String>,
    pub timeout_secs: u64,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            provider: "local".to_string(),
            api_key: String::new(),
            model: "gpt-3.5-turbo".to_string(),
            base_url: None,
            timeout_secs: 30,
        }
    }
}

impl AiConfig {
    pub fn kind(&self) -> Result<ProviderKind, ConfigError> {
        ProviderKind::parse(&self.provider)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageConfig {
    pub max_size: u64,
    pub supported_ext: Vec<String>,
}

impl Default for ImageConfig {
    fn default() -> Self {
        Self {
            max_size: 10 * 1024 * 1024,
            supported_ext: [".jpg", ".jpeg", ".png", ".gif", ".bmp"]
                .iter()
                .map(|ext| ext.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    pub min_word_count: usize,
    pub max_word_count: usize,
    pub weights: ScoreWeights,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            min_word_count: 50,
            max_word_count: 1000,
            weights: ScoreWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub content_dir: PathBuf,
    pub output_dir: PathBuf,
    pub ai: AiConfig,
    pub image: ImageConfig,
    pub analysis: AnalysisConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content_dir: PathBuf::from("./content"),
            output_dir: PathBuf::from("./output"),
            ai: AiConfig::default(),
            image: ImageConfig::default(),
            analysis: AnalysisConfig::default(),
        }
    }
}

impl Config {
    /// Loads the config file (if present), applies env overrides and
    /// validates the result.
    pub fn load(path: Option<PathBuf>) -> Result<(Self, Option<PathBuf>), ConfigError> {
        let config_path = path.or_else(default_config_path);
        let mut config = match config_path.as_ref() {
            Some(path) if path.exists() => Self::from_file(path)?,
            _ => Config::default(),
        };

        config.apply_env_overrides();
        config.validate()?;
        Ok((config, config_path))
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        toml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn write(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |source| ConfigError::Write {
            path: path.to_path_buf(),
            source,
        };
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(write_err)?;
            }
        }
        let payload = toml::to_string_pretty(self)?;
        std::fs::write(path, payload).map_err(write_err)?;
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.ai.kind()?;
        self.analysis.weights.validate()?;

        if self.image.max_size == 0 {
            return Err(ConfigError::ImageLimits("max_size must be positive".to_string()));
        }
        if self.image.supported_ext.is_empty() {
            return Err(ConfigError::ImageLimits(
                "supported_ext must list at least one extension".to_string(),
            ));
        }
        if self.analysis.min_word_count > self.analysis.max_word_count {
            return Err(ConfigError::WordRange {
                min: self.analysis.min_word_count,
                max: self.analysis.max_word_count,
            });
        }
        Ok(())
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(provider) = env::var("AI_PROVIDER") {
            if !provider.trim().is_empty() {
                self.ai.provider = provider;
            }
        }
        if let Ok(api_key) = env::var("AI_API_KEY") {
            if !api_key.trim().is_empty() {
                self.ai.api_key = api_key;
            }
        }
        if let Ok(model) = env::var("AI_MODEL") {
            if !model.trim().is_empty() {
                self.ai.model = model;
            }
        }
        if let Ok(base_url) = env::var("AI_BASE_URL") {
            if !base_url.trim().is_empty() {
                self.ai.base_url = Some(base_url);
            }
        }
        if let Ok(timeout) = env::var("AI_TIMEOUT_SECS") {
            if let Ok(value) = timeout.parse::<u64>() {
                self.ai.timeout_secs = value;
            }
        }
        if let Ok(dir) = env::var("CONTENT_DIR") {
            if !dir.trim().is_empty() {
                self.content_dir = PathBuf::from(dir);
            }
        }
        if let Ok(dir) = env::var("OUTPUT_DIR") {
            if !dir.trim().is_empty() {
                self.output_dir = PathBuf::from(dir);
            }
        }
    }
}

fn default_config_path() -> Option<PathBuf> {
    env::var("POST_SCORE_CONFIG")
        .ok()
        .filter(|value| !value.trim().is_empty())
        .map(PathBuf::from)
        .or_else(|| Some(PathBuf::from("config/post-score.toml")))
}
