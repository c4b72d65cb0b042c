use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("failed to write config {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("unknown AI provider: {0} (expected local, openai or claude)")]
    UnknownProvider(String),

    #[error("invalid score weight {name}: {value}")]
    InvalidWeight { name: &'static str, value: f64 },

    #[error("score weights must sum to 1.0, got {0:.4}")]
    WeightSum(f64),

    #[error("invalid image settings: {0}")]
    ImageLimits(String),

    #[error("min_word_count ({min}) exceeds max_word_count ({max})")]
    WordRange { min: usize, max: usize },

    #[error("failed to build AI client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("unsupported content file: {0}")]
    Unsupported(PathBuf),
}

impl LoadError {
    pub fn path(&self) -> &PathBuf {
        match self {
            LoadError::Read { path, .. } | LoadError::Parse { path, .. } => path,
            LoadError::Unsupported(path) => path,
        }
    }
}

#[derive(Debug, Error)]
pub enum ImageError {
    #[error("image not found: {0}")]
    NotFound(PathBuf),

    #[error("unsupported image format {ext:?}: {path}")]
    UnsupportedFormat { path: PathBuf, ext: String },

    #[error("image too large: {path} ({size} bytes, max {max})")]
    TooLarge { path: PathBuf, size: u64, max: u64 },

    #[error("failed to read image {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to decode image {path}: {source}")]
    Decode {
        path: PathBuf,
        source: image::ImageError,
    },
}

#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("all {} image(s) of content {content_id} failed; first error: {}", .failures.len(), first_failure(.failures))]
    Images {
        content_id: String,
        failures: Vec<ImageError>,
    },
}

fn first_failure(failures: &[ImageError]) -> String {
    failures
        .first()
        .map(|err| err.to_string())
        .unwrap_or_default()
}

/// Failure of a single remote AI call. Never leaves the provider module's
/// public methods; they fall back to the lexicon instead.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("response missing content")]
    MissingContent,

    #[error("response parse failed: {0}")]
    Parse(String),
}
