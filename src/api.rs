use std::path::{Component, Path};

use serde::{Deserialize, Serialize};
use chrono::{DateTime, Utc};
use post_score::summary::BatchSummary;
use post_score::{derive_content_id, AnalysisResult, Content};

#[derive(Debug, Deserialize)]
pub struct ApiAnalyzeRequest {
    pub request_id: Option<String>,
    pub advice: Option<bool>,
    #[serde(flatten)]
    pub content: Content,
}

impl ApiAnalyzeRequest {
    pub fn into_content(self) -> Result<Content, String> {
        let mut content = self.content;
        if content.text.trim().is_empty() && content.title.trim().is_empty() {
            return Err("text or title is required".to_string());
        }
        // Request images must stay under the content directory.
        if let Some(image) = content
            .images
            .iter()
            .find(|image| !is_contained_path(&image.path))
        {
            return Err(format!(
                "image path must be relative to the content directory: {}",
                image.path
            ));
        }
        if content.id.trim().is_empty() {
            let seed = if content.text.trim().is_empty() {
                &content.title
            } else {
                &content.text
            };
            content.id = derive_content_id(seed);
        }
        if content.content_type.trim().is_empty() {
            content.content_type = "post".to_string();
        }
        // Clients cannot point the server at arbitrary source files.
        content.source_path = None;
        Ok(content)
    }
}

fn is_contained_path(path: &str) -> bool {
    Path::new(path)
        .components()
        .all(|component| matches!(component, Component::Normal(_) | Component::CurDir))
}

/// One analysed item as printed, written to `analysis.json` and returned by
/// the HTTP API.
#[derive(Debug, Serialize)]
pub struct AnalysisEntry {
    #[serde(flatten)]
    pub result: AnalysisResult,
    pub topics: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub advice: Option<String>,
}

/// Contents of `analysis.json` for a batch run.
#[derive(Debug, Serialize)]
pub struct BatchReport<'a> {
    pub generated_at: DateTime<Utc>,
    pub summary: BatchSummary,
    pub results: &'a [AnalysisEntry],
}

#[derive(Debug, Serialize)]
pub struct ApiAnalyzeResponse {
    pub request_id: String,
    #[serde(flatten)]
    pub entry: AnalysisEntry,
}

#[derive(Debug, Serialize)]
pub struct ApiHealthResponse {
    pub status: &'static str,
    pub provider: &'static str,
    pub remote: bool,
    pub model: String,
    pub image_max_size: u64,
    pub image_supported_ext: Vec<String>,
    pub min_word_count: usize,
    pub max_word_count: usize,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(body: serde_json::Value) -> ApiAnalyzeRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn into_content_fills_defaults() {
        let content = request(serde_json::json!({
            "text": "hello world",
            "file_path": "/etc/passwd",
            "images": [{"path": "photos/cover.png"}, {"path": "./inline.jpg"}]
        }))
        .into_content()
        .unwrap();

        assert!(content.id.starts_with("content_"));
        assert_eq!(content.content_type, "post");
        assert!(content.source_path.is_none());
        assert_eq!(content.images.len(), 2);
    }

    #[test]
    fn into_content_accepts_title_only_posts() {
        let content = request(serde_json::json!({"id": "t", "title": "Just a title"}))
            .into_content()
            .unwrap();
        assert_eq!(content.id, "t");
        assert!(content.text.is_empty());

        let err = request(serde_json::json!({"text": "  ", "title": ""}))
            .into_content()
            .unwrap_err();
        assert_eq!(err, "text or title is required");
    }

    #[test]
    fn into_content_rejects_paths_outside_content_dir() {
        for path in ["/etc/hostname", "../secret.png", "photos/../../x.png"] {
            let result = request(serde_json::json!({
                "text": "body",
                "images": [{"path": "ok.png"}, {"path": path}]
            }))
            .into_content();
            let err = result.unwrap_err();
            assert!(err.contains(path), "{}", err);
        }
    }
}
