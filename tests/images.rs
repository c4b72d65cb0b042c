use std::path::Path;
use std::sync::Arc;

use post_score::config::{Config, ImageConfig};
use post_score::error::{AnalysisError, ImageError};
use post_score::images::{image_score, resolution_score, FileImageAnalyzer, ImageAnalyzer};
use post_score::provider::LexiconProvider;
use post_score::{
    validate_content, CompositionAnalysis, Content, ContentAnalyzer, Image, QualityMetrics,
};

fn write_png(path: &Path, width: u32, height: u32, gray: bool) {
    let img = image::RgbImage::from_fn(width, height, |x, y| {
        if gray {
            image::Rgb([128, 128, 128])
        } else {
            image::Rgb([(x * 4) as u8, (y * 5) as u8, 200])
        }
    });
    img.save(path).expect("write png");
}

fn analyzer() -> FileImageAnalyzer {
    FileImageAnalyzer::new(ImageConfig::default())
}

fn image_ref(path: &str) -> Image {
    Image {
        path: path.to_string(),
        ..Image::default()
    }
}

#[test]
fn info_reads_header() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("photo.png");
    write_png(&path, 64, 48, false);

    let info = analyzer().info(&path).expect("info");
    assert_eq!(info.width, 64);
    assert_eq!(info.height, 48);
    assert_eq!(info.format, "png");
    assert!(info.size > 0);
}

#[test]
fn validate_checks_existence_extension_and_size() {
    let dir = tempfile::tempdir().expect("tempdir");

    let missing = dir.path().join("missing.png");
    assert!(matches!(
        analyzer().validate(&missing),
        Err(ImageError::NotFound(_))
    ));

    let tiff = dir.path().join("scan.tiff");
    std::fs::write(&tiff, b"not really a tiff").expect("write");
    match analyzer().validate(&tiff) {
        Err(ImageError::UnsupportedFormat { ext, .. }) => assert_eq!(ext, "tiff"),
        other => panic!("unexpected: {:?}", other),
    }

    let lower = dir.path().join("photo.png");
    write_png(&lower, 16, 16, false);
    let png = dir.path().join("photo.PNG");
    std::fs::rename(&lower, &png).expect("rename");
    assert!(analyzer().validate(&png).is_ok());

    let tiny_limit = FileImageAnalyzer::new(ImageConfig {
        max_size: 10,
        ..ImageConfig::default()
    });
    assert!(matches!(
        tiny_limit.validate(&png),
        Err(ImageError::TooLarge { max: 10, .. })
    ));
}

#[test]
fn undecodable_file_reports_decode_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("broken.png");
    std::fs::write(&path, b"definitely not a png").expect("write");

    assert!(matches!(
        analyzer().analyze(&path),
        Err(ImageError::Decode { .. })
    ));
}

#[test]
fn misnamed_file_decodes_by_content() {
    let dir = tempfile::tempdir().expect("tempdir");
    let png = dir.path().join("photo.png");
    write_png(&png, 24, 24, false);
    let jpg = dir.path().join("photo.jpg");
    std::fs::rename(&png, &jpg).expect("rename");

    assert_eq!(analyzer().info(&jpg).expect("info").format, "png");
    let analysis = analyzer().analyze(&jpg).expect("analysis");
    assert_eq!(analysis.quality.resolution, "24x24");
}

#[test]
fn analyze_produces_bounded_metrics() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("photo.png");
    write_png(&path, 64, 48, false);

    let analysis = analyzer().analyze(&path).expect("analysis");
    assert!((60.0..=100.0).contains(&analysis.score));
    assert_eq!(analysis.quality.resolution, "64x48");
    assert!((analysis.quality.resolution_score - 0.3).abs() < 1e-9);
    assert!(!analysis.visual.dominant_colors.is_empty());
    assert!(analysis.visual.dominant_colors.len() <= 5);
    for value in [
        analysis.visual.brightness,
        analysis.visual.contrast,
        analysis.visual.saturation,
        analysis.composition.balance_score,
        analysis.composition.focus_clarity,
        analysis.quality.overall_quality,
    ] {
        assert!((0.0..=1.0).contains(&value));
    }
}

#[test]
fn uniform_image_is_symmetric_and_balanced() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("gray.png");
    write_png(&path, 40, 40, true);

    let analysis = analyzer().analyze(&path).expect("analysis");
    assert!(analysis.composition.symmetry);
    assert!(!analysis.composition.rule_of_thirds);
    assert!((analysis.composition.balance_score - 1.0).abs() < 1e-9);
    assert_eq!(analysis.visual.dominant_colors, vec!["#808080"]);
    assert!(
        (analysis.score - image_score(&analysis.composition, &analysis.quality)).abs() < 1e-9
    );
}

#[test]
fn image_score_formula() {
    let mut composition = CompositionAnalysis {
        rule_of_thirds: true,
        symmetry: true,
        balance_score: 1.0,
        focus_clarity: 1.0,
    };
    let mut quality = QualityMetrics {
        resolution: "1920x1080".to_string(),
        resolution_score: 0.9,
        sharpness: 1.0,
        exposure_score: 1.0,
        overall_quality: 1.0,
    };
    assert!((image_score(&composition, &quality) - 100.0).abs() < 1e-9);

    composition.rule_of_thirds = false;
    composition.symmetry = false;
    composition.balance_score = 0.0;
    quality.overall_quality = 0.0;
    assert!((image_score(&composition, &quality) - 60.0).abs() < 1e-9);
}

#[test]
fn resolution_tiers() {
    assert!((resolution_score(2000, 1000) - 0.9).abs() < 1e-9);
    assert!((resolution_score(1000, 1000) - 0.7).abs() < 1e-9);
    assert!((resolution_score(1000, 500) - 0.5).abs() < 1e-9);
    assert!((resolution_score(10, 10) - 0.3).abs() < 1e-9);
}

fn content_analyzer(content_dir: &Path) -> ContentAnalyzer {
    let config = Config {
        content_dir: content_dir.to_path_buf(),
        ..Config::default()
    };
    ContentAnalyzer::new(
        Arc::new(config),
        Box::new(LexiconProvider),
        Box::new(analyzer()),
    )
}

#[tokio::test]
async fn failed_images_are_skipped_when_one_succeeds() {
    let dir = tempfile::tempdir().expect("tempdir");
    write_png(&dir.path().join("cover.png"), 32, 32, false);

    let content = Content {
        id: "with-images".to_string(),
        title: "Trip".to_string(),
        text: "A short trip report.".to_string(),
        images: vec![image_ref("cover.png"), image_ref("missing.png")],
        ..Content::default()
    };

    let result = content_analyzer(dir.path())
        .analyze(&content)
        .await
        .expect("analysis");
    assert_eq!(result.images.len(), 1);
    assert!((result.score.breakdown.visual - result.images[0].score).abs() < 1e-9);
    assert!(result
        .suggestions
        .iter()
        .all(|suggestion| suggestion.kind != post_score::SuggestionKind::Visual));
}

#[tokio::test]
async fn content_fails_when_every_image_fails() {
    let dir = tempfile::tempdir().expect("tempdir");
    let content = Content {
        id: "broken-images".to_string(),
        text: "Text".to_string(),
        images: vec![image_ref("missing.png"), image_ref("also-missing.jpg")],
        ..Content::default()
    };

    match content_analyzer(dir.path()).analyze(&content).await {
        Err(AnalysisError::Images {
            content_id,
            failures,
        }) => {
            assert_eq!(content_id, "broken-images");
            assert_eq!(failures.len(), 2);
        }
        Ok(_) => panic!("expected image failure"),
    }
}

#[test]
fn validate_content_reports_advisory_issues() {
    let dir = tempfile::tempdir().expect("tempdir");
    let config = Config {
        content_dir: dir.path().to_path_buf(),
        ..Config::default()
    };
    let content = Content {
        text: "too short".to_string(),
        images: vec![image_ref("missing.png")],
        ..Content::default()
    };

    let issues = validate_content(&content, &config, &analyzer());
    assert_eq!(issues.len(), 3, "{:?}", issues);
    assert!(issues[0].contains("below the recommended minimum"));
    assert_eq!(issues[1], "title is missing");
    assert!(issues[2].contains("missing.png"));
}
