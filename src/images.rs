//! Image collaborator: validation, header info and sampled pixel metrics.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

use image::{DynamicImage, GenericImageView, ImageReader, RgbImage};

use crate::config::ImageConfig;
use crate::error::ImageError;
use crate::{
    clamp01, clamp_score, CompositionAnalysis, Image, ImageAnalysis, QualityMetrics,
    StyleAnalysis, VisualElements,
};

/// Longest edge images are downscaled to before sampling.
const SAMPLE_EDGE: u32 = 256;
const DOMINANT_COLORS: usize = 5;

pub trait ImageAnalyzer: Send + Sync {
    /// Checks existence, extension allow-list and byte-size bound, in that order.
    fn validate(&self, path: &Path) -> Result<(), ImageError>;

    fn info(&self, path: &Path) -> Result<Image, ImageError>;

    fn analyze(&self, path: &Path) -> Result<ImageAnalysis, ImageError>;
}

#[derive(Debug, Clone)]
pub struct FileImageAnalyzer {
    config: ImageConfig,
}

impl FileImageAnalyzer {
    pub fn new(config: ImageConfig) -> Self {
        Self { config }
    }

    fn extension_allowed(&self, ext: &str) -> bool {
        self.config
            .supported_ext
            .iter()
            .any(|allowed| allowed.trim_start_matches('.').eq_ignore_ascii_case(ext))
    }
}

impl ImageAnalyzer for FileImageAnalyzer {
    fn validate(&self, path: &Path) -> Result<(), ImageError> {
        if !path.is_file() {
            return Err(ImageError::NotFound(path.to_path_buf()));
        }

        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or_default()
            .to_lowercase();
        if !self.extension_allowed(&ext) {
            return Err(ImageError::UnsupportedFormat {
                path: path.to_path_buf(),
                ext,
            });
        }

        let size = file_size(path)?;
        if size > self.config.max_size {
            return Err(ImageError::TooLarge {
                path: path.to_path_buf(),
                size,
                max: self.config.max_size,
            });
        }
        Ok(())
    }

    fn info(&self, path: &Path) -> Result<Image, ImageError> {
        let reader = open_reader(path)?;
        let format = reader
            .format()
            .map(|format| format!("{:?}", format).to_lowercase())
            .unwrap_or_default();
        let (width, height) = reader.into_dimensions().map_err(|source| ImageError::Decode {
            path: path.to_path_buf(),
            source,
        })?;

        Ok(Image {
            path: path.display().to_string(),
            url: None,
            caption: None,
            width,
            height,
            size: file_size(path)?,
            format,
        })
    }

    fn analyze(&self, path: &Path) -> Result<ImageAnalysis, ImageError> {
        self.validate(path)?;
        let info = self.info(path)?;
        // Decode by content, like `info`, so a misnamed file behaves the same in both.
        let decoded = open_reader(path)?
            .decode()
            .map_err(|source| ImageError::Decode {
                path: path.to_path_buf(),
                source,
            })?;

        let pixels = sample_pixels(&decoded);
        let metrics = PixelMetrics::measure(&pixels);

        let visual = VisualElements {
            dominant_colors: dominant_colors(&pixels),
            brightness: metrics.brightness,
            contrast: metrics.contrast,
            saturation: metrics.saturation,
        };
        let composition = CompositionAnalysis {
            rule_of_thirds: metrics.rule_of_thirds,
            symmetry: metrics.symmetry >= 0.9,
            balance_score: metrics.balance,
            focus_clarity: metrics.sharpness,
        };
        let quality = quality_metrics(&info, &metrics);
        let style = style_analysis(&metrics);
        let score = image_score(&composition, &quality);

        Ok(ImageAnalysis {
            path: info.path,
            visual,
            composition,
            quality,
            style,
            score,
        })
    }
}

/// `60 + 25·overall_quality + 5 each for rule of thirds and symmetry + 5·balance`.
pub fn image_score(composition: &CompositionAnalysis, quality: &QualityMetrics) -> f64 {
    let mut score = 60.0 + 25.0 * clamp01(quality.overall_quality);
    if composition.rule_of_thirds {
        score += 5.0;
    }
    if composition.symmetry {
        score += 5.0;
    }
    score += 5.0 * clamp01(composition.balance_score);
    clamp_score(score)
}

pub fn resolution_score(width: u32, height: u32) -> f64 {
    let pixels = u64::from(width) * u64::from(height);
    if pixels >= 2_000_000 {
        0.9
    } else if pixels >= 1_000_000 {
        0.7
    } else if pixels >= 500_000 {
        0.5
    } else {
        0.3
    }
}

fn file_size(path: &Path) -> Result<u64, ImageError> {
    fs::metadata(path)
        .map(|meta| meta.len())
        .map_err(|source| ImageError::Io {
            path: path.to_path_buf(),
            source,
        })
}

fn sample_pixels(decoded: &DynamicImage) -> RgbImage {
    let (width, height) = decoded.dimensions();
    if width > SAMPLE_EDGE || height > SAMPLE_EDGE {
        decoded.thumbnail(SAMPLE_EDGE, SAMPLE_EDGE).to_rgb8()
    } else {
        decoded.to_rgb8()
    }
}

fn luminance(pixel: &image::Rgb<u8>) -> f64 {
    let [r, g, b] = pixel.0;
    (0.299 * f64::from(r) + 0.587 * f64::from(g) + 0.114 * f64::from(b)) / 255.0
}

#[derive(Debug, Clone, Copy, Default)]
struct PixelMetrics {
    brightness: f64,
    contrast: f64,
    saturation: f64,
    sharpness: f64,
    symmetry: f64,
    balance: f64,
    rule_of_thirds: bool,
}

impl PixelMetrics {
    fn measure(pixels: &RgbImage) -> Self {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Self::default();
        }

        let mut total_lum: f64 = 0.0;
        let mut min_lum: f64 = 1.0;
        let mut max_lum: f64 = 0.0;
        let mut total_sat: f64 = 0.0;
        let mut left: f64 = 0.0;
        let mut right: f64 = 0.0;
        let mut mirror_diff: f64 = 0.0;
        let mut edge_total: f64 = 0.0;
        let mut edge_count = 0usize;
        let mut thirds_edge: f64 = 0.0;
        let mut thirds_count = 0usize;

        let third_x = [width / 3, 2 * width / 3];
        let third_y = [height / 3, 2 * height / 3];
        let band_x = (width / 12).max(1);
        let band_y = (height / 12).max(1);
        let near_third = |value: u32, lines: &[u32; 2], band: u32| {
            lines.iter().any(|line| value.abs_diff(*line) <= band)
        };

        for (x, y, pixel) in pixels.enumerate_pixels() {
            let lum = luminance(pixel);
            total_lum += lum;
            min_lum = min_lum.min(lum);
            max_lum = max_lum.max(lum);

            let [r, g, b] = pixel.0;
            let max = r.max(g).max(b);
            let min = r.min(g).min(b);
            if max > 0 {
                total_sat += f64::from(max - min) / f64::from(max);
            }

            if x < width / 2 {
                left += lum;
            } else {
                right += lum;
            }
            mirror_diff += (lum - luminance(pixels.get_pixel(width - 1 - x, y))).abs();

            if x + 1 < width {
                let edge = (lum - luminance(pixels.get_pixel(x + 1, y))).abs();
                edge_total += edge;
                edge_count += 1;
                if near_third(x, &third_x, band_x) && near_third(y, &third_y, band_y) {
                    thirds_edge += edge;
                    thirds_count += 1;
                }
            }
        }

        let count = f64::from(width) * f64::from(height);
        let mean_edge = if edge_count > 0 {
            edge_total / edge_count as f64
        } else {
            0.0
        };
        let thirds_mean = if thirds_count > 0 {
            thirds_edge / thirds_count as f64
        } else {
            0.0
        };
        let half = (left + right).max(f64::EPSILON);

        Self {
            brightness: clamp01(total_lum / count),
            contrast: clamp01(max_lum - min_lum),
            saturation: clamp01(total_sat / count),
            sharpness: clamp01(mean_edge * 4.0),
            symmetry: clamp01(1.0 - mirror_diff / count),
            balance: clamp01(1.0 - (left - right).abs() / half),
            rule_of_thirds: thirds_count > 0 && mean_edge > 0.0 && thirds_mean > mean_edge * 1.2,
        }
    }
}

fn open_reader(path: &Path) -> Result<ImageReader<BufReader<File>>, ImageError> {
    let io_err = |source| ImageError::Io {
        path: path.to_path_buf(),
        source,
    };
    ImageReader::open(path)
        .map_err(io_err)?
        .with_guessed_format()
        .map_err(io_err)
}

/// Top colours after quantizing each channel to its high nibble. Ties break
/// on the hex string so the output is stable.
fn dominant_colors(pixels: &RgbImage) -> Vec<String> {
    let mut counts: BTreeMap<String, usize> = BTreeMap::new();
    for pixel in pixels.pixels() {
        let [r, g, b] = pixel.0;
        let key = format!("#{:02X}{:02X}{:02X}", r & 0xF0, g & 0xF0, b & 0xF0);
        *counts.entry(key).or_insert(0) += 1;
    }

    let mut ranked: Vec<(String, usize)> = counts.into_iter().collect();
    ranked.sort_by(|a, b| b.1.cmp(&a.1));
    ranked
        .into_iter()
        .take(DOMINANT_COLORS)
        .map(|(color, _)| color)
        .collect()
}

fn quality_metrics(info: &Image, metrics: &PixelMetrics) -> QualityMetrics {
    let resolution_score = resolution_score(info.width, info.height);
    let exposure_score = clamp01(1.0 - (metrics.brightness - 0.5).abs() * 2.0);
    let overall_quality =
        clamp01(0.4 * resolution_score + 0.3 * metrics.sharpness + 0.3 * exposure_score);

    QualityMetrics {
        resolution: format!("{}x{}", info.width, info.height),
        resolution_score,
        sharpness: metrics.sharpness,
        exposure_score,
        overall_quality,
    }
}

fn style_analysis(metrics: &PixelMetrics) -> StyleAnalysis {
    let style = if metrics.saturation > 0.5 {
        "vibrant"
    } else if metrics.saturation < 0.1 {
        "monochrome"
    } else if metrics.brightness > 0.7 {
        "bright"
    } else if metrics.brightness < 0.3 {
        "dark"
    } else {
        "natural"
    };

    let mood = if metrics.brightness > 0.6 && metrics.saturation > 0.4 {
        "cheerful"
    } else if metrics.brightness < 0.35 {
        "moody"
    } else {
        "calm"
    };

    StyleAnalysis {
        style: style.to_string(),
        mood: mood.to_string(),
    }
}
