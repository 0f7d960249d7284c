// image track - classify a picture and describe the top label

use super::classifier::{Classifier, INPUT_SIZE, InputTensor};
use super::enrichment::LabelEnrichment;
use crate::Error;
use image::RgbImage;
use image::imageops::FilterType;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

pub const UNKNOWN_OBJECT: &str = "unknown object";
pub const MIN_CONFIDENCE: f32 = 0.15;
pub const EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "bmp", "gif", "webp"];

const LOW_CONFIDENCE_DESCRIPTION: &str =
    "The classifier could not identify this image with high confidence.";
const LOW_CONFIDENCE_MEANING: &str = "Try uploading a clearer photo or a different angle.";

// resize target for the shorter side before the center crop
const RESIZE_SIZE: u32 = 232;
const MEAN: [f32; 3] = [0.485, 0.456, 0.406];
const STD: [f32; 3] = [0.229, 0.224, 0.225];

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageEntry {
    pub label: String,
    pub description: String,
    pub meaning: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f32>,
}

impl ImageEntry {
    /// Entry shown when the image could not be processed at all.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            label: "unknown".to_string(),
            description: message.into(),
            meaning: "N/A".to_string(),
            confidence: None,
        }
    }
}

pub struct ImageLookup {
    classifier: Arc<dyn Classifier>,
    enrichment: Arc<LabelEnrichment>,
}

impl ImageLookup {
    pub fn new(classifier: Arc<dyn Classifier>, enrichment: Arc<LabelEnrichment>) -> Self {
        Self {
            classifier,
            enrichment,
        }
    }

    pub fn describe(&self, path: &Path) -> Result<ImageEntry, Error> {
        validate_path(path)?;

        let image = image::open(path)?.to_rgb8();
        let input = preprocess(&image);
        let scores = self.classifier.scores(&input)?;
        let entry = self.entry_for(&scores)?;

        tracing::info!(
            path = %path.display(),
            label = %entry.label,
            confidence = %format!("{:.2}%", entry.confidence.unwrap_or_default() * 100.0),
            "prediction"
        );
        Ok(entry)
    }

    // softmax, argmax, threshold, enrichment
    fn entry_for(&self, scores: &[f32]) -> Result<ImageEntry, Error> {
        let probs = softmax(scores);
        let (index, confidence) = probs
            .iter()
            .copied()
            .enumerate()
            .fold(None, |best: Option<(usize, f32)>, (i, p)| match best {
                Some((_, top)) if top >= p => best,
                _ => Some((i, p)),
            })
            .ok_or_else(|| Error::Model("classifier returned no scores".to_string()))?;

        if confidence < MIN_CONFIDENCE {
            return Ok(ImageEntry {
                label: UNKNOWN_OBJECT.to_string(),
                description: LOW_CONFIDENCE_DESCRIPTION.to_string(),
                meaning: LOW_CONFIDENCE_MEANING.to_string(),
                confidence: Some(confidence),
            });
        }

        let label = self
            .classifier
            .labels()
            .get(index)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_OBJECT);
        let text = self.enrichment.describe(label);

        Ok(ImageEntry {
            label: label.to_string(),
            description: text.description,
            meaning: text.meaning,
            confidence: Some(confidence),
        })
    }
}

/// Checks the file exists and carries an accepted image extension.
pub fn validate_path(path: &Path) -> Result<(), Error> {
    if !path.is_file() {
        tracing::error!(path = %path.display(), "file not found");
        return Err(Error::InvalidInput(format!(
            "File not found: {}",
            path.display()
        )));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    if !EXTENSIONS.contains(&ext.as_str()) {
        tracing::error!(ext = %ext, "unsupported file type");
        return Err(Error::InvalidInput(format!(
            "Unsupported image format '.{ext}'. Please use JPG or PNG."
        )));
    }
    Ok(())
}

/// Resize the shorter side, center crop, normalize to ImageNet statistics.
pub fn preprocess(image: &RgbImage) -> InputTensor {
    let (new_w, new_h) = resize_dims(image.width(), image.height());
    let resized = image::imageops::resize(image, new_w, new_h, FilterType::Triangle);
    let left = crop_offset(new_w);
    let top = crop_offset(new_h);
    let cropped = image::imageops::crop_imm(&resized, left, top, INPUT_SIZE, INPUT_SIZE).to_image();

    let side = INPUT_SIZE as usize;
    let plane = side * side;
    let mut data = vec![0.0; 3 * plane];
    for (x, y, pixel) in cropped.enumerate_pixels() {
        let at = y as usize * side + x as usize;
        for c in 0..3 {
            data[c * plane + at] = (pixel[c] as f32 / 255.0 - MEAN[c]) / STD[c];
        }
    }

    InputTensor {
        data,
        channels: 3,
        height: side,
        width: side,
    }
}

// shorter side becomes RESIZE_SIZE, the longer one is scaled and truncated
fn resize_dims(width: u32, height: u32) -> (u32, u32) {
    let (width, height) = (width.max(1) as u64, height.max(1) as u64);
    let size = RESIZE_SIZE as u64;
    if width <= height {
        (size as u32, (size * height / width) as u32)
    } else {
        ((size * width / height) as u32, size as u32)
    }
}

// centered, half-pixel offsets rounded to even
fn crop_offset(length: u32) -> u32 {
    (length.saturating_sub(INPUT_SIZE) as f32 / 2.0).round_ties_even() as u32
}

pub fn softmax(scores: &[f32]) -> Vec<f32> {
    let max = scores.iter().copied().fold(f32::NEG_INFINITY, f32::max);
    let exps: Vec<f32> = scores.iter().map(|s| (s - max).exp()).collect();
    let sum: f32 = exps.iter().sum();
    exps.into_iter().map(|e| e / sum).collect()
}
