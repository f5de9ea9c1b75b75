use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::common::get_current_timestamp_str;
use crate::preprocess::Filter;

use anyhow::Result;

/// Shape of the image collection submitted for recognition.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputType {
    SingleImage,
    MultiImage,
    Pdf,
}

impl std::fmt::Display for InputType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            InputType::SingleImage => write!(f, "SingleImage"),
            InputType::MultiImage => write!(f, "MultiImage"),
            InputType::Pdf => write!(f, "Pdf"),
        }
    }
}

/// One recognition request: ordered image paths, an input-type tag and the
/// preprocessing filters to apply to each image before recognition.
#[derive(Clone, Debug)]
pub struct OcrInput {
    images: Vec<PathBuf>,
    input_type: InputType,
    filters: Vec<Filter>,
}

impl OcrInput {
    pub fn new(input_type: InputType, filters: Vec<Filter>) -> Self {
        Self {
            images: Vec::new(),
            input_type,
            filters,
        }
    }

    pub fn add(&mut self, path: impl Into<PathBuf>) {
        self.images.push(path.into());
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn input_type(&self) -> InputType {
        self.input_type
    }

    pub fn filters(&self) -> &[Filter] {
        &self.filters
    }

    /// Rejects a request whose tag does not match the shape of the image
    /// list, instead of handing the mismatch to an engine whose behavior on
    /// it is unspecified.
    pub fn validate(&self) -> Result<()> {
        match self.input_type {
            InputType::SingleImage if self.images.len() != 1 => Err(anyhow::anyhow!(
                "Input type {} requires exactly one image, got {}",
                self.input_type,
                self.images.len()
            )),
            InputType::MultiImage if self.images.is_empty() => Err(anyhow::anyhow!(
                "Input type {} requires at least one image",
                self.input_type
            )),
            InputType::Pdf => Err(anyhow::anyhow!(
                "Input type {} is not supported by this backend",
                self.input_type
            )),
            _ => Ok(()),
        }
    }
}

/// The engine's output for one processed image.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RecognitionResult {
    pub source: PathBuf,
    pub text: String,
    pub timestamp: String,
}

impl RecognitionResult {
    pub fn new(source: &Path, text: String) -> Self {
        Self {
            source: source.to_path_buf(),
            text,
            timestamp: get_current_timestamp_str(),
        }
    }
}

#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct OcrConfig {
    pub lang: Option<String>,
    pub bounding_boxes: Option<bool>, // add normalized coordinates of the text
    pub dpi: Option<u32>,             // dots per inch
    pub psm: Option<u32>,             // Page segmentation mode
    pub oem: Option<u32>,             // OCR Engine Mode
}

impl OcrConfig {
    pub fn get_default_lang() -> String {
        "eng".to_string()
    }

    pub fn get_default_bounding_boxes() -> bool {
        false
    }

    pub fn get_default_dpi() -> u32 {
        600
    }

    pub fn get_default_psm() -> u32 {
        1
    }

    pub fn get_default_oem() -> u32 {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_single_image() {
        let mut input = OcrInput::new(InputType::SingleImage, vec![]);
        assert!(input.validate().is_err());

        input.add("a.jpg");
        assert!(input.validate().is_ok());

        input.add("b.jpg");
        assert!(input.validate().is_err());
    }

    #[test]
    fn test_validate_multi_image() {
        let mut input = OcrInput::new(InputType::MultiImage, vec![]);
        assert!(input.validate().is_err());

        input.add("a.jpg");
        input.add("b.jpg");
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_validate_pdf_unsupported() {
        let mut input = OcrInput::new(InputType::Pdf, vec![]);
        input.add("a.pdf");
        let err = input.validate().unwrap_err();
        assert!(err.to_string().contains("not supported"));
    }

    #[test]
    fn test_images_keep_submission_order() {
        let mut input = OcrInput::new(InputType::MultiImage, vec![]);
        input.add("first.jpg");
        input.add("second.jpg");
        let names: Vec<_> = input.images().iter().map(|p| p.display().to_string()).collect();
        assert_eq!(names, vec!["first.jpg", "second.jpg"]);
    }
}
