use anyhow::Result;
use image::DynamicImage;
use rusty_tesseract::{Args, DataOutput, Image};
use std::collections::HashMap;

use super::types::{OcrConfig, OcrInput, RecognitionResult};
use super::OcrEngine;
use crate::preprocess::apply_filters;

/// Recognition backed by the system `tesseract` binary.
pub struct TesseractEngine {
    config: OcrConfig,
}

impl TesseractEngine {
    pub fn new(config: OcrConfig) -> Self {
        Self { config }
    }
}

impl OcrEngine for TesseractEngine {
    fn recognize(&self, input: &OcrInput) -> Result<Vec<RecognitionResult>> {
        let mut results = Vec::with_capacity(input.images().len());
        for path in input.images() {
            let image = image::open(path)
                .map_err(|e| anyhow::anyhow!("Failed to load image from {}: {}", path.display(), e))?;
            let image = apply_filters(image, input.filters());
            let text = perform_ocr_tesseract(&image, &self.config)?;
            results.push(RecognitionResult::new(path, text));
        }
        Ok(results)
    }
}

fn perform_ocr_tesseract(image: &DynamicImage, config: &OcrConfig) -> Result<String> {
    let args = Args {
        lang: config.lang.clone().unwrap_or_else(OcrConfig::get_default_lang),
        config_variables: HashMap::from([("tessedit_create_tsv".into(), "1".into())]),
        dpi: Some(config.dpi.unwrap_or(OcrConfig::get_default_dpi()) as i32),
        psm: Some(config.psm.unwrap_or(OcrConfig::get_default_psm()) as i32),
        oem: Some(config.oem.unwrap_or(OcrConfig::get_default_oem()) as i32),
    };

    let ocr_image = Image::from_dynamic_image(image)
        .map_err(|e| anyhow::anyhow!("Failed to prepare image for tesseract: {:?}", e))?;

    let data_output = rusty_tesseract::image_to_data(&ocr_image, &args)
        .map_err(|e| anyhow::anyhow!("Tesseract invocation failed: {:?}", e))?;

    Ok(data_output_to_text(
        &data_output,
        config
            .bounding_boxes
            .unwrap_or(OcrConfig::get_default_bounding_boxes()),
    ))
}

fn data_output_to_text(data_output: &DataOutput, add_bounding_boxes: bool) -> String {
    let (width, height) = data_output
        .data
        .first()
        .map(|line| (line.width as f32, line.height as f32))
        .unwrap_or((1.0, 1.0));

    data_output
        .data
        .iter()
        .filter(|line| !line.text.is_empty())
        .map(|line| {
            if add_bounding_boxes {
                // Normalize top-left corner coordinates to 0-1 range
                let x = line.left as f32 / width;
                let y = line.top as f32 / height;

                format!("({:.2}, {:.2}) {}", x, y, line.text)
            } else {
                line.text.clone()
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}
