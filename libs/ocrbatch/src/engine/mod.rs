mod tesseract;
mod types;

pub use tesseract::TesseractEngine;
pub use types::{InputType, OcrConfig, OcrInput, RecognitionResult};

use anyhow::Result;

/// The black-box recognition seam. Implementations receive an already
/// validated request and return one result per submitted image, in
/// submission order.
pub trait OcrEngine {
    fn recognize(&self, input: &OcrInput) -> Result<Vec<RecognitionResult>>;
}

/// Validates the request, then hands it to the engine.
pub async fn process_batch(
    engine: &dyn OcrEngine,
    input: &OcrInput,
) -> Result<Vec<RecognitionResult>> {
    input.validate()?;
    engine.recognize(input)
}
