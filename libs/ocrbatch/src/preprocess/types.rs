use serde::{Deserialize, Serialize};

/// An image-correction step applied before recognition.
///
/// The set is closed: it mirrors the preprocessing operations the OCR backend
/// benefits from, not an extension point.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// Detect the dominant text-line angle and rotate to level it.
    AutoSkew,
    Grayscale,
    Invert,
    /// Binarize against a fixed luma threshold.
    Threshold(u8),
    /// Rotate by a fixed angle in degrees.
    Rotate(f32),
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Filter::AutoSkew => write!(f, "AutoSkew"),
            Filter::Grayscale => write!(f, "Grayscale"),
            Filter::Invert => write!(f, "Invert"),
            Filter::Threshold(level) => write!(f, "Threshold({})", level),
            Filter::Rotate(degrees) => write!(f, "Rotate({})", degrees),
        }
    }
}
