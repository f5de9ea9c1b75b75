use image::{DynamicImage, GrayImage, ImageBuffer, Luma, Rgba};
use imageproc::contrast::otsu_level;
use imageproc::geometric_transformations::{rotate_about_center, Interpolation};

use super::types::Filter;

/// Sweep range for skew detection, in degrees either side of level.
const SKEW_SWEEP_DEGREES: f32 = 15.0;
const SKEW_STEP_DEGREES: f32 = 0.5;
/// Angles below this are treated as already level.
const SKEW_MIN_DEGREES: f32 = 0.1;
/// Detection runs on a downscaled copy so the sweep stays cheap on photos.
const SKEW_MAX_DETECT_WIDTH: u32 = 800;

/// Applies the filters in order. An empty list returns the image unchanged.
pub fn apply_filters(image: DynamicImage, filters: &[Filter]) -> DynamicImage {
    filters.iter().fold(image, |img, filter| {
        log::debug!("Applying filter {}", filter);
        apply_filter(img, *filter)
    })
}

fn apply_filter(image: DynamicImage, filter: Filter) -> DynamicImage {
    match filter {
        Filter::AutoSkew => auto_skew(image),
        Filter::Grayscale => DynamicImage::ImageLuma8(image.to_luma8()),
        Filter::Invert => {
            let mut img = image;
            image::imageops::invert(&mut img);
            img
        }
        Filter::Threshold(level) => threshold(&image, level),
        Filter::Rotate(degrees) => rotate(&image, degrees),
    }
}

fn threshold(image: &DynamicImage, level: u8) -> DynamicImage {
    let gray = image.to_luma8();
    let binary = ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        if gray.get_pixel(x, y)[0] > level {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    });
    DynamicImage::ImageLuma8(binary)
}

fn rotate(image: &DynamicImage, degrees: f32) -> DynamicImage {
    let rgba = image.to_rgba8();
    let rotated = rotate_about_center(
        &rgba,
        degrees.to_radians(),
        Interpolation::Bilinear,
        Rgba([255u8, 255u8, 255u8, 255u8]),
    );
    DynamicImage::ImageRgba8(rotated)
}

fn auto_skew(image: DynamicImage) -> DynamicImage {
    let angle = detect_skew_angle(&image);
    if angle.abs() < SKEW_MIN_DEGREES {
        log::debug!("Skew of {:.2} degrees below threshold, leaving image untouched", angle);
        return image;
    }
    log::debug!("Correcting skew by rotating {:.2} degrees", angle);
    rotate(&image, angle)
}

/// Returns the rotation (in degrees) that best aligns text lines
/// horizontally, found by maximizing the variance of horizontal projection
/// profiles over a binarized copy.
fn detect_skew_angle(image: &DynamicImage) -> f32 {
    let binary = binarize_for_detection(image);

    let mut best_angle = 0.0f32;
    let mut best_score = projection_variance(&binary);

    let steps = (2.0 * SKEW_SWEEP_DEGREES / SKEW_STEP_DEGREES) as i32;
    for step in 0..=steps {
        let angle = -SKEW_SWEEP_DEGREES + step as f32 * SKEW_STEP_DEGREES;
        if angle.abs() < f32::EPSILON {
            continue;
        }
        let rotated = rotate_about_center(
            &binary,
            angle.to_radians(),
            Interpolation::Nearest,
            Luma([0u8]),
        );
        let score = projection_variance(&rotated);
        if score > best_score {
            best_score = score;
            best_angle = angle;
        }
    }

    best_angle
}

/// Grayscale, downscale, then Otsu-binarize with text pixels as foreground.
fn binarize_for_detection(image: &DynamicImage) -> GrayImage {
    let gray = image.to_luma8();
    let gray = if gray.width() > SKEW_MAX_DETECT_WIDTH {
        let scale = SKEW_MAX_DETECT_WIDTH as f32 / gray.width() as f32;
        let height = ((gray.height() as f32 * scale) as u32).max(1);
        image::imageops::resize(
            &gray,
            SKEW_MAX_DETECT_WIDTH,
            height,
            image::imageops::FilterType::Triangle,
        )
    } else {
        gray
    };

    let level = otsu_level(&gray);
    ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
        // Dark ink on light paper, so foreground is below the threshold.
        if gray.get_pixel(x, y)[0] <= level {
            Luma([255u8])
        } else {
            Luma([0u8])
        }
    })
}

/// Variance of per-row foreground counts. Level text concentrates ink into
/// few rows and leaves the rest empty, which maximizes this score.
fn projection_variance(binary: &GrayImage) -> f64 {
    let height = binary.height();
    if height == 0 {
        return 0.0;
    }

    let mut row_sums = vec![0u64; height as usize];
    for (_, y, pixel) in binary.enumerate_pixels() {
        if pixel[0] > 0 {
            row_sums[y as usize] += 1;
        }
    }

    let mean = row_sums.iter().sum::<u64>() as f64 / height as f64;
    row_sums
        .iter()
        .map(|&sum| {
            let diff = sum as f64 - mean;
            diff * diff
        })
        .sum::<f64>()
        / height as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    /// White page with horizontal black stripes, a stand-in for text lines.
    fn striped_image(width: u32, height: u32) -> DynamicImage {
        let img = ImageBuffer::from_fn(width, height, |_, y| {
            if y % 20 < 6 {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        });
        DynamicImage::ImageLuma8(img)
    }

    #[test]
    fn test_empty_filter_list_is_identity() {
        let img = striped_image(64, 64);
        let out = apply_filters(img.clone(), &[]);
        assert_eq!(img.to_luma8().as_raw(), out.to_luma8().as_raw());
    }

    #[test]
    fn test_threshold_is_binary() {
        let img = striped_image(32, 32);
        let out = apply_filters(img, &[Filter::Threshold(128)]);
        assert!(out
            .to_luma8()
            .pixels()
            .all(|p| p[0] == 0 || p[0] == 255));
    }

    #[test]
    fn test_invert_flips_luma() {
        let img = DynamicImage::ImageLuma8(ImageBuffer::from_pixel(4, 4, Luma([0u8])));
        let out = apply_filters(img, &[Filter::Invert]);
        assert!(out.to_luma8().pixels().all(|p| p[0] == 255));
    }

    #[test]
    fn test_rotate_preserves_dimensions() {
        let img = striped_image(50, 30);
        let out = apply_filters(img, &[Filter::Rotate(7.0)]);
        assert_eq!((out.width(), out.height()), (50, 30));
    }

    #[test]
    fn test_detect_skew_angle_level_image() {
        let img = striped_image(200, 200);
        let angle = detect_skew_angle(&img);
        assert!(angle.abs() < SKEW_MIN_DEGREES, "got {}", angle);
    }

    #[test]
    fn test_detect_skew_angle_skewed_image() {
        let img = striped_image(200, 200);
        let skewed = apply_filters(img, &[Filter::Rotate(4.0)]);
        let angle = detect_skew_angle(&skewed);
        // The correction should undo the rotation we just applied.
        assert!((angle + 4.0).abs() <= 1.0, "got {}", angle);
    }

    #[test]
    fn test_auto_skew_leaves_level_image_untouched() {
        let img = striped_image(200, 200);
        let out = apply_filters(img.clone(), &[Filter::AutoSkew]);
        assert_eq!(img.to_luma8().as_raw(), out.to_luma8().as_raw());
    }
}
