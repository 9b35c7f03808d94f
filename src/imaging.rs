//! Decoding, minimum-size upscaling and crop/resize of source images.

use crate::error::{Result, TrimError};
use crate::geometry::SourceRect;
use image::imageops::{self, FilterType};
use image::{DynamicImage, RgbaImage};
use std::path::Path;

/// Extensions offered in the file picker and accepted on the command line.
pub const SUPPORTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg"];

/// Returns true if `path` has one of the supported image extensions.
pub fn is_supported(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext.eq_ignore_ascii_case(supported))
        })
}

/// Size an image of `width` x `height` must be upscaled to so that its
/// smaller side is `minimum`, or `None` if both sides already reach it.
///
/// The larger side is scaled by the same factor and truncated.
pub fn minimum_size(width: u32, height: u32, minimum: u32) -> Option<(u32, u32)> {
    if width >= minimum && height >= minimum {
        return None;
    }
    let (w, h, min) = (u64::from(width.max(1)), u64::from(height.max(1)), u64::from(minimum));
    let size = if w < h {
        (min, h * min / w)
    } else {
        (w * min / h, min)
    };
    Some((size.0 as u32, size.1 as u32))
}

/// Upscales `image` so that neither side is below `minimum`.
pub fn upscale_to_minimum(image: DynamicImage, minimum: u32) -> DynamicImage {
    match minimum_size(image.width(), image.height(), minimum) {
        Some((width, height)) => {
            log::debug!(
                "Upscaling {}x{} source to {width}x{height}",
                image.width(),
                image.height()
            );
            image.resize_exact(width, height, FilterType::Lanczos3)
        }
        None => image,
    }
}

/// Decodes the image at `path` and applies the minimum-size upscale.
pub fn open_source(path: &Path, minimum: u32) -> Result<DynamicImage> {
    let image = image::open(path).map_err(|source| TrimError::Decode {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(upscale_to_minimum(image, minimum))
}

/// Cuts `rect` out of the unzoomed source and resizes it to exactly
/// `width` x `height` with a bicubic filter.
pub fn crop_and_resize(image: &DynamicImage, rect: SourceRect, width: u32, height: u32) -> RgbaImage {
    let (x, y, w, h) = rect.to_pixels(image.width(), image.height());
    let cropped = image.crop_imm(x, y, w, h).to_rgba8();
    imageops::resize(&cropped, width, height, FilterType::CatmullRom)
}

/// Decoded image data ready for texture creation.
pub struct DecodedImage {
    pub pixels: Vec<u8>,
    pub width: u32,
    pub height: u32,
}

impl From<&DynamicImage> for DecodedImage {
    fn from(image: &DynamicImage) -> Self {
        let rgba = image.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self {
            pixels: rgba.into_raw(),
            width,
            height,
        }
    }
}
