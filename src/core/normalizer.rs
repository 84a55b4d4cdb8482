//! Turns uploaded image bytes into the fixed model input tensor.

use crate::domain::model::{NormalizedTensor, INPUT_CHANNELS, INPUT_SIZE};
use crate::utils::error::{Result, ServiceError};
use image::imageops::{self, FilterType};
use ndarray::Array4;

const IMAGE_MEDIA_PREFIX: &str = "image/";

#[derive(Debug, Clone, Copy)]
pub struct ImageNormalizer {
    target_size: u32,
    filter: FilterType,
}

impl Default for ImageNormalizer {
    fn default() -> Self {
        Self {
            target_size: INPUT_SIZE as u32,
            filter: FilterType::CatmullRom,
        }
    }
}

impl ImageNormalizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cheap media-type check, done before any decoding.
    pub fn check_media_type(media_type: &str) -> Result<()> {
        if media_type.starts_with(IMAGE_MEDIA_PREFIX) {
            Ok(())
        } else {
            Err(ServiceError::InvalidInputKind {
                media_type: media_type.to_string(),
            })
        }
    }

    pub fn normalize(&self, bytes: &[u8], media_type: &str) -> Result<NormalizedTensor> {
        Self::check_media_type(media_type)?;

        let decoded = image::load_from_memory(bytes).map_err(|e| ServiceError::DecodeError {
            message: e.to_string(),
        })?;
        tracing::debug!(
            width = decoded.width(),
            height = decoded.height(),
            color = ?decoded.color(),
            "Decoded image"
        );

        // palette, grayscale and alpha images all flatten to plain RGB
        let rgb = decoded.to_rgb8();
        let resized = imageops::resize(&rgb, self.target_size, self.target_size, self.filter);

        let size = self.target_size as usize;
        let array = Array4::from_shape_fn((1, size, size, INPUT_CHANNELS), |(_, y, x, c)| {
            f32::from(resized.get_pixel(x as u32, y as u32)[c]) / 255.0
        });

        Ok(NormalizedTensor::from_array(array))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
    use std::io::Cursor;

    fn png_bytes(image: DynamicImage) -> Vec<u8> {
        let mut buffer = Cursor::new(Vec::new());
        image.write_to(&mut buffer, ImageFormat::Png).unwrap();
        buffer.into_inner()
    }

    #[test]
    fn test_media_type_must_be_image() {
        assert!(ImageNormalizer::check_media_type("image/png").is_ok());
        assert!(ImageNormalizer::check_media_type("image/jpeg").is_ok());
        assert!(matches!(
            ImageNormalizer::check_media_type("application/pdf"),
            Err(ServiceError::InvalidInputKind { .. })
        ));
        assert!(ImageNormalizer::check_media_type("").is_err());
    }

    #[test]
    fn test_black_image_maps_to_zero() {
        let black = DynamicImage::ImageRgb8(RgbImage::from_pixel(30, 30, Rgb([0, 0, 0])));
        let tensor = ImageNormalizer::new()
            .normalize(&png_bytes(black), "image/png")
            .unwrap();
        assert!(tensor.values().all(|v| v == 0.0));
    }

    #[test]
    fn test_channel_order_is_rgb() {
        let red = DynamicImage::ImageRgb8(RgbImage::from_pixel(8, 8, Rgb([255, 0, 0])));
        let tensor = ImageNormalizer::new()
            .normalize(&png_bytes(red), "image/png")
            .unwrap();
        let view = tensor.view();
        assert_eq!(view[[0, 100, 100, 0]], 1.0);
        assert_eq!(view[[0, 100, 100, 1]], 0.0);
        assert_eq!(view[[0, 100, 100, 2]], 0.0);
    }

    #[test]
    fn test_decode_error_keeps_decoder_message() {
        let err = ImageNormalizer::new()
            .normalize(b"\x89PNG\r\n\x1a\ntruncated", "image/png")
            .unwrap_err();
        match err {
            ServiceError::DecodeError { message } => assert!(!message.is_empty()),
            other => panic!("expected DecodeError, got {:?}", other),
        }
    }
}
