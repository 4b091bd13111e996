//! JPEG encoder adapter over the `image` crate.
//!
//! The quality ladder works in encoder-agnostic (0, 1] qualities; this maps
//! them onto the crate's 1-100 scale.

use crate::domain::{DomainError, Frame};
use crate::ports::FrameEncoder;
use image::codecs::jpeg::JpegEncoder;
use image::ExtendedColorType;

pub struct ImageRsEncoder;

impl ImageRsEncoder {
    pub fn new() -> Self {
        Self
    }

    fn quality_percent(quality: f32) -> Result<u8, DomainError> {
        if !(quality > 0.0 && quality <= 1.0) {
            return Err(DomainError::Encoder(format!(
                "quality {} outside (0, 1]",
                quality
            )));
        }
        Ok((quality * 100.0).round().clamp(1.0, 100.0) as u8)
    }
}

impl Default for ImageRsEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameEncoder for ImageRsEncoder {
    fn encode_jpeg(&self, frame: &Frame, quality: f32) -> Result<Vec<u8>, DomainError> {
        let percent = Self::quality_percent(quality)?;
        let mut out = Vec::new();
        JpegEncoder::new_with_quality(&mut out, percent)
            .encode(
                &frame.pixels,
                frame.width,
                frame.height,
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| DomainError::Encoder(e.to_string()))?;
        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ImageKind;

    fn noisy_frame(width: u32, height: u32) -> Frame {
        // Pseudo-random content so JPEG cannot compress it to nothing and
        // quality actually changes the output size.
        let mut pixels = Vec::with_capacity((width * height * 3) as usize);
        let mut x: u32 = 0x12345678;
        for _ in 0..width * height * 3 {
            x = x.wrapping_mul(1664525).wrapping_add(1013904223);
            pixels.push((x >> 24) as u8);
        }
        Frame::rgb8(width, height, pixels).unwrap()
    }

    #[test]
    fn output_is_jpeg() {
        let enc = ImageRsEncoder::new();
        let bytes = enc.encode_jpeg(&noisy_frame(32, 32), 0.9).unwrap();
        assert_eq!(ImageKind::detect(&bytes), Some(ImageKind::Jpeg));
    }

    #[test]
    fn lower_quality_is_not_larger() {
        let enc = ImageRsEncoder::new();
        let frame = noisy_frame(64, 64);
        let high = enc.encode_jpeg(&frame, 0.9).unwrap();
        let low = enc.encode_jpeg(&frame, 0.4).unwrap();
        assert!(low.len() <= high.len());
    }

    #[test]
    fn encoding_is_deterministic() {
        let enc = ImageRsEncoder::new();
        let frame = noisy_frame(16, 16);
        assert_eq!(
            enc.encode_jpeg(&frame, 0.7).unwrap(),
            enc.encode_jpeg(&frame, 0.7).unwrap()
        );
    }

    #[test]
    fn rejects_quality_out_of_range() {
        let enc = ImageRsEncoder::new();
        let frame = noisy_frame(4, 4);
        assert!(enc.encode_jpeg(&frame, 0.0).is_err());
        assert!(enc.encode_jpeg(&frame, 1.5).is_err());
    }
}
