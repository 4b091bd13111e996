//! Size-constraint pipeline for camera snapshots.
//!
//! Only camera captures can exceed the ceiling (uploads over it are rejected
//! outright), so this is the only compression path. The snapshot is encoded
//! at 0.9; if that is over the limit a fixed descending quality ladder is
//! tried, stopping at the first level that fits. Resolution is never
//! reduced, quality only.

use crate::domain::{DomainError, Frame, MAX_MEDIA_BYTES};
use crate::ports::FrameEncoder;
use tracing::{debug, warn};

/// Quality for the initial encode of a captured frame.
pub const SNAPSHOT_QUALITY: f32 = 0.9;

/// Descending qualities tried when the initial encode is over the ceiling.
pub const QUALITY_LADDER: [f32; 4] = [0.7, 0.6, 0.5, 0.4];

/// One (quality, size) pair from the ladder, in the order tried.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CompressionAttempt {
    pub quality: f32,
    pub size_bytes: usize,
}

/// Encode `frame` under the byte ceiling.
///
/// Returns the accepted JPEG bytes together with the full ordered attempt
/// sequence. Deterministic for a given frame and encoder.
///
/// # Errors
/// `CompressionExhausted` when the lowest ladder step still exceeds the
/// ceiling; the caller keeps the camera session alive so the user can retry
/// with different framing or lighting.
pub fn constrain_snapshot(
    frame: &Frame,
    encoder: &dyn FrameEncoder,
) -> Result<(Vec<u8>, Vec<CompressionAttempt>), DomainError> {
    let mut attempts = Vec::with_capacity(1 + QUALITY_LADDER.len());

    let initial = encoder.encode_jpeg(frame, SNAPSHOT_QUALITY)?;
    attempts.push(CompressionAttempt {
        quality: SNAPSHOT_QUALITY,
        size_bytes: initial.len(),
    });
    if initial.len() <= MAX_MEDIA_BYTES {
        return Ok((initial, attempts));
    }

    for quality in QUALITY_LADDER {
        let encoded = encoder.encode_jpeg(frame, quality)?;
        debug!(
            quality,
            size = encoded.len(),
            limit = MAX_MEDIA_BYTES,
            "quality ladder step"
        );
        attempts.push(CompressionAttempt {
            quality,
            size_bytes: encoded.len(),
        });
        if encoded.len() <= MAX_MEDIA_BYTES {
            return Ok((encoded, attempts));
        }
    }

    warn!(
        width = frame.width,
        height = frame.height,
        attempts = attempts.len(),
        "snapshot over size limit at lowest quality"
    );
    Err(DomainError::CompressionExhausted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    /// Encoder stub: maps each quality to a fixed output size and records
    /// the order qualities were requested in.
    struct StubEncoder {
        size_for: fn(f32) -> usize,
        calls: Mutex<Vec<f32>>,
    }

    impl StubEncoder {
        fn new(size_for: fn(f32) -> usize) -> Self {
            Self {
                size_for,
                calls: Mutex::new(Vec::new()),
            }
        }

        fn calls(&self) -> Vec<f32> {
            self.calls.lock().unwrap().clone()
        }
    }

    impl FrameEncoder for StubEncoder {
        fn encode_jpeg(&self, _frame: &Frame, quality: f32) -> Result<Vec<u8>, DomainError> {
            self.calls.lock().unwrap().push(quality);
            Ok(vec![0u8; (self.size_for)(quality)])
        }
    }

    fn frame() -> Frame {
        Frame::rgb8(2, 2, vec![0u8; 12]).unwrap()
    }

    #[test]
    fn accepts_initial_encode_when_under_limit() {
        let enc = StubEncoder::new(|_| 100 * 1024);
        let (bytes, attempts) = constrain_snapshot(&frame(), &enc).unwrap();
        assert_eq!(bytes.len(), 100 * 1024);
        assert_eq!(enc.calls(), vec![0.9]);
        assert_eq!(attempts.len(), 1);
    }

    #[test]
    fn ladder_tried_in_strictly_decreasing_order() {
        // Fits only at 0.5.
        let enc = StubEncoder::new(|q| {
            if q <= 0.5 {
                400 * 1024
            } else {
                600 * 1024
            }
        });
        let (bytes, attempts) = constrain_snapshot(&frame(), &enc).unwrap();
        assert_eq!(bytes.len(), 400 * 1024);
        assert_eq!(enc.calls(), vec![0.9, 0.7, 0.6, 0.5]);
        let qualities: Vec<f32> = attempts.iter().map(|a| a.quality).collect();
        assert!(qualities.windows(2).all(|w| w[0] > w[1]));
    }

    #[test]
    fn stops_at_first_fit() {
        let enc = StubEncoder::new(|q| {
            if q <= 0.7 {
                MAX_MEDIA_BYTES
            } else {
                MAX_MEDIA_BYTES + 1
            }
        });
        let (bytes, _) = constrain_snapshot(&frame(), &enc).unwrap();
        assert_eq!(bytes.len(), MAX_MEDIA_BYTES);
        assert_eq!(enc.calls(), vec![0.9, 0.7]);
    }

    #[test]
    fn exhausts_when_lowest_quality_still_over() {
        let enc = StubEncoder::new(|_| MAX_MEDIA_BYTES + 1);
        let err = constrain_snapshot(&frame(), &enc).unwrap_err();
        assert!(matches!(err, DomainError::CompressionExhausted));
        assert_eq!(enc.calls(), vec![0.9, 0.7, 0.6, 0.5, 0.4]);
    }

    #[test]
    fn deterministic_across_runs() {
        let size_for = |q: f32| if q <= 0.6 { 300 * 1024 } else { 700 * 1024 };
        let a = {
            let enc = StubEncoder::new(size_for);
            constrain_snapshot(&frame(), &enc).unwrap().1
        };
        let b = {
            let enc = StubEncoder::new(size_for);
            constrain_snapshot(&frame(), &enc).unwrap().1
        };
        assert_eq!(a, b);
    }
}
