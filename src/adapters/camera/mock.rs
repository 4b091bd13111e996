//! Mock camera for tests and for running without any frame source
//! configured.
//!
//! Behavior is fixed at construction so every failure mode of a real device
//! (denied permission, missing hardware, unsatisfiable facing constraint)
//! can be exercised deterministically.

use crate::domain::{DomainError, FacingMode, Frame};
use crate::ports::{CameraPort, CameraStream};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// How the mock responds to `open`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MockBehavior {
    /// Open always succeeds.
    Ready,
    /// Every open fails with `PermissionDenied`.
    DenyPermission,
    /// Every open fails with `NoDevice`.
    NoHardware,
    /// Opens with a facing constraint fail with `ConstraintUnsatisfiable`;
    /// the unconstrained fallback succeeds.
    RejectFacing,
}

pub struct MockCamera {
    behavior: MockBehavior,
    width: u32,
    height: u32,
    /// Streams currently open (incremented on open, decremented on stop).
    open_streams: Arc<AtomicUsize>,
    open_attempts: AtomicUsize,
}

impl MockCamera {
    pub fn new(behavior: MockBehavior) -> Self {
        Self::with_resolution(behavior, 640, 480)
    }

    pub fn with_resolution(behavior: MockBehavior, width: u32, height: u32) -> Self {
        Self {
            behavior,
            width,
            height,
            open_streams: Arc::new(AtomicUsize::new(0)),
            open_attempts: AtomicUsize::new(0),
        }
    }

    /// Number of streams open right now. Non-zero after a slot is dropped or
    /// closed means a leaked hardware handle.
    pub fn open_streams(&self) -> usize {
        self.open_streams.load(Ordering::SeqCst)
    }

    /// Total `open` calls, including failed ones.
    pub fn open_attempts(&self) -> usize {
        self.open_attempts.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl CameraPort for MockCamera {
    async fn open(&self, facing: Option<FacingMode>) -> Result<Box<dyn CameraStream>, DomainError> {
        self.open_attempts.fetch_add(1, Ordering::SeqCst);
        match self.behavior {
            MockBehavior::DenyPermission => return Err(DomainError::PermissionDenied),
            MockBehavior::NoHardware => return Err(DomainError::NoDevice),
            MockBehavior::RejectFacing if facing.is_some() => {
                return Err(DomainError::ConstraintUnsatisfiable);
            }
            _ => {}
        }
        self.open_streams.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(MockStream {
            facing,
            width: self.width,
            height: self.height,
            open_streams: Arc::clone(&self.open_streams),
            stopped: false,
        }))
    }
}

#[derive(Debug)]
struct MockStream {
    facing: Option<FacingMode>,
    width: u32,
    height: u32,
    open_streams: Arc<AtomicUsize>,
    stopped: bool,
}

#[async_trait::async_trait]
impl CameraStream for MockStream {
    async fn capture_frame(&mut self) -> Result<Frame, DomainError> {
        if self.stopped {
            return Err(DomainError::NoDevice);
        }
        // Mid-gray frame; content is irrelevant, size must match.
        let pixels = vec![0x80u8; (self.width as usize) * (self.height as usize) * 3];
        Ok(Frame {
            width: self.width,
            height: self.height,
            pixels,
        })
    }

    fn facing(&self) -> Option<FacingMode> {
        self.facing
    }

    fn stop(&mut self) {
        if !self.stopped {
            self.stopped = true;
            self.open_streams.fetch_sub(1, Ordering::SeqCst);
        }
    }
}

impl Drop for MockStream {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn ready_mock_serves_frames() {
        let camera = MockCamera::with_resolution(MockBehavior::Ready, 4, 2);
        let mut stream = camera.open(Some(FacingMode::Front)).await.unwrap();
        let frame = stream.capture_frame().await.unwrap();
        assert_eq!((frame.width, frame.height), (4, 2));
        assert_eq!(frame.pixels.len(), 4 * 2 * 3);
        assert_eq!(stream.facing(), Some(FacingMode::Front));
    }

    #[tokio::test]
    async fn dropping_a_stream_releases_it() {
        let camera = MockCamera::new(MockBehavior::Ready);
        let stream = camera.open(None).await.unwrap();
        assert_eq!(camera.open_streams(), 1);
        drop(stream);
        assert_eq!(camera.open_streams(), 0);
    }

    #[tokio::test]
    async fn stopped_stream_refuses_capture() {
        let camera = MockCamera::new(MockBehavior::Ready);
        let mut stream = camera.open(None).await.unwrap();
        stream.stop();
        assert!(stream.capture_frame().await.is_err());
    }
}
