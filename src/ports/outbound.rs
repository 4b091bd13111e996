//! Outbound ports. Application calls into infrastructure.
//!
//! Implemented by adapters; the capture-slot and registration use cases are
//! testable by injecting fakes behind these traits.

use crate::domain::{DomainError, FacingMode, Frame, RegistrationReceipt, SubmissionRequest};

/// Camera access. One open call yields one exclusive stream.
#[async_trait::async_trait]
pub trait CameraPort: Send + Sync {
    /// Open a live stream.
    ///
    /// - `facing: Some(_)` requests that physical camera; adapters fail with
    ///   `ConstraintUnsatisfiable` when they cannot honor it.
    /// - `facing: None` is the unconstrained fallback: any available camera.
    ///
    /// # Errors
    /// `PermissionDenied`, `NoDevice`, or `ConstraintUnsatisfiable`.
    async fn open(&self, facing: Option<FacingMode>) -> Result<Box<dyn CameraStream>, DomainError>;
}

/// A live camera session. Exactly one per capture slot at a time; the slot
/// stops any existing stream before acquiring a new one so hardware is never
/// left running.
#[async_trait::async_trait]
pub trait CameraStream: Send + Sync + std::fmt::Debug {
    /// Snapshot the current frame as raw RGB8 pixels.
    async fn capture_frame(&mut self) -> Result<Frame, DomainError>;

    /// The facing mode actually in effect (`None` after an unconstrained
    /// fallback on hardware that does not report one).
    fn facing(&self) -> Option<FacingMode>;

    /// Release the stream. Stopping is the only cancellation primitive;
    /// must be idempotent.
    fn stop(&mut self);
}

/// Still-image JPEG encoder used by the size-constraint pipeline.
///
/// `quality` is in (0, 1]. Encoding must be deterministic: the same frame at
/// the same quality yields the same byte size, so the quality ladder produces
/// the same accept/reject outcome across runs.
pub trait FrameEncoder: Send + Sync {
    fn encode_jpeg(&self, frame: &Frame, quality: f32) -> Result<Vec<u8>, DomainError>;
}

/// Backend registration API.
#[async_trait::async_trait]
pub trait RegistrationApi: Send + Sync {
    /// `GET /api/check-register-number/{full_id}`. Returns whether the
    /// number is already taken. Advisory only: the server re-checks at
    /// submission time.
    async fn check_register_number(&self, full_id: &str) -> Result<bool, DomainError>;

    /// `POST /api/register` (multipart). The MAC field is present on the
    /// wire only when the request carries one.
    async fn register(&self, req: &SubmissionRequest)
    -> Result<RegistrationReceipt, DomainError>;
}
