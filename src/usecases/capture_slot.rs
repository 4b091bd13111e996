//! Per-slot capture state machine: Empty -> Previewing <-> CapturingLive.
//!
//! One instance per slot (photo, signature), parametrized by `SlotKind`
//! instead of duplicating the flow. Commands are gated by the current state;
//! the camera stream is an exclusive resource and is always stopped before a
//! new one is acquired for the same slot.

use crate::domain::{CapturedMedia, DomainError, FacingMode, SlotKind};
use crate::ports::{CameraPort, CameraStream, FrameEncoder};
use crate::usecases::compression::constrain_snapshot;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Current state of a capture slot, without the stream/media payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotPhase {
    Empty,
    CapturingLive,
    Previewing,
}

enum SlotState {
    Empty,
    CapturingLive {
        stream: Box<dyn CameraStream>,
        /// The facing mode that was requested, kept for switch bookkeeping.
        requested: Option<FacingMode>,
    },
    Previewing {
        media: CapturedMedia,
    },
}

/// One independent unit of image acquisition state.
pub struct CaptureSlot {
    kind: SlotKind,
    camera: Arc<dyn CameraPort>,
    encoder: Arc<dyn FrameEncoder>,
    state: SlotState,
}

impl CaptureSlot {
    pub fn new(kind: SlotKind, camera: Arc<dyn CameraPort>, encoder: Arc<dyn FrameEncoder>) -> Self {
        Self {
            kind,
            camera,
            encoder,
            state: SlotState::Empty,
        }
    }

    pub fn kind(&self) -> SlotKind {
        self.kind
    }

    pub fn phase(&self) -> SlotPhase {
        match self.state {
            SlotState::Empty => SlotPhase::Empty,
            SlotState::CapturingLive { .. } => SlotPhase::CapturingLive,
            SlotState::Previewing { .. } => SlotPhase::Previewing,
        }
    }

    /// The held media while previewing.
    pub fn media(&self) -> Option<&CapturedMedia> {
        match &self.state {
            SlotState::Previewing { media } => Some(media),
            _ => None,
        }
    }

    /// Facing mode of the live session, if one is open.
    pub fn live_facing(&self) -> Option<FacingMode> {
        match &self.state {
            SlotState::CapturingLive { stream, .. } => stream.facing(),
            _ => None,
        }
    }

    /// Accept a user-supplied file body (picker or drag-drop equivalent).
    ///
    /// Valid from `Empty` or `Previewing` (replaces the held media
    /// wholesale). Type and size rules are enforced; no compression is
    /// attempted on uploads.
    pub fn select_upload(&mut self, source_name: &str, bytes: Vec<u8>) -> Result<(), DomainError> {
        if matches!(self.state, SlotState::CapturingLive { .. }) {
            return Err(DomainError::SlotCommand("upload"));
        }
        let media = CapturedMedia::from_upload(source_name, bytes)?;
        info!(
            slot = self.kind.label(),
            source = source_name,
            size = media.size_bytes,
            "upload accepted"
        );
        self.state = SlotState::Previewing { media };
        Ok(())
    }

    /// Read a file from disk and accept it as an upload.
    pub async fn select_file(&mut self, path: &Path) -> Result<(), DomainError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| DomainError::Io(format!("{}: {}", path.display(), e)))?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        self.select_upload(&name, bytes)
    }

    /// Open a live camera session with the requested facing mode.
    ///
    /// Valid from `Empty` or `Previewing` (a retake discards the held
    /// media). Any stream already open for this slot is stopped first. On
    /// `ConstraintUnsatisfiable` the open is retried once with no facing
    /// constraint before the error is surfaced.
    pub async fn open_camera(&mut self, facing: FacingMode) -> Result<(), DomainError> {
        self.stop_live_stream();
        let stream = self.open_with_fallback(facing).await?;
        info!(
            slot = self.kind.label(),
            facing = ?stream.facing(),
            "camera session opened"
        );
        self.state = SlotState::CapturingLive {
            stream,
            requested: Some(facing),
        };
        Ok(())
    }

    /// Switch facing mode in place: tear down the current stream and re-open
    /// with the new mode, re-emitting the permission/availability checks.
    /// Only valid while `CapturingLive`. On failure the slot ends `Empty`
    /// (the old stream is already stopped).
    pub async fn switch_camera(&mut self, facing: FacingMode) -> Result<(), DomainError> {
        if !matches!(self.state, SlotState::CapturingLive { .. }) {
            return Err(DomainError::SlotCommand("switch camera"));
        }
        self.stop_live_stream();
        match self.open_with_fallback(facing).await {
            Ok(stream) => {
                debug!(slot = self.kind.label(), facing = ?stream.facing(), "camera switched");
                self.state = SlotState::CapturingLive {
                    stream,
                    requested: Some(facing),
                };
                Ok(())
            }
            Err(e) => {
                warn!(slot = self.kind.label(), error = %e, "camera switch failed");
                Err(e)
            }
        }
    }

    /// Snapshot the current frame, run it through the size-constraint
    /// pipeline, and move to `Previewing` (stopping the stream).
    ///
    /// On `CompressionExhausted` the session stays live so the user can
    /// retry with different framing or lighting.
    pub async fn capture(&mut self) -> Result<&CapturedMedia, DomainError> {
        let SlotState::CapturingLive { stream, .. } = &mut self.state else {
            return Err(DomainError::SlotCommand("capture"));
        };
        let frame = stream.capture_frame().await?;
        let (bytes, attempts) = constrain_snapshot(&frame, self.encoder.as_ref())?;

        self.stop_live_stream();
        let media = CapturedMedia::from_snapshot(format!("camera-{}.jpg", self.kind.label()), bytes);
        info!(
            slot = self.kind.label(),
            size = media.size_bytes,
            quality = attempts.last().map(|a| a.quality),
            ladder_steps = attempts.len(),
            "snapshot captured"
        );
        self.state = SlotState::Previewing { media };
        match &self.state {
            SlotState::Previewing { media } => Ok(media),
            _ => unreachable!(),
        }
    }

    /// Close the live session without capturing. Idempotent: a no-op unless
    /// `CapturingLive`. Returns to `Empty`.
    pub fn close_camera(&mut self) {
        if matches!(self.state, SlotState::CapturingLive { .. }) {
            self.stop_live_stream();
            debug!(slot = self.kind.label(), "camera session closed");
            self.state = SlotState::Empty;
        }
    }

    /// Discard the held media and return to `Empty`. Only valid while
    /// `Previewing`.
    pub fn remove(&mut self) -> Result<(), DomainError> {
        if !matches!(self.state, SlotState::Previewing { .. }) {
            return Err(DomainError::SlotCommand("remove"));
        }
        debug!(slot = self.kind.label(), "media removed");
        self.state = SlotState::Empty;
        Ok(())
    }

    /// Reset the slot from any state, releasing a live stream if one exists.
    pub fn reset(&mut self) {
        self.stop_live_stream();
        self.state = SlotState::Empty;
    }

    async fn open_with_fallback(
        &self,
        facing: FacingMode,
    ) -> Result<Box<dyn CameraStream>, DomainError> {
        match self.camera.open(Some(facing)).await {
            Err(DomainError::ConstraintUnsatisfiable) => {
                warn!(
                    slot = self.kind.label(),
                    ?facing,
                    "facing mode unavailable, retrying unconstrained"
                );
                self.camera.open(None).await
            }
            other => other,
        }
    }

    /// Stop an open stream so the device is never left running. Leaves
    /// `state` as `Empty`; callers overwrite it right after when needed.
    fn stop_live_stream(&mut self) {
        if let SlotState::CapturingLive { mut stream, .. } =
            std::mem::replace(&mut self.state, SlotState::Empty)
        {
            stream.stop();
        }
    }
}

impl Drop for CaptureSlot {
    fn drop(&mut self) {
        self.stop_live_stream();
    }
}
