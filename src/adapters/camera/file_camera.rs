//! File-backed camera. Serves "live" frames decoded from still images on
//! disk, one per facing mode.
//!
//! Lets the full capture flow (open, preview, switch, snapshot, ladder) run
//! on machines without camera hardware: drop `front.jpg` and/or `rear.jpg`
//! into the configured directory. Missing directory means no device at all;
//! a missing facing file is an unsatisfiable constraint (and the
//! unconstrained fallback picks whichever file exists).

use crate::domain::{DomainError, FacingMode, Frame};
use crate::ports::{CameraPort, CameraStream};
use std::path::{Path, PathBuf};
use tracing::debug;

fn frame_file(facing: FacingMode) -> &'static str {
    match facing {
        FacingMode::Front => "front.jpg",
        FacingMode::Rear => "rear.jpg",
    }
}

pub struct FileCamera {
    frames_dir: PathBuf,
}

impl FileCamera {
    pub fn new(frames_dir: impl AsRef<Path>) -> Self {
        Self {
            frames_dir: frames_dir.as_ref().to_path_buf(),
        }
    }

    fn path_for(&self, facing: FacingMode) -> PathBuf {
        self.frames_dir.join(frame_file(facing))
    }

    async fn resolve(&self, facing: Option<FacingMode>) -> Result<(PathBuf, Option<FacingMode>), DomainError> {
        if !tokio::fs::try_exists(&self.frames_dir).await.unwrap_or(false) {
            return Err(DomainError::NoDevice);
        }
        match facing {
            Some(f) => {
                let path = self.path_for(f);
                if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                    Ok((path, Some(f)))
                } else {
                    Err(DomainError::ConstraintUnsatisfiable)
                }
            }
            None => {
                for f in [FacingMode::Front, FacingMode::Rear] {
                    let path = self.path_for(f);
                    if tokio::fs::try_exists(&path).await.unwrap_or(false) {
                        return Ok((path, Some(f)));
                    }
                }
                Err(DomainError::NoDevice)
            }
        }
    }
}

#[async_trait::async_trait]
impl CameraPort for FileCamera {
    async fn open(&self, facing: Option<FacingMode>) -> Result<Box<dyn CameraStream>, DomainError> {
        let (path, facing) = self.resolve(facing).await?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|e| DomainError::Io(format!("{}: {}", path.display(), e)))?;
        let decoded = image::load_from_memory(&bytes)
            .map_err(|e| DomainError::Encoder(format!("decode {}: {}", path.display(), e)))?
            .to_rgb8();
        debug!(path = %path.display(), width = decoded.width(), "file camera stream opened");

        let frame = Frame {
            width: decoded.width(),
            height: decoded.height(),
            pixels: decoded.into_raw(),
        };
        Ok(Box::new(FileStream {
            frame: Some(frame),
            facing,
        }))
    }
}

#[derive(Debug)]
struct FileStream {
    /// `None` once stopped.
    frame: Option<Frame>,
    facing: Option<FacingMode>,
}

#[async_trait::async_trait]
impl CameraStream for FileStream {
    async fn capture_frame(&mut self) -> Result<Frame, DomainError> {
        self.frame.clone().ok_or(DomainError::NoDevice)
    }

    fn facing(&self) -> Option<FacingMode> {
        self.facing
    }

    fn stop(&mut self) {
        self.frame = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, RgbImage};
    use std::io::Cursor;

    fn write_jpeg(path: &Path) {
        let img = RgbImage::from_pixel(8, 8, image::Rgb([10, 20, 30]));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, ImageFormat::Jpeg).unwrap();
        std::fs::write(path, buf.into_inner()).unwrap();
    }

    #[tokio::test]
    async fn missing_dir_is_no_device() {
        let camera = FileCamera::new("/nonexistent/frames");
        assert!(matches!(
            camera.open(None).await.unwrap_err(),
            DomainError::NoDevice
        ));
    }

    #[tokio::test]
    async fn missing_facing_is_constraint_unsatisfiable() {
        let dir = std::env::temp_dir().join("regdesk-filecam-front-only");
        std::fs::create_dir_all(&dir).unwrap();
        write_jpeg(&dir.join("front.jpg"));
        let _ = std::fs::remove_file(dir.join("rear.jpg"));

        let camera = FileCamera::new(&dir);
        assert!(matches!(
            camera.open(Some(FacingMode::Rear)).await.unwrap_err(),
            DomainError::ConstraintUnsatisfiable
        ));
        // Unconstrained fallback finds the front frame.
        let stream = camera.open(None).await.unwrap();
        assert_eq!(stream.facing(), Some(FacingMode::Front));
    }

    #[tokio::test]
    async fn serves_decoded_frames_until_stopped() {
        let dir = std::env::temp_dir().join("regdesk-filecam-serve");
        std::fs::create_dir_all(&dir).unwrap();
        write_jpeg(&dir.join("rear.jpg"));

        let camera = FileCamera::new(&dir);
        let mut stream = camera.open(Some(FacingMode::Rear)).await.unwrap();
        let frame = stream.capture_frame().await.unwrap();
        assert_eq!((frame.width, frame.height), (8, 8));
        stream.stop();
        assert!(stream.capture_frame().await.is_err());
    }
}
