//! Camera adapters. Implement CameraPort.

pub mod file_camera;
pub mod mock;

pub use file_camera::FileCamera;
pub use mock::{MockBehavior, MockCamera};
