//! Media adapters. Implement FrameEncoder.

pub mod encoder;

pub use encoder::ImageRsEncoder;
