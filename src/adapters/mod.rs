//! Infrastructure adapters. Implement outbound ports.
//!
//! Camera, image encoding, backend HTTP. Map errors to DomainError.

pub mod camera;
pub mod http;
pub mod media;
pub mod ui;
