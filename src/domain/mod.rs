//! Core domain layer. No external I/O dependencies.
//!
//! Entities and business rules live here. Dependencies flow inward.

pub mod entities;
pub mod errors;
pub mod media;
pub mod rules;

pub use entities::{FacingMode, Frame, RegistrationReceipt, SlotKind, SubmissionRequest, Year};
pub use errors::DomainError;
pub use media::{CapturedMedia, ImageKind, MAX_MEDIA_BYTES};
