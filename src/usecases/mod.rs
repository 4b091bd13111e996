//! Application use cases. Orchestrate domain logic via ports.

pub mod capture_slot;
pub mod compression;
pub mod registration_service;

pub use capture_slot::{CaptureSlot, SlotPhase};
pub use registration_service::{CheckOutcome, RegistrationService};
