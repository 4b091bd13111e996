//! Registration form orchestrator.
//!
//! Owns the two capture slots and the form fields, applies the domain rules
//! to user input, runs the length-gated availability check, and assembles
//! the submission. The duplicate check is advisory only: the server remains
//! authoritative at submission time and a race between check and submit is
//! acceptable by design.

use crate::domain::{rules, DomainError, SlotKind, SubmissionRequest, Year};
use crate::ports::{CameraPort, FrameEncoder, RegistrationApi};
use crate::usecases::capture_slot::{CaptureSlot, SlotPhase};
use std::sync::Arc;
use tracing::{info, warn};

/// Outcome of the advisory availability check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckOutcome {
    Available,
    Taken,
}

/// Form state plus the services needed to complete a registration.
pub struct RegistrationService {
    api: Arc<dyn RegistrationApi>,
    photo: CaptureSlot,
    signature: CaptureSlot,

    name: String,
    year: Option<Year>,
    section: Option<char>,
    last_digits: String,
    /// Set when the advisory check reported the number as taken; cleared on
    /// any suffix or year change.
    register_conflict: bool,
    has_ipad: bool,
    mac_address: String,
    /// Submit gate: while a submission is in flight no second one may start.
    /// Released on every failure path so the user can retry.
    submitting: bool,
}

impl RegistrationService {
    pub fn new(
        api: Arc<dyn RegistrationApi>,
        camera: Arc<dyn CameraPort>,
        encoder: Arc<dyn FrameEncoder>,
    ) -> Self {
        Self {
            api,
            photo: CaptureSlot::new(SlotKind::Photo, Arc::clone(&camera), Arc::clone(&encoder)),
            signature: CaptureSlot::new(SlotKind::Signature, camera, encoder),
            name: String::new(),
            year: None,
            section: None,
            last_digits: String::new(),
            register_conflict: false,
            has_ipad: false,
            mac_address: String::new(),
            submitting: false,
        }
    }

    pub fn photo_slot(&mut self) -> &mut CaptureSlot {
        &mut self.photo
    }

    pub fn signature_slot(&mut self) -> &mut CaptureSlot {
        &mut self.signature
    }

    pub fn set_name(&mut self, name: &str) {
        self.name = name.trim().to_string();
    }

    /// Select (or deselect) the year of study.
    ///
    /// Returns the section letters now available. Changing the year clears
    /// the dependent fields: section, suffix, and any conflict flag.
    pub fn select_year(&mut self, year: Option<Year>) -> &'static [char] {
        self.year = year;
        self.section = None;
        self.last_digits.clear();
        self.register_conflict = false;
        year.map(rules::sections_for_year).unwrap_or(&[])
    }

    pub fn year(&self) -> Option<Year> {
        self.year
    }

    pub fn select_section(&mut self, section: char) -> Result<(), DomainError> {
        let year = self
            .year
            .ok_or_else(|| DomainError::Validation("select a year before a section".into()))?;
        if !rules::is_valid_section(year, section) {
            return Err(DomainError::Validation(format!(
                "section {} is not offered in year {}",
                section,
                year.as_number()
            )));
        }
        self.section = Some(section.to_ascii_uppercase());
        Ok(())
    }

    /// The register-number prefix for the selected year, for display.
    pub fn register_prefix(&self) -> Option<&'static str> {
        self.year.map(rules::register_prefix)
    }

    /// Apply suffix input and run the availability check when complete.
    ///
    /// Input is masked (digits only, capped at 3). The backend check fires
    /// iff the masked suffix is exactly 3 digits; shorter input never
    /// triggers a call. A transport failure downgrades to a warning: the
    /// check is advisory and the server re-validates on submit.
    pub async fn enter_last_digits(
        &mut self,
        input: &str,
    ) -> Result<Option<CheckOutcome>, DomainError> {
        self.last_digits = rules::normalize_last_digits(input);
        self.register_conflict = false;

        let Some(year) = self.year else {
            return Ok(None);
        };
        if !rules::is_complete_suffix(&self.last_digits) {
            return Ok(None);
        }

        let full_id = rules::full_register_number(year, &self.last_digits);
        match self.api.check_register_number(&full_id).await {
            Ok(true) => {
                warn!(register_number = %full_id, "register number already taken");
                self.register_conflict = true;
                Ok(Some(CheckOutcome::Taken))
            }
            Ok(false) => Ok(Some(CheckOutcome::Available)),
            Err(e) => {
                warn!(register_number = %full_id, error = %e, "availability check failed; continuing");
                Ok(None)
            }
        }
    }

    pub fn last_digits(&self) -> &str {
        &self.last_digits
    }

    pub fn set_has_ipad(&mut self, has_ipad: bool) {
        self.has_ipad = has_ipad;
        if !has_ipad {
            self.mac_address.clear();
        }
    }

    /// Apply MAC input through the formatter; returns the masked value for
    /// display.
    pub fn enter_mac_address(&mut self, input: &str) -> &str {
        self.mac_address = rules::format_mac(input);
        &self.mac_address
    }

    /// Check every client-side requirement without touching the network.
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.name.is_empty() {
            return Err(DomainError::Validation("name is required".into()));
        }
        let year = self
            .year
            .ok_or_else(|| DomainError::Validation("year of study is required".into()))?;
        if self.section.is_none() {
            return Err(DomainError::Validation("section is required".into()));
        }
        if !rules::is_complete_suffix(&self.last_digits) {
            return Err(DomainError::Validation(
                "register number needs exactly 3 digits".into(),
            ));
        }
        if self.register_conflict {
            return Err(DomainError::DuplicateRegisterNumber(
                rules::full_register_number(year, &self.last_digits),
            ));
        }
        if self.photo.phase() != SlotPhase::Previewing {
            return Err(DomainError::Validation("a passport-size photo is required".into()));
        }
        if self.signature.phase() != SlotPhase::Previewing {
            return Err(DomainError::Validation("a signature image is required".into()));
        }
        if self.has_ipad && !rules::is_complete_mac(&self.mac_address) {
            return Err(DomainError::Validation(
                "iPad MAC address needs 12 hex digits".into(),
            ));
        }
        Ok(())
    }

    /// Submit the registration. On success returns the redirect URL carrying
    /// the assigned register number.
    ///
    /// Exactly one submission may be in flight; any failure releases the
    /// gate so the user can retry without restarting.
    pub async fn submit(&mut self) -> Result<String, DomainError> {
        if self.submitting {
            return Err(DomainError::Validation("submission already in progress".into()));
        }
        self.validate()?;
        self.submitting = true;

        let request = SubmissionRequest {
            name: self.name.clone(),
            year: self.year.expect("validated"),
            section: self.section.expect("validated"),
            last_digits: self.last_digits.clone(),
            photo: self.photo.media().expect("validated").clone(),
            signature: self.signature.media().expect("validated").clone(),
            ipad_mac_address: self.has_ipad.then(|| self.mac_address.clone()),
        };

        let result = self.api.register(&request).await;
        self.submitting = false;

        let receipt = result?;
        info!(register_number = %receipt.register_number, "registration successful");
        Ok(format!(
            "/success?register_number={}",
            receipt.register_number
        ))
    }

    /// Reset the whole form, including both capture slots.
    pub fn reset(&mut self) {
        self.name.clear();
        self.year = None;
        self.section = None;
        self.last_digits.clear();
        self.register_conflict = false;
        self.has_ipad = false;
        self.mac_address.clear();
        self.submitting = false;
        self.photo.reset();
        self.signature.reset();
    }
}
