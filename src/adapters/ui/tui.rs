//! Implements InputPort. Inquire-based interactive registration flow.
//!
//! Drives the registration service through the same commands a web form
//! would: field entry, slot capture (upload or camera), review, submit.
//! Every error is shown and the user can retry without restarting.

use crate::domain::media::format_file_size;
use crate::domain::{DomainError, FacingMode, Year};
use crate::ports::InputPort;
use crate::usecases::capture_slot::CaptureSlot;
use crate::usecases::{CheckOutcome, RegistrationService};
use async_trait::async_trait;
use indicatif::{ProgressBar, ProgressStyle};
use inquire::{Confirm, Select, Text};
use std::path::PathBuf;
use std::time::Duration;
use tokio::sync::Mutex;

fn prompt_err(e: inquire::InquireError) -> DomainError {
    DomainError::Input(e.to_string())
}

fn year_options() -> Vec<&'static str> {
    vec!["Year 1", "Year 2", "Year 3"]
}

fn year_from_option(option: &str) -> Option<Year> {
    match option {
        "Year 1" => Some(Year::First),
        "Year 2" => Some(Year::Second),
        "Year 3" => Some(Year::Third),
        _ => None,
    }
}

/// TUI adapter. Owns the service behind a lock; the flow is sequential, the
/// lock just satisfies the shared `InputPort` signature.
pub struct TuiInputPort {
    service: Mutex<RegistrationService>,
}

impl TuiInputPort {
    pub fn new(service: RegistrationService) -> Self {
        Self {
            service: Mutex::new(service),
        }
    }

    fn prompt_name(svc: &mut RegistrationService) -> Result<(), DomainError> {
        loop {
            let name = Text::new("Full name:").prompt().map_err(prompt_err)?;
            if name.trim().is_empty() {
                println!("Name is required.");
                continue;
            }
            svc.set_name(&name);
            return Ok(());
        }
    }

    fn prompt_year_and_section(svc: &mut RegistrationService) -> Result<(), DomainError> {
        let choice = Select::new("Year of study:", year_options())
            .prompt()
            .map_err(prompt_err)?;
        let sections = svc.select_year(year_from_option(choice));
        println!(
            "Register number prefix: {}",
            svc.register_prefix().unwrap_or("-")
        );

        let letters: Vec<String> = sections.iter().map(|s| format!("Section {}", s)).collect();
        let picked = Select::new("Section:", letters).prompt().map_err(prompt_err)?;
        let letter = picked.chars().last().unwrap_or('A');
        svc.select_section(letter)?;
        Ok(())
    }

    async fn prompt_last_digits(svc: &mut RegistrationService) -> Result<(), DomainError> {
        loop {
            let input = Text::new("Last 3 digits of the register number:")
                .prompt()
                .map_err(prompt_err)?;
            match svc.enter_last_digits(&input).await? {
                Some(CheckOutcome::Taken) => {
                    println!(
                        "Register number already exists. Please pick different digits."
                    );
                }
                Some(CheckOutcome::Available) => return Ok(()),
                None => {
                    if svc.last_digits().len() == 3 {
                        // Check was skipped (e.g. backend unreachable); the
                        // server will re-validate on submit.
                        return Ok(());
                    }
                    println!("Enter exactly 3 digits.");
                }
            }
        }
    }

    /// Acquire one slot's image: upload a file or run a camera session.
    /// Loops until the user keeps a preview.
    async fn run_slot(slot: &mut CaptureSlot) -> Result<(), DomainError> {
        let label = slot.kind().label();
        loop {
            let source = Select::new(
                &format!("How do you want to provide the {}?", label),
                vec!["Upload a file", "Use the camera"],
            )
            .prompt()
            .map_err(prompt_err)?;

            let acquired = if source == "Upload a file" {
                Self::upload_into(slot).await
            } else {
                Self::camera_into(slot).await
            };
            if let Err(e) = acquired {
                println!("{}", e);
                continue;
            }
            let Some(media) = slot.media() else {
                // Camera session was cancelled.
                continue;
            };
            println!(
                "{}: {} ({})",
                label,
                media.source_name,
                format_file_size(media.size_bytes)
            );
            let keep = Confirm::new("Keep this image?")
                .with_default(true)
                .prompt()
                .map_err(prompt_err)?;
            if keep {
                return Ok(());
            }
            slot.remove()?;
        }
    }

    async fn upload_into(slot: &mut CaptureSlot) -> Result<(), DomainError> {
        let path = Text::new("Path to the image file (JPEG or PNG, max 500 KB):")
            .prompt()
            .map_err(prompt_err)?;
        slot.select_file(&PathBuf::from(path.trim())).await
    }

    async fn camera_into(slot: &mut CaptureSlot) -> Result<(), DomainError> {
        let facing = Self::prompt_facing()?;
        slot.open_camera(facing).await?;

        loop {
            let action = Select::new(
                "Camera is live.",
                vec!["Capture", "Switch camera", "Close camera"],
            )
            .prompt()
            .map_err(prompt_err)?;
            match action {
                "Capture" => match slot.capture().await {
                    Ok(_) => return Ok(()),
                    Err(DomainError::CompressionExhausted) => {
                        // Session is still live; adjust and try again.
                        println!("{}", DomainError::CompressionExhausted);
                    }
                    Err(e) => {
                        slot.close_camera();
                        return Err(e);
                    }
                },
                "Switch camera" => {
                    let facing = Self::prompt_facing()?;
                    if let Err(e) = slot.switch_camera(facing).await {
                        println!("{}", e);
                        return Ok(());
                    }
                }
                _ => {
                    slot.close_camera();
                    return Ok(());
                }
            }
        }
    }

    fn prompt_facing() -> Result<FacingMode, DomainError> {
        let choice = Select::new("Camera facing:", vec!["Front", "Rear"])
            .prompt()
            .map_err(prompt_err)?;
        Ok(if choice == "Front" {
            FacingMode::Front
        } else {
            FacingMode::Rear
        })
    }

    async fn prompt_ipad(svc: &mut RegistrationService) -> Result<(), DomainError> {
        let has = Confirm::new("Do you have a college-issued iPad?")
            .with_default(false)
            .prompt()
            .map_err(prompt_err)?;
        svc.set_has_ipad(has);
        if !has {
            return Ok(());
        }
        loop {
            let input = Text::new("iPad MAC address:").prompt().map_err(prompt_err)?;
            let formatted = svc.enter_mac_address(&input).to_string();
            if crate::domain::rules::is_complete_mac(&formatted) {
                println!("MAC address: {}", formatted);
                return Ok(());
            }
            println!("A MAC address needs 12 hex digits (e.g. 001122AABBCC).");
        }
    }

    async fn submit_with_spinner(svc: &mut RegistrationService) -> Result<String, DomainError> {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::with_template("{spinner} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_spinner()),
        );
        spinner.set_message("Submitting registration...");
        spinner.enable_steady_tick(Duration::from_millis(100));
        let result = svc.submit().await;
        spinner.finish_and_clear();
        result
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let mut svc = self.service.lock().await;

        Self::prompt_name(&mut svc)?;
        Self::prompt_year_and_section(&mut svc)?;
        Self::prompt_last_digits(&mut svc).await?;

        println!("Passport-size photo (max 500 KB):");
        Self::run_slot(svc.photo_slot()).await?;
        println!("Signature image (max 500 KB):");
        Self::run_slot(svc.signature_slot()).await?;

        Self::prompt_ipad(&mut svc).await?;

        loop {
            let go = Confirm::new("Submit the registration?")
                .with_default(true)
                .prompt()
                .map_err(prompt_err)?;
            if !go {
                println!("Registration not submitted.");
                return Ok(());
            }
            match Self::submit_with_spinner(&mut svc).await {
                Ok(redirect) => {
                    println!("Registration successful: {}", redirect);
                    return Ok(());
                }
                Err(e) => {
                    // Submit gate is released on failure; offer a retry.
                    println!("{}", e);
                    let retry = Confirm::new("Try again?")
                        .with_default(true)
                        .prompt()
                        .map_err(prompt_err)?;
                    if !retry {
                        return Ok(());
                    }
                }
            }
        }
    }
}
