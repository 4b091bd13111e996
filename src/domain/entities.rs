//! Domain entities. Pure data structures for the core business.
//!
//! No camera/HTTP types here; adapters map into these.

use crate::domain::media::CapturedMedia;
use serde::{Deserialize, Serialize};

/// Which physical camera a capture session targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    Front,
    Rear,
}

/// The two independent capture slots on the form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotKind {
    Photo,
    Signature,
}

impl SlotKind {
    pub fn label(self) -> &'static str {
        match self {
            SlotKind::Photo => "photo",
            SlotKind::Signature => "signature",
        }
    }
}

/// A raw still frame snapshotted from a live camera stream. RGB8, row-major.
#[derive(Debug, Clone)]
pub struct Frame {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl Frame {
    /// Build a frame, checking the pixel buffer matches the dimensions.
    pub fn rgb8(width: u32, height: u32, pixels: Vec<u8>) -> Option<Self> {
        if pixels.len() == (width as usize) * (height as usize) * 3 {
            Some(Self {
                width,
                height,
                pixels,
            })
        } else {
            None
        }
    }
}

/// Year of study. Determines the register-number prefix and valid sections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Year {
    First,
    Second,
    Third,
}

impl Year {
    pub fn as_number(self) -> u8 {
        match self {
            Year::First => 1,
            Year::Second => 2,
            Year::Third => 3,
        }
    }

    pub fn from_number(n: u8) -> Option<Self> {
        match n {
            1 => Some(Year::First),
            2 => Some(Year::Second),
            3 => Some(Year::Third),
            _ => None,
        }
    }
}

/// Fully validated payload for `POST /api/register`. Built by the
/// registration service only after all fields and both media slots pass
/// validation.
#[derive(Debug, Clone)]
pub struct SubmissionRequest {
    pub name: String,
    pub year: Year,
    pub section: char,
    pub last_digits: String,
    pub photo: CapturedMedia,
    pub signature: CapturedMedia,
    /// Formatted MAC address when the student has an iPad; `None` maps to
    /// `has_ipad=No` on the wire and the MAC field is omitted entirely.
    pub ipad_mac_address: Option<String>,
}

/// Successful registration response.
#[derive(Debug, Clone, Deserialize)]
pub struct RegistrationReceipt {
    pub register_number: String,
}
