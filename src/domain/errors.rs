//! Domain errors. Used by ports and use cases.
//!
//! Adapters map infrastructure errors into these. All variants are
//! recoverable: they surface as user-facing notifications and the user can
//! always retry.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("unsupported image type ({0}); only JPEG and PNG are accepted")]
    InvalidType(String),

    #[error("image is {size} bytes; the limit is {limit} bytes")]
    TooLarge { size: usize, limit: usize },

    #[error("camera permission denied")]
    PermissionDenied,

    #[error("no camera device available")]
    NoDevice,

    #[error("camera cannot satisfy the requested facing mode")]
    ConstraintUnsatisfiable,

    #[error("snapshot still exceeds the size limit at the lowest quality; retry the capture")]
    CompressionExhausted,

    #[error("encoding failed: {0}")]
    Encoder(String),

    #[error("validation failed: {0}")]
    Validation(String),

    #[error("register number {0} is already taken")]
    DuplicateRegisterNumber(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("registration rejected: {0}")]
    ServerRejected(String),

    #[error("I/O error: {0}")]
    Io(String),

    /// Command issued against a capture slot in the wrong state (e.g. capture
    /// without an open camera). The UI gates commands by state, so hitting
    /// this indicates a driver bug rather than user error.
    #[error("'{0}' is not available in the current capture state")]
    SlotCommand(&'static str),

    #[error("input error: {0}")]
    Input(String),
}
