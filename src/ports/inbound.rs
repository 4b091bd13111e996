//! Inbound port. UI (adapter) calls into the application.

use crate::domain::DomainError;

/// Input port: the front-end drives the registration flow.
#[async_trait::async_trait]
pub trait InputPort: Send + Sync {
    /// Run the interactive registration flow until the user submits
    /// successfully or quits.
    async fn run(&self) -> Result<(), DomainError>;
}
