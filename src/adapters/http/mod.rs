//! HTTP adapters. Implement RegistrationApi against the backend.

pub mod api_client;

pub use api_client::HttpRegistrationApi;
