//! Shared support code: configuration.

pub mod config;
