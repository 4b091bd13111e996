//! regdesk: registration desk client with Hexagonal Architecture.
//!
//! Image capture slots (file or camera) under a 500 KiB ceiling, form
//! validation, and multipart submission to the college registration API.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod shared;
pub mod usecases;
