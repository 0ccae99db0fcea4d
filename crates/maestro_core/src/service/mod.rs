//! Core use-case services.
//!
//! # Responsibility
//! - Orchestrate repository calls into use-case level APIs.
//! - Enforce cross-record scheduling rules above the repository layer.

pub mod booking_service;
pub mod term_service;
pub mod term_validator;
