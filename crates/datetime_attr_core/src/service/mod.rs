//! Core use-case services.
//!
//! # Responsibility
//! - Drive generated date/time fields from form-shaped input.
//! - Keep callers decoupled from binder and container details.

pub mod form;
