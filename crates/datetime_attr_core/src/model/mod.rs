//! Reference host record for date/time attributes.
//!
//! # Responsibility
//! - Show the host capability in a concrete record: stored combined values,
//!   a zone field read by a deferred zone spec, owned binder state.
//! - Define the wire format of combined values for serialization.
//!
//! # Invariants
//! - Binder state is skipped on serialization; a decoded record starts fresh.
//! - `ends_at` is never earlier than `starts_at` once validated.

pub mod event;
pub mod wire;
