//! Date/time attributes bound onto host records.
//!
//! # Responsibility
//! - Declare which timestamp fields of a host type get date/time accessors.
//! - Wire raw user input, the per-attribute container, validation and the
//!   stored combined value together.
//!
//! # Invariants
//! - Raw sub-setters never fail; malformed input surfaces at validation.
//! - The clear rule only touches attributes whose raw sub-setters ran.
//! - Binder state lives on the host record and is never persisted.

mod accessor;
mod binder;
mod declaration;
mod host;
mod validation;

pub use accessor::Accessor;
pub use binder::AttributeBinder;
pub use declaration::{AttributeOptions, DateTimeAttributes, DeclarationError};
pub use host::{AttributeState, DateTimeHost, DateTimeState, RawInput};
pub use validation::{ValidationErrors, ValidationFailure};
