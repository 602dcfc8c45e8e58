//! Profile domain module.
//!
//! This module contains the profile data model and field validation.
//!
//! # Module Structure
//!
//! - `model`: validated record, server-side view, and field enums
//! - `draft`: raw form field state and the validator

mod draft;
mod model;

// Re-export public API
pub use draft::{ProfileDraft, ValidationErrors, coerce_date};
pub use model::{City, Gender, Language, ProfileRecord, StoredProfile};
