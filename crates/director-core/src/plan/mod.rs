//! Plan construction and checking.
//!
//! - [`timeline`]: the fixed beat sheet every plan is poured into.
//! - [`bindings`]: placeholder values and template interpolation.
//! - [`generate`]: idea text to [`crate::model::Plan`].
//! - [`validate`]: structural checks over a finished plan.

pub mod bindings;
pub mod generate;
pub mod timeline;
pub mod validate;

pub use generate::{GenerateError, generate_plan};
pub use validate::{PlanValidationError, validate_plan};
