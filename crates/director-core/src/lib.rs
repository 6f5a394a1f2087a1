//! Core of the production-plan director.
//!
//! Turns a free-text story idea into a [`model::Plan`]: a fixed-shape,
//! 15-minute video production blueprint whose content is selected from an
//! embedded template library by keyword classification. Everything in this
//! crate is pure; callers own I/O, logging and state.

pub mod model;
pub mod plan;
pub mod render;
pub mod theme;

pub use model::Plan;
pub use plan::{GenerateError, PlanValidationError, generate_plan, validate_plan};
pub use render::{OutputFormat, RenderError, render};
pub use theme::{ThemeCategory, classify};
