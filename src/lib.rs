//! Template-driven prompt generator.
//!
//! User text goes through a small pipeline (build plan, persist, validate,
//! project to XML, compose) and comes out as a long structured prompt for an
//! LLM assistant. See [`compose::Composer`] for the entry point.

pub mod cli;
pub mod compose;
pub mod config;
pub mod errors;
pub mod plan;
pub mod prompt;
pub mod provider;
pub mod store;
pub mod ux;
pub mod wire;
pub mod xml;

pub use compose::Composer;
pub use errors::{CompositionError, Stage};
pub use wire::Mode;
