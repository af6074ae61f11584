//! Version selection layer
//!
//! This module parses candidate version strings, evaluates range constraints
//! and produces the ordered selection.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ raw strings │────▶│  Registry   │────▶│  Selector   │────▶ output lines
//! └─────────────┘     │(parse+keep) │     │(filter,sort)│
//!                     └─────────────┘     └─────────────┘
//!                            │                   │
//!                            ▼                   ▼
//!                     ┌─────────────┐     ┌─────────────┐
//!                     │   Version   │     │ Constraint  │
//!                     │  (grammars) │     │ (matching)  │
//!                     └─────────────┘     └─────────────┘
//! ```
//!
//! # Modules
//!
//! - [`semver`]: `Version` model, ordering and the strict/standard grammars
//! - [`lenient`]: relaxed Go-style grammar (`go1.20`, `1.21rc2`)
//! - [`constraint`]: range expression compilation and matching
//! - [`registry`]: accumulates parsed candidates and their raw spellings
//! - [`selector`]: filters, sorts, truncates and renders the result
//! - [`error`]: error types for parsing and selection

pub mod constraint;
pub mod error;
pub mod lenient;
pub mod registry;
pub mod selector;
pub mod semver;

pub use constraint::Constraint;
pub use error::{Component, ConstraintError, SelectError, VersionError};
pub use registry::{ParseOptions, Registry};
pub use selector::select;
pub use self::semver::Version;
