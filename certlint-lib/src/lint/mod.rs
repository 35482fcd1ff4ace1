//! The lint engine.
//!
//! Lints are registered once into a [`RegistryBuilder`], which is frozen into
//! an immutable [`Registry`]. Each run then goes through three steps:
//!
//! 1. [`select`] turns the registry and a [`RunConfig`] into a conflict-free
//!    [`Selection`].
//! 2. An [`Executor`] evaluates a certificate against the selection, applying
//!    effective dates and applicability, and converting panics inside a lint
//!    into [`Status::Fatal`].
//! 3. The verdicts are folded into a name-sorted [`Report`].

mod base;
mod config;
mod executor;
mod metadata;
mod registry;
mod report;
mod result;
mod selector;

pub use base::{CertificateLint, Lint};
pub use config::RunConfig;
pub use executor::{CancelToken, Executor};
pub use metadata::{LintCategory, LintMetadata, LintSource};
pub use registry::{Registry, RegistryBuilder};
pub use report::{Report, Summary};
pub use result::{LintResult, Status};
pub use selector::{select, Selection};
