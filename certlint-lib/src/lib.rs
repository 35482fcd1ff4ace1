//! certlint-lib: Lint X.509 certificates against a registry of rules.
//!
//! The crate has three layers:
//!
//! - a certificate model and PEM/DER parser ([`Certificate`], [`parse_cert`]),
//! - the lint engine in [`lint`]: metadata, the frozen [`Registry`], the
//!   [`select`] step that turns a [`RunConfig`] into a [`Selection`], the
//!   [`Executor`] that evaluates a certificate, and the resulting [`Report`],
//! - the rule corpus in [`lints`], registered into the process-wide
//!   registry returned by [`global_registry`].
//!
//! Most callers only need [`lint_input`] or [`lint_certificate`].

mod fields;
mod fingerprint;
pub mod lint;
pub mod lints;
pub mod oid;
mod parser;
mod util;

pub use fields::{
    AiaEntry, Certificate, DateTime, DistinguishedName, Extension, ExtensionValue, PublicKeyInfo,
    SanEntry,
};
pub use fingerprint::fingerprint_sha256;
pub use lint::{
    select, CancelToken, CertificateLint, Executor, Lint, LintCategory, LintMetadata, LintResult,
    LintSource, Registry, RegistryBuilder, Report, RunConfig, Selection, Status, Summary,
};
pub use lints::{global_registry, register_all};
pub use parser::{parse_cert, parse_der, parse_pem};

/// Errors returned by certlint-lib.
#[derive(Debug, thiserror::Error)]
pub enum CertlintError {
    #[error("Failed to parse certificate: {0}")]
    ParseError(String),

    #[error("Invalid PEM format: {0}")]
    PemError(String),

    #[error("Invalid DER format: {0}")]
    DerError(String),

    #[error("No certificate was supplied")]
    MissingCertificate,

    #[error("Lint {0} is already registered")]
    DuplicateLint(String),

    #[error("Invalid metadata for lint {name}: {reason}")]
    InvalidMetadata { name: String, reason: String },

    #[error("Lint registry failed to initialize: {0}")]
    RegistryInit(String),

    #[error("Unknown lint: {0}")]
    UnknownLint(String),

    #[error("Unknown lint source: {0}")]
    UnknownSource(String),

    #[error("Unknown lint status: {0}")]
    UnknownStatus(String),

    #[error("Invalid lint name filter: {0}")]
    InvalidPattern(#[from] regex::Error),

    #[error("Worker count must be at least 1")]
    InvalidWorkerCount,

    #[error("Failed to start worker pool: {0}")]
    ThreadPool(String),

    #[error("Lint run was cancelled")]
    Cancelled,

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid configuration: {0}")]
    Config(#[from] toml::de::Error),
}

/// Lint a parsed certificate with the process-wide registry.
///
/// Fails before any lint runs if the registry cannot be built or the
/// configuration is invalid.
pub fn lint_certificate(cert: &Certificate, config: &RunConfig) -> Result<Report, CertlintError> {
    let registry = global_registry()?;
    let selection = select(registry, config)?;
    let executor = Executor::new(selection, config)?;
    Ok(executor.lint(cert))
}

/// Parse PEM or DER input and lint it with the process-wide registry.
pub fn lint_input(input: &[u8], config: &RunConfig) -> Result<Report, CertlintError> {
    let cert = parse_cert(input)?;
    lint_certificate(&cert, config)
}
