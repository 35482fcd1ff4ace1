//! The capability contract every lint implements.

use super::metadata::LintMetadata;
use super::result::LintResult;
use crate::Certificate;

/// Trait that every lint body implements.
///
/// Both methods must be pure with respect to the certificate: no interior
/// mutability, no I/O, no shared state. The executor may call them from any
/// worker thread and in any order.
pub trait CertificateLint: Send + Sync {
    /// Rule-specific scoping, e.g. "only subscriber certificates" or "only
    /// when the SAN extension is present".
    fn check_applies(&self, cert: &Certificate) -> bool;

    /// Evaluate the requirement. Only called when `check_applies` was true.
    fn execute(&self, cert: &Certificate) -> LintResult;
}

/// Adapter for lints written as two plain functions.
struct FnLint {
    applies: fn(&Certificate) -> bool,
    execute: fn(&Certificate) -> LintResult,
}

impl CertificateLint for FnLint {
    fn check_applies(&self, cert: &Certificate) -> bool {
        (self.applies)(cert)
    }

    fn execute(&self, cert: &Certificate) -> LintResult {
        (self.execute)(cert)
    }
}

/// A registered lint: immutable metadata plus its body.
pub struct Lint {
    metadata: LintMetadata,
    body: Box<dyn CertificateLint>,
}

impl Lint {
    pub fn new(metadata: LintMetadata, body: impl CertificateLint + 'static) -> Self {
        Self {
            metadata,
            body: Box::new(body),
        }
    }

    pub fn from_fns(
        metadata: LintMetadata,
        applies: fn(&Certificate) -> bool,
        execute: fn(&Certificate) -> LintResult,
    ) -> Self {
        Self::new(metadata, FnLint { applies, execute })
    }

    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    pub fn metadata(&self) -> &LintMetadata {
        &self.metadata
    }

    pub fn check_applies(&self, cert: &Certificate) -> bool {
        self.body.check_applies(cert)
    }

    pub fn execute(&self, cert: &Certificate) -> LintResult {
        self.body.execute(cert)
    }
}

impl std::fmt::Debug for Lint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lint")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}
