//! Lint verdicts.

use crate::CertlintError;
use serde::Serialize;
use std::str::FromStr;

/// Outcome of one lint against one certificate.
///
/// Variants are declared in severity order, so `Ord` gives the lattice
/// `NotApplicable < Pass < Notice < Warn < Error < Fatal`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Status {
    /// The effective window or the lint's own predicate excluded the certificate.
    #[serde(rename = "NA")]
    NotApplicable,
    #[serde(rename = "pass")]
    Pass,
    #[serde(rename = "notice")]
    Notice,
    #[serde(rename = "warn")]
    Warn,
    #[serde(rename = "error")]
    Error,
    /// The lint itself failed while running.
    #[serde(rename = "fatal")]
    Fatal,
}

impl Status {
    pub const ALL: [Status; 6] = [
        Status::NotApplicable,
        Status::Pass,
        Status::Notice,
        Status::Warn,
        Status::Error,
        Status::Fatal,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Status::NotApplicable => "NA",
            Status::Pass => "pass",
            Status::Notice => "notice",
            Status::Warn => "warn",
            Status::Error => "error",
            Status::Fatal => "fatal",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = CertlintError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "na" | "not_applicable" | "n/a" => Ok(Status::NotApplicable),
            "pass" => Ok(Status::Pass),
            "notice" => Ok(Status::Notice),
            "warn" | "warning" => Ok(Status::Warn),
            "error" => Ok(Status::Error),
            "fatal" => Ok(Status::Fatal),
            _ => Err(CertlintError::UnknownStatus(s.to_string())),
        }
    }
}

/// Detail prefixes of the `Fatal` verdicts written by the executor's
/// failure boundary.
pub(crate) const LINT_PANICKED: &str = "lint panicked: ";
pub(crate) const CHECK_PANICKED: &str = "applicability check panicked: ";

/// A lint's verdict plus optional free-text detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintResult {
    pub status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl LintResult {
    pub fn new(status: Status) -> Self {
        Self {
            status,
            details: None,
        }
    }

    pub fn pass() -> Self {
        Self::new(Status::Pass)
    }

    pub fn not_applicable() -> Self {
        Self::new(Status::NotApplicable)
    }

    pub fn notice() -> Self {
        Self::new(Status::Notice)
    }

    pub fn warn() -> Self {
        Self::new(Status::Warn)
    }

    pub fn error() -> Self {
        Self::new(Status::Error)
    }

    pub fn fatal(details: impl Into<String>) -> Self {
        Self::new(Status::Fatal).with_details(details)
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// True for a `Fatal` recorded because the lint panicked, as opposed to
    /// one the lint returned itself.
    pub fn is_panic(&self) -> bool {
        self.status == Status::Fatal
            && self
                .details
                .as_deref()
                .is_some_and(|d| d.starts_with(LINT_PANICKED) || d.starts_with(CHECK_PANICKED))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn returned_fatal_is_not_a_panic() {
        assert!(!LintResult::fatal("could not decode key").is_panic());
        assert!(!LintResult::error().with_details("lint panicked: no").is_panic());
        assert!(LintResult::fatal(format!("{LINT_PANICKED}boom")).is_panic());
        assert!(LintResult::fatal(format!("{CHECK_PANICKED}boom")).is_panic());
    }

    #[test]
    fn severity_lattice_order() {
        assert!(Status::Fatal > Status::Error);
        assert!(Status::Error > Status::Warn);
        assert!(Status::Warn > Status::Notice);
        assert!(Status::Notice > Status::Pass);
        assert!(Status::Pass > Status::NotApplicable);
    }

    #[test]
    fn status_parses_its_own_tags() {
        for status in Status::ALL {
            assert_eq!(status.as_str().parse::<Status>().unwrap(), status);
        }
        assert_eq!("Warning".parse::<Status>().unwrap(), Status::Warn);
        assert!("bogus".parse::<Status>().is_err());
    }

    #[test]
    fn details_are_omitted_from_json_when_absent() {
        let json = serde_json::to_string(&LintResult::pass()).unwrap();
        assert_eq!(json, r#"{"status":"pass"}"#);

        let json = serde_json::to_string(&LintResult::error().with_details("bad")).unwrap();
        assert_eq!(json, r#"{"status":"error","details":"bad"}"#);
    }
}
