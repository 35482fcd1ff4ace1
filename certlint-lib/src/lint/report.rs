//! Aggregated verdicts for one certificate.

use super::result::{LintResult, Status};
use crate::CertlintError;
use serde::Serialize;
use std::collections::BTreeMap;

/// Number of lints that finished with each status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Summary {
    pub pass: usize,
    pub notice: usize,
    pub warn: usize,
    pub error: usize,
    pub fatal: usize,
    #[serde(rename = "NA")]
    pub not_applicable: usize,
}

impl Summary {
    pub fn record(&mut self, status: Status) {
        match status {
            Status::NotApplicable => self.not_applicable += 1,
            Status::Pass => self.pass += 1,
            Status::Notice => self.notice += 1,
            Status::Warn => self.warn += 1,
            Status::Error => self.error += 1,
            Status::Fatal => self.fatal += 1,
        }
    }

    pub fn count(&self, status: Status) -> usize {
        match status {
            Status::NotApplicable => self.not_applicable,
            Status::Pass => self.pass,
            Status::Notice => self.notice,
            Status::Warn => self.warn,
            Status::Error => self.error,
            Status::Fatal => self.fatal,
        }
    }

    pub fn total(&self) -> usize {
        Status::ALL.iter().map(|s| self.count(*s)).sum()
    }
}

/// Verdict of every selected lint for one certificate, keyed and ordered
/// by lint name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    results: BTreeMap<String, LintResult>,
    summary: Summary,
}

impl Report {
    /// Build a report from `(name, result)` pairs in any order.
    pub fn from_results(results: impl IntoIterator<Item = (String, LintResult)>) -> Self {
        let results: BTreeMap<String, LintResult> = results.into_iter().collect();
        let mut summary = Summary::default();
        for result in results.values() {
            summary.record(result.status);
        }
        Self { results, summary }
    }

    pub fn get(&self, name: &str) -> Option<&LintResult> {
        self.results.get(name)
    }

    pub fn status_of(&self, name: &str) -> Option<Status> {
        self.get(name).map(|r| r.status)
    }

    /// Results in name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &LintResult)> {
        self.results.iter().map(|(name, result)| (name.as_str(), result))
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn summary(&self) -> &Summary {
        &self.summary
    }

    /// Most severe status in the report; `NotApplicable` when empty.
    pub fn worst_status(&self) -> Status {
        self.results
            .values()
            .map(|r| r.status)
            .max()
            .unwrap_or(Status::NotApplicable)
    }

    /// Names of lints whose verdict came from a caught panic.
    pub fn panicked(&self) -> Vec<&str> {
        self.iter()
            .filter(|(_, result)| result.is_panic())
            .map(|(name, _)| name)
            .collect()
    }

    /// Whether any lint reached `threshold` or worse.
    pub fn exceeds(&self, threshold: Status) -> bool {
        self.worst_status() >= threshold
    }

    pub fn to_json(&self) -> Result<String, CertlintError> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
