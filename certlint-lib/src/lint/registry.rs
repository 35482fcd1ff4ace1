//! Registration and lookup of lints.
//!
//! Lints are collected in a [`RegistryBuilder`] during start-up and then
//! frozen into a [`Registry`]. A `Registry` has no mutating methods, so once
//! built it can be shared across threads and read without locking.

use super::base::Lint;
use super::metadata::{LintCategory, LintSource};
use crate::CertlintError;
use regex::Regex;
use std::collections::{BTreeSet, HashMap};

/// Collects lints before the registry is frozen.
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    lints: Vec<Lint>,
    index: HashMap<String, usize>,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lint. Names are a single global namespace: registering a name
    /// twice is an error, as is metadata with an inverted effective window.
    pub fn register(&mut self, lint: Lint) -> Result<(), CertlintError> {
        lint.metadata().validate()?;
        if self.index.contains_key(lint.name()) {
            return Err(CertlintError::DuplicateLint(lint.name().to_string()));
        }
        self.index.insert(lint.name().to_string(), self.lints.len());
        self.lints.push(lint);
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.lints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lints.is_empty()
    }

    /// Freeze into an immutable [`Registry`].
    ///
    /// Every name listed in `mutually_exclusive_with` must be registered.
    /// The exclusion relation is made symmetric here, so a lint only needs
    /// to name its counterpart on one side.
    pub fn freeze(self) -> Result<Registry, CertlintError> {
        let mut exclusions: HashMap<String, BTreeSet<String>> = HashMap::new();
        for lint in &self.lints {
            for other in &lint.metadata().mutually_exclusive_with {
                if !self.index.contains_key(other) {
                    return Err(CertlintError::InvalidMetadata {
                        name: lint.name().to_string(),
                        reason: format!("mutually exclusive with unregistered lint {other}"),
                    });
                }
                exclusions
                    .entry(lint.name().to_string())
                    .or_default()
                    .insert(other.clone());
                exclusions
                    .entry(other.clone())
                    .or_default()
                    .insert(lint.name().to_string());
            }
        }

        let mut lints = self.lints;
        lints.sort_by(|a, b| a.name().cmp(b.name()));
        let index = lints
            .iter()
            .enumerate()
            .map(|(i, lint)| (lint.name().to_string(), i))
            .collect();

        tracing::debug!(
            lints = lints.len(),
            exclusive = exclusions.len(),
            "lint registry frozen"
        );

        Ok(Registry {
            lints,
            index,
            exclusions,
        })
    }
}

/// The frozen, read-only set of known lints, sorted by name.
#[derive(Debug)]
pub struct Registry {
    lints: Vec<Lint>,
    index: HashMap<String, usize>,
    exclusions: HashMap<String, BTreeSet<String>>,
}

impl Registry {
    /// Look up a lint by name.
    pub fn lookup(&self, name: &str) -> Option<&Lint> {
        self.index.get(name).and_then(|&i| self.lints.get(i))
    }

    /// All lints, sorted by name.
    pub fn all(&self) -> &[Lint] {
        &self.lints
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.lints.iter().map(Lint::name)
    }

    pub fn len(&self) -> usize {
        self.lints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lints.is_empty()
    }

    /// Lints whose source is in `sources`, sorted by name.
    pub fn filter_by_source(&self, sources: &BTreeSet<LintSource>) -> Vec<&Lint> {
        self.lints
            .iter()
            .filter(|lint| sources.contains(&lint.metadata().source))
            .collect()
    }

    /// Lints of one severity category, sorted by name.
    pub fn filter_by_category(&self, category: LintCategory) -> Vec<&Lint> {
        self.lints
            .iter()
            .filter(|lint| lint.metadata().category() == category)
            .collect()
    }

    /// Lints whose name matches `pattern`, sorted by name.
    pub fn filter_by_name_pattern(&self, pattern: &Regex) -> Vec<&Lint> {
        self.lints
            .iter()
            .filter(|lint| pattern.is_match(lint.name()))
            .collect()
    }

    /// Names that must never run alongside `name` (symmetric).
    pub fn exclusive_with(&self, name: &str) -> impl Iterator<Item = &str> {
        self.exclusions
            .get(name)
            .into_iter()
            .flatten()
            .map(String::as_str)
    }

    /// The set of sources that at least one registered lint uses.
    pub fn sources(&self) -> BTreeSet<LintSource> {
        self.lints.iter().map(|l| l.metadata().source).collect()
    }
}
