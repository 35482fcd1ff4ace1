//! Turning a registry and a run configuration into the lints to execute.

use super::base::Lint;
use super::config::RunConfig;
use super::registry::Registry;
use crate::CertlintError;
use regex::Regex;
use std::collections::{BTreeSet, HashSet};

/// The concrete, conflict-free set of lints chosen for one run, sorted by name.
#[derive(Debug, Clone)]
pub struct Selection<'r> {
    lints: Vec<&'r Lint>,
}

impl<'r> Selection<'r> {
    pub fn lints(&self) -> &[&'r Lint] {
        &self.lints
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.lints.iter().map(|lint| lint.name())
    }

    pub fn contains(&self, name: &str) -> bool {
        self.lints
            .binary_search_by(|lint| lint.name().cmp(name))
            .is_ok()
    }

    pub fn len(&self) -> usize {
        self.lints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lints.is_empty()
    }
}

/// Compute the lints to run for `config`.
///
/// Filters apply in this order: deprecation, source filters, name pattern,
/// exclude list. Names on the include list are then added back no matter
/// which filter removed them. Finally mutually exclusive lints are resolved:
/// included lints win over the rest, and within each group the
/// lexicographically smallest name wins.
///
/// Fails without selecting anything if an included name is not registered
/// or the name pattern does not compile.
pub fn select<'r>(registry: &'r Registry, config: &RunConfig) -> Result<Selection<'r>, CertlintError> {
    let included: BTreeSet<&str> = config.include.iter().map(String::as_str).collect();
    if let Some(unknown) = included.iter().find(|name| registry.lookup(name).is_none()) {
        return Err(CertlintError::UnknownLint(unknown.to_string()));
    }

    let excluded: HashSet<&str> = config.exclude.iter().map(String::as_str).collect();
    for name in excluded.iter().filter(|name| registry.lookup(name).is_none()) {
        tracing::warn!(lint = %name, "excluded lint is not registered");
    }

    let pattern = config.name_filter.as_deref().map(Regex::new).transpose()?;

    let mut candidates: Vec<&'r Lint> = registry
        .all()
        .iter()
        .filter(|lint| {
            let name = lint.name();
            if included.contains(name) {
                return true;
            }
            let meta = lint.metadata();
            (config.include_deprecated || !meta.deprecated)
                && config.source_enabled(meta.source)
                && pattern.as_ref().map_or(true, |p| p.is_match(name))
                && !excluded.contains(name)
        })
        .collect();

    // Included lints claim their exclusion group first; the rest go by name.
    candidates.sort_by(|a, b| {
        let a_key = (!included.contains(a.name()), a.name());
        let b_key = (!included.contains(b.name()), b.name());
        a_key.cmp(&b_key)
    });

    let mut kept_names: HashSet<&str> = HashSet::with_capacity(candidates.len());
    let mut lints = Vec::with_capacity(candidates.len());
    for lint in candidates {
        let conflict = registry
            .exclusive_with(lint.name())
            .find(|other| kept_names.contains(other));
        if let Some(winner) = conflict {
            tracing::debug!(
                dropped = lint.name(),
                kept = winner,
                "mutually exclusive lint dropped"
            );
            if included.contains(lint.name()) {
                tracing::warn!(
                    dropped = lint.name(),
                    kept = winner,
                    "explicitly included lint conflicts with another included lint"
                );
            }
            continue;
        }
        kept_names.insert(lint.name());
        lints.push(lint);
    }
    lints.sort_by(|a, b| a.name().cmp(b.name()));

    tracing::debug!(
        selected = lints.len(),
        registered = registry.len(),
        "lint selection computed"
    );
    Ok(Selection { lints })
}
