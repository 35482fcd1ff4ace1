//! Per-run configuration.

use super::metadata::LintSource;
use crate::CertlintError;
use serde::Deserialize;
use std::collections::BTreeSet;
use std::path::Path;
use time::OffsetDateTime;

/// Options controlling which lints run and how.
///
/// The default value selects every non-deprecated lint from every source
/// and compares effective dates against each certificate's notBefore.
///
/// A TOML file uses the same field names:
///
/// ```toml
/// exclude = ["n_san_dns_name_duplicate"]
/// exclude_sources = ["Community"]
/// reference_time = "2024-01-01T00:00:00Z"
/// workers = 4
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RunConfig {
    /// Compare effective dates against this instant instead of notBefore.
    #[serde(with = "time::serde::rfc3339::option")]
    pub reference_time: Option<OffsetDateTime>,
    /// Lints that always run, regardless of source, deprecation, pattern or
    /// exclude list. Unknown names are a configuration error.
    pub include: Vec<String>,
    /// Lints that never run unless also included.
    pub exclude: Vec<String>,
    /// Only run lints from these sources. `None` enables every source.
    pub sources: Option<BTreeSet<LintSource>>,
    /// Never run lints from these sources (applied after `sources`).
    pub exclude_sources: BTreeSet<LintSource>,
    /// Regular expression a lint name must match to run.
    pub name_filter: Option<String>,
    /// Run deprecated lints too.
    pub include_deprecated: bool,
    /// Size of the worker pool. `None` uses the shared rayon pool.
    pub workers: Option<usize>,
}

impl RunConfig {
    /// Parse a TOML document.
    pub fn from_toml_str(input: &str) -> Result<Self, CertlintError> {
        Ok(toml::from_str(input)?)
    }

    /// Read and parse a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, CertlintError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Whether lints from `source` pass the source filters.
    pub fn source_enabled(&self, source: LintSource) -> bool {
        let allowed = self
            .sources
            .as_ref()
            .map_or(true, |enabled| enabled.contains(&source));
        allowed && !self.exclude_sources.contains(&source)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::datetime;

    #[test]
    fn empty_document_is_the_default() {
        assert_eq!(RunConfig::from_toml_str("").unwrap(), RunConfig::default());
    }

    #[test]
    fn parses_every_field() {
        let config = RunConfig::from_toml_str(
            r#"
            reference_time = "2024-01-01T00:00:00Z"
            include = ["e_one"]
            exclude = ["w_two"]
            sources = ["cabf_br", "RFC5280"]
            exclude_sources = ["Community"]
            name_filter = "^e_"
            include_deprecated = true
            workers = 2
            "#,
        )
        .unwrap();

        assert_eq!(config.reference_time, Some(datetime!(2024-01-01 0:00 UTC)));
        assert_eq!(config.include, vec!["e_one"]);
        assert_eq!(config.exclude, vec!["w_two"]);
        assert_eq!(
            config.sources,
            Some([LintSource::CabfBaselineRequirements, LintSource::Rfc5280].into())
        );
        assert!(config.exclude_sources.contains(&LintSource::Community));
        assert_eq!(config.name_filter.as_deref(), Some("^e_"));
        assert!(config.include_deprecated);
        assert_eq!(config.workers, Some(2));
    }

    #[test]
    fn unknown_source_is_a_configuration_error() {
        let err = RunConfig::from_toml_str(r#"sources = ["IETF"]"#).unwrap_err();
        assert!(matches!(err, CertlintError::Config(_)));
        assert!(err.to_string().contains("IETF"));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(RunConfig::from_toml_str("verbose = true").is_err());
    }

    #[test]
    fn source_filters_combine() {
        let config = RunConfig {
            sources: Some([LintSource::Community, LintSource::Rfc5280].into()),
            exclude_sources: [LintSource::Community].into(),
            ..Default::default()
        };
        assert!(config.source_enabled(LintSource::Rfc5280));
        assert!(!config.source_enabled(LintSource::Community));
        assert!(!config.source_enabled(LintSource::CabfEvGuidelines));
        assert!(RunConfig::default().source_enabled(LintSource::Custom));
    }

    #[test]
    fn loads_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("certlint.toml");
        std::fs::write(&path, "exclude = [\"e_one\"]\n").unwrap();
        let config = RunConfig::from_file(&path).unwrap();
        assert_eq!(config.exclude, vec!["e_one"]);

        let missing = RunConfig::from_file(&dir.path().join("missing.toml"));
        assert!(matches!(missing, Err(CertlintError::Io(_))));
    }
}
