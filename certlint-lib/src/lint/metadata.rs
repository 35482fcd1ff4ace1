//! Lint metadata: names, sources, categories and effective windows.

use crate::CertlintError;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;
use time::OffsetDateTime;

/// The standards body or origin a lint's requirement comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum LintSource {
    /// CA/Browser Forum Baseline Requirements for TLS server certificates.
    #[serde(rename = "CABF_BR")]
    CabfBaselineRequirements,
    /// CA/Browser Forum Extended Validation Guidelines.
    #[serde(rename = "CABF_EV")]
    CabfEvGuidelines,
    /// CA/Browser Forum S/MIME Baseline Requirements.
    #[serde(rename = "CABF_SMIME_BR")]
    CabfSmimeBaselineRequirements,
    #[serde(rename = "RFC5280")]
    Rfc5280,
    #[serde(rename = "RFC5480")]
    Rfc5480,
    #[serde(rename = "RFC5891")]
    Rfc5891,
    #[serde(rename = "Mozilla")]
    MozillaRootStorePolicy,
    #[serde(rename = "Apple")]
    AppleRootStorePolicy,
    #[serde(rename = "ETSI_ESI")]
    EtsiEsi,
    /// Widely agreed best practice without a normative citation.
    #[serde(rename = "Community")]
    Community,
    /// Lints added by the embedding application.
    #[serde(rename = "Custom")]
    Custom,
}

impl LintSource {
    pub const ALL: &'static [LintSource] = &[
        LintSource::CabfBaselineRequirements,
        LintSource::CabfEvGuidelines,
        LintSource::CabfSmimeBaselineRequirements,
        LintSource::Rfc5280,
        LintSource::Rfc5480,
        LintSource::Rfc5891,
        LintSource::MozillaRootStorePolicy,
        LintSource::AppleRootStorePolicy,
        LintSource::EtsiEsi,
        LintSource::Community,
        LintSource::Custom,
    ];

    /// Canonical tag, as used in configuration files and JSON output.
    pub fn as_str(&self) -> &'static str {
        match self {
            LintSource::CabfBaselineRequirements => "CABF_BR",
            LintSource::CabfEvGuidelines => "CABF_EV",
            LintSource::CabfSmimeBaselineRequirements => "CABF_SMIME_BR",
            LintSource::Rfc5280 => "RFC5280",
            LintSource::Rfc5480 => "RFC5480",
            LintSource::Rfc5891 => "RFC5891",
            LintSource::MozillaRootStorePolicy => "Mozilla",
            LintSource::AppleRootStorePolicy => "Apple",
            LintSource::EtsiEsi => "ETSI_ESI",
            LintSource::Community => "Community",
            LintSource::Custom => "Custom",
        }
    }
}

impl std::fmt::Display for LintSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LintSource {
    type Err = CertlintError;

    /// Case-insensitive; `-` and `_` are interchangeable, and the short
    /// forms `BR`, `EV` and `SMIME_BR` are accepted.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_uppercase().replace('-', "_");
        let source = match normalized.as_str() {
            "CABF_BR" | "BR" => LintSource::CabfBaselineRequirements,
            "CABF_EV" | "EV" => LintSource::CabfEvGuidelines,
            "CABF_SMIME_BR" | "SMIME_BR" => LintSource::CabfSmimeBaselineRequirements,
            "RFC5280" => LintSource::Rfc5280,
            "RFC5480" => LintSource::Rfc5480,
            "RFC5891" => LintSource::Rfc5891,
            "MOZILLA" => LintSource::MozillaRootStorePolicy,
            "APPLE" => LintSource::AppleRootStorePolicy,
            "ETSI_ESI" => LintSource::EtsiEsi,
            "COMMUNITY" => LintSource::Community,
            "CUSTOM" => LintSource::Custom,
            _ => return Err(CertlintError::UnknownSource(s.to_string())),
        };
        Ok(source)
    }
}

impl TryFrom<String> for LintSource {
    type Error = CertlintError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

/// Default severity family of a lint, encoded in its name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LintCategory {
    /// `e_` lints report violations of MUST/SHALL requirements.
    Error,
    /// `w_` lints report SHOULD-level problems.
    Warn,
    /// `n_` lints report noteworthy but permitted choices.
    Notice,
    /// `i_` lints are informational.
    Info,
    /// Names without a recognized prefix.
    Uncategorized,
}

impl LintCategory {
    pub fn from_name(name: &str) -> Self {
        match name.split_once('_').map(|(prefix, _)| prefix) {
            Some("e") => LintCategory::Error,
            Some("w") => LintCategory::Warn,
            Some("n") => LintCategory::Notice,
            Some("i") => LintCategory::Info,
            _ => LintCategory::Uncategorized,
        }
    }
}

/// Immutable descriptor carried by every lint.
///
/// Lint modules usually fill in the interesting fields and take the rest
/// from [`Default`]:
///
/// ```
/// use certlint_lib::{LintMetadata, LintSource};
///
/// let meta = LintMetadata {
///     name: "e_example".into(),
///     description: "Example requirement".into(),
///     citation: "RFC 5280: 4.2".into(),
///     source: LintSource::Rfc5280,
///     ..Default::default()
/// };
/// assert!(meta.ineffective_date.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LintMetadata {
    /// Globally unique name, prefixed with its category (`e_`, `w_`, `n_`, `i_`).
    pub name: String,
    pub description: String,
    pub citation: String,
    pub source: LintSource,
    /// Certificates issued before this instant are not checked.
    #[serde(with = "time::serde::rfc3339")]
    pub effective_date: OffsetDateTime,
    /// Certificates issued on or after this instant are not checked.
    #[serde(with = "time::serde::rfc3339::option")]
    pub ineffective_date: Option<OffsetDateTime>,
    /// Lints that must never be selected in the same run as this one.
    pub mutually_exclusive_with: BTreeSet<String>,
    /// Deprecated lints only run when named explicitly or opted in.
    pub deprecated: bool,
}

impl Default for LintMetadata {
    fn default() -> Self {
        Self {
            name: String::new(),
            description: String::new(),
            citation: String::new(),
            source: LintSource::Custom,
            effective_date: OffsetDateTime::UNIX_EPOCH,
            ineffective_date: None,
            mutually_exclusive_with: BTreeSet::new(),
            deprecated: false,
        }
    }
}

impl LintMetadata {
    pub fn category(&self) -> LintCategory {
        LintCategory::from_name(&self.name)
    }

    /// Whether a certificate issued at `timestamp` (Unix seconds) falls
    /// inside `[effective_date, ineffective_date)`.
    pub fn is_effective_at(&self, timestamp: i64) -> bool {
        let after_start = timestamp >= self.effective_date.unix_timestamp();
        let before_end = self
            .ineffective_date
            .map_or(true, |end| timestamp < end.unix_timestamp());
        after_start && before_end
    }

    /// Check the invariants the registry relies on.
    pub(crate) fn validate(&self) -> Result<(), CertlintError> {
        let invalid = |reason: &str| CertlintError::InvalidMetadata {
            name: self.name.clone(),
            reason: reason.to_string(),
        };
        if self.name.trim().is_empty() {
            return Err(invalid("name must not be empty"));
        }
        if self.name.chars().any(char::is_whitespace) {
            return Err(invalid("name must not contain whitespace"));
        }
        if let Some(end) = self.ineffective_date {
            if end <= self.effective_date {
                return Err(invalid("ineffective date must be after the effective date"));
            }
        }
        if self.mutually_exclusive_with.contains(&self.name) {
            return Err(invalid("a lint cannot be mutually exclusive with itself"));
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn windowed(start: OffsetDateTime, end: Option<OffsetDateTime>) -> LintMetadata {
        LintMetadata {
            name: "e_windowed".into(),
            effective_date: start,
            ineffective_date: end,
            ..Default::default()
        }
    }

    #[test]
    fn category_follows_name_prefix() {
        assert_eq!(LintCategory::from_name("e_ext_san_missing"), LintCategory::Error);
        assert_eq!(LintCategory::from_name("w_rfc_thing"), LintCategory::Warn);
        assert_eq!(LintCategory::from_name("n_thing"), LintCategory::Notice);
        assert_eq!(LintCategory::from_name("i_thing"), LintCategory::Info);
        assert_eq!(LintCategory::from_name("thing"), LintCategory::Uncategorized);
        assert_eq!(LintCategory::from_name("x_thing"), LintCategory::Uncategorized);
    }

    #[test]
    fn sources_parse_case_insensitively() {
        assert_eq!(
            "cabf_br".parse::<LintSource>().unwrap(),
            LintSource::CabfBaselineRequirements
        );
        assert_eq!(
            "SMIME-BR".parse::<LintSource>().unwrap(),
            LintSource::CabfSmimeBaselineRequirements
        );
        assert_eq!("community".parse::<LintSource>().unwrap(), LintSource::Community);
        assert!(matches!(
            "IETF".parse::<LintSource>(),
            Err(CertlintError::UnknownSource(s)) if s == "IETF"
        ));
    }

    #[test]
    fn every_source_round_trips_through_its_tag() {
        for source in LintSource::ALL {
            assert_eq!(source.as_str().parse::<LintSource>().unwrap(), *source);
        }
    }

    #[test]
    fn effective_window_is_half_open() {
        let start = datetime!(2020-01-01 0:00 UTC);
        let end = datetime!(2021-01-01 0:00 UTC);
        let meta = windowed(start, Some(end));

        assert!(!meta.is_effective_at(start.unix_timestamp() - 1));
        assert!(meta.is_effective_at(start.unix_timestamp()));
        assert!(meta.is_effective_at(end.unix_timestamp() - 1));
        assert!(!meta.is_effective_at(end.unix_timestamp()));
    }

    #[test]
    fn open_ended_window_never_expires() {
        let meta = windowed(datetime!(2020-01-01 0:00 UTC), None);
        assert!(meta.is_effective_at(datetime!(2100-01-01 0:00 UTC).unix_timestamp()));
    }

    #[test]
    fn inverted_window_is_rejected() {
        let start = datetime!(2020-01-01 0:00 UTC);
        let meta = windowed(start, Some(start));
        assert!(matches!(
            meta.validate(),
            Err(CertlintError::InvalidMetadata { .. })
        ));
    }

    #[test]
    fn self_exclusion_is_rejected() {
        let mut meta = windowed(OffsetDateTime::UNIX_EPOCH, None);
        meta.mutually_exclusive_with.insert("e_windowed".into());
        assert!(meta.validate().is_err());
    }
}
