//! BR 7.1.2.1: root CA certificates MUST NOT contain extKeyUsage.

use crate::lint::{CertificateLint, Lint, LintMetadata, LintResult, LintSource};
use crate::lints::util::{is_root_ca, CAB_EFFECTIVE_DATE};
use crate::{oid, Certificate};

struct RootCaExtendedKeyUsagePresent;

impl CertificateLint for RootCaExtendedKeyUsagePresent {
    fn check_applies(&self, cert: &Certificate) -> bool {
        is_root_ca(cert)
    }

    fn execute(&self, cert: &Certificate) -> LintResult {
        if cert.has_extension(oid::EXT_EXTENDED_KEY_USAGE) {
            LintResult::error()
        } else {
            LintResult::pass()
        }
    }
}

pub(super) fn lint() -> Lint {
    Lint::new(
        LintMetadata {
            name: "e_root_ca_extended_key_usage_present".into(),
            description: "Root CA Certificate: extendedKeyUsage MUST NOT be present.".into(),
            citation: "BRs: 7.1.2.1".into(),
            source: LintSource::CabfBaselineRequirements,
            effective_date: CAB_EFFECTIVE_DATE,
            ..Default::default()
        },
        RootCaExtendedKeyUsagePresent,
    )
}
