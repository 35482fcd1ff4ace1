//! Repeated dNSName entries in the SAN (compared case-insensitively).

use crate::lint::{CertificateLint, Lint, LintMetadata, LintResult, LintSource};
use crate::lints::util::ZERO_DATE;
use crate::Certificate;
use std::collections::HashSet;

struct SanDnsNameDuplicate;

impl CertificateLint for SanDnsNameDuplicate {
    fn check_applies(&self, cert: &Certificate) -> bool {
        cert.san_extension().is_some()
    }

    fn execute(&self, cert: &Certificate) -> LintResult {
        let mut seen = HashSet::new();
        for name in cert.dns_names() {
            if !seen.insert(name.to_ascii_lowercase()) {
                return LintResult::notice().with_details(format!("SAN contains duplicate DNSName: {name}"));
            }
        }
        LintResult::pass()
    }
}

pub(super) fn lint() -> Lint {
    Lint::new(
        LintMetadata {
            name: "n_san_dns_name_duplicate".into(),
            description: "SAN DNSName contains duplicate values".into(),
            citation: "Community".into(),
            source: LintSource::Community,
            effective_date: ZERO_DATE,
            ..Default::default()
        },
        SanDnsNameDuplicate,
    )
}
