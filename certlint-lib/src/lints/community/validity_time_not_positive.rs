//! notAfter before notBefore leaves the certificate with no validity period.

use crate::lint::{Lint, LintMetadata, LintResult, LintSource};
use crate::lints::util::ZERO_DATE;
use crate::Certificate;

pub(super) fn lint() -> Lint {
    Lint::from_fns(
        LintMetadata {
            name: "e_validity_time_not_positive".into(),
            description: "Certificates MUST have a positive time for which they are valid".into(),
            citation: "Community".into(),
            source: LintSource::Community,
            effective_date: ZERO_DATE,
            ..Default::default()
        },
        |_| true,
        execute,
    )
}

fn execute(cert: &Certificate) -> LintResult {
    if cert.not_before.timestamp > cert.not_after.timestamp {
        LintResult::error()
    } else {
        LintResult::pass()
    }
}
