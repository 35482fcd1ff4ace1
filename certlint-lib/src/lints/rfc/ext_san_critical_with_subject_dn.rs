//! RFC 5280 4.2.1.6: SAN SHOULD be non-critical when the subject is set.
//!
//! If the subject field contains an empty sequence, the subjectAltName
//! extension MUST be marked critical; otherwise it SHOULD NOT be.

use crate::lint::{Lint, LintMetadata, LintResult, LintSource};
use crate::lints::util::RFC5280_DATE;
use crate::Certificate;

pub(super) fn lint() -> Lint {
    Lint::from_fns(
        LintMetadata {
            name: "w_ext_san_critical_with_subject_dn".into(),
            description: "If the subject contains a distinguished name, subjectAlternateName SHOULD be non-critical".into(),
            citation: "RFC 5280: Sections 4.2.1.6".into(),
            source: LintSource::Rfc5280,
            effective_date: RFC5280_DATE,
            ..Default::default()
        },
        |cert| cert.san_extension().is_some(),
        execute,
    )
}

fn execute(cert: &Certificate) -> LintResult {
    let critical = cert.san_extension().is_some_and(|ext| ext.critical);
    if critical && !cert.subject.is_empty() {
        LintResult::warn()
    } else {
        LintResult::pass()
    }
}
