//! BR 7.1.4.2.1: subscriber certificates carry a subjectAltName extension.

use crate::lint::{Lint, LintMetadata, LintResult, LintSource};
use crate::lints::util::{is_subscriber_cert, CAB_EFFECTIVE_DATE};
use crate::{oid, Certificate};

pub(super) fn lint() -> Lint {
    Lint::from_fns(
        LintMetadata {
            name: "e_ext_san_missing".into(),
            description: "Subscriber certificates MUST contain the Subject Alternative Name extension".into(),
            citation: "BRs: 7.1.4.2.1".into(),
            source: LintSource::CabfBaselineRequirements,
            effective_date: CAB_EFFECTIVE_DATE,
            ..Default::default()
        },
        is_subscriber_cert,
        execute,
    )
}

fn execute(cert: &Certificate) -> LintResult {
    if cert.has_extension(oid::EXT_SUBJECT_ALT_NAME) {
        LintResult::pass()
    } else {
        LintResult::error()
    }
}
