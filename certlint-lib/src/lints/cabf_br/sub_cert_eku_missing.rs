//! BR 7.1.2.3: subscriber certificates carry extKeyUsage.
//!
//! Either id-kp-serverAuth or id-kp-clientAuth or both MUST be present.

use crate::lint::{Lint, LintMetadata, LintResult, LintSource};
use crate::lints::util::{is_subscriber_cert, CAB_EFFECTIVE_DATE};
use crate::{oid, Certificate};

pub(super) fn lint() -> Lint {
    Lint::from_fns(
        LintMetadata {
            name: "e_sub_cert_eku_missing".into(),
            description: "Subscriber certificates MUST have the extended key usage extension present".into(),
            citation: "BRs: 7.1.2.3".into(),
            source: LintSource::CabfBaselineRequirements,
            effective_date: CAB_EFFECTIVE_DATE,
            ..Default::default()
        },
        is_subscriber_cert,
        execute,
    )
}

fn execute(cert: &Certificate) -> LintResult {
    if cert.has_extension(oid::EXT_EXTENDED_KEY_USAGE) {
        LintResult::pass()
    } else {
        LintResult::error()
    }
}
