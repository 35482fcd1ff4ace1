//! BR 7.1.6.4: individual-validated certificates carry a countryName.
//!
//! If the certificate asserts the policy identifier 2.23.140.1.2.3, then it
//! MUST also include (i) either organizationName or givenName and surname,
//! (ii) localityName (to the extent such field is required under Section
//! 7.1.4.2.2), (iii) stateOrProvinceName (to the extent required under
//! Section 7.1.4.2.2), and (iv) countryName in the Subject field.

use crate::lint::{Lint, LintMetadata, LintResult, LintSource};
use crate::lints::util::CAB_EFFECTIVE_DATE;
use crate::{oid, Certificate};

pub(super) fn lint() -> Lint {
    Lint::from_fns(
        LintMetadata {
            name: "e_cert_policy_iv_requires_country".into(),
            description: "If certificate policy 2.23.140.1.2.3 is included, countryName MUST be included in the subject".into(),
            citation: "BRs: 7.1.6.4".into(),
            source: LintSource::CabfBaselineRequirements,
            effective_date: CAB_EFFECTIVE_DATE,
            ..Default::default()
        },
        applies,
        execute,
    )
}

fn applies(cert: &Certificate) -> bool {
    cert.has_policy(oid::POLICY_BR_INDIVIDUAL_VALIDATED)
}

fn execute(cert: &Certificate) -> LintResult {
    if cert.subject.has("C") {
        LintResult::pass()
    } else {
        LintResult::error()
    }
}
