//! Underscores in subdomain labels of dNSName entries.
//!
//! RFC 5280 4.2.1.6 requires dNSName in the "preferred name syntax" of
//! RFC 1034, which has no underscore. Before SC12 the BRs tolerated them
//! outside the registrable domain, so this only warns, and only for
//! certificates issued before the sunset date.

use crate::lint::{Lint, LintMetadata, LintResult, LintSource};
use crate::lints::util::{
    is_subscriber_cert, subdomain_labels, RFC5280_DATE, UNDERSCORE_SUNSET_DATE,
};
use crate::Certificate;

pub(super) fn lint() -> Lint {
    Lint::from_fns(
        LintMetadata {
            name: "w_rfc_dnsname_underscore_in_trd".into(),
            description: "DNSName MUST NOT contain underscore characters".into(),
            citation: "RFC5280: 4.2.1.6".into(),
            source: LintSource::Rfc5280,
            effective_date: RFC5280_DATE,
            ineffective_date: Some(UNDERSCORE_SUNSET_DATE),
            ..Default::default()
        },
        applies,
        execute,
    )
}

fn applies(cert: &Certificate) -> bool {
    is_subscriber_cert(cert) && !cert.dns_names().is_empty()
}

fn execute(cert: &Certificate) -> LintResult {
    let offending = cert.dns_names().into_iter().find(|name| {
        subdomain_labels(name)
            .iter()
            .any(|label| label.contains('_'))
    });
    match offending {
        Some(name) => LintResult::warn().with_details(format!(
            "DNSName ({name}) MUST NOT contain an underscore character"
        )),
        None => LintResult::pass(),
    }
}
