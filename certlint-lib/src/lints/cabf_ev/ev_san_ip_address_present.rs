//! EVG 9.2.1: EV certificates MUST NOT contain IP addresses in the SAN.
//!
//! This extension MUST contain one or more host Domain Name(s) owned or
//! controlled by the Subject. Wildcard certificates are not allowed.

use crate::lint::{Lint, LintMetadata, LintResult, LintSource};
use crate::lints::util::{is_ev, is_subscriber_cert, ZERO_DATE};
use crate::Certificate;

pub(super) fn lint() -> Lint {
    Lint::from_fns(
        LintMetadata {
            name: "e_ev_san_ip_address_present".into(),
            description: "The Subject Alternate Name extension MUST contain only 'dnsName' name types".into(),
            citation: "EVGs: 9.2.1".into(),
            source: LintSource::CabfEvGuidelines,
            effective_date: ZERO_DATE,
            ..Default::default()
        },
        applies,
        execute,
    )
}

fn applies(cert: &Certificate) -> bool {
    is_subscriber_cert(cert) && is_ev(cert)
}

fn execute(cert: &Certificate) -> LintResult {
    match cert.ip_addresses().as_slice() {
        [] => LintResult::pass(),
        ips => LintResult::error().with_details(ips.join(", ")),
    }
}
