//! S/MIME BR 7.1.2.3c: authorityInformationAccess in legacy certificates.
//!
//! The extension MAY contain id-ad-ocsp and id-ad-caIssuers access methods.
//! For the legacy generation, when provided, at least one accessMethod of
//! each kind SHALL have the URI scheme HTTP; other schemes MAY be present.
//! A location whose host is not under a public top-level domain is flagged.

use crate::lint::{Lint, LintMetadata, LintResult, LintSource};
use crate::lints::util::{has_valid_tld, is_legacy_smime, parse_uri, CAB_EFFECTIVE_DATE};
use crate::Certificate;

pub(super) fn lint() -> Lint {
    Lint::from_fns(
        LintMetadata {
            name: "w_smime_legacy_aia_contains_internal_names".into(),
            description: "SMIME Legacy certificates authorityInformationAccess: when provided, at least one accessMethod SHALL have the URI scheme HTTP. Other schemes (LDAP, FTP, ...) MAY be present.".into(),
            citation: "BRs: 7.1.2.3c".into(),
            source: LintSource::CabfSmimeBaselineRequirements,
            effective_date: CAB_EFFECTIVE_DATE,
            ..Default::default()
        },
        is_legacy_smime,
        execute,
    )
}

fn execute(cert: &Certificate) -> LintResult {
    for locations in [cert.ocsp_urls(), cert.ca_issuer_urls()] {
        if let Some(result) = check_locations(&locations) {
            return result;
        }
    }
    LintResult::pass()
}

/// First problem among one access method's locations, if any.
fn check_locations(locations: &[&str]) -> Option<LintResult> {
    let mut has_http = false;
    for location in locations {
        let Some(uri) = parse_uri(location) else {
            return Some(LintResult::error().with_details(format!("unparseable URI {location}")));
        };
        if !has_valid_tld(uri.host) {
            return Some(LintResult::warn().with_details(format!("internal name in {location}")));
        }
        has_http |= uri.scheme == "http";
    }
    if !has_http && !locations.is_empty() {
        return Some(
            LintResult::error().with_details("at least one accessMethod MUST have the URI scheme HTTP"),
        );
    }
    None
}
