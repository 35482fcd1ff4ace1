//! Predicates and constants shared by the lint modules.

use crate::{oid, Certificate};
use time::macros::datetime;
use time::OffsetDateTime;

/// Lints that have applied to every certificate ever issued.
pub const ZERO_DATE: OffsetDateTime = datetime!(1970-01-01 0:00 UTC);
/// Publication of RFC 5280.
pub const RFC5280_DATE: OffsetDateTime = datetime!(2008-05-01 0:00 UTC);
/// Effective date of the CA/Browser Forum Baseline Requirements.
pub const CAB_EFFECTIVE_DATE: OffsetDateTime = datetime!(2012-07-01 0:00 UTC);
/// Ballot SC12: no underscores in dNSName after this date.
pub const UNDERSCORE_SUNSET_DATE: OffsetDateTime = datetime!(2019-04-01 0:00 UTC);

/// End-entity certificate: not a CA and not self-issued.
pub fn is_subscriber_cert(cert: &Certificate) -> bool {
    !cert.is_ca() && !cert.is_self_issued()
}

pub fn is_root_ca(cert: &Certificate) -> bool {
    cert.is_ca() && cert.is_self_issued()
}

pub fn is_ev(cert: &Certificate) -> bool {
    cert.has_policy(oid::POLICY_EV)
}

/// Asserts one of the S/MIME BR legacy generation policies.
pub fn is_legacy_smime(cert: &Certificate) -> bool {
    [
        oid::POLICY_SMIME_MAILBOX_LEGACY,
        oid::POLICY_SMIME_ORGANIZATION_LEGACY,
        oid::POLICY_SMIME_SPONSOR_LEGACY,
        oid::POLICY_SMIME_INDIVIDUAL_LEGACY,
    ]
    .iter()
    .any(|policy| cert.has_policy(policy))
}

/// The parts of a URI the lints look at.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Uri<'a> {
    /// Lowercased scheme.
    pub scheme: String,
    /// Host without userinfo, port or IPv6 brackets. Empty for URIs without
    /// an authority (e.g. `mailto:`).
    pub host: &'a str,
}

/// Split a URI reference into scheme and host.
///
/// A string without a scheme is a relative reference with an empty scheme,
/// and an empty host unless it starts with `//`. Returns `None` for strings
/// that cannot be a URI reference: embedded whitespace or control
/// characters, a colon in the first segment of a relative reference, or a
/// port that is not numeric.
pub fn parse_uri(input: &str) -> Option<Uri<'_>> {
    if input.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return None;
    }
    let (scheme, rest) = match split_scheme(input) {
        Some(parts) => parts,
        None => {
            let first_segment = input.split('/').next().unwrap_or_default();
            if first_segment.contains(':') {
                return None;
            }
            ("", input)
        }
    };

    let host = match rest.strip_prefix("//") {
        Some(after) => {
            let authority = after
                .split(|c| matches!(c, '/' | '?' | '#'))
                .next()
                .unwrap_or_default();
            let host_port = authority
                .rsplit_once('@')
                .map_or(authority, |(_, host_port)| host_port);
            split_host(host_port)?
        }
        None => "",
    };

    Some(Uri {
        scheme: scheme.to_ascii_lowercase(),
        host,
    })
}

/// `scheme:rest` when the text before the first colon is a valid scheme.
fn split_scheme(input: &str) -> Option<(&str, &str)> {
    let (scheme, rest) = input.split_once(':')?;
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    valid.then_some((scheme, rest))
}

fn split_host(host_port: &str) -> Option<&str> {
    if let Some(bracketed) = host_port.strip_prefix('[') {
        let (host, after) = bracketed.split_once(']')?;
        return match after {
            "" => Some(host),
            port => port
                .strip_prefix(':')
                .filter(|p| p.chars().all(|c| c.is_ascii_digit()))
                .map(|_| host),
        };
    }
    match host_port.rsplit_once(':') {
        Some((host, port)) if port.chars().all(|c| c.is_ascii_digit()) => Some(host),
        Some(_) => None,
        None => Some(host_port),
    }
}

/// Whether the last label of `host` is a top-level domain in the ICANN
/// section of the public suffix list.
///
/// Internal names (`corp`, `local`, `localhost`, ...), IP literals and the
/// empty host fail.
pub fn has_valid_tld(host: &str) -> bool {
    let host = host.trim_end_matches('.').to_ascii_lowercase();
    let tld = host.rsplit('.').next().unwrap_or_default();
    !tld.is_empty()
        && psl::suffix(tld.as_bytes())
            .is_some_and(|suffix| suffix.is_known() && suffix.typ() == Some(psl::Type::Icann))
}

/// Number of labels in the ICANN public suffix of `name`. Private suffixes
/// (e.g. `blogspot.com`) are skipped in favour of the ICANN suffix beneath
/// them; unknown top-level domains count as a one-label suffix.
fn icann_suffix_labels(name: &str) -> Option<usize> {
    let mut candidate = name;
    loop {
        let suffix = psl::suffix(candidate.as_bytes())?;
        let text = std::str::from_utf8(suffix.as_bytes()).ok()?;
        if suffix.typ() != Some(psl::Type::Private) {
            return Some(text.split('.').count());
        }
        candidate = text.split_once('.')?.1;
    }
}

/// Labels of `name` to the left of its registrable domain (the ICANN public
/// suffix plus one label), so `a_b.www.example.co.uk` yields
/// `["a_b", "www"]`. Names that are a public suffix or a registrable domain
/// have no subdomain labels.
pub fn subdomain_labels(name: &str) -> Vec<&str> {
    let name = name.trim_end_matches('.');
    let labels: Vec<&str> = name.split('.').collect();
    let registrable = icann_suffix_labels(&name.to_ascii_lowercase()).map_or(2, |n| n + 1);
    let keep = labels.len().saturating_sub(registrable);
    labels.into_iter().take(keep).collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn uri_host_and_scheme() {
        let uri = parse_uri("HTTP://user@ocsp.example.com:8080/path?q#f").unwrap();
        assert_eq!(uri.scheme, "http");
        assert_eq!(uri.host, "ocsp.example.com");

        let uri = parse_uri("ldap://[2001:db8::1]/cn=ca").unwrap();
        assert_eq!(uri.scheme, "ldap");
        assert_eq!(uri.host, "2001:db8::1");

        assert_eq!(parse_uri("mailto:ca@example.com").unwrap().host, "");
    }

    #[test]
    fn uri_without_scheme_is_relative() {
        let uri = parse_uri("ocsp.example.com").unwrap();
        assert_eq!(uri.scheme, "");
        assert_eq!(uri.host, "");

        let uri = parse_uri("//ocsp.example.com/path").unwrap();
        assert_eq!(uri.scheme, "");
        assert_eq!(uri.host, "ocsp.example.com");
    }

    #[test]
    fn uri_rejects_garbage() {
        assert!(parse_uri("1http://x.example.com").is_none());
        assert!(parse_uri(":no-scheme").is_none());
        assert!(parse_uri("http://x.example.com:port/").is_none());
        assert!(parse_uri("http://bad host.example.com/").is_none());
        assert!(parse_uri("http://[::1/").is_none());
    }

    #[test]
    fn tld_shape() {
        assert!(has_valid_tld("ocsp.example.com"));
        assert!(has_valid_tld("ca.example.de"));
        assert!(has_valid_tld("ca.example.com."));
        assert!(has_valid_tld("OCSP.Example.ORG"));
        assert!(!has_valid_tld("ocsp.corp"));
        assert!(!has_valid_tld("server.LOCAL"));
        assert!(!has_valid_tld("ca.internal"));
        assert!(!has_valid_tld("localhost"));
        assert!(!has_valid_tld("192.0.2.1"));
        assert!(!has_valid_tld(""));
    }

    #[test]
    fn subdomains_exclude_registrable_domain() {
        assert_eq!(subdomain_labels("a_b.www.example.com"), vec!["a_b", "www"]);
        assert_eq!(subdomain_labels("www.example.com."), vec!["www"]);
        assert!(subdomain_labels("under_score.com").is_empty());
        assert!(subdomain_labels("com").is_empty());
        assert!(subdomain_labels("foo.under_score.co.uk").is_empty());
        assert_eq!(subdomain_labels("a_b.www.Example.CO.UK"), vec!["a_b", "www"]);
        assert_eq!(subdomain_labels("x_y.site.blogspot.com"), vec!["x_y", "site"]);
    }
}
