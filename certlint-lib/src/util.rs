//! Shared encoding utilities.

use crate::oid;

/// Format bytes as colon-separated uppercase hex (e.g., "AB:CD:EF").
pub fn hex_colon_upper(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(":")
}

/// True when the input starts with a PEM armor line (ignoring leading whitespace).
pub fn is_pem(input: &[u8]) -> bool {
    let start = input
        .iter()
        .position(|b| !b.is_ascii_whitespace())
        .unwrap_or(input.len());
    input
        .get(start..)
        .is_some_and(|rest| rest.starts_with(b"-----BEGIN"))
}

/// Short attribute name for a DN attribute OID, or the OID itself.
pub fn oid_short_name(attr_oid: &str) -> String {
    match attr_oid {
        oid::COMMON_NAME => "CN".into(),
        oid::SURNAME => "SN".into(),
        oid::SERIAL_NUMBER => "serialNumber".into(),
        oid::COUNTRY => "C".into(),
        oid::LOCALITY => "L".into(),
        oid::STATE_OR_PROVINCE => "ST".into(),
        oid::STREET_ADDRESS => "street".into(),
        oid::ORGANIZATION => "O".into(),
        oid::ORGANIZATIONAL_UNIT => "OU".into(),
        oid::TITLE => "title".into(),
        oid::POSTAL_CODE => "postalCode".into(),
        oid::GIVEN_NAME => "GN".into(),
        oid::EMAIL_ADDRESS => "emailAddress".into(),
        oid::DOMAIN_COMPONENT => "DC".into(),
        other => other.to_string(),
    }
}

/// Fully expanded IPv6 text form (eight groups, no `::` compression).
pub fn format_ipv6_expanded(addr: &std::net::Ipv6Addr) -> String {
    addr.segments()
        .iter()
        .map(|s| format!("{:X}", s))
        .collect::<Vec<_>>()
        .join(":")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn detects_pem_after_whitespace() {
        assert!(is_pem(b"\n  -----BEGIN CERTIFICATE-----"));
        assert!(!is_pem(&[0x30, 0x82, 0x01]));
        assert!(!is_pem(b""));
    }

    #[test]
    fn expands_ipv6() {
        let addr: std::net::Ipv6Addr = "2001:db8::1".parse().unwrap();
        assert_eq!(format_ipv6_expanded(&addr), "2001:DB8:0:0:0:0:0:1");
    }

    #[test]
    fn short_names_fall_back_to_oid() {
        assert_eq!(oid_short_name(oid::COUNTRY), "C");
        assert_eq!(oid_short_name("1.2.3.4"), "1.2.3.4");
    }
}
