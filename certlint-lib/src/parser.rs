//! Certificate parsing from PEM and DER formats.

use crate::fields::{
    AiaEntry, Certificate, DateTime, DistinguishedName, Extension, ExtensionValue, PublicKeyInfo,
    SanEntry,
};
use crate::oid;
use crate::util;
use crate::CertlintError;
use x509_parser::prelude::*;

/// Parse a certificate from PEM or DER (auto-detected).
///
/// If the input begins with `-----BEGIN` (after stripping whitespace), it is
/// treated as PEM. Otherwise it is treated as DER. Empty or whitespace-only
/// input is reported as [`CertlintError::MissingCertificate`].
pub fn parse_cert(input: &[u8]) -> Result<Certificate, CertlintError> {
    if input.iter().all(|b| b.is_ascii_whitespace()) {
        return Err(CertlintError::MissingCertificate);
    }

    if util::is_pem(input) {
        parse_pem(input)
    } else {
        parse_der(input)
    }
}

/// Parse a certificate from PEM format.
pub fn parse_pem(input: &[u8]) -> Result<Certificate, CertlintError> {
    let (_, pem) = x509_parser::pem::parse_x509_pem(input)
        .map_err(|e| CertlintError::PemError(format!("{}", e)))?;

    if pem.label != "CERTIFICATE"
        && pem.label != "TRUSTED CERTIFICATE"
        && pem.label != "X509 CERTIFICATE"
    {
        return Err(CertlintError::PemError(format!(
            "expected CERTIFICATE, got {}",
            pem.label
        )));
    }

    parse_der(&pem.contents)
}

/// Parse a certificate from DER format.
pub fn parse_der(input: &[u8]) -> Result<Certificate, CertlintError> {
    let (remaining, x509) = X509Certificate::from_der(input)
        .map_err(|e| CertlintError::DerError(format!("{}", e)))?;

    // Keep only the certificate bytes, not any trailing data.
    let cert_len = input.len() - remaining.len();
    let cert_der = input.get(..cert_len).unwrap_or(input);
    build_certificate(&x509, cert_der)
}

fn build_certificate(x509: &X509Certificate, raw_der: &[u8]) -> Result<Certificate, CertlintError> {
    let tbs = &x509.tbs_certificate;

    let raw_version = tbs.version.0;
    if raw_version > 2 {
        return Err(CertlintError::ParseError(format!(
            "unsupported X.509 version {} (expected v1, v2, or v3)",
            raw_version + 1
        )));
    }

    Ok(Certificate {
        issuer: build_dn(&tbs.issuer),
        subject: build_dn(&tbs.subject),
        not_before: DateTime::from_unix(tbs.validity.not_before.timestamp()),
        not_after: DateTime::from_unix(tbs.validity.not_after.timestamp()),
        public_key: build_public_key_info(&tbs.subject_pki),
        extensions: tbs.extensions().iter().map(build_extension).collect(),
        raw_der: raw_der.to_vec(),
    })
}

fn build_dn(name: &X509Name) -> DistinguishedName {
    let mut components = Vec::new();
    for rdn in name.iter() {
        for attr in rdn.iter() {
            let key = util::oid_short_name(&attr.attr_type().to_id_string());
            let value = attr.as_str().unwrap_or("<binary>").to_string();
            components.push((key, value));
        }
    }
    DistinguishedName { components }
}

fn build_public_key_info(spki: &SubjectPublicKeyInfo) -> PublicKeyInfo {
    let oid_str = spki.algorithm.algorithm.to_id_string();

    let (algorithm, key_size) = match oid_str.as_str() {
        oid::RSA_ENCRYPTION => match spki.parsed() {
            Ok(x509_parser::public_key::PublicKey::RSA(rsa)) => {
                // Skip the leading zero used for DER positive integer encoding.
                let modulus = rsa
                    .modulus
                    .get(1..)
                    .filter(|_| rsa.modulus.first() == Some(&0))
                    .unwrap_or(rsa.modulus);
                let bits = (modulus.len() as u32) * 8
                    - modulus.first().map_or(0, |b| b.leading_zeros());
                ("RSA".into(), Some(bits))
            }
            _ => ("RSA".into(), None),
        },
        oid::EC_PUBLIC_KEY => ("EC".into(), None),
        oid::ED25519 => ("Ed25519".into(), None),
        oid::ED448 => ("Ed448".into(), None),
        _ => (oid_str, None),
    };

    PublicKeyInfo {
        algorithm,
        key_size,
    }
}

fn build_extension(ext: &X509Extension) -> Extension {
    let value = match ext.parsed_extension() {
        ParsedExtension::BasicConstraints(bc) => ExtensionValue::BasicConstraints { ca: bc.ca },
        ParsedExtension::SubjectAlternativeName(san) => ExtensionValue::SubjectAltName(
            san.general_names
                .iter()
                .map(general_name_to_san_entry)
                .collect(),
        ),
        ParsedExtension::SubjectKeyIdentifier(ski) => {
            ExtensionValue::SubjectKeyIdentifier(util::hex_colon_upper(ski.0))
        }
        ParsedExtension::AuthorityKeyIdentifier(aki) => ExtensionValue::AuthorityKeyIdentifier {
            key_id: aki
                .key_identifier
                .as_ref()
                .map(|ki| util::hex_colon_upper(ki.0)),
        },
        ParsedExtension::AuthorityInfoAccess(aia) => ExtensionValue::AuthorityInfoAccess(
            aia.accessdescs
                .iter()
                .map(|desc| {
                    let method = match desc.access_method.to_id_string().as_str() {
                        oid::ACCESS_OCSP => "OCSP".into(),
                        oid::ACCESS_CA_ISSUERS => "CA Issuers".into(),
                        other => other.to_string(),
                    };
                    AiaEntry {
                        method,
                        location: format_general_name(&desc.access_location),
                    }
                })
                .collect(),
        ),
        ParsedExtension::CertificatePolicies(policies) => ExtensionValue::CertificatePolicies(
            policies
                .iter()
                .map(|p| p.policy_id.to_id_string())
                .collect(),
        ),
        _ => ExtensionValue::Other,
    };

    Extension {
        oid: ext.oid.to_id_string(),
        critical: ext.critical,
        value,
        raw: ext.value.to_vec(),
    }
}

fn general_name_to_san_entry(gn: &GeneralName) -> SanEntry {
    match gn {
        GeneralName::DNSName(name) => SanEntry::Dns(name.to_string()),
        GeneralName::RFC822Name(email) => SanEntry::Email(email.to_string()),
        GeneralName::IPAddress(ip_bytes) => SanEntry::Ip(format_ip_bytes(ip_bytes)),
        GeneralName::URI(uri) => SanEntry::Uri(uri.to_string()),
        GeneralName::DirectoryName(dn) => SanEntry::DirName(build_dn(dn).to_oneline()),
        other => SanEntry::Other(format!("{:?}", other)),
    }
}

fn format_general_name(gn: &GeneralName) -> String {
    match general_name_to_san_entry(gn) {
        SanEntry::Dns(v)
        | SanEntry::Email(v)
        | SanEntry::Ip(v)
        | SanEntry::Uri(v)
        | SanEntry::DirName(v)
        | SanEntry::Other(v) => v,
    }
}

fn format_ip_bytes(bytes: &[u8]) -> String {
    if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
        std::net::Ipv4Addr::from(octets).to_string()
    } else if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
        util::format_ipv6_expanded(&std::net::Ipv6Addr::from(octets))
    } else {
        hex::encode(bytes)
    }
}
