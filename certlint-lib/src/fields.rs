//! Certificate data types handed to lints.
//!
//! A [`Certificate`] is built once by the parser and only ever read
//! afterwards. Lints receive `&Certificate` and use the accessors below
//! instead of re-parsing DER, falling back to [`Extension::raw`] for
//! anything the typed model does not cover.

use crate::oid;

/// A parsed X.509 certificate with the fields lints inspect.
#[derive(Debug, Clone)]
pub struct Certificate {
    /// Issuer distinguished name.
    pub issuer: DistinguishedName,
    /// Subject distinguished name.
    pub subject: DistinguishedName,
    /// Validity start date.
    pub not_before: DateTime,
    /// Validity end date.
    pub not_after: DateTime,
    /// Public key information.
    pub public_key: PublicKeyInfo,
    /// X.509v3 extensions, in certificate order.
    pub extensions: Vec<Extension>,
    /// Raw DER bytes of the entire certificate.
    pub raw_der: Vec<u8>,
}

/// Distinguished name with ordered components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DistinguishedName {
    /// Ordered list of (attribute_type, value) pairs.
    /// Attribute types use short names where known (e.g., "CN", "O", "C").
    pub components: Vec<(String, String)>,
}

impl DistinguishedName {
    /// Format as a comma-separated one-line string, e.g. "C = US, O = Org, CN = example.com".
    ///
    /// Values containing commas, equals signs, or backslashes are escaped.
    pub fn to_oneline(&self) -> String {
        let mut result = String::new();
        for (i, (k, v)) in self.components.iter().enumerate() {
            if i > 0 {
                result.push_str(", ");
            }
            result.push_str(k);
            result.push_str(" = ");
            for ch in v.chars() {
                match ch {
                    '\\' => result.push_str("\\\\"),
                    ',' => result.push_str("\\,"),
                    '=' => result.push_str("\\="),
                    _ => result.push(ch),
                }
            }
        }
        result
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    /// All values recorded for an attribute short name (e.g. "C").
    pub fn values<'a>(&'a self, key: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.components
            .iter()
            .filter(move |(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn has(&self, key: &str) -> bool {
        self.values(key).next().is_some()
    }
}

/// Subject public key summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublicKeyInfo {
    /// "RSA", "EC", "Ed25519", "Ed448", or the algorithm OID when unknown.
    pub algorithm: String,
    /// RSA modulus length in bits. `None` for other algorithms and for RSA
    /// keys whose encoding could not be decoded.
    pub key_size: Option<u32>,
}

/// A certificate extension.
#[derive(Debug, Clone)]
pub struct Extension {
    /// OID as a dotted-decimal string.
    pub oid: String,
    /// Whether this extension is marked critical.
    pub critical: bool,
    /// Decoded value, for the extensions lints read.
    pub value: ExtensionValue,
    /// The extnValue octets exactly as encoded.
    pub raw: Vec<u8>,
}

/// Decoded extension values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtensionValue {
    BasicConstraints {
        ca: bool,
    },
    SubjectAltName(Vec<SanEntry>),
    /// Key identifier as colon-separated uppercase hex.
    SubjectKeyIdentifier(String),
    AuthorityKeyIdentifier {
        key_id: Option<String>,
    },
    AuthorityInfoAccess(Vec<AiaEntry>),
    /// Policy OIDs in dotted-decimal form.
    CertificatePolicies(Vec<String>),
    /// Anything else, including known extensions that failed to decode.
    /// Only [`Extension::raw`] is available.
    Other,
}

/// Subject Alternative Name entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SanEntry {
    Dns(String),
    Email(String),
    Ip(String),
    Uri(String),
    DirName(String),
    Other(String),
}

/// Authority Information Access entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AiaEntry {
    /// Access method: "OCSP", "CA Issuers", or the OID.
    pub method: String,
    /// Access location (usually a URI).
    pub location: String,
}

/// Point in time as seconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateTime {
    pub timestamp: i64,
}

impl DateTime {
    pub fn from_unix(timestamp: i64) -> Self {
        Self { timestamp }
    }
}

impl Certificate {
    /// Return the subject as a one-line string.
    pub fn subject_string(&self) -> String {
        self.subject.to_oneline()
    }

    /// SHA-256 fingerprint of the DER encoding.
    pub fn fingerprint(&self) -> String {
        crate::fingerprint::fingerprint_sha256(&self.raw_der)
    }

    /// First extension with the given dotted OID.
    pub fn extension(&self, oid: &str) -> Option<&Extension> {
        self.extensions.iter().find(|ext| ext.oid == oid)
    }

    pub fn has_extension(&self, oid: &str) -> bool {
        self.extension(oid).is_some()
    }

    /// Extract all SAN entries.
    pub fn san_entries(&self) -> Vec<&SanEntry> {
        self.extensions
            .iter()
            .find_map(|ext| match &ext.value {
                ExtensionValue::SubjectAltName(entries) => Some(entries.iter().collect()),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// DNS names from the SAN extension, in encoded order.
    pub fn dns_names(&self) -> Vec<&str> {
        self.san_entries()
            .into_iter()
            .filter_map(|entry| match entry {
                SanEntry::Dns(name) => Some(name.as_str()),
                _ => None,
            })
            .collect()
    }

    /// IP addresses from the SAN extension.
    pub fn ip_addresses(&self) -> Vec<&str> {
        self.san_entries()
            .into_iter()
            .filter_map(|entry| match entry {
                SanEntry::Ip(ip) => Some(ip.as_str()),
                _ => None,
            })
            .collect()
    }

    fn aia_locations(&self, method: &str) -> Vec<&str> {
        self.extensions
            .iter()
            .find_map(|ext| match &ext.value {
                ExtensionValue::AuthorityInfoAccess(entries) => Some(
                    entries
                        .iter()
                        .filter(|e| e.method == method)
                        .map(|e| e.location.as_str())
                        .collect(),
                ),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Extract OCSP responder URLs from the AIA extension.
    pub fn ocsp_urls(&self) -> Vec<&str> {
        self.aia_locations("OCSP")
    }

    /// Extract issuing CA certificate URLs from the AIA extension.
    pub fn ca_issuer_urls(&self) -> Vec<&str> {
        self.aia_locations("CA Issuers")
    }

    /// Certificate policy OIDs (empty when the extension is absent).
    pub fn policy_oids(&self) -> Vec<&str> {
        self.extensions
            .iter()
            .find_map(|ext| match &ext.value {
                ExtensionValue::CertificatePolicies(oids) => {
                    Some(oids.iter().map(String::as_str).collect())
                }
                _ => None,
            })
            .unwrap_or_default()
    }

    pub fn has_policy(&self, policy_oid: &str) -> bool {
        self.policy_oids().contains(&policy_oid)
    }

    pub fn subject_key_id(&self) -> Option<&str> {
        self.extensions.iter().find_map(|ext| match &ext.value {
            ExtensionValue::SubjectKeyIdentifier(id) => Some(id.as_str()),
            _ => None,
        })
    }

    pub fn authority_key_id(&self) -> Option<&str> {
        self.extensions.iter().find_map(|ext| match &ext.value {
            ExtensionValue::AuthorityKeyIdentifier { key_id } => key_id.as_deref(),
            _ => None,
        })
    }

    /// True when Basic Constraints is present with cA set.
    pub fn is_ca(&self) -> bool {
        self.extensions
            .iter()
            .any(|ext| matches!(ext.value, ExtensionValue::BasicConstraints { ca: true }))
    }

    /// Subject and issuer are the same name.
    pub fn is_self_issued(&self) -> bool {
        self.subject == self.issuer
    }

    /// The subject alternative name extension, if present.
    pub fn san_extension(&self) -> Option<&Extension> {
        self.extension(oid::EXT_SUBJECT_ALT_NAME)
    }
}
