//! OID string constants shared by the parser and the lint corpus.
//!
//! Object Identifiers are compared in dotted-decimal form throughout the
//! crate, so every OID a lint or the parser needs lives here under a
//! readable name.

// ── Distinguished Name attributes (X.520, PKCS#9, RFC 4519) ─────────────

pub const COMMON_NAME: &str = "2.5.4.3";
pub const SURNAME: &str = "2.5.4.4";
pub const SERIAL_NUMBER: &str = "2.5.4.5";
pub const COUNTRY: &str = "2.5.4.6";
pub const LOCALITY: &str = "2.5.4.7";
pub const STATE_OR_PROVINCE: &str = "2.5.4.8";
pub const STREET_ADDRESS: &str = "2.5.4.9";
pub const ORGANIZATION: &str = "2.5.4.10";
pub const ORGANIZATIONAL_UNIT: &str = "2.5.4.11";
pub const TITLE: &str = "2.5.4.12";
pub const POSTAL_CODE: &str = "2.5.4.17";
pub const GIVEN_NAME: &str = "2.5.4.42";
pub const EMAIL_ADDRESS: &str = "1.2.840.113549.1.9.1";
pub const DOMAIN_COMPONENT: &str = "0.9.2342.19200300.100.1.25";

// ── Subject public key algorithms ───────────────────────────────────────

pub const RSA_ENCRYPTION: &str = "1.2.840.113549.1.1.1";
pub const EC_PUBLIC_KEY: &str = "1.2.840.10045.2.1";
pub const ED25519: &str = "1.3.101.112";
pub const ED448: &str = "1.3.101.113";

// ── Extensions checked by presence ──────────────────────────────────────

pub const EXT_SUBJECT_ALT_NAME: &str = "2.5.29.17";
pub const EXT_EXTENDED_KEY_USAGE: &str = "2.5.29.37";

// ── Authority Information Access methods (RFC 5280 4.2.2.1) ─────────────

pub const ACCESS_OCSP: &str = "1.3.6.1.5.5.7.48.1";
pub const ACCESS_CA_ISSUERS: &str = "1.3.6.1.5.5.7.48.2";

// ── CA/Browser Forum reserved policy identifiers ─────────────────────────

pub const POLICY_EV: &str = "2.23.140.1.1";
pub const POLICY_BR_INDIVIDUAL_VALIDATED: &str = "2.23.140.1.2.3";

// S/MIME BR 7.1.6.1: <generation>.<validation type>.<profile>, profile 1 = legacy.
pub const POLICY_SMIME_MAILBOX_LEGACY: &str = "2.23.140.1.5.1.1";
pub const POLICY_SMIME_ORGANIZATION_LEGACY: &str = "2.23.140.1.5.2.1";
pub const POLICY_SMIME_SPONSOR_LEGACY: &str = "2.23.140.1.5.3.1";
pub const POLICY_SMIME_INDIVIDUAL_LEGACY: &str = "2.23.140.1.5.4.1";
