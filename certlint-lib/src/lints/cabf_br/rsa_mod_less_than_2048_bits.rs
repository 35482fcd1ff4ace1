//! BR 6.1.5: RSA moduli are at least 2048 bits.

use crate::lint::{CertificateLint, Lint, LintMetadata, LintResult, LintSource};
use crate::lints::util::ZERO_DATE;
use crate::Certificate;

const MIN_MODULUS_BITS: u32 = 2048;

struct RsaModLessThan2048Bits;

impl CertificateLint for RsaModLessThan2048Bits {
    fn check_applies(&self, cert: &Certificate) -> bool {
        cert.public_key.algorithm == "RSA"
    }

    fn execute(&self, cert: &Certificate) -> LintResult {
        match cert.public_key.key_size {
            Some(bits) if bits >= MIN_MODULUS_BITS => LintResult::pass(),
            Some(bits) => LintResult::error().with_details(format!("{bits}-bit modulus")),
            None => LintResult::fatal("could not determine RSA modulus size"),
        }
    }
}

pub(super) fn lint() -> Lint {
    Lint::new(
        LintMetadata {
            name: "e_rsa_mod_less_than_2048_bits".into(),
            description: "For RSA key pairs the modulus size MUST be at least 2048 bits".into(),
            citation: "BRs: 6.1.5".into(),
            source: LintSource::CabfBaselineRequirements,
            effective_date: ZERO_DATE,
            ..Default::default()
        },
        RsaModLessThan2048Bits,
    )
}
