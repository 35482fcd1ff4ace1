//! CA/Browser Forum Baseline Requirements for TLS server certificates.

mod cert_policy_iv_requires_country;
mod ext_san_missing;
mod root_ca_extended_key_usage_present;
mod rsa_mod_less_than_2048_bits;
mod sub_cert_eku_missing;

use crate::lint::RegistryBuilder;
use crate::CertlintError;

pub fn register(registry: &mut RegistryBuilder) -> Result<(), CertlintError> {
    registry.register(cert_policy_iv_requires_country::lint())?;
    registry.register(ext_san_missing::lint())?;
    registry.register(root_ca_extended_key_usage_present::lint())?;
    registry.register(rsa_mod_less_than_2048_bits::lint())?;
    registry.register(sub_cert_eku_missing::lint())?;
    Ok(())
}
