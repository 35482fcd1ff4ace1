//! RFC 5280 profile checks.

mod dnsname_underscore_in_trd;
mod ext_san_critical_with_subject_dn;

use crate::lint::RegistryBuilder;
use crate::CertlintError;

pub fn register(registry: &mut RegistryBuilder) -> Result<(), CertlintError> {
    registry.register(dnsname_underscore_in_trd::lint())?;
    registry.register(ext_san_critical_with_subject_dn::lint())?;
    Ok(())
}
