//! Community best practice without a normative citation.

mod san_dns_name_duplicate;
mod validity_time_not_positive;

use crate::lint::RegistryBuilder;
use crate::CertlintError;

pub fn register(registry: &mut RegistryBuilder) -> Result<(), CertlintError> {
    registry.register(san_dns_name_duplicate::lint())?;
    registry.register(validity_time_not_positive::lint())?;
    Ok(())
}
