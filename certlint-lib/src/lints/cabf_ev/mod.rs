//! CA/Browser Forum Extended Validation Guidelines.

mod ev_san_ip_address_present;

use crate::lint::RegistryBuilder;
use crate::CertlintError;

pub fn register(registry: &mut RegistryBuilder) -> Result<(), CertlintError> {
    registry.register(ev_san_ip_address_present::lint())
}
