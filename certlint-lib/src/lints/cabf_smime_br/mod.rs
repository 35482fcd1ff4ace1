//! CA/Browser Forum S/MIME Baseline Requirements.

mod legacy_aia_contains_internal_names;

use crate::lint::RegistryBuilder;
use crate::CertlintError;

pub fn register(registry: &mut RegistryBuilder) -> Result<(), CertlintError> {
    registry.register(legacy_aia_contains_internal_names::lint())
}
