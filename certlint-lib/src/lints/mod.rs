//! The built-in lint corpus, grouped by requirement source.
//!
//! Every source module exposes `register`, and [`register_all`] calls them
//! in a fixed order. The process-wide registry is built from it the first
//! time [`global_registry`] is called.

pub mod cabf_br;
pub mod cabf_ev;
pub mod cabf_smime_br;
pub mod community;
pub mod rfc;
pub mod util;

use crate::lint::{Registry, RegistryBuilder};
use crate::CertlintError;
use std::sync::OnceLock;

/// Register every built-in lint.
///
/// Embedders that add their own lints call this on a fresh builder, register
/// theirs, and freeze the result.
pub fn register_all(registry: &mut RegistryBuilder) -> Result<(), CertlintError> {
    cabf_br::register(registry)?;
    cabf_ev::register(registry)?;
    cabf_smime_br::register(registry)?;
    community::register(registry)?;
    rfc::register(registry)?;
    Ok(())
}

fn build() -> Result<Registry, CertlintError> {
    let mut builder = RegistryBuilder::new();
    register_all(&mut builder)?;
    builder.freeze()
}

static GLOBAL: OnceLock<Result<Registry, String>> = OnceLock::new();

/// The frozen registry holding every built-in lint.
///
/// Built on first use; a registration failure is reported on every call.
pub fn global_registry() -> Result<&'static Registry, CertlintError> {
    GLOBAL
        .get_or_init(|| build().map_err(|e| e.to_string()))
        .as_ref()
        .map_err(|msg| CertlintError::RegistryInit(msg.clone()))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::lint::LintCategory;

    #[test]
    fn corpus_registers_cleanly() {
        let registry = global_registry().unwrap();
        assert_eq!(registry.len(), 11);
        assert!(std::ptr::eq(registry, global_registry().unwrap()));
    }

    #[test]
    fn corpus_names_match_their_category() {
        for lint in global_registry().unwrap().all() {
            let meta = lint.metadata();
            assert_ne!(meta.category(), LintCategory::Uncategorized, "{}", meta.name);
            assert!(!meta.description.is_empty(), "{}", meta.name);
            assert!(!meta.citation.is_empty(), "{}", meta.name);
        }
    }

    #[test]
    fn registering_twice_fails() {
        let mut builder = RegistryBuilder::new();
        register_all(&mut builder).unwrap();
        assert!(matches!(
            register_all(&mut builder),
            Err(CertlintError::DuplicateLint(_))
        ));
    }
}
