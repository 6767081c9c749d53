use crate::core::catalog::Catalog;
use crate::core::{Confirmation, Result};
use crate::utils::error::PokedexError;
use std::collections::HashSet;
use std::sync::{Arc, PoisonError, RwLock};

/// Process-wide set of captured creature names.
///
/// Mutations take the write lock, so concurrent `capture`/`release` calls
/// are serialized. Every inserted name exists in the catalog at insertion time.
#[derive(Debug)]
pub struct CaptureRegistry {
    catalog: Arc<Catalog>,
    captured: RwLock<HashSet<String>>,
}

impl CaptureRegistry {
    pub fn new(catalog: Arc<Catalog>) -> Self {
        Self {
            catalog,
            captured: RwLock::new(HashSet::new()),
        }
    }

    pub fn capture(&self, name: &str) -> Result<Confirmation> {
        if !self.catalog.contains(name) {
            tracing::warn!("Capture rejected, unknown creature: {}", name);
            return Err(PokedexError::CreatureNotFound {
                name: name.to_string(),
            });
        }

        // 重複捕捉視為成功
        let newly_added = self
            .captured
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(name.to_string());

        tracing::info!(newly_added, "Captured {}", name);
        Ok(Confirmation::captured(name))
    }

    pub fn release(&self, name: &str) -> Result<Confirmation> {
        let removed = self
            .captured
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(name);

        if !removed {
            tracing::warn!("Release rejected, not captured: {}", name);
            return Err(PokedexError::NotCaptured {
                name: name.to_string(),
            });
        }

        tracing::info!("Released {}", name);
        Ok(Confirmation::released(name))
    }

    pub fn is_captured(&self, name: &str) -> bool {
        self.captured
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(name)
    }

    /// Snapshot of the captured names, sorted.
    pub fn captured_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .captured
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .cloned()
            .collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.captured
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn catalog(&self) -> &Arc<Catalog> {
        &self.catalog
    }
}
