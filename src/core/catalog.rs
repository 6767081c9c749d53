use crate::core::{CatalogSource, Creature, Result};
use crate::utils::error::PokedexError;
use std::collections::HashMap;

/// Fields the listing adds to every item; a catalog attribute with one of
/// these names would collide on the wire.
const DECORATION_FIELDS: [&str; 2] = ["is_captured", "uuid"];

/// Immutable, name-indexed list of creatures. Built once, read-only after.
#[derive(Debug, Default)]
pub struct Catalog {
    creatures: Vec<Creature>,
    by_name: HashMap<String, usize>,
}

impl Catalog {
    pub fn new(creatures: Vec<Creature>) -> Result<Self> {
        let mut by_name = HashMap::with_capacity(creatures.len());
        let mut creatures = creatures;

        for (index, creature) in creatures.iter_mut().enumerate() {
            for field in DECORATION_FIELDS {
                if creature.attributes.remove(field).is_some() {
                    tracing::debug!(
                        "Dropped reserved attribute '{}' from catalog entry {}",
                        field,
                        creature.name
                    );
                }
            }

            if by_name.insert(creature.name.clone(), index).is_some() {
                return Err(PokedexError::DuplicateCreature {
                    name: creature.name.clone(),
                });
            }
        }

        Ok(Self { creatures, by_name })
    }

    pub async fn load<S: CatalogSource + ?Sized>(source: &S) -> Result<Self> {
        tracing::info!("Loading catalog from {}", source.describe());
        let creatures = source.load().await?;
        let catalog = Self::new(creatures)?;

        if catalog.is_empty() {
            tracing::warn!("Catalog from {} is empty", source.describe());
        } else {
            tracing::info!("Loaded {} creatures", catalog.len());
        }

        Ok(catalog)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Creature> {
        self.by_name.get(name).map(|&index| &self.creatures[index])
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    pub fn len(&self) -> usize {
        self.creatures.len()
    }

    pub fn is_empty(&self) -> bool {
        self.creatures.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_by_exact_name() {
        let catalog = Catalog::new(vec![
            Creature::new(1, "Bulbasaur", "Grass"),
            Creature::new(4, "Charmander", "Fire"),
        ])
        .unwrap();

        assert_eq!(catalog.len(), 2);
        assert!(catalog.contains("Charmander"));
        assert!(!catalog.contains("charmander"));
        assert_eq!(catalog.get("Bulbasaur").map(|c| c.number), Some(1));
    }

    #[test]
    fn test_duplicate_names_are_rejected() {
        let result = Catalog::new(vec![
            Creature::new(1, "Bulbasaur", "Grass"),
            Creature::new(2, "Bulbasaur", "Grass"),
        ]);

        assert!(matches!(
            result,
            Err(PokedexError::DuplicateCreature { name }) if name == "Bulbasaur"
        ));
    }

    #[test]
    fn test_reserved_attributes_are_dropped() {
        let catalog = Catalog::new(vec![Creature::new(7, "Squirtle", "Water")
            .with_attribute("uuid", "stale")
            .with_attribute("is_captured", true)
            .with_attribute("speed", 43)])
        .unwrap();

        let squirtle = catalog.get("Squirtle").unwrap();
        assert_eq!(squirtle.attributes.len(), 1);
        assert!(squirtle.attributes.contains_key("speed"));
    }
}
