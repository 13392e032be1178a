//! Incremental construction of a WorldModel

use ahash::AHashMap;

use crate::core::error::{ConquestError, Result};
use crate::core::types::{RegionId, TerritoryId};
use crate::world::model::WorldModel;
use crate::world::region::Region;
use crate::world::territory::Territory;

/// Builds a world by name: add regions, add territories to them, link
/// neighbors. Ids are assigned in insertion order.
#[derive(Debug, Default)]
pub struct WorldBuilder {
    territories: Vec<Territory>,
    regions: Vec<Region>,
    by_name: AHashMap<String, TerritoryId>,
}

impl WorldBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region and return its id
    pub fn region(&mut self, name: impl Into<String>, bonus: u32) -> RegionId {
        let id = RegionId::new(self.regions.len() as u32);
        self.regions.push(Region::new(id, name, bonus));
        id
    }

    /// Add a territory to an existing region
    pub fn territory(&mut self, name: impl Into<String>, region: RegionId) -> Result<TerritoryId> {
        let name = name.into();
        if self.by_name.contains_key(&name) {
            return Err(ConquestError::InvalidMap(format!(
                "duplicate territory name '{}'",
                name
            )));
        }
        let owning_region = self
            .regions
            .get_mut(region.index())
            .ok_or(ConquestError::RegionNotFound(region))?;

        let id = TerritoryId::new(self.territories.len() as u32);
        owning_region.members.push(id);
        self.by_name.insert(name.clone(), id);
        self.territories.push(Territory::new(id, name, region));
        Ok(id)
    }

    /// Make two territories neighbors of each other (idempotent)
    pub fn link(&mut self, a: &str, b: &str) -> Result<()> {
        let first = self.lookup(a)?;
        let second = self.lookup(b)?;
        if first == second {
            return Err(ConquestError::InvalidMap(format!(
                "cannot link '{}' to itself",
                a
            )));
        }
        self.connect(first, second);
        self.connect(second, first);
        Ok(())
    }

    fn connect(&mut self, from: TerritoryId, to: TerritoryId) {
        if let Some(territory) = self.territories.get_mut(from.index()) {
            if !territory.neighbors.contains(&to) {
                territory.neighbors.push(to);
            }
        }
    }

    fn lookup(&self, name: &str) -> Result<TerritoryId> {
        self.by_name
            .get(name)
            .copied()
            .ok_or_else(|| ConquestError::InvalidMap(format!("unknown territory '{}'", name)))
    }

    /// Finish the world; fails if any cross-reference is inconsistent
    pub fn build(self) -> Result<WorldModel> {
        WorldModel::from_parts(self.territories, self.regions)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_follow_insertion_order() {
        let mut builder = WorldBuilder::new();
        let r = builder.region("Only", 1);
        let a = builder.territory("a", r).unwrap();
        let b = builder.territory("b", r).unwrap();
        assert_eq!(a, TerritoryId(0));
        assert_eq!(b, TerritoryId(1));
    }

    #[test]
    fn test_duplicate_name_rejected() {
        let mut builder = WorldBuilder::new();
        let r = builder.region("Only", 1);
        builder.territory("a", r).unwrap();
        assert!(builder.territory("a", r).is_err());
    }

    #[test]
    fn test_unknown_region_rejected() {
        let mut builder = WorldBuilder::new();
        assert!(matches!(
            builder.territory("a", RegionId(4)),
            Err(ConquestError::RegionNotFound(_))
        ));
    }

    #[test]
    fn test_link_is_symmetric_and_idempotent() {
        let mut builder = WorldBuilder::new();
        let r = builder.region("Only", 1);
        builder.territory("a", r).unwrap();
        builder.territory("b", r).unwrap();
        builder.link("a", "b").unwrap();
        builder.link("b", "a").unwrap();

        let world = builder.build().unwrap();
        assert_eq!(world.territories()[0].neighbors, vec![TerritoryId(1)]);
        assert_eq!(world.territories()[1].neighbors, vec![TerritoryId(0)]);
    }

    #[test]
    fn test_link_unknown_or_self_rejected() {
        let mut builder = WorldBuilder::new();
        let r = builder.region("Only", 1);
        builder.territory("a", r).unwrap();
        assert!(builder.link("a", "zzz").is_err());
        assert!(builder.link("a", "a").is_err());
    }
}
