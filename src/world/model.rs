//! WorldModel - the shared mutable game state
//!
//! Territories and regions live in two arenas indexed by their ids. Regions
//! hold member id lists and ownership is read from the territories, so
//! nothing points back up the tree.

use std::collections::VecDeque;

use ahash::AHashSet;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::combat::{BattleResult, CombatResolver};
use crate::core::error::{ConquestError, Result};
use crate::core::types::{PlayerId, RegionId, TerritoryId};
use crate::world::region::Region;
use crate::world::territory::Territory;

/// How many troops follow a successful attack into the conquered territory
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Advance {
    /// Everything except the one troop that must stay behind
    AllButOne,
    /// A fixed number, clamped to what the origin can spare
    Exactly(u32),
}

impl From<bool> for Advance {
    /// `true` moves everything that can move; `false` moves the minimum of one
    fn from(move_all: bool) -> Self {
        if move_all {
            Advance::AllButOne
        } else {
            Advance::Exactly(1)
        }
    }
}

/// Result of a single attack
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttackOutcome {
    pub from: TerritoryId,
    pub to: TerritoryId,
    pub battle: BattleResult,
    pub attacker_losses: u32,
    pub defender_losses: u32,
    /// Troops moved into the target (zero unless conquered)
    pub advanced: u32,
    pub conquered: bool,
}

/// The map plus its current ownership and troop placement
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldModel {
    territories: Vec<Territory>,
    regions: Vec<Region>,
}

impl WorldModel {
    /// Assemble a world from its arenas, checking every cross-reference
    pub fn from_parts(territories: Vec<Territory>, regions: Vec<Region>) -> Result<Self> {
        for (index, territory) in territories.iter().enumerate() {
            if territory.id.index() != index {
                return Err(ConquestError::InvalidMap(format!(
                    "territory '{}' has id {} but sits at index {}",
                    territory.name, territory.id, index
                )));
            }
            let Some(region) = regions.get(territory.region.index()) else {
                return Err(ConquestError::InvalidMap(format!(
                    "territory '{}' references missing region {}",
                    territory.name, territory.region
                )));
            };
            if !region.contains(territory.id) {
                return Err(ConquestError::InvalidMap(format!(
                    "territory '{}' is not listed in region '{}'",
                    territory.name, region.name
                )));
            }
            for &neighbor in &territory.neighbors {
                if neighbor == territory.id {
                    return Err(ConquestError::InvalidMap(format!(
                        "territory '{}' neighbors itself",
                        territory.name
                    )));
                }
                let Some(other) = territories.get(neighbor.index()) else {
                    return Err(ConquestError::InvalidMap(format!(
                        "territory '{}' references missing neighbor {}",
                        territory.name, neighbor
                    )));
                };
                if !other.is_adjacent(territory.id) {
                    return Err(ConquestError::InvalidMap(format!(
                        "adjacency '{}' -> '{}' is not symmetric",
                        territory.name, other.name
                    )));
                }
            }
            if territory.owner.is_none() != (territory.troops == 0) {
                return Err(ConquestError::InvalidMap(format!(
                    "territory '{}' has owner {:?} with {} troops",
                    territory.name, territory.owner, territory.troops
                )));
            }
        }

        for (index, region) in regions.iter().enumerate() {
            if region.id.index() != index {
                return Err(ConquestError::InvalidMap(format!(
                    "region '{}' has id {} but sits at index {}",
                    region.name, region.id, index
                )));
            }
            for &member in &region.members {
                match territories.get(member.index()) {
                    Some(t) if t.region == region.id => {}
                    _ => {
                        return Err(ConquestError::InvalidMap(format!(
                            "region '{}' lists {} which does not belong to it",
                            region.name, member
                        )))
                    }
                }
            }
        }

        Ok(Self { territories, regions })
    }

    // === LOOKUPS ===

    pub fn territories(&self) -> &[Territory] {
        &self.territories
    }

    pub fn regions(&self) -> &[Region] {
        &self.regions
    }

    pub fn get(&self, id: TerritoryId) -> Option<&Territory> {
        self.territories.get(id.index())
    }

    pub fn territory(&self, id: TerritoryId) -> Result<&Territory> {
        self.get(id).ok_or(ConquestError::TerritoryNotFound(id))
    }

    pub fn region(&self, id: RegionId) -> Result<&Region> {
        self.regions
            .get(id.index())
            .ok_or(ConquestError::RegionNotFound(id))
    }

    pub fn territory_by_name(&self, name: &str) -> Option<&Territory> {
        self.territories.iter().find(|t| t.name == name)
    }

    pub fn region_by_name(&self, name: &str) -> Option<&Region> {
        self.regions.iter().find(|r| r.name == name)
    }

    pub fn owner(&self, id: TerritoryId) -> Option<PlayerId> {
        self.get(id).and_then(|t| t.owner)
    }

    /// Troops on a territory (0 for unknown ids)
    pub fn troops(&self, id: TerritoryId) -> u32 {
        self.get(id).map_or(0, |t| t.troops)
    }

    fn territory_mut(&mut self, id: TerritoryId) -> Result<&mut Territory> {
        self.territories
            .get_mut(id.index())
            .ok_or(ConquestError::TerritoryNotFound(id))
    }

    // === PLAYER QUERIES ===

    /// Territories owned by `player`, in id order
    pub fn territories_of(&self, player: PlayerId) -> Vec<TerritoryId> {
        self.territories
            .iter()
            .filter(|t| t.is_owned_by(player))
            .map(|t| t.id)
            .collect()
    }

    pub fn territory_count(&self, player: PlayerId) -> usize {
        self.territories.iter().filter(|t| t.is_owned_by(player)).count()
    }

    pub fn total_troops(&self, player: PlayerId) -> u32 {
        self.territories
            .iter()
            .filter(|t| t.is_owned_by(player))
            .map(|t| t.troops)
            .sum()
    }

    /// Players that own at least one territory, sorted
    pub fn active_players(&self) -> Vec<PlayerId> {
        let mut players: Vec<PlayerId> = self
            .territories
            .iter()
            .filter_map(|t| t.owner)
            .collect::<AHashSet<_>>()
            .into_iter()
            .collect();
        players.sort();
        players
    }

    /// The player holding every territory, if there is one
    pub fn sole_owner(&self) -> Option<PlayerId> {
        let first = self.territories.first()?.owner?;
        self.territories
            .iter()
            .all(|t| t.owner == Some(first))
            .then_some(first)
    }

    // === REGION QUERIES ===

    /// Common owner of every member; `None` if mixed, unowned or empty
    pub fn region_owner(&self, region: RegionId) -> Option<PlayerId> {
        let region = self.regions.get(region.index())?;
        let first = self.owner(*region.members.first()?)?;
        region
            .members
            .iter()
            .all(|&m| self.owner(m) == Some(first))
            .then_some(first)
    }

    /// Regions fully controlled by `player`, in id order
    pub fn regions_owned_by(&self, player: PlayerId) -> Vec<RegionId> {
        self.regions
            .iter()
            .filter(|r| self.region_owner(r.id) == Some(player))
            .map(|r| r.id)
            .collect()
    }

    /// Sum of bonuses for regions fully controlled by `player`
    pub fn region_bonus_total(&self, player: PlayerId) -> u32 {
        self.regions_owned_by(player)
            .into_iter()
            .filter_map(|id| self.regions.get(id.index()))
            .map(|r| r.bonus)
            .sum()
    }

    /// Members with at least one neighbor outside the region, in member order
    pub fn region_borders(&self, region: RegionId) -> Vec<TerritoryId> {
        let Some(region) = self.regions.get(region.index()) else {
            return Vec::new();
        };
        region
            .members
            .iter()
            .copied()
            .filter(|&m| self.is_border(m))
            .collect()
    }

    /// Whether a territory touches a territory of another region
    pub fn is_border(&self, id: TerritoryId) -> bool {
        let Some(territory) = self.get(id) else {
            return false;
        };
        territory
            .neighbors
            .iter()
            .any(|&n| self.get(n).is_some_and(|other| other.region != territory.region))
    }

    /// Whether `player` holds the whole region this territory belongs to
    pub fn in_owned_region(&self, id: TerritoryId, player: PlayerId) -> bool {
        self.get(id)
            .is_some_and(|t| self.region_owner(t.region) == Some(player))
    }

    // === NEIGHBORHOOD QUERIES ===

    /// Neighbors owned by someone other than this territory's owner
    pub fn enemy_neighbors(&self, id: TerritoryId) -> Vec<TerritoryId> {
        let Some(territory) = self.get(id) else {
            return Vec::new();
        };
        let Some(owner) = territory.owner else {
            return Vec::new();
        };
        territory
            .neighbors
            .iter()
            .copied()
            .filter(|&n| self.get(n).is_some_and(|t| t.is_hostile_to(owner)))
            .collect()
    }

    /// Total troops on hostile neighbors
    pub fn enemy_strength(&self, id: TerritoryId) -> u32 {
        self.enemy_neighbors(id).into_iter().map(|n| self.troops(n)).sum()
    }

    /// Whether `to` can be reached from `from` through territories owned by `player`
    pub fn connected_through(&self, from: TerritoryId, to: TerritoryId, player: PlayerId) -> bool {
        let owned = |id: TerritoryId| self.get(id).is_some_and(|t| t.is_owned_by(player));
        if !owned(from) || !owned(to) {
            return false;
        }

        let mut visited = AHashSet::new();
        let mut queue = VecDeque::from([from]);
        visited.insert(from);

        while let Some(current) = queue.pop_front() {
            if current == to {
                return true;
            }
            let Some(territory) = self.get(current) else {
                continue;
            };
            for &next in &territory.neighbors {
                if owned(next) && visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        false
    }

    // === MUTATIONS ===

    /// Hand a territory to a new owner with a fresh troop count
    pub fn occupy(&mut self, id: TerritoryId, owner: PlayerId, troops: u32) -> Result<()> {
        if troops == 0 {
            return Err(ConquestError::IllegalMove(format!(
                "cannot occupy {} with zero troops",
                id
            )));
        }
        let territory = self.territory_mut(id)?;
        territory.owner = Some(owner);
        territory.troops = troops;
        Ok(())
    }

    /// Add (or, with a negative delta, retract) troops; returns the new count
    ///
    /// An owned territory never drops below one troop: larger retractions
    /// are clamped.
    pub fn add_troops(&mut self, id: TerritoryId, delta: i64) -> Result<u32> {
        let territory = self.territory_mut(id)?;
        if territory.owner.is_none() {
            return Err(ConquestError::IllegalMove(format!(
                "cannot add troops to unowned territory '{}'",
                territory.name
            )));
        }

        let requested = i64::from(territory.troops) + delta;
        let clamped = requested.clamp(1, i64::from(u32::MAX));
        if clamped != requested {
            tracing::warn!(
                territory = %territory.name,
                delta,
                troops = territory.troops,
                "troop delta clamped"
            );
        }

        // Clamped into u32 range above
        territory.troops = clamped as u32;
        Ok(territory.troops)
    }

    /// Move troops between two territories of the same owner (fortify)
    pub fn transfer_troops(&mut self, from: TerritoryId, to: TerritoryId, count: u32) -> Result<()> {
        let source = self.territory(from)?;
        let target = self.territory(to)?;
        let Some(owner) = source.owner else {
            return Err(ConquestError::IllegalMove(format!(
                "'{}' is unowned",
                source.name
            )));
        };
        if !target.is_owned_by(owner) {
            return Err(ConquestError::IllegalMove(format!(
                "'{}' and '{}' have different owners",
                source.name, target.name
            )));
        }
        if count == 0 || count >= source.troops {
            return Err(ConquestError::IllegalMove(format!(
                "cannot move {} of {} troops out of '{}'",
                count, source.troops, source.name
            )));
        }

        self.territory_mut(from)?.troops -= count;
        self.territory_mut(to)?.troops += count;
        Ok(())
    }

    /// Attack a hostile neighbor with everything on `from`
    ///
    /// On a win the target changes hands and receives the troops chosen by
    /// `advance`; on a loss both sides keep what survived the battle.
    pub fn attack<R: Rng + ?Sized>(
        &mut self,
        from: TerritoryId,
        to: TerritoryId,
        advance: Advance,
        combat: &CombatResolver,
        rng: &mut R,
    ) -> Result<AttackOutcome> {
        let attacker = self.territory(from)?;
        let defender = self.territory(to)?;

        let Some(attacking_player) = attacker.owner else {
            return Err(ConquestError::IllegalMove(format!(
                "'{}' is unowned and cannot attack",
                attacker.name
            )));
        };
        if !defender.is_hostile_to(attacking_player) {
            return Err(ConquestError::IllegalMove(format!(
                "'{}' is not an enemy of '{}'",
                defender.name, attacker.name
            )));
        }
        if !attacker.is_adjacent(to) {
            return Err(ConquestError::IllegalMove(format!(
                "'{}' does not border '{}'",
                attacker.name, defender.name
            )));
        }
        if attacker.troops < 2 {
            return Err(ConquestError::IllegalMove(format!(
                "'{}' needs at least two troops to attack",
                attacker.name
            )));
        }

        let attacking = attacker.troops;
        let defending = defender.troops;
        let battle = combat.simulate_battle(attacking, defending, rng);

        let mut outcome = AttackOutcome {
            from,
            to,
            battle,
            attacker_losses: attacking - battle.attackers,
            defender_losses: defending - battle.defenders,
            advanced: 0,
            conquered: battle.attacker_won(),
        };

        if outcome.conquered {
            // The battle always leaves the winner with at least two troops
            // here, because it stops as soon as the defender hits zero.
            let movable = battle.attackers.saturating_sub(1).max(1);
            let advanced = match advance {
                Advance::AllButOne => movable,
                Advance::Exactly(n) => n.clamp(1, movable),
            };
            self.territory_mut(from)?.troops = battle.attackers.saturating_sub(advanced).max(1);
            self.occupy(to, attacking_player, advanced)?;
            outcome.advanced = advanced;
        } else {
            self.territory_mut(from)?.troops = battle.attackers;
            self.territory_mut(to)?.troops = battle.defenders;
        }

        tracing::debug!(
            from = %from,
            to = %to,
            attacking,
            defending,
            conquered = outcome.conquered,
            advanced = outcome.advanced,
            "attack resolved"
        );

        Ok(outcome)
    }
}
