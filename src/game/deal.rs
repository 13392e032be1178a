//! Initial deal of territories and troops, and player colors

use rand::seq::SliceRandom;
use rand::Rng;

use crate::core::error::{ConquestError, Result};
use crate::core::types::{PlayerId, TerritoryId};
use crate::world::WorldModel;

/// Display colors handed out to players in shuffled order
pub const PLAYER_COLORS: [&str; 6] = [
    "rgb(58,118,207)",
    "rgb(100,61,166)",
    "rgb(42,175,157)",
    "rgb(108,126,83)",
    "rgb(55,101,206)",
    "rgb(34,135,174)",
];

/// One color per player from a shuffled palette; wraps if there are more
/// players than colors
pub fn assign_colors<R: Rng + ?Sized>(players: usize, rng: &mut R) -> Vec<String> {
    let mut palette = PLAYER_COLORS.to_vec();
    palette.shuffle(rng);
    (0..players)
        .map(|i| palette[i % palette.len()].to_string())
        .collect()
}

/// Shuffle every territory and hand each player a contiguous slice,
/// then spread `initial_troops` over each player's slice
///
/// Every dealt territory gets one troop; the rest land one at a time on
/// random territories of the slice. Returns the slices in player order.
pub fn deal_territories<R: Rng + ?Sized>(
    world: &mut WorldModel,
    players: &[PlayerId],
    initial_troops: u32,
    rng: &mut R,
) -> Result<Vec<Vec<TerritoryId>>> {
    if players.is_empty() {
        return Err(ConquestError::InvalidConfig("no players to deal to".to_string()));
    }

    let mut deck: Vec<TerritoryId> = world.territories().iter().map(|t| t.id).collect();
    let n = deck.len();
    let p = players.len();
    let largest = (0..p).map(|i| (i + 1) * n / p - i * n / p).max().unwrap_or(0);
    if (initial_troops as usize) < largest {
        return Err(ConquestError::InvalidConfig(format!(
            "{} initial troops cannot cover {} territories",
            initial_troops, largest
        )));
    }

    deck.shuffle(rng);

    let mut slices = Vec::with_capacity(p);
    for (i, &player) in players.iter().enumerate() {
        let slice = deck[i * n / p..(i + 1) * n / p].to_vec();
        for &territory in &slice {
            world.occupy(territory, player, 1)?;
        }

        let spare = initial_troops - slice.len() as u32;
        for _ in 0..spare {
            if let Some(&territory) = slice.choose(rng) {
                world.add_troops(territory, 1)?;
            }
        }

        tracing::debug!(player = %player, territories = slice.len(), "dealt");
        slices.push(slice);
    }

    Ok(slices)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::world::classic_world;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_deal_covers_map_evenly() {
        let mut world = classic_world().unwrap();
        let players = [PlayerId(0), PlayerId(1), PlayerId(2), PlayerId(3), PlayerId(4)];
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let slices = deal_territories(&mut world, &players, 35, &mut rng).unwrap();
        let sizes: Vec<usize> = slices.iter().map(Vec::len).collect();
        assert_eq!(sizes.iter().sum::<usize>(), 42);
        assert!(sizes.iter().max().unwrap() - sizes.iter().min().unwrap() <= 1);

        assert!(world.territories().iter().all(|t| t.owner.is_some() && t.troops >= 1));
        for player in players {
            assert_eq!(world.total_troops(player), 35);
        }
    }

    #[test]
    fn test_same_seed_same_deal() {
        let players = [PlayerId(0), PlayerId(1), PlayerId(2)];
        let mut a = classic_world().unwrap();
        let mut b = classic_world().unwrap();
        deal_territories(&mut a, &players, 35, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();
        deal_territories(&mut b, &players, 35, &mut ChaCha8Rng::seed_from_u64(5)).unwrap();

        let owners = |w: &WorldModel| -> Vec<_> { w.territories().iter().map(|t| (t.owner, t.troops)).collect() };
        assert_eq!(owners(&a), owners(&b));
    }

    #[test]
    fn test_too_few_troops_rejected() {
        let mut world = classic_world().unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let result = deal_territories(&mut world, &[PlayerId(0), PlayerId(1)], 20, &mut rng);
        assert!(matches!(result, Err(ConquestError::InvalidConfig(_))));
    }

    #[test]
    fn test_colors_are_distinct_up_to_palette_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut colors = assign_colors(6, &mut rng);
        colors.sort();
        colors.dedup();
        assert_eq!(colors.len(), 6);
        assert_eq!(assign_colors(8, &mut rng).len(), 8);
    }
}
