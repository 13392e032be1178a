//! Dice battle rules
//!
//! A battle is a sequence of rounds. Each round the attacker rolls up to
//! three dice (one fewer than its troops), the defender up to two. Dice are
//! compared highest against highest; the attacker must beat the defender's
//! die outright, ties go to the defender.

use rand::Rng;
use serde::{Deserialize, Serialize};

/// Most dice an attacker may roll in one round
pub const MAX_ATTACK_DICE: u32 = 3;

/// Most dice a defender may roll in one round
pub const MAX_DEFENSE_DICE: u32 = 2;

/// Faces on each die
pub const DIE_FACES: u8 = 6;

/// Troop counts left on both sides once a battle is over
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleResult {
    pub attackers: u32,
    pub defenders: u32,
}

impl BattleResult {
    /// The defender was wiped out
    pub fn attacker_won(&self) -> bool {
        self.defenders == 0
    }
}

/// Losses inflicted by a single round
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RoundLosses {
    pub attacker: u32,
    pub defender: u32,
}

/// Roll `count` dice (at most three) sorted highest first
///
/// Unused slots are zero and sort to the end.
pub fn roll_dice<R: Rng + ?Sized>(count: u32, rng: &mut R) -> [u8; 3] {
    let mut dice = [0u8; 3];
    for die in dice.iter_mut().take(count.min(3) as usize) {
        *die = rng.gen_range(1..=DIE_FACES);
    }
    dice.sort_unstable_by(|a, b| b.cmp(a));
    dice
}

/// Compare two sorted dice rolls rank by rank
pub fn compare_dice(attack: &[u8], defense: &[u8]) -> RoundLosses {
    let mut losses = RoundLosses::default();
    for (a, d) in attack.iter().zip(defense.iter()) {
        if a > d {
            losses.defender += 1;
        } else {
            losses.attacker += 1;
        }
    }
    losses
}

/// Play one round; returns the losses of each side
///
/// Callers must ensure `attackers > 1` and `defenders > 0`.
pub fn play_round<R: Rng + ?Sized>(attackers: u32, defenders: u32, rng: &mut R) -> RoundLosses {
    let attack_count = (attackers - 1).min(MAX_ATTACK_DICE);
    let defense_count = defenders.min(MAX_DEFENSE_DICE);

    let attack = roll_dice(attack_count, rng);
    let defense = roll_dice(defense_count, rng);

    compare_dice(
        &attack[..attack_count as usize],
        &defense[..defense_count as usize],
    )
}

/// Fight rounds until the attacker is down to one troop or the defender is gone
///
/// An attacker with a single troop cannot roll, so the inputs come back
/// unchanged. Every round costs at least one troop, which bounds the loop
/// by `attackers + defenders`.
pub fn simulate_battle<R: Rng + ?Sized>(attackers: u32, defenders: u32, rng: &mut R) -> BattleResult {
    let mut attackers = attackers;
    let mut defenders = defenders;

    while attackers > 1 && defenders > 0 {
        let losses = play_round(attackers, defenders, rng);
        attackers -= losses.attacker;
        defenders -= losses.defender;
    }

    BattleResult { attackers, defenders }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn test_compare_ties_go_to_defender() {
        let losses = compare_dice(&[6, 4], &[6, 4]);
        assert_eq!(losses, RoundLosses { attacker: 2, defender: 0 });
    }

    #[test]
    fn test_compare_pairs_by_rank() {
        // 6 beats 5, 3 loses to 4; the attacker's third die is unused
        let losses = compare_dice(&[6, 3, 2], &[5, 4]);
        assert_eq!(losses, RoundLosses { attacker: 1, defender: 1 });
    }

    #[test]
    fn test_compare_single_defender_die() {
        let losses = compare_dice(&[2, 2, 2], &[1]);
        assert_eq!(losses, RoundLosses { attacker: 0, defender: 1 });
    }

    #[test]
    fn test_roll_dice_sorted_and_in_range() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        for count in 0..=3 {
            let dice = roll_dice(count, &mut rng);
            assert!(dice.windows(2).all(|w| w[0] >= w[1]));
            for (i, die) in dice.iter().enumerate() {
                if i < count as usize {
                    assert!((1..=DIE_FACES).contains(die));
                } else {
                    assert_eq!(*die, 0);
                }
            }
        }
    }

    #[test]
    fn test_round_removes_at_least_one_troop() {
        let mut rng = ChaCha8Rng::seed_from_u64(9);
        for _ in 0..500 {
            let losses = play_round(4, 3, &mut rng);
            assert_eq!(losses.attacker + losses.defender, 2);
        }
        for _ in 0..500 {
            let losses = play_round(2, 5, &mut rng);
            assert_eq!(losses.attacker + losses.defender, 1);
        }
    }

    #[test]
    fn test_single_attacker_cannot_fight() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        assert_eq!(
            simulate_battle(1, 5, &mut rng),
            BattleResult { attackers: 1, defenders: 5 }
        );
        assert_eq!(
            simulate_battle(1, 0, &mut rng),
            BattleResult { attackers: 1, defenders: 0 }
        );
    }

    #[test]
    fn test_battle_ends_decisively() {
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        for attackers in 2..12 {
            for defenders in 0..12 {
                let result = simulate_battle(attackers, defenders, &mut rng);
                assert!(result.attackers == 1 || result.defenders == 0);
                assert!(result.attackers >= 1);
                assert!(result.attackers <= attackers);
                assert!(result.defenders <= defenders);
            }
        }
    }

    #[test]
    fn test_same_seed_same_battle() {
        let a = simulate_battle(10, 8, &mut ChaCha8Rng::seed_from_u64(5));
        let b = simulate_battle(10, 8, &mut ChaCha8Rng::seed_from_u64(5));
        assert_eq!(a, b);
    }
}
