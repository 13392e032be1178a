//! Game configuration with documented constants
//!
//! All tunable numbers for the game, the combat resolver and the AI live
//! here. Every section deserializes from TOML with per-field defaults, so a
//! config file only needs to name the values it changes.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{ConquestError, Result};

/// Session-level settings: players, deal and turn limits
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Seed for the game RNG (deal, colors, battle dice)
    pub seed: u64,

    /// Troops each player starts with after the deal
    ///
    /// Every dealt territory receives one troop first; the rest is spread
    /// at random over the player's territories. Must be at least as large
    /// as the biggest slice a player can be dealt.
    pub initial_troops: u32,

    /// Turn count after which an undecided game is stopped
    pub max_turns: u32,

    /// Pause between turns in the paced runner (milliseconds)
    ///
    /// Presentation only. Zero disables pacing.
    pub turn_delay_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            initial_troops: 35,
            max_turns: 500,
            turn_delay_ms: 0,
        }
    }
}

/// Settings for the Monte Carlo win-probability estimator
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CombatConfig {
    /// Number of simulated battles per estimate
    ///
    /// At 10,000 trials the estimate is within about ±1% of the exact
    /// value, which keeps the AI's threshold decisions stable.
    pub trials: u32,

    /// Base seed for the per-pair estimator RNGs
    pub seed: u64,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            trials: 10_000,
            seed: 0x5EED_0DD5,
        }
    }
}

/// Tuning knobs for the autonomous strategy
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StrategyConfig {
    // === DRAFT ===
    /// Minimum troops granted at the start of a turn
    pub min_draft: u32,

    /// One troop is granted per this many owned territories
    pub territories_per_troop: u32,

    // === ATTACK THRESHOLDS ===
    /// Projected win probability needed before breaking into an enemy region
    pub break_in_threshold: f64,

    /// Win probability an opportunistic attack must exceed
    pub opportunistic_threshold: f64,

    // === REGION RATING ===
    /// Constant term of the static region rating
    ///
    /// Static rating = (base + bonus - border_penalty * borders) / size.
    pub rating_base: f64,

    /// Cost of each border territory in the static rating
    pub rating_border_penalty: f64,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            min_draft: 3,
            territories_per_troop: 3,
            break_in_threshold: 0.70,
            opportunistic_threshold: 0.75,
            rating_base: 15.0,
            rating_border_penalty: 4.0,
        }
    }
}

/// Complete configuration, one section per subsystem
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConquestConfig {
    #[serde(default)]
    pub game: GameConfig,
    #[serde(default)]
    pub combat: CombatConfig,
    #[serde(default)]
    pub strategy: StrategyConfig,
}

impl ConquestConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text and validate it
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ConquestConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if self.game.initial_troops == 0 {
            return Err(ConquestError::InvalidConfig(
                "game.initial_troops must be at least 1".into(),
            ));
        }

        if self.game.max_turns == 0 {
            return Err(ConquestError::InvalidConfig(
                "game.max_turns must be at least 1".into(),
            ));
        }

        if self.combat.trials == 0 {
            return Err(ConquestError::InvalidConfig(
                "combat.trials must be positive".into(),
            ));
        }

        if self.strategy.territories_per_troop == 0 {
            return Err(ConquestError::InvalidConfig(
                "strategy.territories_per_troop must be at least 1".into(),
            ));
        }

        for (name, value) in [
            ("break_in_threshold", self.strategy.break_in_threshold),
            ("opportunistic_threshold", self.strategy.opportunistic_threshold),
        ] {
            if !(value > 0.0 && value <= 1.0) {
                return Err(ConquestError::InvalidConfig(format!(
                    "strategy.{} ({}) must be in (0, 1]",
                    name, value
                )));
            }
        }

        Ok(())
    }
}

/// Load and validate a config file
pub fn load_config(path: impl AsRef<Path>) -> Result<ConquestConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path)?;
    let config = ConquestConfig::from_toml_str(&content)?;
    tracing::debug!(path = %path.display(), "loaded config");
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(ConquestConfig::default().validate().is_ok());
    }

    #[test]
    fn test_default_values() {
        let config = ConquestConfig::new();
        assert_eq!(config.game.initial_troops, 35);
        assert_eq!(config.combat.trials, 10_000);
        assert_eq!(config.strategy.min_draft, 3);
        assert_eq!(config.strategy.break_in_threshold, 0.70);
        assert_eq!(config.strategy.opportunistic_threshold, 0.75);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = ConquestConfig::from_toml_str(
            r#"
            [game]
            seed = 7

            [strategy]
            break_in_threshold = 0.6
            "#,
        )
        .unwrap();

        assert_eq!(config.game.seed, 7);
        assert_eq!(config.game.initial_troops, 35);
        assert_eq!(config.strategy.break_in_threshold, 0.6);
        assert_eq!(config.strategy.opportunistic_threshold, 0.75);
        assert_eq!(config.combat.trials, 10_000);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = ConquestConfig::from_toml_str("").unwrap();
        assert_eq!(config.game.max_turns, GameConfig::default().max_turns);
    }

    #[test]
    fn test_rejects_out_of_range_threshold() {
        let result = ConquestConfig::from_toml_str(
            r#"
            [strategy]
            opportunistic_threshold = 1.5
            "#,
        );
        assert!(matches!(result, Err(ConquestError::InvalidConfig(_))));
    }

    #[test]
    fn test_rejects_zero_trials() {
        let mut config = ConquestConfig::default();
        config.combat.trials = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = ConquestConfig::from_toml_str("[game\nseed = ");
        assert!(matches!(result, Err(ConquestError::ConfigParse(_))));
    }
}
