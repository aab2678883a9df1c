use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

/// Bounds on the base density a new session may be created with.
pub const SESSION_DENSITY_RANGE: core::ops::RangeInclusive<f64> = 0.01..=0.5;

/// Attempts made to find a safe seed variant for a guaranteed-safe click.
pub const DEFAULT_SAFE_RETRY_LIMIT: u32 = 100;

/// Tunables of a play session, everything that is not derived from the seed.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GameRules {
    pub max_reveal_per_click: usize,
    pub points_per_cell: u64,
    pub points_per_flag: u64,
    /// Number of leading clicks that are guaranteed not to hit a mine.
    pub safe_clicks: u32,
    /// Mines that can be survived before the game is lost.
    pub second_chances: u32,
    pub safe_retry_limit: u32,
}

impl Default for GameRules {
    fn default() -> Self {
        Self {
            max_reveal_per_click: DEFAULT_MAX_REVEAL,
            points_per_cell: points_per_cell(0),
            points_per_flag: points_per_flag(0),
            safe_clicks: safe_clicks(0),
            second_chances: second_chances(0),
            safe_retry_limit: DEFAULT_SAFE_RETRY_LIMIT,
        }
    }
}

impl GameRules {
    pub fn from_upgrades(upgrades: &UpgradeLevels) -> Self {
        Self {
            points_per_cell: points_per_cell(upgrades.score_multiplier),
            points_per_flag: points_per_flag(upgrades.flag_bonus),
            safe_clicks: safe_clicks(upgrades.safe_zone),
            second_chances: second_chances(upgrades.second_chance),
            ..Self::default()
        }
    }

    pub fn validate(self) -> Result<Self> {
        if self.max_reveal_per_click == 0 || self.safe_retry_limit == 0 {
            Err(GameError::InvalidRules)
        } else {
            Ok(self)
        }
    }
}

/// Everything needed to rebuild a session from scratch, as persisted next to its replay.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionConfig {
    pub seed: String,
    #[serde(rename = "mineDensity")]
    pub base_density: f64,
    #[serde(default)]
    pub rules: GameRules,
}

impl SessionConfig {
    pub fn new(seed: impl Into<String>, base_density: f64, rules: GameRules) -> Result<Self> {
        let config = Self {
            seed: seed.into(),
            base_density,
            rules,
        };
        config.validate()?;
        Ok(config)
    }

    /// Session for a player, density and rules derived from their upgrades.
    pub fn for_player(seed: impl Into<String>, progress: &PlayerProgress) -> Result<Self> {
        Self::new(
            seed,
            progress.upgrades.mine_density(),
            GameRules::from_upgrades(&progress.upgrades),
        )
    }

    pub fn validate(&self) -> Result<()> {
        if self.seed.is_empty() {
            return Err(GameError::EmptySeed);
        }
        if !SESSION_DENSITY_RANGE.contains(&self.base_density) {
            return Err(GameError::DensityOutOfRange);
        }
        self.rules.validate()?;
        Ok(())
    }

    pub fn mine_field(&self) -> Result<MineField> {
        MineField::new(self.seed.clone(), self.base_density)
    }
}
