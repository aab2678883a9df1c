use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpgradeKind {
    MineDensityReduction,
    SafeZone,
    ScoreMultiplier,
    FlagBonus,
    SecondChance,
}

impl UpgradeKind {
    pub const ALL: [UpgradeKind; 5] = [
        UpgradeKind::MineDensityReduction,
        UpgradeKind::SafeZone,
        UpgradeKind::ScoreMultiplier,
        UpgradeKind::FlagBonus,
        UpgradeKind::SecondChance,
    ];

    /// Price of each level, the length is the maximum level.
    pub const fn costs(self) -> &'static [u64] {
        match self {
            Self::MineDensityReduction => &[100, 250, 500, 1000, 2000],
            Self::SafeZone => &[200, 500, 1000, 2500],
            Self::ScoreMultiplier => &[150, 400, 800, 1500, 3000],
            Self::FlagBonus => &[300, 700, 1500],
            Self::SecondChance => &[5000, 15000],
        }
    }

    pub const fn max_level(self) -> u8 {
        self.costs().len() as u8
    }

    /// Cost to go from `current_level` to the next one, `None` once maxed.
    pub fn next_cost(self, current_level: u8) -> Option<u64> {
        self.costs().get(usize::from(current_level)).copied()
    }
}

const POINTS_PER_CELL: [u64; 6] = [10, 12, 15, 20, 25, 30];
const POINTS_PER_FLAG: [u64; 4] = [50, 75, 100, 150];
const SAFE_CLICKS: [u32; 5] = [1, 3, 5, 7, 10];

/// Base density after `level` density reductions, one percent each down to a floor of 10%.
pub fn mine_density(level: u8) -> f64 {
    (DEFAULT_MINE_DENSITY - f64::from(level) * 0.01).max(0.10)
}

pub fn points_per_cell(level: u8) -> u64 {
    POINTS_PER_CELL
        .get(usize::from(level))
        .copied()
        .unwrap_or(POINTS_PER_CELL[0])
}

pub fn points_per_flag(level: u8) -> u64 {
    POINTS_PER_FLAG
        .get(usize::from(level))
        .copied()
        .unwrap_or(POINTS_PER_FLAG[0])
}

pub fn safe_clicks(level: u8) -> u32 {
    SAFE_CLICKS
        .get(usize::from(level))
        .copied()
        .unwrap_or(SAFE_CLICKS[0])
}

pub fn second_chances(level: u8) -> u32 {
    u32::from(level)
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeLevels {
    pub mine_density_reduction: u8,
    pub safe_zone: u8,
    pub score_multiplier: u8,
    pub flag_bonus: u8,
    pub second_chance: u8,
}

impl UpgradeLevels {
    pub const fn level(&self, kind: UpgradeKind) -> u8 {
        match kind {
            UpgradeKind::MineDensityReduction => self.mine_density_reduction,
            UpgradeKind::SafeZone => self.safe_zone,
            UpgradeKind::ScoreMultiplier => self.score_multiplier,
            UpgradeKind::FlagBonus => self.flag_bonus,
            UpgradeKind::SecondChance => self.second_chance,
        }
    }

    fn level_mut(&mut self, kind: UpgradeKind) -> &mut u8 {
        match kind {
            UpgradeKind::MineDensityReduction => &mut self.mine_density_reduction,
            UpgradeKind::SafeZone => &mut self.safe_zone,
            UpgradeKind::ScoreMultiplier => &mut self.score_multiplier,
            UpgradeKind::FlagBonus => &mut self.flag_bonus,
            UpgradeKind::SecondChance => &mut self.second_chance,
        }
    }

    pub fn mine_density(&self) -> f64 {
        mine_density(self.mine_density_reduction)
    }
}

/// Long lived player state carried between sessions.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProgress {
    pub total_coins: u64,
    /// Best single-game score.
    pub lifetime_score: u64,
    pub games_played: u32,
    pub upgrades: UpgradeLevels,
}

impl PlayerProgress {
    pub fn add_coins(&mut self, amount: u64) {
        self.total_coins = self.total_coins.saturating_add(amount);
    }

    /// Books a finished game, keeping the best score.
    pub fn record_game(&mut self, score: u64) {
        self.games_played = self.games_played.saturating_add(1);
        self.lifetime_score = self.lifetime_score.max(score);
    }

    /// Books a finished session, including the coins it earned.
    pub fn finish_session(&mut self, session: &PlaySession) {
        self.record_game(session.score());
        self.add_coins(session.coins_earned());
    }

    pub fn purchase(&mut self, kind: UpgradeKind) -> Result<u8> {
        let level = self.upgrades.level(kind);
        let cost = kind.next_cost(level).ok_or(GameError::MaxLevelReached)?;
        if self.total_coins < cost {
            return Err(GameError::InsufficientCoins);
        }

        self.total_coins -= cost;
        let level = self.upgrades.level_mut(kind);
        *level += 1;
        log::debug!("Purchased {:?} level {} for {} coins", kind, level, cost);
        Ok(*level)
    }
}
