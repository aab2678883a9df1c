use alloc::vec::Vec;
use core::num::Saturating;
use hashbrown::{HashMap, HashSet};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EngineState {
    Active,
    Lost,
}

impl EngineState {
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Lost)
    }
}

impl Default for EngineState {
    fn default() -> Self {
        Self::Active
    }
}

/// One player's game on the infinite field.
///
/// Only cells the player touched are stored, everything else is `Hidden` and answered by the
/// [`MineField`]. Every applied action is appended to the history, which is all a replay needs
/// besides the [`SessionConfig`].
#[derive(Clone, Debug)]
pub struct PlaySession {
    config: SessionConfig,
    field: MineField,
    board: HashMap<Coord2, EngineCell>,
    scored_flags: HashSet<Coord2>,
    score: Saturating<u64>,
    clicks: u32,
    lives_left: u32,
    revealed_count: Saturating<u64>,
    flagged_count: Saturating<u64>,
    state: EngineState,
    triggered_mine: Option<Coord2>,
    history: Vec<ModifiedCell>,
}

impl PlaySession {
    pub fn new(config: SessionConfig) -> Result<Self> {
        config.validate()?;
        let field = config.mine_field()?;
        let lives_left = config.rules.second_chances;
        Ok(Self {
            config,
            field,
            board: HashMap::new(),
            scored_flags: HashSet::new(),
            score: Saturating(0),
            clicks: 0,
            lives_left,
            revealed_count: Saturating(0),
            flagged_count: Saturating(0),
            state: Default::default(),
            triggered_mine: None,
            history: Vec::new(),
        })
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Field currently in play, differs from the configured seed after a safe-click re-roll.
    pub fn field(&self) -> &MineField {
        &self.field
    }

    pub fn state(&self) -> EngineState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn score(&self) -> u64 {
        self.score.0
    }

    /// Coins paid out for the session, one per ten points.
    pub fn coins_earned(&self) -> u64 {
        self.score.0 / 10
    }

    pub fn clicks(&self) -> u32 {
        self.clicks
    }

    pub fn safe_clicks_left(&self) -> u32 {
        self.config.rules.safe_clicks.saturating_sub(self.clicks)
    }

    pub fn lives_left(&self) -> u32 {
        self.lives_left
    }

    pub fn revealed_count(&self) -> u64 {
        self.revealed_count.0
    }

    pub fn flagged_count(&self) -> u64 {
        self.flagged_count.0
    }

    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn history(&self) -> &[ModifiedCell] {
        &self.history
    }

    pub fn cell_at(&self, coords: Coord2) -> EngineCell {
        self.board.get(&coords).copied().unwrap_or_default()
    }

    /// Touched cells in no particular order.
    pub fn iter_cells(&self) -> impl Iterator<Item = (Coord2, EngineCell)> + '_ {
        self.board.iter().map(|(&coords, &cell)| (coords, cell))
    }

    pub fn can_chord_reveal_at(&self, coords: Coord2) -> bool {
        if self.state.is_finished() {
            return false;
        }

        if let EngineCell::Revealed(count) = self.cell_at(coords) {
            count == self.count_flagged_neighbors(coords)
        } else {
            false
        }
    }

    pub fn toggle_flag(&mut self, coords: Coord2, at: Timestamp) -> Result<MarkOutcome> {
        use EngineCell::*;
        use MarkOutcome::*;

        let coords = self.field.validate_coords(coords)?;
        self.check_active()?;

        Ok(match self.cell_at(coords) {
            Hidden => {
                self.board.insert(coords, Flagged);
                self.flagged_count += 1;
                self.record(coords, CellAction::Flag, at);
                if self.field.contains_mine(coords) && self.scored_flags.insert(coords) {
                    self.score += self.config.rules.points_per_flag;
                }
                Changed
            }
            Flagged => {
                self.board.remove(&coords);
                self.flagged_count -= 1;
                self.record(coords, CellAction::Unflag, at);
                Changed
            }
            Revealed(_) | Detonated => NoChange,
        })
    }

    /// Reveals a hidden cell, flooding outwards from it when it has no adjacent mines.
    ///
    /// The flood runs over the field alone, so it passes through flagged cells but leaves them
    /// flagged and unscored. Flagged or revealed targets are a no-op.
    pub fn reveal(&mut self, coords: Coord2, at: Timestamp) -> Result<RevealOutcome> {
        let coords = self.field.validate_coords(coords)?;
        self.check_active()?;

        if matches!(self.cell_at(coords), EngineCell::Hidden) {
            Ok(self.reveal_single_cell(coords, at))
        } else {
            Ok(RevealOutcome::NoChange)
        }
    }

    /// Reveals every hidden neighbor of a number once enough flags surround it.
    ///
    /// Each neighbor counts as its own click, hidden cells fall back to a plain reveal.
    pub fn chord_reveal(&mut self, coords: Coord2, at: Timestamp) -> Result<RevealOutcome> {
        let coords = self.field.validate_coords(coords)?;
        self.check_active()?;

        Ok(match self.cell_at(coords) {
            EngineCell::Revealed(count) if count == self.count_flagged_neighbors(coords) => {
                let mut outcome = RevealOutcome::NoChange;
                for neighbor_coords in iter_neighbors(coords) {
                    if self.state.is_finished() {
                        break;
                    }
                    if matches!(self.cell_at(neighbor_coords), EngineCell::Hidden) {
                        outcome = outcome | self.reveal_single_cell(neighbor_coords, at);
                    }
                }
                outcome
            }
            EngineCell::Hidden => self.reveal_single_cell(coords, at),
            _ => RevealOutcome::NoChange,
        })
    }

    fn reveal_single_cell(&mut self, coords: Coord2, at: Timestamp) -> RevealOutcome {
        if self.clicks < self.config.rules.safe_clicks {
            self.apply_safe_click(coords);
        }
        self.clicks += 1;
        self.record(coords, CellAction::Reveal, at);

        if self.field.contains_mine(coords) {
            self.board.insert(coords, EngineCell::Detonated);
            if self.lives_left > 0 {
                self.lives_left -= 1;
                log::debug!(
                    "Mine at {:?} absorbed, {} second chance(s) left",
                    coords,
                    self.lives_left
                );
                return RevealOutcome::Survived;
            }

            log::debug!("Mine hit at {:?}, final score {}", coords, self.score);
            self.triggered_mine = Some(coords);
            self.state = EngineState::Lost;
            return RevealOutcome::HitMine;
        }

        let budget = self.config.rules.max_reveal_per_click;
        let mut newly_revealed = 0u64;
        for (visit_coords, adjacent_mines) in self.field.flood_reveal_with_counts(coords, budget) {
            // flags survive a flood
            if matches!(self.cell_at(visit_coords), EngineCell::Hidden) {
                self.board
                    .insert(visit_coords, EngineCell::Revealed(adjacent_mines));
                newly_revealed += 1;
            }
        }
        self.revealed_count += newly_revealed;
        self.score += newly_revealed.saturating_mul(self.config.rules.points_per_cell);
        log::debug!(
            "Revealed {} cell(s) from {:?}, score {}",
            newly_revealed,
            coords,
            self.score
        );

        RevealOutcome::Revealed
    }

    fn apply_safe_click(&mut self, coords: Coord2) {
        let retry_limit = self.config.rules.safe_retry_limit;
        if let Reroll::Rerolled { field, .. } =
            self.field.reroll_until_safe(coords, self.clicks, retry_limit)
        {
            self.field = field;
        }
    }

    fn record(&mut self, coords: Coord2, action: CellAction, timestamp: Timestamp) {
        let (x, y) = coords;
        self.history.push(ModifiedCell {
            x,
            y,
            action,
            timestamp,
        });
    }

    fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        let count = iter_neighbors(coords)
            .filter(|&pos| self.cell_at(pos) == EngineCell::Flagged)
            .count();
        count as u8
    }

    fn check_active(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
