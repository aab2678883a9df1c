use alloc::collections::BTreeSet;
use alloc::string::String;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevealedCell {
    pub x: Coord,
    pub y: Coord,
    pub adjacent_mines: u8,
}

/// Ordered view of everything a player can see, comparable across sessions.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoardSnapshot {
    /// Seed in play, which is the configured seed unless a safe click re-rolled it.
    pub active_seed: String,
    pub state: EngineState,
    pub score: u64,
    pub clicks: u32,
    pub lives_left: u32,
    pub revealed: BTreeSet<RevealedCell>,
    pub flagged: BTreeSet<Coord2>,
    pub detonated: BTreeSet<Coord2>,
}

impl BoardSnapshot {
    pub fn from_session(session: &PlaySession) -> Self {
        let mut revealed = BTreeSet::new();
        let mut flagged = BTreeSet::new();
        let mut detonated = BTreeSet::new();

        for (coords @ (x, y), cell) in session.iter_cells() {
            match cell {
                EngineCell::Hidden => {}
                EngineCell::Revealed(adjacent_mines) => {
                    revealed.insert(RevealedCell {
                        x,
                        y,
                        adjacent_mines,
                    });
                }
                EngineCell::Flagged => {
                    flagged.insert(coords);
                }
                EngineCell::Detonated => {
                    detonated.insert(coords);
                }
            }
        }

        Self {
            active_seed: session.field().seed().into(),
            state: session.state(),
            score: session.score(),
            clicks: session.clicks(),
            lives_left: session.lives_left(),
            revealed,
            flagged,
            detonated,
        }
    }

    pub fn cell_at(&self, coords: Coord2) -> EngineCell {
        let (x, y) = coords;
        if self.flagged.contains(&coords) {
            EngineCell::Flagged
        } else if self.detonated.contains(&coords) {
            EngineCell::Detonated
        } else if let Some(cell) = self
            .revealed
            .range(RevealedCell::lower(coords)..)
            .next()
            .filter(|cell| (cell.x, cell.y) == (x, y))
        {
            EngineCell::Revealed(cell.adjacent_mines)
        } else {
            EngineCell::Hidden
        }
    }
}

impl RevealedCell {
    const fn lower((x, y): Coord2) -> Self {
        Self {
            x,
            y,
            adjacent_mines: 0,
        }
    }
}
