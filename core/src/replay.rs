use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Milliseconds, relative to whatever clock the caller uses.
pub type Timestamp = u64;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CellAction {
    Reveal,
    Flag,
    Unflag,
}

/// A single player action as recorded by a [`PlaySession`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedCell {
    pub x: Coord,
    pub y: Coord,
    pub action: CellAction,
    pub timestamp: Timestamp,
}

impl ModifiedCell {
    pub const fn coords(&self) -> Coord2 {
        (self.x, self.y)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayMove {
    pub x: Coord,
    pub y: Coord,
    pub action: CellAction,
    /// Milliseconds since the first recorded move.
    pub time_offset: Timestamp,
}

impl ReplayMove {
    pub const fn coords(&self) -> Coord2 {
        (self.x, self.y)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplayData {
    pub config: SessionConfig,
    pub moves: Vec<ReplayMove>,
}

impl ReplayData {
    /// Orders the actions by timestamp, keeping recording order for ties.
    pub fn new(config: SessionConfig, actions: &[ModifiedCell]) -> Self {
        let mut actions = actions.to_vec();
        actions.sort_by_key(|action| action.timestamp);

        let start = actions.first().map_or(0, |action| action.timestamp);
        let moves = actions
            .into_iter()
            .map(|action| ReplayMove {
                x: action.x,
                y: action.y,
                action: action.action,
                time_offset: action.timestamp - start,
            })
            .collect();

        Self { config, moves }
    }

    pub fn from_session(session: &PlaySession) -> Self {
        Self::new(session.config().clone(), session.history())
    }

    pub fn duration(&self) -> Timestamp {
        self.moves.last().map_or(0, |mv| mv.time_offset)
    }

    pub fn len(&self) -> usize {
        self.moves.len()
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

/// Steps a fresh session through recorded moves.
///
/// Safe-click re-rolls depend only on click order, so applying the same moves to a session with the
/// same config ends on the same board, including the re-rolled seed.
#[derive(Clone, Debug)]
pub struct Replayer {
    data: ReplayData,
    session: PlaySession,
    position: usize,
}

impl Replayer {
    pub fn new(data: ReplayData) -> Result<Self> {
        let session = PlaySession::new(data.config.clone())?;
        Ok(Self {
            data,
            session,
            position: 0,
        })
    }

    pub fn data(&self) -> &ReplayData {
        &self.data
    }

    pub fn session(&self) -> &PlaySession {
        &self.session
    }

    /// Number of moves applied so far.
    pub fn position(&self) -> usize {
        self.position
    }

    pub fn is_done(&self) -> bool {
        self.position >= self.data.moves.len()
    }

    /// Applies the next move, returning it, or `None` once all moves are applied.
    pub fn step(&mut self) -> Result<Option<ReplayMove>> {
        let Some(&mv) = self.data.moves.get(self.position) else {
            return Ok(None);
        };

        let coords = mv.coords();
        let at = mv.time_offset;
        let session = &mut self.session;
        match mv.action {
            CellAction::Reveal => {
                session.reveal(coords, at)?;
            }
            CellAction::Flag => {
                if session.cell_at(coords) != EngineCell::Flagged {
                    session.toggle_flag(coords, at)?;
                }
            }
            CellAction::Unflag => {
                if session.cell_at(coords) == EngineCell::Flagged {
                    session.toggle_flag(coords, at)?;
                }
            }
        }

        self.position += 1;
        Ok(Some(mv))
    }

    /// Rebuilds the board as it was after the first `position` moves.
    pub fn seek(&mut self, position: usize) -> Result<()> {
        if position > self.data.moves.len() {
            return Err(GameError::ReplayOutOfRange);
        }

        if position < self.position {
            self.session = PlaySession::new(self.data.config.clone())?;
            self.position = 0;
        }
        while self.position < position {
            self.step()?;
        }
        Ok(())
    }

    /// Applies every remaining move and hands over the final session.
    pub fn finish(mut self) -> Result<PlaySession> {
        while self.step()?.is_some() {}
        Ok(self.session)
    }
}
