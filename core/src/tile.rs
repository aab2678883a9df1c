use serde::{Deserialize, Serialize};

/// Canonical player-visible state stored by the play session.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EngineCell {
    Hidden,
    Revealed(u8),
    Flagged,
    /// A mine that was stepped on, either ending the game or costing a life.
    Detonated,
}

impl Default for EngineCell {
    fn default() -> Self {
        Self::Hidden
    }
}
