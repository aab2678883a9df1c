#![no_std]

extern crate alloc;

use core::ops::BitOr;

pub use biome::*;
pub use engine::*;
pub use error::*;
pub use field::*;
pub use progression::*;
pub use replay::*;
pub use reveal::*;
pub use rng::*;
pub use rules::*;
pub use seed::*;
pub use snapshot::*;
pub use tile::*;
pub use types::*;
pub use view::*;

mod biome;
mod engine;
mod error;
mod field;
mod progression;
mod replay;
mod reveal;
mod rng;
mod rules;
mod seed;
mod snapshot;
mod tile;
mod types;
mod view;

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        match self {
            Self::NoChange => false,
            Self::Changed => true,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    /// Hit a mine but a second chance absorbed it.
    Survived,
    HitMine,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            NoChange => false,
            Revealed => true,
            Survived => true,
            HitMine => true,
        }
    }
}

impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) => HitMine,
            (_, HitMine) => HitMine,
            (Survived, _) => Survived,
            (_, Survived) => Survived,
            (Revealed, _) => Revealed,
            (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}
