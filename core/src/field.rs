use alloc::string::String;
use core::fmt::Write;
use serde::Serialize;

use crate::*;

/// Nominal mine probability of a fresh session.
pub const DEFAULT_MINE_DENSITY: f64 = 0.15;

pub fn validate_density(base_density: f64) -> Result<f64> {
    if base_density.is_finite() && (0.0..1.0).contains(&base_density) {
        Ok(base_density)
    } else {
        Err(GameError::InvalidDensity)
    }
}

/// The implicit infinite minefield of one seed.
///
/// Nothing is stored per cell, every answer is recomputed from `(seed, coords, base_density)`.
/// Methods taking raw coordinates don't validate them, use [`MineField::validate_coords`] or the
/// free functions at the boundary.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct MineField {
    seed: String,
    base_density: f64,
}

impl MineField {
    pub fn new(seed: impl Into<String>, base_density: f64) -> Result<Self> {
        let seed = seed.into();
        if seed.is_empty() {
            return Err(GameError::EmptySeed);
        }
        let base_density = validate_density(base_density)?;
        Ok(Self { seed, base_density })
    }

    pub fn seed(&self) -> &str {
        &self.seed
    }

    pub fn base_density(&self) -> f64 {
        self.base_density
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        validate_coords(coords)
    }

    pub fn biome_at(&self, coords: Coord2) -> Biome {
        Biome::classify(coords)
    }

    pub fn effective_density_at(&self, coords: Coord2) -> f64 {
        Biome::classify(coords).effective_density(self.base_density)
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        mine_at(&self.seed, self.base_density, coords)
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        let count = iter_neighbors(coords)
            .filter(|&pos| self.contains_mine(pos))
            .count();
        // at most 8 neighbors
        count as u8
    }

    /// Finds a seed variant where `coords` is safe, for guaranteed-safe clicks.
    ///
    /// Each attempt appends `-safe-{click_index}` to the previous candidate. After `max_attempts`
    /// candidates the current field is kept, so the click may still land on a mine.
    pub fn reroll_until_safe(&self, coords: Coord2, click_index: u32, max_attempts: u32) -> Reroll {
        if !self.contains_mine(coords) {
            return Reroll::Unchanged;
        }

        let mut candidate = self.seed.clone();
        for attempt in 1..=max_attempts {
            // writing into a String cannot fail
            let _ = write!(candidate, "-safe-{click_index}");
            if !mine_at(&candidate, self.base_density, coords) {
                log::debug!(
                    "Safe click at {:?} re-rolled after {} attempt(s)",
                    coords,
                    attempt
                );
                return Reroll::Rerolled {
                    field: Self {
                        seed: candidate,
                        base_density: self.base_density,
                    },
                    attempts: attempt,
                };
            }
        }

        log::warn!(
            "No safe seed variant for {:?} within {} attempts, keeping the session seed",
            coords,
            max_attempts
        );
        Reroll::Exhausted
    }
}

/// Result of [`MineField::reroll_until_safe`].
#[derive(Clone, Debug, PartialEq)]
pub enum Reroll {
    /// The cell was already safe under the current seed.
    Unchanged,
    /// A variant seed makes the cell safe.
    Rerolled { field: MineField, attempts: u32 },
    /// Every attempt was a mine, the current seed stays.
    Exhausted,
}

fn mine_at(seed: &str, base_density: f64, coords: Coord2) -> bool {
    let effective_density = Biome::classify(coords).effective_density(base_density);
    cell_value(seed, coords) < effective_density
}

pub fn is_mine(x: Coord, y: Coord, seed: &str, base_density: f64) -> Result<bool> {
    let coords = validate_coords((x, y))?;
    Ok(MineField::new(seed, base_density)?.contains_mine(coords))
}

pub fn adjacent_mine_count(x: Coord, y: Coord, seed: &str, base_density: f64) -> Result<u8> {
    let coords = validate_coords((x, y))?;
    Ok(MineField::new(seed, base_density)?.adjacent_mine_count(coords))
}
