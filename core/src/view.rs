use alloc::vec::Vec;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular window onto the infinite field.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Viewport {
    /// Top-left corner, smallest `x` and `y`.
    pub origin: Coord2,
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub fn new(origin: Coord2, width: u32, height: u32) -> Result<Self> {
        let viewport = Self {
            origin,
            width,
            height,
        };
        viewport.validate()?;
        Ok(viewport)
    }

    /// Window of the given size with `center` in its middle, rounding toward the origin.
    pub fn centered_on(center: Coord2, width: u32, height: u32) -> Result<Self> {
        let (x, y) = center;
        Self::new(
            (
                x.saturating_sub(Coord::from(width / 2)),
                y.saturating_sub(Coord::from(height / 2)),
            ),
            width,
            height,
        )
    }

    /// Both corners must lie inside the valid coordinate range.
    pub fn validate(&self) -> Result<()> {
        validate_coords(self.origin)?;
        if self.area() > 0 {
            validate_coords(self.far_corner())?;
        }
        Ok(())
    }

    pub fn far_corner(&self) -> Coord2 {
        let (x, y) = self.origin;
        (
            x.saturating_add(Coord::from(self.width)).saturating_sub(1),
            y.saturating_add(Coord::from(self.height)).saturating_sub(1),
        )
    }

    pub fn contains(&self, coords: Coord2) -> bool {
        let (x0, y0) = self.origin;
        let (x1, y1) = self.far_corner();
        let (x, y) = coords;
        self.width > 0 && self.height > 0 && (x0..=x1).contains(&x) && (y0..=y1).contains(&y)
    }

    pub fn area(&self) -> u64 {
        u64::from(self.width) * u64::from(self.height)
    }

    pub fn iter_rows(&self) -> impl Iterator<Item = Coord> + use<> {
        let (_, y0) = self.origin;
        (0..Coord::from(self.height)).map(move |dy| y0 + dy)
    }

    pub fn iter_columns(&self) -> impl Iterator<Item = Coord> + use<> {
        let (x0, _) = self.origin;
        (0..Coord::from(self.width)).map(move |dx| x0 + dx)
    }

    /// Every coordinate of the window, row by row.
    pub fn iter(&self) -> impl Iterator<Item = Coord2> + use<> {
        let columns = *self;
        self.iter_rows()
            .flat_map(move |y| columns.iter_columns().map(move |x| (x, y)))
    }
}

impl MineField {
    /// Mines inside the window in row-major order, used to uncover the board after a loss.
    pub fn mines_in(&self, viewport: &Viewport) -> Vec<Coord2> {
        viewport
            .iter()
            .filter(|&coords| self.contains_mine(coords))
            .collect()
    }
}
