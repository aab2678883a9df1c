use crate::*;

/// Single coordinate axis, the world is unbounded in both directions.
pub type Coord = i64;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Largest magnitude accepted for either axis, matches the integers a browser client can represent
/// exactly.
pub const COORD_LIMIT: Coord = (1 << 53) - 1;

pub fn validate_coords(coords: Coord2) -> Result<Coord2> {
    let (x, y) = coords;
    if (-COORD_LIMIT..=COORD_LIMIT).contains(&x) && (-COORD_LIMIT..=COORD_LIMIT).contains(&y) {
        Ok(coords)
    } else {
        Err(GameError::InvalidCoords)
    }
}

/// Squared euclidean distance from the origin, exact for every accepted coordinate.
pub const fn distance_squared((x, y): Coord2) -> i128 {
    let x = x as i128;
    let y = y as i128;
    x * x + y * y
}

/// Neighbor offsets, `dx` outer and `dy` inner. Flood reveal order depends on this.
const DISPLACEMENTS: [(Coord, Coord); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

pub fn iter_neighbors(center: Coord2) -> NeighborIter {
    NeighborIter::new(center)
}

/// Applies `delta` to `coords`, returning a value only when it stays within `COORD_LIMIT`.
fn apply_delta(coords: Coord2, delta: (Coord, Coord)) -> Option<Coord2> {
    let (x, y) = coords;
    let (dx, dy) = delta;
    validate_coords((x.checked_add(dx)?, y.checked_add(dy)?)).ok()
}

/// Iterates the cells at Chebyshev distance 1. `COORD_LIMIT` acts as the world edge, so cells on
/// it have fewer than 8 neighbors.
#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    index: u8,
}

impl NeighborIter {
    fn new(center: Coord2) -> Self {
        Self { center, index: 0 }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let delta = *DISPLACEMENTS.get(usize::from(self.index))?;
            self.index += 1;

            let next_item = apply_delta(self.center, delta);
            if next_item.is_some() {
                return next_item;
            }
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = DISPLACEMENTS.len() - usize::from(self.index);
        (0, Some(left))
    }
}
