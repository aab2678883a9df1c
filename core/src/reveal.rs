use alloc::collections::VecDeque;
use alloc::vec::Vec;
use hashbrown::HashSet;

use crate::*;

/// Default cell budget of a single reveal.
pub const DEFAULT_MAX_REVEAL: usize = 1000;

impl MineField {
    /// Breadth-first expansion of the safe region around `start`.
    ///
    /// Safe cells are collected in discovery order, and only zero-count cells push their neighbors.
    /// A mine at `start` gives an empty set. The traversal stops after `max_cells` results, which
    /// is what keeps a click bounded on an infinite board.
    pub fn flood_reveal(&self, start: Coord2, max_cells: usize) -> Vec<Coord2> {
        self.flood_reveal_with_counts(start, max_cells)
            .into_iter()
            .map(|(coords, _)| coords)
            .collect()
    }

    /// Same traversal as [`MineField::flood_reveal`], keeping the adjacent mine count of each cell.
    pub fn flood_reveal_with_counts(&self, start: Coord2, max_cells: usize) -> Vec<(Coord2, u8)> {
        let mut revealed = Vec::new();
        let mut visited = HashSet::new();
        let mut to_visit = VecDeque::from([start]);

        while revealed.len() < max_cells {
            let Some(visit_coords) = to_visit.pop_front() else {
                break;
            };

            if !visited.insert(visit_coords) {
                continue;
            }

            if self.contains_mine(visit_coords) {
                log::trace!("Flood stopped at mine {:?}", visit_coords);
                continue;
            }

            let adjacent_mines = self.adjacent_mine_count(visit_coords);
            revealed.push((visit_coords, adjacent_mines));
            log::trace!(
                "Flood reached {:?}, mine count: {}",
                visit_coords,
                adjacent_mines
            );

            if adjacent_mines == 0 {
                to_visit.extend(iter_neighbors(visit_coords).filter(|pos| !visited.contains(pos)));
            }
        }

        if !to_visit.is_empty() && revealed.len() == max_cells {
            log::warn!(
                "Flood from {:?} truncated at {} cells with {} pending",
                start,
                max_cells,
                to_visit.len()
            );
        }

        revealed
    }
}

pub fn flood_reveal(
    x: Coord,
    y: Coord,
    seed: &str,
    base_density: f64,
    max_cells: usize,
) -> Result<Vec<Coord2>> {
    let start = validate_coords((x, y))?;
    Ok(MineField::new(seed, base_density)?.flood_reveal(start, max_cells))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const SEED: &str = "test-seed-12345";

    fn field(density: f64) -> MineField {
        MineField::new(SEED, density).unwrap()
    }

    fn find_zero_cell(field: &MineField, rng: &mut StdRng) -> Coord2 {
        loop {
            let coords = (rng.random_range(0..100), rng.random_range(0..100));
            if !field.contains_mine(coords) && field.adjacent_mine_count(coords) == 0 {
                return coords;
            }
        }
    }

    #[test]
    fn flood_reveal_matches_reference_order() {
        let cells = flood_reveal(1, 2, SEED, 0.15, DEFAULT_MAX_REVEAL).unwrap();

        assert_eq!(
            cells,
            [
                (1, 2),
                (0, 1),
                (0, 2),
                (0, 3),
                (1, 1),
                (1, 3),
                (2, 1),
                (2, 2),
                (2, 3),
                (3, 1),
                (3, 2),
                (3, 3),
                (4, 1),
                (4, 2),
                (4, 3)
            ]
        );
    }

    #[test]
    fn flood_reveal_is_repeatable() {
        let field = field(0.05);
        let mut rng = StdRng::seed_from_u64(3);
        let start = find_zero_cell(&field, &mut rng);

        assert_eq!(
            field.flood_reveal(start, DEFAULT_MAX_REVEAL),
            field.flood_reveal(start, DEFAULT_MAX_REVEAL)
        );
    }

    #[test]
    fn numbered_start_reveals_only_itself() {
        assert_eq!(field(0.15).flood_reveal((0, 0), DEFAULT_MAX_REVEAL), [(0, 0)]);
    }

    #[test]
    fn mine_start_reveals_nothing() {
        assert!(field(0.15).flood_reveal((1, 0), DEFAULT_MAX_REVEAL).is_empty());
    }

    #[test]
    fn revealed_cells_are_never_mines_and_never_repeat() {
        let field = field(0.05);
        let mut rng = StdRng::seed_from_u64(11);
        let start = find_zero_cell(&field, &mut rng);

        let cells = field.flood_reveal(start, DEFAULT_MAX_REVEAL);
        let unique: HashSet<_> = cells.iter().copied().collect();

        assert!(cells.len() > 1);
        assert_eq!(unique.len(), cells.len());
        assert_eq!(cells[0], start);
        for &(x, y) in &cells {
            assert_eq!(is_mine(x, y, SEED, 0.05), Ok(false));
        }
    }

    #[test]
    fn budget_caps_sparse_fields() {
        let field = field(0.01);
        let mut rng = StdRng::seed_from_u64(5);
        let start = find_zero_cell(&field, &mut rng);

        assert_eq!(field.flood_reveal(start, 50).len(), 50);
        assert_eq!(field.flood_reveal((0, 0), DEFAULT_MAX_REVEAL).len(), DEFAULT_MAX_REVEAL);
        assert!(field.flood_reveal(start, 0).is_empty());
    }

    #[test]
    fn empty_field_expands_in_rings() {
        let field = field(0.0);

        let cells = field.flood_reveal((0, 0), 9);

        assert_eq!(cells[0], (0, 0));
        assert_eq!(&cells[1..], iter_neighbors((0, 0)).collect::<Vec<_>>());
    }

    #[test]
    fn truncated_reveal_is_a_prefix_of_a_larger_one() {
        let field = field(0.05);
        let full = field.flood_reveal((0, 0), DEFAULT_MAX_REVEAL);
        let partial = field.flood_reveal((0, 0), 100);

        assert_eq!(partial, full[..100]);
    }

    #[test]
    fn counts_match_adjacency_queries() {
        let field = field(0.15);
        let counted = field.flood_reveal_with_counts((1, 2), DEFAULT_MAX_REVEAL);

        assert_eq!(counted.len(), 15);
        assert_eq!(counted[0], ((1, 2), 0));
        assert_eq!(counted[3], ((0, 3), 3));
        for (coords, count) in counted {
            assert_eq!(count, field.adjacent_mine_count(coords));
        }
    }

    #[test]
    fn flood_stops_at_the_coordinate_limit() {
        let cells = flood_reveal(COORD_LIMIT, 0, SEED, 0.0, 20).unwrap();

        assert_eq!(cells.len(), 20);
        assert_eq!(cells[0], (COORD_LIMIT, 0));
        assert_eq!(
            &cells[1..6],
            [
                (COORD_LIMIT - 1, -1),
                (COORD_LIMIT - 1, 0),
                (COORD_LIMIT - 1, 1),
                (COORD_LIMIT, -1),
                (COORD_LIMIT, 1)
            ]
        );
        for &(x, y) in &cells {
            assert_eq!(is_mine(x, y, SEED, 0.0), Ok(false));
        }

        let corner = flood_reveal(-COORD_LIMIT, -COORD_LIMIT, SEED, 0.0, DEFAULT_MAX_REVEAL).unwrap();
        assert!(corner.iter().all(|&pos| validate_coords(pos).is_ok()));
    }

    #[test]
    fn boundary_rejects_invalid_input() {
        assert_eq!(
            flood_reveal(COORD_LIMIT + 1, 0, SEED, 0.15, 10),
            Err(GameError::InvalidCoords)
        );
        assert_eq!(flood_reveal(0, 0, SEED, 2.0, 10), Err(GameError::InvalidDensity));
    }
}
