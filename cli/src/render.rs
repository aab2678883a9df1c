use std::fmt::Write;

use infisweep_core::{Biome, MineField, Viewport};

const MINE: char = '*';

/// Full-knowledge map of a window: mines, adjacency numbers, and the biome symbol on zero cells.
pub fn render_field(field: &MineField, viewport: &Viewport) -> String {
    let (_, y_far) = viewport.far_corner();
    let (_, y_origin) = viewport.origin;
    let gutter = y_origin.to_string().len().max(y_far.to_string().len());

    let mut out = String::new();
    for y in viewport.iter_rows() {
        let _ = write!(out, "{y:>gutter$} ");
        for x in viewport.iter_columns() {
            out.push(cell_char(field, (x, y)));
        }
        out.push('\n');
    }
    out
}

fn cell_char(field: &MineField, coords: (i64, i64)) -> char {
    if field.contains_mine(coords) {
        return MINE;
    }
    match field.adjacent_mine_count(coords) {
        0 => Biome::classify(coords).symbol(),
        count => char::from(b'0' + count),
    }
}

pub fn render_legend(field: &MineField) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{MINE} mine, 1-8 adjacent mines, empty cells by biome:");
    for biome in Biome::ALL {
        let _ = writeln!(
            out,
            "  {} {:?} x{} (density {:.3})",
            biome.symbol(),
            biome,
            biome.density_multiplier(),
            biome.effective_density(field.base_density())
        );
    }
    out
}
