use serde::{Deserialize, Serialize};

use crate::*;

/// Effective density is never allowed above this, whatever the base density or multiplier.
pub const MAX_EFFECTIVE_DENSITY: f64 = 0.9;

/// Distance based zones of the field, ordered from the origin outwards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Biome {
    /// Distance below 50
    SafeHaven,
    /// Distance in `[50, 100)`
    Wasteland,
    /// Distance in `[100, 200)`
    Void,
    /// Distance of 200 and beyond
    Minefield,
}

impl Biome {
    pub const ALL: [Biome; 4] = [
        Biome::SafeHaven,
        Biome::Wasteland,
        Biome::Void,
        Biome::Minefield,
    ];

    /// Zone containing `coords`.
    ///
    /// Thresholds are compared on the squared distance, which is exact and equivalent to comparing
    /// `sqrt(x² + y²)` over the reals.
    pub const fn classify(coords: Coord2) -> Self {
        let d2 = distance_squared(coords);
        if d2 < 50 * 50 {
            Self::SafeHaven
        } else if d2 < 100 * 100 {
            Self::Wasteland
        } else if d2 < 200 * 200 {
            Self::Void
        } else {
            Self::Minefield
        }
    }

    pub const fn density_multiplier(self) -> f64 {
        match self {
            Self::SafeHaven => 1.0,
            Self::Wasteland => 1.2,
            Self::Void => 1.5,
            Self::Minefield => 2.0,
        }
    }

    pub fn effective_density(self, base_density: f64) -> f64 {
        (base_density * self.density_multiplier()).min(MAX_EFFECTIVE_DENSITY)
    }

    /// Single character tag, used by text renderings of the field.
    pub const fn symbol(self) -> char {
        match self {
            Self::SafeHaven => '.',
            Self::Wasteland => ',',
            Self::Void => ':',
            Self::Minefield => ';',
        }
    }
}

pub fn classify_biome(x: Coord, y: Coord) -> Biome {
    Biome::classify((x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_are_half_open() {
        assert_eq!(classify_biome(0, 0), Biome::SafeHaven);
        assert_eq!(classify_biome(49, 0), Biome::SafeHaven);
        assert_eq!(classify_biome(35, 35), Biome::SafeHaven);
        assert_eq!(classify_biome(50, 0), Biome::Wasteland);
        assert_eq!(classify_biome(0, -99), Biome::Wasteland);
        assert_eq!(classify_biome(-100, 0), Biome::Void);
        // 141² + 141² = 39762, distance ~199.4
        assert_eq!(classify_biome(141, 141), Biome::Void);
        // 142² + 142² = 40328, distance ~200.8
        assert_eq!(classify_biome(142, 142), Biome::Minefield);
        assert_eq!(classify_biome(0, 200), Biome::Minefield);
        assert_eq!(classify_biome(COORD_LIMIT, COORD_LIMIT), Biome::Minefield);
    }

    #[test]
    fn classification_uses_real_distance_not_axis_distance() {
        // 36² + 36² = 2592, distance ~50.9
        assert_eq!(classify_biome(36, 36), Biome::Wasteland);
        // 30² + 40² = 2500, exactly 50
        assert_eq!(classify_biome(30, 40), Biome::Wasteland);
        assert_eq!(classify_biome(30, 39), Biome::SafeHaven);
    }

    #[test]
    fn effective_density_is_capped() {
        assert_eq!(Biome::SafeHaven.effective_density(0.15), 0.15);
        assert!((Biome::Wasteland.effective_density(0.15) - 0.18).abs() < 1e-12);
        assert_eq!(Biome::Void.effective_density(0.5), 0.75);
        assert_eq!(Biome::Minefield.effective_density(0.5), MAX_EFFECTIVE_DENSITY);
        assert_eq!(Biome::SafeHaven.effective_density(0.95), MAX_EFFECTIVE_DENSITY);

        for biome in Biome::ALL {
            assert!(biome.effective_density(0.99) <= MAX_EFFECTIVE_DENSITY);
            assert_eq!(biome.effective_density(0.0), 0.0);
        }
    }

    #[test]
    fn zones_are_ordered_outwards() {
        assert!(Biome::SafeHaven < Biome::Wasteland);
        assert!(Biome::Void < Biome::Minefield);
        assert!(
            Biome::ALL
                .windows(2)
                .all(|pair| pair[0].density_multiplier() < pair[1].density_multiplier())
        );
    }
}
