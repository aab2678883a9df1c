use alloc::string::String;
use core::fmt::{self, Write};
use rand::CryptoRng;

/// Number of random bytes behind a session seed, hex encoded to twice as many characters.
pub const SEED_BYTES: usize = 32;

/// Streaming form of the string fold used to derive generator states.
///
/// Every UTF-16 code unit `c` is folded as `hash = (hash << 5) - hash + c` with 32-bit wrapping
/// arithmetic. Since this is a plain left fold, writing `"abc"` in pieces gives the same state as
/// writing it at once, which lets cell material be formatted straight into the hasher.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SeedHasher {
    state: i32,
}

impl SeedHasher {
    pub const fn new() -> Self {
        Self { state: 0 }
    }

    pub fn update(&mut self, material: &str) {
        for unit in material.encode_utf16() {
            self.state = self
                .state
                .wrapping_shl(5)
                .wrapping_sub(self.state)
                .wrapping_add(i32::from(unit));
        }
    }

    pub const fn finish(&self) -> i32 {
        self.state
    }
}

impl Write for SeedHasher {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.update(s);
        Ok(())
    }
}

/// Derives a 32-bit generator state from arbitrary seed material.
pub fn derive_state(material: &str) -> i32 {
    let mut hasher = SeedHasher::new();
    hasher.update(material);
    hasher.finish()
}

/// Creates a fresh session seed, 32 bytes from `rng` as lowercase hex.
///
/// Only a trusted process should call this, a client that can regenerate the seed can see every
/// mine on the board.
pub fn generate_seed<R: CryptoRng + ?Sized>(rng: &mut R) -> String {
    let mut bytes = [0u8; SEED_BYTES];
    rng.fill_bytes(&mut bytes);

    let mut seed = String::with_capacity(SEED_BYTES * 2);
    for byte in bytes {
        // writing into a String cannot fail
        let _ = write!(seed, "{byte:02x}");
    }
    seed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn derive_state_matches_reference_values() {
        assert_eq!(derive_state(""), 0);
        assert_eq!(derive_state("hello"), 99_162_322);
        assert_eq!(derive_state("test-seed-12345"), -757_956_110);
        assert_eq!(derive_state("test-seed-12345:0,0"), 1_092_046_892);
    }

    #[test]
    fn derive_state_folds_utf16_code_units() {
        // includes a surrogate pair
        assert_eq!(derive_state("ünïcødé ✓ 𝄞"), -512_198_752);
    }

    #[test]
    fn streaming_writes_match_single_update() {
        let mut hasher = SeedHasher::new();
        write!(hasher, "{}:{},{}", "test-seed-12345", 0, 0).unwrap();

        assert_eq!(hasher.finish(), derive_state("test-seed-12345:0,0"));
    }

    #[test]
    fn generated_seed_is_hex_and_reproducible_for_same_rng_state() {
        let seed = generate_seed(&mut StdRng::seed_from_u64(7));

        assert_eq!(seed.len(), SEED_BYTES * 2);
        assert!(seed.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_eq!(seed, generate_seed(&mut StdRng::seed_from_u64(7)));
        assert_ne!(seed, generate_seed(&mut StdRng::seed_from_u64(8)));
    }
}
