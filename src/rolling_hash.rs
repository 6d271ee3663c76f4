//! Polynomial rolling hash over strings.
//!
//! Horner's rule with 64-bit wraparound: `h = h * base + code(ch)` for each
//! character, where `code(ch) = ch - 'a' + 1`. Designed for lowercase ASCII
//! words; other characters still hash deterministically, their code simply
//! wraps (e.g. `'0'` contributes `-48 mod 2^64`).

pub const DEFAULT_BASE: u64 = 911_382_323;

const CODE_OFFSET: u64 = b'a' as u64 - 1;

/// Hash `s` with [`DEFAULT_BASE`].
pub fn poly_hash(s: &str) -> u64 {
    poly_hash_with_base(s, DEFAULT_BASE)
}

/// Hash `s` with an explicit base. The empty string hashes to 0.
pub fn poly_hash_with_base(s: &str, base: u64) -> u64 {
    s.chars().fold(0u64, |h, ch| {
        h.wrapping_mul(base)
            .wrapping_add((ch as u64).wrapping_sub(CODE_OFFSET))
    })
}
