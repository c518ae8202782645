use chrono::{
    NaiveDateTime,
    Timelike,
};

use crate::cards::{
    MAJOR_ARCANA,
    Orientation,
    TarotCard,
};

/// Result of the deterministic card pick for one wallet at one wall-clock
/// second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Draw {
    pub card: &'static TarotCard,
    pub orientation: Orientation,
}

/// Builds the seed string hashed by [`seed_hash`]. The date is rendered in the
/// `"Tue Aug 25 2026"` shape and hour/minute/second are unpadded decimals, so
/// `00:00:12` contributes `"0012"` and `09:30:00` contributes `"9300"`.
pub fn seed_string(address: &str, at: NaiveDateTime) -> String {
    format!(
        "{}{}{}{}{}",
        at.format("%a %b %d %Y"),
        at.hour(),
        at.minute(),
        at.second(),
        address
    )
}

/// 32-bit rolling string hash: per character `h = ((h << 5) - h) + code`, each
/// step wrapping in two's-complement i32, then the absolute value of the final
/// signed result. Non-ASCII characters contribute their full code point.
pub fn seed_hash(seed: &str) -> u32 {
    let mut hash: i32 = 0;
    for c in seed.chars() {
        hash = hash
            .wrapping_shl(5)
            .wrapping_sub(hash)
            .wrapping_add(c as u32 as i32);
    }
    hash.unsigned_abs()
}

/// Picks a card and orientation for the given wallet at the given instant.
/// Same address within the same second always yields the same draw.
pub fn select_card(address: &str, at: NaiveDateTime) -> Draw {
    let hash = seed_hash(&seed_string(address, at));
    let card = &MAJOR_ARCANA[(hash % 22) as usize];
    let orientation = if hash % 2 == 1 {
        Orientation::Reversed
    } else {
        Orientation::Upright
    };
    Draw { card, orientation }
}
