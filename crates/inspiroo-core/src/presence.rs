// Cosmetic "creators online" counter.

/// Next counter value: `current` moved by a step in `-2..=2` derived from
/// `tick`. Deterministic for a given tick, floored at zero.
pub fn drift(current: u32, tick: u64) -> u32 {
    let step = (mix(tick) % 5) as i64 - 2;
    (current as i64 + step).max(0) as u32
}

// splitmix64 finalizer
fn mix(mut x: u64) -> u64 {
    x = x.wrapping_add(0x9E37_79B9_7F4A_7C15);
    x = (x ^ (x >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    x = (x ^ (x >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    x ^ (x >> 31)
}
