#![allow(dead_code)]

use scanfilter::median::median_of;

/// Median of the last `min(t, window)` samples at every step
pub fn brute_force_medians(stream: &[f64], window: usize) -> Vec<f64> {
    (0..stream.len())
        .map(|t| {
            let start = (t + 1).saturating_sub(window);
            median_of(&stream[start..=t]).expect("window is never empty")
        })
        .collect()
}

/// Round readings onto a coarse grid so streams contain many duplicates
pub fn quantize(stream: &[f64], step: f64) -> Vec<f64> {
    stream.iter().map(|v| (v / step).round() * step).collect()
}

/// Deterministic integer stream in `0..modulus`
pub fn lcg_stream(len: usize, seed: u64, modulus: u64) -> Vec<i64> {
    let mut state = seed;
    (0..len)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            ((state >> 33) % modulus) as i64
        })
        .collect()
}
