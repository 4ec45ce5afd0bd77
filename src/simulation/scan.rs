use std::f64::consts::PI;

use rand::RngExt;

use super::noise::{ScanNoiseConfig, apply_noise, create_rng};
use crate::constants::{SENSOR_MAX_RANGE, SENSOR_MIN_RANGE};

/// Half-width of the simulated rectangular room, in meters
pub const ROOM_HALF_WIDTH: f64 = 4.0;
/// Half-depth of the simulated rectangular room, in meters
pub const ROOM_HALF_DEPTH: f64 = 6.0;

/// Noise-free range from the room center to its wall at `angle` radians
pub fn room_range(angle: f64) -> f64 {
    let (s, c) = angle.sin_cos();
    let to_side = if c.abs() > f64::EPSILON {
        ROOM_HALF_DEPTH / c.abs()
    } else {
        f64::INFINITY
    };
    let to_end = if s.abs() > f64::EPSILON {
        ROOM_HALF_WIDTH / s.abs()
    } else {
        f64::INFINITY
    };
    to_side.min(to_end).clamp(SENSOR_MIN_RANGE, SENSOR_MAX_RANGE)
}

/// Noise-free scan of `scan_size` readings spread over a full rotation
pub fn clean_scan(scan_size: usize) -> Vec<f64> {
    (0..scan_size)
        .map(|i| room_range(2.0 * PI * i as f64 / scan_size as f64))
        .collect()
}

/// Generate `count` noisy scans of the simulated room
///
/// Scans are reproducible when `config.seed` is set.
pub fn generate_scans(count: usize, scan_size: usize, config: &ScanNoiseConfig) -> Vec<Vec<f64>> {
    let mut rng = create_rng(config.seed);
    let clean = clean_scan(scan_size);

    (0..count)
        .map(|_| {
            let mut scan = clean.clone();
            apply_noise(&mut scan, config, &mut rng);
            scan
        })
        .collect()
}

/// Uniform stream of `len` readings within the sensor range
pub fn random_stream(len: usize, seed: u64) -> Vec<f64> {
    let mut rng = create_rng(Some(seed));
    (0..len)
        .map(|_| SENSOR_MIN_RANGE + rng.random::<f64>() * (SENSOR_MAX_RANGE - SENSOR_MIN_RANGE))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_room_range_axes() {
        assert!((room_range(0.0) - ROOM_HALF_DEPTH).abs() < 1e-9);
        assert!((room_range(PI / 2.0) - ROOM_HALF_WIDTH).abs() < 1e-9);
        assert!((room_range(PI) - ROOM_HALF_DEPTH).abs() < 1e-9);
    }

    #[test]
    fn test_generate_dimensions() {
        let scans = generate_scans(5, 90, &ScanNoiseConfig::default().with_seed(1));
        assert_eq!(scans.len(), 5);
        assert!(scans.iter().all(|s| s.len() == 90));
        assert_eq!(scans[0], clean_scan(90));
    }

    #[test]
    fn test_random_stream_in_range() {
        let stream = random_stream(1000, 99);
        assert_eq!(stream.len(), 1000);
        assert!(
            stream
                .iter()
                .all(|&v| (SENSOR_MIN_RANGE..=SENSOR_MAX_RANGE).contains(&v))
        );
        assert_eq!(stream, random_stream(1000, 99));
    }
}
