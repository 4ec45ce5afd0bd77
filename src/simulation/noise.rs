use rand::RngExt;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};

/// Noise model for synthetic rangefinder scans
///
/// Each enabled component is applied independently to every reading.
#[derive(Clone, Debug, Default, serde::Deserialize)]
pub struct ScanNoiseConfig {
    pub seed: Option<u64>,
    pub gaussian: Option<GaussianNoiseConfig>,
    pub dropout: Option<DropoutConfig>,
    pub spike: Option<SpikeConfig>,
}

/// Zero-mean measurement jitter
#[derive(Clone, Copy, Debug, serde::Deserialize)]
pub struct GaussianNoiseConfig {
    pub std_dev: f64,
}

/// Missed returns reported as a fixed value (often 0 or beyond max range)
#[derive(Clone, Copy, Debug, serde::Deserialize)]
pub struct DropoutConfig {
    /// Probability per reading
    pub rate: f64,
    pub value: f64,
}

/// Short-lived outliers added to the true range
#[derive(Clone, Copy, Debug, serde::Deserialize)]
pub struct SpikeConfig {
    /// Probability per reading
    pub rate: f64,
    /// Largest absolute offset
    pub magnitude: f64,
}

impl ScanNoiseConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_gaussian(mut self, std_dev: f64) -> Self {
        self.gaussian = Some(GaussianNoiseConfig { std_dev });
        self
    }

    pub fn with_dropouts(mut self, rate: f64, value: f64) -> Self {
        self.dropout = Some(DropoutConfig { rate, value });
        self
    }

    pub fn with_spikes(mut self, rate: f64, magnitude: f64) -> Self {
        self.spike = Some(SpikeConfig { rate, magnitude });
        self
    }
}

pub(crate) fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => rand::make_rng(),
    }
}

/// Apply every configured noise component to `scan` in place
pub fn apply_noise(scan: &mut [f64], config: &ScanNoiseConfig, rng: &mut ChaCha8Rng) {
    if let Some(gaussian) = config.gaussian
        && gaussian.std_dev > 0.0
        && let Ok(normal) = Normal::new(0.0, gaussian.std_dev)
    {
        for reading in scan.iter_mut() {
            *reading += normal.sample(rng);
        }
    }

    if let Some(spike) = config.spike {
        for reading in scan.iter_mut() {
            if rng.random::<f64>() < spike.rate {
                let offset = (rng.random::<f64>() * 2.0 - 1.0) * spike.magnitude;
                *reading += offset;
            }
        }
    }

    if let Some(dropout) = config.dropout {
        for reading in scan.iter_mut() {
            if rng.random::<f64>() < dropout.rate {
                *reading = dropout.value;
            }
        }
    }
}
