use crate::config::{OutOfRangePolicy, RangeConfig};
use crate::error::{FilterError, Result};

/// Min/max validation filter for scan readings
///
/// Readings outside `[min, max]` are replaced according to the
/// [`OutOfRangePolicy`]: clamped to the nearest bound, or swapped for a
/// sentinel. Either bound may be absent, but not both.
///
/// NaN readings are never in range. Under `Clamp` they become `min` when a
/// lower bound exists and `max` otherwise, so everything leaving the filter
/// is finite.
#[derive(Debug, Clone)]
pub struct RangeFilter {
    min: Option<f64>,
    max: Option<f64>,
    policy: OutOfRangePolicy,
}

impl RangeFilter {
    /// Create a range filter
    ///
    /// # Errors
    /// [`FilterError::InvalidConfiguration`] when neither bound is set, a bound
    /// or the sentinel is not finite, or `min > max`.
    pub fn new(min: Option<f64>, max: Option<f64>, policy: OutOfRangePolicy) -> Result<Self> {
        if min.is_none() && max.is_none() {
            return Err(FilterError::InvalidConfiguration(
                "range filter needs a minimum or a maximum".to_string(),
            ));
        }
        if [min, max].into_iter().flatten().any(|b| !b.is_finite()) {
            return Err(FilterError::InvalidConfiguration(
                "range bounds must be finite".to_string(),
            ));
        }
        if let OutOfRangePolicy::Sentinel(sentinel) = policy
            && !sentinel.is_finite()
        {
            return Err(FilterError::InvalidConfiguration(format!(
                "sentinel must be finite, got {}",
                sentinel
            )));
        }
        if let (Some(lo), Some(hi)) = (min, max)
            && lo > hi
        {
            return Err(FilterError::InvalidConfiguration(format!(
                "range minimum {} exceeds maximum {}",
                lo, hi
            )));
        }

        Ok(Self { min, max, policy })
    }

    pub fn from_config(config: &RangeConfig) -> Result<Self> {
        Self::new(config.min, config.max, config.out_of_range)
    }

    pub fn min(&self) -> Option<f64> {
        self.min
    }

    pub fn max(&self) -> Option<f64> {
        self.max
    }

    pub fn policy(&self) -> OutOfRangePolicy {
        self.policy
    }

    pub fn contains(&self, value: f64) -> bool {
        !value.is_nan()
            && self.min.is_none_or(|lo| value >= lo)
            && self.max.is_none_or(|hi| value <= hi)
    }

    /// Filter a single reading
    pub fn apply(&self, value: f64) -> f64 {
        if self.contains(value) {
            return value;
        }

        match self.policy {
            OutOfRangePolicy::Sentinel(sentinel) => sentinel,
            OutOfRangePolicy::Clamp => match (self.min, self.max) {
                (Some(lo), _) if value.is_nan() || value < lo => lo,
                (None, Some(hi)) if value.is_nan() => hi,
                (_, Some(hi)) => hi.min(value),
                _ => value,
            },
        }
    }

    /// Filter a whole scan, returning a new buffer
    pub fn update(&self, scan: &[f64]) -> Vec<f64> {
        scan.iter().map(|&v| self.apply(v)).collect()
    }

    /// Filter a scan in place, returning how many readings were replaced
    pub fn update_in_place(&self, scan: &mut [f64]) -> usize {
        let mut replaced = 0;
        for reading in scan.iter_mut() {
            if !self.contains(*reading) {
                *reading = self.apply(*reading);
                replaced += 1;
            }
        }
        replaced
    }
}
