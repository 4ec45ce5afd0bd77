use crate::config::{MedianMethod, TemporalConfig};
use crate::constants::DEFAULT_SCAN_SIZE;
use crate::error::{FilterError, Result};
use crate::median::{ColumnFilter, MedianFilter};

/// Temporal median filter over fixed-width scans
///
/// Each scan index is an independent stream with its own sliding-window
/// median. `update` returns, for every index, the median of that index over
/// the last `min(t, window_size)` scans.
///
/// # Example
/// ```
/// use scanfilter::config::MedianMethod;
/// use scanfilter::scan::TemporalMedianFilter;
///
/// let mut filter = TemporalMedianFilter::new(3, 2, MedianMethod::Heap).unwrap();
/// filter.update(&[1.0, 10.0]).unwrap();
/// let medians = filter.update(&[3.0, 20.0]).unwrap();
/// assert_eq!(medians, vec![2.0, 15.0]);
/// ```
#[derive(Debug, Clone)]
pub struct TemporalMedianFilter {
    window_size: usize,
    scan_size: usize,
    method: MedianMethod,
    columns: Vec<ColumnFilter<f64>>,
    scans_seen: usize,
}

impl TemporalMedianFilter {
    /// Create a filter with one median stream per scan index
    ///
    /// # Errors
    /// [`FilterError::InvalidConfiguration`] if `window_size` or `scan_size`
    /// is zero.
    pub fn new(window_size: usize, scan_size: usize, method: MedianMethod) -> Result<Self> {
        if scan_size == 0 {
            return Err(FilterError::InvalidConfiguration(
                "scan size must be > 0".to_string(),
            ));
        }

        let columns = (0..scan_size)
            .map(|_| ColumnFilter::new(method, window_size))
            .collect::<Result<Vec<_>>>()?;

        log::debug!(
            "temporal median filter: window {} scan size {} method {}",
            window_size,
            scan_size,
            method
        );

        Ok(Self {
            window_size,
            scan_size,
            method,
            columns,
            scans_seen: 0,
        })
    }

    pub fn from_config(config: &TemporalConfig) -> Result<Self> {
        let scan_size = config.scan_size.unwrap_or(DEFAULT_SCAN_SIZE);
        Self::new(config.window_size, scan_size, config.method)
    }

    /// Admit one scan and return the per-index medians
    ///
    /// The scan is validated before any column is touched, so a rejected
    /// scan leaves the filter unchanged.
    ///
    /// # Errors
    /// - [`FilterError::ScanSizeMismatch`] if `scan.len() != scan_size`
    /// - [`FilterError::NonFiniteSample`] on NaN or infinite readings
    pub fn update(&mut self, scan: &[f64]) -> Result<Vec<f64>> {
        if scan.len() != self.scan_size {
            return Err(FilterError::ScanSizeMismatch {
                expected: self.scan_size,
                actual: scan.len(),
            });
        }
        if let Some(index) = scan.iter().position(|v| !v.is_finite()) {
            return Err(FilterError::NonFiniteSample { index });
        }

        let medians = self
            .columns
            .iter_mut()
            .zip(scan)
            .map(|(column, &reading)| column.update(reading))
            .collect::<Result<Vec<_>>>()?;

        self.scans_seen += 1;
        log::trace!("scan {} filtered", self.scans_seen);
        Ok(medians)
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn scan_size(&self) -> usize {
        self.scan_size
    }

    pub fn method(&self) -> MedianMethod {
        self.method
    }

    /// Scans admitted since construction or the last reset
    pub fn scans_seen(&self) -> usize {
        self.scans_seen
    }

    pub fn reset(&mut self) {
        for column in &mut self.columns {
            column.reset();
        }
        self.scans_seen = 0;
    }
}
