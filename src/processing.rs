use crate::config::FilterConfig;
use crate::error::Result;
use crate::scan::{RangeFilter, TemporalMedianFilter};

/// One filtered scan with its position in the stream
#[derive(Debug, Clone, PartialEq)]
pub struct FilteredScan {
    /// Zero-based scan number
    pub index: usize,
    /// Per-index median ranges
    pub ranges: Vec<f64>,
    /// Readings the range stage replaced before filtering
    pub replaced: usize,
}

/// Scan pipeline: range validation followed by the temporal median
pub struct ScanProcessor {
    range_filter: Option<RangeFilter>,
    temporal: TemporalMedianFilter,
    scans_processed: usize,
    readings_replaced: usize,
}

impl ScanProcessor {
    pub fn new(config: &FilterConfig) -> Result<Self> {
        config.validate()?;

        let range_filter = if config.range.is_enabled() {
            Some(RangeFilter::from_config(&config.range)?)
        } else {
            None
        };
        let temporal = TemporalMedianFilter::from_config(&config.temporal)?;

        Ok(Self {
            range_filter,
            temporal,
            scans_processed: 0,
            readings_replaced: 0,
        })
    }

    /// Filter one scan
    pub fn process_scan(&mut self, scan: &[f64]) -> Result<FilteredScan> {
        let mut readings = scan.to_vec();
        let replaced = match self.range_filter {
            Some(ref filter) => filter.update_in_place(&mut readings),
            None => 0,
        };

        let ranges = self.temporal.update(&readings)?;

        if replaced > 0 {
            log::debug!(
                "scan {}: {} readings out of range",
                self.scans_processed,
                replaced
            );
        }

        let result = FilteredScan {
            index: self.scans_processed,
            ranges,
            replaced,
        };
        self.scans_processed += 1;
        self.readings_replaced += replaced;
        Ok(result)
    }

    /// Filter a sequence of scans, stopping at the first error
    pub fn process_scans<'a, I>(&mut self, scans: I) -> Result<Vec<FilteredScan>>
    where
        I: IntoIterator<Item = &'a [f64]>,
    {
        scans.into_iter().map(|scan| self.process_scan(scan)).collect()
    }

    pub fn scans_processed(&self) -> usize {
        self.scans_processed
    }

    /// Total readings replaced by the range stage
    pub fn readings_replaced(&self) -> usize {
        self.readings_replaced
    }

    pub fn range_filter(&self) -> Option<&RangeFilter> {
        self.range_filter.as_ref()
    }

    pub fn temporal(&self) -> &TemporalMedianFilter {
        &self.temporal
    }

    pub fn reset(&mut self) {
        self.temporal.reset();
        self.scans_processed = 0;
        self.readings_replaced = 0;
    }
}
