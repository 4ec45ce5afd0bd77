use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{FilterError, Result};

/// Source of raw scans, one call per scan
pub trait ScanSource {
    /// Next scan, or `None` when the stream is exhausted
    fn next_scan(&mut self) -> Result<Option<Vec<f64>>>;
}

/// Parse one text line into a scan
///
/// Readings are separated by commas and/or whitespace. Blank lines and
/// lines starting with `#` yield `None`.
pub fn parse_scan_line(line: &str, line_number: usize) -> Result<Option<Vec<f64>>> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(None);
    }

    line.split(|c: char| c == ',' || c.is_whitespace())
        .filter(|field| !field.is_empty())
        .map(|field| {
            field.parse::<f64>().map_err(|_| FilterError::Parse {
                line: line_number,
                message: format!("invalid reading '{}'", field),
            })
        })
        .collect::<Result<Vec<_>>>()
        .map(Some)
}

/// Line-oriented text scan reader
pub struct TextScanSource<R> {
    reader: R,
    line_number: usize,
    buf: String,
}

impl<R: BufRead> TextScanSource<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            line_number: 0,
            buf: String::new(),
        }
    }
}

impl TextScanSource<BufReader<File>> {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Ok(Self::new(BufReader::new(file)))
    }
}

impl<R: BufRead> ScanSource for TextScanSource<R> {
    fn next_scan(&mut self) -> Result<Option<Vec<f64>>> {
        loop {
            self.buf.clear();
            if self.reader.read_line(&mut self.buf)? == 0 {
                return Ok(None);
            }
            self.line_number += 1;

            if let Some(scan) = parse_scan_line(&self.buf, self.line_number)? {
                return Ok(Some(scan));
            }
        }
    }
}

/// Scans held in memory
pub struct VecScanSource {
    scans: std::vec::IntoIter<Vec<f64>>,
}

impl VecScanSource {
    pub fn new(scans: Vec<Vec<f64>>) -> Self {
        Self {
            scans: scans.into_iter(),
        }
    }
}

impl ScanSource for VecScanSource {
    fn next_scan(&mut self) -> Result<Option<Vec<f64>>> {
        Ok(self.scans.next())
    }
}
