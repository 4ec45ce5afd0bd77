use super::{FilteredScan, Formatter, iso8601_timestamp};

pub struct CsvFormatter;

impl Formatter for CsvFormatter {
    fn format(&self, scan: &FilteredScan) -> String {
        let mut line = format!("{},{},{}", iso8601_timestamp(), scan.index, scan.replaced);
        for range in &scan.ranges {
            line.push_str(&format!(",{:.4}", range));
        }
        line
    }

    fn header(&self, scan_size: usize) -> Option<String> {
        let mut header = String::from("ts,scan,replaced");
        for i in 0..scan_size {
            header.push_str(&format!(",r{}", i));
        }
        Some(header)
    }
}
