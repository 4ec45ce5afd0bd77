use serde::Serialize;

use super::{FilteredScan, Formatter, iso8601_timestamp};

pub struct JsonFormatter;

#[derive(Serialize)]
struct JsonRecord<'a> {
    ts: String,
    scan: usize,
    replaced: usize,
    ranges: &'a [f64],
}

impl Formatter for JsonFormatter {
    fn format(&self, scan: &FilteredScan) -> String {
        let record = JsonRecord {
            ts: iso8601_timestamp(),
            scan: scan.index,
            replaced: scan.replaced,
            ranges: &scan.ranges,
        };
        // Serializing plain numbers and strings cannot fail
        serde_json::to_string(&record).unwrap_or_default()
    }
}
