use super::{FilteredScan, Formatter};

pub struct TextFormatter {
    verbose: bool,
}

impl TextFormatter {
    pub fn new(verbose: bool) -> Self {
        Self { verbose }
    }
}

impl Formatter for TextFormatter {
    fn format(&self, scan: &FilteredScan) -> String {
        let ranges: Vec<String> = scan.ranges.iter().map(|r| format!("{:.3}", r)).collect();
        if self.verbose {
            format!(
                "Scan {:>6} [replaced: {:>3}]: {}",
                scan.index,
                scan.replaced,
                ranges.join(" ")
            )
        } else {
            format!("Scan {:>6}: {}", scan.index, ranges.join(" "))
        }
    }
}
