use super::Reporter;
use crate::model::ScanResult;

pub struct CsvReporter;

impl CsvReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CsvReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for CsvReporter {
    fn report(&self, result: &ScanResult) -> String {
        result.to_csv()
    }
}
