use super::Reporter;
use crate::model::ScanResult;

pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        Self
    }
}

impl Default for JsonReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl Reporter for JsonReporter {
    fn report(&self, result: &ScanResult) -> String {
        result
            .to_json()
            .unwrap_or_else(|e| format!(r#"{{"error": "failed to serialize result: {e}"}}"#))
    }
}
