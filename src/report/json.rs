// src/report/json.rs
// Prints one JSON object per event on stdout. Progress ticks are skipped.

use crate::scan::{Reporter, ScanEvent};

#[derive(Debug, Default)]
pub struct JsonReporter;

impl JsonReporter {
    pub fn new() -> Self {
        JsonReporter
    }
}

impl Reporter for JsonReporter {
    fn report(&mut self, event: ScanEvent) {
        if let Some(line) = to_line(&event) {
            println!("{}", line);
        }
    }
}

fn to_line(event: &ScanEvent) -> Option<String> {
    if matches!(event, ScanEvent::Progress(_)) {
        return None;
    }
    serde_json::to_string(event).ok()
}
