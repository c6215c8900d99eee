use crate::sink::{LogSink, SinkError};
use serde_json::Value;
use std::sync::Mutex;

/// Sink that keeps every written line in memory.
///
/// Meant for tests: install it as the `stream` option, emit, then inspect
/// [`lines`](Self::lines) or the parsed [`records`](Self::records).
#[derive(Debug, Default)]
pub struct MemorySink {
    lines: Mutex<Vec<String>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Every captured line parsed as JSON. Lines that fail to parse are skipped.
    pub fn records(&self) -> Vec<Value> {
        self.lines()
            .iter()
            .filter_map(|l| serde_json::from_str(l).ok())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.lines.lock().map(|l| l.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        if let Ok(mut l) = self.lines.lock() {
            l.clear();
        }
    }

    /// Remove and return everything captured so far.
    pub fn drain(&self) -> Vec<String> {
        self.lines
            .lock()
            .map(|mut l| std::mem::take(&mut *l))
            .unwrap_or_default()
    }
}

impl LogSink for MemorySink {
    fn write(&self, line: &str) -> Result<(), SinkError> {
        self.lines
            .lock()
            .map_err(|_| "memory sink mutex poisoned")?
            .push(line.to_string());
        Ok(())
    }
}
