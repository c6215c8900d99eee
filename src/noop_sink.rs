use crate::sink::{LogSink, SinkError};

/// A sink that simply drops all lines.
///
/// Useful for measuring the overhead of normalization without any I/O.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopSink;

impl LogSink for NoopSink {
    fn write(&self, _line: &str) -> Result<(), SinkError> {
        Ok(())
    }
}
