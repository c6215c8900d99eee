use std::error::Error;
use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;

/// Error reported by a [`LogSink`].
pub type SinkError = Box<dyn Error + Send + Sync>;

/// Destination for serialized log lines.
///
/// The logger hands over one compact JSON object per call, without a
/// trailing newline; framing is up to the sink. `write` is called
/// synchronously on the emitting thread and its error is returned to the
/// caller of the emission method unchanged.
pub trait LogSink: Send + Sync {
    /// Accept a single serialized record.
    ///
    /// **Returns**
    /// - `Ok(())` if the line was accepted.
    /// - `Err(..)` if the underlying writer failed. The logger does not
    ///   retry or buffer; partial writes are the sink's concern.
    fn write(&self, line: &str) -> Result<(), SinkError>;

    /// Flush any buffered output. Default implementation is a no-op.
    fn flush(&self) -> Result<(), SinkError> {
        Ok(())
    }
}

/// Writes each line plus `\n` to the process's standard output.
#[derive(Debug, Clone, Copy, Default)]
pub struct StdoutSink;

impl LogSink for StdoutSink {
    fn write(&self, line: &str) -> Result<(), SinkError> {
        let mut out = io::stdout().lock();
        out.write_all(line.as_bytes())?;
        out.write_all(b"\n")?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        io::stdout().flush()?;
        Ok(())
    }
}

/// Newline-framed sink over any [`Write`] implementation (files, stderr,
/// in-memory buffers).
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        WriterSink { writer: Mutex::new(writer) }
    }

    /// Consume the sink and return the writer.
    pub fn into_inner(self) -> Result<W, SinkError> {
        self.writer
            .into_inner()
            .map_err(|_| "writer mutex poisoned".into())
    }
}

impl<W: Write + Send> fmt::Debug for WriterSink<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterSink").finish_non_exhaustive()
    }
}

impl<W: Write + Send> LogSink for WriterSink<W> {
    fn write(&self, line: &str) -> Result<(), SinkError> {
        let mut w = self.writer.lock().map_err(|_| "writer mutex poisoned")?;
        // one buffer so the line and its newline land in a single write call
        let mut buf = Vec::with_capacity(line.len() + 1);
        buf.extend_from_slice(line.as_bytes());
        buf.push(b'\n');
        w.write_all(&buf)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), SinkError> {
        let mut w = self.writer.lock().map_err(|_| "writer mutex poisoned")?;
        w.flush()?;
        Ok(())
    }
}
