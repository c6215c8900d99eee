//! Schema-driven structured event logging.
//!
//! A [`Logger`] is bound to a component name and default field values.
//! Each emission names an [`EventKind`]; the record is stamped with time,
//! component, level and schema name, its message is rendered from the
//! kind's template, and the result is normalized against the kind's field
//! list before being written to the configured [`LogSink`] as one JSON
//! object.
//!
//! ```
//! use olog::{LogContext, MemorySink, OptionsPatch, Record};
//! use std::sync::Arc;
//!
//! let sink = Arc::new(MemorySink::new());
//! let ctx = LogContext::shared(Default::default());
//! ctx.configure(OptionsPatch::new().application("svc").stream(sink.clone()));
//!
//! let log = ctx.logger("lib/mymodule");
//! log.server_info(Record::new().with("message", "x").with("transaction", "T1")).unwrap();
//!
//! let line = &sink.records()[0];
//! assert_eq!(line["message"], "[SERVER-Info] T1: x");
//! assert_eq!(line["application"], "svc");
//! ```

pub mod context;
pub mod env;
pub mod error;
pub mod level;
pub mod logger;
pub mod memory_sink;
pub mod noop_sink;
pub mod normalize;
pub mod options;
pub mod record;
pub mod schema;
pub mod sink;
pub mod template;

#[cfg(feature = "tracing-layer")]
pub mod init;
#[cfg(feature = "tracing-layer")]
pub mod layer;

pub use context::LogContext;
pub use error::LogError;
pub use level::Level;
pub use logger::Logger;
pub use memory_sink::MemorySink;
pub use noop_sink::NoopSink;
pub use options::{AppOptions, ComponentOptions, OptionsPatch};
pub use record::{NormalizedRecord, Record};
pub use schema::EventKind;
pub use sink::{LogSink, StdoutSink, WriterSink};
pub use template::MessageFormatter;

/// Logger on the process-wide [`LogContext`].
pub fn logger(component: impl Into<String>) -> Logger {
    LogContext::global().logger(component)
}

/// Logger on the process-wide [`LogContext`] with default field values.
pub fn logger_with_defaults(component: impl Into<String>, defaults: Record) -> Logger {
    LogContext::global().logger_with_defaults(component, defaults)
}

/// Reconfigure the process-wide [`LogContext`].
///
/// This is process-global: every logger created through [`logger`] sees the
/// change on its next emission, including loggers created earlier.
pub fn configure(patch: OptionsPatch) {
    LogContext::global().configure(patch)
}
