use crate::context::LogContext;
use crate::record::Record;
use crate::schema::EventKind;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};
use tracing_subscriber::registry::LookupSpan;

/// Target used by this crate's own diagnostics; never bridged.
pub const SELF_TARGET: &str = "olog";

/// Counters kept by [`SchemaLayer`].
#[derive(Debug, Default)]
pub struct LayerStats {
    /// Total events seen by the layer, including skipped ones.
    pub total_events: AtomicU64,
    /// Events handed to the logger without error (written or filtered).
    pub accepted_events: AtomicU64,
    /// Events whose emission returned an error.
    pub failed_events: AtomicU64,
}

impl LayerStats {
    pub fn total(&self) -> u64 {
        self.total_events.load(Ordering::Relaxed)
    }

    pub fn accepted(&self) -> u64 {
        self.accepted_events.load(Ordering::Relaxed)
    }

    pub fn failed(&self) -> u64 {
        self.failed_events.load(Ordering::Relaxed)
    }
}

/// `tracing_subscriber` layer that turns `tracing` events into schema logs.
///
/// The event level picks the server kind (`TRACE` and `DEBUG` both map to
/// `serverDebug`), the event target becomes the component and every
/// recorded field becomes a record field. Level gating and normalization
/// are the same as for direct [`Logger`](crate::logger::Logger) calls.
pub struct SchemaLayer {
    ctx: Arc<LogContext>,
    defaults: Record,
    stats: Arc<LayerStats>,
}

impl SchemaLayer {
    pub fn new(ctx: Arc<LogContext>) -> Self {
        SchemaLayer {
            ctx,
            defaults: Record::new(),
            stats: Arc::new(LayerStats::default()),
        }
    }

    /// Defaults applied to every bridged event.
    pub fn with_defaults(mut self, defaults: Record) -> Self {
        self.defaults = defaults;
        self
    }

    pub fn stats(&self) -> Arc<LayerStats> {
        Arc::clone(&self.stats)
    }
}

pub fn kind_for(level: &Level) -> EventKind {
    match *level {
        Level::ERROR => EventKind::ServerError,
        Level::WARN => EventKind::ServerWarn,
        Level::INFO => EventKind::ServerInfo,
        _ => EventKind::ServerDebug,
    }
}

impl<S> Layer<S> for SchemaLayer
where
    S: Subscriber + for<'span> LookupSpan<'span>,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        self.stats.total_events.fetch_add(1, Ordering::Relaxed);
        let meta = event.metadata();
        if meta.target() == SELF_TARGET || meta.target().starts_with("olog::") {
            return;
        }

        let mut record = Record::new();
        event.record(&mut FieldVisitor { record: &mut record });

        let logger = self.ctx.logger_with_defaults(meta.target(), self.defaults.clone());
        match logger.emit(kind_for(meta.level()), record) {
            Ok(()) => {
                self.stats.accepted_events.fetch_add(1, Ordering::Relaxed);
            }
            Err(e) => {
                self.stats.failed_events.fetch_add(1, Ordering::Relaxed);
                eprintln!("error writing bridged log record: {}", e);
            }
        }
    }
}

/// Collects `tracing` fields into a [`Record`].
pub struct FieldVisitor<'a> {
    pub record: &'a mut Record,
}

impl<'a> Visit for FieldVisitor<'a> {
    fn record_str(&mut self, field: &Field, value: &str) {
        self.record.insert(field.name(), value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.record.insert(field.name(), value);
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.record.insert(field.name(), value);
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.record.insert(field.name(), value);
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.record.insert(field.name(), value);
    }

    fn record_error(&mut self, field: &Field, value: &(dyn std::error::Error + 'static)) {
        self.record.insert(field.name(), value.to_string());
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.record.insert(field.name(), format!("{:?}", value));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory_sink::MemorySink;
    use crate::options::OptionsPatch;
    use serde_json::json;
    use tracing_subscriber::layer::SubscriberExt;
    use tracing_subscriber::Registry;

    #[test]
    fn bridges_events_into_schema_lines() {
        let sink = Arc::new(MemorySink::new());
        let ctx = LogContext::shared(Default::default());
        ctx.configure(OptionsPatch::new().stream(sink.clone()).application("bridge"));
        let layer = SchemaLayer::new(Arc::clone(&ctx));
        let stats = layer.stats();
        let subscriber = Registry::default().with(layer);

        tracing::subscriber::with_default(subscriber, || {
            tracing::info!(target: "billing", transaction = "T9", "charged");
            tracing::error!(target: "billing", exception = "boom", attempts = 3, "failed");
            tracing::debug!(target: "billing", "filtered by threshold");
            tracing::info!(target: "olog", "internal diagnostics are skipped");
        });

        let records = sink.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0]["component"], json!("billing"));
        assert_eq!(records[0]["message"], json!("[SERVER-Info] T9: charged"));
        assert_eq!(records[0]["application"], json!("bridge"));
        assert_eq!(records[1]["level"], json!("error"));
        assert_eq!(records[1]["exception"], json!("boom"));
        assert_eq!(records[1]["message"], json!("[SERVER-Error] : failed: boom"));
        // attempts is not a schema field
        assert!(records[1].get("attempts").is_none());

        assert_eq!(stats.total(), 4);
        assert_eq!(stats.accepted(), 3);
        assert_eq!(stats.failed(), 0);
    }

    #[test]
    fn level_mapping() {
        assert_eq!(kind_for(&Level::TRACE), EventKind::ServerDebug);
        assert_eq!(kind_for(&Level::DEBUG), EventKind::ServerDebug);
        assert_eq!(kind_for(&Level::WARN), EventKind::ServerWarn);
    }
}
