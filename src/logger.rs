use crate::context::LogContext;
use crate::error::LogError;
use crate::normalize::Sources;
use crate::options::AppOptions;
use crate::record::{NormalizedRecord, Record};
use crate::schema::EventKind;
use chrono::{SecondsFormat, Utc};
use std::sync::Arc;

/// Handle bound to one component and a set of default field values.
///
/// Cheap to clone. Options are read from the owning [`LogContext`] on every
/// call, never copied at construction.
#[derive(Debug, Clone)]
pub struct Logger {
    ctx: Arc<LogContext>,
    component: Arc<str>,
    defaults: Arc<Record>,
}

macro_rules! kind_methods {
    ($($(#[$doc:meta])* $name:ident => $kind:ident;)*) => {
        $(
            $(#[$doc])*
            pub fn $name(&self, record: impl Into<Record>) -> Result<(), LogError> {
                self.emit(EventKind::$kind, record)
            }
        )*
    };
}

impl Logger {
    pub fn new(ctx: Arc<LogContext>, component: impl Into<String>, defaults: Record) -> Self {
        Logger {
            ctx,
            component: Arc::from(component.into()),
            defaults: Arc::new(defaults),
        }
    }

    pub fn component(&self) -> &str {
        &self.component
    }

    pub fn defaults(&self) -> &Record {
        &self.defaults
    }

    pub fn context(&self) -> &Arc<LogContext> {
        &self.ctx
    }

    /// Emit one record of `kind`.
    ///
    /// Writes exactly one line unless the kind is below the configured
    /// threshold or has no fields in the active table. Error kinds are
    /// never filtered by level.
    ///
    /// **Returns**
    /// - `Ok(())` when the line was written or deliberately skipped.
    /// - `Err(LogError::Sink(..))` when the sink failed to accept it.
    pub fn emit(&self, kind: EventKind, record: impl Into<Record>) -> Result<(), LogError> {
        let opts = self.ctx.options();
        let Some(normalized) = self.render_with(&opts, kind, record.into()) else {
            return Ok(());
        };
        if normalized.is_empty() {
            tracing::debug!(target: "olog", kind = %kind, component = %self.component, "no fields for kind, skipping write");
            return Ok(());
        }
        let line = normalized.to_line()?;
        opts.stream.write(&line).map_err(LogError::Sink)
    }

    /// Emit by camelCase kind identifier. Unknown identifiers are a no-op.
    pub fn emit_named(&self, kind: &str, record: impl Into<Record>) -> Result<(), LogError> {
        match kind.parse::<EventKind>() {
            Ok(kind) => self.emit(kind, record),
            Err(e) => {
                tracing::debug!(target: "olog", error = %e, component = %self.component, "skipping emission");
                Ok(())
            }
        }
    }

    /// Run the whole pipeline except the final write.
    ///
    /// Returns `None` when the kind is filtered by level, otherwise the
    /// normalized record (possibly empty for kinds without fields).
    pub fn render(&self, kind: EventKind, record: impl Into<Record>) -> Option<NormalizedRecord> {
        let opts = self.ctx.options();
        self.render_with(&opts, kind, record.into())
    }

    fn render_with(
        &self,
        opts: &AppOptions,
        kind: EventKind,
        mut record: Record,
    ) -> Option<NormalizedRecord> {
        let level = kind.level();
        if !kind.bypasses_threshold() && !level.enabled_at(opts.level) {
            return None;
        }

        record.insert("time", Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true));
        record.insert("component", &*self.component);
        record.insert("level", level.as_str());
        if let Some(name) = opts.display_name_for(kind) {
            record.insert("schema", name);
        }

        let component = self.ctx.component_options(&self.component);
        if let Some(formatter) = opts.formatter_for(kind) {
            let view = Sources {
                record: &record,
                defaults: &self.defaults,
                component: component.as_deref(),
                app: opts,
            }
            .merged_view();
            record.insert("message", formatter.format(&view));
        }

        let sources = Sources {
            record: &record,
            defaults: &self.defaults,
            component: component.as_deref(),
            app: opts,
        };
        Some(sources.normalize(kind))
    }

    kind_methods! {
        server_debug => ServerDebug;
        server_info => ServerInfo;
        server_warn => ServerWarn;
        /// Never filtered by the configured level.
        server_error => ServerError;
        client_debug => ClientDebug;
        client_info => ClientInfo;
        client_warn => ClientWarn;
        /// Never filtered by the configured level.
        client_error => ClientError;
        http_api_start => HttpApiStart;
        http_api_stop => HttpApiStop;
        http_ui_start => HttpUiStart;
        http_ui_stop => HttpUiStop;
        http_api_send => HttpApiSend;
        http_api_receive => HttpApiReceive;
        event_start => EventStart;
        event_stop => EventStop;

        /// Alias for [`server_debug`](Self::server_debug).
        debug => ServerDebug;
        /// Alias for [`server_info`](Self::server_info).
        info => ServerInfo;
        /// Alias for [`server_warn`](Self::server_warn).
        warn => ServerWarn;
        /// Alias for [`server_error`](Self::server_error).
        error => ServerError;
    }
}
