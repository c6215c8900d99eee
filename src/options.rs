use crate::env;
use crate::level::{Level, ParseLevelError};
use crate::schema::{self, EventKind, FieldTable, MessageFormatters, SchemaNames};
use crate::sink::{LogSink, StdoutSink};
use crate::template::MessageFormatter;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Schema version stamped into every record unless overridden.
pub const DEFAULT_VERSION: u64 = 3;

/// Process-wide options shared by every logger of a [`LogContext`](crate::context::LogContext).
///
/// **Fields**
/// - `level`: minimum severity that is written; error kinds ignore it.
/// - `application`, `environment`, `host`, `pid`, `version`: top-level
///   values that fill the same-named schema fields when neither the record,
///   the logger defaults nor the component options provide them.
/// - `stream`: destination of serialized lines.
/// - `schema_names`, `message_formatters`, `fields`: the per-kind tables.
/// - `extra`: any other top-level value; also resolvable by field name.
#[derive(Clone)]
pub struct AppOptions {
    pub level: Level,
    pub application: Option<String>,
    pub environment: Option<String>,
    pub host: Option<String>,
    pub pid: Option<String>,
    pub version: Option<Value>,
    pub stream: Arc<dyn LogSink>,
    pub schema_names: SchemaNames,
    pub message_formatters: MessageFormatters,
    pub fields: FieldTable,
    pub extra: BTreeMap<String, Value>,
}

impl Default for AppOptions {
    fn default() -> Self {
        Self {
            level: Level::Info,
            application: None,
            environment: None,
            host: Some(env::hostname()),
            pid: Some(env::pid()),
            version: Some(Value::from(DEFAULT_VERSION)),
            stream: Arc::new(StdoutSink),
            schema_names: schema::default_schema_names(),
            message_formatters: schema::default_message_formatters(),
            fields: schema::default_fields(),
            extra: BTreeMap::new(),
        }
    }
}

impl AppOptions {
    /// Defaults overlaid with `OLOG_LEVEL`, `OLOG_APPLICATION` and `OLOG_ENVIRONMENT`.
    ///
    /// An unparsable `OLOG_LEVEL` is reported through `tracing` and ignored.
    pub fn from_env() -> Self {
        let mut opts = AppOptions::default();
        if let Some(raw) = env::env_opt(env::OLOG_LEVEL_ENV) {
            match raw.parse::<Level>() {
                Ok(level) => opts.level = level,
                Err(e) => tracing::warn!(target: "olog", error = %e, "ignoring {}", env::OLOG_LEVEL_ENV),
            }
        }
        opts.application = env::env_opt(env::OLOG_APPLICATION_ENV);
        opts.environment = env::env_opt(env::OLOG_ENVIRONMENT_ENV);
        opts
    }

    /// Field list for `kind`; empty when the table has no entry.
    pub fn fields_for(&self, kind: EventKind) -> &[String] {
        self.fields.get(&kind).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn display_name_for(&self, kind: EventKind) -> Option<&str> {
        self.schema_names.get(&kind).map(String::as_str)
    }

    pub fn formatter_for(&self, kind: EventKind) -> Option<&MessageFormatter> {
        self.message_formatters.get(&kind)
    }

    /// Top-level value for a schema field name, if one is configured.
    pub fn field_value(&self, name: &str) -> Option<Value> {
        let typed = match name {
            "application" => self.application.clone().map(Value::String),
            "environment" => self.environment.clone().map(Value::String),
            "host" => self.host.clone().map(Value::String),
            "pid" => self.pid.clone().map(Value::String),
            "version" => self.version.clone(),
            _ => None,
        };
        typed
            .or_else(|| self.extra.get(name).cloned())
            .filter(|v| !v.is_null())
    }

    /// Shallow merge: every key set in `patch` replaces the current value wholesale.
    pub fn apply(&mut self, patch: OptionsPatch) {
        let OptionsPatch {
            level,
            application,
            environment,
            host,
            pid,
            version,
            stream,
            schema_names,
            message_formatters,
            fields,
            extra,
        } = patch;

        if let Some(v) = level {
            self.level = v;
        }
        if let Some(v) = application {
            self.application = v;
        }
        if let Some(v) = environment {
            self.environment = v;
        }
        if let Some(v) = host {
            self.host = v;
        }
        if let Some(v) = pid {
            self.pid = v;
        }
        if let Some(v) = version {
            self.version = v;
        }
        if let Some(v) = stream {
            self.stream = v;
        }
        if let Some(v) = schema_names {
            self.schema_names = v;
        }
        if let Some(v) = message_formatters {
            self.message_formatters = v;
        }
        if let Some(v) = fields {
            self.fields = v;
        }
        self.extra.extend(extra);
    }
}

impl fmt::Debug for AppOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppOptions")
            .field("level", &self.level)
            .field("application", &self.application)
            .field("environment", &self.environment)
            .field("host", &self.host)
            .field("pid", &self.pid)
            .field("version", &self.version)
            .field("schema_names", &self.schema_names)
            .field("message_formatters", &self.message_formatters)
            .field("fields", &self.fields)
            .field("extra", &self.extra)
            .finish_non_exhaustive()
    }
}

/// Partial [`AppOptions`] passed to `configure`.
///
/// Unset keys leave the current value alone. Setting `application`,
/// `environment`, `host`, `pid` or `version` to `None` through the
/// `clear_*` methods removes the value. Extra keys are merged one by one.
#[derive(Clone, Default)]
pub struct OptionsPatch {
    level: Option<Level>,
    application: Option<Option<String>>,
    environment: Option<Option<String>>,
    host: Option<Option<String>>,
    pid: Option<Option<String>>,
    version: Option<Option<Value>>,
    stream: Option<Arc<dyn LogSink>>,
    schema_names: Option<SchemaNames>,
    message_formatters: Option<MessageFormatters>,
    fields: Option<FieldTable>,
    extra: BTreeMap<String, Value>,
}

impl OptionsPatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn level(mut self, level: Level) -> Self {
        self.level = Some(level);
        self
    }

    /// Threshold by name, e.g. `"warn"`.
    pub fn level_name(self, name: &str) -> Result<Self, ParseLevelError> {
        Ok(self.level(name.parse()?))
    }

    pub fn application(mut self, application: impl Into<String>) -> Self {
        self.application = Some(Some(application.into()));
        self
    }

    pub fn clear_application(mut self) -> Self {
        self.application = Some(None);
        self
    }

    pub fn environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = Some(Some(environment.into()));
        self
    }

    pub fn clear_environment(mut self) -> Self {
        self.environment = Some(None);
        self
    }

    pub fn host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(Some(host.into()));
        self
    }

    pub fn clear_host(mut self) -> Self {
        self.host = Some(None);
        self
    }

    pub fn pid(mut self, pid: impl ToString) -> Self {
        self.pid = Some(Some(pid.to_string()));
        self
    }

    pub fn clear_pid(mut self) -> Self {
        self.pid = Some(None);
        self
    }

    pub fn version(mut self, version: impl Into<Value>) -> Self {
        self.version = Some(Some(version.into()));
        self
    }

    pub fn clear_version(mut self) -> Self {
        self.version = Some(None);
        self
    }

    pub fn stream(mut self, stream: Arc<dyn LogSink>) -> Self {
        self.stream = Some(stream);
        self
    }

    /// Replace the whole display-name table.
    pub fn schema_names(mut self, names: SchemaNames) -> Self {
        self.schema_names = Some(names);
        self
    }

    /// Replace the whole message-formatter table.
    pub fn message_formatters(mut self, formatters: MessageFormatters) -> Self {
        self.message_formatters = Some(formatters);
        self
    }

    /// Replace the whole field table. Kinds missing from `fields` stop emitting.
    pub fn fields(mut self, fields: FieldTable) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Any other top-level value. It is stored and resolvable by field name.
    pub fn extra(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }
}

impl fmt::Debug for OptionsPatch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OptionsPatch")
            .field("level", &self.level)
            .field("application", &self.application)
            .field("environment", &self.environment)
            .field("stream", &self.stream.as_ref().map(|_| "<sink>"))
            .field("fields", &self.fields)
            .field("extra", &self.extra)
            .finish_non_exhaustive()
    }
}

/// Overrides for one component, consulted after the logger defaults and
/// before [`AppOptions`].
#[derive(Debug, Clone, Default)]
pub struct ComponentOptions {
    /// Field lists that replace the process-wide list for the given kinds only.
    pub fields: FieldTable,
    /// Top-level values resolvable by field name.
    pub values: BTreeMap<String, Value>,
}

impl ComponentOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn field_list<I, S>(mut self, kind: EventKind, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.fields.insert(kind, fields.into_iter().map(Into::into).collect());
        self
    }

    pub fn value(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.values.insert(key.into(), value.into());
        self
    }

    pub fn field_value(&self, name: &str) -> Option<&Value> {
        self.values.get(name).filter(|v| !v.is_null())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn defaults_carry_process_facts() {
        let opts = AppOptions::default();
        assert_eq!(opts.level, Level::Info);
        assert_eq!(opts.field_value("version"), Some(json!(3)));
        assert!(opts.field_value("pid").is_some_and(|v| v.is_string()));
        assert!(opts.field_value("host").is_some_and(|v| v.is_string()));
        assert_eq!(opts.field_value("application"), None);
    }

    #[test]
    fn patch_replaces_only_named_keys() {
        let mut opts = AppOptions::default();
        opts.apply(OptionsPatch::new().application("svc").extra("category", "Catalog"));
        assert_eq!(opts.field_value("application"), Some(json!("svc")));
        assert_eq!(opts.field_value("category"), Some(json!("Catalog")));
        assert_eq!(opts.level, Level::Info);

        opts.apply(OptionsPatch::new().clear_application().level(Level::Error));
        assert_eq!(opts.field_value("application"), None);
        assert_eq!(opts.level, Level::Error);
        assert_eq!(opts.field_value("category"), Some(json!("Catalog")));
    }

    #[test]
    fn fields_table_is_replaced_wholesale() {
        let mut opts = AppOptions::default();
        let mut table = FieldTable::new();
        table.insert(EventKind::ServerInfo, vec!["message".to_string()]);
        opts.apply(OptionsPatch::new().fields(table));
        assert_eq!(opts.fields.len(), 1);
        assert!(!opts.fields.contains_key(&EventKind::ServerWarn));
    }

    #[test]
    fn level_by_name() {
        assert!(OptionsPatch::new().level_name("loud").is_err());
        let mut opts = AppOptions::default();
        opts.apply(OptionsPatch::new().level_name("debug").unwrap());
        assert_eq!(opts.level, Level::Debug);
    }

    #[test]
    fn null_extras_do_not_resolve() {
        let mut opts = AppOptions::default();
        opts.apply(OptionsPatch::new().extra("trace", Value::Null));
        assert_eq!(opts.field_value("trace"), None);
    }
}
