//! Static event-kind registry.
//!
//! Every [`EventKind`] has a severity, a display name (`schema` field), an
//! ordered field list and a message template. The defaults live here; the
//! three name/template/field tables can be replaced at runtime through
//! [`OptionsPatch`](crate::options::OptionsPatch), while levels are fixed.

use crate::level::Level;
use crate::template::MessageFormatter;
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Fields shared by every kind, in output order.
pub const CORE_FIELDS: &[&str] = &[
    "time",
    "message",
    "level",
    "schema",
    "version",
    "application",
    "environment",
    "host",
    "pid",
    "component",
    "category",
    "transaction",
    "trace",
    "annotations",
    "extensions",
];

pub const CLIENT_FIELDS: &[&str] = &["uri", "userAgent", "userAuth"];

/// Appended for the error kinds.
pub const EXCEPTION_FIELDS: &[&str] = &["exception"];

pub const HTTP_START_FIELDS: &[&str] = &[
    "route",
    "method",
    "uri",
    "requestHeaders",
    "requestCookies",
    "requestBodyString",
    "requestBodyMap",
    "requestBodyObject",
    "referer",
    "userAgent",
];

/// Appended to [`HTTP_START_FIELDS`] for the stop kinds.
pub const HTTP_STOP_EXTRA_FIELDS: &[&str] = &[
    "duration",
    "responseCode",
    "responseHeaders",
    "responseCookies",
    "responseBodyString",
    "responseBodyMap",
    "responseBodyObject",
];

pub const HTTP_SEND_FIELDS: &[&str] = &[
    "api",
    "method",
    "uri",
    "requestHeaders",
    "requestCookies",
    "requestBodyString",
    "requestBodyMap",
    "requestBodyObject",
];

/// Appended to [`HTTP_SEND_FIELDS`] for `httpApiReceive`.
pub const HTTP_RECEIVE_EXTRA_FIELDS: &[&str] = &[
    "responseCode",
    "responseHeaders",
    "responseCookies",
    "responseBodyString",
    "responseBodyMap",
    "responseBodyObject",
    "duration",
];

pub const EVENT_START_FIELDS: &[&str] = &["event"];

/// Appended to [`EVENT_START_FIELDS`] for `eventStop`.
pub const EVENT_STOP_EXTRA_FIELDS: &[&str] = &["duration"];

const PLAIN_TEMPLATE: &str = "[{schema}] {transaction}: {message}";
const ERROR_TEMPLATE: &str = "[{schema}] {transaction}: {message}: {exception}";
const HTTP_START_TEMPLATE: &str = "[{schema}] {transaction}: {route} for {trace}";
const HTTP_STOP_TEMPLATE: &str =
    "[{schema}] {transaction}: {route}[{responseCode}] in {duration}ms for {trace}";
const HTTP_SEND_TEMPLATE: &str = "[{schema}] {transaction}: {api} ({method}:{uri}) for {trace}";
const HTTP_RECEIVE_TEMPLATE: &str =
    "[{schema}] {transaction}: {api} ({method}:{uri})[{responseCode}] in {duration}ms for {trace}";
const EVENT_START_TEMPLATE: &str = "[{schema}] {transaction}: {event} for {trace}";
const EVENT_STOP_TEMPLATE: &str = "[{schema}] {transaction}: {event} in {duration}ms for {trace}";

/// Category of loggable occurrence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum EventKind {
    ServerDebug,
    ServerInfo,
    ServerWarn,
    ServerError,
    ClientDebug,
    ClientInfo,
    ClientWarn,
    ClientError,
    HttpApiStart,
    HttpApiStop,
    HttpUiStart,
    HttpUiStop,
    HttpApiSend,
    HttpApiReceive,
    EventStart,
    EventStop,
}

impl EventKind {
    pub const ALL: [EventKind; 16] = [
        EventKind::ServerDebug,
        EventKind::ServerInfo,
        EventKind::ServerWarn,
        EventKind::ServerError,
        EventKind::ClientDebug,
        EventKind::ClientInfo,
        EventKind::ClientWarn,
        EventKind::ClientError,
        EventKind::HttpApiStart,
        EventKind::HttpApiStop,
        EventKind::HttpUiStart,
        EventKind::HttpUiStop,
        EventKind::HttpApiSend,
        EventKind::HttpApiReceive,
        EventKind::EventStart,
        EventKind::EventStop,
    ];

    /// camelCase identifier, e.g. `"httpApiStop"`.
    pub fn id(self) -> &'static str {
        match self {
            EventKind::ServerDebug => "serverDebug",
            EventKind::ServerInfo => "serverInfo",
            EventKind::ServerWarn => "serverWarn",
            EventKind::ServerError => "serverError",
            EventKind::ClientDebug => "clientDebug",
            EventKind::ClientInfo => "clientInfo",
            EventKind::ClientWarn => "clientWarn",
            EventKind::ClientError => "clientError",
            EventKind::HttpApiStart => "httpApiStart",
            EventKind::HttpApiStop => "httpApiStop",
            EventKind::HttpUiStart => "httpUiStart",
            EventKind::HttpUiStop => "httpUiStop",
            EventKind::HttpApiSend => "httpApiSend",
            EventKind::HttpApiReceive => "httpApiReceive",
            EventKind::EventStart => "eventStart",
            EventKind::EventStop => "eventStop",
        }
    }

    pub fn level(self) -> Level {
        match self {
            EventKind::ServerDebug | EventKind::ClientDebug => Level::Debug,
            EventKind::ServerWarn | EventKind::ClientWarn => Level::Warn,
            EventKind::ServerError | EventKind::ClientError => Level::Error,
            _ => Level::Info,
        }
    }

    /// Error kinds skip threshold gating entirely.
    pub fn bypasses_threshold(self) -> bool {
        self.level() == Level::Error
    }

    /// Server kind for a bare severity, as used by the `debug`/`info`/... aliases.
    pub fn server(level: Level) -> EventKind {
        match level {
            Level::Debug => EventKind::ServerDebug,
            Level::Info => EventKind::ServerInfo,
            Level::Warn => EventKind::ServerWarn,
            Level::Error => EventKind::ServerError,
        }
    }

    pub fn default_display_name(self) -> &'static str {
        match self {
            EventKind::ServerDebug => "SERVER-Debug",
            EventKind::ServerInfo => "SERVER-Info",
            EventKind::ServerWarn => "SERVER-Warn",
            EventKind::ServerError => "SERVER-Error",
            EventKind::ClientDebug => "CLIENT-Debug",
            EventKind::ClientInfo => "CLIENT-Info",
            EventKind::ClientWarn => "CLIENT-Warn",
            EventKind::ClientError => "CLIENT-Error",
            EventKind::HttpApiStart => "HTTP-API-Start",
            EventKind::HttpApiStop => "HTTP-API-Stop",
            EventKind::HttpUiStart => "HTTP-UI-Start",
            EventKind::HttpUiStop => "HTTP-UI-Stop",
            EventKind::HttpApiSend => "HTTP-API-Send",
            EventKind::HttpApiReceive => "HTTP-API-Receive",
            EventKind::EventStart => "EVENT-Start",
            EventKind::EventStop => "EVENT-Stop",
        }
    }

    pub fn default_fields(self) -> Vec<String> {
        let extra: Vec<&[&str]> = match self {
            EventKind::ServerDebug | EventKind::ServerInfo | EventKind::ServerWarn => vec![],
            EventKind::ServerError => vec![EXCEPTION_FIELDS],
            EventKind::ClientDebug | EventKind::ClientInfo | EventKind::ClientWarn => {
                vec![CLIENT_FIELDS]
            }
            EventKind::ClientError => vec![CLIENT_FIELDS, EXCEPTION_FIELDS],
            EventKind::HttpApiStart | EventKind::HttpUiStart => vec![HTTP_START_FIELDS],
            EventKind::HttpApiStop | EventKind::HttpUiStop => {
                vec![HTTP_START_FIELDS, HTTP_STOP_EXTRA_FIELDS]
            }
            EventKind::HttpApiSend => vec![HTTP_SEND_FIELDS],
            EventKind::HttpApiReceive => vec![HTTP_SEND_FIELDS, HTTP_RECEIVE_EXTRA_FIELDS],
            EventKind::EventStart => vec![EVENT_START_FIELDS],
            EventKind::EventStop => vec![EVENT_START_FIELDS, EVENT_STOP_EXTRA_FIELDS],
        };
        std::iter::once(CORE_FIELDS)
            .chain(extra)
            .flatten()
            .map(|f| f.to_string())
            .collect()
    }

    pub fn default_template(self) -> &'static str {
        match self {
            EventKind::ServerError | EventKind::ClientError => ERROR_TEMPLATE,
            EventKind::ServerDebug
            | EventKind::ServerInfo
            | EventKind::ServerWarn
            | EventKind::ClientDebug
            | EventKind::ClientInfo
            | EventKind::ClientWarn => PLAIN_TEMPLATE,
            EventKind::HttpApiStart | EventKind::HttpUiStart => HTTP_START_TEMPLATE,
            EventKind::HttpApiStop | EventKind::HttpUiStop => HTTP_STOP_TEMPLATE,
            EventKind::HttpApiSend => HTTP_SEND_TEMPLATE,
            EventKind::HttpApiReceive => HTTP_RECEIVE_TEMPLATE,
            EventKind::EventStart => EVENT_START_TEMPLATE,
            EventKind::EventStop => EVENT_STOP_TEMPLATE,
        }
    }
}

impl fmt::Display for EventKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

/// Error returned when an identifier names no registered [`EventKind`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
#[error("unknown event kind: {0:?}")]
pub struct UnknownEventKind(pub String);

impl FromStr for EventKind {
    type Err = UnknownEventKind;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        EventKind::ALL
            .into_iter()
            .find(|k| k.id() == s)
            .ok_or_else(|| UnknownEventKind(s.to_string()))
    }
}

pub type SchemaNames = BTreeMap<EventKind, String>;
pub type MessageFormatters = BTreeMap<EventKind, MessageFormatter>;
pub type FieldTable = BTreeMap<EventKind, Vec<String>>;

pub fn default_schema_names() -> SchemaNames {
    EventKind::ALL
        .into_iter()
        .map(|k| (k, k.default_display_name().to_string()))
        .collect()
}

pub fn default_message_formatters() -> MessageFormatters {
    EventKind::ALL
        .into_iter()
        .map(|k| (k, MessageFormatter::template(k.default_template())))
        .collect()
}

pub fn default_fields() -> FieldTable {
    EventKind::ALL.into_iter().map(|k| (k, k.default_fields())).collect()
}
