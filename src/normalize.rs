//! Field resolution against a kind's schema.
//!
//! For every field in the active list, the first non-null value found in
//! record, logger defaults, component options and process-wide options, in
//! that order, is emitted. Fields with no value are omitted; fields outside
//! the list are never emitted. Presence is decided by `null`/missing only,
//! so `0`, `false` and `""` win like any other value.

use crate::options::{AppOptions, ComponentOptions};
use crate::record::{NormalizedRecord, Record};
use crate::schema::EventKind;
use serde_json::Value;
use std::collections::HashSet;

/// The four value tiers consulted during resolution, highest precedence first.
#[derive(Debug, Clone, Copy)]
pub struct Sources<'a> {
    pub record: &'a Record,
    pub defaults: &'a Record,
    pub component: Option<&'a ComponentOptions>,
    pub app: &'a AppOptions,
}

impl<'a> Sources<'a> {
    /// Active field list for `kind`: a component override if there is one,
    /// else the process-wide table. Unknown kinds yield an empty list.
    pub fn fields_for(&self, kind: EventKind) -> &'a [String] {
        match self.component.and_then(|c| c.fields.get(&kind)) {
            Some(fields) => fields.as_slice(),
            None => self.app.fields_for(kind),
        }
    }

    /// Winning value for a single field, if any tier has one.
    pub fn resolve(&self, field: &str) -> Option<Value> {
        self.record
            .value(field)
            .or_else(|| self.defaults.value(field))
            .or_else(|| self.component.and_then(|c| c.field_value(field)))
            .cloned()
            .or_else(|| self.app.field_value(field))
    }

    /// Resolve `fields` in order.
    ///
    /// A name listed twice keeps its first position and is resolved once.
    pub fn normalize_fields(&self, fields: &[String]) -> NormalizedRecord {
        let mut seen = HashSet::with_capacity(fields.len());
        let mut out = NormalizedRecord::with_capacity(fields.len());
        for field in fields {
            if !seen.insert(field.as_str()) {
                continue;
            }
            if let Some(value) = self.resolve(field) {
                out.push(field.clone(), value);
            }
        }
        out
    }

    pub fn normalize(&self, kind: EventKind) -> NormalizedRecord {
        self.normalize_fields(self.fields_for(kind))
    }

    /// Every value visible through the tiers, merged with precedence applied.
    ///
    /// Used as the input of message templates so they can reference values
    /// that only exist as defaults or options.
    pub fn merged_view(&self) -> Record {
        let mut view = Record::new();
        let app_typed = ["application", "environment", "host", "pid", "version"];
        for name in app_typed {
            if let Some(v) = self.app.field_value(name) {
                view.insert(name, v);
            }
        }
        let lower = self
            .app
            .extra
            .iter()
            .chain(self.component.into_iter().flat_map(|c| c.values.iter()))
            .map(|(k, v)| (k.as_str(), v))
            .chain(self.defaults.iter())
            .chain(self.record.iter());
        for (k, v) in lower {
            if !v.is_null() {
                view.insert(k, v.clone());
            }
        }
        view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::options::OptionsPatch;
    use serde_json::json;

    fn app() -> AppOptions {
        let mut opts = AppOptions::default();
        opts.apply(OptionsPatch::new().application("app").extra("category", "fromApp"));
        opts
    }

    #[test]
    fn component_field_list_overrides_app_list() {
        let opts = app();
        let comp = ComponentOptions::new().field_list(EventKind::ServerInfo, ["message", "level"]);
        let empty = Record::new();
        let src = Sources { record: &empty, defaults: &empty, component: Some(&comp), app: &opts };
        assert_eq!(src.fields_for(EventKind::ServerInfo), ["message", "level"]);
        assert_eq!(src.fields_for(EventKind::ServerWarn).len(), opts.fields[&EventKind::ServerWarn].len());
    }

    #[test]
    fn duplicate_fields_keep_first_position() {
        let opts = app();
        let record = Record::new().with("a", 1).with("b", 2);
        let empty = Record::new();
        let src = Sources { record: &record, defaults: &empty, component: None, app: &opts };
        let fields: Vec<String> = ["a", "b", "a"].iter().map(|s| s.to_string()).collect();
        let out = src.normalize_fields(&fields);
        assert_eq!(out.keys().collect::<Vec<_>>(), ["a", "b"]);
        assert_eq!(out.to_line().unwrap(), r#"{"a":1,"b":2}"#);
    }

    #[test]
    fn merged_view_applies_precedence() {
        let opts = app();
        let comp = ComponentOptions::new().value("category", "fromComp").value("x", "c");
        let defaults = Record::new().with("x", "d").with("y", "d");
        let record = Record::new().with("y", "r").with("z", Value::Null);
        let src = Sources { record: &record, defaults: &defaults, component: Some(&comp), app: &opts };
        let view = src.merged_view();
        assert_eq!(view.value("application"), Some(&json!("app")));
        assert_eq!(view.value("category"), Some(&json!("fromComp")));
        assert_eq!(view.value("x"), Some(&json!("d")));
        assert_eq!(view.value("y"), Some(&json!("r")));
        assert!(view.get("z").is_none());
    }
}
