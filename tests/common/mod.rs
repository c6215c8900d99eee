#![allow(dead_code)]

use olog::{AppOptions, Level, LogContext, MemorySink, OptionsPatch};
use serde::de::{Deserializer, IgnoredAny, MapAccess, Visitor};
use std::fmt;
use std::sync::Arc;

/// Private context writing into a fresh [`MemorySink`], threshold `debug`.
pub fn context() -> (Arc<LogContext>, Arc<MemorySink>) {
    let sink = Arc::new(MemorySink::new());
    let ctx = LogContext::shared(AppOptions::default());
    ctx.configure(OptionsPatch::new().stream(sink.clone()).level(Level::Debug));
    (ctx, sink)
}

/// Top-level keys of a JSON object line, in the order they were written.
pub fn keys(line: &str) -> Vec<String> {
    struct KeyOrder;

    impl<'de> Visitor<'de> for KeyOrder {
        type Value = Vec<String>;

        fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("a JSON object")
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut keys = Vec::new();
            while let Some((k, IgnoredAny)) = map.next_entry::<String, IgnoredAny>()? {
                keys.push(k);
            }
            Ok(keys)
        }
    }

    let mut de = serde_json::Deserializer::from_str(line);
    de.deserialize_map(KeyOrder).expect("line is a JSON object")
}
