use olog::{MemorySink, OptionsPatch, Record};
use serde_json::json;
use std::sync::Arc;

// The process-wide context is shared by every test in a binary, so this
// file holds a single test.
#[test]
fn global_configure_reaches_loggers_created_earlier() {
    let sink = Arc::new(MemorySink::new());
    let early = olog::logger("early");
    olog::configure(
        OptionsPatch::new()
            .stream(sink.clone())
            .application("global-app")
            .level(olog::Level::Info),
    );
    let late = olog::logger_with_defaults("late", Record::new().with("category", "Late"));

    early.info(Record::new().with("message", "a")).unwrap();
    late.info(Record::new().with("message", "b")).unwrap();

    let recs = sink.records();
    assert_eq!(recs.len(), 2);
    assert_eq!(recs[0]["application"], json!("global-app"));
    assert_eq!(recs[0]["component"], json!("early"));
    assert_eq!(recs[1]["application"], json!("global-app"));
    assert_eq!(recs[1]["category"], json!("Late"));
}
