use olog::{OptionsPatch, Record};
use serde_json::json;

fn main() -> Result<(), olog::LogError> {
    olog::configure(OptionsPatch::new().application("catalog").environment("dev"));

    let log = olog::logger_with_defaults("lib/mymodule", Record::new().with("category", "Catalog"));
    let product_id = "123";

    log.server_info(
        Record::new()
            .with("message", format!("Db Update on Product {product_id}"))
            .with("transaction", "CreateProduct")
            .with("trace", "e45dc587-3516-489f-9487-391a119889c0")
            .with("annotations", json!({ "productId": product_id })),
    )?;

    log.server_error(
        Record::new()
            .with("message", "Db Update failed")
            .with("transaction", "CreateProduct")
            .with("exception", "unique constraint violated"),
    )?;

    // below the default `info` threshold; nothing is written
    log.debug(Record::new().with("message", "cache miss"))?;
    Ok(())
}
