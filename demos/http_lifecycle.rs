use olog::{Level, LogContext, OptionsPatch, Record, WriterSink};
use std::sync::Arc;
use std::time::Instant;

fn main() -> Result<(), olog::LogError> {
    let ctx = LogContext::shared(Default::default());
    ctx.configure(
        OptionsPatch::new()
            .application("cart")
            .level(Level::Debug)
            .stream(Arc::new(WriterSink::new(std::io::stderr()))),
    );

    let log = ctx.logger_with_defaults("http/cart", Record::new().with("transaction", "GetCart"));
    let request = Record::new()
        .with("route", "/cart/:id")
        .with("method", "GET")
        .with("uri", "/cart/7")
        .with("trace", "tr-1");

    let started = Instant::now();
    log.http_api_start(request.clone())?;

    log.http_api_send(
        Record::new()
            .with("api", "inventory")
            .with("method", "GET")
            .with("uri", "http://inventory/items?cart=7")
            .with("trace", "tr-1"),
    )?;
    log.http_api_receive(
        Record::new()
            .with("api", "inventory")
            .with("method", "GET")
            .with("uri", "http://inventory/items?cart=7")
            .with("responseCode", 200)
            .with("duration", 3)
            .with("trace", "tr-1"),
    )?;

    log.http_api_stop(
        request
            .with("responseCode", 200)
            .with("duration", started.elapsed().as_millis() as u64),
    )?;
    Ok(())
}
