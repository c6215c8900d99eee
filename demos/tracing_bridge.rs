use olog::init::{init_tracing_with_config, LayerConfig};
use olog::{LogContext, OptionsPatch, Record};
use std::sync::Arc;
use tracing::{error, info};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let ctx = Arc::clone(LogContext::global());
    ctx.configure(OptionsPatch::new().application("bridge-demo"));

    let stats = init_tracing_with_config(
        ctx,
        LayerConfig {
            defaults: Record::new().with("category", "Auth"),
            enable_stdout: false,
        },
    )?;

    info!(target: "auth", transaction = "Login", "starting service");
    error!(
        target: "auth",
        transaction = "Login",
        exception = "invalid password",
        user_id = 42,
        "authentication failed"
    );

    eprintln!(
        "bridged: total={} accepted={} failed={}",
        stats.total(),
        stats.accepted(),
        stats.failed()
    );
    Ok(())
}
