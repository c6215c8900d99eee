use crate::context::LogContext;
use crate::error::InitError;
use crate::layer::{LayerStats, SchemaLayer};
use crate::record::Record;
use std::sync::Arc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Configuration of the installed `tracing` bridge.
///
/// **Fields**
/// - `defaults`: field values applied to every bridged event.
/// - `enable_stdout`: if `true`, a `tracing_subscriber::fmt::Layer` is
///   stacked on top so events are also printed in the usual text form.
#[derive(Clone, Debug, Default)]
pub struct LayerConfig {
    pub defaults: Record,
    pub enable_stdout: bool,
}

/// Install a [`SchemaLayer`] over `ctx` as the global `tracing` subscriber.
///
/// **Returns**
/// - The layer's counters on success.
/// - `Err(InitError::AlreadyInstalled)` if a global subscriber exists.
pub fn init_tracing_with_config(
    ctx: Arc<LogContext>,
    config: LayerConfig,
) -> Result<Arc<LayerStats>, InitError> {
    let layer = SchemaLayer::new(ctx).with_defaults(config.defaults);
    let stats = layer.stats();

    // The two subscriber shapes have different types, so install each branch separately.
    if config.enable_stdout {
        let fmt_layer = tracing_subscriber::fmt::layer();
        let subscriber = Registry::default().with(layer).with(fmt_layer);
        tracing::subscriber::set_global_default(subscriber)?;
    } else {
        let subscriber = Registry::default().with(layer);
        tracing::subscriber::set_global_default(subscriber)?;
    }
    Ok(stats)
}

/// Bridge `tracing` into the global [`LogContext`] with default settings.
pub fn init_tracing() -> Result<Arc<LayerStats>, InitError> {
    init_tracing_with_config(Arc::clone(LogContext::global()), LayerConfig::default())
}
