//! Shared option state read by every emission.
//!
//! A [`LogContext`] owns the process-wide [`AppOptions`] and the
//! per-component [`ComponentOptions`]. Loggers keep an `Arc` to their
//! context and take a fresh snapshot on every call, so `configure` affects
//! loggers created before it. Reconfiguration swaps the whole `Arc` under a
//! write lock; readers never observe a partially applied patch.

use crate::logger::Logger;
use crate::options::{AppOptions, ComponentOptions, OptionsPatch};
use crate::record::Record;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock, RwLock};

static GLOBAL_CONTEXT: OnceLock<Arc<LogContext>> = OnceLock::new();

#[derive(Debug, Default)]
pub struct LogContext {
    app: RwLock<Arc<AppOptions>>,
    components: RwLock<HashMap<String, Arc<ComponentOptions>>>,
}

impl LogContext {
    pub fn new(options: AppOptions) -> Self {
        LogContext {
            app: RwLock::new(Arc::new(options)),
            components: RwLock::new(HashMap::new()),
        }
    }

    /// Convenience for `Arc::new(LogContext::new(options))`.
    pub fn shared(options: AppOptions) -> Arc<Self> {
        Arc::new(Self::new(options))
    }

    /// The process-wide context, seeded from the environment on first use.
    pub fn global() -> &'static Arc<LogContext> {
        GLOBAL_CONTEXT.get_or_init(|| LogContext::shared(AppOptions::from_env()))
    }

    /// Current options snapshot.
    pub fn options(&self) -> Arc<AppOptions> {
        let guard = self.app.read().unwrap_or_else(|e| e.into_inner());
        Arc::clone(&guard)
    }

    /// Merge `patch` into the process-wide options of this context.
    ///
    /// Affects every logger bound to this context, including ones created
    /// before the call.
    pub fn configure(&self, patch: OptionsPatch) {
        let mut guard = self.app.write().unwrap_or_else(|e| e.into_inner());
        let mut next = AppOptions::clone(&guard);
        next.apply(patch);
        *guard = Arc::new(next);
    }

    /// Replace everything with `options`.
    pub fn reset(&self, options: AppOptions) {
        let mut guard = self.app.write().unwrap_or_else(|e| e.into_inner());
        *guard = Arc::new(options);
    }

    /// Install overrides for one component, replacing any previous ones.
    pub fn configure_component(&self, component: impl Into<String>, options: ComponentOptions) {
        let mut guard = self.components.write().unwrap_or_else(|e| e.into_inner());
        guard.insert(component.into(), Arc::new(options));
    }

    pub fn clear_component(&self, component: &str) -> Option<Arc<ComponentOptions>> {
        let mut guard = self.components.write().unwrap_or_else(|e| e.into_inner());
        guard.remove(component)
    }

    pub fn component_options(&self, component: &str) -> Option<Arc<ComponentOptions>> {
        let guard = self.components.read().unwrap_or_else(|e| e.into_inner());
        guard.get(component).cloned()
    }

    pub fn logger(self: &Arc<Self>, component: impl Into<String>) -> Logger {
        Logger::new(Arc::clone(self), component, Record::new())
    }

    pub fn logger_with_defaults(
        self: &Arc<Self>,
        component: impl Into<String>,
        defaults: Record,
    ) -> Logger {
        Logger::new(Arc::clone(self), component, defaults)
    }
}
