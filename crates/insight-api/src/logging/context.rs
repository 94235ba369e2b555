// Per-request logging context backed by task-local storage
//
// Each in-flight request future carries its own field map; concurrently
// executing requests never observe each other's values. The map is installed
// with `scope`, which releases it on every exit path (completion, error,
// panic, cancellation) because the task-local is popped when the scoped
// future is dropped.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::future::Future;

tokio::task_local! {
    static LOG_CONTEXT: RefCell<BTreeMap<String, String>>;
}

/// Header carrying the inbound/outbound correlation identifier.
pub const REQUEST_ID_HEADER: &str = "X-Request-ID";

/// Context key under which the correlation identifier is bound.
pub const REQUEST_ID_KEY: &str = "request_id";

/// Handle to the ambient per-request field map.
///
/// All operations are no-ops outside an active [`LogContext::scope`], so
/// code paths that run before the middleware (or in unit tests) stay safe.
pub struct LogContext;

impl LogContext {
    /// Run `fut` with `initial` as its ambient logging context.
    pub async fn scope<F>(initial: BTreeMap<String, String>, fut: F) -> F::Output
    where
        F: Future,
    {
        LOG_CONTEXT.scope(RefCell::new(initial), fut).await
    }

    /// Add fields to the active context; later log calls include them.
    pub fn bind(fields: &[(&str, String)]) {
        let _ = LOG_CONTEXT.try_with(|ctx| {
            let mut ctx = ctx.borrow_mut();
            for (key, value) in fields {
                ctx.insert((*key).to_string(), value.clone());
            }
        });
    }

    /// Remove the given keys from the active context.
    pub fn unbind(keys: &[&str]) {
        let _ = LOG_CONTEXT.try_with(|ctx| {
            let mut ctx = ctx.borrow_mut();
            for key in keys {
                ctx.remove(*key);
            }
        });
    }

    /// Drop every bound field.
    pub fn clear() {
        let _ = LOG_CONTEXT.try_with(|ctx| ctx.borrow_mut().clear());
    }

    /// Current value of a single bound field.
    pub fn get(key: &str) -> Option<String> {
        LOG_CONTEXT
            .try_with(|ctx| ctx.borrow().get(key).cloned())
            .ok()
            .flatten()
    }

    /// Copy of the active field map; empty outside a scope.
    pub fn snapshot() -> BTreeMap<String, String> {
        LOG_CONTEXT
            .try_with(|ctx| ctx.borrow().clone())
            .unwrap_or_default()
    }
}
