// Logging port and tracing-backed adapter

pub mod context;

pub use context::{LogContext, REQUEST_ID_HEADER, REQUEST_ID_KEY};

/// Logging facade used by the request pipeline.
///
/// Events carry explicit fields plus whatever is bound in the ambient
/// per-request context, so every line emitted while a request is in flight
/// includes its correlation identifier without call sites threading it
/// through.
pub trait Logger: Send + Sync {
    fn info(&self, event: &str, fields: &[(&str, String)]);
    fn warning(&self, event: &str, fields: &[(&str, String)]);
    fn error(&self, event: &str, fields: &[(&str, String)]);

    /// Add fields to the ambient context of the current request.
    fn bind_context(&self, fields: &[(&str, String)]);

    /// Remove fields from the ambient context by key.
    fn unbind_context(&self, keys: &[&str]);

    /// Drop all ambient context fields.
    fn clear_context(&self);
}

/// Logger adapter forwarding through the `tracing` macros.
///
/// Output formatting, filtering, and sinks are whatever the subscriber
/// installed at startup decides; this adapter only merges the ambient
/// context into each event.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingLogger;

impl TracingLogger {
    pub fn new() -> Self {
        Self
    }
}

impl Logger for TracingLogger {
    fn info(&self, event: &str, fields: &[(&str, String)]) {
        tracing::info!(target: "insight", "{}", render_event(event, fields));
    }

    fn warning(&self, event: &str, fields: &[(&str, String)]) {
        tracing::warn!(target: "insight", "{}", render_event(event, fields));
    }

    fn error(&self, event: &str, fields: &[(&str, String)]) {
        tracing::error!(target: "insight", "{}", render_event(event, fields));
    }

    fn bind_context(&self, fields: &[(&str, String)]) {
        LogContext::bind(fields);
    }

    fn unbind_context(&self, keys: &[&str]) {
        LogContext::unbind(keys);
    }

    fn clear_context(&self) {
        LogContext::clear();
    }
}

/// Render an event plus its fields as `event ctx_k=v ... k=v`.
///
/// Context fields come first so the correlation identifier has a stable
/// position; explicit fields may override a context key by repeating it.
pub(crate) fn render_event(event: &str, fields: &[(&str, String)]) -> String {
    let mut out = String::from(event);
    for (key, value) in LogContext::snapshot() {
        push_field(&mut out, &key, &value);
    }
    for (key, value) in fields {
        push_field(&mut out, key, value);
    }
    out
}

fn push_field(out: &mut String, key: &str, value: &str) {
    out.push(' ');
    out.push_str(key);
    out.push('=');
    if value.contains(' ') {
        out.push('"');
        out.push_str(value);
        out.push('"');
    } else {
        out.push_str(value);
    }
}
