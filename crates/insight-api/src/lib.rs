// Insight HTTP layer
// Routes, request/response schemas, middleware, and the error envelope
// boundary. Request correlation lives here too: the request-id middleware
// owns the per-request logging context consumed by every log line.

pub mod error;
pub mod extractor;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod routes;
pub mod schemas;
pub mod state;

// Re-export commonly used types
pub use error::ApiError;
pub use extractor::CurrentUser;
pub use logging::{Logger, TracingLogger};
pub use state::AppState;
