// HTTP middleware

pub mod request_id;
pub mod request_logging;

pub use request_id::RequestId;
pub use request_logging::RequestLogging;
