// Insight shared library
// Models, value types, the prediction stub, and server configuration.

pub mod config;
pub mod models;
pub mod prediction;

// Re-export commonly used types
pub use config::ServerConfig;
pub use models::{InternalUser, Role, User, UserName};
pub use prediction::{predict_from_features, Prediction, PredictionFeatures};
