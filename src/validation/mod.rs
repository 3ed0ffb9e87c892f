//! URL verification
//!
//! Classification, rate limiting, HTTP probing and the engine that ties
//! them together under an explicit run context.

pub mod classifier;
pub mod context;
pub mod engine;
pub mod prober;
pub mod rate_limiter;

// Re-export commonly used items
pub use classifier::{Classification, Classifier};
pub use context::{CancelHandle, RunContext};
pub use engine::LinkChecker;
pub use prober::{HttpProber, Probe, classify_response};
pub use rate_limiter::{FixedDelayLimiter, RateLimiter};
