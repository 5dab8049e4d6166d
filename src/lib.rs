//! EfmIO - acquisition and framing core for the rotating field-mill module
//!
//! Samples the onboard sensors (inertial vectors, a high-rate analog channel,
//! slow environmental readings) as fast as the analog converter allows and
//! emits each sample as a fixed 52-byte binary frame on the measurement link.
//!
//! ## Components
//!
//! - [`scheduler`]: interleaves the high-rate conversion with staggered
//!   slow-channel refreshes, one cycle per sample
//! - [`frame`]: deterministic fixed-layout frame encoder (and decoder)
//! - [`sensors`]: capability-typed adapter traits plus the simulated backend
//! - [`transport`] / [`diag`]: byte sink for frames, line sink for notices

pub mod app;
pub mod config;
pub mod diag;
pub mod error;
pub mod frame;
pub mod scheduler;
pub mod sensors;
pub mod transport;
pub mod types;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{Error, Result};
pub use types::Sample;
