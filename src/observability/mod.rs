//! # Observability
//!
//! Process-wide tracing subscriber setup.

mod logger;

pub use logger::{init_logger, LogFormat, DEFAULT_FILTER};
