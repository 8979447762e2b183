#![forbid(unsafe_code)]

//! Core: cell-grid geometry and the logging facade.

pub mod geometry;
pub mod logging;

// Re-export tracing macros at crate root for ergonomic use.
#[cfg(feature = "tracing")]
pub use logging::{debug, debug_span, trace, trace_span};
