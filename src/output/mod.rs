//! Output destinations.
//!
//! This module decides where the stripped and unstripped streams go and
//! owns the writers for them:
//! - [`SinkPlan`] maps the requested output files onto console, discard or
//!   file targets
//! - [`DualSink`] pairs the two opened writers for the stream processor
//!
//! # Example
//!
//! ```
//! use paintstripper::output::{DualSink, SinkPlan, SinkTarget};
//!
//! let plan = SinkPlan::resolve(None, None, true);
//! assert_eq!(plan.stripped, SinkTarget::Discard);
//!
//! let mut sinks = DualSink::new(Vec::new(), Vec::new());
//! sinks.write_stripped(b"plain").unwrap();
//! ```

mod plan;
mod sink;

pub use plan::{resolve_paths, SinkPlan};
pub use sink::{DualSink, Sink, SinkTarget};
