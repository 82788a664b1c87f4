//! # paintstripper
//!
//! Streaming filter that removes ANSI color (SGR) sequences from a byte
//! stream while writing an unmodified copy alongside.
//!
//! ## Features
//!
//! - **Single pass**: input is read forward in fixed-size chunks, never
//!   seeked or buffered whole
//! - **Boundary safe**: sequences split across chunk reads are still found
//! - **Dual output**: stripped and verbatim streams, each to the console,
//!   a file, or nowhere
//!
//! ## Quick Start
//!
//! ```
//! use paintstripper::output::DualSink;
//! use paintstripper::strip::{ChunkSource, StreamProcessor};
//!
//! fn main() -> paintstripper::Result<()> {
//!     let input: &[u8] = b"\x1b[1;31merror:\x1b[0m disk full\n";
//!
//!     let mut source = ChunkSource::with_default_size(input);
//!     let mut sinks = DualSink::new(Vec::new(), Vec::new());
//!     let stats = StreamProcessor::new(true).run(&mut source, &mut sinks)?;
//!
//!     let (stripped, unstripped) = sinks.into_inner();
//!     assert_eq!(stripped, b"error: disk full\n");
//!     assert_eq!(unstripped, input);
//!     assert_eq!(stats.sequences_removed, 2);
//!     Ok(())
//! }
//! ```

pub mod app;
pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
pub mod strip;

// Re-export commonly used types
pub use error::{ErrorCategory, Result, Stream, StripError};
pub use input::{Input, InputSource};
pub use output::{DualSink, Sink, SinkPlan, SinkTarget};
pub use strip::{ColorMatcher, ProcessStats, StreamProcessor};
