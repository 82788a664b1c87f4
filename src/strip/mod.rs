//! Color sequence stripping.
//!
//! The stream is read in fixed-size chunks. Each chunk is copied verbatim
//! to the unstripped output, then scanned byte by byte; an escape byte is
//! tested against the color grammar once enough lookahead is buffered,
//! pulling further chunks across the boundary when needed.
//!
//! # Example
//!
//! ```
//! use paintstripper::strip::strip_bytes;
//!
//! let (stripped, unstripped, _) = strip_bytes(b"\x1b[31mred\x1b[0m", 1024, true).unwrap();
//! assert_eq!(stripped, b"red");
//! assert_eq!(unstripped, b"\x1b[31mred\x1b[0m");
//! ```

mod matcher;
mod processor;
mod source;
mod window;

pub use matcher::{ColorMatcher, ESC, MAX_SEQUENCE_LENGTH};
pub use processor::{strip_bytes, ProcessStats, StreamProcessor};
pub use source::{Chunk, ChunkSource, DEFAULT_CHUNK_SIZE};
pub use window::ByteWindow;
