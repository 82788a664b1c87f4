//! Single-pass chunked scanner that splits a stream into stripped and
//! unstripped outputs.

use std::io::{Read, Write};

use tracing::{debug, trace};

use crate::error::{Result, StripError};
use crate::output::DualSink;
use crate::strip::matcher::{ColorMatcher, ESC, MAX_SEQUENCE_LENGTH};
use crate::strip::source::ChunkSource;
use crate::strip::window::ByteWindow;

/// Counters for one processing pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProcessStats {
    /// Chunks read at the top of the loop.
    pub chunks: u64,
    /// Extra reads made to complete lookahead at a chunk boundary.
    pub refills: u64,
    /// Bytes read from the input (and written to the unstripped stream).
    pub bytes_read: u64,
    /// Bytes written to the stripped stream.
    pub bytes_stripped: u64,
    /// Color sequences removed.
    pub sequences_removed: u64,
}

/// Drives the read, scan, flush loop.
#[derive(Debug, Clone, Copy)]
pub struct StreamProcessor<'m> {
    matcher: &'m ColorMatcher,
    strip_color: bool,
}

impl StreamProcessor<'static> {
    /// Processor using the shared color matcher.
    pub fn new(strip_color: bool) -> Self {
        Self::with_matcher(ColorMatcher::shared(), strip_color)
    }
}

impl<'m> StreamProcessor<'m> {
    /// Processor using an explicit matcher.
    pub fn with_matcher(matcher: &'m ColorMatcher, strip_color: bool) -> Self {
        Self {
            matcher,
            strip_color,
        }
    }

    /// Whether color sequences are being removed.
    pub fn strips_color(&self) -> bool {
        self.strip_color
    }

    /// Run the stream to completion.
    ///
    /// Every byte read goes to the unstripped stream in read order, before
    /// it is classified. Bytes not part of a matched color sequence are
    /// collected per chunk and written to the stripped stream as one write.
    /// Both streams are flushed on success; on error, whatever was written
    /// stays written.
    pub fn run<R, S, U>(
        &self,
        source: &mut ChunkSource<R>,
        sinks: &mut DualSink<S, U>,
    ) -> Result<ProcessStats>
    where
        R: Read,
        S: Write,
        U: Write,
    {
        let mut stats = ProcessStats::default();

        loop {
            let chunk = source.read_chunk().map_err(StripError::Read)?;
            if chunk.is_empty() {
                break;
            }

            stats.chunks += 1;
            stats.bytes_read += chunk.len() as u64;
            sinks.write_unstripped(&chunk.bytes)?;

            let mut exhausted = chunk.eof;
            let mut window = ByteWindow::from(chunk.bytes);
            let mut stripped = Vec::with_capacity(window.len());

            while let Some(byte) = window.peek_byte() {
                if byte == ESC && self.strip_color {
                    while window.remaining() < MAX_SEQUENCE_LENGTH && !exhausted {
                        let more = source.read_chunk().map_err(StripError::Read)?;
                        trace!(
                            cursor = window.cursor(),
                            remaining = window.remaining(),
                            len = more.len(),
                            "boundary refill"
                        );
                        stats.refills += 1;
                        stats.bytes_read += more.len() as u64;
                        sinks.write_unstripped(&more.bytes)?;
                        exhausted = more.eof;
                        window.extend(&more.bytes);
                    }

                    let lookahead = window.peek(MAX_SEQUENCE_LENGTH);
                    if let Some(end) = self.matcher.match_prefix(lookahead) {
                        stats.sequences_removed += 1;
                        window.consume(end);
                        continue;
                    }
                }

                stripped.push(byte);
                window.consume(1);
            }

            stats.bytes_stripped += stripped.len() as u64;
            sinks.write_stripped(&stripped)?;

            if exhausted {
                break;
            }
        }

        sinks.flush()?;
        debug!(
            chunks = stats.chunks,
            refills = stats.refills,
            bytes_read = stats.bytes_read,
            bytes_stripped = stats.bytes_stripped,
            sequences_removed = stats.sequences_removed,
            "stream processed"
        );

        Ok(stats)
    }
}

/// Strip an in-memory buffer, returning `(stripped, unstripped, stats)`.
pub fn strip_bytes(
    input: &[u8],
    chunk_size: usize,
    strip_color: bool,
) -> Result<(Vec<u8>, Vec<u8>, ProcessStats)> {
    let mut source = ChunkSource::new(input, chunk_size);
    let mut sinks = DualSink::new(Vec::new(), Vec::new());
    let stats = StreamProcessor::new(strip_color).run(&mut source, &mut sinks)?;
    let (stripped, unstripped) = sinks.into_inner();
    Ok((stripped, unstripped, stats))
}
