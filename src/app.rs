//! Wiring from resolved arguments and configuration to a processing run.

use tracing::{debug, info};

use crate::cli::Args;
use crate::config::Config;
use crate::error::Result;
use crate::input::InputSource;
use crate::output::resolve_paths;
use crate::strip::{ChunkSource, ProcessStats, StreamProcessor};

/// Run one pass over the input named by `args`.
///
/// Configuration problems, including output files that may not be
/// overwritten, are reported before any sink is opened or any byte read.
pub fn run(args: &Args, config: &Config) -> Result<ProcessStats> {
    config.validate()?;

    let plan = resolve_paths(
        args.write_stripped.as_ref(),
        args.write_unstripped.as_ref(),
        config.output.quiet,
    );
    plan.check(config.output.force)?;
    debug!(?plan, "outputs resolved");

    let source = InputSource::from_path(args.input.clone());
    let input = source.open()?;
    let mut sinks = plan.open(config.output.force)?;

    let mut chunks = ChunkSource::new(input, config.processing.chunk_size);
    let processor = StreamProcessor::new(config.processing.color);
    let stats = processor.run(&mut chunks, &mut sinks)?;

    info!(
        input = ?source,
        bytes = stats.bytes_read,
        removed = stats.sequences_removed,
        "done"
    );
    Ok(stats)
}
