//! Output destinations and the stripped/unstripped pair.

use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Stdout, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::error::{Result, Stream, StripError};

/// Where one output stream goes, decided before anything is opened.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SinkTarget {
    /// Standard output.
    Console,
    /// Bytes are accepted and dropped.
    Discard,
    /// A file created for this run.
    File(PathBuf),
}

impl SinkTarget {
    /// Console output, or discard when running quietly.
    pub fn console_or_discard(quiet: bool) -> Self {
        if quiet {
            Self::Discard
        } else {
            Self::Console
        }
    }

    /// File path, if this target writes to one.
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::File(path) => Some(path),
            _ => None,
        }
    }

    /// Open the target.
    ///
    /// Without `force`, an existing file is never truncated: the file is
    /// created with `create_new` so the existence check and the creation
    /// cannot race.
    pub fn open(&self, force: bool) -> Result<Sink> {
        match self {
            Self::Console => Ok(Sink::Console(BufWriter::new(io::stdout()))),
            Self::Discard => Ok(Sink::Discard(io::sink())),
            Self::File(path) => {
                let mut options = OpenOptions::new();
                options.write(true);
                if force {
                    options.create(true).truncate(true);
                } else {
                    options.create_new(true);
                }

                let file = options.open(path).map_err(|source| {
                    if source.kind() == io::ErrorKind::AlreadyExists {
                        StripError::FileExists(path.clone())
                    } else {
                        StripError::OpenOutput {
                            path: path.clone(),
                            source,
                        }
                    }
                })?;

                debug!(path = %path.display(), force, "output file opened");
                Ok(Sink::File(BufWriter::new(file)))
            }
        }
    }
}

/// An opened output destination.
///
/// Buffered variants flush on drop, so bytes accepted before a fatal
/// error still reach their destination.
#[derive(Debug)]
pub enum Sink {
    /// Buffered standard output.
    Console(BufWriter<Stdout>),
    /// Discarding writer.
    Discard(io::Sink),
    /// Buffered file.
    File(BufWriter<File>),
}

impl Write for Sink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            Self::Console(w) => w.write(buf),
            Self::Discard(w) => w.write(buf),
            Self::File(w) => w.write(buf),
        }
    }

    fn write_all(&mut self, buf: &[u8]) -> io::Result<()> {
        match self {
            Self::Console(w) => w.write_all(buf),
            Self::Discard(w) => w.write_all(buf),
            Self::File(w) => w.write_all(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            Self::Console(w) => w.flush(),
            Self::Discard(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

/// The two output streams of a run.
///
/// The unstripped side receives one write per chunk read; the stripped
/// side receives one write per processed chunk.
#[derive(Debug)]
pub struct DualSink<S, U> {
    stripped: S,
    unstripped: U,
}

impl<S: Write, U: Write> DualSink<S, U> {
    /// Pair two writers.
    pub fn new(stripped: S, unstripped: U) -> Self {
        Self {
            stripped,
            unstripped,
        }
    }

    /// Write processed bytes to the stripped stream.
    pub fn write_stripped(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.stripped
            .write_all(bytes)
            .map_err(|source| StripError::Write {
                stream: Stream::Stripped,
                source,
            })
    }

    /// Write raw input bytes to the unstripped stream.
    pub fn write_unstripped(&mut self, bytes: &[u8]) -> Result<()> {
        if bytes.is_empty() {
            return Ok(());
        }
        self.unstripped
            .write_all(bytes)
            .map_err(|source| StripError::Write {
                stream: Stream::Unstripped,
                source,
            })
    }

    /// Flush both streams, unstripped first.
    pub fn flush(&mut self) -> Result<()> {
        self.unstripped
            .flush()
            .map_err(|source| StripError::Write {
                stream: Stream::Unstripped,
                source,
            })?;
        self.stripped.flush().map_err(|source| StripError::Write {
            stream: Stream::Stripped,
            source,
        })
    }

    /// Take back both writers as `(stripped, unstripped)`.
    pub fn into_inner(self) -> (S, U) {
        (self.stripped, self.unstripped)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Read;
    use tempfile::TempDir;

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_dual_sink_routes_streams() {
        let mut sinks = DualSink::new(Vec::new(), Vec::new());
        sinks.write_unstripped(b"\x1b[1mA").unwrap();
        sinks.write_stripped(b"A").unwrap();
        sinks.flush().unwrap();

        let (stripped, unstripped) = sinks.into_inner();
        assert_eq!(stripped, b"A");
        assert_eq!(unstripped, b"\x1b[1mA");
    }

    #[test]
    fn test_empty_writes_skipped() {
        let mut sinks = DualSink::new(Broken, Broken);
        assert!(sinks.write_stripped(b"").is_ok());
        assert!(sinks.write_unstripped(b"").is_ok());
    }

    #[test]
    fn test_write_error_carries_stream() {
        let mut sinks = DualSink::new(Vec::new(), Broken);
        let err = sinks.write_unstripped(b"data").unwrap_err();
        assert!(matches!(
            err,
            StripError::Write {
                stream: Stream::Unstripped,
                ..
            }
        ));
    }

    #[test]
    fn test_discard_accepts_everything() {
        let mut sink = SinkTarget::Discard.open(false).unwrap();
        sink.write_all(b"gone").unwrap();
        sink.flush().unwrap();
    }

    #[test]
    fn test_console_or_discard() {
        assert_eq!(SinkTarget::console_or_discard(false), SinkTarget::Console);
        assert_eq!(SinkTarget::console_or_discard(true), SinkTarget::Discard);
    }

    #[test]
    fn test_file_target_writes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.log");

        let mut sink = SinkTarget::File(path.clone()).open(false).unwrap();
        sink.write_all(b"hello").unwrap();
        drop(sink);

        let mut content = String::new();
        File::open(&path)
            .unwrap()
            .read_to_string(&mut content)
            .unwrap();
        assert_eq!(content, "hello");
    }

    #[test]
    fn test_existing_file_refused_without_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.log");
        std::fs::write(&path, b"keep me").unwrap();

        let err = SinkTarget::File(path.clone()).open(false).unwrap_err();
        assert!(matches!(err, StripError::FileExists(_)));
        assert_eq!(std::fs::read(&path).unwrap(), b"keep me");
    }

    #[test]
    fn test_existing_file_truncated_with_force() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("out.log");
        std::fs::write(&path, b"old content here").unwrap();

        let mut sink = SinkTarget::File(path.clone()).open(true).unwrap();
        sink.write_all(b"new").unwrap();
        sink.flush().unwrap();
        drop(sink);

        assert_eq!(std::fs::read(&path).unwrap(), b"new");
    }

    #[test]
    fn test_missing_directory_is_open_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nope").join("out.log");

        let err = SinkTarget::File(path).open(false).unwrap_err();
        assert!(matches!(err, StripError::OpenOutput { .. }));
    }
}
