//! Resolution of which destination backs each output stream.

use std::path::{Path, PathBuf};

use tracing::warn;

use crate::error::{Result, StripError};
use crate::output::sink::{DualSink, Sink, SinkTarget};

/// Resolved destinations for both streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SinkPlan {
    /// Destination for the stripped stream.
    pub stripped: SinkTarget,
    /// Destination for the unstripped stream.
    pub unstripped: SinkTarget,
}

impl SinkPlan {
    /// Decide destinations from the requested output files.
    ///
    /// | stripped file | unstripped file | stripped            | unstripped          |
    /// |---------------|-----------------|---------------------|---------------------|
    /// | no            | no              | console (discard q) | discard             |
    /// | no            | yes             | console (discard q) | file                |
    /// | yes           | no              | file                | console (discard q) |
    /// | yes           | yes             | file                | file                |
    pub fn resolve(
        write_stripped: Option<&Path>,
        write_unstripped: Option<&Path>,
        quiet: bool,
    ) -> Self {
        match (write_stripped, write_unstripped) {
            (None, None) => Self {
                stripped: SinkTarget::console_or_discard(quiet),
                unstripped: SinkTarget::Discard,
            },
            (None, Some(unstripped)) => Self {
                stripped: SinkTarget::console_or_discard(quiet),
                unstripped: SinkTarget::File(unstripped.to_path_buf()),
            },
            (Some(stripped), None) => Self {
                stripped: SinkTarget::File(stripped.to_path_buf()),
                unstripped: SinkTarget::console_or_discard(quiet),
            },
            (Some(stripped), Some(unstripped)) => Self {
                stripped: SinkTarget::File(stripped.to_path_buf()),
                unstripped: SinkTarget::File(unstripped.to_path_buf()),
            },
        }
    }

    /// Reject plans that would clobber files, before anything is opened.
    pub fn check(&self, force: bool) -> Result<()> {
        if let (Some(a), Some(b)) = (self.stripped.path(), self.unstripped.path()) {
            if a == b || resolved_location(a) == resolved_location(b) {
                return Err(StripError::SameOutputPath(a.to_path_buf()));
            }
        }

        if force {
            return Ok(());
        }

        for path in self.file_paths() {
            if path.exists() {
                return Err(StripError::FileExists(path.to_path_buf()));
            }
        }

        Ok(())
    }

    /// Open both destinations, stripped first.
    ///
    /// If the unstripped side cannot be opened, a stripped file this call
    /// just created is removed again.
    pub fn open(&self, force: bool) -> Result<DualSink<Sink, Sink>> {
        let stripped = self.stripped.open(force)?;
        let unstripped = match self.unstripped.open(force) {
            Ok(sink) => sink,
            Err(e) => {
                drop(stripped);
                if let (false, Some(path)) = (force, self.stripped.path()) {
                    if let Err(remove_err) = std::fs::remove_file(path) {
                        warn!(
                            path = %path.display(),
                            error = %remove_err,
                            "could not remove output file"
                        );
                    }
                }
                return Err(e);
            }
        };
        Ok(DualSink::new(stripped, unstripped))
    }

    fn file_paths(&self) -> impl Iterator<Item = &Path> {
        self.stripped.path().into_iter().chain(self.unstripped.path())
    }
}

/// Where `path` lands on disk, with `..` and symlinks resolved.
///
/// The file itself may not exist yet, so its parent directory is resolved
/// and the file name joined back on. Paths that cannot be resolved are
/// returned as given.
fn resolved_location(path: &Path) -> PathBuf {
    if let Ok(resolved) = path.canonicalize() {
        return resolved;
    }

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    match (parent.canonicalize(), path.file_name()) {
        (Ok(dir), Some(name)) => dir.join(name),
        _ => path.to_path_buf(),
    }
}

/// Convenience for callers holding owned paths.
pub fn resolve_paths(
    write_stripped: Option<&PathBuf>,
    write_unstripped: Option<&PathBuf>,
    quiet: bool,
) -> SinkPlan {
    SinkPlan::resolve(
        write_stripped.map(PathBuf::as_path),
        write_unstripped.map(PathBuf::as_path),
        quiet,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn file(name: &str) -> SinkTarget {
        SinkTarget::File(PathBuf::from(name))
    }

    #[test]
    fn test_no_files() {
        let plan = SinkPlan::resolve(None, None, false);
        assert_eq!(plan.stripped, SinkTarget::Console);
        assert_eq!(plan.unstripped, SinkTarget::Discard);

        let plan = SinkPlan::resolve(None, None, true);
        assert_eq!(plan.stripped, SinkTarget::Discard);
        assert_eq!(plan.unstripped, SinkTarget::Discard);
    }

    #[test]
    fn test_unstripped_file_only() {
        let plan = SinkPlan::resolve(None, Some(Path::new("raw.log")), false);
        assert_eq!(plan.stripped, SinkTarget::Console);
        assert_eq!(plan.unstripped, file("raw.log"));

        let plan = SinkPlan::resolve(None, Some(Path::new("raw.log")), true);
        assert_eq!(plan.stripped, SinkTarget::Discard);
    }

    #[test]
    fn test_stripped_file_only() {
        let plan = SinkPlan::resolve(Some(Path::new("clean.log")), None, false);
        assert_eq!(plan.stripped, file("clean.log"));
        assert_eq!(plan.unstripped, SinkTarget::Console);

        let plan = SinkPlan::resolve(Some(Path::new("clean.log")), None, true);
        assert_eq!(plan.unstripped, SinkTarget::Discard);
    }

    #[test]
    fn test_both_files() {
        let plan = SinkPlan::resolve(
            Some(Path::new("clean.log")),
            Some(Path::new("raw.log")),
            false,
        );
        assert_eq!(plan.stripped, file("clean.log"));
        assert_eq!(plan.unstripped, file("raw.log"));
    }

    #[test]
    fn test_check_rejects_existing_before_opening() {
        let dir = TempDir::new().unwrap();
        let clean = dir.path().join("clean.log");
        let raw = dir.path().join("raw.log");
        std::fs::write(&raw, b"").unwrap();

        let plan = SinkPlan::resolve(Some(clean.as_path()), Some(raw.as_path()), false);
        let err = plan.check(false).unwrap_err();
        assert!(matches!(err, StripError::FileExists(ref p) if p == &raw));
        assert!(!clean.exists());

        assert!(plan.check(true).is_ok());
    }

    #[test]
    fn test_check_rejects_same_path() {
        let plan = SinkPlan::resolve(Some(Path::new("a.log")), Some(Path::new("a.log")), false);
        assert!(matches!(
            plan.check(true),
            Err(StripError::SameOutputPath(_))
        ));
    }

    #[test]
    fn test_check_rejects_dot_dot_alias() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let direct = dir.path().join("out.log");
        let alias = dir.path().join("sub").join("..").join("out.log");

        let plan = SinkPlan::resolve(Some(direct.as_path()), Some(alias.as_path()), false);
        assert!(matches!(
            plan.check(true),
            Err(StripError::SameOutputPath(_))
        ));
        assert!(matches!(
            plan.check(false),
            Err(StripError::SameOutputPath(_))
        ));
        assert!(!direct.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_check_rejects_symlink_alias() {
        let dir = TempDir::new().unwrap();
        let real = dir.path().join("real.log");
        let link = dir.path().join("link.log");
        std::fs::write(&real, b"").unwrap();
        std::os::unix::fs::symlink(&real, &link).unwrap();

        let plan = SinkPlan::resolve(Some(real.as_path()), Some(link.as_path()), false);
        assert!(matches!(
            plan.check(true),
            Err(StripError::SameOutputPath(_))
        ));
    }

    #[test]
    fn test_check_allows_distinct_files_in_same_dir() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();
        let clean = dir.path().join("clean.log");
        let raw = dir.path().join("sub").join("..").join("raw.log");

        let plan = SinkPlan::resolve(Some(clean.as_path()), Some(raw.as_path()), false);
        assert!(plan.check(false).is_ok());
    }

    #[test]
    fn test_failed_open_removes_created_stripped_file() {
        let dir = TempDir::new().unwrap();
        let clean = dir.path().join("clean.log");
        let raw = dir.path().join("missing").join("raw.log");

        let plan = SinkPlan::resolve(Some(clean.as_path()), Some(raw.as_path()), false);
        plan.check(false).unwrap();
        let err = plan.open(false).unwrap_err();
        assert!(matches!(err, StripError::OpenOutput { .. }));
        assert!(!clean.exists());

        // A retry is not blocked by a leftover file.
        assert!(plan.check(false).is_ok());
    }

    #[test]
    fn test_open_both_files() {
        let dir = TempDir::new().unwrap();
        let clean = dir.path().join("clean.log");
        let raw = dir.path().join("raw.log");

        let plan = resolve_paths(Some(&clean), Some(&raw), false);
        plan.check(false).unwrap();
        let mut sinks = plan.open(false).unwrap();
        sinks.write_stripped(b"A").unwrap();
        sinks.write_unstripped(b"\x1b[1mA").unwrap();
        sinks.flush().unwrap();
        drop(sinks);

        assert_eq!(std::fs::read(&clean).unwrap(), b"A");
        assert_eq!(std::fs::read(&raw).unwrap(), b"\x1b[1mA");
    }
}
