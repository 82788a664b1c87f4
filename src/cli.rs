//! Command-line interface for paintstripper.
//!
//! Uses lexopt for minimal binary size overhead.

use std::ffi::OsString;
use std::path::PathBuf;

/// Command-line arguments.
#[derive(Debug, Clone, Default)]
pub struct Args {
    /// Strip ANSI color sequences.
    pub color: bool,
    /// Write stripped content to this file.
    pub write_stripped: Option<PathBuf>,
    /// Write unstripped content to this file.
    pub write_unstripped: Option<PathBuf>,
    /// Print no console output.
    pub quiet: bool,
    /// Allow overwriting existing output files.
    pub force: bool,
    /// Nominal read size in bytes.
    pub chunk_size: Option<usize>,
    /// Path to configuration file.
    pub config: Option<PathBuf>,
    /// Log level (error, warn, info, debug, trace).
    pub log_level: Option<String>,
    /// Input file; standard input when absent.
    pub input: Option<PathBuf>,
    /// Show version and exit.
    pub version: bool,
    /// Show help and exit.
    pub help: bool,
}

/// Parse command-line arguments.
pub fn parse_args() -> Result<Args, ArgsError> {
    parse_args_from(std::env::args_os())
}

/// Parse arguments from an iterator (for testing).
pub fn parse_args_from<I>(args: I) -> Result<Args, ArgsError>
where
    I: IntoIterator<Item = OsString>,
{
    use lexopt::prelude::*;

    let mut result = Args::default();
    let mut parser = lexopt::Parser::from_iter(args);

    while let Some(arg) = parser.next()? {
        match arg {
            Short('h') | Long("help") => {
                result.help = true;
            }
            Short('V') | Long("version") => {
                result.version = true;
            }
            Short('c') | Long("color") => {
                result.color = true;
            }
            Short('s') | Long("write-stripped") => {
                result.write_stripped = Some(parser.value()?.into());
            }
            Short('u') | Long("write-unstripped") => {
                result.write_unstripped = Some(parser.value()?.into());
            }
            Short('q') | Long("quiet") => {
                result.quiet = true;
            }
            Short('f') | Long("force") => {
                result.force = true;
            }
            Long("chunk-size") => {
                let value: String = parser.value()?.parse()?;
                let size = value
                    .parse::<usize>()
                    .ok()
                    .filter(|size| *size > 0)
                    .ok_or_else(|| ArgsError::InvalidValue("chunk-size", value))?;
                result.chunk_size = Some(size);
            }
            Long("config") => {
                result.config = Some(parser.value()?.into());
            }
            Short('l') | Long("log-level") => {
                result.log_level = Some(parser.value()?.parse()?);
            }
            Value(val) => {
                if result.input.is_some() {
                    return Err(ArgsError::TooManyInputs);
                }
                result.input = Some(val.into());
            }
            _ => return Err(arg.unexpected().into()),
        }
    }

    Ok(result)
}

/// Help message text.
pub fn help_text() -> String {
    let version = env!("CARGO_PKG_VERSION");
    format!(
        r#"paintstripper {version}
Strip ANSI color codes from a stream while keeping an unmodified copy

USAGE:
    paintstripper [OPTIONS] [INPUT]

    Reads INPUT, or standard input when INPUT is omitted.

OPTIONS:
    -c, --color                    Strip shell color codes
    -s, --write-stripped <FILE>    Write stripped content to a file (print out unstripped content)
    -u, --write-unstripped <FILE>  Write unstripped content to a file (print out stripped content)
    -q, --quiet                    Print no output
    -f, --force                    Force file overwrite
        --chunk-size <BYTES>       Read size in bytes [default: 1024]
        --config <FILE>            Path to configuration file (JSON)
    -l, --log-level <LVL>          Diagnostic log level (error, warn, info, debug, trace)
    -h, --help                     Print help
    -V, --version                  Print version

ENVIRONMENT VARIABLES:
    PAINTSTRIPPER_CHUNK_SIZE       Read size (overrides config)
    PAINTSTRIPPER_LOG_LEVEL        Log level (overrides config)
    RUST_LOG                       Alternative log level setting

EXAMPLES:
    # Strip color codes from a file and print the result
    paintstripper --color build.log

    # ... the same, reading from a pipe
    some_colorful_command.sh | paintstripper --color

    # Print stripped output, keep the colorful original in a file
    some_colorful_command.sh | paintstripper --color --write-unstripped colorful_output.log

    # Print colorful output, write the stripped copy to a file
    some_colorful_command.sh | paintstripper --color --write-stripped stripped_output.log

    # Print nothing, write the stripped copy to a file
    some_colorful_command.sh | paintstripper --color --quiet --write-stripped stripped_output.log

    # Print nothing, write both copies to files
    some_colorful_command.sh | paintstripper --color --quiet \
        --write-stripped stripped_output.log --write-unstripped colorful_output.log
"#
    )
}

/// Print help message.
pub fn print_help() {
    print!("{}", help_text());
}

/// Version line.
pub fn version_text() -> String {
    format!("paintstripper {}", env!("CARGO_PKG_VERSION"))
}

/// Print version.
pub fn print_version() {
    println!("{}", version_text());
}

/// Argument parsing errors.
#[derive(Debug)]
pub enum ArgsError {
    /// Lexopt parsing error.
    Lexopt(lexopt::Error),
    /// Invalid argument value.
    InvalidValue(&'static str, String),
    /// More than one positional input.
    TooManyInputs,
}

impl std::fmt::Display for ArgsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Lexopt(e) => write!(f, "{}", e),
            Self::InvalidValue(name, value) => {
                write!(f, "invalid value for --{}: '{}'", name, value)
            }
            Self::TooManyInputs => {
                write!(f, "this command only takes a maximum of one input file")
            }
        }
    }
}

impl std::error::Error for ArgsError {}

impl From<lexopt::Error> for ArgsError {
    fn from(e: lexopt::Error) -> Self {
        Self::Lexopt(e)
    }
}
