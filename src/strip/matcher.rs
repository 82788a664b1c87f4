//! Anchored matcher for ANSI SGR color sequences.

use std::sync::OnceLock;

use regex::bytes::Regex;
use tracing::warn;

/// The escape introducer byte.
pub const ESC: u8 = 0x1b;

/// Longest sequence the grammar accepts, e.g. `ESC[255;255;255;255;255m`.
pub const MAX_SEQUENCE_LENGTH: usize = 22;

/// 0-9, 10-99, 100-199, 200-249, 250-255
const PARAM_0_TO_255: &str = "([0-9]|[1-9][0-9]|1[0-9][0-9]|2[0-4][0-9]|25[0-5])";

/// Matches `ESC '[' N (';' N){0,4} 'm'` at the start of a byte slice.
#[derive(Debug, Clone)]
pub struct ColorMatcher {
    regex: Regex,
}

impl ColorMatcher {
    /// Compile the color sequence pattern.
    pub fn new() -> Self {
        let pattern = format!(r"^\x1b\[{p}(;{p}){{0,4}}m", p = PARAM_0_TO_255);
        let regex = Regex::new(&pattern).expect("color pattern is a valid regex");
        Self { regex }
    }

    /// Process-wide matcher, compiled on first use.
    pub fn shared() -> &'static ColorMatcher {
        static MATCHER: OnceLock<ColorMatcher> = OnceLock::new();
        MATCHER.get_or_init(ColorMatcher::new)
    }

    /// Match a color sequence starting at offset 0 of `window`.
    ///
    /// Returns the exclusive end offset of the sequence. A slice shorter
    /// than [`MAX_SEQUENCE_LENGTH`] is fine; an incomplete sequence is
    /// simply no match.
    pub fn match_prefix(&self, window: &[u8]) -> Option<usize> {
        let found = self.regex.find(window)?;
        if found.start() != 0 {
            warn!(
                start = found.start(),
                end = found.end(),
                "color match not anchored at window start, copying bytes through"
            );
            return None;
        }
        Some(found.end())
    }
}

impl Default for ColorMatcher {
    fn default() -> Self {
        Self::new()
    }
}
