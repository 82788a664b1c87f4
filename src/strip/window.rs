//! Sliding byte window over the current chunk.

/// Unconsumed bytes of the current chunk plus any lookahead appended to it.
///
/// Holds `0 <= cursor <= len`. Bytes before the cursor are consumed and
/// never revisited. [`extend`](Self::extend) drops them before appending,
/// so a window that keeps being refilled only holds unconsumed bytes.
#[derive(Debug, Default)]
pub struct ByteWindow {
    data: Vec<u8>,
    cursor: usize,
}

impl ByteWindow {
    /// Create an empty window.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of unconsumed bytes.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.cursor
    }

    /// Total bytes held, consumed or not.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the window holds no bytes at all.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Whether every byte has been consumed.
    pub fn is_exhausted(&self) -> bool {
        self.cursor == self.data.len()
    }

    /// Current cursor position.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// Next unconsumed byte.
    pub fn peek_byte(&self) -> Option<u8> {
        self.data.get(self.cursor).copied()
    }

    /// Up to `n` unconsumed bytes starting at the cursor.
    pub fn peek(&self, n: usize) -> &[u8] {
        let end = self.cursor.saturating_add(n).min(self.data.len());
        &self.data[self.cursor..end]
    }

    /// Advance the cursor by `n`, stopping at the end of the data.
    pub fn consume(&mut self, n: usize) {
        self.cursor = self.cursor.saturating_add(n).min(self.data.len());
    }

    /// Drop consumed bytes and append freshly read ones after the rest.
    ///
    /// The cursor is reset to 0; the unconsumed bytes keep their order.
    pub fn extend(&mut self, bytes: &[u8]) {
        self.data.drain(..self.cursor);
        self.cursor = 0;
        self.data.extend_from_slice(bytes);
    }
}

impl From<Vec<u8>> for ByteWindow {
    fn from(data: Vec<u8>) -> Self {
        Self { data, cursor: 0 }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_window() {
        let window = ByteWindow::new();
        assert!(window.is_empty());
        assert!(window.is_exhausted());
        assert_eq!(window.peek_byte(), None);
        assert_eq!(window.peek(10), b"");
    }

    #[test]
    fn test_peek_and_consume() {
        let mut window = ByteWindow::from(b"abcdef".to_vec());
        assert_eq!(window.peek(3), b"abc");
        window.consume(2);
        assert_eq!(window.cursor(), 2);
        assert_eq!(window.peek_byte(), Some(b'c'));
        assert_eq!(window.peek(100), b"cdef");
        assert_eq!(window.remaining(), 4);
    }

    #[test]
    fn test_consume_clamps() {
        let mut window = ByteWindow::from(b"abc".to_vec());
        window.consume(10);
        assert_eq!(window.cursor(), 3);
        assert!(window.is_exhausted());
        window.consume(usize::MAX);
        assert_eq!(window.cursor(), 3);
    }

    #[test]
    fn test_extend_drops_consumed_prefix() {
        let mut window = ByteWindow::from(b"ab\x1b".to_vec());
        window.consume(2);
        window.extend(b"[31m");
        assert_eq!(window.cursor(), 0);
        assert_eq!(window.remaining(), 5);
        assert_eq!(window.peek(5), b"\x1b[31m");
        assert_eq!(window.len(), 5);
    }

    #[test]
    fn test_repeated_refills_stay_bounded() {
        let mut window = ByteWindow::from(vec![b'x'; 64]);
        for _ in 0..1000 {
            window.consume(window.remaining().saturating_sub(4));
            window.extend(&[b'y'; 64]);
            assert!(window.len() <= 68);
        }
        assert_eq!(window.remaining(), 68);
    }
}
