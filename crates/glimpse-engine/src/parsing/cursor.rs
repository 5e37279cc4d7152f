/// A byte cursor over document text with position tracking.
///
/// Operates over a string slice while tracking the absolute byte position
/// in the document (via `base` offset). Unlike a forward-only lexer it can
/// look one byte behind, which is how escaped markers are recognised.
#[derive(Clone)]
pub struct Cursor<'a> {
    /// The string being scanned.
    pub s: &'a str,
    /// Base offset in the document (added to local index for absolute positions).
    pub base: usize,
    /// Current local index into `s`.
    pub i: usize,
}

impl<'a> Cursor<'a> {
    /// Creates a new cursor at the start of `s` with the given base offset.
    pub fn new(s: &'a str, base: usize) -> Self {
        Self { s, base, i: 0 }
    }

    /// Returns the current absolute byte position (base + local index).
    pub fn pos(&self) -> usize {
        self.base + self.i
    }

    /// Returns true if at end of string.
    pub fn eof(&self) -> bool {
        self.i >= self.s.len()
    }

    /// The byte just before the cursor, `None` at the start of input.
    pub fn prev(&self) -> Option<u8> {
        let prev = self.i.checked_sub(1)?;
        self.s.as_bytes().get(prev).copied()
    }

    /// Checks if the remaining input starts with the given byte pattern.
    pub fn starts_with(&self, pat: &[u8]) -> bool {
        self.s
            .as_bytes()
            .get(self.i..)
            .is_some_and(|rest| rest.starts_with(pat))
    }

    /// Advances by one byte, returning the consumed byte.
    pub fn bump(&mut self) -> Option<u8> {
        let b = self.s.as_bytes().get(self.i).copied()?;
        self.i += 1;
        Some(b)
    }

    /// Advances by `n` bytes.
    pub fn bump_n(&mut self, n: usize) {
        self.i += n;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_basics() {
        let mut cur = Cursor::new("hello", 10);
        assert_eq!(cur.pos(), 10);
        assert!(!cur.eof());
        assert_eq!(cur.bump(), Some(b'h'));
        assert_eq!(cur.pos(), 11);
    }

    #[test]
    fn prev_at_start_is_none() {
        let mut cur = Cursor::new("\\#[", 0);
        assert_eq!(cur.prev(), None);
        cur.bump();
        assert_eq!(cur.prev(), Some(b'\\'));
        assert!(cur.starts_with(b"#["));
    }

    #[test]
    fn empty_string_input() {
        let cur = Cursor::new("", 0);
        assert!(cur.eof());
        assert_eq!(cur.prev(), None);
        assert_eq!(cur.pos(), 0);
    }

    #[test]
    fn starts_with_pattern_longer_than_remaining() {
        let mut cur = Cursor::new("a#", 0);
        cur.bump();
        assert!(!cur.starts_with(b"#]"));
        assert!(cur.starts_with(b"#"));
    }

    #[test]
    fn starts_with_past_end_is_false() {
        // bump_n does not bounds check; starts_with must still be safe
        let mut cur = Cursor::new("hi", 0);
        cur.bump_n(10);
        assert!(cur.eof());
        assert!(!cur.starts_with(b"h"));
    }

    #[test]
    fn bump_at_eof_returns_none() {
        let mut cur = Cursor::new("x", 0);
        assert_eq!(cur.bump(), Some(b'x'));
        assert_eq!(cur.bump(), None);
        assert_eq!(cur.bump(), None);
    }
}
