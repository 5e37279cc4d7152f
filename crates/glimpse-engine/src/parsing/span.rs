use serde::Serialize;

/// A byte range `[start, end)` into the document.
///
/// Scanned fragment spans cover the delimiters too: `start` is the `#` of the
/// opening marker and `end` is one past the `]` of the closing marker, so
/// slicing the document with a span reproduces the raw fragment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct Span {
    /// Inclusive start byte offset.
    pub start: usize,
    /// Exclusive end byte offset.
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    /// Zero-width span at `pos`, used for point queries.
    pub fn point(pos: usize) -> Self {
        Self {
            start: pos,
            end: pos,
        }
    }

    /// Returns the length in bytes. Uses saturating subtraction for safety.
    #[must_use]
    pub fn len(self) -> usize {
        self.end.saturating_sub(self.start)
    }

    /// Returns true if the span is empty (start >= end).
    #[must_use]
    pub fn is_empty(self) -> bool {
        self.len() == 0
    }

    #[must_use]
    pub fn midpoint(self) -> usize {
        self.start + self.len() / 2
    }

    /// True when `start <= pos < end`.
    #[must_use]
    pub fn contains(self, pos: usize) -> bool {
        self.start <= pos && pos < self.end
    }

    /// Half-open overlap test. An empty `other` is treated as a point query.
    #[must_use]
    pub fn intersects(self, other: Span) -> bool {
        if other.is_empty() {
            return self.contains(other.start);
        }
        if self.is_empty() {
            return other.contains(self.start);
        }
        self.start < other.end && other.start < self.end
    }

    /// Distance from `pos` to this span: zero inside, otherwise the gap to the
    /// nearer edge (`start` when the span is ahead, `end` when it is behind).
    #[must_use]
    pub fn distance_to(self, pos: usize) -> usize {
        if pos < self.start {
            self.start - pos
        } else if pos < self.end {
            0
        } else {
            pos - self.end
        }
    }

    pub fn range(self) -> std::ops::Range<usize> {
        self.start..self.end
    }
}

impl From<std::ops::Range<usize>> for Span {
    fn from(range: std::ops::Range<usize>) -> Self {
        Self {
            start: range.start,
            end: range.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(0, 2)]
    #[case(1, 1)]
    #[case(2, 0)]
    #[case(5, 0)]
    #[case(7, 0)]
    #[case(8, 0)]
    #[case(9, 1)]
    #[case(20, 12)]
    fn distance_follows_edges(#[case] pos: usize, #[case] expected: usize) {
        let span = Span::new(2, 8);
        assert_eq!(span.distance_to(pos), expected);
    }

    #[test]
    fn contains_is_half_open() {
        let span = Span::new(2, 8);
        assert!(!span.contains(1));
        assert!(span.contains(2));
        assert!(span.contains(7));
        assert!(!span.contains(8));
    }

    #[test]
    fn touching_spans_do_not_intersect() {
        assert!(!Span::new(0, 4).intersects(Span::new(4, 9)));
        assert!(Span::new(0, 5).intersects(Span::new(4, 9)));
    }

    #[test]
    fn point_query_uses_containment() {
        let span = Span::new(2, 8);
        assert!(span.intersects(Span::point(5)));
        assert!(span.intersects(Span::point(2)));
        assert!(!span.intersects(Span::point(8)));
        assert!(Span::point(5).intersects(span));
    }

    #[test]
    fn midpoint_of_fragment() {
        assert_eq!(Span::new(2, 8).midpoint(), 5);
        assert_eq!(Span::new(3, 4).midpoint(), 3);
    }

    #[test]
    fn len_saturates() {
        let inverted = Span { start: 9, end: 3 };
        assert_eq!(inverted.len(), 0);
        assert!(inverted.is_empty());
    }
}
