use xi_rope::Rope;

use super::{cursor::Cursor, marker::FragmentMarker, span::Span};

/// Scans `text` for `#[ … #]` fragments and returns their spans in document order.
///
/// The scanner keeps at most one fragment open at a time:
/// - an opener while a fragment is already open is ignored (first opener wins)
/// - a closer while nothing is open is ignored
/// - a marker directly preceded by `\` is literal text, never a delimiter
///
/// Unmatched or nested markers are tolerated, not rejected. A stray opener
/// therefore swallows everything up to the next closer.
///
/// The scan keeps no state between calls, so it is always safe to re-run over
/// the current document after an edit.
pub fn scan(text: &str) -> Vec<Span> {
    scan_from(0, text)
}

/// Like [`scan`], with spans offset by `base` (for scanning a slice of a larger document).
pub fn scan_from(base: usize, text: &str) -> Vec<Span> {
    let mut cur = Cursor::new(text, base);
    let mut out = vec![];
    let mut open: Option<usize> = None;

    while !cur.eof() {
        if at_marker(&cur, FragmentMarker::OPEN) {
            match open {
                None => open = Some(cur.pos()),
                Some(start) => {
                    log::trace!("ignoring opener at {} inside fragment from {start}", cur.pos())
                }
            }
            cur.bump_n(FragmentMarker::WIDTH);
            continue;
        }
        if at_marker(&cur, FragmentMarker::CLOSE) {
            match open.take() {
                Some(start) => out.push(Span {
                    start,
                    end: cur.pos() + FragmentMarker::WIDTH,
                }),
                None => log::trace!("ignoring unmatched closer at {}", cur.pos()),
            }
            cur.bump_n(FragmentMarker::WIDTH);
            continue;
        }
        cur.bump();
    }

    if let Some(start) = open {
        log::trace!("fragment opened at {start} is never closed");
    }
    out
}

/// Convenience: scan the whole rope.
pub fn scan_rope(rope: &Rope) -> Vec<Span> {
    scan(&rope.slice_to_cow(0..rope.len()))
}

fn at_marker(cur: &Cursor<'_>, marker: &[u8]) -> bool {
    cur.starts_with(marker) && cur.prev() != Some(FragmentMarker::ESCAPE)
}
