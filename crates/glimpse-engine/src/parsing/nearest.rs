use super::span::Span;

/// Picks the span closest to `pos`.
///
/// A cursor inside a span (`start <= pos < end`) has distance zero; otherwise
/// the distance is the gap to the span's nearer edge. Ties go to the span that
/// comes first in `spans`, i.e. the first one the scanner produced.
pub fn select_nearest(spans: &[Span], pos: usize) -> Option<Span> {
    nearest_with_distance(spans, pos).map(|(span, _)| span)
}

/// Like [`select_nearest`], also returning the winning distance.
pub fn nearest_with_distance(spans: &[Span], pos: usize) -> Option<(Span, usize)> {
    let mut best: Option<(Span, usize)> = None;
    for &span in spans {
        let d = span.distance_to(pos);
        // strict `<` keeps the earliest span on ties
        if best.is_none_or(|(_, best_d)| d < best_d) {
            best = Some((span, d));
        }
    }
    best
}
