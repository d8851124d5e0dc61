//! Star-rating display formatting

use crate::rating::Score;

/// Render a score as stars, rounded to the nearest half star
///
/// Full stars for the integer part, a trailing half glyph when the
/// fraction is exactly 0.5, and "Not assessed" for `None`.
pub fn format_stars(score: Option<Score>) -> String {
    let Some(score) = score else {
        return "Not assessed".to_string();
    };
    let halves = (score.get() * 2.0).round() as i64;
    let full = (halves / 2) as usize;
    let mut out = "★".repeat(full);
    if halves % 2 == 1 {
        out.push('½');
    }
    out
}
