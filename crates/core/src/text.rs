//! Rough label measurement. No font metrics here, only a guess from
//! typical 12pt character sizes, shared by every surface so they all
//! agree on which labels are visible.

/// Approximate width of one character in pixels.
pub const CHAR_WIDTH_APPROX: f64 = 13.0;
/// Approximate height of one text line in pixels.
pub const LINE_HEIGHT_APPROX: f64 = 17.0;

/// Guessed pixel width of a label: its longest whitespace-delimited
/// token at the approximate character width.
pub fn text_width_roughly(label: &str) -> f64 {
    label
        .split_whitespace()
        .map(|token| token.chars().count() as f64 * CHAR_WIDTH_APPROX)
        .fold(0.0, f64::max)
}

/// Whether a label probably fits a `width` by `height` box. The guess
/// is crude, so an estimate exactly on the boundary counts as fitting.
pub fn label_fits(label: &str, width: f64, height: f64) -> bool {
    if text_width_roughly(label) > width {
        return false;
    }
    let tokens = label.split_whitespace().count();
    tokens as f64 * LINE_HEIGHT_APPROX <= height
}
