//! Greedy word-wrap by font metrics.

use crate::layout::font_metrics::FontMetricTable;

/// Breaks `text` into lines no wider than `max_width_pt` at `size_pt`.
///
/// Whitespace runs collapse to one space. A single word wider than the line
/// is split at character boundaries. An empty or blank string yields no lines.
pub fn wrap_lines(
    text: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut current_width = 0.0_f32;
    let space_w = metrics.space_width * size_pt;

    for word in text.split_whitespace() {
        let word_w = metrics.measure_pt(word, size_pt);

        if word_w > max_width_pt {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
                current_width = 0.0;
            }
            for piece in split_long_word(word, metrics, size_pt, max_width_pt) {
                let piece_w = metrics.measure_pt(&piece, size_pt);
                lines.push(piece);
                current_width = piece_w;
            }
            // the last piece stays open so following words can join it
            if let Some(last) = lines.pop() {
                current = last;
            }
            continue;
        }

        if current.is_empty() {
            current.push_str(word);
            current_width = word_w;
        } else if current_width + space_w + word_w > max_width_pt {
            lines.push(std::mem::take(&mut current));
            current.push_str(word);
            current_width = word_w;
        } else {
            current.push(' ');
            current.push_str(word);
            current_width += space_w + word_w;
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn split_long_word(
    word: &str,
    metrics: &FontMetricTable,
    size_pt: f32,
    max_width_pt: f32,
) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();
    for c in word.chars() {
        let mut candidate = piece.clone();
        candidate.push(c);
        if !piece.is_empty() && metrics.measure_pt(&candidate, size_pt) > max_width_pt {
            pieces.push(std::mem::take(&mut piece));
            piece.push(c);
        } else {
            piece = candidate;
        }
    }
    if !piece.is_empty() {
        pieces.push(piece);
    }
    pieces
}
