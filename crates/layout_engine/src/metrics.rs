//! Text measurement, wrapping and clipping
//!
//! Widths are computed from the standard Helvetica advance widths (in 1/1000
//! em) for printable ASCII; other families use fixed approximations. This is
//! sufficient for alignment and column fitting with the standard PDF fonts.

use crate::{FontFamily, TextStyle};
use unicode_segmentation::UnicodeSegmentation;

/// Helvetica advance widths for ASCII 32..=126
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, // '0'..'9'
    278, 278, 584, 584, 584, 556, 1015, // ':'..'@'
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, // 'A'..'M'
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, // 'N'..'Z'
    278, 278, 278, 469, 556, 333, // '['..'`'
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, // 'a'..'m'
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, // 'n'..'z'
    334, 260, 334, 584, // '{'..'~'
];

const ELLIPSIS: &str = "...";

/// Advance width of one character in 1/1000 em
fn char_width(ch: char, style: &TextStyle) -> f32 {
    match style.family {
        FontFamily::Courier => 600.0,
        FontFamily::Times => {
            if style.is_bold() {
                480.0
            } else {
                450.0
            }
        }
        FontFamily::Helvetica => {
            let base = match ch as u32 {
                code @ 32..=126 => HELVETICA_WIDTHS[(code - 32) as usize] as f32,
                _ => 556.0,
            };
            if style.is_bold() {
                base * 1.06
            } else {
                base
            }
        }
    }
}

/// Width of a string in points
pub fn text_width(text: &str, style: &TextStyle) -> f32 {
    let units: f32 = text.chars().map(|ch| char_width(ch, style)).sum();
    units * style.size / 1000.0
}

/// Word-wrap text into lines no wider than `max_width`.
///
/// Explicit newlines start a new line. Words wider than the limit are broken
/// at grapheme boundaries. Always returns at least one line.
pub fn wrap_text(text: &str, style: &TextStyle, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut current = String::new();

        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{} {}", current, word)
            };

            if text_width(&candidate, style) <= max_width {
                current = candidate;
                continue;
            }

            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }

            if text_width(word, style) <= max_width {
                current = word.to_string();
            } else {
                let mut pieces = break_word(word, style, max_width);
                current = pieces.pop().unwrap_or_default();
                lines.extend(pieces);
            }
        }

        lines.push(current);
    }

    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

/// Break a single long word into grapheme chunks that fit `max_width`
fn break_word(word: &str, style: &TextStyle, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut current = String::new();

    for grapheme in word.graphemes(true) {
        let candidate = format!("{}{}", current, grapheme);
        if !current.is_empty() && text_width(&candidate, style) > max_width {
            pieces.push(std::mem::take(&mut current));
            current.push_str(grapheme);
        } else {
            current = candidate;
        }
    }
    pieces.push(current);
    pieces
}

/// Truncate text so it fits within `max_width`, marking the cut with an
/// ellipsis. Text that already fits is returned unchanged.
pub fn clip_text(text: &str, style: &TextStyle, max_width: f32) -> String {
    if text_width(text, style) <= max_width {
        return text.to_string();
    }

    let budget = max_width - text_width(ELLIPSIS, style);
    if budget <= 0.0 {
        return String::new();
    }

    let mut kept = String::new();
    for grapheme in text.graphemes(true) {
        let candidate = format!("{}{}", kept, grapheme);
        if text_width(&candidate, style) > budget {
            break;
        }
        kept = candidate;
    }
    format!("{}{}", kept.trim_end(), ELLIPSIS)
}
