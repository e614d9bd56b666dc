//! Glyph metrics for the base-14 Helvetica family.
//!
//! Widths are in thousandths of an em for the printable ASCII range, taken
//! from the Helvetica and Helvetica-Bold AFMs. The oblique face shares the
//! regular metrics.

use super::layout::Font;

/// Helvetica advance widths for `' '..='~'`.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // 0..?
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // P.._
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // `..o
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // p..~
];

/// Helvetica-Bold advance widths for `' '..='~'`.
const HELVETICA_BOLD_WIDTHS: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278, // ' '../
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 333, 333, 584, 584, 584, 611, // 0..?
    975, 722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833, 722, 778, // @..O
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 333, 278, 333, 584, 556, // P.._
    333, 556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889, 611, 611, // `..o
    611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500, 389, 280, 389, 584, // p..~
];

fn widths(font: Font) -> &'static [u16; 95] {
    match font {
        Font::Bold => &HELVETICA_BOLD_WIDTHS,
        Font::Regular | Font::Italic => &HELVETICA_WIDTHS,
    }
}

/// Replace characters the standard encoding can't show.
///
/// A few common symbols get ASCII stand-ins; anything else outside printable
/// ASCII becomes `?`.
#[must_use]
pub fn sanitize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            ' '..='~' => out.push(c),
            '\u{20B9}' => out.push_str("INR "),
            '\u{2708}' => out.push('>'),
            '\u{2013}' | '\u{2014}' => out.push('-'),
            '\u{2018}' | '\u{2019}' => out.push('\''),
            '\u{201C}' | '\u{201D}' => out.push('"'),
            '\t' | '\n' | '\r' => out.push(' '),
            _ => out.push('?'),
        }
    }
    out
}

/// Width of `text` in points when set in `font` at `size`.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn text_width(text: &str, font: Font, size: f32) -> f32 {
    let table = widths(font);
    let units: u32 = text
        .bytes()
        .map(|b| match b {
            b' '..=b'~' => u32::from(table[usize::from(b - b' ')]),
            _ => 556,
        })
        .sum();

    units as f32 * size / 1000.0
}

/// Break `text` into lines no wider than `max_width`.
///
/// Words longer than a line are broken between characters. A line always
/// holds at least one character, even when that alone is too wide. Empty
/// input yields a single empty line.
#[must_use]
pub fn wrap(text: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        if !current.is_empty() {
            let candidate = format!("{current} {word}");
            if text_width(&candidate, font, size) <= max_width {
                current = candidate;
                continue;
            }
            lines.push(std::mem::take(&mut current));
        }

        if text_width(word, font, size) <= max_width {
            current.push_str(word);
        } else {
            let mut pieces = split_word(word, font, size, max_width);
            current = pieces.pop().unwrap_or_default();
            lines.extend(pieces);
        }
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Break a single word into pieces that each fit `max_width`.
fn split_word(word: &str, font: Font, size: f32, max_width: f32) -> Vec<String> {
    let mut pieces = Vec::new();
    let mut piece = String::new();

    for c in word.chars() {
        piece.push(c);
        if piece.chars().count() > 1 && text_width(&piece, font, size) > max_width {
            piece.pop();
            pieces.push(std::mem::replace(&mut piece, c.to_string()));
        }
    }
    pieces.push(piece);
    pieces
}
