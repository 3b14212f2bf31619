//! Text metrics for the built-in Helvetica faces.
//!
//! The PDF canvas prints with the standard Helvetica and Helvetica-Bold fonts, which need
//! no embedding.  Alignment and truncation only need advance widths, so the regular face
//! widths are tabulated here and the bold face is approximated from them.

/// Millimetres per typographic point.
pub const MM_PER_PT: f64 = 0.352_778;

const BOLD_WIDTH_FACTOR: f64 = 1.06;
const FALLBACK_WIDTH: u16 = 556;
const ELLIPSIS: &str = "...";

/// Helvetica advance widths in 1/1000 em for the printable ASCII range starting at `' '`.
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

fn char_width(c: char) -> u16 {
    let code = c as u32;
    if (32..127).contains(&code) {
        HELVETICA_WIDTHS[(code - 32) as usize]
    } else {
        FALLBACK_WIDTH
    }
}

/// Estimated printed width of `text` in millimetres.
pub fn text_width_mm(text: &str, font_size: f64, bold: bool) -> f64 {
    let units: u32 = text.chars().map(|c| u32::from(char_width(c))).sum();
    let factor = if bold { BOLD_WIDTH_FACTOR } else { 1.0 };
    f64::from(units) / 1000.0 * font_size * MM_PER_PT * factor
}

/// Keeps at most `max_chars` characters of `text`.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Shortens `text` with a trailing ellipsis until it fits into `max_width` millimetres.
pub fn fit_text(text: &str, max_width: f64, font_size: f64, bold: bool) -> String {
    if text_width_mm(text, font_size, bold) <= max_width {
        return text.to_owned();
    }

    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + ELLIPSIS;
        if text_width_mm(&candidate, font_size, bold) <= max_width {
            return candidate;
        }
    }
    String::new()
}

/// Greedy word wrap of `text` into lines no wider than `max_width` millimetres.
///
/// A single word wider than the line is kept on its own line rather than split.
pub fn wrap_text(text: &str, max_width: f64, font_size: f64, bold: bool) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let candidate = if current.is_empty() {
            word.to_owned()
        } else {
            format!("{current} {word}")
        };

        if current.is_empty() || text_width_mm(&candidate, font_size, bold) <= max_width {
            current = candidate;
        } else {
            lines.push(std::mem::take(&mut current));
            current = word.to_owned();
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }
    lines
}
