//! Text encoding and measurement for the standard Helvetica font.

/// Base font used for every table page. One of the 14 standard PDF fonts,
/// so nothing has to be embedded.
pub const FONT_NAME: &str = "Helvetica";

/// Height of a capital letter as a fraction of the font size.
pub const CAP_HEIGHT: f32 = 0.718;

const ELLIPSIS: &str = "...";

/// Advance widths of Helvetica for ASCII 32..=126, in 1/1000 em.
const HELVETICA_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278, // ' '..'/'
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556, // '0'..'?'
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778, // '@'..'O'
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556, // 'P'..'_'
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556, // '`'..'o'
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584, // 'p'..'~'
];

const DEFAULT_WIDTH: u16 = 556;

/// Map a string onto WinAnsiEncoding bytes. Control characters become
/// spaces; characters outside the encoding become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' => c as u8,
        '\u{a0}'..='\u{ff}' => c as u32 as u8,
        '€' => 0x80,
        '…' => 0x85,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201c}' => 0x93,
        '\u{201d}' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        c if c.is_control() => b' ',
        _ => b'?',
    }
}

fn glyph_width(byte: u8) -> u16 {
    match byte {
        32..=126 => HELVETICA_WIDTHS[(byte - 32) as usize],
        _ => DEFAULT_WIDTH,
    }
}

/// Width of `text` in points when set at `font_size`.
pub fn text_width(text: &str, font_size: f32) -> f32 {
    let units: u32 = encode_win_ansi(text)
        .into_iter()
        .map(|b| u32::from(glyph_width(b)))
        .sum();
    units as f32 * font_size / 1000.0
}

/// Shorten `text` with a trailing `...` until it fits in `max_width`.
pub fn fit_text(text: &str, max_width: f32, font_size: f32) -> String {
    if text_width(text, font_size) <= max_width {
        return text.to_string();
    }
    let mut chars: Vec<char> = text.chars().collect();
    while !chars.is_empty() {
        chars.pop();
        let candidate: String = chars.iter().collect::<String>() + ELLIPSIS;
        if text_width(&candidate, font_size) <= max_width {
            return candidate;
        }
    }
    if text_width(ELLIPSIS, font_size) <= max_width {
        ELLIPSIS.to_string()
    } else {
        String::new()
    }
}
