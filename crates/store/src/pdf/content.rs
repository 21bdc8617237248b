//! PDF Content Stream Generation
//!
//! A builder for page content streams. Only the operators the renderer needs:
//!
//! - q/Q, cm: graphics state and transforms
//! - w, rg/RG: line width and RGB colors
//! - m, l, re, S, f, B, n: path construction and painting
//! - BT/ET, Tf, Tm, Tj: text objects
//! - Do: XObject placement

use super::objects::{escape_string, format_real};
use std::io::Write;

/// Content stream builder
#[derive(Debug, Default)]
pub struct ContentStream {
    data: Vec<u8>,
}

impl ContentStream {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Save the current graphics state (q)
    pub fn save_state(&mut self) -> &mut Self {
        self.write_line("q");
        self
    }

    /// Restore the graphics state (Q)
    pub fn restore_state(&mut self) -> &mut Self {
        self.write_line("Q");
        self
    }

    /// Concatenate a transformation matrix (cm)
    pub fn transform(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        self.write_numbers(&[a, b, c, d, e, f], "cm");
        self
    }

    pub fn set_line_width(&mut self, width: f64) -> &mut Self {
        self.write_numbers(&[width], "w");
        self
    }

    pub fn set_fill_rgb(&mut self, r: f64, g: f64, b: f64) -> &mut Self {
        self.write_numbers(&[r, g, b], "rg");
        self
    }

    pub fn set_stroke_rgb(&mut self, r: f64, g: f64, b: f64) -> &mut Self {
        self.write_numbers(&[r, g, b], "RG");
        self
    }

    pub fn move_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.write_numbers(&[x, y], "m");
        self
    }

    pub fn line_to(&mut self, x: f64, y: f64) -> &mut Self {
        self.write_numbers(&[x, y], "l");
        self
    }

    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) -> &mut Self {
        self.write_numbers(&[x, y, width, height], "re");
        self
    }

    pub fn stroke(&mut self) -> &mut Self {
        self.write_line("S");
        self
    }

    pub fn fill(&mut self) -> &mut Self {
        self.write_line("f");
        self
    }

    pub fn fill_and_stroke(&mut self) -> &mut Self {
        self.write_line("B");
        self
    }

    /// End path without painting (n)
    pub fn end_path(&mut self) -> &mut Self {
        self.write_line("n");
        self
    }

    pub fn begin_text(&mut self) -> &mut Self {
        self.write_line("BT");
        self
    }

    pub fn end_text(&mut self) -> &mut Self {
        self.write_line("ET");
        self
    }

    /// Select a font resource and size (Tf)
    pub fn set_font(&mut self, font_name: &str, size: f64) -> &mut Self {
        let _ = write!(self.data, "/{} ", font_name);
        self.write_numbers(&[size], "Tf");
        self
    }

    pub fn set_text_matrix(&mut self, a: f64, b: f64, c: f64, d: f64, e: f64, f: f64) -> &mut Self {
        self.write_numbers(&[a, b, c, d, e, f], "Tm");
        self
    }

    /// Show a text string (Tj), encoded for WinAnsiEncoding fonts
    pub fn show_text(&mut self, text: &str) -> &mut Self {
        let encoded = encode_win_ansi(text);
        self.data.extend_from_slice(&escape_string(&encoded));
        self.write_line(" Tj");
        self
    }

    /// Paint an XObject resource (Do)
    pub fn draw_xobject(&mut self, name: &str) -> &mut Self {
        let _ = writeln!(self.data, "/{} Do", name);
        self
    }

    fn write_numbers(&mut self, numbers: &[f64], op: &str) {
        for n in numbers {
            self.data.extend_from_slice(format_real(*n).as_bytes());
            self.data.push(b' ');
        }
        self.write_line(op);
    }

    fn write_line(&mut self, s: &str) {
        self.data.extend_from_slice(s.as_bytes());
        self.data.push(b'\n');
    }
}

/// Map text to single-byte WinAnsi codes.
///
/// Latin-1 characters map to their own code; the rupee sign and anything else
/// outside the font's repertoire becomes `?`, with one warning per string.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    let (encoded, replaced) = encode_win_ansi_counted(text);
    if replaced > 0 {
        tracing::warn!(
            replaced,
            text,
            "characters outside WinAnsi printed as '?'"
        );
    }
    encoded
}

/// Encode and report how many characters had no WinAnsi code
pub fn encode_win_ansi_counted(text: &str) -> (Vec<u8>, usize) {
    let mut replaced = 0;
    let encoded = text
        .chars()
        .map(|ch| {
            win_ansi_code(ch).unwrap_or_else(|| {
                replaced += 1;
                b'?'
            })
        })
        .collect::<Vec<u8>>();
    (encoded, replaced)
}

fn win_ansi_code(ch: char) -> Option<u8> {
    let code = match ch as u32 {
        code @ 0x20..=0x7E => code as u8,
        code @ 0xA0..=0xFF => code as u8,
        0x2013 => 0x96, // en dash
        0x2014 => 0x97, // em dash
        0x2018 => 0x91,
        0x2019 => 0x92,
        0x201C => 0x93,
        0x201D => 0x94,
        0x2022 => 0x95, // bullet
        0x2026 => 0x85, // ellipsis
        0x20AC => 0x80, // euro
        _ => return None,
    };
    Some(code)
}
