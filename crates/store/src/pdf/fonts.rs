//! PDF Font Handling
//!
//! Documents only use the standard Type 1 text fonts, which every viewer
//! provides, so nothing is embedded. The [`FontManager`] hands out resource
//! names (`F1`, `F2`, ...) in first-use order.

use super::objects::{PdfDictionary, PdfObject};
use std::collections::HashMap;

/// Standard PDF text fonts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StandardFont {
    TimesRoman,
    TimesBold,
    TimesItalic,
    TimesBoldItalic,
    Helvetica,
    HelveticaBold,
    HelveticaOblique,
    HelveticaBoldOblique,
    Courier,
    CourierBold,
    CourierOblique,
    CourierBoldOblique,
}

impl StandardFont {
    /// Base font name in the font dictionary
    pub fn pdf_name(&self) -> &'static str {
        match self {
            StandardFont::TimesRoman => "Times-Roman",
            StandardFont::TimesBold => "Times-Bold",
            StandardFont::TimesItalic => "Times-Italic",
            StandardFont::TimesBoldItalic => "Times-BoldItalic",
            StandardFont::Helvetica => "Helvetica",
            StandardFont::HelveticaBold => "Helvetica-Bold",
            StandardFont::HelveticaOblique => "Helvetica-Oblique",
            StandardFont::HelveticaBoldOblique => "Helvetica-BoldOblique",
            StandardFont::Courier => "Courier",
            StandardFont::CourierBold => "Courier-Bold",
            StandardFont::CourierOblique => "Courier-Oblique",
            StandardFont::CourierBoldOblique => "Courier-BoldOblique",
        }
    }

    /// Match a family name to a standard font; unknown families use Helvetica
    pub fn resolve(family: &str, bold: bool, italic: bool) -> Self {
        let family = family.to_lowercase();
        if family.contains("times") || family == "serif" {
            match (bold, italic) {
                (false, false) => StandardFont::TimesRoman,
                (true, false) => StandardFont::TimesBold,
                (false, true) => StandardFont::TimesItalic,
                (true, true) => StandardFont::TimesBoldItalic,
            }
        } else if family.contains("courier") || family.contains("mono") {
            match (bold, italic) {
                (false, false) => StandardFont::Courier,
                (true, false) => StandardFont::CourierBold,
                (false, true) => StandardFont::CourierOblique,
                (true, true) => StandardFont::CourierBoldOblique,
            }
        } else {
            match (bold, italic) {
                (false, false) => StandardFont::Helvetica,
                (true, false) => StandardFont::HelveticaBold,
                (false, true) => StandardFont::HelveticaOblique,
                (true, true) => StandardFont::HelveticaBoldOblique,
            }
        }
    }

    /// Font dictionary for this font
    pub fn to_dictionary(&self) -> PdfDictionary {
        let mut dict = PdfDictionary::typed("Font");
        dict.insert("Subtype", PdfObject::name("Type1"));
        dict.insert("BaseFont", PdfObject::name(self.pdf_name()));
        dict.insert("Encoding", PdfObject::name("WinAnsiEncoding"));
        dict
    }
}

/// A font used by the document
#[derive(Debug, Clone, PartialEq)]
pub struct FontInfo {
    /// Resource name (e.g. "F1")
    pub name: String,
    pub standard_font: StandardFont,
}

/// Assigns resource names to fonts as pages use them
#[derive(Debug, Default)]
pub struct FontManager {
    fonts: Vec<FontInfo>,
    by_font: HashMap<StandardFont, usize>,
}

impl FontManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resource name for a font request, registering it on first use
    pub fn resource_name(&mut self, family: &str, bold: bool, italic: bool) -> &str {
        let font = StandardFont::resolve(family, bold, italic);
        let index = match self.by_font.get(&font) {
            Some(&index) => index,
            None => {
                let index = self.fonts.len();
                self.fonts.push(FontInfo {
                    name: format!("F{}", index + 1),
                    standard_font: font,
                });
                self.by_font.insert(font, index);
                index
            }
        };
        &self.fonts[index].name
    }

    /// Fonts in registration order
    pub fn fonts(&self) -> &[FontInfo] {
        &self.fonts
    }
}
