//! Label fonts

use std::fmt;

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, dictionary};
use ttf_parser::Face;

use crate::labels::errors::LabelError;

/// First character code covered by the width table.
pub const FIRST_CHAR: u8 = 32;

/// Last character code covered by the width table.
pub const LAST_CHAR: u8 = 255;

const STANDARD_FONT: &str = "Helvetica-Bold";
const EMBEDDED_FONT: &str = "KaratLabelBold";

/// Font the label text is drawn with.
#[derive(Debug, Clone, Default)]
pub enum LabelFont {
    /// The standard Helvetica Bold face, not embedded.
    #[default]
    Standard,

    /// A TrueType font embedded into every label.
    TrueType(TrueTypeFont),
}

impl LabelFont {
    /// Parse and wrap a TrueType font.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::Font`] if the bytes are not a TrueType font.
    pub fn true_type(bytes: Vec<u8>) -> Result<Self, LabelError> {
        TrueTypeFont::parse(bytes).map(LabelFont::TrueType)
    }

    /// Add the font objects to `doc` and return the font dictionary id.
    pub(crate) fn embed(&self, doc: &mut Document) -> ObjectId {
        match self {
            LabelFont::Standard => doc.add_object(dictionary! {
                "Type" => "Font",
                "Subtype" => "Type1",
                "BaseFont" => STANDARD_FONT,
                "Encoding" => "WinAnsiEncoding",
            }),
            LabelFont::TrueType(font) => font.embed(doc),
        }
    }
}

/// A parsed TrueType font and the metrics a PDF font descriptor needs.
#[derive(Clone)]
pub struct TrueTypeFont {
    bytes: Vec<u8>,
    ascent: i64,
    descent: i64,
    cap_height: i64,
    italic_angle: f32,
    bbox: [i64; 4],
    widths: Vec<i64>,
}

impl fmt::Debug for TrueTypeFont {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TrueTypeFont")
            .field("len", &self.bytes.len())
            .field("ascent", &self.ascent)
            .field("descent", &self.descent)
            .finish_non_exhaustive()
    }
}

impl TrueTypeFont {
    /// Parse the font and read its metrics, scaled to 1000 units per em.
    ///
    /// # Errors
    ///
    /// Returns [`LabelError::Font`] if the face cannot be parsed.
    pub fn parse(bytes: Vec<u8>) -> Result<Self, LabelError> {
        let face = Face::parse(&bytes, 0)?;
        let units = i64::from(face.units_per_em()).max(1);
        let scale = |value: i16| i64::from(value) * 1000 / units;

        let ascent = scale(face.ascender());
        let descent = scale(face.descender());
        let cap_height = face.capital_height().map_or(ascent, scale);
        let rect = face.global_bounding_box();

        let widths = (FIRST_CHAR..=LAST_CHAR)
            .map(|code| {
                face.glyph_index(char::from(code))
                    .and_then(|glyph| face.glyph_hor_advance(glyph))
                    .map_or(0, |advance| i64::from(advance) * 1000 / units)
            })
            .collect();

        let italic_angle = face.italic_angle();
        let bbox = [
            scale(rect.x_min),
            scale(rect.y_min),
            scale(rect.x_max),
            scale(rect.y_max),
        ];

        Ok(Self {
            bytes,
            ascent,
            descent,
            cap_height,
            italic_angle,
            bbox,
            widths,
        })
    }

    /// Advance width of a character code, in thousandths of an em.
    pub fn width(&self, code: u8) -> Option<i64> {
        let index = code.checked_sub(FIRST_CHAR)?;

        self.widths.get(usize::from(index)).copied()
    }

    fn embed(&self, doc: &mut Document) -> ObjectId {
        let length = i64::try_from(self.bytes.len()).unwrap_or(i64::MAX);

        let file_id = doc.add_object(Stream::new(
            dictionary! { "Length1" => length },
            self.bytes.clone(),
        ));

        let descriptor: Dictionary = dictionary! {
            "Type" => "FontDescriptor",
            "FontName" => EMBEDDED_FONT,
            "Flags" => 32,
            "FontBBox" => self.bbox.iter().copied().map(Object::Integer).collect::<Vec<_>>(),
            "ItalicAngle" => Object::Real(self.italic_angle),
            "Ascent" => self.ascent,
            "Descent" => self.descent,
            "CapHeight" => self.cap_height,
            "StemV" => 80,
            "FontFile2" => file_id,
        };

        let descriptor_id = doc.add_object(descriptor);

        doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "TrueType",
            "BaseFont" => EMBEDDED_FONT,
            "FirstChar" => i64::from(FIRST_CHAR),
            "LastChar" => i64::from(LAST_CHAR),
            "Widths" => self.widths.iter().copied().map(Object::Integer).collect::<Vec<_>>(),
            "FontDescriptor" => descriptor_id,
            "Encoding" => "WinAnsiEncoding",
        })
    }
}

/// Encode text for a WinAnsi font; anything it cannot show becomes `?`.
pub(crate) fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|ch| match u8::try_from(u32::from(ch)) {
            Ok(byte @ (0x20..=0x7E | 0xA0..=0xFF)) => byte,
            _ => b'?',
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_ansi_keeps_latin_1() {
        assert_eq!(win_ansi("MRP:100/-"), b"MRP:100/-");
        assert_eq!(win_ansi("café"), b"caf\xE9");
    }

    #[test]
    fn win_ansi_replaces_unsupported_characters() {
        assert_eq!(win_ansi("₹5"), b"?5");
        assert_eq!(win_ansi("a\tb"), b"a?b");
    }

    #[test]
    fn garbage_is_not_a_font() {
        assert!(matches!(
            LabelFont::true_type(b"not a font".to_vec()),
            Err(LabelError::Font(_))
        ));
    }

    #[test]
    fn standard_font_is_the_default() {
        assert!(matches!(LabelFont::default(), LabelFont::Standard));
    }

    #[test]
    fn standard_font_embeds_a_type1_dictionary() -> testresult::TestResult {
        let mut doc = Document::with_version("1.5");
        let id = LabelFont::Standard.embed(&mut doc);
        let font = doc.get_dictionary(id)?;

        assert_eq!(font.get(b"BaseFont")?.as_name()?, b"Helvetica-Bold");
        assert_eq!(font.get(b"Subtype")?.as_name()?, b"Type1");

        Ok(())
    }
}
