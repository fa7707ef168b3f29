use std::fmt;

/// The magic number found at the start of every BFF file.
pub const BFF_MAGIC: [u8; 2] = [0xBF, 0xFF];
/// The only format version currently produced.
pub const BFF_VERSION: u8 = 1;

pub const GLYPH_COUNT_OFFSET: usize = 6;
pub const FONT_NAME_OFFSET: usize = 10;

/// The largest number of glyphs that fits in the glyph count field.
pub const MAX_GLYPHS: usize = u8::MAX as usize;

/// The width of a glyph row, which also selects how many bytes each row occupies on disk.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum RowWidth {
    W8,
    W16,
    W32,
    W64,
}
impl RowWidth {
    pub const ALL: [RowWidth; 4] = [RowWidth::W8, RowWidth::W16, RowWidth::W32, RowWidth::W64];

    /// Returns the row width for a given number of bits, if it is one of the supported widths.
    pub fn from_bits(bits: u8) -> Option<RowWidth> {
        Self::ALL.iter().copied().find(|x| x.bits() == bits)
    }

    pub const fn bits(self) -> u8 {
        match self {
            RowWidth::W8 => 8,
            RowWidth::W16 => 16,
            RowWidth::W32 => 32,
            RowWidth::W64 => 64,
        }
    }

    /// The number of bytes each row takes in a glyph record.
    pub const fn bytes(self) -> usize {
        self.bits() as usize / 8
    }

    /// The largest row value representable in this width.
    pub const fn max_value(self) -> u64 {
        u64::MAX >> (64 - self.bits() as u32)
    }
}
impl fmt::Display for RowWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bits())
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}
impl Color {
    pub const WHITE: Color = Color { r: 255, g: 255, b: 255 };

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b }
    }
}
impl Default for Color {
    fn default() -> Self {
        Color::WHITE
    }
}

/// The header fields of a BFF file.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BffHeader {
    pub charset_tag: u8,
    pub width: RowWidth,
    pub height: u8,
    pub glyph_count: u8,
    pub color: Color,
    pub name: String,
}
impl BffHeader {
    /// The size of a single glyph record described by this header.
    pub fn glyph_record_len(&self) -> usize {
        1 + self.height as usize * self.width.bytes()
    }

    /// The size of the encoded header, including the name terminator.
    pub fn encoded_len(&self) -> usize {
        FONT_NAME_OFFSET + self.name.len() + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_widths() {
        assert_eq!(RowWidth::from_bits(8), Some(RowWidth::W8));
        assert_eq!(RowWidth::from_bits(64), Some(RowWidth::W64));
        assert_eq!(RowWidth::from_bits(0), None);
        assert_eq!(RowWidth::from_bits(12), None);
        assert_eq!(RowWidth::from_bits(128), None);

        assert_eq!(RowWidth::W16.bytes(), 2);
        assert_eq!(RowWidth::W8.max_value(), 0xFF);
        assert_eq!(RowWidth::W32.max_value(), 0xFFFF_FFFF);
        assert_eq!(RowWidth::W64.max_value(), u64::MAX);
    }

    #[test]
    fn header_lengths() {
        let header = BffHeader {
            charset_tag: 0,
            width: RowWidth::W16,
            height: 12,
            glyph_count: 0,
            color: Color::default(),
            name: "Foo".to_string(),
        };
        assert_eq!(header.encoded_len(), 14);
        assert_eq!(header.glyph_record_len(), 25);
    }
}
