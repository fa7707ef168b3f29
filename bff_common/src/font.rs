use crate::{
    charset::{charset_by_tag, Charset},
    format::{BffHeader, Color, RowWidth, BFF_MAGIC, BFF_VERSION, FONT_NAME_OFFSET},
};
use anyhow::{bail, ensure, Result};
use byteorder::{ReadBytesExt, LE};
use log::info;
use std::{collections::HashSet, io::Cursor};

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BffGlyph {
    pub index: u8,
    pub rows: Vec<u64>,
}
impl BffGlyph {
    /// Returns whether the pixel at the given position is set. `x = 0` is the left-most pixel.
    pub fn pixel(&self, width: RowWidth, x: u8, y: u8) -> bool {
        match self.rows.get(y as usize) {
            Some(row) if x < width.bits() => (row >> (width.bits() - 1 - x)) & 1 != 0,
            _ => false,
        }
    }
}

/// A parsed BFF file.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct BffFont {
    pub header: BffHeader,
    pub glyphs: Vec<BffGlyph>,
}
impl BffFont {
    /// Parses and validates a BFF file.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        ensure!(data.len() > FONT_NAME_OFFSET, "File is too short to contain a BFF header.");
        ensure!(data[0..2] == BFF_MAGIC, "Incorrect BFF magic number.");

        let mut cursor = Cursor::new(data);
        cursor.set_position(2);

        let version = cursor.read_u8()?;
        ensure!(version == BFF_VERSION, "Unsupported BFF version: {version}");
        let charset_tag = cursor.read_u8()?;
        ensure!(charset_by_tag(charset_tag).is_some(), "Unknown charset tag: {charset_tag}");
        let width = cursor.read_u8()?;
        let Some(width) = RowWidth::from_bits(width) else {
            bail!("Unsupported font width: {width}");
        };
        let height = cursor.read_u8()?;
        let glyph_count = cursor.read_u8()?;
        let color = Color::new(cursor.read_u8()?, cursor.read_u8()?, cursor.read_u8()?);

        // find the name terminator
        let name_end = match data[FONT_NAME_OFFSET..].iter().position(|x| *x == 0) {
            Some(x) => FONT_NAME_OFFSET + x,
            None => bail!("Font name is not NUL-terminated."),
        };
        let name = &data[FONT_NAME_OFFSET..name_end];
        ensure!(name.is_ascii(), "Font name is not ASCII.");
        let name = String::from_utf8_lossy(name).to_string();

        let header = BffHeader { charset_tag, width, height, glyph_count, color, name };
        let expected_len = header.encoded_len() + glyph_count as usize * header.glyph_record_len();
        ensure!(
            data.len() == expected_len,
            "BFF file should be {expected_len} bytes for {glyph_count} glyphs, found {} bytes.",
            data.len(),
        );

        // parse glyph records
        cursor.set_position(header.encoded_len() as u64);
        let mut seen = HashSet::new();
        let mut glyphs = Vec::new();
        for _ in 0..glyph_count {
            let index = cursor.read_u8()?;
            ensure!(seen.insert(index), "Duplicate glyph index: {index:#04x}");

            let mut rows = Vec::new();
            for _ in 0..height {
                rows.push(match width {
                    RowWidth::W8 => cursor.read_u8()? as u64,
                    RowWidth::W16 => cursor.read_u16::<LE>()? as u64,
                    RowWidth::W32 => cursor.read_u32::<LE>()? as u64,
                    RowWidth::W64 => cursor.read_u64::<LE>()?,
                });
            }
            glyphs.push(BffGlyph { index, rows });
        }

        Ok(BffFont { header, glyphs })
    }

    pub fn charset(&self) -> &'static dyn Charset {
        // validated by `from_bytes`
        charset_by_tag(self.header.charset_tag).unwrap_or(&crate::charset::Ascii)
    }

    pub fn glyph(&self, index: u8) -> Option<&BffGlyph> {
        self.glyphs.iter().find(|x| x.index == index)
    }

    pub fn glyph_for_char(&self, ch: char) -> Option<&BffGlyph> {
        self.glyph(self.charset().encode(ch)?)
    }

    /// Prints statistics about the font using the `log` crate.
    pub fn print_statistics(&self) {
        let charset = self.charset();
        let chars: String = self
            .glyphs
            .iter()
            .map(|x| charset.decode(x.index).unwrap_or('?'))
            .collect();

        info!("");
        info!("==================================================================");
        info!("Font Statistics");
        info!("==================================================================");
        info!("Font Name      : {}", self.header.name);
        info!("Charset        : {}", charset.name());
        info!("Glyph Size     : {}x{}", self.header.width, self.header.height);
        info!("Default Color  : {:?}", self.header.color);
        info!("Glyph Count    : {}", self.glyphs.len());
        info!("Characters     : {chars}");
        info!("==================================================================");
        info!("");
    }
}
