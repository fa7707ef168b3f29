use crate::format::{BffHeader, RowWidth, BFF_MAGIC, BFF_VERSION};
use anyhow::{ensure, Result};
use byteorder::{WriteBytesExt, LE};

/// A low-level encoder for BFF headers and glyph records.
///
/// The writer does not track the relationship between the header and the records written after
/// it. Callers that do not know the glyph count up front should encode the records into a
/// separate writer and [`append`](`BffWriter::append`) them after the header.
#[derive(Clone, Debug, Default)]
pub struct BffWriter {
    data: Vec<u8>,
}
impl BffWriter {
    pub fn new() -> Self {
        BffWriter { data: Vec::new() }
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }
    pub fn len(&self) -> usize {
        self.data.len()
    }
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn write_header(&mut self, header: &BffHeader) -> Result<()> {
        ensure!(header.name.is_ascii(), "Font name {:?} is not ASCII.", header.name);
        ensure!(!header.name.contains('\0'), "Font name {:?} contains a NUL.", header.name);

        self.data.extend_from_slice(&BFF_MAGIC);
        self.data.write_u8(BFF_VERSION)?;
        self.data.write_u8(header.charset_tag)?;
        self.data.write_u8(header.width.bits())?;
        self.data.write_u8(header.height)?;
        self.data.write_u8(header.glyph_count)?;
        self.data.write_u8(header.color.r)?;
        self.data.write_u8(header.color.g)?;
        self.data.write_u8(header.color.b)?;
        self.data.extend_from_slice(header.name.as_bytes());
        self.data.write_u8(0)?;
        Ok(())
    }

    pub fn write_glyph(&mut self, width: RowWidth, index: u8, rows: &[u64]) -> Result<()> {
        self.data.write_u8(index)?;
        for &row in rows {
            ensure!(
                row <= width.max_value(),
                "Row value {row:#b} does not fit in {width} bits (glyph index {index:#04x})."
            );
            match width {
                RowWidth::W8 => self.data.write_u8(row as u8)?,
                RowWidth::W16 => self.data.write_u16::<LE>(row as u16)?,
                RowWidth::W32 => self.data.write_u32::<LE>(row as u32)?,
                RowWidth::W64 => self.data.write_u64::<LE>(row)?,
            }
        }
        Ok(())
    }

    pub fn append(&mut self, other: &BffWriter) {
        self.data.extend_from_slice(&other.data);
    }
}
