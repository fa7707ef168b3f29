use crate::{glyph::GlyphRecord, project::ProjectConfig};
use anyhow::{ensure, Result};
use bff_common::{BffWriter, MAX_GLYPHS};

/// Encodes a complete BFF image.
///
/// Glyph records are encoded in arrival order into a separate buffer, so the header can be
/// written with the final glyph count before the records are appended. Any error from the
/// glyph stream aborts encoding.
pub fn encode_font(
    config: &ProjectConfig,
    glyphs: impl IntoIterator<Item = Result<GlyphRecord>>,
) -> Result<Vec<u8>> {
    let mut body = BffWriter::new();
    let mut glyph_count = 0;
    for glyph in glyphs {
        let glyph = glyph?;
        glyph_count += 1;
        ensure!(
            glyph_count <= MAX_GLYPHS,
            "Too many glyphs: a BFF file can hold at most {MAX_GLYPHS} glyphs."
        );
        ensure!(
            glyph.rows.len() == config.font_height as usize,
            "Glyph for {} has {} rows, expected {}.",
            glyph.ch,
            glyph.rows.len(),
            config.font_height,
        );
        body.write_glyph(config.font_width, glyph.index, &glyph.rows)?;
    }

    let mut image = BffWriter::new();
    image.write_header(&config.header(glyph_count as u8))?;
    image.append(&body);
    Ok(image.into_data())
}
