//! Parser for glyph source (`.rbf`) files.
//!
//! Each data line has the form `<char>=<row>,<row>,...`, where every row is a binary literal
//! with an optional `0b` prefix and exactly one digit per pixel. The most significant bit is the
//! left-most pixel.

use crate::{context::CompileContext, project::ProjectConfig};
use anyhow::{bail, ensure, Context, Result};
use bff_common::{Charset, RowWidth};
use std::{iter::Enumerate, str::Lines};

/// A single parsed glyph.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct GlyphRecord {
    pub ch: char,
    pub index: u8,
    pub rows: Vec<u64>,
}

/// An iterator over the glyphs defined in a glyph source file.
///
/// Recoverable problems are reported to the compilation context and the offending line is
/// skipped. The first fatal problem is returned as an error, after which the iterator is
/// exhausted. Accepted glyph indices are recorded in the context as they are parsed.
pub struct GlyphParser<'a> {
    lines: Enumerate<Lines<'a>>,
    ctx: &'a mut CompileContext,
    charset: &'static dyn Charset,
    width: RowWidth,
    height: u8,
    finished: bool,
}
impl<'a> GlyphParser<'a> {
    pub fn new(source: &'a str, config: &ProjectConfig, ctx: &'a mut CompileContext) -> Self {
        GlyphParser {
            lines: source.lines().enumerate(),
            ctx,
            charset: config.charset,
            width: config.font_width,
            height: config.font_height,
            finished: false,
        }
    }

    fn parse_line(&mut self, line_no: usize, line: &str) -> Result<Option<GlyphRecord>> {
        if line.is_empty() || line.starts_with("//") {
            return Ok(None);
        }

        let diag = &mut self.ctx.diagnostics;
        let ch = match line.chars().next() {
            Some(ch) => ch,
            None => return Ok(None),
        };
        let Some(index) = self.charset.encode(ch) else {
            diag.warn(
                Some(line_no),
                format!(
                    "Character {ch:?} at line {line_no} cannot be encoded in {}. Skipping.",
                    self.charset.name()
                ),
            );
            return Ok(None);
        };
        if self.ctx.used_indices.contains(index) {
            diag.warn(Some(line_no), format!("Glyph for {ch} is already defined."));
            return Ok(None);
        }

        // a leading `=` is the glyph character itself
        let split = match line.find('=') {
            Some(0) => 1,
            Some(x) => x,
            None => {
                diag.warn(
                    Some(line_no),
                    format!("Syntax Error at line {line_no}: {line} is not a valid format."),
                );
                return Ok(None);
            }
        };
        diag.debug(Some(line_no), format!("Compiling for char {ch}..."));

        let mut rows = Vec::new();
        for token in line.get(split + 1..).unwrap_or("").split(',') {
            rows.push(self.parse_row(line_no, token)?);
        }
        ensure!(
            rows.len() == self.height as usize,
            "Binary is missing for {ch} at line {line_no}, expected {} but got {}",
            self.height,
            rows.len(),
        );

        self.ctx.used_indices.insert(index);
        Ok(Some(GlyphRecord { ch, index, rows }))
    }

    fn parse_row(&self, line_no: usize, token: &str) -> Result<u64> {
        let token = token.trim();
        let digits = token.strip_prefix("0b").unwrap_or(token);

        let len = digits.chars().count();
        ensure!(
            len == self.width.bits() as usize,
            "Font width mismatch at line {line_no}: expected {}, got {len}",
            self.width,
        );
        if !digits.chars().all(|x| x == '0' || x == '1') {
            bail!("Invalid value detected at line {line_no}: {token} is invalid value.");
        }
        u64::from_str_radix(digits, 2)
            .with_context(|| format!("Invalid value detected at line {line_no}: {token}"))
    }
}
impl<'a> Iterator for GlyphParser<'a> {
    type Item = Result<GlyphRecord>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.finished {
            return None;
        }
        while let Some((line_no, line)) = self.lines.next() {
            match self.parse_line(line_no + 1, line) {
                Ok(Some(glyph)) => return Some(Ok(glyph)),
                Ok(None) => {}
                Err(e) => {
                    self.finished = true;
                    return Some(Err(e));
                }
            }
        }
        self.finished = true;
        None
    }
}
