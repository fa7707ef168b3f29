//! A compiler for bitmap fonts in the BFF format.
//!
//! A font project consists of a project file of `KEY=VALUE` directives describing the font, and
//! a glyph source file containing the bitmap of each character as binary literals:
//!
//! ```text
//! // terminal.bfp
//! CHARSET=ASCII
//! FONT_WIDTH=8
//! FONT_HEIGHT=2
//! FONT_FILE=terminal.rbf
//! FONT_NAME=Terminal
//!
//! // terminal.rbf
//! A=0b00011000,0b00100100
//! ```
//!
//! Compilation goes through [`DirectiveMap`](`directive::DirectiveMap`),
//! [`ProjectConfig`](`project::ProjectConfig`), [`GlyphParser`](`glyph::GlyphParser`) and finally
//! [`encode_font`](`encoder::encode_font`). [`compile`] drives the entire process for a project
//! on disk.

mod compile;
mod context;

pub mod diagnostics;
pub mod directive;
pub mod encoder;
pub mod glyph;
pub mod project;

pub use compile::{build_font, compile, compile_with, CompileConfig, CompileReport};
pub use context::{CompileContext, UsedIndices};
