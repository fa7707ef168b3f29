//! Structures and definitions for the BFF bitmap font format, shared between the compiler and
//! code that consumes compiled fonts.
//!
//! A BFF file consists of a small fixed header followed by a NUL-terminated font name and a
//! sequence of glyph records. All multi-byte values are little-endian.
//!
//! | Offset | Field                              | Size     |
//! |--------|------------------------------------|----------|
//! | 0      | magic `0xBF 0xFF`                  | 2 bytes  |
//! | 2      | format version                     | 1 byte   |
//! | 3      | charset tag                        | 1 byte   |
//! | 4      | font width                         | 1 byte   |
//! | 5      | font height                        | 1 byte   |
//! | 6      | glyph count                        | 1 byte   |
//! | 7      | default color (r, g, b)            | 3 bytes  |
//! | 10     | font name, ASCII, NUL-terminated   | variable |
//!
//! Each glyph record is an index byte followed by `height` rows of `width / 8` bytes each.

pub mod charset;
mod encoder;
mod font;
mod format;

pub use charset::{charset_by_name, charset_by_tag, Charset};
pub use encoder::BffWriter;
pub use font::{BffFont, BffGlyph};
pub use format::*;
