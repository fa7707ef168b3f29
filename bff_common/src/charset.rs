//! Mappings between source characters and glyph indices.
//!
//! New charsets are added by implementing [`Charset`] and registering the implementation in
//! [`CHARSETS`]. The encoder only ever sees the resulting tag and indices.

use std::fmt::Debug;

/// A mapping from source characters to single-byte glyph indices.
pub trait Charset: Debug + Sync {
    /// The name used to select this charset in a project file. Always upper case.
    fn name(&self) -> &'static str;

    /// The tag stored in the BFF header for this charset.
    fn tag(&self) -> u8;

    /// Returns the glyph index for a character, or `None` if it has no encoding.
    fn encode(&self, ch: char) -> Option<u8>;

    /// Returns the character a glyph index represents.
    fn decode(&self, index: u8) -> Option<char>;
}

/// 7-bit ASCII.
#[derive(Copy, Clone, Debug)]
pub struct Ascii;
impl Charset for Ascii {
    fn name(&self) -> &'static str {
        "ASCII"
    }
    fn tag(&self) -> u8 {
        0
    }
    fn encode(&self, ch: char) -> Option<u8> {
        if ch.is_ascii() {
            Some(ch as u8)
        } else {
            None
        }
    }
    fn decode(&self, index: u8) -> Option<char> {
        if index.is_ascii() {
            Some(index as char)
        } else {
            None
        }
    }
}

/// Every charset known to the format.
pub static CHARSETS: &[&dyn Charset] = &[&Ascii];

/// Looks up a charset by name. The comparison is done on the upper-cased name.
pub fn charset_by_name(name: &str) -> Option<&'static dyn Charset> {
    let name = name.to_uppercase();
    CHARSETS.iter().copied().find(|x| x.name() == name)
}

/// Looks up a charset by the tag stored in a BFF header.
pub fn charset_by_tag(tag: u8) -> Option<&'static dyn Charset> {
    CHARSETS.iter().copied().find(|x| x.tag() == tag)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup() {
        assert_eq!(charset_by_name("ASCII").map(|x| x.tag()), Some(0));
        assert_eq!(charset_by_name("ascii").map(|x| x.tag()), Some(0));
        assert_eq!(charset_by_name("AsCiI").map(|x| x.name()), Some("ASCII"));
        assert!(charset_by_name("UTF8").is_none());
        assert!(charset_by_name("").is_none());

        assert_eq!(charset_by_tag(0).map(|x| x.name()), Some("ASCII"));
        assert!(charset_by_tag(1).is_none());
    }

    #[test]
    fn ascii_mapping() {
        assert_eq!(Ascii.encode('A'), Some(0x41));
        assert_eq!(Ascii.encode('='), Some(0x3D));
        assert_eq!(Ascii.encode('\0'), Some(0));
        assert_eq!(Ascii.encode('\x7f'), Some(0x7F));
        assert_eq!(Ascii.encode('é'), None);
        assert_eq!(Ascii.encode('あ'), None);

        assert_eq!(Ascii.decode(0x41), Some('A'));
        assert_eq!(Ascii.decode(0x80), None);
    }
}
