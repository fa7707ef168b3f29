//! The typed view over a project file.

use crate::{diagnostics::Diagnostics, directive::DirectiveMap};
use anyhow::{bail, ensure, Result};
use bff_common::{charset_by_name, BffHeader, Charset, Color, RowWidth};
use std::path::{Path, PathBuf};

/// The extension of glyph source files.
pub const FONT_DATA_EXTENSION: &str = "rbf";
pub const DEFAULT_FONT_NAME: &str = "FONT";

/// A fully resolved and validated project.
#[derive(Clone, Debug)]
pub struct ProjectConfig {
    pub charset: &'static dyn Charset,
    pub font_width: RowWidth,
    pub font_height: u8,
    pub default_color: Color,
    pub font_name: String,
    pub font_data_path: PathBuf,
}
impl ProjectConfig {
    /// Resolves the project configuration from the directives of the project file at
    /// `project_path`.
    ///
    /// Relative font data paths are resolved against `working_dir`. If no file exists there, the
    /// directory containing the project file is tried as well.
    pub fn resolve(
        directives: &DirectiveMap,
        project_path: &Path,
        working_dir: &Path,
        diag: &mut Diagnostics,
    ) -> Result<ProjectConfig> {
        let font_data_path = resolve_font_data_path(directives, project_path, working_dir, diag)?;
        let charset = resolve_charset(directives, diag)?;
        let font_width = resolve_font_width(directives, diag)?;
        let font_height = resolve_u8(directives, "FONT_HEIGHT")?;
        diag.info(format!("FONT_HEIGHT:{font_height}"));

        let default_color = Color::new(
            resolve_color(directives, "DEFAULT_RGB_R", diag),
            resolve_color(directives, "DEFAULT_RGB_G", diag),
            resolve_color(directives, "DEFAULT_RGB_B", diag),
        );
        let font_name = resolve_font_name(directives, diag);

        Ok(ProjectConfig {
            charset,
            font_width,
            font_height,
            default_color,
            font_name,
            font_data_path,
        })
    }

    /// Returns the header for a font compiled with this configuration.
    pub fn header(&self, glyph_count: u8) -> BffHeader {
        BffHeader {
            charset_tag: self.charset.tag(),
            width: self.font_width,
            height: self.font_height,
            glyph_count,
            color: self.default_color,
            name: self.font_name.clone(),
        }
    }
}

fn resolve_font_data_path(
    directives: &DirectiveMap,
    project_path: &Path,
    working_dir: &Path,
    diag: &mut Diagnostics,
) -> Result<PathBuf> {
    let file = match directives.get("FONT_FILE").filter(|x| !x.is_empty()) {
        Some(file) => PathBuf::from(file),
        None => {
            let Some(stem) = project_path.file_stem() else {
                bail!("Project path {} has no file name.", project_path.display());
            };
            let mut file_name = stem.to_os_string();
            file_name.push(".");
            file_name.push(FONT_DATA_EXTENSION);
            let file = PathBuf::from(file_name);
            diag.warn(None, format!("FONT_FILE is not set. Trying {}", file.display()));
            file
        }
    };

    let path = working_dir.join(&file);
    if path.is_file() {
        diag.info(format!("FONT_FILE:{}", path.display()));
        return Ok(path);
    }

    let project_dir = project_path.parent().unwrap_or(Path::new(""));
    let fallback = project_dir.join(&file);
    ensure!(
        file.is_relative() && fallback != path && fallback.is_file(),
        "Font file {} not found.",
        path.display(),
    );
    diag.warn(
        None,
        format!(
            "Font file {} not found. Using {} next to the project file.",
            path.display(),
            fallback.display()
        ),
    );
    diag.info(format!("FONT_FILE:{}", fallback.display()));
    Ok(fallback)
}

fn resolve_charset(
    directives: &DirectiveMap,
    diag: &mut Diagnostics,
) -> Result<&'static dyn Charset> {
    let Some(name) = directives.get("CHARSET") else {
        bail!("Font parameter CHARSET not found.");
    };
    let name = name.to_uppercase();
    let Some(charset) = charset_by_name(&name) else {
        bail!("Unsupported/unimplemented CHARSET found: {name} is not supported.");
    };
    diag.info(format!("CHARSET:{}", charset.name()));
    Ok(charset)
}

fn resolve_u8(directives: &DirectiveMap, key: &str) -> Result<u8> {
    let Some(value) = directives.get(key) else {
        bail!("Font parameter {key} not found.");
    };
    match value.parse::<u8>() {
        Ok(x) => Ok(x),
        Err(_) => bail!("Invalid {key} found: {value} is not a valid UInt8 value."),
    }
}

fn resolve_font_width(directives: &DirectiveMap, diag: &mut Diagnostics) -> Result<RowWidth> {
    let bits = resolve_u8(directives, "FONT_WIDTH")?;
    let Some(width) = RowWidth::from_bits(bits) else {
        bail!("Unsupported/unimplemented FONT_WIDTH found: {bits} is not supported.");
    };
    diag.info(format!("FONT_WIDTH:{width}"));
    Ok(width)
}

fn resolve_color(directives: &DirectiveMap, key: &str, diag: &mut Diagnostics) -> u8 {
    match directives.get(key) {
        Some(value) => match value.parse::<u8>() {
            Ok(x) => {
                diag.info(format!("{key}:{x}"));
                x
            }
            Err(_) => {
                diag.warn(
                    None,
                    format!(
                        "Invalid {key} found: {value} is not a valid UInt8 value. \
                         Set to default value 255."
                    ),
                );
                255
            }
        },
        None => {
            diag.info(format!("{key} is not set. Set to default value 255."));
            255
        }
    }
}

fn resolve_font_name(directives: &DirectiveMap, diag: &mut Diagnostics) -> String {
    let name = match directives.get("FONT_NAME") {
        Some(name) => name,
        None => {
            diag.info(format!(
                "FONT_NAME is not set. Set to default value \"{DEFAULT_FONT_NAME}\"."
            ));
            DEFAULT_FONT_NAME
        }
    };

    // the name is stored as NUL-terminated ASCII
    let encoded: String = name
        .chars()
        .map(|x| if x.is_ascii() && x != '\0' { x } else { '?' })
        .collect();
    if encoded != name {
        diag.warn(
            None,
            format!("FONT_NAME {name:?} is not ASCII. It will be stored as {encoded:?}."),
        );
    }
    diag.info(format!("FONT_NAME:{encoded}"));
    encoded
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Level;
    use std::fs;
    use tempfile::{tempdir, TempDir};

    /// Creates a scratch directory containing an empty `font.rbf`.
    fn scratch_dir() -> TempDir {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("font.rbf"), "").unwrap();
        dir
    }

    fn resolve(dir: &Path, text: &str) -> (Result<ProjectConfig>, Diagnostics) {
        let mut diag = Diagnostics::new();
        let directives = DirectiveMap::parse(text, &mut diag);
        let config = ProjectConfig::resolve(&directives, &dir.join("font.bfp"), dir, &mut diag);
        (config, diag)
    }

    #[test]
    fn resolve_full() {
        let dir = scratch_dir();
        let dir = dir.path();
        let (config, diag) = resolve(
            dir,
            "FONT_FILE=font.rbf\nCHARSET=ascii\nFONT_WIDTH=16\nFONT_HEIGHT=12\n\
             DEFAULT_RGB_R=1\nDEFAULT_RGB_G=2\nDEFAULT_RGB_B=3\nFONT_NAME=Foo\nUNUSED=1\n",
        );
        let config = config.unwrap();
        assert_eq!(config.charset.name(), "ASCII");
        assert_eq!(config.font_width, RowWidth::W16);
        assert_eq!(config.font_height, 12);
        assert_eq!(config.default_color, Color::new(1, 2, 3));
        assert_eq!(config.font_name, "Foo");
        assert_eq!(config.font_data_path, dir.join("font.rbf"));
        assert_eq!(diag.problem_count(), 0);

        let header = config.header(5);
        assert_eq!(header.glyph_count, 5);
        assert_eq!(header.charset_tag, 0);
    }

    #[test]
    fn defaults() {
        let dir = scratch_dir();
        let dir = dir.path();
        let (config, diag) =
            resolve(dir, "CHARSET=ASCII\nFONT_WIDTH=8\nFONT_HEIGHT=8\nDEFAULT_RGB_R=10");
        let config = config.unwrap();

        // the font file is derived from the project file name
        assert_eq!(config.font_data_path, dir.join("font.rbf"));
        assert_eq!(config.default_color, Color::new(10, 255, 255));
        assert_eq!(config.font_name, "FONT");
        assert_eq!(diag.at_level(Level::Warning).count(), 1);
    }

    #[test]
    fn invalid_color_falls_back() {
        let dir = scratch_dir();
        let dir = dir.path();
        let (config, diag) = resolve(
            dir,
            "CHARSET=ASCII\nFONT_WIDTH=8\nFONT_HEIGHT=8\nFONT_FILE=font.rbf\n\
             DEFAULT_RGB_R=256\nDEFAULT_RGB_G=red\nDEFAULT_RGB_B=0",
        );
        assert_eq!(config.unwrap().default_color, Color::new(255, 255, 0));
        assert_eq!(diag.at_level(Level::Warning).count(), 2);
    }

    #[test]
    fn non_ascii_name() {
        let dir = scratch_dir();
        let dir = dir.path();
        let (config, diag) = resolve(
            dir,
            "CHARSET=ASCII\nFONT_WIDTH=8\nFONT_HEIGHT=8\nFONT_FILE=font.rbf\nFONT_NAME=Fönt",
        );
        assert_eq!(config.unwrap().font_name, "F?nt");
        assert_eq!(diag.at_level(Level::Warning).count(), 1);
    }

    #[test]
    fn fatal_conditions() {
        let dir = scratch_dir();
        let dir = dir.path();
        let base = "FONT_FILE=font.rbf\n";
        for text in [
            "CHARSET=ASCII\nFONT_WIDTH=8\nFONT_HEIGHT=8\nFONT_FILE=missing.rbf",
            "FONT_WIDTH=8\nFONT_HEIGHT=8",
            "CHARSET=UTF8\nFONT_WIDTH=8\nFONT_HEIGHT=8",
            "CHARSET=ASCII\nFONT_HEIGHT=8",
            "CHARSET=ASCII\nFONT_WIDTH=12\nFONT_HEIGHT=8",
            "CHARSET=ASCII\nFONT_WIDTH=256\nFONT_HEIGHT=8",
            "CHARSET=ASCII\nFONT_WIDTH=eight\nFONT_HEIGHT=8",
            "CHARSET=ASCII\nFONT_WIDTH=8",
            "CHARSET=ASCII\nFONT_WIDTH=8\nFONT_HEIGHT=-1",
            "CHARSET=ASCII\nFONT_WIDTH=8\nFONT_HEIGHT=300",
        ] {
            let (config, _) = resolve(dir, &format!("{text}\n{base}"));
            assert!(config.is_err(), "{text:?} should not resolve");
        }
    }

    #[test]
    fn font_file_checked_first() {
        let dir = scratch_dir();
        let dir = dir.path();
        let (config, _) = resolve(dir, "FONT_FILE=missing.rbf\nCHARSET=UTF8");
        let message = config.unwrap_err().to_string();
        assert!(message.contains("missing.rbf"), "{message}");
    }

    #[test]
    fn font_file_relative_to_working_dir() {
        let working_dir = tempdir().unwrap();
        let fonts = working_dir.path().join("fonts");
        fs::create_dir(&fonts).unwrap();
        fs::write(fonts.join("g.rbf"), "").unwrap();

        let mut diag = Diagnostics::new();
        let directives = DirectiveMap::parse(
            "FONT_FILE=fonts/g.rbf\nCHARSET=ASCII\nFONT_WIDTH=8\nFONT_HEIGHT=8",
            &mut diag,
        );
        let config = ProjectConfig::resolve(
            &directives,
            &fonts.join("x.bfp"),
            working_dir.path(),
            &mut diag,
        )
        .unwrap();
        assert_eq!(config.font_data_path, fonts.join("g.rbf"));
        assert_eq!(diag.problem_count(), 0);
    }

    #[test]
    fn font_file_falls_back_to_project_dir() {
        let working_dir = tempdir().unwrap();
        let project_dir = scratch_dir();

        let mut diag = Diagnostics::new();
        let directives =
            DirectiveMap::parse("CHARSET=ASCII\nFONT_WIDTH=8\nFONT_HEIGHT=8", &mut diag);
        let config = ProjectConfig::resolve(
            &directives,
            &project_dir.path().join("font.bfp"),
            working_dir.path(),
            &mut diag,
        )
        .unwrap();
        assert_eq!(config.font_data_path, project_dir.path().join("font.rbf"));

        // FONT_FILE not set, then not found in the working directory
        assert_eq!(diag.at_level(Level::Warning).count(), 2);
    }
}
