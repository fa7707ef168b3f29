use crate::{
    context::CompileContext, directive::DirectiveMap, encoder::encode_font, glyph::GlyphParser,
    project::ProjectConfig,
};
use anyhow::{bail, Context, Result};
use derive_setters::Setters;
use log::{debug, info};
use std::{
    fs,
    io::Write,
    path::{Path, PathBuf},
    time::{Duration, Instant},
};
use tempfile::NamedTempFile;

/// The extension of compiled font files.
pub const OUTPUT_EXTENSION: &str = "bff";

#[derive(Setters, Clone, Debug)]
#[setters(strip_option)]
pub struct CompileConfig {
    #[setters(skip)]
    project: PathBuf,
    /// Where to write the compiled font. Defaults to `<project name>.bff` in the working
    /// directory.
    #[setters(into)]
    output: Option<PathBuf>,
    /// The directory relative paths are resolved against. Defaults to the process's working
    /// directory.
    #[setters(into)]
    working_dir: Option<PathBuf>,
}
impl CompileConfig {
    pub fn new(project: impl Into<PathBuf>) -> Self {
        CompileConfig { project: project.into(), output: None, working_dir: None }
    }

    fn base_dir(&self) -> &Path {
        self.working_dir.as_deref().unwrap_or(Path::new(""))
    }

    pub fn output_path(&self) -> Result<PathBuf> {
        if let Some(output) = &self.output {
            return Ok(self.base_dir().join(output));
        }
        let Some(stem) = self.project.file_stem() else {
            bail!("Project path {} has no file name.", self.project.display());
        };
        let mut file_name = stem.to_os_string();
        file_name.push(".");
        file_name.push(OUTPUT_EXTENSION);
        Ok(self.base_dir().join(file_name))
    }
}

/// The results of a successful compilation.
#[derive(Clone, Debug)]
pub struct CompileReport {
    pub output: PathBuf,
    pub font_name: String,
    /// The compiled characters, in the order they were defined.
    pub characters: Vec<char>,
    pub size: usize,
    pub elapsed: Duration,
}
impl CompileReport {
    /// Prints statistics about the compilation using the `log` crate.
    pub fn print_statistics(&self) {
        let characters: Vec<_> = self.characters.iter().map(|x| x.to_string()).collect();

        info!("");
        info!("==================================================================");
        info!("Compilation succeeded");
        info!("==================================================================");
        info!("Output         : {}", self.output.display());
        info!("Font Name      : {}", self.font_name);
        info!("File Size      : {} bytes", self.size);
        info!("Time Elapsed   : {:.3} ms", self.elapsed.as_secs_f64() * 1000.0);
        info!("Glyph Count    : {}", self.characters.len());
        info!("Characters     : {}", characters.join(", "));
        info!("==================================================================");
        info!("");
    }
}

/// Compiles glyph source text into a BFF image using an already resolved project.
pub fn build_font(
    config: &ProjectConfig,
    font_data: &str,
    ctx: &mut CompileContext,
) -> Result<Vec<u8>> {
    encode_font(config, GlyphParser::new(font_data, config, ctx))
}

/// Compiles a project, recording diagnostics in a fresh context.
pub fn compile(config: &CompileConfig) -> Result<CompileReport> {
    compile_with(config, &mut CompileContext::new())
}

/// Compiles a project, recording diagnostics in the given context.
///
/// Any fatal error is also recorded in the context's diagnostics. The output file is only
/// replaced once the complete image has been built.
pub fn compile_with(config: &CompileConfig, ctx: &mut CompileContext) -> Result<CompileReport> {
    let result = compile_inner(config, ctx);
    if let Err(e) = &result {
        ctx.diagnostics.fatal(format!("{e:#}"));
    }
    result
}

fn compile_inner(config: &CompileConfig, ctx: &mut CompileContext) -> Result<CompileReport> {
    info!("Compiling project '{}'...", config.project.display());
    let project_path = config.base_dir().join(&config.project);
    let project_text = read_text(&project_path)?;
    let directives = DirectiveMap::parse(&project_text, &mut ctx.diagnostics);
    let project = ProjectConfig::resolve(
        &directives,
        &project_path,
        config.base_dir(),
        &mut ctx.diagnostics,
    )?;

    let output = config.output_path()?;
    if output.exists() {
        ctx.diagnostics.warn(
            None,
            format!("File {} already exists. The file will be overwritten.", output.display()),
        );
    }

    let font_data = read_text(&project.font_data_path)?;
    let start = Instant::now();
    let image = build_font(&project, &font_data, ctx)?;
    let elapsed = start.elapsed();

    write_atomic(&output, &image)?;

    let characters = ctx
        .used_indices
        .as_slice()
        .iter()
        .map(|x| project.charset.decode(*x).unwrap_or('?'))
        .collect();
    Ok(CompileReport {
        output,
        font_name: project.font_name,
        characters,
        size: image.len(),
        elapsed,
    })
}

/// Reads a text file, dropping a leading byte order mark.
fn read_text(path: &Path) -> Result<String> {
    let data = fs::read(path).with_context(|| format!("Could not read {}", path.display()))?;
    let text = String::from_utf8_lossy(&data);
    Ok(text.strip_prefix('\u{FEFF}').unwrap_or(&text).to_string())
}

/// Writes the data to a temporary file next to the target, then moves it into place.
fn write_atomic(path: &Path, data: &[u8]) -> Result<()> {
    let dir = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir)
        .with_context(|| format!("Could not create a temporary file in {}", dir.display()))?;
    debug!("Writing {} bytes to '{}'", data.len(), tmp.path().display());
    tmp.write_all(data)?;
    tmp.as_file().sync_all()?;
    tmp.persist(path)
        .with_context(|| format!("Could not write {}", path.display()))?;
    Ok(())
}
