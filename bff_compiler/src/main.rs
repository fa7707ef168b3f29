use bff_common::BffFont;
use bff_compiler::{compile, CompileConfig, CompileReport};
use clap::{CommandFactory, Parser};
use log::{debug, info, log_enabled, warn, Level};
use std::{fs, path::PathBuf, process::ExitCode};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// The project file describing the font to compile
    project: Option<PathBuf>,
}

fn print_usage(message: Option<String>) {
    if let Some(message) = message {
        eprintln!("{message}");
    }
    eprintln!("{}", Cli::command().render_usage());
}

/// Reloads the written font and prints what a consumer of the file would see.
fn print_written_font(report: &CompileReport) {
    let font = fs::read(&report.output)
        .map_err(anyhow::Error::from)
        .and_then(|data| BffFont::from_bytes(&data));
    match font {
        Ok(font) => font.print_statistics(),
        Err(e) => warn!("Could not reload {}: {e:#}", report.output.display()),
    }
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let Some(project) = cli.project else {
        print_usage(None);
        return ExitCode::FAILURE;
    };
    if !project.is_file() {
        print_usage(Some(format!("File {} not found.", project.display())));
        return ExitCode::FAILURE;
    }

    info!("Bitmap Font File Compiler v{}", env!("CARGO_PKG_VERSION"));
    match compile(&CompileConfig::new(project)) {
        Ok(report) => {
            report.print_statistics();
            if log_enabled!(Level::Debug) {
                debug!("Reloading '{}'...", report.output.display());
                print_written_font(&report);
            }
            ExitCode::SUCCESS
        }
        // the error has already been reported as a fatal diagnostic
        Err(_) => ExitCode::FAILURE,
    }
}
