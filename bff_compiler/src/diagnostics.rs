//! Operator-facing diagnostics.
//!
//! Every diagnostic is forwarded to the `log` crate as it is recorded, and kept around so the
//! caller can inspect what happened during a compilation.

use log::{debug, error, info, warn};
use std::fmt;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub enum Level {
    Debug,
    Info,
    Warning,
    Error,
    Fatal,
}
impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warning => "warning",
            Level::Error => "error",
            Level::Fatal => "fatal",
        })
    }
}

#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct Diagnostic {
    pub level: Level,
    /// The 1-based line the diagnostic refers to, if any.
    pub line: Option<usize>,
    pub message: String,
}
impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.line {
            Some(line) => write!(f, "[{}] line {line}: {}", self.level, self.message),
            None => write!(f, "[{}] {}", self.level, self.message),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Diagnostics {
    entries: Vec<Diagnostic>,
}
impl Diagnostics {
    pub fn new() -> Self {
        Diagnostics { entries: Vec::new() }
    }

    pub fn push(&mut self, level: Level, line: Option<usize>, message: impl Into<String>) {
        let diagnostic = Diagnostic { level, line, message: message.into() };
        match level {
            Level::Debug => debug!("{}", diagnostic.message),
            Level::Info => info!("{}", diagnostic.message),
            Level::Warning => warn!("{}", diagnostic.message),
            Level::Error => error!("{}", diagnostic.message),
            Level::Fatal => error!("Fatal: {}", diagnostic.message),
        }
        self.entries.push(diagnostic);
    }

    pub fn debug(&mut self, line: Option<usize>, message: impl Into<String>) {
        self.push(Level::Debug, line, message)
    }
    pub fn info(&mut self, message: impl Into<String>) {
        self.push(Level::Info, None, message)
    }
    pub fn warn(&mut self, line: Option<usize>, message: impl Into<String>) {
        self.push(Level::Warning, line, message)
    }
    pub fn error(&mut self, line: Option<usize>, message: impl Into<String>) {
        self.push(Level::Error, line, message)
    }
    pub fn fatal(&mut self, message: impl Into<String>) {
        self.push(Level::Fatal, None, message)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.entries.iter()
    }

    /// Iterates the diagnostics at the given level.
    pub fn at_level(&self, level: Level) -> impl Iterator<Item = &Diagnostic> + '_ {
        self.entries.iter().filter(move |x| x.level == level)
    }

    /// Returns the number of diagnostics at warning level or above.
    pub fn problem_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|x| x.level >= Level::Warning)
            .count()
    }

    pub fn has_fatal(&self) -> bool {
        self.at_level(Level::Fatal).next().is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_levels() {
        let mut diag = Diagnostics::new();
        diag.debug(Some(1), "found a key");
        diag.info("resolved a value");
        diag.warn(Some(3), "unparsed line");
        diag.error(Some(4), "duplicate key");

        assert_eq!(diag.len(), 4);
        assert_eq!(diag.problem_count(), 2);
        assert!(!diag.has_fatal());
        assert_eq!(diag.at_level(Level::Warning).next().unwrap().line, Some(3));

        diag.fatal("giving up");
        assert!(diag.has_fatal());
        assert_eq!(diag.problem_count(), 3);
    }

    #[test]
    fn display() {
        let mut diag = Diagnostics::new();
        diag.warn(Some(7), "unparsed line");
        diag.fatal("no charset");
        let rendered: Vec<_> = diag.iter().map(|x| x.to_string()).collect();
        assert_eq!(rendered, vec!["[warning] line 7: unparsed line", "[fatal] no charset"]);
    }
}
