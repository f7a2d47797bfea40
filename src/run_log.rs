//! Warning collection for a single documentation run
//!
//! Every reader receives a `&mut RunLog` instead of writing to a global.
//! Recording a warning also emits it through `tracing`, so it lands in the
//! per-run log file and, at higher verbosity, on screen.

use std::fmt;
use std::path::{Path, PathBuf};
use strum::Display;

/// Category of a non-fatal problem
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum WarningKind {
    /// An expected file or directory is absent
    #[strum(serialize = "missing-input")]
    MissingInput,
    /// A present file could not be read or parsed
    #[strum(serialize = "parse-error")]
    ParseError,
}

/// A single recorded warning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Warning {
    pub kind: WarningKind,
    pub path: PathBuf,
    pub message: String,
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.message, self.path.display())
    }
}

/// Ordered collection of warnings raised during one run
#[derive(Debug, Default, Clone)]
pub struct RunLog {
    warnings: Vec<Warning>,
}

impl RunLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that an expected input is absent
    pub fn missing(&mut self, path: &Path, message: impl Into<String>) {
        self.push(WarningKind::MissingInput, path, message.into());
    }

    /// Record that a present input could not be parsed
    pub fn parse_error(&mut self, path: &Path, message: impl Into<String>) {
        self.push(WarningKind::ParseError, path, message.into());
    }

    fn push(&mut self, kind: WarningKind, path: &Path, message: String) {
        let warning = Warning {
            kind,
            path: path.to_path_buf(),
            message,
        };
        tracing::warn!("{}", warning);
        self.warnings.push(warning);
    }

    pub fn warnings(&self) -> &[Warning] {
        &self.warnings
    }

    pub fn is_empty(&self) -> bool {
        self.warnings.is_empty()
    }

    pub fn len(&self) -> usize {
        self.warnings.len()
    }

    /// Number of warnings of the given kind
    pub fn count(&self, kind: WarningKind) -> usize {
        self.warnings.iter().filter(|w| w.kind == kind).count()
    }

    pub fn into_warnings(self) -> Vec<Warning> {
        self.warnings
    }
}
