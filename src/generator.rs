//! Run orchestration
//!
//! Sequences the readers and the renderer, collecting every warning in one
//! [`RunLog`], then writes the report.
//!
//! # Failure Modes
//!
//! - Role root missing, unreadable or not a directory: fatal, nothing is written
//! - Output path is an existing directory: fatal, nothing is written
//! - Any role file missing or malformed: warning, that part of the report is empty
//! - Report cannot be written: fatal, no partial file is left behind

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};
use tempfile::NamedTempFile;

use crate::config::DocgenConfig;
use crate::error::{DocgenError, Result};
use crate::report::{self, Report};
use crate::role::{metadata, structure, tasks, variables};
use crate::run_log::{RunLog, Warning};

/// Result of a successful run
#[derive(Debug, Clone)]
pub struct RunOutcome {
    pub output_path: PathBuf,
    pub markdown: String,
    pub warnings: Vec<Warning>,
}

/// Generates documentation for one role
#[derive(Debug, Clone)]
pub struct DocGenerator {
    config: DocgenConfig,
}

impl DocGenerator {
    pub fn new(config: DocgenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &DocgenConfig {
        &self.config
    }

    /// Ensure the role root is a readable directory
    pub fn check_role_root(&self) -> Result<()> {
        let root = &self.config.role_dir;
        let metadata = fs::metadata(root).map_err(|e| DocgenError::role_root(root, e))?;
        if !metadata.is_dir() {
            return Err(DocgenError::NotADirectory { path: root.clone() });
        }
        fs::read_dir(root).map_err(|e| DocgenError::role_root(root, e))?;
        Ok(())
    }

    /// Inspect the role and assemble the report without writing anything
    pub fn generate(&self, log: &mut RunLog, generated_at: Option<NaiveDateTime>) -> Result<Report> {
        self.check_role_root()?;
        let root = self.config.role_dir.as_path();
        tracing::info!("Starting documentation generation for {}", root.display());

        let structure = structure::validate_structure(root, log);
        let descriptor = metadata::read_role_descriptor(root, log);
        let variables = variables::read_role_variables(root, log);
        let tasks = tasks::list_tasks(root, log);
        let handlers = tasks::list_role_handlers(root, log);

        Ok(Report {
            role_name: Report::resolve_name(descriptor.as_ref(), root),
            descriptor,
            structure,
            variables,
            tasks,
            handlers,
            generated_at,
        })
    }

    /// Generate the report and write it to the configured output path
    pub fn run(&self) -> Result<RunOutcome> {
        let mut log = RunLog::new();
        let generated_at = self
            .config
            .timestamp
            .then(|| Local::now().naive_local());

        self.config.validate()?;
        let report = self.generate(&mut log, generated_at)?;
        let markdown = report::render_markdown(&report);

        write_report(&self.config.output_path, &markdown)?;
        tracing::info!(
            "Documentation saved to {} ({} warning(s))",
            self.config.output_path.display(),
            log.len()
        );

        Ok(RunOutcome {
            output_path: self.config.output_path.clone(),
            markdown,
            warnings: log.into_warnings(),
        })
    }
}

/// Write `contents` to `path` atomically.
///
/// The data goes to a temporary file in the destination directory, which is
/// then renamed over `path`. On failure the temporary file is removed and
/// `path` is left untouched.
pub fn write_report(path: &Path, contents: &str) -> Result<()> {
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(dir).map_err(|e| DocgenError::write(path, e))?;
    tmp.write_all(contents.as_bytes())
        .map_err(|e| DocgenError::write(path, e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| DocgenError::write(path, e))?;
    tmp.persist(path)
        .map_err(|e| DocgenError::write(path, e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::run_log::WarningKind;

    #[test]
    fn test_check_role_root_missing() {
        let dir = tempfile::tempdir().unwrap();
        let generator = DocGenerator::new(DocgenConfig::new(dir.path().join("absent")));
        let err = generator.check_role_root().unwrap_err();
        assert!(matches!(err, DocgenError::RoleRoot { .. }));
        assert!(err.is_invocation_error());
    }

    #[test]
    fn test_check_role_root_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("role.tar");
        fs::write(&file, "").unwrap();
        let generator = DocGenerator::new(DocgenConfig::new(&file));
        assert!(matches!(
            generator.check_role_root(),
            Err(DocgenError::NotADirectory { .. })
        ));
    }

    #[test]
    fn test_generate_collects_warnings_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let generator = DocGenerator::new(DocgenConfig::new(dir.path()));
        let mut log = RunLog::new();

        let report = generator.generate(&mut log, None).unwrap();

        assert!(report.descriptor.is_none());
        assert!(report.tasks.is_empty());
        // 7 directories, meta, defaults, vars, tasks, handlers
        assert_eq!(log.count(WarningKind::MissingInput), 12);
        assert!(!dir.path().join("DOCUMENTATION.md").exists());
    }

    #[test]
    fn test_write_report_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("DOCUMENTATION.md");
        fs::write(&path, "old content that is longer than the new one").unwrap();

        write_report(&path, "# new\n").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "# new\n");
        // Only the report remains, no temp files
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_write_report_missing_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no/such/dir/DOCUMENTATION.md");

        let err = write_report(&path, "# doc\n").unwrap_err();

        assert!(matches!(err, DocgenError::Write { .. }));
        assert!(!path.exists());
    }

    #[test]
    fn test_write_report_onto_directory_leaves_nothing() {
        let dir = tempfile::tempdir().unwrap();
        let target = dir.path().join("DOCUMENTATION.md");
        fs::create_dir(&target).unwrap();

        assert!(write_report(&target, "# doc\n").is_err());
        assert!(target.is_dir());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1);
    }

    #[test]
    fn test_run_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("out.md");
        let generator = DocGenerator::new(
            DocgenConfig::new(dir.path())
                .with_output(&out)
                .without_timestamp(),
        );

        let outcome = generator.run().unwrap();

        assert_eq!(outcome.output_path, out);
        assert_eq!(fs::read_to_string(&out).unwrap(), outcome.markdown);
        assert!(!outcome.warnings.is_empty());
    }
}
