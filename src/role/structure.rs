//! Role directory layout checks
//!
//! Verifies which of the standard role subdirectories exist. Absence is a
//! normal, reportable condition: every missing directory becomes a warning
//! and a `✗` in the report, never an error.

use std::path::Path;
use strum::{Display, EnumIter, IntoEnumIterator, IntoStaticStr};

use crate::run_log::RunLog;

/// Expected role subdirectory. Declaration order is the report order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum RoleDir {
    Defaults,
    Vars,
    Tasks,
    Handlers,
    Meta,
    Templates,
    Files,
}

impl RoleDir {
    /// Directory name inside the role
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Presence of one expected subdirectory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DirectoryCheck {
    pub dir: RoleDir,
    pub present: bool,
}

impl DirectoryCheck {
    /// Checklist mark used in the report
    pub fn mark(&self) -> &'static str {
        if self.present { "✓" } else { "✗" }
    }
}

/// Aggregate view over a checklist
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StructureSummary {
    pub present: usize,
    pub missing: usize,
}

impl StructureSummary {
    pub fn from_checks(checks: &[DirectoryCheck]) -> Self {
        let present = checks.iter().filter(|c| c.present).count();
        Self {
            present,
            missing: checks.len() - present,
        }
    }

    /// Returns true if every expected directory exists
    pub fn is_complete(&self) -> bool {
        self.missing == 0
    }
}

/// Check every expected subdirectory, in the fixed order of [`RoleDir`]
pub fn validate_structure(role_root: &Path, log: &mut RunLog) -> Vec<DirectoryCheck> {
    let checks: Vec<DirectoryCheck> = RoleDir::iter()
        .map(|dir| {
            let path = role_root.join(dir.as_str());
            let present = path.is_dir();
            if !present {
                log.missing(&path, format!("missing directory: {}", dir));
            }
            DirectoryCheck { dir, present }
        })
        .collect();

    let summary = StructureSummary::from_checks(&checks);
    if summary.is_complete() {
        tracing::info!("Structure check: all {} directories present", summary.present);
    } else {
        tracing::info!(
            "Structure check: {} present, {} missing",
            summary.present,
            summary.missing
        );
    }

    checks
}
