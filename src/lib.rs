//! roledoc library
//!
//! Inspects an Ansible role directory and renders a Markdown summary of its
//! structure, metadata, variables, tasks and handlers. The role directory is
//! only ever read; the single output file is the only thing written.

pub mod cli;
pub mod config;
pub mod error;
pub mod generator;
pub mod logging;
pub mod report;
pub mod role;
pub mod run_log;
pub mod yaml;

// Re-export main types for convenience
pub use config::DocgenConfig;
pub use error::DocgenError;
pub use generator::{DocGenerator, RunOutcome, write_report};
pub use report::{Report, render_markdown};
pub use role::metadata::{Dependency, Platform, RoleDescriptor, read_descriptor, read_role_descriptor};
pub use role::structure::{DirectoryCheck, RoleDir, StructureSummary, validate_structure};
pub use role::tasks::{HandlerEntry, TaskEntry, list_handlers, list_role_handlers, list_tasks};
pub use role::variables::{
    RoleVariables, Variable, VariableOrigin, VariableSet, read_role_variables, read_variables,
};
pub use run_log::{RunLog, Warning, WarningKind};
pub use yaml::YamlNode;
