//! Markdown report rendering
//!
//! The section order is fixed and every section is always present. Missing
//! data renders as an explicit [`NONE_FOUND`] line so two reports can be
//! compared section by section regardless of how complete the role is.
//!
//! # Sections
//!
//! | Section              | Source |
//! |----------------------|--------|
//! | Title, Description   | descriptor (`role_name`, `description`) |
//! | Role Information     | descriptor (author, license, minimum version) |
//! | Directory Structure  | structure checklist |
//! | Supported Platforms  | descriptor `platforms` |
//! | Role Dependencies    | descriptor `dependencies` |
//! | Role Variables       | defaults and vars, one table each |
//! | Tasks, Handlers      | task files, `handlers/main.yml` |
//! | Example Playbook     | role name |
//! | License, Author      | descriptor |

use std::fmt;
use std::path::Path;

use chrono::NaiveDateTime;

use crate::role::metadata::{Dependency, LATEST, RoleDescriptor};
use crate::role::structure::DirectoryCheck;
use crate::role::tasks::{HandlerEntry, TaskEntry};
use crate::role::variables::{RoleVariables, VariableSet};

/// Line rendered for a section without data
pub const NONE_FOUND: &str = "_None found._";

/// Role name used when neither the descriptor nor the path provides one
pub const DEFAULT_ROLE_NAME: &str = "Ansible Role";

/// Footer timestamp format
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Everything collected about a role, ready to render
#[derive(Debug, Clone, PartialEq)]
pub struct Report {
    pub role_name: String,
    pub descriptor: Option<RoleDescriptor>,
    pub structure: Vec<DirectoryCheck>,
    pub variables: RoleVariables,
    pub tasks: Vec<TaskEntry>,
    pub handlers: Vec<HandlerEntry>,
    /// Footer timestamp; `None` leaves the footer out
    pub generated_at: Option<NaiveDateTime>,
}

impl Report {
    /// Name of the role: declared `role_name`, else the directory name
    pub fn resolve_name(descriptor: Option<&RoleDescriptor>, role_root: &Path) -> String {
        if let Some(name) = descriptor.and_then(|d| d.name.clone()) {
            return name;
        }

        let dir_name = |p: &Path| {
            p.file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .filter(|n| !n.is_empty())
        };
        dir_name(role_root)
            .or_else(|| role_root.canonicalize().ok().as_deref().and_then(dir_name))
            .unwrap_or_else(|| DEFAULT_ROLE_NAME.to_string())
    }

    fn descriptor(&self) -> RoleDescriptor {
        self.descriptor.clone().unwrap_or_default()
    }
}

/// Render the report as Markdown
pub fn render_markdown(report: &Report) -> String {
    Markdown(report).to_string()
}

/// Display adapter writing a [`Report`] as Markdown
pub struct Markdown<'a>(pub &'a Report);

impl fmt::Display for Markdown<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let report = self.0;
        let meta = report.descriptor();

        writeln!(f, "# {}", report.role_name)?;
        writeln!(f)?;
        writeln!(f, "## Description")?;
        writeln!(f, "{}", meta.description_or_default())?;
        writeln!(f)?;

        writeln!(f, "## Role Information")?;
        writeln!(f, "- **Author:** {}", meta.author_or_default())?;
        writeln!(f, "- **License:** {}", meta.license_or_default())?;
        writeln!(f, "- **Minimum Ansible Version:** {}", meta.min_version_or_default())?;
        writeln!(f)?;

        writeln!(f, "## Directory Structure")?;
        write_list(f, &report.structure, |c| format!("{}/: {}", c.dir, c.mark()))?;
        writeln!(f)?;

        writeln!(f, "## Supported Platforms")?;
        write_list(f, &meta.platforms, |p| format!("{}: {}", p.name, p.versions_label()))?;
        writeln!(f)?;

        writeln!(f, "## Role Dependencies")?;
        write_list(f, &meta.dependencies, |d| match d {
            Dependency::Name(name) => name.clone(),
            Dependency::Detailed { role, version } => {
                format!("{} (version: {})", role, version.as_deref().unwrap_or(LATEST))
            }
        })?;
        writeln!(f)?;

        writeln!(f, "## Role Variables")?;
        writeln!(f)?;
        writeln!(f, "### Defaults")?;
        write_variables(f, &report.variables.defaults)?;
        writeln!(f)?;
        writeln!(f, "### Variables")?;
        write_variables(f, &report.variables.overrides)?;
        writeln!(f)?;

        writeln!(f, "## Tasks")?;
        write_list(f, &report.tasks, task_line)?;
        writeln!(f)?;

        writeln!(f, "## Handlers")?;
        write_list(f, &report.handlers, handler_line)?;
        writeln!(f)?;

        writeln!(f, "## Example Playbook")?;
        writeln!(f, "```yaml")?;
        writeln!(f, "- hosts: servers")?;
        writeln!(f, "  roles:")?;
        writeln!(f, "    - role: {}", report.role_name)?;
        writeln!(f, "```")?;
        writeln!(f)?;

        writeln!(f, "## License")?;
        writeln!(f, "This role is licensed under {}.", meta.license_or_default())?;
        writeln!(f)?;

        writeln!(f, "## Author Information")?;
        writeln!(f, "Created by {}", meta.author_or_default())?;

        if let Some(at) = report.generated_at {
            writeln!(f)?;
            writeln!(f, "---")?;
            writeln!(f, "*Documentation generated on {}*", at.format(TIMESTAMP_FORMAT))?;
        }

        Ok(())
    }
}

fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    line: impl Fn(&T) -> String,
) -> fmt::Result {
    if items.is_empty() {
        return writeln!(f, "{}", NONE_FOUND);
    }
    for item in items {
        writeln!(f, "- {}", line(item))?;
    }
    Ok(())
}

fn write_variables(f: &mut fmt::Formatter<'_>, set: &VariableSet) -> fmt::Result {
    if set.is_empty() {
        return writeln!(f, "{}", NONE_FOUND);
    }
    writeln!(f, "| Variable | Value |")?;
    writeln!(f, "|----------|-------|")?;
    for var in &set.variables {
        writeln!(f, "| `{}` | {} |", escape_cell(&var.name), value_cell(&var.value))?;
    }
    Ok(())
}

fn value_cell(value: &str) -> String {
    if value.is_empty() {
        "`\"\"`".to_string()
    } else {
        escape_cell(value)
    }
}

/// Keep a value inside a single table cell
fn escape_cell(text: &str) -> String {
    single_line(&text.replace('|', "\\|"))
}

/// Line breaks inside a list item or cell become `<br>`
fn single_line(text: &str) -> String {
    text.trim_end_matches(['\r', '\n'])
        .replace("\r\n", "<br>")
        .replace('\n', "<br>")
}

fn task_line(task: &TaskEntry) -> String {
    let name = single_line(&task.name);
    let mut line = match &task.module {
        Some(module) => format!("{} ({}, module: {})", name, task.file, module),
        None => format!("{} ({})", name, task.file),
    };
    if !task.tags.is_empty() {
        line.push_str(&format!(" [Tags: {}]", task.tags.join(", ")));
    }
    line
}

fn handler_line(handler: &HandlerEntry) -> String {
    let mut details = Vec::new();
    if let Some(module) = &handler.module {
        details.push(format!("module: {}", module));
    }
    if let Some(listen) = &handler.listen {
        details.push(format!("listen: {}", listen));
    }
    let name = single_line(&handler.name);
    if details.is_empty() {
        name
    } else {
        format!("{} ({})", name, details.join(", "))
    }
}
