//! Task and handler listing
//!
//! Extracts the declared name of every entry in the role's task files and
//! in `handlers/main.yml`, keeping document order. Entries without a name
//! get a positional placeholder (`Unnamed task #2`) so the numbering in the
//! report matches the file.
//!
//! # Task files
//!
//! The entry point (`tasks/main.yml`) is read first, then every other YAML
//! file under `tasks/`, sorted by relative path. Included files are listed
//! even when nothing imports them; the report is an inventory, not a
//! control-flow analysis.

use std::fs;
use std::path::{Path, PathBuf};

use crate::role::{self, structure::RoleDir};
use crate::run_log::RunLog;
use crate::yaml::{self, YamlNode};

/// Task keywords that are not the action module
const TASK_KEYWORDS: &[&str] = &[
    "name",
    "tags",
    "when",
    "become",
    "become_user",
    "become_method",
    "become_flags",
    "register",
    "notify",
    "listen",
    "loop",
    "loop_control",
    "vars",
    "args",
    "environment",
    "ignore_errors",
    "ignore_unreachable",
    "changed_when",
    "failed_when",
    "delegate_to",
    "delegate_facts",
    "run_once",
    "no_log",
    "retries",
    "delay",
    "until",
    "check_mode",
    "diff",
    "any_errors_fatal",
    "async",
    "poll",
    "throttle",
    "timeout",
    "connection",
    "collections",
    "module_defaults",
    "debugger",
    "rescue",
    "always",
];

/// One declared task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskEntry {
    pub name: String,
    /// Source file relative to `tasks/`, with `/` separators
    pub file: String,
    pub tags: Vec<String>,
    /// Action module the task invokes, e.g. `ansible.builtin.apt`
    pub module: Option<String>,
}

/// One declared handler
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandlerEntry {
    pub name: String,
    /// Notification topic(s) from `listen`
    pub listen: Option<String>,
    pub module: Option<String>,
}

fn entry_name(entry: &YamlNode, kind: &str, position: usize) -> String {
    entry
        .get("name")
        .and_then(YamlNode::non_empty_text)
        .unwrap_or_else(|| format!("Unnamed {} #{}", kind, position))
}

/// Strings from a scalar-or-list field such as `tags` or `listen`
fn string_list(node: Option<&YamlNode>) -> Vec<String> {
    match node {
        Some(YamlNode::Sequence(items)) => {
            items.iter().filter_map(YamlNode::non_empty_text).collect()
        }
        Some(other) => other.non_empty_text().into_iter().collect(),
        None => Vec::new(),
    }
}

/// Action module of a task or handler entry
pub fn action_module(entry: &YamlNode) -> Option<String> {
    let entries = entry.as_mapping()?;

    // `action: apt name=nginx` / `local_action: {module: apt}`
    for key in ["action", "local_action"] {
        if let Some(action) = entry.get(key) {
            let module = match action {
                YamlNode::Mapping(_) => action.get("module").and_then(YamlNode::non_empty_text),
                other => other
                    .non_empty_text()
                    .and_then(|s| s.split_whitespace().next().map(str::to_string)),
            };
            return module.or_else(|| Some(key.to_string()));
        }
    }

    entries
        .iter()
        .map(|(key, _)| key.as_str())
        .find(|key| !TASK_KEYWORDS.contains(key) && !key.starts_with("with_"))
        .map(str::to_string)
}

/// Load a file that should hold a list of entries.
///
/// Empty documents give an empty list; anything but a sequence is a parse
/// error.
fn read_entries(path: &Path, log: &mut RunLog, what: &str) -> Vec<YamlNode> {
    match yaml::read_role_file(path, log) {
        Some(YamlNode::Sequence(items)) => items,
        Some(YamlNode::Null) | None => Vec::new(),
        Some(_) => {
            log.parse_error(path, format!("parse error ({} file is not a list)", what));
            Vec::new()
        }
    }
}

fn relative_label(path: &Path, base: &Path) -> String {
    let rel = path.strip_prefix(base).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// List the tasks of a single task file
pub fn list_tasks_file(path: &Path, tasks_dir: &Path, log: &mut RunLog) -> Vec<TaskEntry> {
    let file = relative_label(path, tasks_dir);
    read_entries(path, log, "task")
        .iter()
        .enumerate()
        .map(|(index, entry)| TaskEntry {
            name: entry_name(entry, "task", index + 1),
            file: file.clone(),
            tags: string_list(entry.get("tags")),
            module: action_module(entry),
        })
        .collect()
}

/// Every YAML file below `dir`, sorted by path
fn collect_yaml_files(dir: &Path, log: &mut RunLog) -> Vec<PathBuf> {
    let mut files = Vec::new();
    let mut pending = vec![dir.to_path_buf()];

    while let Some(current) = pending.pop() {
        let entries = match fs::read_dir(&current) {
            Ok(entries) => entries,
            Err(e) => {
                log.parse_error(&current, format!("cannot list directory ({})", e));
                continue;
            }
        };
        for entry in entries.flatten() {
            let path = entry.path();
            // Symlinked directories are not followed, so a link back up the
            // tree cannot loop
            if entry.file_type().is_ok_and(|t| t.is_dir()) {
                pending.push(path);
            } else if role::is_yaml_file(&path) {
                files.push(path);
            }
        }
    }

    files.sort();
    files
}

/// List the tasks of the role at `role_root`.
///
/// The entry point comes first; a missing entry point is reported once,
/// even when the whole `tasks/` directory is absent.
pub fn list_tasks(role_root: &Path, log: &mut RunLog) -> Vec<TaskEntry> {
    let tasks_dir = role_root.join(RoleDir::Tasks.as_str());
    let main = role::main_file(role_root, RoleDir::Tasks.as_str());

    let mut tasks = list_tasks_file(&main, &tasks_dir, log);

    if tasks_dir.is_dir() {
        for path in collect_yaml_files(&tasks_dir, log) {
            if path != main {
                tasks.extend(list_tasks_file(&path, &tasks_dir, log));
            }
        }
    }

    tracing::info!("Found {} task(s)", tasks.len());
    tasks
}

/// List the handlers of a handlers file
pub fn list_handlers(path: &Path, log: &mut RunLog) -> Vec<HandlerEntry> {
    let handlers: Vec<HandlerEntry> = read_entries(path, log, "handler")
        .iter()
        .enumerate()
        .map(|(index, entry)| {
            let listen = string_list(entry.get("listen"));
            HandlerEntry {
                name: entry_name(entry, "handler", index + 1),
                listen: (!listen.is_empty()).then(|| listen.join(", ")),
                module: action_module(entry),
            }
        })
        .collect();

    tracing::info!("Found {} handler(s)", handlers.len());
    handlers
}

/// List the handlers of the role at `role_root`
pub fn list_role_handlers(role_root: &Path, log: &mut RunLog) -> Vec<HandlerEntry> {
    list_handlers(&role::main_file(role_root, RoleDir::Handlers.as_str()), log)
}
