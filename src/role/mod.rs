//! Role readers: one module per part of an Ansible role.
//!
//! Every reader takes a `&mut RunLog` and returns best-effort data. None of
//! them fail: absent or malformed input becomes a warning.
//!
//! # Modules
//!
//! - `structure`: expected subdirectory checklist
//! - `metadata`: `meta/main.yml` descriptor
//! - `variables`: `defaults/main.yml` and `vars/main.yml`
//! - `tasks`: task files and `handlers/main.yml`

pub mod metadata;
pub mod structure;
pub mod tasks;
pub mod variables;

use std::path::{Path, PathBuf};

/// File name of each role section's entry point
pub const MAIN_FILE: &str = "main.yml";

/// Alternate extension Ansible also accepts for entry points
pub const MAIN_FILE_ALT: &str = "main.yaml";

/// Entry point file of a role section (`<role>/<section>/main.yml`).
///
/// Falls back to `main.yaml` when only that spelling exists. When neither
/// exists the `main.yml` path is returned so callers report the usual name.
pub fn main_file(role_root: &Path, section: &str) -> PathBuf {
    let dir = role_root.join(section);
    let primary = dir.join(MAIN_FILE);
    if primary.is_file() {
        return primary;
    }
    let alternate = dir.join(MAIN_FILE_ALT);
    if alternate.is_file() {
        return alternate;
    }
    primary
}

/// True for `.yml` / `.yaml` files
pub fn is_yaml_file(path: &Path) -> bool {
    path.is_file()
        && path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| ext.eq_ignore_ascii_case("yml") || ext.eq_ignore_ascii_case("yaml"))
            .unwrap_or(false)
}
