//! YAML loading and the generic role-file tree
//!
//! Role files are free-form YAML, so they are loaded into [`YamlNode`], an
//! explicit recursive value type, instead of typed structs. Readers pull the
//! fields they know about and ignore the rest.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde_yaml::Value;
use thiserror::Error;

use crate::run_log::RunLog;

/// Placeholder shown for vault-encrypted values
pub const VAULT_PLACEHOLDER: &str = "<vault encrypted>";

/// Generic YAML tree. Mappings keep document order.
#[derive(Debug, Clone, PartialEq)]
pub enum YamlNode {
    Null,
    Bool(bool),
    Number(serde_yaml::Number),
    String(String),
    Sequence(Vec<YamlNode>),
    Mapping(Vec<(String, YamlNode)>),
}

/// Why a role file could not be loaded
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("YAML parsing error in {}: {source}", path.display())]
    Yaml {
        path: PathBuf,
        source: serde_yaml::Error,
    },
}

impl From<Value> for YamlNode {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => YamlNode::Null,
            Value::Bool(b) => YamlNode::Bool(b),
            Value::Number(n) => YamlNode::Number(n),
            Value::String(s) => YamlNode::String(s),
            Value::Sequence(items) => {
                YamlNode::Sequence(items.into_iter().map(YamlNode::from).collect())
            }
            Value::Mapping(map) => YamlNode::Mapping(
                map.into_iter()
                    .map(|(k, v)| (YamlNode::from(k).to_inline(), YamlNode::from(v)))
                    .collect(),
            ),
            // Ciphertext is noise in documentation
            Value::Tagged(tagged) if tagged.tag == "vault" => {
                YamlNode::String(VAULT_PLACEHOLDER.to_string())
            }
            Value::Tagged(tagged) => YamlNode::from(tagged.value),
        }
    }
}

impl YamlNode {
    /// Parse a YAML document. Input with only blanks and comments is an
    /// empty (null) document.
    pub fn parse(content: &str) -> std::result::Result<Self, serde_yaml::Error> {
        let blank = content.lines().map(str::trim).all(|line| {
            line.is_empty() || line.starts_with('#') || line == "---" || line == "..."
        });
        if blank {
            return Ok(YamlNode::Null);
        }
        let value: Value = serde_yaml::from_str(content)?;
        Ok(value.into())
    }

    /// Look up a key in a mapping node
    pub fn get(&self, key: &str) -> Option<&YamlNode> {
        match self {
            YamlNode::Mapping(entries) => entries.iter().find(|(k, _)| k == key).map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            YamlNode::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_sequence(&self) -> Option<&[YamlNode]> {
        match self {
            YamlNode::Sequence(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_mapping(&self) -> Option<&[(String, YamlNode)]> {
        match self {
            YamlNode::Mapping(entries) => Some(entries),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, YamlNode::Null)
    }

    /// Text of a scalar node. `None` for null, sequences and mappings.
    pub fn scalar_text(&self) -> Option<String> {
        match self {
            YamlNode::Bool(b) => Some(b.to_string()),
            YamlNode::Number(n) => Some(n.to_string()),
            YamlNode::String(s) => Some(s.clone()),
            _ => None,
        }
    }

    /// Non-empty trimmed scalar text
    pub fn non_empty_text(&self) -> Option<String> {
        self.scalar_text()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
    }

    /// Single-line flow representation, e.g. `[a, b]` or `{k: v}`
    pub fn to_inline(&self) -> String {
        match self {
            YamlNode::Null => "null".to_string(),
            YamlNode::Bool(b) => b.to_string(),
            YamlNode::Number(n) => n.to_string(),
            YamlNode::String(s) => s.clone(),
            YamlNode::Sequence(items) => {
                let parts: Vec<String> = items.iter().map(YamlNode::to_inline).collect();
                format!("[{}]", parts.join(", "))
            }
            YamlNode::Mapping(entries) => {
                let parts: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{}: {}", k, v.to_inline()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
        }
    }

    /// Flatten into `(dotted.path, value)` pairs in document order.
    ///
    /// Mapping keys are joined with `.`, sequence elements get an `[index]`
    /// suffix. Empty containers are kept as `{}` / `[]` leaves so no
    /// variable disappears from the listing.
    pub fn flatten(&self) -> Vec<(String, String)> {
        let mut out = Vec::new();
        flatten_into("", self, &mut out);
        out
    }
}

fn flatten_into(prefix: &str, node: &YamlNode, out: &mut Vec<(String, String)>) {
    match node {
        YamlNode::Mapping(entries) if !entries.is_empty() => {
            for (key, value) in entries {
                let path = if prefix.is_empty() {
                    key.clone()
                } else {
                    format!("{}.{}", prefix, key)
                };
                flatten_into(&path, value, out);
            }
        }
        YamlNode::Sequence(items) if !items.is_empty() => {
            for (index, item) in items.iter().enumerate() {
                flatten_into(&format!("{}[{}]", prefix, index), item, out);
            }
        }
        leaf => out.push((prefix.to_string(), leaf.to_inline())),
    }
}

/// Load and parse a YAML file
pub fn load_yaml(path: &Path) -> std::result::Result<YamlNode, LoadError> {
    let content = fs::read_to_string(path).map_err(|e| {
        if e.kind() == ErrorKind::NotFound {
            LoadError::NotFound {
                path: path.to_path_buf(),
            }
        } else {
            LoadError::Io {
                path: path.to_path_buf(),
                source: e,
            }
        }
    })?;

    YamlNode::parse(&content).map_err(|e| LoadError::Yaml {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Load a role file, recording a warning instead of failing.
///
/// A missing file is reported as "file not found", anything else that
/// stops the file from loading as a parse error.
pub fn read_role_file(path: &Path, log: &mut RunLog) -> Option<YamlNode> {
    match load_yaml(path) {
        Ok(node) => {
            tracing::debug!("Loaded {}", path.display());
            Some(node)
        }
        Err(LoadError::NotFound { .. }) => {
            log.missing(path, "file not found");
            None
        }
        Err(e) => {
            log.parse_error(path, format!("parse error ({})", e));
            None
        }
    }
}
