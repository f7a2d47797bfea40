//! Role variable reader (`defaults/main.yml`, `vars/main.yml`)
//!
//! Each file is flattened into single-line `name = value` pairs. The two
//! origins are kept separate: defaults and vars are listed side by side in
//! the report, never merged.

use std::path::Path;
use strum::Display;

use crate::role::{self, structure::RoleDir};
use crate::run_log::RunLog;
use crate::yaml::{self, YamlNode};

/// Which role file a variable came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "lowercase")]
pub enum VariableOrigin {
    /// `defaults/main.yml`, lowest precedence
    Default,
    /// `vars/main.yml`, overrides defaults
    Override,
}

impl VariableOrigin {
    /// Role subdirectory holding this origin's file
    pub fn dir(&self) -> RoleDir {
        match self {
            Self::Default => RoleDir::Defaults,
            Self::Override => RoleDir::Vars,
        }
    }
}

/// Flattened variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Variable {
    /// Dotted path, e.g. `database.host`
    pub name: String,
    /// Single-line rendering of the value
    pub value: String,
}

/// Ordered variables of one origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableSet {
    pub origin: VariableOrigin,
    pub variables: Vec<Variable>,
}

impl VariableSet {
    pub fn empty(origin: VariableOrigin) -> Self {
        Self {
            origin,
            variables: Vec::new(),
        }
    }

    /// Flatten a parsed variables document.
    ///
    /// Returns `None` when the document is not a mapping. A null document
    /// (empty file) or an empty mapping (`{}`) gives an empty set.
    pub fn from_yaml(origin: VariableOrigin, doc: &YamlNode) -> Option<Self> {
        match doc {
            YamlNode::Null => Some(Self::empty(origin)),
            YamlNode::Mapping(entries) if entries.is_empty() => Some(Self::empty(origin)),
            YamlNode::Mapping(_) => Some(Self {
                origin,
                variables: doc
                    .flatten()
                    .into_iter()
                    .map(|(name, value)| Variable { name, value })
                    .collect(),
            }),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    /// Value of a flattened variable
    pub fn get(&self, name: &str) -> Option<&str> {
        self.variables
            .iter()
            .find(|v| v.name == name)
            .map(|v| v.value.as_str())
    }
}

/// Both variable sets of a role
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleVariables {
    pub defaults: VariableSet,
    pub overrides: VariableSet,
}

/// Read one variables file.
///
/// An absent file is reported as "file not found"; a malformed one as a
/// parse error. Either way the set is empty and the run goes on.
pub fn read_variables(path: &Path, origin: VariableOrigin, log: &mut RunLog) -> VariableSet {
    let Some(doc) = yaml::read_role_file(path, log) else {
        return VariableSet::empty(origin);
    };

    match VariableSet::from_yaml(origin, &doc) {
        Some(set) => {
            tracing::info!("Loaded {} {} variable(s)", set.len(), origin);
            set
        }
        None => {
            log.parse_error(path, "parse error (variables file is not a mapping)");
            VariableSet::empty(origin)
        }
    }
}

/// Read `defaults/main.yml` and `vars/main.yml` of the role at `role_root`
pub fn read_role_variables(role_root: &Path, log: &mut RunLog) -> RoleVariables {
    let read = |origin: VariableOrigin, log: &mut RunLog| {
        let path = role::main_file(role_root, origin.dir().as_str());
        read_variables(&path, origin, log)
    };

    RoleVariables {
        defaults: read(VariableOrigin::Default, log),
        overrides: read(VariableOrigin::Override, log),
    }
}
