//! Role descriptor (`meta/main.yml`) reader
//!
//! Reads the Galaxy metadata block and the role dependency list. Unknown
//! keys are ignored; known keys that are missing stay `None` and are
//! rendered with placeholders.

use std::path::Path;

use crate::role::{self, structure::RoleDir};
use crate::run_log::RunLog;
use crate::yaml::{self, YamlNode};

/// Placeholder for a missing description
pub const NO_DESCRIPTION: &str = "No description provided";

/// Placeholder for a missing author or license
pub const UNKNOWN: &str = "Unknown";

/// Placeholder for a missing minimum version
pub const NOT_SPECIFIED: &str = "Not specified";

/// Version used when a dependency does not pin one
pub const LATEST: &str = "latest";

/// A supported platform and its versions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    pub name: String,
    /// Explicit versions; `all` entries are dropped
    pub versions: Vec<String>,
}

impl Platform {
    /// Comma-separated versions, or "All versions"
    pub fn versions_label(&self) -> String {
        if self.versions.is_empty() {
            "All versions".to_string()
        } else {
            self.versions.join(", ")
        }
    }
}

/// One entry of the role dependency list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Dependency {
    /// `- common`
    Name(String),
    /// `- role: common` with an optional `version`
    Detailed {
        role: String,
        version: Option<String>,
    },
}

impl Dependency {
    pub fn role(&self) -> &str {
        match self {
            Self::Name(name) => name,
            Self::Detailed { role, .. } => role,
        }
    }
}

/// Metadata declared in the role descriptor
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleDescriptor {
    pub name: Option<String>,
    pub description: Option<String>,
    pub author: Option<String>,
    pub license: Option<String>,
    pub min_version: Option<String>,
    pub platforms: Vec<Platform>,
    pub dependencies: Vec<Dependency>,
}

impl RoleDescriptor {
    pub fn description_or_default(&self) -> &str {
        self.description.as_deref().unwrap_or(NO_DESCRIPTION)
    }

    pub fn author_or_default(&self) -> &str {
        self.author.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn license_or_default(&self) -> &str {
        self.license.as_deref().unwrap_or(UNKNOWN)
    }

    pub fn min_version_or_default(&self) -> &str {
        self.min_version.as_deref().unwrap_or(NOT_SPECIFIED)
    }

    /// Build a descriptor from a parsed `meta/main.yml` document.
    ///
    /// Returns `None` when the document is not a mapping.
    pub fn from_yaml(doc: &YamlNode) -> Option<Self> {
        if doc.is_null() {
            return Some(Self::default());
        }
        doc.as_mapping()?;

        let mut descriptor = Self {
            dependencies: doc
                .get("dependencies")
                .and_then(YamlNode::as_sequence)
                .map(parse_dependencies)
                .unwrap_or_default(),
            ..Self::default()
        };

        let Some(info) = doc.get("galaxy_info").filter(|n| n.as_mapping().is_some()) else {
            tracing::debug!("Descriptor has no galaxy_info block");
            return Some(descriptor);
        };

        descriptor.name = info.get("role_name").and_then(YamlNode::non_empty_text);
        descriptor.description = info.get("description").and_then(YamlNode::non_empty_text);
        descriptor.author = info.get("author").and_then(YamlNode::non_empty_text);
        descriptor.license = info.get("license").and_then(license_text);
        descriptor.min_version = info
            .get("min_ansible_version")
            .and_then(YamlNode::non_empty_text);
        descriptor.platforms = info
            .get("platforms")
            .and_then(YamlNode::as_sequence)
            .map(parse_platforms)
            .unwrap_or_default();

        Some(descriptor)
    }
}

// Galaxy accepts a list of licenses as well as a single one
fn license_text(node: &YamlNode) -> Option<String> {
    match node.as_sequence() {
        Some(items) => {
            let names: Vec<String> = items.iter().filter_map(YamlNode::non_empty_text).collect();
            (!names.is_empty()).then(|| names.join(", "))
        }
        None => node.non_empty_text(),
    }
}

fn parse_platforms(items: &[YamlNode]) -> Vec<Platform> {
    items
        .iter()
        .filter(|item| item.as_mapping().is_some())
        .map(|item| {
            let name = item
                .get("name")
                .and_then(YamlNode::non_empty_text)
                .unwrap_or_else(|| UNKNOWN.to_string());
            let versions: Vec<String> = match item.get("versions") {
                Some(YamlNode::Sequence(versions)) => versions
                    .iter()
                    .filter_map(YamlNode::non_empty_text)
                    .collect(),
                Some(other) => other.non_empty_text().into_iter().collect(),
                None => Vec::new(),
            };
            Platform {
                name,
                versions: versions
                    .into_iter()
                    .filter(|v| !v.eq_ignore_ascii_case("all"))
                    .collect(),
            }
        })
        .collect()
}

fn parse_dependencies(items: &[YamlNode]) -> Vec<Dependency> {
    items
        .iter()
        .filter_map(|item| match item {
            YamlNode::Mapping(_) => {
                let role = ["role", "name", "src"]
                    .iter()
                    .find_map(|key| item.get(key).and_then(YamlNode::non_empty_text))
                    .unwrap_or_else(|| UNKNOWN.to_string());
                let version = item.get("version").and_then(YamlNode::non_empty_text);
                Some(Dependency::Detailed { role, version })
            }
            other => other.non_empty_text().map(Dependency::Name),
        })
        .collect()
}

/// Read the descriptor of the role at `role_root`
pub fn read_role_descriptor(role_root: &Path, log: &mut RunLog) -> Option<RoleDescriptor> {
    read_descriptor(&role::main_file(role_root, RoleDir::Meta.as_str()), log)
}

/// Read a descriptor file, recording a warning when it is absent or invalid
pub fn read_descriptor(path: &Path, log: &mut RunLog) -> Option<RoleDescriptor> {
    let doc = yaml::read_role_file(path, log)?;
    match RoleDescriptor::from_yaml(&doc) {
        Some(descriptor) => {
            tracing::info!(
                "Loaded role descriptor: {} platform(s), {} dependency(ies)",
                descriptor.platforms.len(),
                descriptor.dependencies.len()
            );
            Some(descriptor)
        }
        None => {
            log.parse_error(path, "parse error (descriptor is not a mapping)");
            None
        }
    }
}
