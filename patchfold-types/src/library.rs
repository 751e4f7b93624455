use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Maven-style artifact coordinate: `group:name:version[:classifier]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GradleSpecifier {
    pub group: String,
    pub name: String,
    pub version: String,
    pub classifier: Option<String>,
}

impl GradleSpecifier {
    /// `group:name`, the key used for whitelist and replacement matching.
    pub fn artifact_prefix(&self) -> String {
        format!("{}:{}", self.group, self.name)
    }
}

impl fmt::Display for GradleSpecifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.group, self.name, self.version)?;
        if let Some(classifier) = &self.classifier {
            write!(f, ":{}", classifier)?;
        }
        Ok(())
    }
}

/// A coordinate string that could not be parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinateError {
    pub input: String,
    pub expected: &'static str,
}

impl fmt::Display for CoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid coordinate '{}': expected {}", self.input, self.expected)
    }
}

impl std::error::Error for CoordinateError {}

fn split_coordinate(s: &str) -> Option<Vec<&str>> {
    let parts: Vec<&str> = s.trim().split(':').collect();
    if parts.iter().any(|p| p.is_empty()) {
        return None;
    }
    Some(parts)
}

impl FromStr for GradleSpecifier {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || CoordinateError {
            input: s.to_string(),
            expected: "group:name:version[:classifier]",
        };
        let parts = split_coordinate(s).ok_or_else(err)?;
        match parts.as_slice() {
            [group, name, version] => Ok(Self {
                group: group.to_string(),
                name: name.to_string(),
                version: version.to_string(),
                classifier: None,
            }),
            [group, name, version, classifier] => Ok(Self {
                group: group.to_string(),
                name: name.to_string(),
                version: version.to_string(),
                classifier: Some(classifier.to_string()),
            }),
            _ => Err(err()),
        }
    }
}

impl Serialize for GradleSpecifier {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GradleSpecifier {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleAction {
    Allow,
    Disallow,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsConstraint {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<String>,
}

/// One entry of a library's per-OS applicability rules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OsRule {
    pub action: RuleAction,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<OsConstraint>,
}

impl OsRule {
    fn applies_to(&self, os_name: &str) -> bool {
        match &self.os {
            None => true,
            Some(os) => os.name == os_name,
        }
    }
}

/// An installable library declared by a patch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Library {
    pub coordinate: GradleSpecifier,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub rules: Vec<OsRule>,

    /// OS name -> native classifier.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub natives: BTreeMap<String, String>,
}

impl Library {
    pub fn new(coordinate: GradleSpecifier) -> Self {
        Self {
            coordinate,
            url: None,
            rules: Vec::new(),
            natives: BTreeMap::new(),
        }
    }

    pub fn artifact_prefix(&self) -> String {
        self.coordinate.artifact_prefix()
    }

    pub fn is_native(&self) -> bool {
        !self.natives.is_empty()
    }

    /// Evaluate the rule list for `os_name`.
    ///
    /// No rules means the library is active everywhere. Otherwise the library starts out
    /// disallowed and the last matching rule decides.
    pub fn is_active_on(&self, os_name: &str) -> bool {
        if self.rules.is_empty() {
            return true;
        }
        let mut result = RuleAction::Disallow;
        for rule in &self.rules {
            if rule.applies_to(os_name) {
                result = rule.action;
            }
        }
        result == RuleAction::Allow
    }
}

/// Matcher used by `-libraries` entries: `group:name[:version]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LibraryMatcher {
    pub group: String,
    pub name: String,
    pub version: Option<String>,
}

impl LibraryMatcher {
    pub fn artifact_prefix(&self) -> String {
        format!("{}:{}", self.group, self.name)
    }

    pub fn matches(&self, library: &Library) -> bool {
        let c = &library.coordinate;
        if c.group != self.group || c.name != self.name {
            return false;
        }
        match &self.version {
            Some(v) => &c.version == v,
            None => true,
        }
    }
}

impl fmt::Display for LibraryMatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.group, self.name)?;
        if let Some(v) = &self.version {
            write!(f, ":{}", v)?;
        }
        Ok(())
    }
}

impl FromStr for LibraryMatcher {
    type Err = CoordinateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || CoordinateError {
            input: s.to_string(),
            expected: "group:name[:version]",
        };
        let parts = split_coordinate(s).ok_or_else(err)?;
        match parts.as_slice() {
            [group, name] => Ok(Self {
                group: group.to_string(),
                name: name.to_string(),
                version: None,
            }),
            // A full coordinate with classifier still only matches on group:name:version.
            [group, name, version] | [group, name, version, _] => Ok(Self {
                group: group.to_string(),
                name: name.to_string(),
                version: Some(version.to_string()),
            }),
            _ => Err(err()),
        }
    }
}

impl Serialize for LibraryMatcher {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for LibraryMatcher {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
