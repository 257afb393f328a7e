use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable identifier of one inspected artifact (the bundle symbolic name).
///
/// Exemptions are keyed by this value, so it is compared verbatim: no case folding or trimming
/// beyond what the artifact source applies when reading it.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ArtifactId(String);

impl ArtifactId {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ArtifactId {
    fn from(value: &str) -> Self {
        ArtifactId::new(value)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PackageInfo {
    pub id: String,
    pub name: String,
}

/// Identifies an inspected artifact in issues and reports.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtifactTag {
    pub id: ArtifactId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package: Option<PackageInfo>,
}

impl ArtifactTag {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: ArtifactId::new(id),
            name: name.into(),
            package: None,
        }
    }

    pub fn with_package(mut self, package: PackageInfo) -> Self {
        self.package = Some(package);
        self
    }
}

impl fmt::Display for ArtifactTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.name == self.id.as_str() {
            write!(f, "'{}'", self.id)
        } else {
            write!(f, "'{}' (ID '{}')", self.name, self.id)
        }
    }
}
