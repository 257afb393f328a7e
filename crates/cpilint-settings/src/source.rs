use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use cpilint_domain::ConfigurationError;
use std::collections::BTreeMap;

/// Where rules files come from.
pub trait RulesSource {
    /// Stable identity of `path`; two references to one document must yield equal paths.
    fn canonicalize(&self, path: &Utf8Path) -> Result<Utf8PathBuf, ConfigurationError>;

    fn read_to_string(&self, path: &Utf8Path) -> Result<String, ConfigurationError>;
}

/// Rules files held in memory, keyed by normalized path.
#[derive(Clone, Debug, Default)]
pub struct MemoryRulesSource {
    files: BTreeMap<Utf8PathBuf, String>,
}

impl MemoryRulesSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl AsRef<Utf8Path>, contents: impl Into<String>) -> Self {
        self.files
            .insert(normalize_path(path.as_ref()), contents.into());
        self
    }
}

impl RulesSource for MemoryRulesSource {
    fn canonicalize(&self, path: &Utf8Path) -> Result<Utf8PathBuf, ConfigurationError> {
        let normalized = normalize_path(path);
        if self.files.contains_key(&normalized) {
            Ok(normalized)
        } else {
            Err(not_found(path))
        }
    }

    fn read_to_string(&self, path: &Utf8Path) -> Result<String, ConfigurationError> {
        self.files
            .get(&normalize_path(path))
            .cloned()
            .ok_or_else(|| not_found(path))
    }
}

fn not_found(path: &Utf8Path) -> ConfigurationError {
    ConfigurationError::Io {
        path: path.to_string(),
        source: std::io::Error::new(std::io::ErrorKind::NotFound, "no such rules file"),
    }
}

/// Lexically resolve `.` and `..` components.
pub fn normalize_path(path: &Utf8Path) -> Utf8PathBuf {
    let mut out = Utf8PathBuf::new();
    for component in path.components() {
        match component {
            Utf8Component::CurDir => {}
            Utf8Component::ParentDir => match out.components().next_back() {
                Some(Utf8Component::Normal(_)) => {
                    out.pop();
                }
                // `..` above the root stays at the root.
                Some(Utf8Component::RootDir | Utf8Component::Prefix(_)) => {}
                _ => out.push(".."),
            },
            other => out.push(other.as_str()),
        }
    }
    out
}
