//! `META-INF/MANIFEST.MF` parsing.

use anyhow::bail;
use std::collections::BTreeMap;

pub(crate) const SYMBOLIC_NAME: &str = "Bundle-SymbolicName";
pub(crate) const BUNDLE_NAME: &str = "Bundle-Name";

/// Identity of an artifact as declared in its bundle manifest.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BundleManifest {
    pub symbolic_name: String,
    pub name: String,
}

/// Parse manifest text.
///
/// Lines starting with a single space continue the previous header. Directives after `;` in the
/// symbolic name are dropped; a missing `Bundle-Name` falls back to the symbolic name.
pub fn parse_manifest(text: &str) -> anyhow::Result<BundleManifest> {
    let headers = headers(text);
    let Some(symbolic_name) = headers
        .get(SYMBOLIC_NAME)
        .and_then(|v| v.split(';').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
    else {
        bail!("manifest has no {SYMBOLIC_NAME}");
    };
    let name = headers
        .get(BUNDLE_NAME)
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .unwrap_or(symbolic_name);

    Ok(BundleManifest {
        symbolic_name: symbolic_name.to_string(),
        name: name.to_string(),
    })
}

fn headers(text: &str) -> BTreeMap<String, String> {
    let mut out: BTreeMap<String, String> = BTreeMap::new();
    let mut current: Option<String> = None;
    for line in text.lines() {
        let line = line.strip_suffix('\r').unwrap_or(line);
        if let Some(rest) = line.strip_prefix(' ') {
            if let Some(value) = current.as_ref().and_then(|key| out.get_mut(key)) {
                value.push_str(rest);
            }
            continue;
        }
        current = match line.split_once(':') {
            Some((key, value)) => {
                let key = key.trim().to_string();
                out.insert(key.clone(), value.trim_start().to_string());
                Some(key)
            }
            None => None,
        };
    }
    out
}
