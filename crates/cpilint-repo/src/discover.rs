use crate::read::MANIFEST_PATH;
use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use walkdir::WalkDir;

/// Find unpacked artifact directories under `root`.
///
/// An artifact directory is one holding `META-INF/MANIFEST.MF`. The search does not descend
/// into an artifact once found. Results are sorted.
pub fn discover_artifact_dirs(root: &Utf8Path) -> anyhow::Result<Vec<Utf8PathBuf>> {
    if !root.is_dir() {
        anyhow::bail!("{root} is not a directory");
    }

    let mut out = Vec::new();
    let mut walker = WalkDir::new(root).sort_by_file_name().into_iter();
    while let Some(entry) = walker.next() {
        let entry = entry.with_context(|| format!("walk {root}"))?;
        if !entry.file_type().is_dir() {
            continue;
        }
        let Some(dir) = Utf8Path::from_path(entry.path()) else {
            tracing::debug!(path = %entry.path().display(), "skipping non-UTF-8 path");
            continue;
        };
        if dir.join(MANIFEST_PATH).is_file() {
            out.push(dir.to_path_buf());
            walker.skip_current_dir();
        }
    }

    out.sort();
    Ok(out)
}
