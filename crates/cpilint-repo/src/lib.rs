//! Filesystem adapters: discover and read unpacked artifacts, read rules files.
//!
//! This crate is allowed to do filesystem IO. Reading is parallel; the artifacts handed back are
//! always in sorted directory order so evaluation stays deterministic.

#![forbid(unsafe_code)]

mod discover;
mod manifest;
mod read;
mod rules_source;

use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use cpilint_domain::Artifact;
use rayon::prelude::*;
use std::collections::BTreeMap;

pub use discover::discover_artifact_dirs;
pub use manifest::{BundleManifest, parse_manifest};
pub use read::{categorize, read_artifact};
pub use rules_source::FsRulesSource;

/// Discover and read every artifact under `roots`.
///
/// Fails on the first unreadable artifact and when two directories declare the same id.
pub fn load_artifacts(roots: &[Utf8PathBuf]) -> anyhow::Result<Vec<Artifact>> {
    let mut dirs = Vec::new();
    for root in roots {
        let found = discover_artifact_dirs(root).with_context(|| format!("discover in {root}"))?;
        if found.is_empty() {
            tracing::warn!(root = %root, "no artifacts found");
        }
        dirs.extend(found);
    }
    dirs.sort();
    dirs.dedup();

    let artifacts = dirs
        .par_iter()
        .map(|dir| read_artifact(dir).with_context(|| format!("read artifact {dir}")))
        .collect::<anyhow::Result<Vec<_>>>()?;

    check_unique_ids(&dirs, &artifacts)?;
    tracing::info!(artifacts = artifacts.len(), "artifacts loaded");
    Ok(artifacts)
}

fn check_unique_ids(dirs: &[Utf8PathBuf], artifacts: &[Artifact]) -> anyhow::Result<()> {
    let mut seen: BTreeMap<&str, &Utf8Path> = BTreeMap::new();
    for (dir, artifact) in dirs.iter().zip(artifacts) {
        let id = artifact.tag().id.as_str();
        if let Some(first) = seen.insert(id, dir) {
            bail!("artifact id '{id}' is declared by both {first} and {dir}");
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use cpilint_domain::ResourceCategory;
    use tempfile::TempDir;

    fn utf8_root(tmp: &TempDir) -> Utf8PathBuf {
        Utf8PathBuf::from_path_buf(tmp.path().to_path_buf()).expect("utf8 path")
    }

    fn write_file(path: &Utf8Path, contents: &str) {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("create parent");
        }
        std::fs::write(path, contents).expect("write file");
    }

    const IFLOW: &str = r#"<bpmn2:definitions xmlns:bpmn2="http://www.omg.org/spec/BPMN/20100524/MODEL">
  <bpmn2:collaboration id="Collaboration_1"/>
</bpmn2:definitions>"#;

    fn write_artifact(root: &Utf8Path, dir: &str, id: &str) {
        let base = root.join(dir);
        write_file(
            &base.join("META-INF/MANIFEST.MF"),
            &format!("Manifest-Version: 1.0\nBundle-SymbolicName: {id}; singleton:=true\nBundle-Name: {id} flow\n"),
        );
        write_file(
            &base.join("src/main/resources/scenarioflows/integrationflow/flow.iflw"),
            IFLOW,
        );
        write_file(
            &base.join("src/main/resources/script/main.groovy"),
            "def process(msg) { msg }",
        );
        write_file(&base.join("src/main/resources/mapping/orders.mmap"), "<mapping/>");
        write_file(&base.join("src/main/resources/script/notes.txt"), "ignored");
    }

    #[test]
    fn loads_artifacts_in_directory_order() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_artifact(&root, "zeta", "Zeta");
        write_artifact(&root, "alpha", "Alpha");

        let artifacts = load_artifacts(std::slice::from_ref(&root)).expect("load");
        let ids: Vec<_> = artifacts.iter().map(|a| a.tag().id.as_str()).collect();
        assert_eq!(ids, vec!["Alpha", "Zeta"]);

        let alpha = &artifacts[0];
        assert_eq!(alpha.tag().name, "Alpha flow");
        assert_eq!(alpha.tag().package, None);
        assert_eq!(alpha.resources(ResourceCategory::GroovyScript).len(), 1);
        assert_eq!(alpha.resources(ResourceCategory::MessageMapping).len(), 1);
        assert_eq!(alpha.all_resources().count(), 2);
        assert_eq!(alpha.document().root().local_name(), "definitions");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_artifact(&root, "one", "Same");
        write_artifact(&root, "two", "Same");

        let err = load_artifacts(&[root]).unwrap_err();
        assert!(format!("{err:#}").contains("'Same'"), "{err:#}");
    }

    #[test]
    fn overlapping_roots_are_read_once() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_artifact(&root, "flows/a", "A");

        let artifacts = load_artifacts(&[root.clone(), root.join("flows")]).expect("load");
        assert_eq!(artifacts.len(), 1);
    }

    #[test]
    fn missing_iflow_is_an_error() {
        let tmp = TempDir::new().expect("temp dir");
        let root = utf8_root(&tmp);
        write_file(
            &root.join("broken/META-INF/MANIFEST.MF"),
            "Bundle-SymbolicName: Broken\n",
        );
        std::fs::create_dir_all(root.join("broken/src/main/resources/scenarioflows/integrationflow"))
            .expect("mkdir");

        let err = load_artifacts(&[root]).unwrap_err();
        assert!(format!("{err:#}").contains(".iflw"), "{err:#}");
    }
}
