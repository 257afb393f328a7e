//! Reading one unpacked artifact directory.

use crate::manifest::parse_manifest;
use anyhow::{Context, bail};
use camino::{Utf8Path, Utf8PathBuf};
use cpilint_domain::{Artifact, IflowDocument, Resource, ResourceCategory};
use cpilint_types::ArtifactTag;
use walkdir::WalkDir;

pub(crate) const MANIFEST_PATH: &str = "META-INF/MANIFEST.MF";
const IFLOW_DIR: &str = "src/main/resources/scenarioflows/integrationflow";
const RESOURCES_DIR: &str = "src/main/resources";

/// Resource folders under `src/main/resources`.
const RESOURCE_FOLDERS: &[&str] = &["script", "mapping", "xsd", "wsdl", "edmx", "json", "lib"];

/// Read the artifact unpacked at `dir`.
pub fn read_artifact(dir: &Utf8Path) -> anyhow::Result<Artifact> {
    let manifest_path = dir.join(MANIFEST_PATH);
    let text = std::fs::read_to_string(&manifest_path)
        .with_context(|| format!("read {manifest_path}"))?;
    let manifest = parse_manifest(&text).with_context(|| format!("parse {manifest_path}"))?;

    let iflow_path = find_iflow(dir)?;
    let iflow_text =
        std::fs::read_to_string(&iflow_path).with_context(|| format!("read {iflow_path}"))?;
    let root = cpilint_xml::parse_document(&iflow_text)
        .with_context(|| format!("parse {iflow_path}"))?;

    let tag = ArtifactTag::new(manifest.symbolic_name, manifest.name);
    let mut artifact = Artifact::new(tag, IflowDocument::new(root));
    for resource in read_resources(dir)? {
        artifact.add_resource(resource);
    }
    tracing::debug!(
        artifact = %artifact.tag(),
        resources = artifact.all_resources().count(),
        "read artifact"
    );
    Ok(artifact)
}

fn find_iflow(dir: &Utf8Path) -> anyhow::Result<Utf8PathBuf> {
    let iflow_dir = dir.join(IFLOW_DIR);
    let mut found = Vec::new();
    let entries =
        std::fs::read_dir(&iflow_dir).with_context(|| format!("read directory {iflow_dir}"))?;
    for entry in entries {
        let entry = entry.with_context(|| format!("read directory {iflow_dir}"))?;
        let Ok(path) = Utf8PathBuf::from_path_buf(entry.path()) else {
            continue;
        };
        if path.extension() == Some("iflw") && path.is_file() {
            found.push(path);
        }
    }
    match found.len() {
        1 => Ok(found.remove(0)),
        0 => bail!("no .iflw document in {iflow_dir}"),
        n => bail!("expected one .iflw document in {iflow_dir}, found {n}"),
    }
}

fn read_resources(dir: &Utf8Path) -> anyhow::Result<Vec<Resource>> {
    let mut out = Vec::new();
    let resources = dir.join(RESOURCES_DIR);
    for folder in RESOURCE_FOLDERS {
        let root = resources.join(folder);
        if !root.is_dir() {
            continue;
        }
        for entry in WalkDir::new(&root).sort_by_file_name() {
            let entry = entry.with_context(|| format!("walk {root}"))?;
            if !entry.file_type().is_file() {
                continue;
            }
            let Some(path) = Utf8Path::from_path(entry.path()) else {
                continue;
            };
            let Some(category) = categorize(folder, path) else {
                tracing::debug!(path = %path, "ignoring unrecognised resource");
                continue;
            };
            let content = std::fs::read(path).with_context(|| format!("read {path}"))?;
            out.push(Resource::new(resource_name(&resources, path), category, content));
        }
    }
    Ok(out)
}

/// Path of `path` below `resources`, `/`-separated, e.g. `script/util/common.groovy`.
fn resource_name(resources: &Utf8Path, path: &Utf8Path) -> String {
    let relative = path.strip_prefix(resources).unwrap_or(path);
    relative
        .components()
        .map(|c| c.as_str())
        .collect::<Vec<_>>()
        .join("/")
}

/// Category of a resource file, by folder and extension.
pub fn categorize(folder: &str, path: &Utf8Path) -> Option<ResourceCategory> {
    let extension = path.extension()?.to_ascii_lowercase();
    let category = match (folder, extension.as_str()) {
        ("script", "groovy" | "gsh" | "gy") => ResourceCategory::GroovyScript,
        ("script", "js") => ResourceCategory::JavaScript,
        ("mapping", "mmap") => ResourceCategory::MessageMapping,
        ("mapping", "opmap") => ResourceCategory::OperationMapping,
        ("mapping", "xsl" | "xslt") => ResourceCategory::Xslt,
        ("xsd", "xsd") => ResourceCategory::Xsd,
        ("wsdl", "wsdl") => ResourceCategory::Wsdl,
        ("edmx", "edmx") => ResourceCategory::Edmx,
        ("json", "json") => ResourceCategory::Json,
        ("lib", "jar") => ResourceCategory::Archive,
        _ => return None,
    };
    Some(category)
}
