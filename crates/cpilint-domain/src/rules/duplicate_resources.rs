//! Content-duplicate detection across the whole run.
//!
//! Resources are grouped by (category, SHA-256 of raw bytes). Groups are only judged at `end`,
//! after every artifact has been seen.

use super::utils::{child_tokens, invalid, only_children};
use crate::error::{ConfigurationError, EvaluationError};
use crate::model::{Artifact, ResourceCategory};
use crate::rule::{IssueEmitter, RuleLogic};
use cpilint_types::{ArtifactTag, Issue, IssueKind, ResourceRef, ids};
use cpilint_xml::Element;
use sha2::{Digest, Sha256};
use std::collections::{BTreeMap, BTreeSet};

/// Categories checked when the rule names none.
pub const DEFAULT_DUPLICATE_CATEGORIES: &[ResourceCategory] = &[
    ResourceCategory::GroovyScript,
    ResourceCategory::JavaScript,
    ResourceCategory::MessageMapping,
    ResourceCategory::OperationMapping,
    ResourceCategory::Xslt,
];

#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
struct Member {
    tag: ArtifactTag,
    name: String,
}

#[derive(Debug)]
pub struct DuplicateResourcesNotAllowed {
    categories: BTreeSet<ResourceCategory>,
    // Single writer: only `inspect` and `end` of this rule touch it.
    groups: BTreeMap<(ResourceCategory, String), BTreeSet<Member>>,
}

impl DuplicateResourcesNotAllowed {
    pub fn new(categories: impl IntoIterator<Item = ResourceCategory>) -> Self {
        Self {
            categories: categories.into_iter().collect(),
            groups: BTreeMap::new(),
        }
    }

    pub fn categories(&self) -> &BTreeSet<ResourceCategory> {
        &self.categories
    }
}

impl Default for DuplicateResourcesNotAllowed {
    fn default() -> Self {
        Self::new(DEFAULT_DUPLICATE_CATEGORIES.iter().copied())
    }
}

pub(super) fn build(node: &Element) -> Result<Box<dyn RuleLogic>, ConfigurationError> {
    only_children(node, &[ids::ELEMENT_RESOURCE_TYPE])?;
    let tokens = child_tokens(node, ids::ELEMENT_RESOURCE_TYPE)?;
    if tokens.is_empty() {
        return Ok(Box::new(DuplicateResourcesNotAllowed::default()));
    }
    let mut categories = BTreeSet::new();
    for token in tokens {
        let category = ResourceCategory::from_token(token)
            .ok_or_else(|| invalid(node, format!("unknown resource type '{token}'")))?;
        categories.insert(category);
    }
    Ok(Box::new(DuplicateResourcesNotAllowed::new(categories)))
}

pub(crate) fn content_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

impl RuleLogic for DuplicateResourcesNotAllowed {
    fn inspect(
        &mut self,
        artifact: &Artifact,
        _issues: &mut IssueEmitter<'_>,
    ) -> Result<(), EvaluationError> {
        for category in &self.categories {
            for resource in artifact.resources(*category) {
                let digest = content_digest(&resource.content);
                self.groups
                    .entry((*category, digest))
                    .or_default()
                    .insert(Member {
                        tag: artifact.tag().clone(),
                        name: resource.name.clone(),
                    });
            }
        }
        Ok(())
    }

    fn end(&mut self, issues: &mut IssueEmitter<'_>) -> Result<(), EvaluationError> {
        for ((category, digest), members) in std::mem::take(&mut self.groups) {
            if members.len() < 2 {
                continue;
            }
            let listing = members
                .iter()
                .map(|m| format!("'{}' in {}", m.name, m.tag))
                .collect::<Vec<_>>()
                .join(", ");
            let resources = members
                .iter()
                .map(|m| ResourceRef {
                    artifact_id: m.tag.id.clone(),
                    name: m.name.clone(),
                })
                .collect();
            let issue = Issue::spanning(
                IssueKind::DuplicateResources {
                    category: category.token().to_string(),
                    digest,
                    resources,
                },
                members.into_iter().map(|m| m.tag),
                format!("Duplicate {category} resources: {listing}"),
            )
            .map_err(|_| EvaluationError::NoArtifacts {
                rule: ids::RULE_DUPLICATE_RESOURCES_NOT_ALLOWED.to_string(),
            })?;
            issues.emit(issue);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn digest_is_lowercase_hex_sha256() {
        assert_eq!(
            content_digest(b""),
            "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
        );
    }
}
