use crate::artifact::{ArtifactId, ArtifactTag};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::fmt;

/// Identifier assigned to a rule through the `id` attribute of its rules-file element.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleId(String);

impl RuleId {
    pub fn new<S: Into<String>>(s: S) -> Self {
        Self(s.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RuleId {
    fn from(value: &str) -> Self {
        RuleId::new(value)
    }
}

/// Which value domain an allow/disallow list rule ranges over.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListFacet {
    ReceiverAdapter,
    SenderAdapter,
    MappingType,
    ScriptingLanguage,
}

impl ListFacet {
    pub fn describe(self) -> &'static str {
        match self {
            ListFacet::ReceiverAdapter => "receiver adapter",
            ListFacet::SenderAdapter => "sender adapter",
            ListFacet::MappingType => "mapping type",
            ListFacet::ScriptingLanguage => "scripting language",
        }
    }
}

/// One resource implicated by a content-duplicate issue.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ResourceRef {
    pub artifact_id: ArtifactId,
    pub name: String,
}

/// Structured payload of an issue, discriminated by `kind`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IssueKind {
    DisallowedValue {
        facet: ListFacet,
        value: String,
        /// Channel, step or resource carrying the value.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        element: Option<String>,
    },
    MissingDescription,
    NamingConvention {
        subject: String,
        name: String,
    },
    UnencryptedEndpoint {
        channel: String,
        address: String,
    },
    CleartextBasicAuth {
        channel: String,
        address: String,
    },
    CsrfProtectionMissing {
        channel: String,
    },
    DuplicateResources {
        category: String,
        digest: String,
        resources: Vec<ResourceRef>,
    },
    UnmatchedProcessDirect {
        channel: String,
        address: String,
    },
    /// Raised by third-party rules; `code` is chosen by the extension.
    Extension {
        code: String,
        #[serde(default, skip_serializing_if = "serde_json::Value::is_null")]
        data: JsonValue,
    },
}

impl IssueKind {
    /// Short snake_case discriminator, matching the serialized `kind` tag.
    pub fn code(&self) -> &str {
        match self {
            IssueKind::DisallowedValue { .. } => "disallowed_value",
            IssueKind::MissingDescription => "missing_description",
            IssueKind::NamingConvention { .. } => "naming_convention",
            IssueKind::UnencryptedEndpoint { .. } => "unencrypted_endpoint",
            IssueKind::CleartextBasicAuth { .. } => "cleartext_basic_auth",
            IssueKind::CsrfProtectionMissing { .. } => "csrf_protection_missing",
            IssueKind::DuplicateResources { .. } => "duplicate_resources",
            IssueKind::UnmatchedProcessDirect { .. } => "unmatched_process_direct",
            IssueKind::Extension { code, .. } => code,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("an issue must implicate at least one artifact")]
pub struct NoArtifactsError;

/// A policy violation found by a rule.
///
/// Always implicates at least one artifact. Tags are kept sorted and deduplicated so two issues
/// over the same artifacts compare equal regardless of discovery order.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawIssue")]
pub struct Issue {
    #[serde(skip_serializing_if = "Option::is_none")]
    rule_id: Option<RuleId>,
    #[serde(rename = "detail")]
    kind: IssueKind,
    tags: Vec<ArtifactTag>,
    message: String,
}

#[derive(Deserialize)]
struct RawIssue {
    #[serde(default)]
    rule_id: Option<RuleId>,
    #[serde(rename = "detail")]
    kind: IssueKind,
    tags: Vec<ArtifactTag>,
    message: String,
}

impl TryFrom<RawIssue> for Issue {
    type Error = NoArtifactsError;

    fn try_from(raw: RawIssue) -> Result<Self, Self::Error> {
        let mut issue = Issue::spanning(raw.kind, raw.tags, raw.message)?;
        issue.rule_id = raw.rule_id;
        Ok(issue)
    }
}

impl Issue {
    pub fn new(kind: IssueKind, tag: ArtifactTag, message: impl Into<String>) -> Self {
        Self {
            rule_id: None,
            kind,
            tags: vec![tag],
            message: message.into(),
        }
    }

    /// Build an issue implicating every tag in `tags`.
    pub fn spanning(
        kind: IssueKind,
        tags: impl IntoIterator<Item = ArtifactTag>,
        message: impl Into<String>,
    ) -> Result<Self, NoArtifactsError> {
        let mut tags: Vec<ArtifactTag> = tags.into_iter().collect();
        tags.sort();
        tags.dedup();
        if tags.is_empty() {
            return Err(NoArtifactsError);
        }
        Ok(Self {
            rule_id: None,
            kind,
            tags,
            message: message.into(),
        })
    }

    /// Stamp the owning rule's identifier. Replaces nothing if the issue already carries one.
    pub fn with_rule_id(mut self, rule_id: Option<&RuleId>) -> Self {
        if self.rule_id.is_none() {
            self.rule_id = rule_id.cloned();
        }
        self
    }

    pub fn rule_id(&self) -> Option<&RuleId> {
        self.rule_id.as_ref()
    }

    pub fn kind(&self) -> &IssueKind {
        &self.kind
    }

    pub fn tags(&self) -> &[ArtifactTag] {
        &self.tags
    }

    pub fn tag_ids(&self) -> impl Iterator<Item = &ArtifactId> {
        self.tags.iter().map(|t| &t.id)
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn spanning_rejects_empty_tags() {
        let err = Issue::spanning(IssueKind::MissingDescription, Vec::new(), "x");
        assert_eq!(err, Err(NoArtifactsError));
    }

    #[test]
    fn spanning_sorts_and_dedups_tags() {
        let issue = Issue::spanning(
            IssueKind::MissingDescription,
            vec![
                ArtifactTag::new("B", "B"),
                ArtifactTag::new("A", "A"),
                ArtifactTag::new("B", "B"),
            ],
            "x",
        )
        .expect("non-empty");
        let ids: Vec<&str> = issue.tag_ids().map(|id| id.as_str()).collect();
        assert_eq!(ids, vec!["A", "B"]);
    }

    #[test]
    fn rule_id_is_stamped_once() {
        let issue = Issue::new(
            IssueKind::MissingDescription,
            ArtifactTag::new("A", "A"),
            "x",
        )
        .with_rule_id(Some(&RuleId::new("first")))
        .with_rule_id(Some(&RuleId::new("second")));
        assert_eq!(issue.rule_id().map(RuleId::as_str), Some("first"));
    }

    #[test]
    fn deserializing_issue_without_tags_fails() {
        let json = r#"{"detail":{"kind":"missing_description"},"tags":[],"message":"x"}"#;
        assert!(serde_json::from_str::<Issue>(json).is_err());
    }

    #[test]
    fn issue_json_uses_kind_tag() {
        let issue = Issue::new(
            IssueKind::CsrfProtectionMissing {
                channel: "HTTPS".to_string(),
            },
            ArtifactTag::new("A", "A"),
            "x",
        );
        let value = serde_json::to_value(&issue).expect("serialize");
        assert_eq!(value["detail"]["kind"], "csrf_protection_missing");
        assert_eq!(value["detail"]["channel"], "HTTPS");
        assert!(value.get("rule_id").is_none());
    }
}
