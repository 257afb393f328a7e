use super::utils::{child_tokens, invalid, only_children, single_child};
use crate::error::{ConfigurationError, EvaluationError};
use crate::model::{Artifact, ResourceCategory};
use crate::naming::NamingScheme;
use crate::query::{ChannelFilter, DocumentQuery};
use crate::rule::{IssueEmitter, RuleLogic};
use cpilint_types::{Issue, IssueKind, ids};
use cpilint_xml::Element;
use std::collections::BTreeSet;

/// What a naming convention applies to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum NamingSubject {
    IflowName,
    IflowId,
    PackageName,
    PackageId,
    SenderChannelName,
    ReceiverChannelName,
    ScriptName,
    MappingName,
}

impl NamingSubject {
    pub const ALL: &'static [NamingSubject] = &[
        NamingSubject::IflowName,
        NamingSubject::IflowId,
        NamingSubject::PackageName,
        NamingSubject::PackageId,
        NamingSubject::SenderChannelName,
        NamingSubject::ReceiverChannelName,
        NamingSubject::ScriptName,
        NamingSubject::MappingName,
    ];

    pub fn token(self) -> &'static str {
        match self {
            NamingSubject::IflowName => "iflow.name",
            NamingSubject::IflowId => "iflow.id",
            NamingSubject::PackageName => "package.name",
            NamingSubject::PackageId => "package.id",
            NamingSubject::SenderChannelName => "sender-channel.name",
            NamingSubject::ReceiverChannelName => "receiver-channel.name",
            NamingSubject::ScriptName => "script.name",
            NamingSubject::MappingName => "mapping.name",
        }
    }

    pub fn from_token(token: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|s| s.token() == token)
    }

    fn describe(self) -> &'static str {
        match self {
            NamingSubject::IflowName => "integration flow name",
            NamingSubject::IflowId => "integration flow ID",
            NamingSubject::PackageName => "package name",
            NamingSubject::PackageId => "package ID",
            NamingSubject::SenderChannelName => "sender channel name",
            NamingSubject::ReceiverChannelName => "receiver channel name",
            NamingSubject::ScriptName => "script name",
            NamingSubject::MappingName => "mapping name",
        }
    }

    /// Names of this subject found in `artifact`.
    fn names(self, artifact: &Artifact) -> Vec<String> {
        let tag = artifact.tag();
        match self {
            NamingSubject::IflowName => vec![tag.name.clone()],
            NamingSubject::IflowId => vec![tag.id.to_string()],
            NamingSubject::PackageName => tag.package.iter().map(|p| p.name.clone()).collect(),
            NamingSubject::PackageId => tag.package.iter().map(|p| p.id.clone()).collect(),
            NamingSubject::SenderChannelName => channel_names(artifact, ChannelFilter::senders()),
            NamingSubject::ReceiverChannelName => {
                channel_names(artifact, ChannelFilter::receivers())
            }
            NamingSubject::ScriptName => resource_names(artifact, ResourceCategory::is_script),
            NamingSubject::MappingName => resource_names(artifact, ResourceCategory::is_mapping),
        }
    }
}

fn channel_names(artifact: &Artifact, filter: ChannelFilter) -> Vec<String> {
    DocumentQuery::default()
        .channels(artifact.document(), &filter)
        .iter()
        .map(|c| c.name().to_string())
        .collect()
}

fn resource_names(artifact: &Artifact, keep: fn(ResourceCategory) -> bool) -> Vec<String> {
    artifact
        .all_resources()
        .filter(|r| keep(r.category))
        .map(|r| r.file_name().to_string())
        .collect()
}

#[derive(Debug)]
pub struct NamingConventions {
    scheme: NamingScheme,
    message: String,
    subjects: BTreeSet<NamingSubject>,
}

impl NamingConventions {
    pub fn new(
        scheme: NamingScheme,
        message: impl Into<String>,
        subjects: BTreeSet<NamingSubject>,
    ) -> Self {
        Self {
            scheme,
            message: message.into(),
            subjects,
        }
    }
}

pub(super) fn build(node: &Element) -> Result<Box<dyn RuleLogic>, ConfigurationError> {
    only_children(
        node,
        &[ids::ELEMENT_SCHEME, ids::ELEMENT_MESSAGE, ids::ELEMENT_APPLY_TO],
    )?;

    let scheme_node = single_child(node, ids::ELEMENT_SCHEME)?;
    let scheme = match scheme_node.children() {
        [root] => NamingScheme::from_element(root)?,
        other => {
            return Err(ConfigurationError::NamingScheme(format!(
                "<{}> must contain exactly one scheme node, got {}",
                ids::ELEMENT_SCHEME,
                other.len()
            )));
        }
    };

    let message = single_child(node, ids::ELEMENT_MESSAGE)?.text();
    if message.is_empty() {
        return Err(invalid(node, format!("<{}> must not be empty", ids::ELEMENT_MESSAGE)));
    }

    let mut subjects = BTreeSet::new();
    for token in child_tokens(node, ids::ELEMENT_APPLY_TO)? {
        let subject = NamingSubject::from_token(token)
            .ok_or_else(|| invalid(node, format!("unknown <apply-to> subject '{token}'")))?;
        subjects.insert(subject);
    }
    if subjects.is_empty() {
        return Err(invalid(
            node,
            format!("at least one <{}> is required", ids::ELEMENT_APPLY_TO),
        ));
    }

    Ok(Box::new(NamingConventions::new(scheme, message, subjects)))
}

impl RuleLogic for NamingConventions {
    fn inspect(
        &mut self,
        artifact: &Artifact,
        issues: &mut IssueEmitter<'_>,
    ) -> Result<(), EvaluationError> {
        for subject in &self.subjects {
            for name in subject.names(artifact) {
                if self.scheme.test(&name) {
                    continue;
                }
                let message = format!("{} ({} '{name}')", self.message, subject.describe());
                issues.emit(Issue::new(
                    IssueKind::NamingConvention {
                        subject: subject.token().to_string(),
                        name,
                    },
                    artifact.tag().clone(),
                    message,
                ));
            }
        }
        Ok(())
    }
}
