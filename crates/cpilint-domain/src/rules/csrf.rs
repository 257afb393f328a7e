use super::utils::only_children;
use crate::error::{ConfigurationError, EvaluationError};
use crate::model::Artifact;
use crate::query::{AdapterKind, ChannelFilter, DocumentQuery};
use crate::rule::{IssueEmitter, RuleLogic};
use cpilint_types::{Issue, IssueKind};
use cpilint_xml::Element;

const KEY_CSRF_PROTECTION: &str = "xsrfProtection";
const ENABLED: &str = "1";

#[derive(Debug, Default)]
pub struct CsrfProtectionRequired;

pub(super) fn build(node: &Element) -> Result<Box<dyn RuleLogic>, ConfigurationError> {
    only_children(node, &[])?;
    Ok(Box::new(CsrfProtectionRequired))
}

impl RuleLogic for CsrfProtectionRequired {
    fn inspect(
        &mut self,
        artifact: &Artifact,
        issues: &mut IssueEmitter<'_>,
    ) -> Result<(), EvaluationError> {
        let filter = ChannelFilter::senders().using(&[AdapterKind::Https]);
        for channel in DocumentQuery::default().channels(artifact.document(), &filter) {
            if channel.property(KEY_CSRF_PROTECTION) == Some(ENABLED) {
                continue;
            }
            issues.emit(Issue::new(
                IssueKind::CsrfProtectionMissing {
                    channel: channel.name().to_string(),
                },
                artifact.tag().clone(),
                format!(
                    "HTTPS sender channel '{}' does not have CSRF protection enabled",
                    channel.name()
                ),
            ));
        }
        Ok(())
    }
}
