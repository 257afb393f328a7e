use super::unencrypted_endpoints::HTTP_RECEIVERS;
use super::utils::only_children;
use crate::error::{ConfigurationError, EvaluationError};
use crate::model::Artifact;
use crate::query::{ChannelFilter, DocumentQuery};
use crate::rule::{IssueEmitter, RuleLogic};
use cpilint_types::{Issue, IssueKind};
use cpilint_xml::Element;

const BASIC: &str = "Basic";

#[derive(Debug, Default)]
pub struct CleartextBasicAuthNotAllowed;

pub(super) fn build(node: &Element) -> Result<Box<dyn RuleLogic>, ConfigurationError> {
    only_children(node, &[])?;
    Ok(Box::new(CleartextBasicAuthNotAllowed))
}

impl RuleLogic for CleartextBasicAuthNotAllowed {
    fn inspect(
        &mut self,
        artifact: &Artifact,
        issues: &mut IssueEmitter<'_>,
    ) -> Result<(), EvaluationError> {
        let filter = ChannelFilter::receivers()
            .using(HTTP_RECEIVERS)
            .with_unencrypted_endpoint();
        for channel in DocumentQuery::default().channels(artifact.document(), &filter) {
            let basic = channel
                .authentication()
                .is_some_and(|auth| auth.eq_ignore_ascii_case(BASIC));
            if !basic {
                continue;
            }
            let address = channel.address().unwrap_or_default();
            issues.emit(Issue::new(
                IssueKind::CleartextBasicAuth {
                    channel: channel.name().to_string(),
                    address: address.to_string(),
                },
                artifact.tag().clone(),
                format!(
                    "Receiver channel '{}' sends Basic authentication credentials in cleartext to '{address}'",
                    channel.name()
                ),
            ));
        }
        Ok(())
    }
}
