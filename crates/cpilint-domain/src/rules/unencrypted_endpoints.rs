use super::utils::only_children;
use crate::error::{ConfigurationError, EvaluationError};
use crate::model::Artifact;
use crate::query::{AdapterKind, ChannelFilter, DocumentQuery};
use crate::rule::{IssueEmitter, RuleLogic};
use cpilint_types::{Issue, IssueKind};
use cpilint_xml::Element;

/// Receiver adapters that call an HTTP(S) endpoint.
pub(super) const HTTP_RECEIVERS: &[AdapterKind] = &[
    AdapterKind::Http,
    AdapterKind::Soap,
    AdapterKind::IDoc,
    AdapterKind::OData,
];

#[derive(Debug, Default)]
pub struct UnencryptedEndpointsNotAllowed;

pub(super) fn build(node: &Element) -> Result<Box<dyn RuleLogic>, ConfigurationError> {
    only_children(node, &[])?;
    Ok(Box::new(UnencryptedEndpointsNotAllowed))
}

impl RuleLogic for UnencryptedEndpointsNotAllowed {
    fn inspect(
        &mut self,
        artifact: &Artifact,
        issues: &mut IssueEmitter<'_>,
    ) -> Result<(), EvaluationError> {
        let filter = ChannelFilter::receivers()
            .using(HTTP_RECEIVERS)
            .with_unencrypted_endpoint();
        for channel in DocumentQuery::default().channels(artifact.document(), &filter) {
            let address = channel.address().unwrap_or_default();
            issues.emit(Issue::new(
                IssueKind::UnencryptedEndpoint {
                    channel: channel.name().to_string(),
                    address: address.to_string(),
                },
                artifact.tag().clone(),
                format!(
                    "Receiver channel '{}' calls unencrypted endpoint '{address}'",
                    channel.name()
                ),
            ));
        }
        Ok(())
    }
}
