use super::utils::only_children;
use crate::error::{ConfigurationError, EvaluationError};
use crate::model::Artifact;
use crate::query::DocumentQuery;
use crate::rule::{IssueEmitter, RuleLogic};
use cpilint_types::{Issue, IssueKind};
use cpilint_xml::Element;

#[derive(Debug, Default)]
pub struct IflowDescriptionRequired;

pub(super) fn build(node: &Element) -> Result<Box<dyn RuleLogic>, ConfigurationError> {
    only_children(node, &[])?;
    Ok(Box::new(IflowDescriptionRequired))
}

impl RuleLogic for IflowDescriptionRequired {
    fn inspect(
        &mut self,
        artifact: &Artifact,
        issues: &mut IssueEmitter<'_>,
    ) -> Result<(), EvaluationError> {
        if DocumentQuery::default().description(artifact)?.is_none() {
            issues.emit(Issue::new(
                IssueKind::MissingDescription,
                artifact.tag().clone(),
                format!("Integration flow {} has no description", artifact.tag()),
            ));
        }
        Ok(())
    }
}
