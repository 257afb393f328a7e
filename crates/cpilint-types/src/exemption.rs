use crate::artifact::ArtifactId;
use crate::issue::RuleId;

/// A configured suppression: issues of `rule_id` implicating only `artifact_id` are not reported.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Exemption {
    rule_id: RuleId,
    artifact_id: ArtifactId,
}

impl Exemption {
    pub fn new(rule_id: RuleId, artifact_id: ArtifactId) -> Self {
        Self {
            rule_id,
            artifact_id,
        }
    }

    pub fn rule_id(&self) -> &RuleId {
        &self.rule_id
    }

    pub fn artifact_id(&self) -> &ArtifactId {
        &self.artifact_id
    }
}
