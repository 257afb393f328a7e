//! Rule protocol.
//!
//! A [`Rule`] wraps the rule-specific [`RuleLogic`] together with the identity and lifecycle
//! state every rule shares. The lifecycle is `Configured -> Active -> Finalized`: `start` once,
//! `inspect` any number of times, `end` exactly once. The run's issue sink is handed to each
//! `inspect`/`end` call rather than stored in the rule.

use crate::consumer::IssueConsumer;
use crate::error::{ConfigurationError, EvaluationError};
use crate::model::Artifact;
use cpilint_types::{Issue, RuleId};
use std::fmt;

/// Rule-specific behavior.
///
/// Stateless rules only implement `inspect`. Rules whose verdict depends on the whole corpus
/// accumulate state in `inspect` and emit from `end`.
pub trait RuleLogic: fmt::Debug + Send {
    fn start(&mut self) -> Result<(), EvaluationError> {
        Ok(())
    }

    fn inspect(
        &mut self,
        artifact: &Artifact,
        issues: &mut IssueEmitter<'_>,
    ) -> Result<(), EvaluationError>;

    fn end(&mut self, issues: &mut IssueEmitter<'_>) -> Result<(), EvaluationError> {
        let _ = issues;
        Ok(())
    }
}

/// Forwards issues to the run's sink, stamped with the owning rule's id.
pub struct IssueEmitter<'a> {
    rule_id: Option<&'a RuleId>,
    sink: &'a mut dyn IssueConsumer,
}

impl<'a> IssueEmitter<'a> {
    pub fn new(rule_id: Option<&'a RuleId>, sink: &'a mut dyn IssueConsumer) -> Self {
        Self { rule_id, sink }
    }

    pub fn emit(&mut self, issue: Issue) {
        self.sink.consume(issue.with_rule_id(self.rule_id));
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RuleState {
    Configured,
    Active,
    Finalized,
}

#[derive(Debug)]
pub struct Rule {
    kind: String,
    id: Option<RuleId>,
    state: RuleState,
    logic: Box<dyn RuleLogic>,
}

impl Rule {
    pub fn new(kind: impl Into<String>, logic: impl RuleLogic + 'static) -> Self {
        Self::from_boxed(kind, Box::new(logic))
    }

    pub fn from_boxed(kind: impl Into<String>, logic: Box<dyn RuleLogic>) -> Self {
        Self {
            kind: kind.into(),
            id: None,
            state: RuleState::Configured,
            logic,
        }
    }

    /// Rules-file element the rule was built from.
    pub fn kind(&self) -> &str {
        &self.kind
    }

    pub fn id(&self) -> Option<&RuleId> {
        self.id.as_ref()
    }

    pub fn state(&self) -> RuleState {
        self.state
    }

    /// Set the rule's id. An id can be assigned once.
    pub fn assign_id(&mut self, id: RuleId) -> Result<(), ConfigurationError> {
        if let Some(existing) = &self.id {
            return Err(ConfigurationError::RuleIdAlreadyAssigned {
                existing: existing.to_string(),
                requested: id.to_string(),
            });
        }
        self.id = Some(id);
        Ok(())
    }

    pub fn start(&mut self) -> Result<(), EvaluationError> {
        self.expect_state(RuleState::Configured, "start")?;
        self.logic.start()?;
        self.state = RuleState::Active;
        Ok(())
    }

    pub fn inspect(
        &mut self,
        artifact: &Artifact,
        sink: &mut dyn IssueConsumer,
    ) -> Result<(), EvaluationError> {
        self.expect_state(RuleState::Active, "inspect")?;
        let mut emitter = IssueEmitter::new(self.id.as_ref(), sink);
        self.logic.inspect(artifact, &mut emitter)
    }

    pub fn end(&mut self, sink: &mut dyn IssueConsumer) -> Result<(), EvaluationError> {
        self.expect_state(RuleState::Active, "end")?;
        let mut emitter = IssueEmitter::new(self.id.as_ref(), sink);
        self.logic.end(&mut emitter)?;
        self.state = RuleState::Finalized;
        Ok(())
    }

    fn expect_state(&self, expected: RuleState, call: &str) -> Result<(), EvaluationError> {
        if self.state == expected {
            return Ok(());
        }
        Err(EvaluationError::Lifecycle {
            rule: self.to_string(),
            message: format!("{call} called in state {:?}", self.state),
        })
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.id {
            Some(id) => write!(f, "<{}> (id '{id}')", self.kind),
            None => write!(f, "<{}>", self.kind),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consumer::CollectingIssueConsumer;
    use crate::test_support::{artifact, iflow};
    use cpilint_types::IssueKind;

    #[derive(Debug, Default)]
    struct Echo;

    impl RuleLogic for Echo {
        fn inspect(
            &mut self,
            artifact: &Artifact,
            issues: &mut IssueEmitter<'_>,
        ) -> Result<(), EvaluationError> {
            issues.emit(Issue::new(
                IssueKind::MissingDescription,
                artifact.tag().clone(),
                "echo",
            ));
            Ok(())
        }
    }

    #[test]
    fn id_is_assigned_once() {
        let mut rule = Rule::new("echo", Echo);
        rule.assign_id(RuleId::new("r1")).expect("first assignment");
        let err = rule.assign_id(RuleId::new("r2")).expect_err("second assignment");
        assert!(matches!(err, ConfigurationError::RuleIdAlreadyAssigned { .. }));
        assert_eq!(rule.id().map(RuleId::as_str), Some("r1"));
    }

    #[test]
    fn emitted_issues_carry_the_rule_id() {
        let mut rule = Rule::new("echo", Echo);
        rule.assign_id(RuleId::new("r1")).expect("assign");
        let mut sink = CollectingIssueConsumer::new();
        rule.start().expect("start");
        rule.inspect(&artifact("A", iflow(None, Vec::new())), &mut sink)
            .expect("inspect");
        rule.end(&mut sink).expect("end");
        assert_eq!(sink.issues()[0].rule_id().map(RuleId::as_str), Some("r1"));
        assert_eq!(rule.state(), RuleState::Finalized);
    }

    #[test]
    fn lifecycle_is_enforced() {
        let mut sink = CollectingIssueConsumer::new();
        let a = artifact("A", iflow(None, Vec::new()));

        let mut not_started = Rule::new("echo", Echo);
        assert!(matches!(
            not_started.inspect(&a, &mut sink),
            Err(EvaluationError::Lifecycle { .. })
        ));

        let mut finished = Rule::new("echo", Echo);
        finished.start().expect("start");
        finished.end(&mut sink).expect("end");
        assert!(finished.inspect(&a, &mut sink).is_err());
        assert!(finished.end(&mut sink).is_err());
        assert!(finished.start().is_err());
    }
}
