//! Issue sinks.

use cpilint_types::{ArtifactId, Exemption, Issue, RuleId};
use std::collections::{BTreeMap, BTreeSet};

/// Receives every issue raised during a run.
pub trait IssueConsumer {
    fn consume(&mut self, issue: Issue);

    /// Issues this consumer has accepted as reportable.
    fn issues_consumed(&self) -> usize;
}

/// Terminal sink: keeps every issue in arrival order.
#[derive(Debug, Default)]
pub struct CollectingIssueConsumer {
    issues: Vec<Issue>,
}

impl CollectingIssueConsumer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issues(&self) -> &[Issue] {
        &self.issues
    }

    pub fn into_issues(self) -> Vec<Issue> {
        self.issues
    }
}

impl IssueConsumer for CollectingIssueConsumer {
    fn consume(&mut self, issue: Issue) {
        self.issues.push(issue);
    }

    fn issues_consumed(&self) -> usize {
        self.issues.len()
    }
}

/// Drops exempted issues before they reach `inner`.
///
/// An issue is exempt when it carries a rule id and every artifact it implicates is exempted
/// for that rule. The consumed count is the inner sink's, so suppressed issues never count.
#[derive(Debug)]
pub struct ExemptionFilteringIssueConsumer<C> {
    exemptions: BTreeMap<RuleId, BTreeSet<ArtifactId>>,
    inner: C,
    suppressed: usize,
}

impl<C: IssueConsumer> ExemptionFilteringIssueConsumer<C> {
    pub fn new<'a>(exemptions: impl IntoIterator<Item = &'a Exemption>, inner: C) -> Self {
        let mut table: BTreeMap<RuleId, BTreeSet<ArtifactId>> = BTreeMap::new();
        for exemption in exemptions {
            table
                .entry(exemption.rule_id().clone())
                .or_default()
                .insert(exemption.artifact_id().clone());
        }
        Self {
            exemptions: table,
            inner,
            suppressed: 0,
        }
    }

    pub fn is_exempt(&self, issue: &Issue) -> bool {
        let Some(rule_id) = issue.rule_id() else {
            return false;
        };
        let Some(artifacts) = self.exemptions.get(rule_id) else {
            return false;
        };
        issue.tag_ids().all(|id| artifacts.contains(id))
    }

    pub fn suppressed(&self) -> usize {
        self.suppressed
    }

    pub fn inner(&self) -> &C {
        &self.inner
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C: IssueConsumer> IssueConsumer for ExemptionFilteringIssueConsumer<C> {
    fn consume(&mut self, issue: Issue) {
        if self.is_exempt(&issue) {
            self.suppressed += 1;
            tracing::info!(
                rule_id = issue.rule_id().map(RuleId::as_str).unwrap_or_default(),
                artifacts = %issue.tag_ids().map(ArtifactId::as_str).collect::<Vec<_>>().join(", "),
                "issue suppressed by exemption: {}",
                issue.message()
            );
            return;
        }
        self.inner.consume(issue);
    }

    fn issues_consumed(&self) -> usize {
        self.inner.issues_consumed()
    }
}
