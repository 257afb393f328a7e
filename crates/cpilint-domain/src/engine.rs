//! Run engine: start every rule, inspect each artifact in supply order, then end every rule.
//!
//! The first failure aborts the run as a [`LintError`].

use crate::consumer::IssueConsumer;
use crate::error::LintError;
use crate::model::Artifact;
use crate::rule::Rule;
use std::error::Error as StdError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub artifacts_inspected: usize,
    /// Issues that reached the terminal sink (exempted issues excluded).
    pub issues_found: usize,
}

/// Run every rule over every artifact.
///
/// All `start` hooks run first, then each artifact is shown to each rule in order, then all
/// `end` hooks run. Any error aborts the run; issues already consumed are not reported.
pub fn run<I, E>(
    rules: &mut [Rule],
    artifacts: I,
    consumer: &mut dyn IssueConsumer,
) -> Result<RunSummary, LintError>
where
    I: IntoIterator<Item = Result<Artifact, E>>,
    E: Into<Box<dyn StdError + Send + Sync>>,
{
    for rule in rules.iter_mut() {
        rule.start()?;
    }

    let mut artifacts_inspected = 0;
    for artifact in artifacts {
        let artifact = artifact.map_err(|e| LintError::Source(e.into()))?;
        tracing::debug!(artifact = %artifact.tag().id, "inspecting artifact");
        for rule in rules.iter_mut() {
            rule.inspect(&artifact, consumer)?;
        }
        artifacts_inspected += 1;
    }

    for rule in rules.iter_mut() {
        rule.end(consumer)?;
    }

    Ok(RunSummary {
        artifacts_inspected,
        issues_found: consumer.issues_consumed(),
    })
}
