//! Pure rule evaluation (no IO).
//!
//! Input: configured rules (built by factories from rules-file elements) and a sequence of
//! parsed artifacts.
//! Output: issues pushed through an [`IssueConsumer`] chain, plus a run summary.

#![forbid(unsafe_code)]

pub mod consumer;
pub mod error;
pub mod factory;
pub mod model;
pub mod naming;
pub mod query;
pub mod rule;
pub mod rules;

mod engine;

#[cfg(test)]
mod proptest;
#[cfg(test)]
mod test_support;

pub use consumer::{CollectingIssueConsumer, ExemptionFilteringIssueConsumer, IssueConsumer};
pub use engine::{RunSummary, run};
pub use error::{ConfigurationError, EvaluationError, ExtensionError, LintError};
pub use factory::{ElementIdentity, ExtensionRuleFactory, RuleFactory};
pub use model::{Artifact, IflowDocument, Resource, ResourceCategory};
pub use naming::NamingScheme;
pub use rule::{IssueEmitter, Rule, RuleLogic, RuleState};
