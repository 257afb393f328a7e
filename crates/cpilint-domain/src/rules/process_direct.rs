//! ProcessDirect address matching across the whole run.
//!
//! Receiver addresses are recorded as provisional issues; sender addresses are collected into
//! a set. Provisional issues whose address a sender serves are dropped at `end`. Matching is on
//! address text only, so two unrelated endpoints sharing an address are indistinguishable.

use super::utils::only_children;
use crate::error::{ConfigurationError, EvaluationError};
use crate::model::Artifact;
use crate::query::{AdapterKind, ChannelFilter, DocumentQuery};
use crate::rule::{IssueEmitter, RuleLogic};
use cpilint_types::{ArtifactTag, Issue, IssueKind};
use cpilint_xml::Element;
use std::collections::BTreeSet;

const PLACEHOLDER: &str = "${";

#[derive(Debug)]
struct Provisional {
    tag: ArtifactTag,
    channel: String,
    address: String,
}

#[derive(Debug, Default)]
pub struct MatchingProcessDirectChannelsRequired {
    sender_addresses: BTreeSet<String>,
    provisional: Vec<Provisional>,
}

pub(super) fn build(node: &Element) -> Result<Box<dyn RuleLogic>, ConfigurationError> {
    only_children(node, &[])?;
    Ok(Box::new(MatchingProcessDirectChannelsRequired::default()))
}

impl RuleLogic for MatchingProcessDirectChannelsRequired {
    fn inspect(
        &mut self,
        artifact: &Artifact,
        _issues: &mut IssueEmitter<'_>,
    ) -> Result<(), EvaluationError> {
        let query = DocumentQuery::default();
        let document = artifact.document();

        let receivers = ChannelFilter::receivers().using(&[AdapterKind::ProcessDirect]);
        for channel in query.channels(document, &receivers) {
            let Some(address) = channel.address() else {
                continue;
            };
            if address.contains(PLACEHOLDER) {
                tracing::debug!(
                    artifact = %artifact.tag().id,
                    address,
                    "skipping dynamic ProcessDirect address"
                );
                continue;
            }
            self.provisional.push(Provisional {
                tag: artifact.tag().clone(),
                channel: channel.name().to_string(),
                address: address.to_string(),
            });
        }

        let senders = ChannelFilter::senders().using(&[AdapterKind::ProcessDirect]);
        for channel in query.channels(document, &senders) {
            if let Some(address) = channel.address() {
                self.sender_addresses.insert(address.to_string());
            }
        }
        Ok(())
    }

    fn end(&mut self, issues: &mut IssueEmitter<'_>) -> Result<(), EvaluationError> {
        for p in std::mem::take(&mut self.provisional) {
            if self.sender_addresses.contains(&p.address) {
                continue;
            }
            let message = format!(
                "ProcessDirect receiver channel '{}' calls address '{}', which no inspected ProcessDirect sender channel serves",
                p.channel, p.address
            );
            issues.emit(Issue::new(
                IssueKind::UnmatchedProcessDirect {
                    channel: p.channel,
                    address: p.address,
                },
                p.tag,
                message,
            ));
        }
        Ok(())
    }
}
