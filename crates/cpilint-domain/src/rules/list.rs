//! Allow/disallow list rules.
//!
//! One factory serves both the `allowed-*` and `disallowed-*` element of a facet. An allow list
//! with values V searches for the rest of the facet's domain; a disallow list searches for V.

use super::utils::{child_tokens, invalid, only_children};
use crate::error::{ConfigurationError, EvaluationError};
use crate::factory::{ElementIdentity, RuleFactory};
use crate::model::{Artifact, ResourceCategory};
use crate::query::{
    AdapterKind, ChannelFilter, DocumentQuery, ListValue, MappingType, ScriptingLanguage,
    StepFilter,
};
use crate::rule::{IssueEmitter, Rule, RuleLogic};
use cpilint_types::{Issue, IssueKind, ListFacet, ids};
use cpilint_xml::Element;
use std::collections::BTreeSet;
use std::fmt;

/// One place in an artifact where a facet value is used.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Occurrence<T> {
    pub value: T,
    /// What carries the value, e.g. `channel`.
    pub noun: &'static str,
    pub name: String,
}

type FindFn<T> = fn(&Artifact) -> Vec<Occurrence<T>>;

pub struct ListRule<T: ListValue> {
    facet: ListFacet,
    allow_list: bool,
    searched: BTreeSet<T>,
    find: FindFn<T>,
}

impl<T: ListValue> ListRule<T> {
    pub fn new(
        facet: ListFacet,
        allow_list: bool,
        configured: BTreeSet<T>,
        domain: &[T],
        find: FindFn<T>,
    ) -> Self {
        let searched = if allow_list {
            domain
                .iter()
                .copied()
                .filter(|v| !configured.contains(v))
                .collect()
        } else {
            configured
        };
        Self {
            facet,
            allow_list,
            searched,
            find,
        }
    }

    /// Values whose presence raises an issue.
    pub fn searched(&self) -> &BTreeSet<T> {
        &self.searched
    }
}

impl<T: ListValue> fmt::Debug for ListRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListRule")
            .field("facet", &self.facet)
            .field("allow_list", &self.allow_list)
            .field("searched", &self.searched)
            .finish()
    }
}

impl<T: ListValue> RuleLogic for ListRule<T> {
    fn inspect(
        &mut self,
        artifact: &Artifact,
        issues: &mut IssueEmitter<'_>,
    ) -> Result<(), EvaluationError> {
        for occurrence in (self.find)(artifact) {
            if !self.searched.contains(&occurrence.value) {
                continue;
            }
            let value = occurrence.value.token();
            let message = if self.allow_list {
                format!(
                    "{value} is not on the list of allowed {}s ({} '{}')",
                    self.facet.describe(),
                    occurrence.noun,
                    occurrence.name
                )
            } else {
                format!(
                    "{value} {} is not allowed ({} '{}')",
                    self.facet.describe(),
                    occurrence.noun,
                    occurrence.name
                )
            };
            issues.emit(Issue::new(
                IssueKind::DisallowedValue {
                    facet: self.facet,
                    value: value.to_string(),
                    element: Some(occurrence.name),
                },
                artifact.tag().clone(),
                message,
            ));
        }
        Ok(())
    }
}

type ConstructFn<T> = fn(bool, BTreeSet<T>) -> Box<dyn RuleLogic>;

/// Builds list rules for one facet from its token table.
pub struct ListRuleFactory<T: ListValue> {
    allow_element: &'static str,
    disallow_element: &'static str,
    table: &'static [T],
    construct: ConstructFn<T>,
}

impl<T: ListValue> ListRuleFactory<T> {
    pub fn new(
        allow_element: &'static str,
        disallow_element: &'static str,
        table: &'static [T],
        construct: ConstructFn<T>,
    ) -> Self {
        Self {
            allow_element,
            disallow_element,
            table,
            construct,
        }
    }

    fn lookup(&self, token: &str) -> Option<T> {
        self.table.iter().copied().find(|v| v.token() == token)
    }

    fn expected_tokens(&self) -> String {
        self.table
            .iter()
            .map(|v| v.token())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl<T: ListValue> RuleFactory for ListRuleFactory<T> {
    fn is_factory_for(&self, identity: ElementIdentity<'_>) -> bool {
        identity.namespace.is_none()
            && (identity.local_name == self.allow_element
                || identity.local_name == self.disallow_element)
    }

    fn create_from(&self, node: &Element) -> Result<Rule, ConfigurationError> {
        let allow_list = node.local_name() == self.allow_element;
        let entry = if allow_list {
            ids::ELEMENT_ALLOW
        } else {
            ids::ELEMENT_DISALLOW
        };
        only_children(node, &[entry])?;

        let mut values = BTreeSet::new();
        for token in child_tokens(node, entry)? {
            let value = self.lookup(token).ok_or_else(|| {
                invalid(
                    node,
                    format!(
                        "unknown value '{token}'; expected one of: {}",
                        self.expected_tokens()
                    ),
                )
            })?;
            values.insert(value);
        }
        if values.is_empty() {
            return Err(invalid(node, format!("at least one <{entry}> is required")));
        }

        tracing::debug!(rule = node.local_name(), values = values.len(), "built list rule");
        Ok(Rule::from_boxed(
            node.local_name(),
            (self.construct)(allow_list, values),
        ))
    }
}

pub fn receiver_adapters(allow_list: bool, values: BTreeSet<AdapterKind>) -> Box<dyn RuleLogic> {
    Box::new(ListRule::new(
        ListFacet::ReceiverAdapter,
        allow_list,
        values,
        AdapterKind::RECEIVERS,
        |artifact| channel_adapters(artifact, ChannelFilter::receivers(), AdapterKind::RECEIVERS),
    ))
}

pub fn sender_adapters(allow_list: bool, values: BTreeSet<AdapterKind>) -> Box<dyn RuleLogic> {
    Box::new(ListRule::new(
        ListFacet::SenderAdapter,
        allow_list,
        values,
        AdapterKind::SENDERS,
        |artifact| channel_adapters(artifact, ChannelFilter::senders(), AdapterKind::SENDERS),
    ))
}

pub fn mapping_types(allow_list: bool, values: BTreeSet<MappingType>) -> Box<dyn RuleLogic> {
    Box::new(ListRule::new(
        ListFacet::MappingType,
        allow_list,
        values,
        MappingType::ALL,
        mapping_steps,
    ))
}

pub fn scripting_languages(
    allow_list: bool,
    values: BTreeSet<ScriptingLanguage>,
) -> Box<dyn RuleLogic> {
    Box::new(ListRule::new(
        ListFacet::ScriptingLanguage,
        allow_list,
        values,
        ScriptingLanguage::ALL,
        script_resources,
    ))
}

fn channel_adapters(
    artifact: &Artifact,
    filter: ChannelFilter,
    domain: &[AdapterKind],
) -> Vec<Occurrence<AdapterKind>> {
    DocumentQuery::default()
        .channels(artifact.document(), &filter)
        .into_iter()
        .filter_map(|channel| {
            let adapter = channel.adapter().filter(|a| domain.contains(a))?;
            Some(Occurrence {
                value: adapter,
                noun: "channel",
                name: channel.name().to_string(),
            })
        })
        .collect()
}

fn mapping_steps(artifact: &Artifact) -> Vec<Occurrence<MappingType>> {
    DocumentQuery::default()
        .steps(artifact.document(), &StepFilter::mappings())
        .into_iter()
        .filter_map(|step| {
            Some(Occurrence {
                value: step.mapping_type()?,
                noun: "mapping step",
                name: step.name().to_string(),
            })
        })
        .collect()
}

fn script_resources(artifact: &Artifact) -> Vec<Occurrence<ScriptingLanguage>> {
    let languages = [
        (ResourceCategory::GroovyScript, ScriptingLanguage::Groovy),
        (ResourceCategory::JavaScript, ScriptingLanguage::JavaScript),
    ];
    languages
        .into_iter()
        .flat_map(|(category, language)| {
            artifact.resources(category).iter().map(move |r| Occurrence {
                value: language,
                noun: "script",
                name: r.name.clone(),
            })
        })
        .collect()
}
