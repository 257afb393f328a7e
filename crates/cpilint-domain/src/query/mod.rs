//! Document Query: domain vocabulary over integration-flow documents.
//!
//! Rules ask for "receiver channels using HTTP or SOAP" or "mapping steps"; this module turns
//! those filters into [`StructuralQuery`] values and hands them to a [`StructuralEvaluator`].
//! Rules never walk the element tree themselves.

mod structural;
mod vocabulary;

pub use structural::{
    Axis, Predicate, Step, StructuralEvaluator, StructuralQuery, TreeWalkEvaluator, property_value,
};
pub use vocabulary::{AdapterKind, Direction, ListValue, MappingType, ScriptingLanguage};

use crate::error::EvaluationError;
use crate::model::{Artifact, IflowDocument};
use cpilint_xml::Element;

const CHANNEL_ELEMENT: &str = "messageFlow";
const STEP_ELEMENTS: &[&str] = &["callActivity", "serviceTask"];
const COLLABORATION_ELEMENT: &str = "collaboration";
const DOCUMENTATION_ELEMENT: &str = "documentation";

const KEY_COMPONENT_TYPE: &str = "ComponentType";
const KEY_DIRECTION: &str = "direction";
const KEY_ACTIVITY_TYPE: &str = "activityType";
const KEY_SUB_ACTIVITY_TYPE: &str = "subActivityType";
const AUTHENTICATION_KEYS: &[&str] = &["authenticationMethod", "authentication"];
const DEFAULT_ADDRESS_KEYS: &[&str] = &["address"];

const ACTIVITY_MAPPING: &str = "Mapping";

/// Selects channels by direction, adapter and endpoint scheme.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ChannelFilter {
    direction: Option<Direction>,
    adapters: Vec<AdapterKind>,
    unencrypted_only: bool,
}

impl ChannelFilter {
    pub fn any() -> Self {
        Self::default()
    }

    pub fn senders() -> Self {
        Self {
            direction: Some(Direction::Sender),
            ..Self::default()
        }
    }

    pub fn receivers() -> Self {
        Self {
            direction: Some(Direction::Receiver),
            ..Self::default()
        }
    }

    /// Keep only channels whose adapter is one of `adapters`.
    pub fn using(mut self, adapters: &[AdapterKind]) -> Self {
        self.adapters = adapters.to_vec();
        self
    }

    /// Keep only channels whose address uses plain `http://`.
    pub fn with_unencrypted_endpoint(mut self) -> Self {
        self.unencrypted_only = true;
        self
    }

    pub fn to_query(&self) -> StructuralQuery {
        let mut query = StructuralQuery::new().descendant(CHANNEL_ELEMENT);
        if let Some(direction) = self.direction {
            query = query.with(Predicate::property_in(
                KEY_DIRECTION,
                [direction.property_value()],
            ));
        }
        if !self.adapters.is_empty() {
            query = query.with(Predicate::property_in(
                KEY_COMPONENT_TYPE,
                self.adapters.iter().map(|a| a.component_type()),
            ));
        }
        if self.unencrypted_only {
            let mut keys: Vec<String> = Vec::new();
            let adapters = if self.adapters.is_empty() {
                AdapterKind::ALL
            } else {
                self.adapters.as_slice()
            };
            for adapter in adapters {
                for key in adapter.address_keys() {
                    if !keys.iter().any(|k| k == key) {
                        keys.push(key.to_string());
                    }
                }
            }
            query = query.with(Predicate::PropertyStartsWith {
                keys,
                prefix: "http://".to_string(),
            });
        }
        query
    }
}

/// Selects process steps by activity and sub-activity type.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepFilter {
    activity_type: Option<String>,
    sub_activity_types: Vec<String>,
}

impl StepFilter {
    /// Mapping steps of any mapping type.
    pub fn mappings() -> Self {
        Self {
            activity_type: Some(ACTIVITY_MAPPING.to_string()),
            sub_activity_types: Vec::new(),
        }
    }

    pub fn of_mapping_types(types: &[MappingType]) -> Self {
        Self {
            activity_type: Some(ACTIVITY_MAPPING.to_string()),
            sub_activity_types: types
                .iter()
                .map(|t| t.sub_activity_type().to_string())
                .collect(),
        }
    }

    pub fn to_query(&self) -> StructuralQuery {
        let mut query = StructuralQuery::new().descendant_any(STEP_ELEMENTS);
        if let Some(activity) = &self.activity_type {
            query = query.with(Predicate::property_in(KEY_ACTIVITY_TYPE, [activity.as_str()]));
        }
        if !self.sub_activity_types.is_empty() {
            query = query.with(Predicate::property_in(
                KEY_SUB_ACTIVITY_TYPE,
                self.sub_activity_types.iter().map(String::as_str),
            ));
        }
        query
    }
}

/// Handle to one channel element.
#[derive(Clone, Copy, Debug)]
pub struct Channel<'d> {
    element: &'d Element,
}

impl<'d> Channel<'d> {
    pub fn id(&self) -> Option<&'d str> {
        self.element.attribute("id")
    }

    /// Display name; falls back to the id, then to an empty string.
    pub fn name(&self) -> &'d str {
        self.element
            .attribute("name")
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.id())
            .unwrap_or_default()
    }

    pub fn direction(&self) -> Option<Direction> {
        self.property(KEY_DIRECTION).and_then(Direction::from_property)
    }

    pub fn adapter(&self) -> Option<AdapterKind> {
        self.property(KEY_COMPONENT_TYPE)
            .and_then(AdapterKind::from_component_type)
    }

    pub fn property(&self, key: &str) -> Option<&'d str> {
        property_value(self.element, key)
    }

    /// Endpoint address, read from the adapter's address property.
    pub fn address(&self) -> Option<&'d str> {
        let keys = self
            .adapter()
            .map(AdapterKind::address_keys)
            .unwrap_or(DEFAULT_ADDRESS_KEYS);
        keys.iter()
            .find_map(|key| self.property(key))
            .filter(|a| !a.is_empty())
    }

    pub fn authentication(&self) -> Option<&'d str> {
        AUTHENTICATION_KEYS
            .iter()
            .find_map(|key| self.property(key))
    }

    pub fn element(&self) -> &'d Element {
        self.element
    }
}

/// Handle to one process step element.
#[derive(Clone, Copy, Debug)]
pub struct ProcessStep<'d> {
    element: &'d Element,
}

impl<'d> ProcessStep<'d> {
    pub fn id(&self) -> Option<&'d str> {
        self.element.attribute("id")
    }

    pub fn name(&self) -> &'d str {
        self.element
            .attribute("name")
            .filter(|n| !n.trim().is_empty())
            .or_else(|| self.id())
            .unwrap_or_default()
    }

    pub fn activity_type(&self) -> Option<&'d str> {
        property_value(self.element, KEY_ACTIVITY_TYPE)
    }

    pub fn sub_activity_type(&self) -> Option<&'d str> {
        property_value(self.element, KEY_SUB_ACTIVITY_TYPE)
    }

    pub fn mapping_type(&self) -> Option<MappingType> {
        if self.activity_type() != Some(ACTIVITY_MAPPING) {
            return None;
        }
        self.sub_activity_type()
            .and_then(MappingType::from_sub_activity_type)
    }

    pub fn property(&self, key: &str) -> Option<&'d str> {
        property_value(self.element, key)
    }
}

/// Runs domain-level queries through a structural evaluator.
#[derive(Clone, Copy)]
pub struct DocumentQuery<'e> {
    evaluator: &'e dyn StructuralEvaluator,
}

impl Default for DocumentQuery<'static> {
    fn default() -> Self {
        Self {
            evaluator: &TreeWalkEvaluator,
        }
    }
}

impl std::fmt::Debug for DocumentQuery<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DocumentQuery").finish_non_exhaustive()
    }
}

impl<'e> DocumentQuery<'e> {
    pub fn new(evaluator: &'e dyn StructuralEvaluator) -> Self {
        Self { evaluator }
    }

    pub fn channels<'d>(&self, document: &'d IflowDocument, filter: &ChannelFilter) -> Vec<Channel<'d>> {
        self.evaluator
            .evaluate(document.root(), &filter.to_query())
            .into_iter()
            .map(|element| Channel { element })
            .collect()
    }

    pub fn steps<'d>(&self, document: &'d IflowDocument, filter: &StepFilter) -> Vec<ProcessStep<'d>> {
        self.evaluator
            .evaluate(document.root(), &filter.to_query())
            .into_iter()
            .map(|element| ProcessStep { element })
            .collect()
    }

    /// The single collaboration element of the flow.
    pub fn collaboration<'a>(&self, artifact: &'a Artifact) -> Result<&'a Element, EvaluationError> {
        let query = StructuralQuery::new().descendant(COLLABORATION_ELEMENT);
        let found = self.evaluator.evaluate(artifact.document().root(), &query);
        match found.as_slice() {
            [one] => Ok(*one),
            other => Err(EvaluationError::NotUnique {
                artifact: artifact.tag().id.to_string(),
                what: "collaboration element".to_string(),
                found: other.len(),
            }),
        }
    }

    /// Flow description, `None` when absent or blank.
    pub fn description<'a>(&self, artifact: &'a Artifact) -> Result<Option<&'a str>, EvaluationError> {
        let collaboration = self.collaboration(artifact)?;
        let query = StructuralQuery::new().child(DOCUMENTATION_ELEMENT);
        let docs = self.evaluator.evaluate(collaboration, &query);
        if docs.len() > 1 {
            return Err(EvaluationError::NotUnique {
                artifact: artifact.tag().id.to_string(),
                what: "collaboration documentation element".to_string(),
                found: docs.len(),
            });
        }
        Ok(docs
            .first()
            .copied()
            .map(Element::text)
            .filter(|text| !text.is_empty()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{artifact, channel, iflow, iflow_without_collaboration, mapping_step};

    #[test]
    fn receivers_filtered_by_adapter() {
        let doc = iflow(
            Some("desc"),
            vec![
                channel("c1", "To ERP", Direction::Receiver, "HTTP", &[]),
                channel("c2", "To CRM", Direction::Receiver, "SOAP", &[]),
                channel("c3", "From Web", Direction::Sender, "HTTPS", &[]),
            ],
        );
        let query = DocumentQuery::default();
        let all: Vec<&str> = query
            .channels(&doc, &ChannelFilter::receivers())
            .iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(all, vec!["To ERP", "To CRM"]);

        let http = query.channels(&doc, &ChannelFilter::receivers().using(&[AdapterKind::Http]));
        assert_eq!(http.len(), 1);
        assert_eq!(http[0].adapter(), Some(AdapterKind::Http));
        assert_eq!(http[0].direction(), Some(Direction::Receiver));
    }

    #[test]
    fn unencrypted_filter_uses_adapter_address_keys() {
        let doc = iflow(
            None,
            vec![
                channel(
                    "c1",
                    "Plain",
                    Direction::Receiver,
                    "HTTP",
                    &[("httpAddressWithoutQuery", "http://erp.example.com/api")],
                ),
                channel(
                    "c2",
                    "Tls",
                    Direction::Receiver,
                    "HTTP",
                    &[("httpAddressWithoutQuery", "https://erp.example.com/api")],
                ),
                channel(
                    "c3",
                    "Soap",
                    Direction::Receiver,
                    "SOAP",
                    &[("address", "HTTP://crm.example.com")],
                ),
            ],
        );
        let filter = ChannelFilter::receivers()
            .using(&[AdapterKind::Http, AdapterKind::Soap])
            .with_unencrypted_endpoint();
        let names: Vec<&str> = DocumentQuery::default()
            .channels(&doc, &filter)
            .iter()
            .map(|c| c.name())
            .collect();
        assert_eq!(names, vec!["Plain", "Soap"]);
    }

    #[test]
    fn mapping_steps() {
        let doc = iflow(
            None,
            vec![
                mapping_step("s1", "Map order", "MessageMapping"),
                mapping_step("s2", "Transform", "XSLTMapping"),
            ],
        );
        let steps = DocumentQuery::default().steps(&doc, &StepFilter::mappings());
        let types: Vec<Option<MappingType>> = steps.iter().map(|s| s.mapping_type()).collect();
        assert_eq!(types, vec![Some(MappingType::MessageMapping), Some(MappingType::Xslt)]);

        let only_xslt =
            DocumentQuery::default().steps(&doc, &StepFilter::of_mapping_types(&[MappingType::Xslt]));
        assert_eq!(only_xslt.len(), 1);
        assert_eq!(only_xslt[0].name(), "Transform");
    }

    #[test]
    fn description_requires_exactly_one_collaboration() {
        let ok = artifact("A", iflow(Some("  Routes orders  "), Vec::new()));
        assert_eq!(DocumentQuery::default().description(&ok).expect("ok"), Some("Routes orders"));

        let blank = artifact("B", iflow(Some("   "), Vec::new()));
        assert_eq!(DocumentQuery::default().description(&blank).expect("ok"), None);

        let missing = artifact("C", iflow_without_collaboration());
        let err = DocumentQuery::default()
            .description(&missing)
            .expect_err("no collaboration");
        assert!(matches!(err, EvaluationError::NotUnique { found: 0, .. }));
    }

    #[test]
    fn channel_name_falls_back_to_id() {
        let doc = iflow(None, vec![channel("c9", "", Direction::Sender, "AS2", &[])]);
        let channels = DocumentQuery::default().channels(&doc, &ChannelFilter::any());
        assert_eq!(channels[0].name(), "c9");
    }
}
