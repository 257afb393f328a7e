//! Built-in rules and the factories that build them.

use crate::error::ConfigurationError;
use crate::factory::{ElementIdentity, RuleFactory};
use crate::query::{AdapterKind, MappingType, ScriptingLanguage};
use crate::rule::{Rule, RuleLogic};
use cpilint_types::ids;
use cpilint_xml::Element;

mod basic_auth;
mod csrf;
mod description;
mod duplicate_resources;
mod list;
mod naming_conventions;
mod process_direct;
mod unencrypted_endpoints;
mod utils;


pub use basic_auth::CleartextBasicAuthNotAllowed;
pub use csrf::CsrfProtectionRequired;
pub use description::IflowDescriptionRequired;
pub use duplicate_resources::{DEFAULT_DUPLICATE_CATEGORIES, DuplicateResourcesNotAllowed};
pub use list::{
    ListRule, ListRuleFactory, Occurrence, mapping_types, receiver_adapters, scripting_languages,
    sender_adapters,
};
pub use naming_conventions::{NamingConventions, NamingSubject};
pub use process_direct::MatchingProcessDirectChannelsRequired;
pub use unencrypted_endpoints::UnencryptedEndpointsNotAllowed;

type BuildFn = fn(&Element) -> Result<Box<dyn RuleLogic>, ConfigurationError>;

/// Factory for a built-in rule with a fixed, namespace-less element name.
pub struct BuiltinFactory {
    element: &'static str,
    build: BuildFn,
}

impl BuiltinFactory {
    pub const fn new(element: &'static str, build: BuildFn) -> Self {
        Self { element, build }
    }
}

impl RuleFactory for BuiltinFactory {
    fn is_factory_for(&self, identity: ElementIdentity<'_>) -> bool {
        identity.namespace.is_none() && identity.local_name == self.element
    }

    fn create_from(&self, node: &Element) -> Result<Rule, ConfigurationError> {
        let logic = (self.build)(node)?;
        tracing::debug!(rule = self.element, "built rule");
        Ok(Rule::from_boxed(self.element, logic))
    }
}

/// One factory per built-in rule kind, in catalog order.
pub fn builtin_factories() -> Vec<Box<dyn RuleFactory>> {
    vec![
        Box::new(ListRuleFactory::new(
            ids::RULE_ALLOWED_RECEIVER_ADAPTERS,
            ids::RULE_DISALLOWED_RECEIVER_ADAPTERS,
            AdapterKind::RECEIVERS,
            list::receiver_adapters,
        )),
        Box::new(ListRuleFactory::new(
            ids::RULE_ALLOWED_SENDER_ADAPTERS,
            ids::RULE_DISALLOWED_SENDER_ADAPTERS,
            AdapterKind::SENDERS,
            list::sender_adapters,
        )),
        Box::new(ListRuleFactory::new(
            ids::RULE_ALLOWED_MAPPING_TYPES,
            ids::RULE_DISALLOWED_MAPPING_TYPES,
            MappingType::ALL,
            list::mapping_types,
        )),
        Box::new(ListRuleFactory::new(
            ids::RULE_ALLOWED_SCRIPTING_LANGUAGES,
            ids::RULE_DISALLOWED_SCRIPTING_LANGUAGES,
            ScriptingLanguage::ALL,
            list::scripting_languages,
        )),
        Box::new(BuiltinFactory::new(
            ids::RULE_IFLOW_DESCRIPTION_REQUIRED,
            description::build,
        )),
        Box::new(BuiltinFactory::new(
            ids::RULE_NAMING_CONVENTIONS,
            naming_conventions::build,
        )),
        Box::new(BuiltinFactory::new(
            ids::RULE_UNENCRYPTED_ENDPOINTS_NOT_ALLOWED,
            unencrypted_endpoints::build,
        )),
        Box::new(BuiltinFactory::new(
            ids::RULE_CLEARTEXT_BASIC_AUTH_NOT_ALLOWED,
            basic_auth::build,
        )),
        Box::new(BuiltinFactory::new(
            ids::RULE_CSRF_PROTECTION_REQUIRED,
            csrf::build,
        )),
        Box::new(BuiltinFactory::new(
            ids::RULE_DUPLICATE_RESOURCES_NOT_ALLOWED,
            duplicate_resources::build,
        )),
        Box::new(BuiltinFactory::new(
            ids::RULE_MATCHING_PROCESS_DIRECT_CHANNELS_REQUIRED,
            process_direct::build,
        )),
    ]
}
