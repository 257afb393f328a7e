//! Factory contracts for building rules from rules-file elements.

use crate::error::{ConfigurationError, ExtensionError};
use crate::rule::Rule;
use cpilint_xml::Element;
use std::fmt;

/// Qualified name of a rules-file element.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementIdentity<'a> {
    pub local_name: &'a str,
    pub namespace: Option<&'a str>,
}

impl<'a> ElementIdentity<'a> {
    pub fn of(element: &'a Element) -> Self {
        Self {
            local_name: element.local_name(),
            namespace: element.namespace(),
        }
    }
}

impl fmt::Display for ElementIdentity<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.namespace {
            Some(ns) => write!(f, "{{{ns}}}{}", self.local_name),
            None => write!(f, "<{}>", self.local_name),
        }
    }
}

/// Builds rules from the rules-file elements it claims.
pub trait RuleFactory: Send + Sync {
    fn is_factory_for(&self, identity: ElementIdentity<'_>) -> bool;

    fn create_from(&self, node: &Element) -> Result<Rule, ConfigurationError>;
}

/// Third-party rule factory. Extension elements are always namespace-qualified.
pub trait ExtensionRuleFactory: Send + Sync {
    fn is_factory_for(&self, local_name: &str, namespace: &str) -> bool;

    /// Reject malformed options before anything is built.
    fn validate_configuration(&self, node: &Element) -> Result<(), ExtensionError>;

    fn create_from(&self, node: &Element) -> Result<Rule, ExtensionError>;
}
