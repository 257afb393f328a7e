use cpilint_domain::rules::builtin_factories;
use cpilint_domain::{
    ConfigurationError, ElementIdentity, ExtensionError, ExtensionRuleFactory, Rule, RuleFactory,
};
use cpilint_xml::Element;

/// The rule factories a loader may use, built once at startup.
///
/// Every rule element must be claimed by exactly one factory.
pub struct FactoryRegistry {
    factories: Vec<Box<dyn RuleFactory>>,
}

impl FactoryRegistry {
    /// A registry with no factories at all.
    pub fn empty() -> Self {
        Self {
            factories: Vec::new(),
        }
    }

    /// A registry holding every built-in rule factory.
    pub fn with_builtins() -> Self {
        Self {
            factories: builtin_factories(),
        }
    }

    fn register(&mut self, factory: Box<dyn RuleFactory>) {
        self.factories.push(factory);
    }

    /// Register a third-party factory for namespaced rule elements.
    pub fn register_extension<F>(&mut self, factory: F)
    where
        F: ExtensionRuleFactory + 'static,
    {
        self.register(Box::new(ExtensionFactory(factory)));
    }

    pub fn len(&self) -> usize {
        self.factories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.factories.is_empty()
    }

    /// Build the rule configured by `node`.
    pub fn create(&self, node: &Element) -> Result<Rule, ConfigurationError> {
        let identity = ElementIdentity::of(node);
        let mut matching = self
            .factories
            .iter()
            .filter(|factory| factory.is_factory_for(identity));

        let Some(factory) = matching.next() else {
            return Err(ConfigurationError::NoFactory {
                element: identity.to_string(),
            });
        };
        let others = matching.count();
        if others > 0 {
            return Err(ConfigurationError::AmbiguousFactory {
                element: identity.to_string(),
                count: others + 1,
            });
        }
        factory.create_from(node)
    }
}

impl Default for FactoryRegistry {
    fn default() -> Self {
        Self::with_builtins()
    }
}

/// Adapts an extension factory to the registry, validating before construction.
struct ExtensionFactory<F>(F);

impl<F: ExtensionRuleFactory> RuleFactory for ExtensionFactory<F> {
    fn is_factory_for(&self, identity: ElementIdentity<'_>) -> bool {
        identity
            .namespace
            .is_some_and(|namespace| self.0.is_factory_for(identity.local_name, namespace))
    }

    fn create_from(&self, node: &Element) -> Result<Rule, ConfigurationError> {
        self.0
            .validate_configuration(node)
            .map_err(|source| extension_error(node, source))?;
        let rule = self
            .0
            .create_from(node)
            .map_err(|source| extension_error(node, source))?;
        tracing::debug!(
            rule = node.local_name(),
            namespace = node.namespace().unwrap_or_default(),
            "built extension rule"
        );
        Ok(rule)
    }
}

fn extension_error(node: &Element, source: ExtensionError) -> ConfigurationError {
    ConfigurationError::Extension {
        local_name: node.local_name().to_string(),
        namespace: node.namespace().unwrap_or_default().to_string(),
        source,
    }
}
