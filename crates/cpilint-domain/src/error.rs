//! Error taxonomy.
//!
//! Every error here is fatal for the run: configuration errors stop it before it starts,
//! evaluation errors abort it without a partial report.

use cpilint_xml::XmlError;
use std::error::Error as StdError;

#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    /// The document violates the fixed rules-file schema. Only the first violation is reported.
    #[error("rules file {path} is invalid: {message}")]
    Schema { path: String, message: String },

    #[error("cannot read rules file {path}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("rules file {path} is not well-formed XML")]
    Xml {
        path: String,
        #[source]
        source: XmlError,
    },

    #[error("circular import of rules file {path}")]
    CircularImport { path: String },

    #[error("no rule factory accepts element {element}")]
    NoFactory { element: String },

    #[error("element {element} is accepted by {count} rule factories")]
    AmbiguousFactory { element: String, count: usize },

    #[error("invalid naming scheme: {0}")]
    NamingScheme(String),

    #[error("invalid configuration for <{element}>: {message}")]
    InvalidRule { element: String, message: String },

    #[error("duplicate rule ids: {}", .ids.join(", "))]
    DuplicateRuleIds { ids: Vec<String> },

    #[error("rule already has id '{existing}'; cannot assign '{requested}'")]
    RuleIdAlreadyAssigned { existing: String, requested: String },

    #[error("no rules configured")]
    NoRules,

    #[error("extension rule <{local_name}> in namespace '{namespace}' rejected its configuration")]
    Extension {
        local_name: String,
        namespace: String,
        #[source]
        source: ExtensionError,
    },
}

impl ConfigurationError {
    pub fn invalid_rule(element: impl Into<String>, message: impl Into<String>) -> Self {
        ConfigurationError::InvalidRule {
            element: element.into(),
            message: message.into(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EvaluationError {
    /// An element the rule expects exactly once is missing or repeated.
    #[error("artifact '{artifact}': expected exactly one {what}, found {found}")]
    NotUnique {
        artifact: String,
        what: String,
        found: usize,
    },

    #[error("rule {rule}: {message}")]
    Lifecycle { rule: String, message: String },

    #[error("rule {rule} raised an issue that implicates no artifact")]
    NoArtifacts { rule: String },
}

/// Raised by third-party rule factories.
///
/// The loader re-raises it as [`ConfigurationError::Extension`] tagged with the element's name.
#[derive(Debug, thiserror::Error)]
#[error("{message}")]
pub struct ExtensionError {
    message: String,
    #[source]
    source: Option<Box<dyn StdError + Send + Sync>>,
}

impl ExtensionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            source: None,
        }
    }

    pub fn with_source(
        message: impl Into<String>,
        source: impl Into<Box<dyn StdError + Send + Sync>>,
    ) -> Self {
        Self {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LintError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("artifact source failed")]
    Source(#[source] Box<dyn StdError + Send + Sync>),
}
