//! Naming scheme predicates.
//!
//! A scheme is an immutable tree of leaf matchers (`starts-with`, `ends-with`, `equals`,
//! `regex`) and boolean composites (`not`, `and`, `or`). Regex leaves match the whole name.

use crate::error::ConfigurationError;
use cpilint_types::ids;
use cpilint_xml::Element;
use regex::Regex;
use std::fmt;

#[derive(Clone, Debug)]
pub enum NamingScheme {
    StartsWith(String),
    EndsWith(String),
    Equals {
        value: String,
        ignore_case: bool,
    },
    Regex {
        pattern: String,
        compiled: Regex,
    },
    Not(Box<NamingScheme>),
    And(Vec<NamingScheme>),
    Or(Vec<NamingScheme>),
}

impl NamingScheme {
    pub fn starts_with(prefix: impl Into<String>) -> Self {
        NamingScheme::StartsWith(prefix.into())
    }

    pub fn ends_with(suffix: impl Into<String>) -> Self {
        NamingScheme::EndsWith(suffix.into())
    }

    pub fn equals(value: impl Into<String>, ignore_case: bool) -> Self {
        NamingScheme::Equals {
            value: value.into(),
            ignore_case,
        }
    }

    /// Compile `pattern` anchored at both ends.
    pub fn regex(pattern: &str) -> Result<Self, ConfigurationError> {
        let compiled = Regex::new(&format!("^(?:{pattern})$")).map_err(|e| {
            ConfigurationError::NamingScheme(format!("invalid regex '{pattern}': {e}"))
        })?;
        Ok(NamingScheme::Regex {
            pattern: pattern.to_string(),
            compiled,
        })
    }

    #[allow(clippy::should_implement_trait)]
    pub fn not(inner: NamingScheme) -> Self {
        NamingScheme::Not(Box::new(inner))
    }

    pub fn and(inner: Vec<NamingScheme>) -> Result<Self, ConfigurationError> {
        if inner.is_empty() {
            return Err(ConfigurationError::NamingScheme(
                "<and> needs at least one operand".to_string(),
            ));
        }
        Ok(NamingScheme::And(inner))
    }

    pub fn or(inner: Vec<NamingScheme>) -> Result<Self, ConfigurationError> {
        if inner.is_empty() {
            return Err(ConfigurationError::NamingScheme(
                "<or> needs at least one operand".to_string(),
            ));
        }
        Ok(NamingScheme::Or(inner))
    }

    pub fn test(&self, name: &str) -> bool {
        match self {
            NamingScheme::StartsWith(prefix) => name.starts_with(prefix.as_str()),
            NamingScheme::EndsWith(suffix) => name.ends_with(suffix.as_str()),
            NamingScheme::Equals { value, ignore_case } => {
                if *ignore_case {
                    value.to_lowercase() == name.to_lowercase()
                } else {
                    value == name
                }
            }
            NamingScheme::Regex { compiled, .. } => compiled.is_match(name),
            NamingScheme::Not(inner) => !inner.test(name),
            NamingScheme::And(inner) => inner.iter().all(|s| s.test(name)),
            NamingScheme::Or(inner) => inner.iter().any(|s| s.test(name)),
        }
    }

    /// Parse one scheme node, recursing into composites.
    ///
    /// Unknown or namespaced nodes are rejected; nothing is partially built.
    pub fn from_element(node: &Element) -> Result<Self, ConfigurationError> {
        if let Some(ns) = node.namespace() {
            return Err(ConfigurationError::NamingScheme(format!(
                "unknown naming scheme node <{}> in namespace '{ns}'",
                node.local_name()
            )));
        }
        match node.local_name() {
            ids::SCHEME_STARTS_WITH => Ok(NamingScheme::starts_with(node.text())),
            ids::SCHEME_ENDS_WITH => Ok(NamingScheme::ends_with(node.text())),
            ids::SCHEME_EQUALS => {
                let ignore_case = match node.attribute(ids::ATTRIBUTE_IGNORE_CASE) {
                    None => false,
                    Some(raw) => parse_bool(raw).ok_or_else(|| {
                        ConfigurationError::NamingScheme(format!(
                            "{} must be true or false, got '{raw}'",
                            ids::ATTRIBUTE_IGNORE_CASE
                        ))
                    })?,
                };
                Ok(NamingScheme::equals(node.text(), ignore_case))
            }
            ids::SCHEME_REGEX => NamingScheme::regex(node.text()),
            ids::SCHEME_NOT => match node.children() {
                [inner] => Ok(NamingScheme::not(NamingScheme::from_element(inner)?)),
                other => Err(ConfigurationError::NamingScheme(format!(
                    "<not> needs exactly one operand, got {}",
                    other.len()
                ))),
            },
            ids::SCHEME_AND => NamingScheme::and(parse_all(node)?),
            ids::SCHEME_OR => NamingScheme::or(parse_all(node)?),
            other => Err(ConfigurationError::NamingScheme(format!(
                "unknown naming scheme node <{other}>"
            ))),
        }
    }
}

fn parse_all(node: &Element) -> Result<Vec<NamingScheme>, ConfigurationError> {
    node.children()
        .iter()
        .map(NamingScheme::from_element)
        .collect()
}

// xs:boolean lexical space
fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim() {
        "true" | "1" => Some(true),
        "false" | "0" => Some(false),
        _ => None,
    }
}

impl fmt::Display for NamingScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NamingScheme::StartsWith(prefix) => write!(f, "starts with '{prefix}'"),
            NamingScheme::EndsWith(suffix) => write!(f, "ends with '{suffix}'"),
            NamingScheme::Equals {
                value,
                ignore_case: false,
            } => write!(f, "equals '{value}'"),
            NamingScheme::Equals {
                value,
                ignore_case: true,
            } => write!(f, "equals '{value}' (ignoring case)"),
            NamingScheme::Regex { pattern, .. } => write!(f, "matches /{pattern}/"),
            NamingScheme::Not(inner) => write!(f, "not ({inner})"),
            NamingScheme::And(inner) => write_joined(f, inner, " and "),
            NamingScheme::Or(inner) => write_joined(f, inner, " or "),
        }
    }
}

fn write_joined(f: &mut fmt::Formatter<'_>, parts: &[NamingScheme], sep: &str) -> fmt::Result {
    f.write_str("(")?;
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            f.write_str(sep)?;
        }
        write!(f, "{part}")?;
    }
    f.write_str(")")
}
