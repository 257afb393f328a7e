use crate::error::ConfigurationError;
use cpilint_xml::Element;

pub fn invalid(node: &Element, message: impl Into<String>) -> ConfigurationError {
    ConfigurationError::invalid_rule(node.local_name(), message)
}

/// Fail on any child element not named in `allowed`.
pub fn only_children(node: &Element, allowed: &[&str]) -> Result<(), ConfigurationError> {
    for child in node.children() {
        if child.namespace().is_some() || !allowed.contains(&child.local_name()) {
            return Err(invalid(
                node,
                format!("unexpected child element <{}>", child.local_name()),
            ));
        }
    }
    Ok(())
}

/// The single child named `name`.
pub fn single_child<'a>(node: &'a Element, name: &str) -> Result<&'a Element, ConfigurationError> {
    let mut matches = node.children_named(name);
    match (matches.next(), matches.next()) {
        (Some(one), None) => Ok(one),
        (None, _) => Err(invalid(node, format!("missing <{name}>"))),
        (Some(_), Some(_)) => Err(invalid(node, format!("more than one <{name}>"))),
    }
}

/// Trimmed, non-empty text of every child named `name`.
pub fn child_tokens<'a>(node: &'a Element, name: &str) -> Result<Vec<&'a str>, ConfigurationError> {
    let mut tokens = Vec::new();
    for child in node.children_named(name) {
        let text = child.text();
        if text.is_empty() {
            return Err(invalid(node, format!("<{name}> must not be empty")));
        }
        tokens.push(text);
    }
    Ok(tokens)
}
