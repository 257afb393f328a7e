//! Structural queries over the element tree.
//!
//! A query is a path of steps; each step selects children or descendants by local name and
//! keeps those matching every predicate. Namespaces are ignored: iFlow documents mix the BPMN
//! and SAP extension namespaces freely and only local names are stable.

use cpilint_xml::Element;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Axis {
    Child,
    Descendant,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Predicate {
    /// The element's extension property `key` equals one of `values`.
    PropertyIn { key: String, values: Vec<String> },
    /// The first present property among `keys` starts with `prefix` (ASCII case-insensitive).
    PropertyStartsWith { keys: Vec<String>, prefix: String },
}

impl Predicate {
    pub fn property_in<I, S>(key: impl Into<String>, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Predicate::PropertyIn {
            key: key.into(),
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    fn matches(&self, element: &Element) -> bool {
        match self {
            Predicate::PropertyIn { key, values } => property_value(element, key)
                .is_some_and(|v| values.iter().any(|candidate| candidate == v)),
            Predicate::PropertyStartsWith { keys, prefix } => keys
                .iter()
                .find_map(|key| property_value(element, key))
                .is_some_and(|v| starts_with_ignore_ascii_case(v, prefix)),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Step {
    pub axis: Axis,
    /// Accepted local names; an element matches if its name is any of these.
    pub names: Vec<String>,
    pub predicates: Vec<Predicate>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StructuralQuery {
    steps: Vec<Step>,
}

impl StructuralQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn child(self, name: &str) -> Self {
        self.step(Axis::Child, &[name])
    }

    pub fn descendant(self, name: &str) -> Self {
        self.step(Axis::Descendant, &[name])
    }

    pub fn descendant_any(self, names: &[&str]) -> Self {
        self.step(Axis::Descendant, names)
    }

    fn step(mut self, axis: Axis, names: &[&str]) -> Self {
        self.steps.push(Step {
            axis,
            names: names.iter().map(|n| n.to_string()).collect(),
            predicates: Vec::new(),
        });
        self
    }

    /// Restrict the last step. A predicate on an empty query is ignored.
    pub fn with(mut self, predicate: Predicate) -> Self {
        if let Some(last) = self.steps.last_mut() {
            last.predicates.push(predicate);
        }
        self
    }

    pub fn steps(&self) -> &[Step] {
        &self.steps
    }
}

impl fmt::Display for StructuralQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for step in &self.steps {
            f.write_str(match step.axis {
                Axis::Child => "/",
                Axis::Descendant => "//",
            })?;
            f.write_str(&step.names.join("|"))?;
            for predicate in &step.predicates {
                match predicate {
                    Predicate::PropertyIn { key, values } => {
                        write!(f, "[property('{key}') in ({})]", values.join(", "))?
                    }
                    Predicate::PropertyStartsWith { keys, prefix } => {
                        write!(f, "[property({}) starts-with '{prefix}']", keys.join("|"))?
                    }
                }
            }
        }
        Ok(())
    }
}

/// Evaluates structural queries against a parsed document.
pub trait StructuralEvaluator: Send + Sync {
    /// Elements selected by `query`, in document order, starting from `root` itself.
    fn evaluate<'d>(&self, root: &'d Element, query: &StructuralQuery) -> Vec<&'d Element>;
}

/// Default evaluator: walks the owned element tree step by step.
#[derive(Clone, Copy, Debug, Default)]
pub struct TreeWalkEvaluator;

impl StructuralEvaluator for TreeWalkEvaluator {
    fn evaluate<'d>(&self, root: &'d Element, query: &StructuralQuery) -> Vec<&'d Element> {
        let mut context: Vec<&'d Element> = vec![root];
        for step in query.steps() {
            let mut next: Vec<&'d Element> = Vec::new();
            for element in context {
                let candidates: Box<dyn Iterator<Item = &'d Element> + 'd> = match step.axis {
                    Axis::Child => Box::new(element.children().iter()),
                    Axis::Descendant => Box::new(element.descendants()),
                };
                for candidate in candidates {
                    if step.names.iter().any(|n| n == candidate.local_name())
                        && step.predicates.iter().all(|p| p.matches(candidate))
                        && !next.iter().any(|seen| std::ptr::eq(*seen, candidate))
                    {
                        next.push(candidate);
                    }
                }
            }
            context = next;
        }
        context
    }
}

/// Value of an iFlow extension property:
/// `<extensionElements><property><key>K</key><value>V</value></property></extensionElements>`.
pub fn property_value<'d>(element: &'d Element, key: &str) -> Option<&'d str> {
    element
        .children_named("extensionElements")
        .flat_map(|ext| ext.children_named("property"))
        .find(|p| p.child("key").map(Element::text) == Some(key))
        .and_then(|p| p.child("value"))
        .map(Element::text)
}

fn starts_with_ignore_ascii_case(value: &str, prefix: &str) -> bool {
    value.len() >= prefix.len()
        && value.as_bytes()[..prefix.len()].eq_ignore_ascii_case(prefix.as_bytes())
}
