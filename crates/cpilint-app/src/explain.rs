//! The `explain` use case: look up built-in rule documentation.

use cpilint_types::explain::{self, Explanation};

/// Output from the explain use case.
#[derive(Clone, Debug)]
pub enum ExplainOutput {
    Found(Explanation),
    /// Unknown rule element; includes every known one.
    NotFound {
        identifier: String,
        available: &'static [&'static str],
    },
}

/// Look up an explanation for a rule element name.
pub fn run_explain(identifier: &str) -> ExplainOutput {
    match explain::lookup_explanation(identifier) {
        Some(exp) => ExplainOutput::Found(exp),
        None => ExplainOutput::NotFound {
            identifier: identifier.to_string(),
            available: explain::all_rule_elements(),
        },
    }
}

/// Format an explanation for terminal display.
pub fn format_explanation(exp: &Explanation) -> String {
    let mut out = String::new();

    out.push_str(exp.title);
    out.push_str(&format!(" (<{}>)", exp.element));
    out.push('\n');
    out.push_str(&"=".repeat(exp.title.len() + exp.element.len() + 5));
    out.push_str("\n\n");
    out.push_str(exp.description);
    out.push_str("\n\n");
    out.push_str("Example\n");
    out.push_str("-------\n\n");
    out.push_str("```xml\n");
    out.push_str(exp.example);
    out.push('\n');
    out.push_str("```\n");

    out
}

/// Format the "not found" error message for terminal display.
pub fn format_not_found(identifier: &str, available: &[&'static str]) -> String {
    let mut out = String::new();

    out.push_str(&format!("Unknown rule element: {}\n\n", identifier));
    out.push_str("Available rule elements:\n");
    for element in available {
        out.push_str(&format!("  - {}\n", element));
    }

    out
}
