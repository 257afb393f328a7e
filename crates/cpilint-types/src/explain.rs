//! Explain registry for built-in rules.
//!
//! Maps rule element names to human-readable explanations with a sample rules-file snippet.

use crate::ids;

/// Explanation entry for a built-in rule.
#[derive(Debug, Clone)]
pub struct Explanation {
    /// Rule element name.
    pub element: &'static str,
    /// Short description of the rule.
    pub title: &'static str,
    /// What the rule checks and why it exists.
    pub description: &'static str,
    /// Rules-file snippet configuring the rule.
    pub example: &'static str,
}

/// Look up an explanation by rule element name.
///
/// Returns `None` if the element is not a built-in rule.
pub fn lookup_explanation(element: &str) -> Option<Explanation> {
    let (title, description, example) = match element {
        ids::RULE_ALLOWED_RECEIVER_ADAPTERS => (
            "Allowed receiver adapters",
            "Receiver channels may only use the listed adapter types. Every other receiver adapter \
             type is reported.",
            "<allowed-receiver-adapters>\n  <allow>HTTP</allow>\n  <allow>SOAP</allow>\n</allowed-receiver-adapters>",
        ),
        ids::RULE_DISALLOWED_RECEIVER_ADAPTERS => (
            "Disallowed receiver adapters",
            "Receiver channels must not use the listed adapter types.",
            "<disallowed-receiver-adapters>\n  <disallow>FTP</disallow>\n</disallowed-receiver-adapters>",
        ),
        ids::RULE_ALLOWED_SENDER_ADAPTERS => (
            "Allowed sender adapters",
            "Sender channels may only use the listed adapter types. Every other sender adapter type \
             is reported.",
            "<allowed-sender-adapters>\n  <allow>HTTPS</allow>\n</allowed-sender-adapters>",
        ),
        ids::RULE_DISALLOWED_SENDER_ADAPTERS => (
            "Disallowed sender adapters",
            "Sender channels must not use the listed adapter types.",
            "<disallowed-sender-adapters>\n  <disallow>Mail</disallow>\n</disallowed-sender-adapters>",
        ),
        ids::RULE_ALLOWED_MAPPING_TYPES => (
            "Allowed mapping types",
            "Mapping steps may only use the listed mapping types (message-mapping, \
             operation-mapping, xslt).",
            "<allowed-mapping-types>\n  <allow>xslt</allow>\n</allowed-mapping-types>",
        ),
        ids::RULE_DISALLOWED_MAPPING_TYPES => (
            "Disallowed mapping types",
            "Mapping steps must not use the listed mapping types.",
            "<disallowed-mapping-types>\n  <disallow>operation-mapping</disallow>\n</disallowed-mapping-types>",
        ),
        ids::RULE_ALLOWED_SCRIPTING_LANGUAGES => (
            "Allowed scripting languages",
            "Script resources may only be written in the listed languages (groovy, javascript).",
            "<allowed-scripting-languages>\n  <allow>groovy</allow>\n</allowed-scripting-languages>",
        ),
        ids::RULE_DISALLOWED_SCRIPTING_LANGUAGES => (
            "Disallowed scripting languages",
            "Script resources must not be written in the listed languages.",
            "<disallowed-scripting-languages>\n  <disallow>javascript</disallow>\n</disallowed-scripting-languages>",
        ),
        ids::RULE_IFLOW_DESCRIPTION_REQUIRED => (
            "Integration flow description required",
            "Every integration flow must carry a non-blank description.",
            "<iflow-description-required/>",
        ),
        ids::RULE_NAMING_CONVENTIONS => (
            "Naming conventions",
            "Names of the selected subjects must satisfy a naming scheme built from starts-with, \
             ends-with, equals, regex, not, and, or.",
            "<naming-conventions>\n  <scheme><starts-with>Z_</starts-with></scheme>\n  <message>Integration flow names must start with Z_</message>\n  <apply-to>iflow.name</apply-to>\n</naming-conventions>",
        ),
        ids::RULE_UNENCRYPTED_ENDPOINTS_NOT_ALLOWED => (
            "Unencrypted endpoints not allowed",
            "Receiver channels (HTTP, SOAP, IDoc, OData) must not call plain http:// endpoints.",
            "<unencrypted-endpoints-not-allowed/>",
        ),
        ids::RULE_CLEARTEXT_BASIC_AUTH_NOT_ALLOWED => (
            "Cleartext Basic authentication not allowed",
            "Receiver channels must not send Basic authentication credentials over plain http://.",
            "<cleartext-basic-auth-not-allowed/>",
        ),
        ids::RULE_CSRF_PROTECTION_REQUIRED => (
            "CSRF protection required",
            "HTTPS sender channels must have CSRF protection enabled.",
            "<csrf-protection-required/>",
        ),
        ids::RULE_DUPLICATE_RESOURCES_NOT_ALLOWED => (
            "Duplicate resources not allowed",
            "Resources with byte-identical content, in the same or different artifacts, are \
             reported as one group. Resource types default to groovy-script, javascript, \
             message-mapping, operation-mapping and xslt.",
            "<duplicate-resources-not-allowed>\n  <resource-type>groovy-script</resource-type>\n</duplicate-resources-not-allowed>",
        ),
        ids::RULE_MATCHING_PROCESS_DIRECT_CHANNELS_REQUIRED => (
            "Matching ProcessDirect channels required",
            "Every ProcessDirect receiver address must be served by a ProcessDirect sender channel \
             in one of the inspected artifacts. Dynamic addresses are not checked.",
            "<matching-process-direct-channels-required/>",
        ),
        _ => return None,
    };

    let element = ids::BUILTIN_RULES
        .iter()
        .copied()
        .find(|e| *e == element)?;

    Some(Explanation {
        element,
        title,
        description,
        example,
    })
}

/// List all explainable rule elements.
pub fn all_rule_elements() -> &'static [&'static str] {
    ids::BUILTIN_RULES
}
