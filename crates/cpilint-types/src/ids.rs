//! Stable identifiers for the rules-file vocabulary.
//!
//! Rule element names double as the rule "kind" reported in logs and explain output.

// Rules-file structure
pub const ELEMENT_ROOT: &str = "cpilint";
pub const ELEMENT_IMPORTS: &str = "imports";
pub const ELEMENT_IMPORT: &str = "import";
pub const ELEMENT_RULES: &str = "rules";
pub const ELEMENT_EXEMPTIONS: &str = "exemptions";
pub const ELEMENT_EXEMPTION: &str = "exemption";
pub const ELEMENT_RULE_ID: &str = "rule-id";
pub const ELEMENT_ARTIFACT_ID: &str = "artifact-id";
pub const ELEMENT_REASON: &str = "reason";
pub const ATTRIBUTE_ID: &str = "id";

// Rules: allow/disallow lists
pub const RULE_ALLOWED_RECEIVER_ADAPTERS: &str = "allowed-receiver-adapters";
pub const RULE_DISALLOWED_RECEIVER_ADAPTERS: &str = "disallowed-receiver-adapters";
pub const RULE_ALLOWED_SENDER_ADAPTERS: &str = "allowed-sender-adapters";
pub const RULE_DISALLOWED_SENDER_ADAPTERS: &str = "disallowed-sender-adapters";
pub const RULE_ALLOWED_MAPPING_TYPES: &str = "allowed-mapping-types";
pub const RULE_DISALLOWED_MAPPING_TYPES: &str = "disallowed-mapping-types";
pub const RULE_ALLOWED_SCRIPTING_LANGUAGES: &str = "allowed-scripting-languages";
pub const RULE_DISALLOWED_SCRIPTING_LANGUAGES: &str = "disallowed-scripting-languages";
pub const ELEMENT_ALLOW: &str = "allow";
pub const ELEMENT_DISALLOW: &str = "disallow";

// Rules: stateless
pub const RULE_IFLOW_DESCRIPTION_REQUIRED: &str = "iflow-description-required";
pub const RULE_NAMING_CONVENTIONS: &str = "naming-conventions";
pub const RULE_UNENCRYPTED_ENDPOINTS_NOT_ALLOWED: &str = "unencrypted-endpoints-not-allowed";
pub const RULE_CLEARTEXT_BASIC_AUTH_NOT_ALLOWED: &str = "cleartext-basic-auth-not-allowed";
pub const RULE_CSRF_PROTECTION_REQUIRED: &str = "csrf-protection-required";

// Rules: correlation
pub const RULE_DUPLICATE_RESOURCES_NOT_ALLOWED: &str = "duplicate-resources-not-allowed";
pub const RULE_MATCHING_PROCESS_DIRECT_CHANNELS_REQUIRED: &str =
    "matching-process-direct-channels-required";

// naming-conventions children
pub const ELEMENT_SCHEME: &str = "scheme";
pub const ELEMENT_MESSAGE: &str = "message";
pub const ELEMENT_APPLY_TO: &str = "apply-to";

// duplicate-resources-not-allowed children
pub const ELEMENT_RESOURCE_TYPE: &str = "resource-type";

// Naming scheme nodes
pub const SCHEME_STARTS_WITH: &str = "starts-with";
pub const SCHEME_ENDS_WITH: &str = "ends-with";
pub const SCHEME_EQUALS: &str = "equals";
pub const SCHEME_REGEX: &str = "regex";
pub const SCHEME_NOT: &str = "not";
pub const SCHEME_AND: &str = "and";
pub const SCHEME_OR: &str = "or";
pub const ATTRIBUTE_IGNORE_CASE: &str = "ignore-case";

/// Every built-in rule element, in catalog order.
pub const BUILTIN_RULES: &[&str] = &[
    RULE_ALLOWED_RECEIVER_ADAPTERS,
    RULE_DISALLOWED_RECEIVER_ADAPTERS,
    RULE_ALLOWED_SENDER_ADAPTERS,
    RULE_DISALLOWED_SENDER_ADAPTERS,
    RULE_ALLOWED_MAPPING_TYPES,
    RULE_DISALLOWED_MAPPING_TYPES,
    RULE_ALLOWED_SCRIPTING_LANGUAGES,
    RULE_DISALLOWED_SCRIPTING_LANGUAGES,
    RULE_IFLOW_DESCRIPTION_REQUIRED,
    RULE_NAMING_CONVENTIONS,
    RULE_UNENCRYPTED_ENDPOINTS_NOT_ALLOWED,
    RULE_CLEARTEXT_BASIC_AUTH_NOT_ALLOWED,
    RULE_CSRF_PROTECTION_REQUIRED,
    RULE_DUPLICATE_RESOURCES_NOT_ALLOWED,
    RULE_MATCHING_PROCESS_DIRECT_CHANNELS_REQUIRED,
];
