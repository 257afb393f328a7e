//! Fixed structural schema for rules files.
//!
//! Runs before any semantic processing. Rule elements without a namespace must be built-ins;
//! namespaced rule elements are left to their extension factory to validate.

use cpilint_types::ids;
use cpilint_xml::Element;

const ROOT_SECTIONS: &[&str] = &[
    ids::ELEMENT_IMPORTS,
    ids::ELEMENT_RULES,
    ids::ELEMENT_EXEMPTIONS,
];

/// Validate a parsed rules document. Returns the first violation found.
pub(crate) fn validate(root: &Element) -> Result<(), String> {
    if root.namespace().is_some() || root.local_name() != ids::ELEMENT_ROOT {
        return Err(format!(
            "root element must be <{}>, found <{}>",
            ids::ELEMENT_ROOT,
            root.local_name()
        ));
    }
    no_attributes(root)?;

    let mut last_section = None;
    for section in root.children() {
        let position = section_position(section)?;
        if last_section.is_some_and(|last| position <= last) {
            return Err(format!(
                "<{}> is out of order or repeated; expected at most one each of {}, in that order",
                section.local_name(),
                ROOT_SECTIONS.join(", ")
            ));
        }
        last_section = Some(position);

        match ROOT_SECTIONS[position] {
            ids::ELEMENT_IMPORTS => validate_imports(section)?,
            ids::ELEMENT_RULES => validate_rules(section)?,
            _ => validate_exemptions(section)?,
        }
    }
    Ok(())
}

fn section_position(section: &Element) -> Result<usize, String> {
    if section.namespace().is_some() {
        return Err(format!(
            "unexpected namespaced element <{}> under <{}>",
            section.local_name(),
            ids::ELEMENT_ROOT
        ));
    }
    ROOT_SECTIONS
        .iter()
        .position(|name| *name == section.local_name())
        .ok_or_else(|| {
            format!(
                "unexpected element <{}> under <{}>",
                section.local_name(),
                ids::ELEMENT_ROOT
            )
        })
}

fn validate_imports(imports: &Element) -> Result<(), String> {
    no_attributes(imports)?;
    if imports.children().is_empty() {
        return Err(format!(
            "<{}> must contain at least one <{}>",
            ids::ELEMENT_IMPORTS,
            ids::ELEMENT_IMPORT
        ));
    }
    for import in imports.children() {
        expect_name(import, ids::ELEMENT_IMPORTS, ids::ELEMENT_IMPORT)?;
        non_blank(import)?;
    }
    Ok(())
}

fn validate_rules(rules: &Element) -> Result<(), String> {
    no_attributes(rules)?;
    for rule in rules.children() {
        if rule.namespace().is_some() {
            continue;
        }
        if !ids::BUILTIN_RULES.contains(&rule.local_name()) {
            return Err(format!("unknown rule element <{}>", rule.local_name()));
        }
        for attribute in rule.attributes() {
            if attribute.name != ids::ATTRIBUTE_ID {
                return Err(format!(
                    "unexpected attribute '{}' on <{}>",
                    attribute.name,
                    rule.local_name()
                ));
            }
        }
        if let Some(id) = rule.attribute(ids::ATTRIBUTE_ID) {
            if id.is_empty() || id.chars().any(char::is_whitespace) {
                return Err(format!(
                    "rule id '{id}' on <{}> must be non-empty and contain no whitespace",
                    rule.local_name()
                ));
            }
        }
    }
    Ok(())
}

fn validate_exemptions(exemptions: &Element) -> Result<(), String> {
    no_attributes(exemptions)?;
    for exemption in exemptions.children() {
        expect_name(exemption, ids::ELEMENT_EXEMPTIONS, ids::ELEMENT_EXEMPTION)?;
        no_attributes(exemption)?;
        validate_exemption(exemption)?;
    }
    Ok(())
}

/// `rule-id`, then one or more `artifact-id`, then an optional `reason`.
fn validate_exemption(exemption: &Element) -> Result<(), String> {
    let mut children = exemption.children().iter().peekable();

    match children.next() {
        Some(first) => expect_name(first, ids::ELEMENT_EXEMPTION, ids::ELEMENT_RULE_ID)
            .and_then(|()| non_blank(first))?,
        None => return Err(missing(ids::ELEMENT_EXEMPTION, ids::ELEMENT_RULE_ID)),
    }

    let mut artifact_ids = 0;
    while let Some(child) = children.next_if(|c| c.local_name() == ids::ELEMENT_ARTIFACT_ID) {
        expect_name(child, ids::ELEMENT_EXEMPTION, ids::ELEMENT_ARTIFACT_ID)?;
        non_blank(child)?;
        artifact_ids += 1;
    }
    if artifact_ids == 0 {
        return Err(missing(ids::ELEMENT_EXEMPTION, ids::ELEMENT_ARTIFACT_ID));
    }

    if let Some(reason) = children.next() {
        expect_name(reason, ids::ELEMENT_EXEMPTION, ids::ELEMENT_REASON)?;
        text_only(reason)?;
    }
    if let Some(extra) = children.next() {
        return Err(format!(
            "unexpected element <{}> in <{}>",
            extra.local_name(),
            ids::ELEMENT_EXEMPTION
        ));
    }
    Ok(())
}

fn expect_name(element: &Element, parent: &str, expected: &str) -> Result<(), String> {
    if element.namespace().is_none() && element.local_name() == expected {
        Ok(())
    } else {
        Err(format!(
            "unexpected element <{}> in <{parent}>; expected <{expected}>",
            element.local_name()
        ))
    }
}

fn missing(parent: &str, child: &str) -> String {
    format!("<{parent}> is missing <{child}>")
}

fn no_attributes(element: &Element) -> Result<(), String> {
    match element.attributes().first() {
        Some(attribute) => Err(format!(
            "unexpected attribute '{}' on <{}>",
            attribute.name,
            element.local_name()
        )),
        None => Ok(()),
    }
}

fn text_only(element: &Element) -> Result<(), String> {
    no_attributes(element)?;
    match element.children().first() {
        Some(child) => Err(format!(
            "<{}> must contain text only, found <{}>",
            element.local_name(),
            child.local_name()
        )),
        None => Ok(()),
    }
}

fn non_blank(element: &Element) -> Result<(), String> {
    text_only(element)?;
    if element.text().is_empty() {
        Err(format!("<{}> must not be empty", element.local_name()))
    } else {
        Ok(())
    }
}
