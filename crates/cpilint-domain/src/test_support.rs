use crate::model::{Artifact, IflowDocument, Resource, ResourceCategory};
use crate::query::Direction;
use cpilint_types::ArtifactTag;
use cpilint_xml::Element;
use std::convert::Infallible;

pub fn property(key: &str, value: &str) -> Element {
    Element::new("property")
        .with_child(Element::new("key").with_text(key))
        .with_child(Element::new("value").with_text(value))
}

fn with_properties(element: Element, props: &[(&str, &str)]) -> Element {
    let mut ext = Element::new("extensionElements");
    for (k, v) in props {
        ext = ext.with_child(property(k, v));
    }
    element.with_child(ext)
}

pub fn channel(
    id: &str,
    name: &str,
    direction: Direction,
    component_type: &str,
    props: &[(&str, &str)],
) -> Element {
    let mut all = vec![
        ("direction", direction.property_value()),
        ("ComponentType", component_type),
    ];
    all.extend_from_slice(props);
    with_properties(
        Element::new("messageFlow")
            .with_attribute("id", id)
            .with_attribute("name", name),
        &all,
    )
}

pub fn mapping_step(id: &str, name: &str, sub_activity_type: &str) -> Element {
    with_properties(
        Element::new("callActivity")
            .with_attribute("id", id)
            .with_attribute("name", name),
        &[("activityType", "Mapping"), ("subActivityType", sub_activity_type)],
    )
}

/// A flow document: channels go into the collaboration, everything else into the process.
pub fn iflow(description: Option<&str>, elements: Vec<Element>) -> IflowDocument {
    let mut collaboration = Element::new("collaboration").with_attribute("id", "Collaboration_1");
    if let Some(text) = description {
        collaboration = collaboration.with_child(Element::new("documentation").with_text(text));
    }
    let mut process = Element::new("process").with_attribute("id", "Process_1");
    for element in elements {
        if element.local_name() == "messageFlow" {
            collaboration = collaboration.with_child(element);
        } else {
            process = process.with_child(element);
        }
    }
    IflowDocument::new(
        Element::new("definitions")
            .with_child(collaboration)
            .with_child(process),
    )
}

pub fn iflow_without_collaboration() -> IflowDocument {
    IflowDocument::new(Element::new("definitions").with_child(Element::new("process")))
}

pub fn artifact(id: &str, document: IflowDocument) -> Artifact {
    Artifact::new(ArtifactTag::new(id, id), document)
}

pub fn groovy(name: &str, content: &str) -> Resource {
    Resource::new(name, ResourceCategory::GroovyScript, content.as_bytes())
}

pub fn ok(artifacts: Vec<Artifact>) -> Vec<Result<Artifact, Infallible>> {
    artifacts.into_iter().map(Ok).collect()
}
