use crate::XmlError;
use crate::element::{Attribute, Element};
use quick_xml::events::{BytesStart, Event};
use quick_xml::name::ResolveResult;
use quick_xml::reader::NsReader;

/// Parse `text` into an element tree rooted at the document element.
pub fn parse_document(text: &str) -> Result<Element, XmlError> {
    let mut reader = NsReader::from_str(text);
    let mut stack: Vec<Element> = Vec::new();
    let mut root: Option<Element> = None;

    loop {
        let position = reader.buffer_position() as u64;
        let (resolved, event) = reader
            .read_resolved_event()
            .map_err(|e| XmlError::malformed(position, e))?;

        match event {
            Event::Start(start) => {
                let element = open_element(resolved, &start, position)?;
                stack.push(element);
            }
            Event::Empty(start) => {
                let element = open_element(resolved, &start, position)?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::End(_) => {
                let element = stack
                    .pop()
                    .ok_or_else(|| XmlError::malformed(position, "unexpected end tag"))?;
                attach(element, &mut stack, &mut root)?;
            }
            Event::Text(t) => {
                if let Some(current) = stack.last_mut() {
                    let text = t.unescape().map_err(|e| XmlError::malformed(position, e))?;
                    current.push_text(&text);
                }
            }
            Event::CData(c) => {
                if let Some(current) = stack.last_mut() {
                    current.push_text(&String::from_utf8_lossy(&c.into_inner()));
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    if let Some(open) = stack.pop() {
        return Err(XmlError::Unclosed(open.local_name().to_string()));
    }
    root.ok_or(XmlError::NoRoot)
}

fn open_element(
    resolved: ResolveResult<'_>,
    start: &BytesStart<'_>,
    position: u64,
) -> Result<Element, XmlError> {
    let local_name = String::from_utf8_lossy(start.local_name().as_ref()).into_owned();
    let namespace = match resolved {
        ResolveResult::Bound(ns) => Some(String::from_utf8_lossy(ns.as_ref()).into_owned()),
        ResolveResult::Unbound => None,
        ResolveResult::Unknown(prefix) => {
            return Err(XmlError::UnknownPrefix(
                String::from_utf8_lossy(&prefix).into_owned(),
            ));
        }
    };

    let mut element = Element::new(local_name);
    element.set_namespace(namespace);

    for attr in start.attributes() {
        let attr = attr.map_err(|e| XmlError::malformed(position, e))?;
        let key = attr.key.as_ref();
        if key == b"xmlns" || key.starts_with(b"xmlns:") {
            continue;
        }
        let name = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
        let value = attr
            .unescape_value()
            .map_err(|e| XmlError::malformed(position, e))?
            .into_owned();
        element.push_attribute(Attribute { name, value });
    }

    Ok(element)
}

fn attach(
    element: Element,
    stack: &mut [Element],
    root: &mut Option<Element>,
) -> Result<(), XmlError> {
    if let Some(parent) = stack.last_mut() {
        parent.push_child(element);
        return Ok(());
    }
    if root.is_some() {
        return Err(XmlError::MultipleRoots(element.local_name().to_string()));
    }
    *root = Some(element);
    Ok(())
}
