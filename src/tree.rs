//! Generic XML element tree.
//!
//! The extraction engine never looks at raw XML text. It walks a tree of
//! [`XmlNode`]s where every element keeps its qualified tag name, its
//! attributes (qualified keys such as `xmi:id` and `xsi:type`, in document
//! order) and its child elements in document order. Text content is dropped:
//! GenMyModel exports carry everything the engine needs in attributes.
//!
//! ```text
//! <xmi:XMI>                      XmlNode("xmi:XMI")
//!   <uml:Model name="M">           └── XmlNode("uml:Model") {name: M}
//!     <packagedElement .../>             └── XmlNode("packagedElement")
//!   </uml:Model>
//! </xmi:XMI>
//! ```

use indexmap::IndexMap;
use quick_xml::Reader;
use quick_xml::events::{BytesStart, Event};

use crate::error::{ParseError, Result};

/// Tag of a bare model root.
pub const MODEL_TAG: &str = "uml:Model";
/// Tag of the XMI wrapper element.
pub const XMI_TAG: &str = "xmi:XMI";

/// A single XML element with its attributes and child elements.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct XmlNode {
    pub tag: String,
    pub attributes: IndexMap<String, String>,
    pub children: Vec<XmlNode>,
}

impl XmlNode {
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            attributes: IndexMap::new(),
            children: Vec::new(),
        }
    }

    /// Builder: add an attribute.
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }

    /// Builder: add a child element.
    pub fn with_child(mut self, child: XmlNode) -> Self {
        self.children.push(child);
        self
    }

    /// Attribute value by qualified key.
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).map(String::as_str)
    }

    /// Attribute value, treating an empty string as absent.
    pub fn non_empty_attr(&self, key: &str) -> Option<&str> {
        self.attr(key).filter(|v| !v.is_empty())
    }

    /// Child elements with the given tag, in document order.
    pub fn children_named<'a, 'b>(
        &'a self,
        tag: &'b str,
    ) -> impl Iterator<Item = &'a XmlNode> + use<'a, 'b> {
        self.children.iter().filter(move |c| c.tag == tag)
    }

    /// The `index`-th child element with the given tag.
    pub fn child(&self, tag: &str, index: usize) -> Option<&XmlNode> {
        self.children_named(tag).nth(index)
    }
}

/// Parse XML text into its root element.
pub fn parse_document(input: &[u8]) -> Result<XmlNode> {
    let mut reader = Reader::from_reader(input);
    reader.config_mut().trim_text(true);

    let mut buf = Vec::new();
    let mut stack: Vec<XmlNode> = Vec::new();
    let mut root: Option<XmlNode> = None;

    loop {
        match reader.read_event_into(&mut buf) {
            Ok(Event::Start(ref e)) => {
                stack.push(node_from_start(e)?);
            }
            Ok(Event::Empty(ref e)) => {
                // Self-closing element - start and end at once
                let node = node_from_start(e)?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::End(_)) => {
                let node = stack
                    .pop()
                    .ok_or_else(|| ParseError::xml("Unexpected closing tag"))?;
                attach(&mut stack, &mut root, node)?;
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ParseError::xml(format!(
                    "XML parse error at position {}: {e}",
                    reader.error_position()
                )));
            }
            _ => {}
        }
        buf.clear();
    }

    if let Some(open) = stack.last() {
        return Err(ParseError::xml(format!("Unclosed element '{}'", open.tag)));
    }
    root.ok_or_else(|| ParseError::xml("Document has no root element"))
}

/// Select the `uml:Model` element of a parsed document.
///
/// Accepts either a bare `uml:Model` root or an `xmi:XMI` wrapper holding
/// exactly one `uml:Model`. Any other shape is a [`ParseError::MalformedDocument`].
pub fn model_root(document: &XmlNode) -> Result<&XmlNode> {
    match document.tag.as_str() {
        MODEL_TAG => Ok(document),
        XMI_TAG => {
            let mut models = document.children_named(MODEL_TAG);
            match (models.next(), models.next()) {
                (Some(model), None) => Ok(model),
                (None, _) => Err(ParseError::malformed(format!(
                    "'{XMI_TAG}' contains no '{MODEL_TAG}' element"
                ))),
                (Some(_), Some(_)) => Err(ParseError::malformed(format!(
                    "'{XMI_TAG}' contains more than one '{MODEL_TAG}' element"
                ))),
            }
        }
        other => Err(ParseError::malformed(format!(
            "Expected '{MODEL_TAG}' or '{XMI_TAG}' as root element, got '{other}'"
        ))),
    }
}

fn node_from_start(e: &BytesStart<'_>) -> Result<XmlNode> {
    let name_bytes = e.name();
    let tag = std::str::from_utf8(name_bytes.as_ref())
        .map_err(|e| ParseError::xml(format!("Invalid tag name: {e}")))?;
    let mut node = XmlNode::new(tag);

    for attr_result in e.attributes() {
        let attr = attr_result.map_err(|e| ParseError::xml(format!("Attribute error: {e}")))?;
        let key = std::str::from_utf8(attr.key.as_ref())
            .map_err(|e| ParseError::xml(format!("Attribute key error: {e}")))?;
        let value = attr
            .unescape_value()
            .map_err(|e| ParseError::xml(format!("Attribute value error: {e}")))?;
        node.attributes.insert(key.to_string(), value.into_owned());
    }

    Ok(node)
}

fn attach(stack: &mut [XmlNode], root: &mut Option<XmlNode>, node: XmlNode) -> Result<()> {
    if let Some(parent) = stack.last_mut() {
        parent.children.push(node);
        return Ok(());
    }
    if root.is_some() {
        return Err(ParseError::xml(format!(
            "Multiple root elements: unexpected '{}'",
            node.tag
        )));
    }
    *root = Some(node);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn test_parse_nested_elements_in_order() {
        let input = br#"<?xml version="1.0" encoding="UTF-8"?>
<uml:Model xmi:id="m1" name="Shop">
  <packagedElement xsi:type="uml:Class" xmi:id="c1" name="Order"/>
  <packagedElement xsi:type="uml:Class" xmi:id="c2" name="Item">
    <ownedAttribute xmi:id="a1" name="price"/>
  </packagedElement>
</uml:Model>"#;

        let root = parse_document(input).expect("Failed to parse");
        assert_eq!(root.tag, "uml:Model");
        assert_eq!(root.attr("name"), Some("Shop"));

        let names: Vec<_> = root
            .children_named("packagedElement")
            .filter_map(|c| c.attr("name"))
            .collect();
        assert_eq!(names, vec!["Order", "Item"]);

        let item = root.child("packagedElement", 1).unwrap();
        assert_eq!(item.child("ownedAttribute", 0).unwrap().attr("name"), Some("price"));
    }

    #[test]
    fn test_child_outlives_tag_argument() {
        let node = XmlNode::new("a")
            .with_child(XmlNode::new("b").with_attr("n", "0"))
            .with_child(XmlNode::new("b").with_attr("n", "1"));

        let found = {
            let tag = String::from("b");
            node.child(&tag, 1)
        };
        assert_eq!(found.and_then(|c| c.attr("n")), Some("1"));
        assert!(node.child("b", 2).is_none());
    }

    #[test]
    fn test_attribute_values_are_unescaped() {
        let input = br#"<uml:Model><details key="k" value="a &amp; b&#xA;c"/></uml:Model>"#;
        let root = parse_document(input).unwrap();
        assert_eq!(root.child("details", 0).unwrap().attr("value"), Some("a & b\nc"));
    }

    #[test]
    fn test_unclosed_element_is_xml_error() {
        let err = parse_document(b"<uml:Model><packagedElement>").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Xml);
    }

    #[test]
    fn test_model_root_bare_and_wrapped() {
        let bare = XmlNode::new(MODEL_TAG).with_attr("name", "A");
        assert_eq!(model_root(&bare).unwrap().attr("name"), Some("A"));

        let wrapped = XmlNode::new(XMI_TAG)
            .with_child(XmlNode::new("xmi:Documentation"))
            .with_child(XmlNode::new(MODEL_TAG).with_attr("name", "B"));
        assert_eq!(model_root(&wrapped).unwrap().attr("name"), Some("B"));
    }

    #[test]
    fn test_model_root_rejects_unknown_shapes() {
        let other = XmlNode::new("ecore:EPackage");
        assert_eq!(model_root(&other).unwrap_err().kind(), ErrorKind::MalformedDocument);

        let empty_wrapper = XmlNode::new(XMI_TAG);
        assert_eq!(
            model_root(&empty_wrapper).unwrap_err().kind(),
            ErrorKind::MalformedDocument
        );

        let two_models = XmlNode::new(XMI_TAG)
            .with_child(XmlNode::new(MODEL_TAG))
            .with_child(XmlNode::new(MODEL_TAG));
        assert_eq!(
            model_root(&two_models).unwrap_err().kind(),
            ErrorKind::MalformedDocument
        );
    }
}
