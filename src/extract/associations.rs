//! Association builder.
//!
//! A GenMyModel association owns exactly two ends. The second end is the
//! "from" side and the first end the "to" side:
//!
//! ```text
//! <packagedElement xsi:type="uml:Association" xmi:id="as1">
//!   <ownedEnd name="orders" type="c_order">      end[0] → to
//!     <upperValue value="*"/>
//!   </ownedEnd>
//!   <ownedEnd name="customer" type="c_customer"> end[1] → from
//!     <upperValue value="1"/>
//!   </ownedEnd>
//! </packagedElement>
//! ```

use crate::error::{ParseError, Result};
use crate::model::{Association, Cardinality, ElementId};
use crate::tree::XmlNode;

use super::naming::{MANY, documentation, element_id};

/// Build an association from a `uml:Association` element.
pub fn build_association(element: &XmlNode) -> Result<(ElementId, Association)> {
    let id = element_id(element)?;
    let ends: Vec<&XmlNode> = element.children_named("ownedEnd").collect();
    let &[to_end, from_end] = ends.as_slice() else {
        return Err(ParseError::malformed(format!(
            "Association '{id}' must own exactly two ends, found {}.",
            ends.len()
        )));
    };

    let end_type = |end: &XmlNode, side: &str| {
        end.non_empty_attr("type").map(ElementId::new).ok_or_else(|| {
            ParseError::malformed(format!("The {side} end of association '{id}' has no type."))
        })
    };

    // The "to" comment mirrors the "from" comment; the second slot is never read
    let comment_in_from = documentation(element).unwrap_or_default();
    let comment_in_to = comment_in_from.clone();

    let association = Association {
        from: end_type(from_end, "from")?,
        to: end_type(to_end, "to")?,
        injected_field_in_from: to_end.non_empty_attr("name").map(str::to_string),
        injected_field_in_to: from_end.non_empty_attr("name").map(str::to_string),
        kind: Cardinality::from_ends(is_many(to_end), is_many(from_end)),
        comment_in_from,
        comment_in_to,
    };
    tracing::debug!(
        "built association {id}: {} -> {} ({})",
        association.from,
        association.to,
        association.kind
    );
    Ok((id, association))
}

/// Whether an end's upper bound is the "many" sentinel.
fn is_many(end: &XmlNode) -> bool {
    end.child("upperValue", 0).and_then(|v| v.attr("value")) == Some(MANY)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::extract::naming::DOCUMENTATION_KEY;
    use rstest::rstest;

    fn end(name: &str, type_id: &str, upper: Option<&str>) -> XmlNode {
        let node = XmlNode::new("ownedEnd")
            .with_attr("name", name)
            .with_attr("type", type_id);
        match upper {
            Some(value) => node.with_child(XmlNode::new("upperValue").with_attr("value", value)),
            None => node,
        }
    }

    fn association(to_upper: Option<&str>, from_upper: Option<&str>) -> XmlNode {
        XmlNode::new("packagedElement")
            .with_attr("xsi:type", "uml:Association")
            .with_attr("xmi:id", "as1")
            .with_child(end("orders", "c_order", to_upper))
            .with_child(end("customer", "c_customer", from_upper))
    }

    #[test]
    fn test_end_ordering_convention() {
        let (id, assoc) = build_association(&association(Some("*"), Some("1"))).unwrap();
        assert_eq!(id.as_str(), "as1");
        assert_eq!(assoc.from.as_str(), "c_customer");
        assert_eq!(assoc.to.as_str(), "c_order");
        assert_eq!(assoc.injected_field_in_from.as_deref(), Some("orders"));
        assert_eq!(assoc.injected_field_in_to.as_deref(), Some("customer"));
    }

    #[rstest]
    #[case(Some("*"), Some("*"), Cardinality::ManyToMany)]
    #[case(Some("*"), Some("1"), Cardinality::OneToMany)]
    #[case(Some("1"), Some("*"), Cardinality::ManyToOne)]
    #[case(Some("1"), Some("1"), Cardinality::OneToOne)]
    #[case(None, None, Cardinality::OneToOne)]
    #[case(None, Some("*"), Cardinality::ManyToOne)]
    fn test_cardinality(
        #[case] to_upper: Option<&str>,
        #[case] from_upper: Option<&str>,
        #[case] expected: Cardinality,
    ) {
        let (_, assoc) = build_association(&association(to_upper, from_upper)).unwrap();
        assert_eq!(assoc.kind, expected);
    }

    #[test]
    fn test_comment_in_to_mirrors_comment_in_from() {
        let element = association(None, None).with_child(
            XmlNode::new("eAnnotations")
                .with_child(XmlNode::new("details").with_attr("key", "gmm-id"))
                .with_child(
                    XmlNode::new("details")
                        .with_attr("key", DOCUMENTATION_KEY)
                        .with_attr("value", "Orders placed by a customer."),
                )
                .with_child(
                    XmlNode::new("details")
                        .with_attr("key", DOCUMENTATION_KEY)
                        .with_attr("value", "Never read."),
                ),
        );
        let (_, assoc) = build_association(&element).unwrap();
        assert_eq!(assoc.comment_in_from, "Orders placed by a customer.");
        assert_eq!(assoc.comment_in_to, assoc.comment_in_from);
    }

    #[test]
    fn test_missing_comment_is_empty() {
        let (_, assoc) = build_association(&association(None, None)).unwrap();
        assert_eq!(assoc.comment_in_from, "");
        assert_eq!(assoc.comment_in_to, "");
    }

    #[test]
    fn test_wrong_number_of_ends_is_malformed() {
        let one_end = XmlNode::new("packagedElement")
            .with_attr("xmi:id", "as1")
            .with_child(end("orders", "c_order", None));
        let err = build_association(&one_end).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::MalformedDocument);
        assert!(err.to_string().contains("found 1"));
    }

    #[test]
    fn test_untyped_end_is_malformed() {
        let element = XmlNode::new("packagedElement")
            .with_attr("xmi:id", "as1")
            .with_child(XmlNode::new("ownedEnd").with_attr("name", "orders"))
            .with_child(end("customer", "c_customer", None));
        assert_eq!(
            build_association(&element).unwrap_err().kind(),
            ErrorKind::MalformedDocument
        );
    }
}
