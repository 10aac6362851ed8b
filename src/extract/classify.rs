//! Classification of top-level model elements by their declared kind.

use crate::tree::XmlNode;

/// Tag of the top-level elements of a model.
pub const PACKAGED_ELEMENT: &str = "packagedElement";

/// The kinds of packaged element the extractor understands.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum RawKind {
    /// `uml:PrimitiveType` or `uml:DataType`.
    Type,
    Enumeration,
    Class,
    Association,
    Interface,
}

impl RawKind {
    /// Map an `xsi:type` value to a kind.
    pub fn from_xmi_type(xmi_type: &str) -> Option<Self> {
        match xmi_type {
            "uml:PrimitiveType" | "uml:DataType" => Some(Self::Type),
            "uml:Enumeration" => Some(Self::Enumeration),
            "uml:Class" => Some(Self::Class),
            "uml:Association" => Some(Self::Association),
            "uml:Interface" => Some(Self::Interface),
            _ => None,
        }
    }

    /// Kind declared by an element, from `xsi:type` or `xmi:type`.
    pub fn of(element: &XmlNode) -> Option<Self> {
        element
            .attr("xsi:type")
            .or_else(|| element.attr("xmi:type"))
            .and_then(Self::from_xmi_type)
    }
}

/// Positional indices of the packaged elements, bucketed by kind.
///
/// Each bucket keeps document order. Elements of any other kind are not
/// recorded.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClassifiedElements {
    pub types: Vec<usize>,
    pub enums: Vec<usize>,
    pub classes: Vec<usize>,
    pub associations: Vec<usize>,
    pub interfaces: Vec<usize>,
}

impl ClassifiedElements {
    /// Classify `elements` in a single pass.
    pub fn classify(elements: &[&XmlNode]) -> Self {
        let mut classified = Self::default();
        for (index, element) in elements.iter().enumerate() {
            let bucket = match RawKind::of(element) {
                Some(RawKind::Type) => &mut classified.types,
                Some(RawKind::Enumeration) => &mut classified.enums,
                Some(RawKind::Class) => &mut classified.classes,
                Some(RawKind::Association) => &mut classified.associations,
                Some(RawKind::Interface) => &mut classified.interfaces,
                None => {
                    tracing::trace!(
                        "skipping packaged element {index} of kind {:?}",
                        element.attr("xsi:type")
                    );
                    continue;
                }
            };
            bucket.push(index);
        }
        classified
    }

    pub fn len(&self) -> usize {
        self.types.len()
            + self.enums.len()
            + self.classes.len()
            + self.associations.len()
            + self.interfaces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// The packaged elements of a model root, in document order.
pub fn packaged_elements(root: &XmlNode) -> Vec<&XmlNode> {
    root.children_named(PACKAGED_ELEMENT).collect()
}
