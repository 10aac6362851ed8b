//! Naming conventions of GenMyModel documents.

use crate::error::{ParseError, Result};
use crate::model::ElementId;
use crate::tree::XmlNode;

/// Key of the annotation detail carrying free-text documentation.
pub const DOCUMENTATION_KEY: &str = "gmm-documentation";
/// Name of the parameter that holds an operation's return type.
pub const RETURN_PARAMETER: &str = "returnParameter";
/// Lower-cased name of the class treated as the user entity.
pub const USER_CLASS_NAME: &str = "user";
/// Upper bound value meaning "many".
pub const MANY: &str = "*";

/// The `xmi:id` of an element.
///
/// Ids join members to their owners, so an element without one is a
/// [`ParseError::MalformedDocument`].
pub fn element_id(element: &XmlNode) -> Result<ElementId> {
    element
        .non_empty_attr("xmi:id")
        .map(ElementId::new)
        .ok_or_else(|| {
            let name = element.attr("name").unwrap_or_default();
            ParseError::malformed(format!("The {} '{name}' has no xmi:id.", element.tag))
        })
}

/// Whether `name` denotes a primary-key-like member that is not modeled.
pub fn is_an_id(name: &str) -> bool {
    name.trim().eq_ignore_ascii_case("id")
}

/// Entity and table names encoded in a raw class name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClassNames {
    pub entity_name: String,
    pub table_name: Option<String>,
}

/// Split a raw class name of the form `Entity (table_name)`.
///
/// Without a parenthesized part the table name is left unset and falls back
/// to the entity name.
pub fn extract_class_name(raw: &str) -> ClassNames {
    match raw.split_once('(') {
        Some((entity, rest)) => {
            let table = rest.trim().trim_end_matches(')').trim();
            ClassNames {
                entity_name: entity.trim().to_string(),
                table_name: (!table.is_empty()).then(|| table.to_string()),
            }
        }
        None => ClassNames {
            entity_name: raw.trim().to_string(),
            table_name: None,
        },
    }
}

/// Trailing name component of an external type reference.
///
/// `pathmap://UML_LIBRARIES/UMLPrimitiveTypes.library.uml#String` → `String`,
/// `http://www.eclipse.org/emf/2002/Ecore#//EString` → `EString`.
pub fn type_name_from_url(href: &str) -> &str {
    let fragment = href.rsplit_once('#').map_or(href, |(_, f)| f);
    fragment
        .trim_end_matches('/')
        .rsplit('/')
        .next()
        .unwrap_or(fragment)
}

/// Upper-case the first character, leaving the rest untouched.
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Lower-case the first character, leaving the rest untouched.
pub fn lower_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Documentation text from the first annotation block of `element`.
///
/// Only the second detail entry is consulted, and only when its key is
/// [`DOCUMENTATION_KEY`].
pub fn documentation(element: &XmlNode) -> Option<String> {
    let detail = element.child("eAnnotations", 0)?.child("details", 1)?;
    if detail.attr("key") != Some(DOCUMENTATION_KEY) {
        return None;
    }
    detail.attr("value").map(str::to_string)
}
