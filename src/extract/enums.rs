//! Enumeration builder.

use crate::error::{ParseError, Result};
use crate::model::{ElementId, EnumType};
use crate::tree::XmlNode;

use super::naming::element_id;

/// Build an enumeration from a `uml:Enumeration` element.
///
/// Literal names are upper-cased and kept in declaration order.
pub fn build_enum(element: &XmlNode) -> Result<(ElementId, EnumType)> {
    let name = element
        .non_empty_attr("name")
        .ok_or_else(|| ParseError::null_pointer("The enumeration's name can't be null."))?;

    let values = element
        .children_named("ownedLiteral")
        .map(|literal| {
            literal
                .non_empty_attr("name")
                .map(str::to_uppercase)
                .ok_or_else(|| {
                    ParseError::null_pointer(format!(
                        "The values of enumeration '{name}' can't be null."
                    ))
                })
        })
        .collect::<Result<Vec<_>>>()?;

    Ok((
        element_id(element)?,
        EnumType {
            name: name.to_string(),
            values,
        },
    ))
}
