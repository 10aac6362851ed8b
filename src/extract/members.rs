//! Field and operation builders shared by classes and interfaces.

use crate::error::{ParseError, Result};
use crate::model::{ElementId, Entity, EntityKind, Field, Operation, Parameter, ParsedData};
use crate::tree::XmlNode;
use crate::types::TypeRegistry;

use super::naming::{
    RETURN_PARAMETER, documentation, element_id, is_an_id, lower_first, type_name_from_url,
    upper_first,
};

/// The entity whose members are being built.
#[derive(Clone, Copy, Debug)]
pub struct Owner<'a> {
    pub id: &'a ElementId,
    pub kind: EntityKind,
    pub name: &'a str,
}

/// Where a member's type comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
enum TypeSource<'a> {
    /// `type="..."` attribute referencing an in-document id.
    Inline(&'a str),
    /// `<type href="..."/>` child; holds the trailing name component.
    External(&'a str),
}

fn type_source(node: &XmlNode) -> Option<TypeSource<'_>> {
    if let Some(inline) = node.non_empty_attr("type") {
        return Some(TypeSource::Inline(inline));
    }
    node.child("type", 0)
        .and_then(|t| t.non_empty_attr("href"))
        .map(|href| TypeSource::External(type_name_from_url(href)))
}

/// Build the fields and operations of `element` into `entity` and `data`.
///
/// Members named like an id are skipped.
pub fn build_members(
    element: &XmlNode,
    owner: Owner<'_>,
    registry: &TypeRegistry<'_>,
    entity: &mut Entity,
    data: &mut ParsedData,
) -> Result<()> {
    for attribute in element.children_named("ownedAttribute") {
        let name = attribute.non_empty_attr("name").ok_or_else(|| {
            ParseError::null_pointer(format!(
                "No name is defined for the passed attribute, for {} '{}'.",
                owner.kind, owner.name
            ))
        })?;
        if is_an_id(name) {
            tracing::trace!("skipping id attribute of {} '{}'", owner.kind, owner.name);
            continue;
        }
        let (id, field) = build_field(attribute, name, owner, registry, data)?;
        entity.add_field(id.clone());
        data.add_field(id, field);
    }

    for operation in element.children_named("ownedOperation") {
        let name = operation.non_empty_attr("name").ok_or_else(|| {
            ParseError::null_pointer(format!(
                "No name is defined for the passed operation, for {} '{}'.",
                owner.kind, owner.name
            ))
        })?;
        if is_an_id(name) {
            tracing::trace!("skipping id operation of {} '{}'", owner.kind, owner.name);
            continue;
        }
        let (id, op) = build_operation(operation, name, owner)?;
        entity.add_operation(id.clone());
        data.add_operation(id, op);
    }

    Ok(())
}

fn build_field(
    attribute: &XmlNode,
    name: &str,
    owner: Owner<'_>,
    registry: &TypeRegistry<'_>,
    data: &mut ParsedData,
) -> Result<(ElementId, Field)> {
    let type_ref = match type_source(attribute) {
        Some(TypeSource::Inline(id)) => {
            if !data.is_known_type(id) {
                tracing::warn!(
                    "field '{name}' of {} '{}' references unknown type id '{id}'",
                    owner.kind,
                    owner.name
                );
            }
            id.to_string()
        }
        Some(TypeSource::External(type_name)) => {
            // Externally sourced types are keyed by their own name
            let type_name = upper_first(type_name);
            let canonical = registry.canonicalize(&type_name)?;
            registry.register_type(data, canonical, &ElementId::new(canonical))?;
            canonical.to_string()
        }
        None => {
            return Err(ParseError::wrong_field(format!(
                "The field '{name}', of {} '{}', does not possess any type.",
                owner.kind, owner.name
            )));
        }
    };

    Ok((
        element_id(attribute)?,
        Field {
            name: lower_first(name),
            type_ref,
            comment: documentation(attribute),
            owner: owner.id.clone(),
        },
    ))
}

fn build_operation(
    operation: &XmlNode,
    name: &str,
    owner: Owner<'_>,
) -> Result<(ElementId, Operation)> {
    let mut return_type = None;
    let mut parameters = Vec::new();

    for (index, parameter) in operation.children_named("ownedParameter").enumerate() {
        let parameter_name = parameter.non_empty_attr("name");
        let type_ref = match type_source(parameter) {
            Some(TypeSource::Inline(id)) => id.to_string(),
            Some(TypeSource::External(type_name)) => upper_first(type_name),
            None => {
                return Err(ParseError::wrong_field(format!(
                    "The parameter '{}' of operation '{name}', of {} '{}', does not possess any type.",
                    parameter_name.unwrap_or_default(),
                    owner.kind,
                    owner.name
                )));
            }
        };

        let is_return = parameter_name == Some(RETURN_PARAMETER)
            || parameter.attr("direction") == Some("return");
        if is_return {
            return_type = Some(type_ref);
        } else {
            parameters.push(Parameter {
                name: parameter_name.map_or_else(|| format!("arg{index}"), lower_first),
                type_ref,
            });
        }
    }

    Ok((
        element_id(operation)?,
        Operation {
            name: lower_first(name),
            return_type,
            parameters,
            owner: owner.id.clone(),
        },
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::types::SqlTypes;

    fn typed_attribute(id: &str, name: &str, type_id: &str) -> XmlNode {
        XmlNode::new("ownedAttribute")
            .with_attr("xmi:id", id)
            .with_attr("name", name)
            .with_attr("type", type_id)
    }

    fn href_type(href: &str) -> XmlNode {
        XmlNode::new("type").with_attr("href", href)
    }

    fn build(element: &XmlNode) -> Result<(Entity, ParsedData)> {
        let registry = TypeRegistry::new(&SqlTypes);
        let id = ElementId::new("c1");
        let owner = Owner {
            id: &id,
            kind: EntityKind::Class,
            name: "Order",
        };
        let mut entity = Entity::new("Order", None);
        let mut data = ParsedData::new();
        build_members(element, owner, &registry, &mut entity, &mut data)?;
        Ok((entity, data))
    }

    #[test]
    fn test_fields_keep_order_and_skip_ids() {
        let element = XmlNode::new("packagedElement")
            .with_child(typed_attribute("a0", "id", "t_string"))
            .with_child(typed_attribute("a1", "Total", "t_decimal"))
            .with_child(typed_attribute("a2", "status", "e_status"));

        let (entity, data) = build(&element).unwrap();
        assert_eq!(entity.fields, vec![ElementId::new("a1"), ElementId::new("a2")]);

        let total = &data.fields[&ElementId::new("a1")];
        assert_eq!(total.name, "total");
        assert_eq!(total.type_ref, "t_decimal");
        assert_eq!(total.owner, ElementId::new("c1"));
        assert!(!data.fields.contains_key(&ElementId::new("a0")));
    }

    #[test]
    fn test_href_field_registers_type_by_name() {
        let element = XmlNode::new("packagedElement")
            .with_child(
                XmlNode::new("ownedAttribute")
                    .with_attr("xmi:id", "a1")
                    .with_attr("name", "quantity")
                    .with_child(href_type("pathmap://UML_LIBRARIES/UMLPrimitiveTypes.library.uml#integer")),
            )
            .with_child(
                XmlNode::new("ownedAttribute")
                    .with_attr("xmi:id", "a2")
                    .with_attr("name", "count")
                    .with_child(href_type("types.uml#Integer")),
            );

        let (_, data) = build(&element).unwrap();
        assert_eq!(data.fields[&ElementId::new("a1")].type_ref, "Integer");
        assert_eq!(data.types.len(), 1);
        assert_eq!(data.types[&ElementId::new("Integer")].name, "Integer");
    }

    #[test]
    fn test_href_field_outside_whitelist_is_wrong_type() {
        let element = XmlNode::new("packagedElement").with_child(
            XmlNode::new("ownedAttribute")
                .with_attr("xmi:id", "a1")
                .with_attr("name", "price")
                .with_child(href_type("types.uml#Money")),
        );
        assert_eq!(build(&element).unwrap_err().kind(), ErrorKind::WrongType);
    }

    #[test]
    fn test_untyped_field_is_wrong_field() {
        let element = XmlNode::new("packagedElement").with_child(
            XmlNode::new("ownedAttribute")
                .with_attr("xmi:id", "a1")
                .with_attr("name", "price"),
        );
        let err = build(&element).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::WrongField);
        assert!(err.to_string().contains("'price'"));
        assert!(err.to_string().contains("class 'Order'"));
    }

    #[test]
    fn test_unnamed_members_are_null_pointers() {
        let attribute = XmlNode::new("packagedElement")
            .with_child(XmlNode::new("ownedAttribute").with_attr("type", "t1"));
        assert_eq!(build(&attribute).unwrap_err().kind(), ErrorKind::NullPointer);

        let operation = XmlNode::new("packagedElement").with_child(XmlNode::new("ownedOperation"));
        assert_eq!(build(&operation).unwrap_err().kind(), ErrorKind::NullPointer);
    }

    #[test]
    fn test_operation_return_parameter_becomes_type() {
        let element = XmlNode::new("packagedElement").with_child(
            XmlNode::new("ownedOperation")
                .with_attr("xmi:id", "o1")
                .with_attr("name", "ComputeTotal")
                .with_child(
                    XmlNode::new("ownedParameter")
                        .with_attr("name", "Discount")
                        .with_child(href_type("types.uml#double")),
                )
                .with_child(
                    XmlNode::new("ownedParameter")
                        .with_attr("name", "currency")
                        .with_attr("type", "t_string"),
                )
                .with_child(
                    XmlNode::new("ownedParameter")
                        .with_attr("name", RETURN_PARAMETER)
                        .with_child(href_type("types.uml#bigDecimal")),
                ),
        );

        let (entity, data) = build(&element).unwrap();
        assert_eq!(entity.operations, vec![ElementId::new("o1")]);

        let op = &data.operations[&ElementId::new("o1")];
        assert_eq!(op.name, "computeTotal");
        assert_eq!(op.return_type.as_deref(), Some("BigDecimal"));
        assert_eq!(
            op.parameters,
            vec![
                Parameter {
                    name: "discount".to_string(),
                    type_ref: "Double".to_string()
                },
                Parameter {
                    name: "currency".to_string(),
                    type_ref: "t_string".to_string()
                },
            ]
        );
        // Operation parameter types are not registered
        assert!(data.types.is_empty());
    }

    #[test]
    fn test_operation_return_direction() {
        let element = XmlNode::new("packagedElement").with_child(
            XmlNode::new("ownedOperation")
                .with_attr("xmi:id", "o1")
                .with_attr("name", "isEmpty")
                .with_child(
                    XmlNode::new("ownedParameter")
                        .with_attr("name", "result")
                        .with_attr("direction", "return")
                        .with_attr("type", "t_bool"),
                ),
        );
        let (_, data) = build(&element).unwrap();
        let op = &data.operations[&ElementId::new("o1")];
        assert_eq!(op.return_type.as_deref(), Some("t_bool"));
        assert!(op.parameters.is_empty());
    }

    #[test]
    fn test_untyped_parameter_is_wrong_field() {
        let element = XmlNode::new("packagedElement").with_child(
            XmlNode::new("ownedOperation")
                .with_attr("xmi:id", "o1")
                .with_attr("name", "cancel")
                .with_child(XmlNode::new("ownedParameter").with_attr("name", "reason")),
        );
        assert_eq!(build(&element).unwrap_err().kind(), ErrorKind::WrongField);
    }
}
