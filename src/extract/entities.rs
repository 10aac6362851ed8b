//! Class and interface builder.

use crate::error::{ParseError, Result};
use crate::model::{ElementId, Entity, EntityKind, ParsedData};
use crate::tree::XmlNode;
use crate::types::TypeRegistry;

use super::members::{Owner, build_members};
use super::naming::{USER_CLASS_NAME, documentation, element_id, extract_class_name, upper_first};

/// Build a class or interface with its members and insert it into `data`.
///
/// For classes, the first one named like the user entity becomes
/// `data.user_class_id`.
pub fn build_entity(
    element: &XmlNode,
    kind: EntityKind,
    registry: &TypeRegistry<'_>,
    data: &mut ParsedData,
) -> Result<ElementId> {
    let missing_name = || match kind {
        EntityKind::Class => ParseError::null_pointer("Classes must have a name."),
        EntityKind::Interface => ParseError::null_pointer("Interfaces must have a name."),
    };

    let raw_name = element.non_empty_attr("name").ok_or_else(missing_name)?;
    let names = extract_class_name(raw_name);
    if names.entity_name.is_empty() {
        return Err(missing_name());
    }

    let id = element_id(element)?;
    if kind == EntityKind::Class
        && names.entity_name.eq_ignore_ascii_case(USER_CLASS_NAME)
        && data.set_user_class_if_absent(&id)
    {
        tracing::debug!("class {id} is the user class");
    }

    let mut entity = Entity::new(upper_first(&names.entity_name), names.table_name)
        .with_comment(documentation(element));

    let name = entity.name.clone();
    let owner = Owner {
        id: &id,
        kind,
        name: &name,
    };
    build_members(element, owner, registry, &mut entity, data)?;

    tracing::debug!(
        "built {kind} '{}' with {} field(s), {} operation(s)",
        entity.name,
        entity.fields.len(),
        entity.operations.len()
    );

    match kind {
        EntityKind::Class => data.add_class(id.clone(), entity),
        EntityKind::Interface => data.add_interface(id.clone(), entity),
    }
    Ok(id)
}
