//! Normalized model extracted from a UML document.
//!
//! [`ParsedData`] is the aggregate produced by one parse. Every record is
//! keyed by the id the source document assigned to it, and every map keeps
//! insertion order so iteration follows document order.
//!
//! ```text
//! ParsedData
//! ├── types:        IndexMap<ElementId, DataType>
//! ├── enums:        IndexMap<ElementId, EnumType>
//! ├── classes:      IndexMap<ElementId, Entity>     ─┐ fields / operations
//! ├── interfaces:   IndexMap<ElementId, Entity>     ─┤ hold ids into the
//! ├── fields:       IndexMap<ElementId, Field>     ◀─┤ global maps below
//! ├── operations:   IndexMap<ElementId, Operation> ◀─┘
//! ├── associations: IndexMap<ElementId, Association>
//! └── user_class_id: Option<ElementId>
//! ```

use indexmap::IndexMap;
use std::sync::Arc;

#[cfg(feature = "json")]
use serde::Serialize;

// ============================================================================
// IDs
// ============================================================================

/// Identifier of a model element.
///
/// This is the `xmi:id` of the source element, or the canonical type name
/// for types registered from an external `href`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(pub Arc<str>);

impl ElementId {
    pub fn new(id: impl Into<Arc<str>>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ElementId {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

impl From<String> for ElementId {
    fn from(s: String) -> Self {
        Self::new(s)
    }
}

#[cfg(feature = "json")]
impl Serialize for ElementId {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

// ============================================================================
// TYPES AND ENUMS
// ============================================================================

/// A primitive or data type accepted by the configured type system.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct DataType {
    pub name: String,
}

/// An enumeration with upper-cased literal values.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct EnumType {
    pub name: String,
    pub values: Vec<String>,
}

// ============================================================================
// ENTITIES
// ============================================================================

/// DTO generation option. Reserved for generators beyond interfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize), serde(rename_all = "lowercase"))]
pub enum Dto {
    #[default]
    No,
    Mapstruct,
}

/// Pagination option. Reserved for generators beyond interfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize), serde(rename_all = "kebab-case"))]
pub enum Pagination {
    #[default]
    No,
    Pager,
    Pagination,
    InfiniteScroll,
}

/// Service layer option. Reserved for generators beyond interfaces.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize), serde(rename_all = "camelCase"))]
pub enum Service {
    #[default]
    No,
    ServiceClass,
    ServiceImpl,
}

/// Whether an entity was declared as a class or as an interface.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Class,
    Interface,
}

impl std::fmt::Display for EntityKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Class => write!(f, "class"),
            Self::Interface => write!(f, "interface"),
        }
    }
}

/// A class or interface with its members in declaration order.
///
/// Classes and interfaces share this shape but live in separate maps of
/// [`ParsedData`]; an element id is never present in both.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct Entity {
    pub name: String,
    pub table_name: String,
    pub fields: Vec<ElementId>,
    pub operations: Vec<ElementId>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub comment: Option<String>,
    pub dto: Dto,
    pub pagination: Pagination,
    pub service: Service,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub microservice_name: Option<String>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub search_engine: Option<String>,
}

pub type ClassEntity = Entity;
pub type InterfaceEntity = Entity;

impl Entity {
    /// Create an entity; the table name falls back to the entity name.
    pub fn new(name: impl Into<String>, table_name: Option<String>) -> Self {
        let name = name.into();
        let table_name = table_name
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| name.clone());
        Self {
            name,
            table_name,
            fields: Vec::new(),
            operations: Vec::new(),
            comment: None,
            dto: Dto::default(),
            pagination: Pagination::default(),
            service: Service::default(),
            microservice_name: None,
            search_engine: None,
        }
    }

    pub fn with_comment(mut self, comment: Option<String>) -> Self {
        self.comment = comment;
        self
    }

    pub fn add_field(&mut self, id: ElementId) -> &mut Self {
        self.fields.push(id);
        self
    }

    pub fn add_operation(&mut self, id: ElementId) -> &mut Self {
        self.operations.push(id);
        self
    }
}

// ============================================================================
// MEMBERS
// ============================================================================

/// An attribute of a class or interface.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct Field {
    pub name: String,
    /// Either an in-document type/enum id or a registered type name.
    #[cfg_attr(feature = "json", serde(rename = "type"))]
    pub type_ref: String,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub comment: Option<String>,
    pub owner: ElementId,
}

/// One declared operation parameter.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct Parameter {
    pub name: String,
    #[cfg_attr(feature = "json", serde(rename = "type"))]
    pub type_ref: String,
}

/// An operation of a class or interface.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize))]
pub struct Operation {
    pub name: String,
    /// Return type, taken from the return parameter.
    #[cfg_attr(feature = "json", serde(rename = "type", skip_serializing_if = "Option::is_none"))]
    pub return_type: Option<String>,
    pub parameters: Vec<Parameter>,
    pub owner: ElementId,
}

// ============================================================================
// ASSOCIATIONS
// ============================================================================

/// Cardinality of an association, derived from its ends' upper bounds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "json", derive(Serialize), serde(rename_all = "SCREAMING_SNAKE_CASE"))]
pub enum Cardinality {
    OneToOne,
    OneToMany,
    ManyToOne,
    ManyToMany,
}

impl Cardinality {
    /// Derive the cardinality from whether each end is "many".
    ///
    /// `to_many` is the first owned end, `from_many` the second.
    pub fn from_ends(to_many: bool, from_many: bool) -> Self {
        match (to_many, from_many) {
            (true, true) => Self::ManyToMany,
            (true, false) => Self::OneToMany,
            (false, true) => Self::ManyToOne,
            (false, false) => Self::OneToOne,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneToOne => "ONE_TO_ONE",
            Self::OneToMany => "ONE_TO_MANY",
            Self::ManyToOne => "MANY_TO_ONE",
            Self::ManyToMany => "MANY_TO_MANY",
        }
    }
}

impl std::fmt::Display for Cardinality {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A binary association between two classes.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct Association {
    pub from: ElementId,
    pub to: ElementId,
    pub injected_field_in_from: Option<String>,
    pub injected_field_in_to: Option<String>,
    #[cfg_attr(feature = "json", serde(rename = "type"))]
    pub kind: Cardinality,
    pub comment_in_from: String,
    pub comment_in_to: String,
}

// ============================================================================
// PARSED DATA
// ============================================================================

/// The model store filled by one parse.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "json", derive(Serialize), serde(rename_all = "camelCase"))]
pub struct ParsedData {
    pub types: IndexMap<ElementId, DataType>,
    pub enums: IndexMap<ElementId, EnumType>,
    pub classes: IndexMap<ElementId, ClassEntity>,
    pub interfaces: IndexMap<ElementId, InterfaceEntity>,
    pub fields: IndexMap<ElementId, Field>,
    pub operations: IndexMap<ElementId, Operation>,
    pub associations: IndexMap<ElementId, Association>,
    #[cfg_attr(feature = "json", serde(skip_serializing_if = "Option::is_none"))]
    pub user_class_id: Option<ElementId>,
}

impl ParsedData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or overwrite a type.
    pub fn add_type(&mut self, id: ElementId, data_type: DataType) {
        self.types.insert(id, data_type);
    }

    pub fn add_enum(&mut self, id: ElementId, enum_type: EnumType) {
        self.enums.insert(id, enum_type);
    }

    pub fn add_class(&mut self, id: ElementId, class: ClassEntity) {
        self.classes.insert(id, class);
    }

    pub fn add_interface(&mut self, id: ElementId, interface: InterfaceEntity) {
        self.interfaces.insert(id, interface);
    }

    pub fn add_field(&mut self, id: ElementId, field: Field) {
        self.fields.insert(id, field);
    }

    pub fn add_operation(&mut self, id: ElementId, operation: Operation) {
        self.operations.insert(id, operation);
    }

    pub fn add_association(&mut self, id: ElementId, association: Association) {
        self.associations.insert(id, association);
    }

    /// Record the user class unless one was already recorded.
    ///
    /// Returns `true` if `id` became the user class.
    pub fn set_user_class_if_absent(&mut self, id: &ElementId) -> bool {
        if self.user_class_id.is_some() {
            return false;
        }
        self.user_class_id = Some(id.clone());
        true
    }

    /// Look up a class or interface by id.
    pub fn entity(&self, id: &ElementId) -> Option<(EntityKind, &Entity)> {
        self.classes
            .get(id)
            .map(|e| (EntityKind::Class, e))
            .or_else(|| self.interfaces.get(id).map(|e| (EntityKind::Interface, e)))
    }

    /// Whether `id` names a registered type or enum.
    pub fn is_known_type(&self, id: &str) -> bool {
        let id = ElementId::new(id);
        self.types.contains_key(&id) || self.enums.contains_key(&id)
    }

    /// Fields of an entity, in declaration order.
    pub fn fields_of<'a>(&'a self, entity: &'a Entity) -> impl Iterator<Item = &'a Field> + 'a {
        entity.fields.iter().filter_map(|id| self.fields.get(id))
    }

    /// Operations of an entity, in declaration order.
    pub fn operations_of<'a>(
        &'a self,
        entity: &'a Entity,
    ) -> impl Iterator<Item = &'a Operation> + 'a {
        entity.operations.iter().filter_map(|id| self.operations.get(id))
    }

    /// Find a class by its (capitalized) name.
    pub fn find_class(&self, name: &str) -> Option<(&ElementId, &ClassEntity)> {
        self.classes.iter().find(|(_, c)| c.name == name)
    }

    /// Find an interface by its (capitalized) name.
    pub fn find_interface(&self, name: &str) -> Option<(&ElementId, &InterfaceEntity)> {
        self.interfaces.iter().find(|(_, i)| i.name == name)
    }

    /// Serialize the model as pretty-printed JSON.
    #[cfg(feature = "json")]
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}
