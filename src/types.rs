//! Type systems and the type registry.
//!
//! A [`TypeSystem`] is the whitelist of type names a target storage dialect
//! accepts. The [`TypeRegistry`] validates names against it and records
//! accepted types in the model store.

use crate::error::{ParseError, Result};
use crate::model::{DataType, ElementId, ParsedData};

/// Names accepted by [`type_system_for`], including unsupported placeholders.
pub const DATABASE_TYPES: &[&str] = &["sql", "mongodb", "cassandra"];

/// A whitelist of type names for one storage dialect.
pub trait TypeSystem: Send + Sync {
    /// Selector name of this type system (e.g. `sql`).
    fn name(&self) -> &'static str;

    /// All accepted type names, in canonical spelling.
    fn type_names(&self) -> &'static [&'static str];

    /// Canonical spelling of `name`, matched case-insensitively.
    fn canonical(&self, name: &str) -> Option<&'static str> {
        self.type_names()
            .iter()
            .copied()
            .find(|t| t.eq_ignore_ascii_case(name))
    }

    fn contains(&self, name: &str) -> bool {
        self.canonical(name).is_some()
    }
}

/// Types accepted by SQL databases.
#[derive(Debug, Clone, Copy, Default)]
pub struct SqlTypes;

impl TypeSystem for SqlTypes {
    fn name(&self) -> &'static str {
        "sql"
    }

    fn type_names(&self) -> &'static [&'static str] {
        &[
            "String",
            "Integer",
            "Long",
            "BigDecimal",
            "Float",
            "Double",
            "Enum",
            "Boolean",
            "LocalDate",
            "ZonedDateTime",
            "Instant",
            "Blob",
            "AnyBlob",
            "ImageBlob",
            "TextBlob",
        ]
    }
}

/// Select a type system by name.
///
/// Only `sql` is implemented; `mongodb` and `cassandra` are recognized but
/// rejected like any other name.
pub fn type_system_for(database_type: &str) -> Result<Box<dyn TypeSystem>> {
    match database_type {
        "sql" => Ok(Box::new(SqlTypes)),
        other => Err(ParseError::WrongDatabaseType(format!(
            "The passed database type is incorrect. It must either be {}. Got '{other}'.",
            DATABASE_TYPES
                .iter()
                .map(|t| format!("'{t}'"))
                .collect::<Vec<_>>()
                .join(", ")
        ))),
    }
}

/// Validates type names and records them in a [`ParsedData`].
#[derive(Clone, Copy)]
pub struct TypeRegistry<'a> {
    system: &'a dyn TypeSystem,
}

impl<'a> TypeRegistry<'a> {
    pub fn new(system: &'a dyn TypeSystem) -> Self {
        Self { system }
    }

    pub fn system(&self) -> &'a dyn TypeSystem {
        self.system
    }

    /// Canonical name of `name`, or [`ParseError::WrongType`].
    pub fn canonicalize(&self, name: &str) -> Result<&'static str> {
        self.system.canonical(name).ok_or_else(|| {
            ParseError::wrong_type(format!(
                "The type '{name}' isn't supported by the '{}' type system.",
                self.system.name()
            ))
        })
    }

    /// Register `name` under `id`, overwriting any previous entry.
    ///
    /// Returns the canonical name that was stored.
    pub fn register_type(
        &self,
        data: &mut ParsedData,
        name: &str,
        id: &ElementId,
    ) -> Result<&'static str> {
        let canonical = self.canonicalize(name)?;
        tracing::trace!("registered type {canonical} as {id}");
        data.add_type(
            id.clone(),
            DataType {
                name: canonical.to_string(),
            },
        );
        Ok(canonical)
    }
}
