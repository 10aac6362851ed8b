//! Extraction of a normalized [`ParsedData`] from a UML document tree.
//!
//! ## Architecture
//!
//! A modeling-tool dialect is a [`DialectParser`]: it receives the
//! `uml:Model` element and a [`TypeSystem`], and returns a complete model or
//! the first error encountered. Supporting another dialect means adding
//! another implementation.
//!
//! ```text
//! ┌──────────────┐   ┌─────────────────────┐   ┌─────────────────────┐
//! │  XmlNode     │──▶│ DialectParser       │──▶│ ParsedData          │
//! │  (uml:Model) │   │  GenMyModel         │   │  classes, fields,   │
//! └──────────────┘   │   classify          │   │  operations, ...    │
//!                    │   stages (builders) │   └─────────────────────┘
//!                    └──────────┬──────────┘
//!                               │ register_type
//!                    ┌──────────▼──────────┐
//!                    │ TypeRegistry        │
//!                    │  (TypeSystem: sql)  │
//!                    └─────────────────────┘
//! ```

pub mod associations;
pub mod classify;
pub mod entities;
pub mod enums;
mod genmymodel;
pub mod members;
pub mod naming;

pub use classify::{ClassifiedElements, RawKind};
pub use genmymodel::{GenMyModel, ParseContext, STAGES, Stage};

use crate::error::{ParseError, Result};
use crate::model::ParsedData;
use crate::tree::{self, XmlNode};
use crate::types::TypeSystem;

/// A parser for one modeling-tool export dialect.
pub trait DialectParser: Send + Sync {
    /// Human-readable name of the dialect.
    fn name(&self) -> &'static str;

    /// Build a fresh model from the `uml:Model` element.
    fn parse(&self, root: &XmlNode, types: &dyn TypeSystem) -> Result<ParsedData>;

    /// Attach field constraints (validations) to an already parsed model.
    ///
    /// Dialects that do not carry constraints keep this default.
    fn fill_constraints(&self, root: &XmlNode, data: &mut ParsedData) -> Result<()> {
        let _ = (root, data);
        Err(ParseError::UnimplementedOperation(format!(
            "{} does not support constraints.",
            self.name()
        )))
    }
}

/// Parse XML text with the given dialect.
///
/// The document root must be `uml:Model` or an `xmi:XMI` wrapper around one.
pub fn parse_str(
    input: &str,
    dialect: &dyn DialectParser,
    types: &dyn TypeSystem,
) -> Result<ParsedData> {
    let document = tree::parse_document(input.as_bytes())?;
    let root = tree::model_root(&document)?;
    dialect.parse(root, types)
}
