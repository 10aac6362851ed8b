//! # umlgen-base
//!
//! Extracts UML class models exported as XMI by GenMyModel into a normalized
//! model, and renders that model's interfaces as TypeScript declarations.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! pipeline  → Converter: configuration, file in → .ts out
//!   ↓
//! render    → Interface declarations from ParsedData
//!   ↓
//! extract   → DialectParser (GenMyModel): classify + staged builders
//!   ↓
//! types     → TypeSystem whitelists, TypeRegistry
//!   ↓
//! model     → ParsedData and its entity records
//!   ↓
//! tree      → XML text → XmlNode tree, model root selection
//!   ↓
//! error     → ParseError
//! ```
//!
//! ## Usage
//!
//! ```ignore
//! use umlgen::pipeline::{Converter, ConverterOptions};
//!
//! let converter = Converter::new(ConverterOptions::default())?;
//! let conversion = converter.convert_str(&std::fs::read_to_string("shop.xmi")?)?;
//! println!("{}", conversion.text);
//! ```

// ============================================================================
// MODULES (dependency order: error → tree → model → types → extract → render → pipeline)
// ============================================================================

/// Error kinds shared by every stage
pub mod error;

/// Generic XML element tree
pub mod tree;

/// Normalized model store
pub mod model;

/// Type systems and the type registry
pub mod types;

/// Dialect parsers and element builders
pub mod extract;

/// Interface renderer
pub mod render;

/// File-level conversion
pub mod pipeline;

pub use error::{ErrorKind, ParseError, Result};
pub use extract::{DialectParser, GenMyModel};
pub use model::{ElementId, ParsedData};
pub use pipeline::{Conversion, Converter, ConverterOptions};
pub use render::{ParameterNames, RenderOptions, render_interfaces};
pub use types::{SqlTypes, TypeRegistry, TypeSystem};
