//! Render the interfaces of a [`ParsedData`] as TypeScript declarations.
//!
//! Output for each interface, in map order:
//!
//! ```text
//! interface Widget {
//!   label: String;
//!   (x: String, y: Integer): Boolean;
//! }
//! ```
//!
//! Type tokens are written exactly as stored; no resolution or ordering of
//! referenced types is performed.

use std::fmt::Write;

use crate::model::{Entity, Operation, Parameter, ParsedData};

/// Display name written for every parameter in [`ParameterNames::Placeholder`] mode.
pub const PLACEHOLDER_PARAMETER: &str = "test";
/// Return type written for operations without a return parameter.
pub const VOID_TYPE: &str = "void";

/// How operation parameters are named in signatures.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ParameterNames {
    /// The parameter names captured from the document.
    #[default]
    Declared,
    /// A constant placeholder for every parameter (legacy output).
    Placeholder,
}

/// Rendering options.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderOptions {
    pub parameter_names: ParameterNames,
}

impl RenderOptions {
    pub fn with_parameter_names(mut self, parameter_names: ParameterNames) -> Self {
        self.parameter_names = parameter_names;
        self
    }
}

/// Render every interface of `data` with default options.
pub fn render_interfaces(data: &ParsedData) -> String {
    render_interfaces_with(data, RenderOptions::default())
}

/// Render every interface of `data`.
pub fn render_interfaces_with(data: &ParsedData, options: RenderOptions) -> String {
    let mut output = String::new();
    for interface in data.interfaces.values() {
        render_interface(&mut output, data, interface, options);
    }
    output
}

/// Append one interface declaration to `output`.
pub fn render_interface(
    output: &mut String,
    data: &ParsedData,
    interface: &Entity,
    options: RenderOptions,
) {
    let _ = writeln!(output, "interface {} {{", interface.name);
    for field in data.fields_of(interface) {
        let _ = writeln!(output, "  {}: {};", field.name, field.type_ref);
    }
    for operation in data.operations_of(interface) {
        let _ = writeln!(output, "  {};", signature(operation, options));
    }
    output.push_str("}\n");
}

/// `(name: Type, ...): ReturnType` for an operation.
pub fn signature(operation: &Operation, options: RenderOptions) -> String {
    let parameters = operation
        .parameters
        .iter()
        .map(|p| parameter(p, options))
        .collect::<Vec<_>>()
        .join(", ");
    let return_type = operation.return_type.as_deref().unwrap_or(VOID_TYPE);
    format!("({parameters}): {return_type}")
}

fn parameter(parameter: &Parameter, options: RenderOptions) -> String {
    let name = match options.parameter_names {
        ParameterNames::Declared => parameter.name.as_str(),
        ParameterNames::Placeholder => PLACEHOLDER_PARAMETER,
    };
    format!("{name}: {}", parameter.type_ref)
}
