//! File-level conversion: UML document in, interface declarations out.
//!
//! The [`Converter`] is configured once (type system, dialect, rendering)
//! and then converts text, single files, or whole directories. A file that
//! fails to convert produces no output.

use std::path::{Path, PathBuf};

use crate::error::{ParseError, Result};
use crate::extract::{self, DialectParser, GenMyModel};
use crate::model::ParsedData;
use crate::render::{RenderOptions, render_interfaces_with};
use crate::types::{TypeSystem, type_system_for};

/// Extension of generated files.
pub const OUTPUT_EXTENSION: &str = "ts";
/// Extension of the companion JSON dump.
#[cfg(feature = "json")]
pub const JSON_EXTENSION: &str = "json";
/// Extensions of input documents picked up by [`Converter::convert_dir`].
pub const INPUT_EXTENSIONS: &[&str] = &["xml", "xmi", "uml"];

/// Converter configuration.
#[derive(Debug, Clone)]
pub struct ConverterOptions {
    /// Type system selector; only `sql` is supported.
    pub database_type: String,
    pub render: RenderOptions,
    /// Also write the parsed model next to the generated file.
    #[cfg(feature = "json")]
    pub write_json: bool,
}

impl Default for ConverterOptions {
    fn default() -> Self {
        Self {
            database_type: "sql".to_string(),
            render: RenderOptions::default(),
            #[cfg(feature = "json")]
            write_json: false,
        }
    }
}

/// Result of converting one document.
#[derive(Debug, Clone)]
pub struct Conversion {
    pub model: ParsedData,
    pub text: String,
}

/// Converts UML documents to interface declarations.
pub struct Converter {
    types: Box<dyn TypeSystem>,
    dialect: Box<dyn DialectParser>,
    options: ConverterOptions,
}

impl Converter {
    /// Create a converter for the GenMyModel dialect.
    ///
    /// Fails with [`ParseError::WrongDatabaseType`] for any type system other
    /// than `sql`, before any document is read.
    pub fn new(options: ConverterOptions) -> Result<Self> {
        Self::with_dialect(options, Box::new(GenMyModel))
    }

    pub fn with_dialect(options: ConverterOptions, dialect: Box<dyn DialectParser>) -> Result<Self> {
        let types = type_system_for(&options.database_type)?;
        Ok(Self {
            types,
            dialect,
            options,
        })
    }

    pub fn options(&self) -> &ConverterOptions {
        &self.options
    }

    /// Parse a document without rendering it.
    pub fn parse_str(&self, input: &str) -> Result<ParsedData> {
        extract::parse_str(input, self.dialect.as_ref(), self.types.as_ref())
    }

    /// Parse and render a document.
    pub fn convert_str(&self, input: &str) -> Result<Conversion> {
        let model = self.parse_str(input)?;
        let text = render_interfaces_with(&model, self.options.render);
        Ok(Conversion { model, text })
    }

    /// Convert `input` and write `<stem>.ts` into `out_dir`.
    ///
    /// Returns the path of the written file. All output is produced in
    /// memory first; if any file cannot be written, none is left behind.
    pub fn convert_file(&self, input: &Path, out_dir: &Path) -> Result<PathBuf> {
        let content = std::fs::read_to_string(input)?;
        let conversion = self.convert_str(&content)?;

        #[cfg(feature = "json")]
        let json = if self.options.write_json {
            let json = conversion
                .model
                .to_json_pretty()
                .map_err(|e| ParseError::json(e.to_string()))?;
            Some(json)
        } else {
            None
        };

        std::fs::create_dir_all(out_dir)?;
        let output = output_path(input, out_dir, OUTPUT_EXTENSION);
        std::fs::write(&output, &conversion.text)?;

        #[cfg(feature = "json")]
        if let Some(json) = json {
            let json_path = output_path(input, out_dir, JSON_EXTENSION);
            if let Err(e) = std::fs::write(&json_path, json) {
                let _ = std::fs::remove_file(&output);
                return Err(e.into());
            }
            tracing::info!("wrote {}", json_path.display());
        }

        tracing::info!("wrote {} from {}", output.display(), input.display());
        Ok(output)
    }

    /// Convert every input document directly inside `input_dir`.
    ///
    /// Files are processed in name order. Failing files are reported together
    /// after all others have been converted.
    pub fn convert_dir(&self, input_dir: &Path, out_dir: &Path) -> Result<Vec<PathBuf>> {
        let mut inputs = Vec::new();
        for entry in std::fs::read_dir(input_dir)? {
            let path = entry?.path();
            if path.is_file() && has_input_extension(&path) {
                inputs.push(path);
            }
        }
        inputs.sort();

        let mut written = Vec::new();
        let mut errors = Vec::new();
        for input in inputs {
            match self.convert_file(&input, out_dir) {
                Ok(output) => written.push(output),
                Err(e) => {
                    tracing::warn!("failed to convert {}: {e}", input.display());
                    errors.push(format!("{}: {}", input.display(), e));
                }
            }
        }

        if errors.is_empty() {
            Ok(written)
        } else {
            Err(ParseError::Conversion(format!(
                "Failed to convert {} file(s):\n  {}",
                errors.len(),
                errors.join("\n  ")
            )))
        }
    }
}

/// `out_dir/<stem of input>.<extension>`.
pub fn output_path(input: &Path, out_dir: &Path, extension: &str) -> PathBuf {
    let mut file_name = input.file_stem().unwrap_or(input.as_os_str()).to_os_string();
    file_name.push(".");
    file_name.push(extension);
    out_dir.join(file_name)
}

fn has_input_extension(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| INPUT_EXTENSIONS.iter().any(|i| i.eq_ignore_ascii_case(e)))
}
