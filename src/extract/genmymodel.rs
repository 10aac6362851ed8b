//! GenMyModel dialect.
//!
//! Parsing runs as an explicit, ordered list of stages. Each stage takes
//! ownership of the store built so far and hands it to the next one, so a
//! later stage can rely on everything an earlier stage registered:
//!
//! ```text
//! classify ─▶ Types ─▶ Enums ─▶ Classes ─▶ Associations ─▶ Interfaces ─▶ ParsedData
//!                               (fields,
//!                                operations)
//! ```

use crate::error::Result;
use crate::model::{EntityKind, ParsedData};
use crate::tree::XmlNode;
use crate::types::{TypeRegistry, TypeSystem};

use super::associations::build_association;
use super::classify::{ClassifiedElements, packaged_elements};
use super::entities::build_entity;
use super::enums::build_enum;
use super::naming::element_id;
use super::DialectParser;

/// Parser for UML models exported by GenMyModel.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenMyModel;

impl DialectParser for GenMyModel {
    fn name(&self) -> &'static str {
        "GenMyModel"
    }

    fn parse(&self, root: &XmlNode, types: &dyn TypeSystem) -> Result<ParsedData> {
        let ctx = ParseContext::new(root, types);
        tracing::debug!(
            "classified {} of {} packaged element(s)",
            ctx.classified.len(),
            ctx.elements.len()
        );

        STAGES
            .iter()
            .try_fold(ParsedData::new(), |data, stage| stage.run(&ctx, data))
    }
}

/// Input shared by all stages of one parse.
pub struct ParseContext<'a> {
    pub elements: Vec<&'a XmlNode>,
    pub classified: ClassifiedElements,
    pub registry: TypeRegistry<'a>,
}

impl<'a> ParseContext<'a> {
    pub fn new(root: &'a XmlNode, types: &'a dyn TypeSystem) -> Self {
        let elements = packaged_elements(root);
        let classified = ClassifiedElements::classify(&elements);
        Self {
            elements,
            classified,
            registry: TypeRegistry::new(types),
        }
    }

    fn select<'s>(&'s self, indices: &'s [usize]) -> impl Iterator<Item = &'a XmlNode> + 's {
        indices.iter().map(move |&index| self.elements[index])
    }
}

/// One step of the extraction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Stage {
    Types,
    Enums,
    Classes,
    Associations,
    Interfaces,
}

/// Stages in execution order.
pub const STAGES: [Stage; 5] = [
    Stage::Types,
    Stage::Enums,
    Stage::Classes,
    Stage::Associations,
    Stage::Interfaces,
];

impl Stage {
    /// Run this stage on `data`, returning the extended store.
    pub fn run(self, ctx: &ParseContext<'_>, mut data: ParsedData) -> Result<ParsedData> {
        let classified = &ctx.classified;
        match self {
            Self::Types => {
                for element in ctx.select(&classified.types) {
                    let id = element_id(element)?;
                    let name = element.attr("name").unwrap_or_default();
                    ctx.registry.register_type(&mut data, name, &id)?;
                }
            }
            Self::Enums => {
                for element in ctx.select(&classified.enums) {
                    let (id, enum_type) = build_enum(element)?;
                    data.add_enum(id, enum_type);
                }
            }
            Self::Classes => {
                for element in ctx.select(&classified.classes) {
                    build_entity(element, EntityKind::Class, &ctx.registry, &mut data)?;
                }
            }
            Self::Associations => {
                for element in ctx.select(&classified.associations) {
                    let (id, association) = build_association(element)?;
                    data.add_association(id, association);
                }
            }
            Self::Interfaces => {
                for element in ctx.select(&classified.interfaces) {
                    build_entity(element, EntityKind::Interface, &ctx.registry, &mut data)?;
                }
            }
        }
        tracing::debug!("stage {self:?} done");
        Ok(data)
    }
}
