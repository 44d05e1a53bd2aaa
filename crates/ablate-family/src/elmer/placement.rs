//! Needle placement.
//!
//! Each needle lands in one or two places depending on its class and
//! reference kind:
//!
//! | class | reference | emitted as |
//! |-------|-----------|------------|
//! | boundary-like | `surface:` / `zone:` | region entry + mesher `needle` |
//! | boundary-like | anything else | `needlelibrary` placement |
//! | `point-sources` | `library:` | solver `pointsources` block |
//! | `point-sources` | anything else | [`CompileError::UnsupportedReferenceKind`] |
//! | `library-reference` | any | nothing |

use ablate_core::{derive_axis, derive_offset, DecodeMode, ParameterError, Vec3};
use ablate_doc::Element;
use ablate_model::{Needle, NeedleClass, Simulation, SourceKind};

use super::{keys, needle_point};
use crate::config::CompileConfig;
use crate::error::CompileError;

/// Elements each needle contributes, grouped by the section they join.
#[derive(Debug, Default)]
pub(super) struct Placement {
    /// Appended to `regions`.
    pub regions: Vec<Element>,
    /// Appended to `mesher`, after the length scales.
    pub mesher: Vec<Element>,
    /// Appended to `needlelibrary`.
    pub library: Vec<Element>,
    /// Appended to `elmer`, after the algorithms.
    pub point_sources: Vec<Element>,
}

/// Inputs shared by every needle.
pub(super) struct PlacementContext<'a> {
    pub centre: Vec3,
    pub needle_zone: Option<&'a str>,
    pub number_placements: bool,
    pub config: &'a CompileConfig,
}

impl Placement {
    /// Place every needle in ordinal order.
    pub fn build(sim: &Simulation, ctx: &PlacementContext<'_>) -> Result<Self, CompileError> {
        let mut placement = Self::default();
        for needle in sim.needles.iter() {
            match needle.class {
                NeedleClass::Boundary | NeedleClass::SolidBoundary
                    if needle.reference.kind.is_mesh() =>
                {
                    placement.mesh_needle(needle, ctx)
                }
                NeedleClass::Boundary | NeedleClass::SolidBoundary => {
                    placement.library_needle(sim, needle, ctx)?
                }
                NeedleClass::PointSources => placement.point_sources(sim, needle)?,
                NeedleClass::LibraryReference => {
                    tracing::debug!(needle = %needle.index, "library reference needle not placed");
                }
            }
        }
        tracing::debug!(
            mesh_needles = placement.mesher.len(),
            library_needles = placement.library.len(),
            point_sources = placement.point_sources.len(),
            "needles placed"
        );
        Ok(placement)
    }

    fn mesh_needle(&mut self, needle: &Needle, ctx: &PlacementContext<'_>) {
        let kind = &needle.reference.kind;
        self.regions.push(
            Element::builder(kind.as_str())
                .attr("name", needle.index.as_str())
                .attr("input", format!("{}/{}", ctx.config.input_dir, needle.reference.locator))
                .attr("groups", "needles")
                .build(),
        );
        let characteristic_length = match kind {
            SourceKind::Zone => ctx.needle_zone,
            _ => None,
        };
        self.mesher.push(
            Element::builder("needle")
                .attr("region", needle.index.as_str())
                .attr_opt("characteristic_length", characteristic_length)
                .build(),
        );
    }

    fn library_needle(
        &mut self,
        sim: &Simulation,
        needle: &Needle,
        ctx: &PlacementContext<'_>,
    ) -> Result<(), CompileError> {
        let tip = needle_point(sim, &needle.index, keys::NEEDLE_TIP_LOCATION)?;
        let entry = needle_point(sim, &needle.index, keys::NEEDLE_ENTRY_LOCATION)?;

        let mut element = Element::builder("needle");
        if ctx.number_placements {
            element = element.attr("name", self.library.len() + 1);
        }
        element = match &needle.reference.kind {
            SourceKind::Library => element.attr("id", &needle.reference.locator),
            _ => element.attr("name", &needle.reference.locator),
        };

        let mut parameters = Element::builder("parameters");
        for param in needle.parameters.iter() {
            let value = param
                .value
                .decode(DecodeMode::Structured)
                .map_err(|e| e.for_key(param.key))?;
            parameters = parameters.child(
                Element::builder("constant")
                    .attr("name", param.key)
                    .attr("value", value.map_or_else(|| "null".to_owned(), |v| v.to_string()))
                    .build(),
            );
        }

        self.library.push(
            element
                .attr("offset", derive_offset(tip, ctx.centre))
                .attr("axis", derive_axis(tip, entry))
                .child(parameters.build())
                .build(),
        );
        Ok(())
    }

    fn point_sources(&mut self, sim: &Simulation, needle: &Needle) -> Result<(), CompileError> {
        if needle.reference.kind != SourceKind::Library {
            return Err(CompileError::UnsupportedReferenceKind {
                needle: needle.index.to_string(),
                kind: needle.reference.kind.as_str().to_owned(),
            });
        }
        let key = keys::CONSTANT_NEEDLE_EXTENSIONS;
        let lengths = sim
            .parameters
            .get_with(key, DecodeMode::Structured)?
            .ok_or_else(|| CompileError::MissingRequiredParameter {
                key: key.to_owned(),
                section: "pointsources".to_owned(),
            })?;
        let lengths = lengths.as_list().ok_or_else(|| ParameterError::WrongShape {
            key: key.to_owned(),
            expected: "a list of extension lengths",
        })?;

        let extensions = lengths.iter().enumerate().map(|(phase, length)| {
            Element::builder("extension")
                .attr("phase", phase)
                .attr("length", length)
                .build()
        });
        self.point_sources.push(
            Element::builder("pointsources")
                .attr("system", &needle.reference.locator)
                .child(Element::builder("extensions").children(extensions).build())
                .build(),
        );
        Ok(())
    }
}
