//! The `elmer-libnuma` family.
//!
//! Produces a `gosmart` document for a CGAL mesher feeding an Elmer solver
//! with the NUMA module library. Sections are built independently and
//! composed in a fixed order:
//!
//! 1. `geometry`
//! 2. `regions` (mesh needles appended)
//! 3. `constants`
//! 4. `needlelibrary` (library placements appended)
//! 5. `mesher` (mesh needles appended)
//! 6. `optimizer`, `elmergrid` (empty)
//! 7. `elmer` (point sources appended)
//! 8. `lesion`
//!
//! Needle placement is computed once, before composition, so that every
//! section is complete when it is built.

mod geometry;
mod keys;
mod lesion;
mod mesher;
mod placement;
mod regions;
mod solver;

pub use mesher::classify;

use ablate_core::Vec3;
use ablate_doc::{Document, Element};
use ablate_model::{NeedleKey, Simulation};

use crate::config::CompileConfig;
use crate::error::CompileError;
use crate::family::Family;
use crate::sanitizer::Sanitizer;
use placement::{Placement, PlacementContext};

/// Decode a required point parameter of a needle.
fn needle_point(
    sim: &Simulation,
    key: impl Into<NeedleKey>,
    param: &str,
) -> Result<Vec3, CompileError> {
    let needle = sim.needles.resolve(key)?;
    needle
        .parameters
        .get_vec3(param)?
        .ok_or_else(|| CompileError::MissingRequiredParameter {
            key: param.to_owned(),
            section: format!("needle {}", needle.index),
        })
}

/// CGAL meshing plus Elmer solving with the NUMA modules.
#[derive(Clone, Debug)]
pub struct ElmerLibNuma {
    config: CompileConfig,
    sanitizer: Sanitizer,
}

impl ElmerLibNuma {
    /// Registry name.
    pub const NAME: &'static str = "elmer-libnuma";
    /// `name` attribute of the document root.
    pub const SCHEMA_NAME: &'static str = "elmer_libnuma";
    /// `version` attribute of the document root.
    pub const SCHEMA_VERSION: &'static str = "1.0.1";

    /// Create the family. The sanitizer denylist is extended with
    /// `config.extra_denied_identifiers`.
    pub fn new(config: CompileConfig) -> Self {
        let sanitizer = Sanitizer::new(config.extra_denied_identifiers.iter().cloned());
        Self { config, sanitizer }
    }

    /// The sanitizer applied to every algorithm.
    pub fn sanitizer(&self) -> &Sanitizer {
        &self.sanitizer
    }
}

impl Default for ElmerLibNuma {
    fn default() -> Self {
        Self::new(CompileConfig::default())
    }
}

impl Family for ElmerLibNuma {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn config(&self) -> &CompileConfig {
        &self.config
    }

    fn compile(&self, sim: &Simulation) -> Result<Document, CompileError> {
        let config = &self.config;
        let (geometry, centre) = geometry::section(sim)?;
        let regions = regions::regions(sim, &config.input_dir);
        let constants = regions::constants(sim)?;
        let needle_library = mesher::needle_library(sim)?;
        let (mesher, needle_zone) = mesher::section(sim, config)?;
        let solver = solver::section(sim, config, &self.sanitizer)?;
        let placement = Placement::build(
            sim,
            &PlacementContext {
                centre,
                needle_zone: needle_zone.as_deref(),
                number_placements: mesher::numbers_placements(sim),
                config,
            },
        )?;
        let lesion = lesion::section(sim)?;

        let root = Element::builder("gosmart")
            .attr("name", Self::SCHEMA_NAME)
            .attr("version", Self::SCHEMA_VERSION)
            .child(geometry.build())
            .child(regions.children(placement.regions).build())
            .child(constants.build())
            .child(needle_library.children(placement.library).build())
            .child(mesher.children(placement.mesher).build())
            .child(Element::empty("optimizer"))
            .child(Element::empty("elmergrid"))
            .child(solver.children(placement.point_sources).build())
            .child(lesion)
            .build();

        let document = Document::new(root);
        tracing::info!(
            family = Self::NAME,
            needles = sim.needles.len(),
            regions = sim.regions.len(),
            fingerprint = %format!("{:016x}", document.fingerprint()),
            "document compiled"
        );
        Ok(document)
    }
}
