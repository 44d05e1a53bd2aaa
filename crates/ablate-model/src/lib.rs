//! Simulation model for the Ablate configuration compiler.
//!
//! Turns a [`SimulationDescription`] into an indexed [`Simulation`]:
//! needles with dual addressing ([`NeedleRegistry`]), regions with a
//! meaning index ([`RegionRegistry`]), and post-processing
//! [`Algorithm`]s. Loading also fills the files-required table.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod algorithm;
pub mod description;
pub mod needle;
pub mod region;
pub mod simulation;

pub use algorithm::Algorithm;
pub use description::{
    AlgorithmDescription, NeedleDescription, ParameterDescription, RegionDescription,
    SimulationDescription, TaggedParameter,
};
pub use needle::{FileReference, Needle, NeedleClass, NeedleKey, NeedleRegistry, SourceKind};
pub use region::{Region, RegionFormat, RegionRegistry};
pub use simulation::Simulation;
