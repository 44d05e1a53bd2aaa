//! Ablate: compiles ablation simulation descriptions into solver
//! configuration documents.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Ablate sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use ablate::prelude::*;
//!
//! let description = SimulationDescription::from_json(r#"{
//!     "definition": "Simulation\nEnd",
//!     "needles": [
//!         { "index": "n1", "class": "boundary", "file": "library:probe",
//!           "parameters": {
//!               "NEEDLE_TIP_LOCATION": { "value": "[0, 0, 0]", "type": "array(float)" },
//!               "NEEDLE_ENTRY_LOCATION": { "value": "[0, 0, 10]", "type": "array(float)" } } }
//!     ],
//!     "parameters": { "SETTING_LESION_FIELD": "dead" }
//! }"#).unwrap();
//!
//! let family = FamilyRegistry::with_builtin()
//!     .create("elmer-libnuma", CompileConfig::default())
//!     .unwrap();
//! let mut files = FilesRequired::new();
//! let document = family.translate(&description, &mut files).unwrap();
//!
//! let library = document.section("needlelibrary").unwrap();
//! assert_eq!(library.child("needle").unwrap().attr("axis"), Some("0.0 0.0 10.0"));
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `ablate-core` | IDs, parameter store, geometry, files-required table, errors |
//! | [`model`] | `ablate-model` | Needle and region registries, input description, load step |
//! | [`doc`] | `ablate-doc` | Output document tree and renderers |
//! | [`family`] | `ablate-family` | Sanitizer, configuration, family registry, `elmer-libnuma` |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`ablate-core`).
///
/// The [`types::ParameterStore`] and its pure [`types::decode`] function,
/// the geometry deriver, and the shared error taxonomy.
pub use ablate_core as types;

/// Simulation model (`ablate-model`).
///
/// [`model::SimulationDescription`] is the input schema;
/// [`model::Simulation::load`] indexes it.
pub use ablate_model as model;

/// Output documents (`ablate-doc`).
pub use ablate_doc as doc;

/// Translation families (`ablate-family`).
///
/// Look families up by name in a [`family::FamilyRegistry`].
pub use ablate_family as family;

/// Common imports for typical Ablate usage.
///
/// ```rust
/// use ablate::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use ablate_core::{FilesRequired, NeedleIndex, ParamValue, ParameterStore, RegionId, Vec3};

    // Errors
    pub use ablate_core::{GeometryError, LoadError, LookupError, ParameterError};
    pub use ablate_family::{CompileError, ConfigError, FamilyError};

    // Model
    pub use ablate_model::{Simulation, SimulationDescription};

    // Documents
    pub use ablate_doc::{Document, Element, RenderError};

    // Families
    pub use ablate_family::{CompileConfig, ElmerLibNuma, Family, FamilyRegistry};
}
