//! Translation families for the Ablate configuration compiler.
//!
//! A [`Family`] turns a loaded [`Simulation`](ablate_model::Simulation)
//! into a configuration [`Document`](ablate_doc::Document) for one
//! mesher/solver combination. Families are looked up by name in an
//! explicit [`FamilyRegistry`]:
//!
//! ```
//! use ablate_core::FilesRequired;
//! use ablate_family::{CompileConfig, Family, FamilyRegistry};
//! use ablate_model::SimulationDescription;
//!
//! let description = SimulationDescription::from_json(r#"{
//!     "definition": "Simulation End",
//!     "parameters": {
//!         "CENTRE_LOCATION": { "value": "[0, 0, 0]", "type": "array(float)" },
//!         "SETTING_LESION_FIELD": "dead"
//!     }
//! }"#).unwrap();
//!
//! let family = FamilyRegistry::with_builtin()
//!     .create("elmer-libnuma", CompileConfig::default())
//!     .unwrap();
//! let mut files = FilesRequired::new();
//! let document = family.translate(&description, &mut files).unwrap();
//! assert_eq!(document.root().attr("version"), Some("1.0.1"));
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod elmer;
pub mod error;
pub mod family;
pub mod sanitizer;

pub use config::CompileConfig;
pub use elmer::ElmerLibNuma;
pub use error::{CompileError, ConfigError, FamilyError};
pub use family::{Family, FamilyConstructor, FamilyRegistry};
pub use sanitizer::{Sanitizer, DENIED_IDENTIFIERS};
