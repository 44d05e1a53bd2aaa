//! Core types for the Ablate configuration compiler.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! fundamental abstractions used throughout the Ablate workspace:
//! identifiers, the typed [`ParameterStore`], the geometry deriver,
//! the files-required table, and the shared error taxonomy.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod files;
pub mod geometry;
pub mod id;
pub mod param;

pub use error::{GeometryError, LoadError, LookupError, ParameterError};
pub use files::{derived_file_name, FilesRequired};
pub use geometry::{derive_axis, derive_centre, derive_offset, CentrePolicy, Vec3};
pub use id::{is_element_name, NeedleIndex, Ordinal, RegionId};
pub use param::{
    decode, format_float, DecodeError, DecodeMode, ParamValue, Parameter, ParameterStore,
    RawValue, TypeTag,
};
