//! Error types for compilation, configuration, and family dispatch.

use ablate_core::{GeometryError, LoadError, LookupError, ParameterError};
use thiserror::Error;

/// Fatal conditions while assembling a document.
///
/// Any of these aborts the compilation; no partial document is returned.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum CompileError {
    /// A parameter could not be decoded or had the wrong shape.
    #[error(transparent)]
    Parameter(#[from] ParameterError),
    /// A needle or region reference did not resolve.
    #[error(transparent)]
    Lookup(#[from] LookupError),
    /// The centre point could not be derived.
    #[error(transparent)]
    Geometry(#[from] GeometryError),
    /// An algorithm contains a denylisted identifier.
    #[error("algorithm '{algorithm}' uses forbidden identifier '{identifier}'")]
    ForbiddenOperation {
        /// Result name of the offending algorithm.
        algorithm: String,
        /// First denylisted identifier found.
        identifier: String,
    },
    /// A point-source needle references something other than a library id.
    #[error("needle '{needle}': point sources require a library reference, got '{kind}'")]
    UnsupportedReferenceKind {
        /// Declared index of the needle.
        needle: String,
        /// The reference kind that was given.
        kind: String,
    },
    /// A parameter the section needs is absent.
    #[error("{section}: required parameter {key} is missing")]
    MissingRequiredParameter {
        /// Parameter key.
        key: String,
        /// Section or needle that needed it.
        section: String,
    },
}

/// Invalid [`CompileConfig`](crate::CompileConfig) values.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `input_dir` is empty.
    #[error("input_dir must not be empty")]
    EmptyInputDir,
    /// `default_domain_radius` is NaN, infinite, zero, or negative.
    #[error("default_domain_radius must be finite and positive, got {value}")]
    InvalidRadius {
        /// The invalid value.
        value: f64,
    },
    /// `sources_marker` is empty.
    #[error("sources_marker must not be empty")]
    EmptySourcesMarker,
    /// An extra denylist entry is blank.
    #[error("extra_denied_identifiers[{position}] is blank")]
    BlankIdentifier {
        /// Position in the list.
        position: usize,
    },
    /// The TOML text did not parse.
    #[error("config parse: {0}")]
    Parse(#[from] toml::de::Error),
    /// The config file could not be read.
    #[error("config read: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors at the [`FamilyRegistry`](crate::FamilyRegistry) boundary.
#[derive(Debug, Error)]
pub enum FamilyError {
    /// No family is registered under the name.
    #[error("unknown family '{name}'")]
    UnknownFamily {
        /// Requested name.
        name: String,
    },
    /// The compile configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
    /// The description failed to load.
    #[error("load: {0}")]
    Load(#[from] LoadError),
    /// The loaded simulation failed to compile.
    #[error("compile: {0}")]
    Compile(#[from] CompileError),
}
