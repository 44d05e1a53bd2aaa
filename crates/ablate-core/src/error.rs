//! Error types shared across the Ablate workspace.
//!
//! Organized by subsystem: parameter decoding, registry lookup, geometry
//! derivation, and description loading. Compile-time failures that only
//! the document assembler can detect live in `ablate-family`.

use thiserror::Error;

/// Errors from resolving a parameter into a usable value.
///
/// A *missing* optional parameter is never an error; lookups return
/// `Ok(None)` and callers choose a default.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ParameterError {
    /// The raw text could not be decoded according to its type tag.
    #[error("parameter '{key}' ({tag}) has undecodable value {raw:?}: {reason}")]
    Malformed {
        /// Parameter key.
        key: String,
        /// The declared type tag.
        tag: String,
        /// The raw text that failed to decode.
        raw: String,
        /// Why decoding failed.
        reason: String,
    },
    /// The decoded value does not have the shape its use requires.
    #[error("parameter '{key}' must be {expected}")]
    WrongShape {
        /// Parameter key.
        key: String,
        /// Human-readable description of the expected shape.
        expected: &'static str,
    },
}

/// Errors from needle or region lookup.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The key matches neither a declared needle index nor an ordinal.
    #[error("unknown needle '{key}'")]
    UnknownNeedle {
        /// The key as given by the caller.
        key: String,
    },
    /// No region is registered under this id.
    #[error("unknown region '{id}'")]
    UnknownRegion {
        /// The requested region id.
        id: String,
    },
}

/// Errors from centre-point derivation.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GeometryError {
    /// No centre policy was given and there are no needles to fall back on.
    #[error("no centre location given and no needles to derive one from")]
    NoCentre,
    /// A needle-relative policy was requested but no needles exist.
    #[error("centre policy '{policy}' requires at least one needle")]
    NoNeedles {
        /// The policy that needed needles.
        policy: &'static str,
    },
}

/// Errors from populating the stores from an input description.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum LoadError {
    /// The description text could not be parsed at all.
    #[error("malformed description: {reason}")]
    Malformed {
        /// Parser diagnostic.
        reason: String,
    },
    /// Two needles share a declared index.
    #[error("duplicate needle index '{index}'")]
    DuplicateNeedle {
        /// The repeated index.
        index: String,
    },
    /// Two regions share an id.
    #[error("duplicate region id '{id}'")]
    DuplicateRegion {
        /// The repeated id.
        id: String,
    },
    /// Two algorithms share a result name.
    #[error("duplicate algorithm result '{result}'")]
    DuplicateAlgorithm {
        /// The repeated result name.
        result: String,
    },
    /// A needle declares a class outside the known set.
    #[error("needle '{needle}' has unknown class '{class}'")]
    UnknownNeedleClass {
        /// The needle's declared index.
        needle: String,
        /// The unrecognized class name.
        class: String,
    },
    /// A needle file reference is not of the form `kind:locator`.
    #[error("needle '{needle}' has malformed file reference '{reference}'")]
    MalformedReference {
        /// The needle's declared index.
        needle: String,
        /// The reference as given.
        reference: String,
    },
    /// A region's format cannot be used as an element name.
    #[error("region '{region}' has format {format:?}, which is not a valid element name")]
    InvalidRegionFormat {
        /// The region id.
        region: String,
        /// The format as given.
        format: String,
    },
    /// Two different sources would be made available at the same local path.
    #[error("'{local}' is required from both '{first}' and '{second}'")]
    DuplicateLocalFile {
        /// The local path.
        local: String,
        /// Source registered first.
        first: String,
        /// Source that collided with it.
        second: String,
    },
    /// A region's group list is not a JSON array of strings.
    #[error("region '{region}' has invalid groups: {reason}")]
    InvalidGroups {
        /// The region id.
        region: String,
        /// Parser diagnostic.
        reason: String,
    },
}
