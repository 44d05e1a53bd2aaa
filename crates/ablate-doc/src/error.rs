//! Rendering errors.

use thiserror::Error;

/// Errors from rendering a [`Document`](crate::Document) as XML.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum RenderError {
    /// An element or attribute name is not a valid XML name.
    #[error("{name:?} is not a valid XML name")]
    InvalidName {
        /// The offending name.
        name: String,
    },
    /// Text or an attribute value holds a character XML 1.0 cannot carry.
    #[error("element '{element}' contains U+{code:04X}, which XML 1.0 does not allow")]
    ForbiddenCharacter {
        /// Name of the element holding the character.
        element: String,
        /// The character's code point.
        code: u32,
    },
}
