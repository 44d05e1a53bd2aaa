//! Needle descriptors and the dual-addressed [`NeedleRegistry`].
//!
//! Needles are addressed two ways: by declared index (how the rest of the
//! configuration refers to them) and by ordinal position (how geometry
//! refers to "the first needle"). [`NeedleRegistry::resolve`] tries the
//! declared identity first and only then consults the separate
//! ordinal-to-identity table.

use std::fmt;

use ablate_core::{LoadError, LookupError, NeedleIndex, Ordinal, ParameterStore};
use indexmap::IndexMap;

// ── NeedleClass ────────────────────────────────────────────────────

/// How a needle influences meshing and solving.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NeedleClass {
    /// Meshed as a boundary surface.
    Boundary,
    /// Meshed as a boundary enclosing a solid zone.
    SolidBoundary,
    /// Modelled as a distribution of point sources in the solver.
    PointSources,
    /// A bare library reference with no meshing or solver role.
    LibraryReference,
}

impl NeedleClass {
    /// Parse the class name used in input descriptions.
    pub fn parse(name: &str) -> Option<Self> {
        match name {
            "boundary" => Some(Self::Boundary),
            "solid-boundary" => Some(Self::SolidBoundary),
            "point-sources" => Some(Self::PointSources),
            "library-reference" => Some(Self::LibraryReference),
            _ => None,
        }
    }

    /// The input-description spelling.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Boundary => "boundary",
            Self::SolidBoundary => "solid-boundary",
            Self::PointSources => "point-sources",
            Self::LibraryReference => "library-reference",
        }
    }

    /// `boundary` or `solid-boundary`.
    pub fn is_boundary_like(&self) -> bool {
        matches!(self, Self::Boundary | Self::SolidBoundary)
    }
}

// ── FileReference ──────────────────────────────────────────────────

/// Where a needle's geometry comes from.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum SourceKind {
    /// `surface:` — an external surface mesh file.
    Surface,
    /// `zone:` — an external volume mesh file.
    Zone,
    /// `library:` — a needle-library id.
    Library,
    /// Any other prefix names a template; the prefix is kept verbatim.
    Named(String),
}

impl SourceKind {
    /// Parse a reference prefix.
    pub fn parse(prefix: &str) -> Self {
        match prefix {
            "surface" => Self::Surface,
            "zone" => Self::Zone,
            "library" => Self::Library,
            other => Self::Named(other.to_owned()),
        }
    }

    /// The prefix as written.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Surface => "surface",
            Self::Zone => "zone",
            Self::Library => "library",
            Self::Named(prefix) => prefix,
        }
    }

    /// Whether the reference points at a mesh file to be transported.
    pub fn is_mesh(&self) -> bool {
        matches!(self, Self::Surface | Self::Zone)
    }
}

/// A `kind:locator` reference.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct FileReference {
    /// Source kind from the prefix.
    pub kind: SourceKind,
    /// Path, library id, or template name after the first `:`.
    pub locator: String,
}

impl FileReference {
    /// Split `kind:locator` at the first colon.
    pub fn parse(reference: &str) -> Option<Self> {
        let (kind, locator) = reference.split_once(':')?;
        Some(Self {
            kind: SourceKind::parse(kind),
            locator: locator.to_owned(),
        })
    }
}

impl fmt::Display for FileReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind.as_str(), self.locator)
    }
}

// ── Needle ─────────────────────────────────────────────────────────

/// A modelled probe or applicator.
#[derive(Clone, Debug, PartialEq)]
pub struct Needle {
    /// Declared identity.
    pub index: NeedleIndex,
    /// Position in input order.
    pub ordinal: Ordinal,
    /// Meshing and solving role.
    pub class: NeedleClass,
    /// Geometry source. Mesh references point at the renamed local file.
    pub reference: FileReference,
    /// Needle-specific parameters.
    pub parameters: ParameterStore,
}

// ── NeedleKey ──────────────────────────────────────────────────────

/// A needle address: declared index or ordinal position.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum NeedleKey {
    /// Declared index. Falls back to an ordinal if the text is a number
    /// that matches no declared index.
    Index(String),
    /// Ordinal position, resolved through the ordinal table only.
    Ordinal(usize),
}

impl fmt::Display for NeedleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Index(index) => f.write_str(index),
            Self::Ordinal(n) => write!(f, "#{n}"),
        }
    }
}

impl From<&str> for NeedleKey {
    fn from(v: &str) -> Self {
        Self::Index(v.to_owned())
    }
}

impl From<&NeedleIndex> for NeedleKey {
    fn from(v: &NeedleIndex) -> Self {
        Self::Index(v.0.clone())
    }
}

impl From<usize> for NeedleKey {
    fn from(v: usize) -> Self {
        Self::Ordinal(v)
    }
}

impl From<Ordinal> for NeedleKey {
    fn from(v: Ordinal) -> Self {
        Self::Ordinal(v.0)
    }
}

// ── NeedleRegistry ─────────────────────────────────────────────────

/// Ordered collection of needles with dual addressing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct NeedleRegistry {
    needles: IndexMap<NeedleIndex, Needle>,
    /// `order[n]` is the declared index of the needle at ordinal `n`.
    order: Vec<NeedleIndex>,
}

impl NeedleRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a needle, assigning the next ordinal.
    ///
    /// Fails if the declared index is already taken.
    pub fn push(
        &mut self,
        index: NeedleIndex,
        class: NeedleClass,
        reference: FileReference,
        parameters: ParameterStore,
    ) -> Result<Ordinal, LoadError> {
        if self.needles.contains_key(&index) {
            return Err(LoadError::DuplicateNeedle { index: index.0 });
        }
        let ordinal = Ordinal(self.order.len());
        self.order.push(index.clone());
        self.needles.insert(
            index.clone(),
            Needle {
                index,
                ordinal,
                class,
                reference,
                parameters,
            },
        );
        Ok(ordinal)
    }

    /// Resolve a declared index or ordinal position.
    pub fn resolve(&self, key: impl Into<NeedleKey>) -> Result<&Needle, LookupError> {
        let key = key.into();
        let found = match &key {
            NeedleKey::Index(index) => self.needles.get(index.as_str()).or_else(|| {
                index
                    .parse::<usize>()
                    .ok()
                    .and_then(|n| self.by_ordinal(Ordinal(n)))
            }),
            NeedleKey::Ordinal(n) => self.by_ordinal(Ordinal(*n)),
        };
        found.ok_or_else(|| LookupError::UnknownNeedle {
            key: key.to_string(),
        })
    }

    /// Translate an ordinal to its declared index.
    pub fn index_of(&self, ordinal: Ordinal) -> Option<&NeedleIndex> {
        self.order.get(ordinal.0)
    }

    /// The needle at `ordinal`.
    pub fn by_ordinal(&self, ordinal: Ordinal) -> Option<&Needle> {
        self.index_of(ordinal)
            .and_then(|index| self.needles.get(index))
    }

    /// Number of needles.
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether there are no needles.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate needles in ordinal order.
    pub fn iter(&self) -> impl Iterator<Item = &Needle> {
        self.needles.values()
    }
}
