//! Region descriptors and the [`RegionRegistry`].

use ablate_core::{LoadError, LookupError, RegionId};
use indexmap::{IndexMap, IndexSet};

/// Geometric representation of a region.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RegionFormat {
    /// A closed surface mesh.
    Surface,
    /// A volume mesh zone.
    Zone,
    /// Any other format name, kept verbatim.
    Other(String),
}

impl RegionFormat {
    /// Parse a format name.
    pub fn parse(name: &str) -> Self {
        match name {
            "surface" => Self::Surface,
            "zone" => Self::Zone,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The format name as written. Also the element name in the regions section.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Surface => "surface",
            Self::Zone => "zone",
            Self::Other(name) => name,
        }
    }

    /// Surface and zone regions carry transportable mesh files.
    pub fn is_mesh(&self) -> bool {
        matches!(self, Self::Surface | Self::Zone)
    }
}

/// An anatomical or geometric region.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Region {
    /// Unique id.
    pub id: RegionId,
    /// Representation.
    pub format: RegionFormat,
    /// Semantic group name, e.g. `organ`.
    pub meaning: String,
    /// Local file name of the region's input mesh, if any.
    pub input: Option<String>,
    /// Group tags, in declaration order.
    pub groups: IndexSet<String>,
}

impl Region {
    /// Whether the region is tagged with `group`.
    pub fn in_group(&self, group: &str) -> bool {
        self.groups.contains(group)
    }
}

/// Regions keyed by id, with a secondary index by meaning.
///
/// Both orderings follow insertion order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RegionRegistry {
    regions: IndexMap<RegionId, Region>,
    by_meaning: IndexMap<String, Vec<RegionId>>,
}

impl RegionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a region. Fails if the id is taken.
    pub fn insert(&mut self, region: Region) -> Result<(), LoadError> {
        if self.regions.contains_key(&region.id) {
            return Err(LoadError::DuplicateRegion { id: region.id.0 });
        }
        self.by_meaning
            .entry(region.meaning.clone())
            .or_default()
            .push(region.id.clone());
        self.regions.insert(region.id.clone(), region);
        Ok(())
    }

    /// All regions keyed by id, in insertion order.
    pub fn all(&self) -> &IndexMap<RegionId, Region> {
        &self.regions
    }

    /// Iterate regions in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Region> {
        self.regions.values()
    }

    /// Look up a region by id.
    pub fn get(&self, id: &str) -> Result<&Region, LookupError> {
        self.regions
            .get(id)
            .ok_or_else(|| LookupError::UnknownRegion { id: id.to_owned() })
    }

    /// Regions sharing a meaning, in insertion order. Empty for unknown meanings.
    pub fn by_meaning(&self, meaning: &str) -> Vec<&Region> {
        self.by_meaning
            .get(meaning)
            .map(|ids| ids.iter().filter_map(|id| self.regions.get(id)).collect())
            .unwrap_or_default()
    }

    /// Distinct meanings, in first-seen order.
    pub fn meanings(&self) -> impl Iterator<Item = &str> {
        self.by_meaning.keys().map(String::as_str)
    }

    /// Number of regions.
    pub fn len(&self) -> usize {
        self.regions.len()
    }

    /// Whether there are no regions.
    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}
