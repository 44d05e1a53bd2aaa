//! Strongly-typed identifiers for needles and regions.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

/// Declared identity of a needle, as given in the input description.
///
/// Unique within a simulation. Used for file naming, region names, and
/// every cross-reference in the output document.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NeedleIndex(pub String);

impl NeedleIndex {
    /// Borrow the index as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NeedleIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NeedleIndex {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NeedleIndex {
    fn from(v: &str) -> Self {
        Self(v.to_owned())
    }
}

impl From<String> for NeedleIndex {
    fn from(v: String) -> Self {
        Self(v)
    }
}

/// Position of a needle in input order, starting at 0.
///
/// Always valid for every loaded needle. Geometry code uses it to refer
/// to "the first needle" independently of declared identities.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ordinal(pub usize);

impl fmt::Display for Ordinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

impl From<usize> for Ordinal {
    fn from(v: usize) -> Self {
        Self(v)
    }
}

/// Identity of an anatomical or geometric region.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RegionId(pub String);

impl RegionId {
    /// Borrow the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RegionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for RegionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for RegionId {
    fn from(v: &str) -> Self {
        Self(v.to_owned())
    }
}

impl From<String> for RegionId {
    fn from(v: String) -> Self {
        Self(v)
    }
}

fn is_name_start(c: char) -> bool {
    matches!(c,
        'A'..='Z' | '_' | 'a'..='z'
        | '\u{C0}'..='\u{D6}' | '\u{D8}'..='\u{F6}' | '\u{F8}'..='\u{2FF}'
        | '\u{370}'..='\u{37D}' | '\u{37F}'..='\u{1FFF}' | '\u{200C}'..='\u{200D}'
        | '\u{2070}'..='\u{218F}' | '\u{2C00}'..='\u{2FEF}' | '\u{3001}'..='\u{D7FF}'
        | '\u{F900}'..='\u{FDCF}' | '\u{FDF0}'..='\u{FFFD}' | '\u{10000}'..='\u{EFFFF}')
}

fn is_name_char(c: char) -> bool {
    is_name_start(c)
        || matches!(c,
            '-' | '.' | '0'..='9' | '\u{B7}' | '\u{300}'..='\u{36F}' | '\u{203F}'..='\u{2040}')
}

/// Whether `name` can be used verbatim as an XML element or attribute name.
///
/// Follows the XML 1.0 `Name` production without the colon, so names never
/// pick up a namespace prefix.
pub fn is_element_name(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(is_name_start) && chars.all(is_name_char)
}
