//! Structural fingerprints for determinism checks.
//!
//! Uses FNV-1a over a canonical walk of the tree. Not cryptographically
//! secure; two documents with equal fingerprints are treated as identical
//! when comparing repeated compilations.

use crate::element::Element;

/// FNV-1a offset basis for 64-bit.
const FNV_OFFSET: u64 = 0xcbf29ce484222325;
/// FNV-1a prime for 64-bit.
const FNV_PRIME: u64 = 0x00000100000001B3;

#[inline]
fn fnv1a_byte(hash: u64, byte: u8) -> u64 {
    (hash ^ byte as u64).wrapping_mul(FNV_PRIME)
}

#[inline]
fn fnv1a_u64(mut hash: u64, v: u64) -> u64 {
    for &b in &v.to_le_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

/// Length-prefixed so `("ab", "c")` and `("a", "bc")` differ.
#[inline]
fn fnv1a_str(mut hash: u64, s: &str) -> u64 {
    hash = fnv1a_u64(hash, s.len() as u64);
    for &b in s.as_bytes() {
        hash = fnv1a_byte(hash, b);
    }
    hash
}

fn fold_element(mut hash: u64, element: &Element) -> u64 {
    hash = fnv1a_str(hash, element.name());
    hash = fnv1a_u64(hash, element.attributes().len() as u64);
    for (name, value) in element.attributes() {
        hash = fnv1a_str(hash, name);
        hash = fnv1a_str(hash, value);
    }
    match element.text() {
        Some(text) => {
            hash = fnv1a_byte(hash, 1);
            hash = fnv1a_str(hash, text);
        }
        None => hash = fnv1a_byte(hash, 0),
    }
    hash = fnv1a_u64(hash, element.children().len() as u64);
    for child in element.children() {
        hash = fold_element(hash, child);
    }
    hash
}

/// Fingerprint of the tree rooted at `root`.
///
/// Names, attribute order, text presence and child order all contribute.
pub fn tree_hash(root: &Element) -> u64 {
    fold_element(FNV_OFFSET, root)
}
