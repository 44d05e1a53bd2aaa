//! Centre-point and needle-axis derivation.
//!
//! The simulation centre anchors every needle-library placement: each
//! placement is emitted as an offset from the centre plus an axis running
//! from the needle tip towards its entry point.

use std::fmt;
use std::ops::{Add, Div, Sub};

use serde::Serialize;

use crate::error::GeometryError;
use crate::param::format_float;

/// A point or direction in simulation space.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
pub struct Vec3 {
    /// X component.
    pub x: f64,
    /// Y component.
    pub y: f64,
    /// Z component.
    pub z: f64,
}

impl Vec3 {
    /// The origin.
    pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

    /// Build a vector from components.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }

    /// Components as `[x, y, z]`.
    pub fn components(&self) -> [f64; 3] {
        [self.x, self.y, self.z]
    }
}

/// Space-separated components, e.g. `1.0 -2.5 0.0`.
impl fmt::Display for Vec3 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {}",
            format_float(self.x),
            format_float(self.y),
            format_float(self.z)
        )
    }
}

impl From<[f64; 3]> for Vec3 {
    fn from([x, y, z]: [f64; 3]) -> Self {
        Self::new(x, y, z)
    }
}

impl Add for Vec3 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Vec3 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl Div<f64> for Vec3 {
    type Output = Self;

    fn div(self, rhs: f64) -> Self {
        Self::new(self.x / rhs, self.y / rhs, self.z / rhs)
    }
}

/// How the simulation centre is chosen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CentrePolicy {
    /// A fixed point, used verbatim. Needs no needles.
    Explicit(Vec3),
    /// The tip of the needle at ordinal 0.
    FirstNeedle,
    /// Per-axis arithmetic mean of all needle tips.
    CentroidOfTips,
}

impl CentrePolicy {
    /// Parameter spelling of [`CentrePolicy::FirstNeedle`].
    pub const FIRST_NEEDLE: &'static str = "first-needle";
    /// Parameter spelling of [`CentrePolicy::CentroidOfTips`].
    pub const CENTROID_OF_TIPS: &'static str = "centroid-of-tips";

    /// Look up a named (non-explicit) policy.
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            Self::FIRST_NEEDLE => Some(Self::FirstNeedle),
            Self::CENTROID_OF_TIPS => Some(Self::CentroidOfTips),
            _ => None,
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Explicit(_) => "explicit",
            Self::FirstNeedle => Self::FIRST_NEEDLE,
            Self::CentroidOfTips => Self::CENTROID_OF_TIPS,
        }
    }
}

/// Derive the simulation centre.
///
/// `tips` are needle tip locations in ordinal order. With no policy the
/// first needle is used; with no policy and no needles there is nothing to
/// derive from and the caller must supply an explicit centre.
pub fn derive_centre(policy: Option<CentrePolicy>, tips: &[Vec3]) -> Result<Vec3, GeometryError> {
    match policy {
        Some(CentrePolicy::Explicit(centre)) => Ok(centre),
        None => tips.first().copied().ok_or(GeometryError::NoCentre),
        Some(p @ CentrePolicy::FirstNeedle) => tips
            .first()
            .copied()
            .ok_or(GeometryError::NoNeedles { policy: p.name() }),
        Some(p @ CentrePolicy::CentroidOfTips) => {
            if tips.is_empty() {
                return Err(GeometryError::NoNeedles { policy: p.name() });
            }
            let sum = tips.iter().fold(Vec3::ZERO, |acc, &tip| acc + tip);
            Ok(sum / tips.len() as f64)
        }
    }
}

/// Needle axis: the vector from `tip` to `entry`.
pub fn derive_axis(tip: Vec3, entry: Vec3) -> Vec3 {
    entry - tip
}

/// Placement offset: the vector from `centre` to `tip`.
pub fn derive_offset(tip: Vec3, centre: Vec3) -> Vec3 {
    tip - centre
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_vec3() -> impl Strategy<Value = Vec3> {
        (-1.0e3f64..1.0e3, -1.0e3f64..1.0e3, -1.0e3f64..1.0e3)
            .prop_map(|(x, y, z)| Vec3::new(x, y, z))
    }

    #[test]
    fn explicit_needs_no_needles() {
        let c = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(derive_centre(Some(CentrePolicy::Explicit(c)), &[]), Ok(c));
    }

    #[test]
    fn default_is_first_needle() {
        let tips = [Vec3::new(1.0, 0.0, 0.0), Vec3::new(5.0, 5.0, 5.0)];
        assert_eq!(derive_centre(None, &tips), Ok(tips[0]));
    }

    #[test]
    fn no_policy_no_needles_is_an_error() {
        assert_eq!(derive_centre(None, &[]), Err(GeometryError::NoCentre));
    }

    #[test]
    fn needle_policies_without_needles_fail() {
        assert_eq!(
            derive_centre(Some(CentrePolicy::CentroidOfTips), &[]),
            Err(GeometryError::NoNeedles {
                policy: "centroid-of-tips"
            })
        );
        assert_eq!(
            derive_centre(Some(CentrePolicy::FirstNeedle), &[]),
            Err(GeometryError::NoNeedles {
                policy: "first-needle"
            })
        );
    }

    #[test]
    fn centroid_of_two() {
        let tips = [Vec3::new(0.0, 0.0, 0.0), Vec3::new(2.0, 4.0, -6.0)];
        assert_eq!(
            derive_centre(Some(CentrePolicy::CentroidOfTips), &tips),
            Ok(Vec3::new(1.0, 2.0, -3.0))
        );
    }

    #[test]
    fn axis_and_offset() {
        let tip = Vec3::new(1.0, 1.0, 1.0);
        let entry = Vec3::new(1.0, 1.0, 11.0);
        assert_eq!(derive_axis(tip, entry), Vec3::new(0.0, 0.0, 10.0));
        assert_eq!(derive_offset(tip, Vec3::ZERO), tip);
    }

    #[test]
    fn display_is_space_separated() {
        assert_eq!(Vec3::new(1.0, -2.5, 0.0).to_string(), "1.0 -2.5 0.0");
    }

    #[test]
    fn policy_names() {
        assert_eq!(
            CentrePolicy::from_name("centroid-of-tips"),
            Some(CentrePolicy::CentroidOfTips)
        );
        assert_eq!(CentrePolicy::from_name("middle"), None);
    }

    proptest! {
        #[test]
        fn centroid_is_per_axis_mean(tips in prop::collection::vec(arb_vec3(), 1..16)) {
            let centre = derive_centre(Some(CentrePolicy::CentroidOfTips), &tips).unwrap();
            let n = tips.len() as f64;
            let mean_x = tips.iter().map(|t| t.x).sum::<f64>() / n;
            let mean_y = tips.iter().map(|t| t.y).sum::<f64>() / n;
            let mean_z = tips.iter().map(|t| t.z).sum::<f64>() / n;
            prop_assert!((centre.x - mean_x).abs() < 1e-9);
            prop_assert!((centre.y - mean_y).abs() < 1e-9);
            prop_assert!((centre.z - mean_z).abs() < 1e-9);
        }

        #[test]
        fn centroid_of_one_is_that_tip(tip in arb_vec3()) {
            prop_assert_eq!(
                derive_centre(Some(CentrePolicy::CentroidOfTips), &[tip]).unwrap(),
                tip
            );
        }

        #[test]
        fn offset_plus_axis_reaches_entry(
            tip in arb_vec3(),
            entry in arb_vec3(),
            centre in arb_vec3(),
        ) {
            let reached = centre + derive_offset(tip, centre) + derive_axis(tip, entry);
            prop_assert!((reached.x - entry.x).abs() < 1e-9);
            prop_assert!((reached.y - entry.y).abs() < 1e-9);
            prop_assert!((reached.z - entry.z).abs() < 1e-9);
        }
    }
}
