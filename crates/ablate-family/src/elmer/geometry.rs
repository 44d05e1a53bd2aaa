//! Geometry section: centre, needle axis, scaling.

use ablate_core::{
    derive_axis, derive_centre, format_float, CentrePolicy, ParamValue, ParameterError, Vec3,
};
use ablate_doc::{Element, ElementBuilder};
use ablate_model::Simulation;

use super::{keys, needle_point};
use crate::error::CompileError;

/// Read the centre policy from `CENTRE_LOCATION`.
///
/// A point is explicit; `first-needle` and `centroid-of-tips` name a
/// needle-relative policy; absence leaves the choice to the deriver.
pub(super) fn centre_policy(sim: &Simulation) -> Result<Option<CentrePolicy>, CompileError> {
    let expected = "a point or a centre policy name";
    let policy = match sim.parameters.get(keys::CENTRE_LOCATION)? {
        None => None,
        Some(ParamValue::Text(name)) => Some(CentrePolicy::from_name(&name).ok_or(
            ParameterError::WrongShape {
                key: keys::CENTRE_LOCATION.to_owned(),
                expected,
            },
        )?),
        Some(value) => Some(CentrePolicy::Explicit(value.as_vec3().ok_or(
            ParameterError::WrongShape {
                key: keys::CENTRE_LOCATION.to_owned(),
                expected,
            },
        )?)),
    };
    Ok(policy)
}

/// Tip locations the policy needs, in ordinal order.
fn tips_for(sim: &Simulation, policy: Option<CentrePolicy>) -> Result<Vec<Vec3>, CompileError> {
    let count = match policy {
        Some(CentrePolicy::Explicit(_)) => 0,
        Some(CentrePolicy::CentroidOfTips) => sim.needles.len(),
        Some(CentrePolicy::FirstNeedle) | None => sim.needles.len().min(1),
    };
    (0..count)
        .map(|ordinal| needle_point(sim, ordinal, keys::NEEDLE_TIP_LOCATION))
        .collect()
}

fn point(name: &str, p: Vec3) -> Element {
    Element::builder(name)
        .attr("x", format_float(p.x))
        .attr("y", format_float(p.y))
        .attr("z", format_float(p.z))
        .build()
}

/// Build the geometry section. Also returns the derived centre, which
/// needle placements are offset against.
pub(super) fn section(sim: &Simulation) -> Result<(ElementBuilder, Vec3), CompileError> {
    let policy = centre_policy(sim)?;
    let centre = derive_centre(policy, &tips_for(sim, policy)?)?;

    let mut geometry = Element::builder("geometry").child(point("centre", centre));
    if !sim.needles.is_empty() {
        let tip = needle_point(sim, 0usize, keys::NEEDLE_TIP_LOCATION)?;
        let entry = needle_point(sim, 0usize, keys::NEEDLE_ENTRY_LOCATION)?;
        geometry = geometry.child(point("needleaxis", derive_axis(tip, entry)));
    }
    if let Some(ratio) = sim.parameters.get(keys::SIMULATION_SCALING)? {
        geometry = geometry.child(
            Element::builder("simulationscaling")
                .attr("ratio", ratio)
                .build(),
        );
    }
    tracing::debug!(%centre, "geometry section");
    Ok((geometry, centre))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ablate_core::{FilesRequired, GeometryError};
    use ablate_model::SimulationDescription;
    use ablate_test_utils::{bare, point as point_param, DescriptionBuilder, NeedleFixture};

    fn load(description: SimulationDescription) -> Simulation {
        Simulation::load(&description, "input", &mut FilesRequired::new()).unwrap()
    }

    fn two_needles() -> DescriptionBuilder {
        DescriptionBuilder::new()
            .needle(
                NeedleFixture::new("a", "boundary", "library:x")
                    .at([1.0, 2.0, 3.0], [1.0, 2.0, 13.0]),
            )
            .needle(
                NeedleFixture::new("b", "boundary", "library:x")
                    .at([3.0, 4.0, 5.0], [3.0, 4.0, 15.0]),
            )
    }

    #[test]
    fn default_centre_is_first_tip() {
        let (geometry, centre) = section(&load(two_needles().build())).unwrap();
        assert_eq!(centre, Vec3::new(1.0, 2.0, 3.0));
        let geometry = geometry.build();
        let axis = geometry.child("needleaxis").unwrap();
        assert_eq!(axis.attr("z"), Some("10.0"));
        assert_eq!(axis.attr("x"), Some("0.0"));
    }

    #[test]
    fn centroid_policy() {
        let sim = load(
            two_needles()
                .param(keys::CENTRE_LOCATION, bare("centroid-of-tips"))
                .build(),
        );
        let (_, centre) = section(&sim).unwrap();
        assert_eq!(centre, Vec3::new(2.0, 3.0, 4.0));
    }

    #[test]
    fn explicit_centre_needs_no_needles() {
        let sim = load(
            DescriptionBuilder::new()
                .param(keys::CENTRE_LOCATION, point_param([5.0, 6.0, 7.0]))
                .param(keys::SIMULATION_SCALING, bare("0.001"))
                .build(),
        );
        let (geometry, centre) = section(&sim).unwrap();
        let geometry = geometry.build();
        assert_eq!(centre, Vec3::new(5.0, 6.0, 7.0));
        assert!(geometry.child("needleaxis").is_none());
        assert_eq!(
            geometry.child("simulationscaling").and_then(|s| s.attr("ratio")),
            Some("0.001")
        );
    }

    #[test]
    fn no_centre_and_no_needles() {
        let sim = load(DescriptionBuilder::new().build());
        assert_eq!(section(&sim).unwrap_err(), CompileError::Geometry(GeometryError::NoCentre));
        let sim = load(
            DescriptionBuilder::new()
                .param(keys::CENTRE_LOCATION, bare("first-needle"))
                .build(),
        );
        assert!(matches!(
            section(&sim).unwrap_err(),
            CompileError::Geometry(GeometryError::NoNeedles { .. })
        ));
    }

    #[test]
    fn unknown_policy_name() {
        let sim = load(two_needles().param(keys::CENTRE_LOCATION, bare("middle")).build());
        assert!(matches!(
            section(&sim).unwrap_err(),
            CompileError::Parameter(ParameterError::WrongShape { .. })
        ));
    }

    #[test]
    fn missing_tip_is_required() {
        let sim = load(
            DescriptionBuilder::new()
                .needle(NeedleFixture::new("a", "boundary", "library:x"))
                .build(),
        );
        assert_eq!(
            section(&sim).unwrap_err(),
            CompileError::MissingRequiredParameter {
                key: keys::NEEDLE_TIP_LOCATION.into(),
                section: "needle a".into(),
            }
        );
    }
}
