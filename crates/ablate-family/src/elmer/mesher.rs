//! Needle-library toggles and the mesher section.

use ablate_core::{format_float, ParameterStore};
use ablate_doc::{Element, ElementBuilder};
use ablate_model::{Region, RegionFormat, Simulation};

use super::keys;
use crate::config::CompileConfig;
use crate::error::CompileError;

/// Length scales used when no field parameter overrides them.
#[derive(Clone, Copy, Debug, PartialEq)]
pub(super) struct LengthScalePreset {
    pub nearfield: f64,
    pub farfield: f64,
    pub zonefield: f64,
}

impl LengthScalePreset {
    /// Selected by a truthy `RESOLUTION_HIGH`.
    pub const HIGH: Self = Self {
        nearfield: 1.0,
        farfield: 2.0,
        zonefield: 1.0,
    };

    pub const STANDARD: Self = Self {
        nearfield: 2.0,
        farfield: 5.0,
        zonefield: 2.0,
    };
}

/// Strictly `true`: only a decoded boolean counts.
fn is_true(params: &ParameterStore, key: &str) -> Result<bool, CompileError> {
    Ok(params.get(key)?.and_then(|v| v.as_bool()) == Some(true))
}

/// Rendered value of `key` if present and truthy.
fn truthy_text(params: &ParameterStore, key: &str) -> Result<Option<String>, CompileError> {
    Ok(params
        .get(key)?
        .filter(|v| v.is_truthy())
        .map(|v| v.to_string()))
}

/// Whether `SETTING_SOLID_NEEDLES` is given at all. Library placements
/// are numbered when it is.
pub(super) fn numbers_placements(sim: &Simulation) -> bool {
    sim.parameters.contains(keys::SETTING_SOLID_NEEDLES)
}

/// The `needlelibrary` section header. Placements are appended later.
pub(super) fn needle_library(sim: &Simulation) -> Result<ElementBuilder, CompileError> {
    let library = Element::builder("needlelibrary");
    Ok(match sim.parameters.get(keys::SETTING_SOLID_NEEDLES)? {
        Some(solid) => library.attr("zones", solid.as_bool() == Some(true)),
        None => library,
    })
}

/// Mesher role of a region: zone format first, then organ meaning, then
/// vessel or bronchi membership. Other regions are not meshed.
pub fn classify(region: &Region) -> Option<&'static str> {
    if region.format == RegionFormat::Zone {
        Some("zone")
    } else if region.meaning == "organ" {
        Some("organ")
    } else if region.in_group("vessels") || region.in_group("bronchi") {
        Some("vessel")
    } else {
        None
    }
}

/// Build the mesher section up to and including its length scales.
///
/// Also returns the needle-zone field, which mesh needles of zone kind
/// take as their characteristic length.
pub(super) fn section(
    sim: &Simulation,
    config: &CompileConfig,
) -> Result<(ElementBuilder, Option<String>), CompileError> {
    let params = &sim.parameters;
    let mut mesher = Element::builder("mesher").attr("type", "CGAL");
    if is_true(params, keys::SETTING_SOLID_NEEDLES)?
        || is_true(params, keys::SETTING_ZONE_BOUNDARIES)?
    {
        mesher = mesher.attr("zone_boundaries", "true");
    }

    if let Some(template) = params.get(keys::SETTING_AXISYMMETRIC_INNER)? {
        mesher = mesher.child(
            Element::builder("inner")
                .attr("type", "axisymmetric")
                .attr("template", template)
                .build(),
        );
    }
    if let Some(template) = params.get(keys::SETTING_AXISYMMETRIC_INNER_COARSE)? {
        mesher = mesher.child(
            Element::builder("inner")
                .attr("type", "axisymmetric")
                .attr("name", "coarse")
                .attr("template", template)
                .build(),
        );
    }

    let radius = match params.get(keys::SIMULATION_DOMAIN_RADIUS)? {
        Some(radius) => radius.to_string(),
        None => {
            tracing::warn!(
                radius = config.default_domain_radius,
                "{} not given, using default",
                keys::SIMULATION_DOMAIN_RADIUS
            );
            format_float(config.default_domain_radius)
        }
    };
    mesher = mesher
        .child(Element::builder("extent").attr("radius", radius).build())
        .child(Element::empty("centre"));

    for region in sim.regions.iter() {
        if let Some(role) = classify(region) {
            mesher = mesher.child(
                Element::builder(role)
                    .attr("region", region.id.as_str())
                    .build(),
            );
        }
    }

    let preset = if params.is_truthy(keys::RESOLUTION_HIGH)? {
        LengthScalePreset::HIGH
    } else {
        LengthScalePreset::STANDARD
    };
    let field = |key: &str, default: f64| -> Result<String, CompileError> {
        Ok(truthy_text(params, key)?.unwrap_or_else(|| format_float(default)))
    };
    let needle_zone = truthy_text(params, keys::RESOLUTION_FIELD_NEEDLE_ZONE)?;
    let lengthscales = Element::builder("lengthscales")
        .attr("nearfield", field(keys::RESOLUTION_FIELD_NEAR, preset.nearfield)?)
        .attr("farfield", field(keys::RESOLUTION_FIELD_FAR, preset.farfield)?)
        .attr("zonefield", field(keys::RESOLUTION_FIELD_ZONE, preset.zonefield)?)
        .attr("vessels", "far")
        .attr_opt("needlezonefield", needle_zone.as_deref())
        .build();

    tracing::debug!(regions = sim.regions.len(), "mesher section");
    Ok((mesher.child(lengthscales), needle_zone))
}
