//! Regions and constants sections.

use ablate_core::{DecodeMode, ParamValue};
use ablate_doc::{Element, ElementBuilder};
use ablate_model::{Region, Simulation};

use crate::error::CompileError;

fn region_entry(region: &Region, input_dir: &str) -> Element {
    Element::builder(region.format.as_str())
        .attr("name", region.id.as_str())
        .attr_opt("input", region.input.as_ref().map(|file| format!("{input_dir}/{file}")))
        .attr("groups", region.groups.iter().map(String::as_str).collect::<Vec<_>>().join("; "))
        .build()
}

/// One entry per region, in insertion order. Mesh needles are appended
/// to this section later.
pub(super) fn regions(sim: &Simulation, input_dir: &str) -> ElementBuilder {
    Element::builder("regions").children(sim.regions.iter().map(|r| region_entry(r, input_dir)))
}

/// One `parameter` per global parameter with its decoded value as JSON
/// and its original type tag.
pub(super) fn constants(sim: &Simulation) -> Result<ElementBuilder, CompileError> {
    let mut constants = Element::builder("constants");
    for param in sim.parameters.iter() {
        let value = param
            .value
            .decode(DecodeMode::Structured)
            .map_err(|e| e.for_key(param.key))?;
        constants = constants.child(
            Element::builder("parameter")
                .attr("name", param.key)
                .attr("value", json_text(value.as_ref()))
                .attr_opt("type", param.value.tag())
                .build(),
        );
    }
    Ok(constants)
}

/// JSON text for a decoded value; absent values are `null`.
fn json_text(value: Option<&ParamValue>) -> String {
    // Values hold only strings, numbers and string-keyed maps, which
    // always serialize.
    serde_json::to_string(&value).unwrap_or_else(|_| "null".to_owned())
}
