//! Lesion section.

use ablate_core::DecodeMode;
use ablate_doc::Element;
use ablate_model::Simulation;

use super::keys;
use crate::error::CompileError;

/// The lesion field is required and read verbatim; thresholds are optional.
pub(super) fn section(sim: &Simulation) -> Result<Element, CompileError> {
    let params = &sim.parameters;
    let field = params
        .get_with(keys::SETTING_LESION_FIELD, DecodeMode::Declared)?
        .ok_or_else(|| CompileError::MissingRequiredParameter {
            key: keys::SETTING_LESION_FIELD.to_owned(),
            section: "lesion".to_owned(),
        })?;
    Ok(Element::builder("lesion")
        .attr("field", field)
        .attr_opt("threshold_upper", params.get(keys::SETTING_LESION_THRESHOLD_UPPER)?)
        .attr_opt("threshold_lower", params.get(keys::SETTING_LESION_THRESHOLD_LOWER)?)
        .build())
}
