//! Solver section: definition variant, modules, algorithms.

use ablate_core::ParamValue;
use ablate_doc::{Element, ElementBuilder};
use ablate_model::{Algorithm, Simulation};

use super::keys;
use crate::config::CompileConfig;
use crate::error::CompileError;
use crate::sanitizer::Sanitizer;

fn module_list(modules: &ParamValue) -> String {
    match modules.as_list() {
        Some(items) => items
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; "),
        None => modules.to_string(),
    }
}

fn variant(sim: &Simulation, config: &CompileConfig) -> Result<Element, CompileError> {
    let modules = sim
        .parameters
        .get(keys::ELMER_NUMA_MODULES)?
        .filter(|m| m.is_truthy());
    Ok(Element::builder("variant")
        .attr_opt("modules", modules.as_ref().map(module_list))
        .text(format!("{}\n{}\n", sim.definition, config.sources_marker))
        .build())
}

fn algorithm(alg: &Algorithm) -> Element {
    Element::builder("algorithm")
        .attr("result", &alg.result)
        .attr("arguments", alg.arguments.join(","))
        .child(
            Element::builder("arguments")
                .children(
                    alg.sorted_arguments()
                        .into_iter()
                        .map(|name| Element::builder("argument").attr("name", name).build()),
                )
                .build(),
        )
        .child(Element::builder("content").text(alg.content.as_str()).build())
        .build()
}

/// The solver section up to its algorithms. Point sources are appended
/// later.
///
/// Every algorithm passes through `sanitizer` first; one rejection fails
/// the whole section.
pub(super) fn section(
    sim: &Simulation,
    config: &CompileConfig,
    sanitizer: &Sanitizer,
) -> Result<ElementBuilder, CompileError> {
    let mut algorithms = Element::builder("algorithms");
    for alg in sim.algorithms.values() {
        sanitizer.check(&alg.result, &alg.content)?;
        algorithms = algorithms.child(algorithm(alg));
    }
    tracing::debug!(algorithms = sim.algorithms.len(), "solver section");
    Ok(Element::builder("elmer")
        .child(variant(sim, config)?)
        .child(algorithms.build()))
}
