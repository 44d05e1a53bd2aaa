//! Benchmark profiles for the Ablate configuration compiler.
//!
//! - [`reference_profile`]: 16 needles, 8 regions, 4 algorithms
//! - [`stress_profile`]: 256 needles, 64 regions, 32 algorithms
//! - [`profile`]: arbitrary sizes with the same mix

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use ablate_core::format_float;
use ablate_model::{
    AlgorithmDescription, NeedleDescription, ParameterDescription, RegionDescription,
    SimulationDescription, TaggedParameter,
};
use indexmap::IndexMap;

fn typed(value: String, tag: &str) -> ParameterDescription {
    ParameterDescription::Tagged(TaggedParameter {
        value: serde_json::Value::String(value),
        type_tag: Some(tag.to_owned()),
    })
}

fn point(p: [f64; 3]) -> ParameterDescription {
    let [x, y, z] = p.map(format_float);
    typed(format!("[{x}, {y}, {z}]"), "array(float)")
}

/// Build a description with `needles` needles, `regions` regions and
/// `algorithms` algorithms.
///
/// Needles cycle through surface-mesh, library and point-source
/// placements on a ring of radius 10 around the origin.
pub fn profile(needles: usize, regions: usize, algorithms: usize) -> SimulationDescription {
    let mut parameters = IndexMap::new();
    parameters.insert("CENTRE_LOCATION".to_owned(), typed("centroid-of-tips".into(), "string"));
    parameters.insert("SETTING_SOLID_NEEDLES".to_owned(), typed("true".into(), "boolean"));
    parameters.insert("RESOLUTION_HIGH".to_owned(), typed("true".into(), "boolean"));
    parameters.insert(
        "CONSTANT_NEEDLE_EXTENSIONS".to_owned(),
        typed("[5.0, 10.0, 15.0]".into(), "array(float)"),
    );
    parameters.insert("SETTING_LESION_FIELD".to_owned(), typed("dead".into(), "string"));

    let needles = (0..needles)
        .map(|n| {
            let angle = n as f64 * std::f64::consts::TAU / 16.0;
            let tip = [10.0 * angle.cos(), 10.0 * angle.sin(), 0.0];
            let entry = [tip[0], tip[1], 20.0];
            let (class, file) = match n % 3 {
                0 => ("solid-boundary", format!("surface:/meshes/probe-{n}.vtp")),
                1 => ("boundary", format!("library:probe-{n}")),
                _ => ("point-sources", format!("library:cluster-{n}")),
            };
            let mut params = IndexMap::new();
            params.insert("NEEDLE_TIP_LOCATION".to_owned(), point(tip));
            params.insert("NEEDLE_ENTRY_LOCATION".to_owned(), point(entry));
            NeedleDescription {
                index: format!("needle-{n}"),
                class: class.to_owned(),
                file,
                parameters: params,
            }
        })
        .collect();

    let regions = (0..regions)
        .map(|r| {
            let (format, meaning, groups) = match r % 3 {
                0 => ("surface", "organ", r#"["organs"]"#),
                1 => ("surface", "vessels", r#"["vessels"]"#),
                _ => ("zone", "tumour", r#"["tumours"]"#),
            };
            RegionDescription {
                id: format!("region-{r}"),
                format: format.to_owned(),
                name: meaning.to_owned(),
                input: Some(format!("/data/region-{r}.vtp")),
                groups: groups.to_owned(),
            }
        })
        .collect();

    let algorithms = (0..algorithms)
        .map(|a| AlgorithmDescription {
            result: format!("result_{a}"),
            arguments: vec!["T".to_owned(), "t".to_owned(), format!("k{a}")],
            content: format!("result_{a} = k{a} * T .* t;"),
        })
        .collect();

    SimulationDescription {
        definition: "Simulation\n  Max Output Level = 3\nEnd".to_owned(),
        needles,
        regions,
        parameters,
        algorithms,
    }
}

/// Typical clinical case size.
pub fn reference_profile() -> SimulationDescription {
    profile(16, 8, 4)
}

/// Far beyond clinical sizes.
pub fn stress_profile() -> SimulationDescription {
    profile(256, 64, 32)
}
