//! Test fixtures for Ablate development.
//!
//! [`DescriptionBuilder`] assembles [`SimulationDescription`]s without
//! hand-writing JSON, and [`sample_description`] is a representative
//! mixed-needle case used across integration tests and benches.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

use ablate_core::format_float;
use ablate_model::{
    AlgorithmDescription, NeedleDescription, ParameterDescription, RegionDescription,
    SimulationDescription, TaggedParameter,
};
use indexmap::IndexMap;

/// A bare (untagged) parameter.
pub fn bare(value: impl Into<String>) -> ParameterDescription {
    ParameterDescription::Bare(serde_json::Value::String(value.into()))
}

/// A parameter with an explicit type tag.
pub fn typed(value: impl Into<String>, tag: &str) -> ParameterDescription {
    ParameterDescription::Tagged(TaggedParameter {
        value: serde_json::Value::String(value.into()),
        type_tag: Some(tag.to_owned()),
    })
}

/// An `array(float)` parameter holding a point.
pub fn point(p: [f64; 3]) -> ParameterDescription {
    let [x, y, z] = p.map(format_float);
    typed(format!("[{x}, {y}, {z}]"), "array(float)")
}

/// Builder for one needle entry.
pub struct NeedleFixture {
    inner: NeedleDescription,
}

impl NeedleFixture {
    pub fn new(index: &str, class: &str, file: &str) -> Self {
        Self {
            inner: NeedleDescription {
                index: index.to_owned(),
                class: class.to_owned(),
                file: file.to_owned(),
                parameters: IndexMap::new(),
            },
        }
    }

    /// Set tip and entry locations.
    pub fn at(self, tip: [f64; 3], entry: [f64; 3]) -> Self {
        self.param("NEEDLE_TIP_LOCATION", point(tip))
            .param("NEEDLE_ENTRY_LOCATION", point(entry))
    }

    pub fn param(mut self, key: &str, value: ParameterDescription) -> Self {
        self.inner.parameters.insert(key.to_owned(), value);
        self
    }

    pub fn build(self) -> NeedleDescription {
        self.inner
    }
}

/// Builder for whole descriptions.
pub struct DescriptionBuilder {
    inner: SimulationDescription,
}

impl Default for DescriptionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl DescriptionBuilder {
    pub fn new() -> Self {
        Self {
            inner: SimulationDescription {
                definition: "Simulation\nEnd".to_owned(),
                ..Default::default()
            },
        }
    }

    pub fn definition(mut self, text: &str) -> Self {
        self.inner.definition = text.to_owned();
        self
    }

    pub fn param(mut self, key: &str, value: ParameterDescription) -> Self {
        self.inner.parameters.insert(key.to_owned(), value);
        self
    }

    pub fn needle(mut self, needle: NeedleFixture) -> Self {
        self.inner.needles.push(needle.build());
        self
    }

    pub fn region(
        mut self,
        id: &str,
        format: &str,
        meaning: &str,
        input: Option<&str>,
        groups: &[&str],
    ) -> Self {
        let groups = serde_json::to_string(groups).unwrap_or_else(|_| "[]".to_owned());
        self.inner.regions.push(RegionDescription {
            id: id.to_owned(),
            format: format.to_owned(),
            name: meaning.to_owned(),
            input: input.map(str::to_owned),
            groups,
        });
        self
    }

    pub fn algorithm(mut self, result: &str, arguments: &[&str], content: &str) -> Self {
        self.inner.algorithms.push(AlgorithmDescription {
            result: result.to_owned(),
            arguments: arguments.iter().map(|a| (*a).to_owned()).collect(),
            content: content.to_owned(),
        });
        self
    }

    pub fn build(self) -> SimulationDescription {
        self.inner
    }
}

/// Smallest description that compiles: no needles, an explicit centre,
/// and the required lesion field.
pub fn minimal_description() -> SimulationDescription {
    DescriptionBuilder::new()
        .param("CENTRE_LOCATION", point([0.0, 0.0, 0.0]))
        .param("SETTING_LESION_FIELD", bare("dead"))
        .build()
}

/// A mixed case: one surface-mesh needle, one library needle, one
/// point-source needle, an organ, a vessel, a tumour zone and one algorithm.
pub fn sample_description() -> SimulationDescription {
    DescriptionBuilder::new()
        .definition("Simulation\n  Max Output Level = 3\nEnd")
        .param("CENTRE_LOCATION", bare("centroid-of-tips"))
        .param("SIMULATION_SCALING", typed("0.001", "float"))
        .param("SIMULATION_DOMAIN_RADIUS", typed("40.0", "float"))
        .param("SETTING_SOLID_NEEDLES", typed("true", "boolean"))
        .param("RESOLUTION_HIGH", typed("false", "boolean"))
        .param("ELMER_NUMA_MODULES", typed("[\"numa-rfa\", \"cell-death\"]", "array(string)"))
        .param("CONSTANT_NEEDLE_EXTENSIONS", typed("[5.0, 10.0]", "array(float)"))
        .param("SETTING_LESION_FIELD", bare("dead"))
        .param("SETTING_LESION_THRESHOLD_UPPER", typed("0.8", "float"))
        .needle(
            NeedleFixture::new("n1", "solid-boundary", "surface:/meshes/probe-a.vtp")
                .at([0.0, 0.0, 0.0], [0.0, 0.0, 10.0]),
        )
        .needle(
            NeedleFixture::new("n2", "boundary", "library:cool-tip-17")
                .at([2.0, 0.0, 0.0], [2.0, 0.0, 10.0])
                .param("NEEDLE_ACTIVE_LENGTH", typed("20.0", "float")),
        )
        .needle(
            NeedleFixture::new("n3", "point-sources", "library:cryo-cluster")
                .at([4.0, 0.0, 0.0], [4.0, 0.0, 10.0]),
        )
        .region("liver", "surface", "organ", Some("/data/liver.vtp"), &["organs"])
        .region("pv", "surface", "vessels", Some("/data/pv.vtp"), &["vessels", "boundary"])
        .region("tumour", "zone", "tumour", Some("/data/tumour.vtu"), &["tumours"])
        .algorithm("dose", &["T", "t"], "dose = T * t;")
        .build()
}
