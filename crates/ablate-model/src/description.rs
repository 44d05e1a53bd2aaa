//! Serde schema for input simulation descriptions.
//!
//! A description is the structured document an external loader hands to
//! the compiler. It can be written as JSON or TOML:
//!
//! ```
//! use ablate_model::SimulationDescription;
//!
//! let description = SimulationDescription::from_json(r#"{
//!     "definition": "Simulation\n  Max Output Level = 3\nEnd",
//!     "needles": [
//!         { "index": "n1", "class": "solid-boundary", "file": "library:probe-17",
//!           "parameters": {
//!               "NEEDLE_TIP_LOCATION": { "value": "[0, 0, 0]", "type": "array(float)" },
//!               "NEEDLE_ENTRY_LOCATION": { "value": "[0, 0, 10]", "type": "array(float)" } } }
//!     ],
//!     "regions": [
//!         { "id": "liver", "format": "surface", "name": "organ",
//!           "input": "/data/liver.vtp", "groups": "[\"organs\"]" }
//!     ],
//!     "parameters": { "SETTING_LESION_FIELD": "dead" }
//! }"#).unwrap();
//!
//! assert_eq!(description.needles.len(), 1);
//! assert_eq!(description.regions[0].name, "organ");
//! ```

use ablate_core::{LoadError, RawValue};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// The complete input to one compilation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SimulationDescription {
    /// Free-text solver definition body.
    pub definition: String,
    /// Needles, in ordinal order.
    #[serde(default)]
    pub needles: Vec<NeedleDescription>,
    /// Regions, in document order.
    #[serde(default)]
    pub regions: Vec<RegionDescription>,
    /// Global parameters, in document order.
    #[serde(default)]
    pub parameters: IndexMap<String, ParameterDescription>,
    /// Post-processing algorithms.
    #[serde(default)]
    pub algorithms: Vec<AlgorithmDescription>,
}

impl SimulationDescription {
    /// Parse a JSON description.
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        serde_json::from_str(text).map_err(|e| LoadError::Malformed {
            reason: e.to_string(),
        })
    }

    /// Parse a TOML description.
    pub fn from_toml(text: &str) -> Result<Self, LoadError> {
        toml::from_str(text).map_err(|e| LoadError::Malformed {
            reason: e.to_string(),
        })
    }
}

/// One needle entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NeedleDescription {
    /// Declared index.
    pub index: String,
    /// Class name, e.g. `solid-boundary`.
    pub class: String,
    /// `kind:locator` reference.
    pub file: String,
    /// Needle-specific parameters.
    #[serde(default)]
    pub parameters: IndexMap<String, ParameterDescription>,
}

/// One region entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RegionDescription {
    /// Unique id.
    pub id: String,
    /// Format name, e.g. `surface`.
    pub format: String,
    /// Semantic meaning, e.g. `organ`.
    pub name: String,
    /// Source location of the region's mesh.
    #[serde(default)]
    pub input: Option<String>,
    /// JSON-encoded list of group names.
    #[serde(default = "empty_groups")]
    pub groups: String,
}

fn empty_groups() -> String {
    "[]".to_owned()
}

/// A parameter value: bare, or with an explicit type tag.
///
/// Non-string bare values (numbers, arrays) are kept as their JSON text.
/// An object is only read as tagged when it has no keys besides `value`
/// and `type`; any other object is a bare value.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParameterDescription {
    /// `{ value = "...", type = "float" }`.
    Tagged(TaggedParameter),
    /// A bare value with no tag.
    Bare(serde_json::Value),
}

/// The `{ value, type }` form of a parameter.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaggedParameter {
    /// Raw value.
    pub value: serde_json::Value,
    /// Type tag.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub type_tag: Option<String>,
}

impl ParameterDescription {
    /// Convert to the store's raw representation.
    pub fn to_raw(&self) -> RawValue {
        match self {
            Self::Tagged(tagged) => {
                RawValue::new(value_text(&tagged.value), tagged.type_tag.as_deref())
            }
            Self::Bare(value) => RawValue::new(value_text(value), None),
        }
    }
}

fn value_text(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// One algorithm entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AlgorithmDescription {
    /// Result name.
    pub result: String,
    /// Argument names in declared order.
    #[serde(default)]
    pub arguments: Vec<String>,
    /// Source text.
    #[serde(default)]
    pub content: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use ablate_core::TypeTag;

    #[test]
    fn parameter_forms() {
        let params: IndexMap<String, ParameterDescription> = serde_json::from_str(
            r#"{
                "A": "2.5",
                "B": { "value": "3", "type": "integer" },
                "C": [1, 2, 3],
                "D": { "value": [1.5, 2.5, 3.5], "type": "array(float)" }
            }"#,
        )
        .unwrap();
        assert_eq!(params["A"].to_raw(), RawValue::Raw("2.5".into()));
        assert_eq!(
            params["B"].to_raw(),
            RawValue::Typed {
                tag: TypeTag::Integer,
                text: "3".into()
            }
        );
        assert_eq!(params["C"].to_raw().text(), "[1,2,3]");
        assert_eq!(params["D"].to_raw().text(), "[1.5,2.5,3.5]");
        let keys: Vec<_> = params.keys().map(String::as_str).collect();
        assert_eq!(keys, ["A", "B", "C", "D"]);
    }

    #[test]
    fn objects_with_extra_keys_are_bare() {
        let params: IndexMap<String, ParameterDescription> = serde_json::from_str(
            r#"{
                "WITH_UNITS": { "value": 1, "units": "mm" },
                "UNTYPED": { "value": "4" }
            }"#,
        )
        .unwrap();
        assert!(matches!(params["WITH_UNITS"], ParameterDescription::Bare(_)));
        assert_eq!(
            params["WITH_UNITS"].to_raw(),
            RawValue::Raw(r#"{"units":"mm","value":1}"#.into())
        );
        assert_eq!(params["UNTYPED"].to_raw(), RawValue::Raw("4".into()));
    }

    #[test]
    fn toml_description() {
        let description = SimulationDescription::from_toml(
            r#"
            definition = "Simulation End"

            [parameters]
            SETTING_LESION_FIELD = "dead"
            RESOLUTION_HIGH = { value = "true", type = "boolean" }

            [[regions]]
            id = "liver"
            format = "surface"
            name = "organ"
            input = "/data/liver.vtp"
            groups = '["organs"]'
            "#,
        )
        .unwrap();
        assert_eq!(description.regions[0].id, "liver");
        assert_eq!(
            description.parameters["RESOLUTION_HIGH"].to_raw().tag(),
            Some(&TypeTag::Boolean)
        );
        assert!(description.needles.is_empty());
    }

    #[test]
    fn groups_default_to_empty_list() {
        let region: RegionDescription =
            serde_json::from_str(r#"{ "id": "r", "format": "zone", "name": "tumour" }"#).unwrap();
        assert_eq!(region.groups, "[]");
        assert_eq!(region.input, None);
    }

    #[test]
    fn malformed_json_is_a_load_error() {
        match SimulationDescription::from_json("{ \"needles\": [] }") {
            Err(LoadError::Malformed { reason }) => assert!(reason.contains("definition")),
            other => panic!("expected Malformed, got {other:?}"),
        }
    }
}
