//! The loaded [`Simulation`] and its load step.

use ablate_core::{
    derived_file_name, is_element_name, FilesRequired, LoadError, NeedleIndex, ParameterStore,
    RegionId,
};
use indexmap::{IndexMap, IndexSet};
use smallvec::SmallVec;

use crate::algorithm::Algorithm;
use crate::description::{ParameterDescription, SimulationDescription};
use crate::needle::{FileReference, NeedleClass, NeedleRegistry};
use crate::region::{Region, RegionFormat, RegionRegistry};

/// Everything one compilation reads, indexed and validated.
///
/// A `Simulation` is owned by a single compilation; nothing in it is shared.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Simulation {
    /// Free-text solver definition body.
    pub definition: String,
    /// Global parameters.
    pub parameters: ParameterStore,
    /// Needles with dual addressing.
    pub needles: NeedleRegistry,
    /// Regions with the meaning index.
    pub regions: RegionRegistry,
    /// Algorithms keyed by result name, in declared order.
    pub algorithms: IndexMap<String, Algorithm>,
}

impl Simulation {
    /// Index and validate a description.
    ///
    /// Mesh files referenced by needles and regions are registered in
    /// `files` under `<input_dir>/<derived name>`. Registration happens only
    /// if the whole load succeeds.
    pub fn load(
        description: &SimulationDescription,
        input_dir: &str,
        files: &mut FilesRequired,
    ) -> Result<Self, LoadError> {
        let mut staged = FilesRequired::new();

        let mut needles = NeedleRegistry::new();
        for needle in &description.needles {
            let class =
                NeedleClass::parse(&needle.class).ok_or_else(|| LoadError::UnknownNeedleClass {
                    needle: needle.index.clone(),
                    class: needle.class.clone(),
                })?;
            let mut reference =
                FileReference::parse(&needle.file).ok_or_else(|| LoadError::MalformedReference {
                    needle: needle.index.clone(),
                    reference: needle.file.clone(),
                })?;
            if reference.kind.is_mesh() {
                let local = derived_file_name(&needle.index, &reference.locator);
                stage(&mut staged, files, format!("{input_dir}/{local}"), &reference.locator)?;
                reference.locator = local;
            }
            let ordinal = needles.push(
                NeedleIndex::from(needle.index.as_str()),
                class,
                reference,
                parameter_store(&needle.parameters),
            )?;
            tracing::debug!(
                needle = %needle.index,
                %ordinal,
                class = class.as_str(),
                "needle loaded"
            );
        }

        let mut regions = RegionRegistry::new();
        for region in &description.regions {
            if !is_element_name(&region.format) {
                return Err(LoadError::InvalidRegionFormat {
                    region: region.id.clone(),
                    format: region.format.clone(),
                });
            }
            let format = RegionFormat::parse(&region.format);
            let groups: IndexSet<String> =
                serde_json::from_str(&region.groups).map_err(|e| LoadError::InvalidGroups {
                    region: region.id.clone(),
                    reason: e.to_string(),
                })?;
            let input = match region.input.as_deref() {
                Some(source) if !source.is_empty() => {
                    let local = derived_file_name(&region.id, source);
                    if format.is_mesh() {
                        stage(&mut staged, files, format!("{input_dir}/{local}"), source)?;
                    }
                    Some(local)
                }
                _ => None,
            };
            tracing::debug!(
                region = %region.id,
                format = format.as_str(),
                meaning = %region.name,
                "region loaded"
            );
            regions.insert(Region {
                id: RegionId::from(region.id.as_str()),
                format,
                meaning: region.name.clone(),
                input,
                groups,
            })?;
        }

        let mut algorithms = IndexMap::with_capacity(description.algorithms.len());
        for algorithm in &description.algorithms {
            if algorithms.contains_key(&algorithm.result) {
                return Err(LoadError::DuplicateAlgorithm {
                    result: algorithm.result.clone(),
                });
            }
            algorithms.insert(
                algorithm.result.clone(),
                Algorithm {
                    result: algorithm.result.clone(),
                    arguments: algorithm.arguments.iter().cloned().collect::<SmallVec<_>>(),
                    content: algorithm.content.clone(),
                },
            );
        }

        for (local, source) in staged.iter() {
            files.register(local, source);
        }
        tracing::info!(
            needles = needles.len(),
            regions = regions.len(),
            algorithms = algorithms.len(),
            files = staged.len(),
            "simulation loaded"
        );

        Ok(Self {
            definition: description.definition.clone(),
            parameters: parameter_store(&description.parameters),
            needles,
            regions,
            algorithms,
        })
    }
}

/// Stage `source` at `local`, failing if a different source already
/// claims that path in this load or in the caller's table.
fn stage(
    staged: &mut FilesRequired,
    files: &FilesRequired,
    local: String,
    source: &str,
) -> Result<(), LoadError> {
    let previous = staged.get(&local).or_else(|| files.get(&local));
    if let Some(first) = previous.filter(|first| *first != source) {
        return Err(LoadError::DuplicateLocalFile {
            first: first.to_owned(),
            second: source.to_owned(),
            local,
        });
    }
    staged.register(local, source);
    Ok(())
}

fn parameter_store(params: &IndexMap<String, ParameterDescription>) -> ParameterStore {
    params
        .iter()
        .map(|(key, param)| (key.as_str(), param.to_raw()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::description::{AlgorithmDescription, NeedleDescription, RegionDescription};
    use crate::needle::SourceKind;

    fn needle(index: &str, class: &str, file: &str) -> NeedleDescription {
        NeedleDescription {
            index: index.into(),
            class: class.into(),
            file: file.into(),
            parameters: IndexMap::new(),
        }
    }

    fn region(id: &str, format: &str, input: Option<&str>) -> RegionDescription {
        RegionDescription {
            id: id.into(),
            format: format.into(),
            name: "organ".into(),
            input: input.map(Into::into),
            groups: "[\"organs\", \"organs\", \"boundary\"]".into(),
        }
    }

    #[test]
    fn mesh_needles_are_renamed_and_registered() {
        let description = SimulationDescription {
            needles: vec![
                needle("n1", "solid-boundary", "surface:/meshes/probe.vtp"),
                needle("n2", "point-sources", "library:cluster-3"),
            ],
            ..Default::default()
        };
        let mut files = FilesRequired::new();
        let sim = Simulation::load(&description, "input", &mut files).unwrap();

        let n1 = sim.needles.resolve("n1").unwrap();
        assert_eq!(n1.reference.kind, SourceKind::Surface);
        assert_eq!(n1.reference.locator, "n1.vtp");
        assert_eq!(files.get("input/n1.vtp"), Some("/meshes/probe.vtp"));
        assert_eq!(sim.needles.resolve(1usize).unwrap().reference.locator, "cluster-3");
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn only_mesh_regions_register_files() {
        let description = SimulationDescription {
            regions: vec![
                region("liver", "surface", Some("/data/liver.vtp")),
                region("probe-path", "line", Some("/data/path.csv")),
                region("box", "zone", None),
            ],
            ..Default::default()
        };
        let mut files = FilesRequired::new();
        let sim = Simulation::load(&description, "input", &mut files).unwrap();

        let locals: Vec<_> = files.iter().collect();
        assert_eq!(locals, [("input/liver.vtp", "/data/liver.vtp")]);
        assert_eq!(sim.regions.get("probe-path").unwrap().input.as_deref(), Some("probe-path.csv"));
        assert_eq!(sim.regions.get("box").unwrap().input, None);
        let groups: Vec<_> = sim.regions.get("liver").unwrap().groups.iter().collect();
        assert_eq!(groups, ["organs", "boundary"]);
    }

    #[test]
    fn failed_load_registers_nothing() {
        let description = SimulationDescription {
            needles: vec![
                needle("n1", "boundary", "surface:/a.vtp"),
                needle("n1", "boundary", "surface:/b.vtp"),
            ],
            ..Default::default()
        };
        let mut files = FilesRequired::new();
        let err = Simulation::load(&description, "input", &mut files).unwrap_err();
        assert_eq!(err, LoadError::DuplicateNeedle { index: "n1".into() });
        assert!(files.is_empty());
    }

    #[test]
    fn load_errors() {
        let load = |description: SimulationDescription| {
            Simulation::load(&description, "input", &mut FilesRequired::new()).unwrap_err()
        };

        assert_eq!(
            load(SimulationDescription {
                needles: vec![needle("n1", "tube", "library:x")],
                ..Default::default()
            }),
            LoadError::UnknownNeedleClass {
                needle: "n1".into(),
                class: "tube".into()
            }
        );
        assert_eq!(
            load(SimulationDescription {
                needles: vec![needle("n1", "boundary", "probe.vtp")],
                ..Default::default()
            }),
            LoadError::MalformedReference {
                needle: "n1".into(),
                reference: "probe.vtp".into()
            }
        );
        let mut bad_groups = region("liver", "surface", None);
        bad_groups.groups = "organs".into();
        assert!(matches!(
            load(SimulationDescription {
                regions: vec![bad_groups],
                ..Default::default()
            }),
            LoadError::InvalidGroups { .. }
        ));
        let alg = AlgorithmDescription {
            result: "dose".into(),
            arguments: vec![],
            content: String::new(),
        };
        assert_eq!(
            load(SimulationDescription {
                algorithms: vec![alg.clone(), alg],
                ..Default::default()
            }),
            LoadError::DuplicateAlgorithm {
                result: "dose".into()
            }
        );
    }

    #[test]
    fn colliding_local_files_fail_the_load() {
        let description = SimulationDescription {
            needles: vec![needle("liver", "boundary", "surface:/meshes/probe.vtp")],
            regions: vec![region("liver", "surface", Some("/data/liver.vtp"))],
            ..Default::default()
        };
        let mut files = FilesRequired::new();
        let err = Simulation::load(&description, "input", &mut files).unwrap_err();
        assert_eq!(
            err,
            LoadError::DuplicateLocalFile {
                local: "input/liver.vtp".into(),
                first: "/meshes/probe.vtp".into(),
                second: "/data/liver.vtp".into(),
            }
        );
        assert!(files.is_empty());
    }

    #[test]
    fn same_source_at_same_path_is_accepted() {
        let description = SimulationDescription {
            needles: vec![needle("liver", "boundary", "surface:/data/liver.vtp")],
            regions: vec![region("liver", "surface", Some("/data/liver.vtp"))],
            ..Default::default()
        };
        let mut files = FilesRequired::new();
        Simulation::load(&description, "input", &mut files).unwrap();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn collision_with_an_earlier_load_is_rejected() {
        let mut files = FilesRequired::new();
        files.register("input/liver.vtp", "/old/liver.vtp");
        let description = SimulationDescription {
            regions: vec![region("liver", "surface", Some("/data/liver.vtp"))],
            ..Default::default()
        };
        let err = Simulation::load(&description, "input", &mut files).unwrap_err();
        assert!(matches!(err, LoadError::DuplicateLocalFile { .. }));
        assert_eq!(files.get("input/liver.vtp"), Some("/old/liver.vtp"));
    }

    #[test]
    fn region_formats_must_be_element_names() {
        for format in ["point cloud", "", "2d", "a<b"] {
            let description = SimulationDescription {
                regions: vec![region("r1", format, None)],
                ..Default::default()
            };
            let err = Simulation::load(&description, "input", &mut FilesRequired::new())
                .unwrap_err();
            assert_eq!(
                err,
                LoadError::InvalidRegionFormat {
                    region: "r1".into(),
                    format: format.into(),
                }
            );
        }
    }
}
