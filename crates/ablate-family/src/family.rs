//! The [`Family`] trait and the explicit [`FamilyRegistry`].

use ablate_core::FilesRequired;
use ablate_doc::Document;
use ablate_model::{Simulation, SimulationDescription};
use indexmap::IndexMap;

use crate::config::CompileConfig;
use crate::elmer::ElmerLibNuma;
use crate::error::{CompileError, FamilyError};

/// A named translation profile for one mesher/solver combination.
pub trait Family {
    /// Registered name, e.g. `elmer-libnuma`.
    fn name(&self) -> &str;

    /// Configuration this family compiles with.
    fn config(&self) -> &CompileConfig;

    /// Assemble the output document for a loaded simulation.
    fn compile(&self, simulation: &Simulation) -> Result<Document, CompileError>;

    /// Load `description` then compile it.
    ///
    /// Required files are registered in `files` only if loading succeeds.
    fn translate(
        &self,
        description: &SimulationDescription,
        files: &mut FilesRequired,
    ) -> Result<Document, FamilyError> {
        let simulation = Simulation::load(description, &self.config().input_dir, files)?;
        Ok(self.compile(&simulation)?)
    }
}

/// Constructor stored in the registry.
pub type FamilyConstructor = fn(CompileConfig) -> Box<dyn Family>;

/// Name-to-constructor table.
///
/// Nothing is registered implicitly; use [`with_builtin`](Self::with_builtin)
/// for the families shipped with this crate.
#[derive(Clone, Debug, Default)]
pub struct FamilyRegistry {
    constructors: IndexMap<String, FamilyConstructor>,
}

impl FamilyRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding every built-in family.
    pub fn with_builtin() -> Self {
        let mut registry = Self::new();
        registry.register(ElmerLibNuma::NAME, |config| -> Box<dyn Family> {
            Box::new(ElmerLibNuma::new(config))
        });
        registry
    }

    /// Register `constructor` under `name`, replacing any earlier entry.
    pub fn register(&mut self, name: impl Into<String>, constructor: FamilyConstructor) {
        self.constructors.insert(name.into(), constructor);
    }

    /// Registered names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.constructors.keys().map(String::as_str)
    }

    /// Instantiate the family called `name`.
    pub fn create(
        &self,
        name: &str,
        config: CompileConfig,
    ) -> Result<Box<dyn Family>, FamilyError> {
        let constructor = self
            .constructors
            .get(name)
            .ok_or_else(|| FamilyError::UnknownFamily {
                name: name.to_owned(),
            })?;
        config.validate()?;
        Ok(constructor(config))
    }
}
