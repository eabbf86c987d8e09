//! Configuration of [`VizdoomEnv`](super::VizdoomEnv).
use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::{
    default::Default,
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
/// Configurations of [`VizdoomEnv`](super::VizdoomEnv).
pub struct VizdoomEnvConfig {
    /// Path to the scenario configuration file, passed through to the simulator.
    pub scenario_path: PathBuf,

    /// If `true`, the window of the simulator is shown.
    pub render: bool,

    /// The number of simulator tics advanced by a single step.
    pub frame_skip: u32,

    /// The number of discrete actions, i.e., `available_buttons` of the scenario.
    pub n_actions: usize,
}

impl Default for VizdoomEnvConfig {
    fn default() -> Self {
        Self {
            scenario_path: PathBuf::from("scenarios/basic.cfg"),
            render: false,
            frame_skip: 4,
            n_actions: 3,
        }
    }
}

impl VizdoomEnvConfig {
    /// Sets the path to the scenario configuration file.
    pub fn scenario_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.scenario_path = path.into();
        self
    }

    /// Sets the visibility of the window of the simulator.
    pub fn render(mut self, render: bool) -> Self {
        self.render = render;
        self
    }

    /// Sets the number of simulator tics advanced by a single step.
    pub fn frame_skip(mut self, frame_skip: u32) -> Self {
        self.frame_skip = frame_skip;
        self
    }

    /// Sets the number of discrete actions.
    pub fn n_actions(mut self, n_actions: usize) -> Self {
        self.n_actions = n_actions;
        self
    }

    /// Constructs [`VizdoomEnvConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`VizdoomEnvConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}
