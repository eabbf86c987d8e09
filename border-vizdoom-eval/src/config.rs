use crate::args::Args;
use anyhow::Result;
use border_core::RealtimeEvaluatorConfig;
use border_vizdoom_env::VizdoomEnvConfig;
use serde::{Deserialize, Serialize};
use std::{
    fs::File,
    io::{BufReader, Write},
    path::{Path, PathBuf},
};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct VizdoomEvalConfig {
    pub model_path: PathBuf,
    pub seed: i64,
    pub env_config: VizdoomEnvConfig,
    pub evaluator_config: RealtimeEvaluatorConfig,
}

impl From<&Args> for VizdoomEvalConfig {
    fn from(args: &Args) -> Self {
        let env_config = VizdoomEnvConfig::default()
            .scenario_path(&args.scenario)
            .render(!args.no_render);
        let evaluator_config = RealtimeEvaluatorConfig::default().wait_in_millis(args.wait);

        Self {
            model_path: PathBuf::from(&args.model),
            seed: args.seed,
            env_config,
            evaluator_config,
        }
    }
}

impl VizdoomEvalConfig {
    /// Uses the YAML file given with `--config`, otherwise the command line options.
    pub fn from_args(args: &Args) -> Result<Self> {
        match &args.config {
            Some(path) => Self::load(path),
            None => Ok(args.into()),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempdir::TempDir;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["border-vizdoom-eval"]);
        let config = VizdoomEvalConfig::from_args(&args).unwrap();

        assert_eq!(config.model_path, PathBuf::from("./models/vizdoom_basic/mlp.bincode"));
        assert_eq!(config.seed, 0);
        assert_eq!(config.env_config.scenario_path, PathBuf::from("scenarios/basic.cfg"));
        assert!(config.env_config.render);
        assert_eq!(config.env_config.frame_skip, 4);
        assert_eq!(config.env_config.n_actions, 3);
        assert_eq!(config.evaluator_config.wait_in_millis, 20);
    }

    #[test]
    fn test_options() {
        let args = Args::parse_from([
            "border-vizdoom-eval",
            "--model",
            "model.bincode",
            "--scenario",
            "deadly_corridor.cfg",
            "--no-render",
            "--wait",
            "50",
            "--seed",
            "42",
        ]);
        let config = VizdoomEvalConfig::from_args(&args).unwrap();

        assert_eq!(config.model_path, PathBuf::from("model.bincode"));
        assert_eq!(config.seed, 42);
        assert_eq!(config.env_config.scenario_path, PathBuf::from("deadly_corridor.cfg"));
        assert!(!config.env_config.render);
        assert_eq!(config.evaluator_config.wait_in_millis, 50);
    }

    #[test]
    fn test_config_file_replaces_options() -> Result<()> {
        let dir = TempDir::new("vizdoom_eval_config")?;
        let path = dir.path().join("eval.yaml");
        let args = Args::parse_from(["border-vizdoom-eval", "--seed", "7", "--wait", "5"]);
        let saved = VizdoomEvalConfig::from(&args);
        saved.save(&path)?;

        let path_str = path.to_str().unwrap();
        let args = Args::parse_from(["border-vizdoom-eval", "--seed", "1", "--config", path_str]);
        let loaded = VizdoomEvalConfig::from_args(&args)?;
        assert_eq!(loaded, saved);
        assert_eq!(loaded.seed, 7);
        Ok(())
    }
}
