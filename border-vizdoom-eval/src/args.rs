use clap::Parser;
use serde::{Deserialize, Serialize};

/// Plays ViZDoom with a trained policy until interrupted with Ctrl-C
#[derive(Clone, Parser, Debug, Serialize, Deserialize)]
#[command(version, about)]
pub struct Args {
    /// Path to the model file of the policy
    #[arg(long, default_value = "./models/vizdoom_basic/mlp.bincode")]
    pub model: String,

    /// Path to the scenario configuration file of ViZDoom
    #[arg(long, default_value = "scenarios/basic.cfg")]
    pub scenario: String,

    /// Hides the window of the simulator
    #[arg(long, default_value_t = false)]
    pub no_render: bool,

    /// Waiting time in milliseconds between frames
    #[arg(long, default_value_t = 20)]
    pub wait: u64,

    /// Random seed of the simulator
    #[arg(long, default_value_t = 0)]
    pub seed: i64,

    /// Configuration file in YAML.
    /// If given, the other options except `--show-config` are ignored.
    #[arg(long)]
    pub config: Option<String>,

    /// Prints the configuration in YAML and exits
    #[arg(long, default_value_t = false)]
    pub show_config: bool,
}
