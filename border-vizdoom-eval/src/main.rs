mod args;
mod config;
use anyhow::{ensure, Result};
use args::Args;
use border_policy_no_backend::DiscreteMlpPolicy;
use border_vizdoom_env::OBS_LEN;
use clap::Parser;
use config::VizdoomEvalConfig;

/// Fails unless the policy fits the observations and the action set of the scenario.
fn check_policy(policy: &DiscreteMlpPolicy, config: &VizdoomEvalConfig) -> Result<()> {
    policy.check_input_dim(OBS_LEN)?;
    ensure!(
        policy.n_actions() == config.env_config.n_actions,
        "Policy has {} actions, but the scenario has {}",
        policy.n_actions(),
        config.env_config.n_actions
    );
    Ok(())
}

#[cfg(feature = "py")]
fn eval(config: &VizdoomEvalConfig, policy: &mut DiscreteMlpPolicy) -> Result<()> {
    use border_core::{CancellationToken, Evaluator as _, RealtimeEvaluator};
    use border_vizdoom_env::{PyDoomGame, VizdoomEnv};
    use log::info;

    type Env = VizdoomEnv<PyDoomGame>;

    let token = CancellationToken::new();
    let mut evaluator = RealtimeEvaluator::<Env>::build(
        &config.env_config,
        &config.evaluator_config,
        config.seed,
        token.clone(),
    )?;

    // The simulator sets up its own signal handling on start, so this comes after
    ctrlc::set_handler(move || token.cancel())?;
    info!("Press Ctrl-C to stop the evaluation");

    let summary = evaluator.evaluate(policy)?;
    info!("{:?}", summary);

    Ok(())
}

#[cfg(not(feature = "py"))]
fn eval(_: &VizdoomEvalConfig, _: &mut DiscreteMlpPolicy) -> Result<()> {
    anyhow::bail!("Built without the simulator. Rebuild with `--features py`.")
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();
    let config = VizdoomEvalConfig::from_args(&args)?;

    if args.show_config {
        println!("{}", serde_yaml::to_string(&config)?);
        return Ok(());
    }

    let mut policy = DiscreteMlpPolicy::load(&config.model_path)?;
    check_policy(&policy, &config)?;

    eval(&config, &mut policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use border_policy_no_backend::{Mat, Mlp};

    fn policy(n_inputs: usize, n_actions: usize) -> DiscreteMlpPolicy {
        let mlp = Mlp::new(
            vec![Mat::new(vec![0.0; n_inputs * n_actions], n_actions, n_inputs)],
            vec![vec![0.0; n_actions].into()],
        )
        .unwrap();
        DiscreteMlpPolicy::new(mlp)
    }

    #[test]
    fn test_check_policy() {
        let args = Args::parse_from(["border-vizdoom-eval"]);
        let config = VizdoomEvalConfig::from_args(&args).unwrap();

        assert!(check_policy(&policy(OBS_LEN, 3), &config).is_ok());
        assert!(check_policy(&policy(OBS_LEN, 4), &config).is_err());
        assert!(check_policy(&policy(84 * 84, 3), &config).is_err());
    }
}
