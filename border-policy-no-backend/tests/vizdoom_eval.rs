use anyhow::Result;
use border_core::{
    record::{Record, Recorder},
    CancellationToken, RealtimeEvaluator, RealtimeEvaluatorConfig, RunState,
};
use border_policy_no_backend::{DiscreteMlpPolicy, Mat, Mlp};
use border_vizdoom_env::{
    util::test::{Env, MockDoomGame, MockScenario},
    VizdoomAct, VizdoomEnvConfig, OBS_LEN,
};
use std::fs::File;
use tempdir::TempDir;

/// Keeps records and cancels the run after a number of transitions.
struct CancellingRecorder {
    records: Vec<Record>,
    cancel_after: usize,
    token: CancellationToken,
}

impl Recorder for CancellingRecorder {
    fn write(&mut self, record: Record) {
        self.records.push(record);
        if self.records.len() == self.cancel_after {
            self.token.cancel();
        }
    }
}

/// A policy which always attacks, as the biases dominate zero weights.
fn attacking_policy() -> Result<DiscreteMlpPolicy> {
    let mlp = Mlp::new(
        vec![Mat::new(vec![0.0; 3 * OBS_LEN], 3, OBS_LEN)],
        vec![vec![0.0, 0.0, 1.0].into()],
    )?;
    Ok(DiscreteMlpPolicy::new(mlp))
}

#[test]
fn test_policy_plays_until_interrupted() -> Result<()> {
    let _ = env_logger::builder().is_test(true).try_init();
    let dir = TempDir::new("vizdoom_eval")?;
    let scenario_path = dir.path().join("basic.cfg");
    File::create(&scenario_path)?;
    let model_path = dir.path().join("mlp.bincode");
    attacking_policy()?.save(&model_path)?;

    let mut policy = DiscreteMlpPolicy::load(&model_path)?;
    policy.check_input_dim(OBS_LEN)?;

    let env_config = VizdoomEnvConfig::default().scenario_path(&scenario_path);
    let (game, log) = MockDoomGame::new(MockScenario::default());
    let env = Env::with_game(game, &env_config, Some(0))?;
    let token = CancellationToken::new();
    let config = RealtimeEvaluatorConfig::default().wait_in_millis(0);
    let mut evaluator = RealtimeEvaluator::new(&config, env, token.clone());
    let mut recorder = CancellingRecorder {
        records: vec![],
        cancel_after: 7,
        token,
    };

    let summary = evaluator.run(&mut policy, &mut recorder)?;

    assert_eq!(evaluator.state(), RunState::Closed);
    assert_eq!(summary.get_scalar("Steps")?, 7.0);
    assert_eq!(summary.get_scalar("Episodes")?, 2.0);
    assert_eq!(summary.get_scalar("Episode return")?, 89.0);

    let attack = VizdoomAct::ATTACK.to_string();
    for record in recorder.records.iter() {
        assert_eq!(record.get_string("action")?, attack);
    }
    let dones: Vec<f32> = recorder
        .records
        .iter()
        .map(|r| r.get_scalar("done"))
        .collect::<Result<_, _>>()?;
    assert_eq!(dones, vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0]);

    // Ammo is missing on the ticks where an episode has finished
    assert_eq!(recorder.records[0].get_scalar("ammo")?, 49.0);
    assert!(recorder.records[2].get("ammo").is_none());

    {
        let log = log.borrow();
        assert_eq!(log.n_make_action, 7);
        assert_eq!(log.n_new_episode, 3);
        assert_eq!(log.n_close, 1);
        assert!(log.actions.iter().all(|a| a == &vec![0, 0, 1]));
    }

    drop(evaluator);
    assert_eq!(log.borrow().n_close, 1);
    Ok(())
}
