//! An evaluator running a policy in real time until it is interrupted.
//!
//! The evaluator plays episodes back to back. At every tick it queries the
//! policy, applies the action to the environment, records the transition and
//! then waits for a fixed duration, so that the game shown on the screen runs
//! at a watchable pace. The waiting time is best-effort throttling, not a
//! scheduling guarantee.
//!
//! The run is a small state machine:
//!
//! * [`RunState::Running`] - ticks are being executed.
//! * [`RunState::Interrupted`] - the [`CancellationToken`] was cancelled.
//!   The tick in flight has completed and no further tick starts.
//! * [`RunState::Closed`] - the environment has been released. This state is
//!   reached from [`RunState::Interrupted`] and from any fatal error, and it is
//!   terminal.
use super::Evaluator;
use crate::{
    error::BorderError,
    record::{NullRecorder, Record, RecordValue, Recorder},
    CancellationToken, Env, Info, Policy,
};
use anyhow::Result;
use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::{
    fmt::Display,
    fs::File,
    io::{BufReader, Write},
    path::Path,
    thread,
    time::Duration,
};

/// Configuration of [`RealtimeEvaluator`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RealtimeEvaluatorConfig {
    /// Waiting time in milliseconds between ticks.
    pub wait_in_millis: u64,
}

impl Default for RealtimeEvaluatorConfig {
    fn default() -> Self {
        Self { wait_in_millis: 20 }
    }
}

impl RealtimeEvaluatorConfig {
    /// Sets the waiting time in milliseconds between ticks.
    pub fn wait_in_millis(mut self, v: u64) -> Self {
        self.wait_in_millis = v;
        self
    }

    /// Returns the waiting time between ticks.
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_in_millis)
    }

    /// Constructs [`RealtimeEvaluatorConfig`] from YAML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path)?;
        let rdr = BufReader::new(file);
        let b = serde_yaml::from_reader(rdr)?;
        Ok(b)
    }

    /// Saves [`RealtimeEvaluatorConfig`].
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let mut file = File::create(path)?;
        file.write_all(serde_yaml::to_string(&self)?.as_bytes())?;
        Ok(())
    }
}

/// State of [`RealtimeEvaluator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// Ticks are being executed, or will be on the next call of `run`.
    Running,

    /// Cancellation was observed at an iteration boundary.
    Interrupted,

    /// The environment has been released.
    Closed,
}

/// Runs a policy on an environment in real time until interrupted.
///
/// # Examples
///
/// ```ignore
/// let token = CancellationToken::new();
/// let mut evaluator = RealtimeEvaluator::<Env>::build(&env_config, &config, 0, token.clone())?;
///
/// // `token.cancel()` is called, for example, by a Ctrl-C handler.
/// let summary = evaluator.evaluate(&mut policy)?;
/// println!("{:?}", summary.get_scalar("Episode return"));
/// ```
pub struct RealtimeEvaluator<E: Env> {
    env: E,
    wait: Duration,
    token: CancellationToken,
    state: RunState,
}

impl<E: Env> RealtimeEvaluator<E> {
    /// Constructs the evaluator with an environment which has already been built.
    pub fn new(config: &RealtimeEvaluatorConfig, env: E, token: CancellationToken) -> Self {
        Self {
            env,
            wait: config.wait(),
            token,
            state: RunState::Running,
        }
    }

    /// Builds the environment and constructs the evaluator.
    ///
    /// Fails if the environment cannot be built. This is not retried.
    pub fn build(
        env_config: &E::Config,
        config: &RealtimeEvaluatorConfig,
        seed: i64,
        token: CancellationToken,
    ) -> Result<Self> {
        let env = E::build(env_config, seed)?;
        Ok(Self::new(config, env, token))
    }

    /// Returns the current state.
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Returns a reference to the environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// Releases the environment. The evaluator cannot run after this call.
    fn close(&mut self) -> Result<()> {
        self.state = RunState::Closed;
        self.env.close()?;
        info!("Environment closed.");
        Ok(())
    }
}

impl<E> RealtimeEvaluator<E>
where
    E: Env,
    E::Act: Display,
{
    /// Runs the policy until the cancellation token is cancelled or an error occurs.
    ///
    /// Every transition is written to `recorder` with keys `action`, `reward`
    /// and `done`, merged with the record of the step information.
    /// The environment is closed exactly once before this method returns,
    /// whatever the outcome of the run.
    ///
    /// Returns a summary with keys `Steps`, `Episodes` and, if at least one
    /// episode was completed, `Episode return` averaged over episodes.
    pub fn run<P, R>(&mut self, policy: &mut P, recorder: &mut R) -> Result<Record>
    where
        P: Policy<E>,
        R: Recorder,
    {
        if self.state == RunState::Closed {
            return Err(BorderError::EvaluatorClosed.into());
        }

        let result = self.run_loop(policy, recorder);
        let closed = self.close();

        match result {
            Ok(summary) => {
                closed?;
                Ok(summary)
            }
            Err(e) => {
                if let Err(e_close) = closed {
                    warn!("Failed to close the environment: {:?}", e_close);
                }
                Err(e)
            }
        }
    }

    fn interrupt(&mut self) {
        self.state = RunState::Interrupted;
        info!("Evaluation interrupted by user.");
    }

    /// Takes an error of the environment as the interruption if the token has
    /// already been cancelled, as the simulator may receive the same signal.
    fn interrupted_by(&mut self, e: anyhow::Error) -> Result<()> {
        if !self.token.is_cancelled() {
            return Err(e);
        }
        warn!("Environment failed after interruption: {:?}", e);
        self.interrupt();
        Ok(())
    }

    fn run_loop<P, R>(&mut self, policy: &mut P, recorder: &mut R) -> Result<Record>
    where
        P: Policy<E>,
        R: Recorder,
    {
        let (mut obs, _) = self.env.reset(None, None)?;
        self.state = RunState::Running;

        let mut n_steps = 0usize;
        let mut episode_return = 0f32;
        let mut episode_returns = vec![];

        loop {
            if self.token.is_cancelled() {
                self.interrupt();
                break;
            }

            let act = policy.sample(&obs);
            let (step, record_env) = match self.env.step(&act) {
                Ok(step) => step,
                Err(e) => {
                    self.interrupted_by(e)?;
                    break;
                }
            };
            let done = step.is_done();
            n_steps += 1;
            episode_return += step.reward;

            info!("Action: {}, Reward: {}, Done: {}", act, step.reward, done);
            let record = Record::from_slice(&[
                ("action", RecordValue::String(act.to_string())),
                ("reward", RecordValue::Scalar(step.reward)),
                ("done", RecordValue::Scalar(if done { 1.0 } else { 0.0 })),
            ]);
            recorder.write(record.merge(step.info.to_record()).merge(record_env));

            thread::sleep(self.wait);

            obs = if done {
                info!("Episode return: {}", episode_return);
                episode_returns.push(episode_return);
                episode_return = 0.0;
                match self.env.reset(None, None) {
                    Ok((obs, _)) => obs,
                    Err(e) => {
                        self.interrupted_by(e)?;
                        break;
                    }
                }
            } else {
                step.obs
            };
        }

        let mut summary = Record::from_scalar("Steps", n_steps as f32);
        summary.insert("Episodes", RecordValue::Scalar(episode_returns.len() as f32));
        if !episode_returns.is_empty() {
            let mean = episode_returns.iter().sum::<f32>() / episode_returns.len() as f32;
            summary.insert("Episode return", RecordValue::Scalar(mean));
        }

        Ok(summary)
    }
}

impl<E> Evaluator<E> for RealtimeEvaluator<E>
where
    E: Env,
    E::Act: Display,
{
    fn evaluate<P>(&mut self, policy: &mut P) -> Result<Record>
    where
        P: Policy<E>,
    {
        self.run(policy, &mut NullRecorder::new())
    }
}
