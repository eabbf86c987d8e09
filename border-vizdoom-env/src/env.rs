mod config;
use crate::{frame, DoomGame, GameState, VizdoomAct, VizdoomObs};
use anyhow::{ensure, Context, Result};
use border_core::{record::Record, Env, Info, Step};
pub use config::VizdoomEnvConfig;
use log::{info, trace, warn};
use std::convert::TryFrom;

/// Information given at every step of the interaction with the environment.
///
/// `ammo` is available only if the simulator exposed a state after the step.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VizdoomInfo {
    /// Remaining ammunition, the first game variable of the scenario.
    pub ammo: Option<f64>,
}

impl Info for VizdoomInfo {
    fn to_record(&self) -> Record {
        match self.ammo {
            Some(ammo) => Record::from_scalar("ammo", ammo as f32),
            None => Record::empty(),
        }
    }
}

/// Observation and information read from the simulator after a tick.
#[derive(Debug, Clone, PartialEq)]
pub enum ScreenFrame {
    /// The simulator exposed a state.
    Live {
        /// Preprocessed screen buffer.
        obs: VizdoomObs,
        /// Information extracted from the game variables.
        info: VizdoomInfo,
    },

    /// The simulator exposed no state, e.g., on the tick where an episode ends.
    Missing,
}

impl ScreenFrame {
    /// Preprocesses the state of the simulator, if any.
    pub fn from_state(state: Option<&GameState>) -> Result<Self> {
        match state {
            None => Ok(Self::Missing),
            Some(state) => {
                let obs = frame::preprocess(state.screen_buffer.view())?;
                let info = VizdoomInfo {
                    ammo: state.game_variables.first().copied(),
                };
                Ok(Self::Live { obs, info })
            }
        }
    }

    /// Returns `true` for [`ScreenFrame::Live`].
    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live { .. })
    }

    /// Collapses the frame into an observation of the fixed shape and its information.
    ///
    /// [`ScreenFrame::Missing`] becomes the all-zero observation and empty information.
    pub fn into_parts(self) -> (VizdoomObs, VizdoomInfo) {
        match self {
            Self::Live { obs, info } => (obs, info),
            Self::Missing => (VizdoomObs::zeros(), VizdoomInfo::default()),
        }
    }
}

/// A ViZDoom scenario with a fixed observation shape and a discrete action set.
///
/// The simulator is acquired in [`VizdoomEnv::with_game`] (or [`Env::build`]) and
/// released by [`Env::close`]. If the environment is dropped without being
/// closed, the simulator is closed in [`Drop`].
pub struct VizdoomEnv<G: DoomGame> {
    // Simulator
    game: G,

    // Number of discrete actions
    n_actions: usize,

    // Number of simulator tics per step
    frame_skip: u32,

    // If the simulator has been released
    closed: bool,
}

impl<G: DoomGame> VizdoomEnv<G> {
    /// Loads the scenario into the given simulator and starts it.
    ///
    /// Fails if the scenario cannot be loaded or the simulator cannot start.
    pub fn with_game(mut game: G, config: &VizdoomEnvConfig, seed: Option<i64>) -> Result<Self> {
        ensure!(config.n_actions > 0, "The action set must not be empty");
        ensure!(config.frame_skip > 0, "frame_skip must be positive");
        info!(
            "Initialize VizdoomEnv with scenario {}",
            config.scenario_path.display()
        );

        game.load_config(&config.scenario_path).with_context(|| {
            format!(
                "Failed to load scenario configuration {}",
                config.scenario_path.display()
            )
        })?;
        game.set_window_visible(config.render)?;
        if let Some(seed) = seed {
            game.set_seed(seed_u32(seed)?)?;
        }
        game.init().context("Failed to start the simulator")?;

        Ok(Self {
            game,
            n_actions: config.n_actions,
            frame_skip: config.frame_skip,
            closed: false,
        })
    }

    /// Returns the number of actions.
    pub fn n_actions(&self) -> usize {
        self.n_actions
    }

    /// Reads the current state of the simulator.
    pub fn screen_frame(&self) -> Result<ScreenFrame> {
        let state = self.game.state()?;
        ScreenFrame::from_state(state.as_ref())
    }
}

fn seed_u32(seed: i64) -> Result<u32> {
    u32::try_from(seed).with_context(|| format!("Seed {} is out of the range of u32", seed))
}

impl<G: DoomGame> Env for VizdoomEnv<G> {
    type Config = VizdoomEnvConfig;
    type Obs = VizdoomObs;
    type Act = VizdoomAct;
    type Info = VizdoomInfo;

    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized,
    {
        Self::with_game(G::create()?, config, Some(seed))
    }

    /// Starts a new episode. `options` is ignored.
    fn reset(
        &mut self,
        seed: Option<i64>,
        _options: Option<&Record>,
    ) -> Result<(VizdoomObs, VizdoomInfo)> {
        trace!("VizdoomEnv::reset()");
        ensure!(!self.closed, "The simulator has been closed");

        if let Some(seed) = seed {
            self.game.set_seed(seed_u32(seed)?)?;
        }
        self.game.new_episode()?;
        let (obs, _) = self.screen_frame()?.into_parts();

        Ok((obs, VizdoomInfo::default()))
    }

    /// Applies the action for `frame_skip` tics.
    ///
    /// # Panics
    ///
    /// Panics if the index of `act` is out of the action set.
    fn step(&mut self, act: &VizdoomAct) -> Result<(Step<Self>, Record)>
    where
        Self: Sized,
    {
        trace!("VizdoomEnv::step()");
        ensure!(!self.closed, "The simulator has been closed");

        let buttons = act.one_hot(self.n_actions);
        let reward = self.game.make_action(&buttons, self.frame_skip)?;
        let (obs, info) = self.screen_frame()?.into_parts();
        let is_terminated = self.game.is_episode_finished()?;
        let step = Step::new(obs, *act, reward as f32, is_terminated, false, info);

        Ok((step, Record::empty()))
    }

    fn close(&mut self) -> Result<()> {
        if self.closed {
            return Ok(());
        }
        self.closed = true;
        trace!("VizdoomEnv::close()");
        self.game.close()
    }
}

impl<G: DoomGame> Drop for VizdoomEnv<G> {
    fn drop(&mut self) {
        if let Err(e) = self.close() {
            warn!("Failed to close the simulator: {:?}", e);
        }
    }
}
