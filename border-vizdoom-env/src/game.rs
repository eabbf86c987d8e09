//! Interface to the ViZDoom simulator.
#[cfg(feature = "py")]
mod py_game;
use anyhow::Result;
use ndarray::Array3;
#[cfg(feature = "py")]
pub use py_game::PyDoomGame;
use std::path::Path;

/// State of the simulator after a tick.
#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    /// Screen buffer in channel-first layout, `(3, height, width)`.
    pub screen_buffer: Array3<u8>,

    /// Values of `available_game_variables` of the scenario, in order.
    pub game_variables: Vec<f64>,
}

/// The simulator, as seen by [`VizdoomEnv`](crate::VizdoomEnv).
///
/// The methods follow `vizdoom.DoomGame`. The contents of the scenario
/// configuration are the concern of the implementor.
pub trait DoomGame {
    /// Creates a simulator which is not started yet.
    fn create() -> Result<Self>
    where
        Self: Sized;

    /// Loads the scenario configuration file.
    fn load_config(&mut self, path: &Path) -> Result<()>;

    /// Shows or hides the window of the simulator.
    fn set_window_visible(&mut self, visible: bool) -> Result<()>;

    /// Sets the seed of the random number generator of the simulator.
    fn set_seed(&mut self, seed: u32) -> Result<()>;

    /// Starts the simulator.
    fn init(&mut self) -> Result<()>;

    /// Starts a new episode.
    fn new_episode(&mut self) -> Result<()>;

    /// Returns the current state, or `None` if the simulator exposes none.
    fn state(&self) -> Result<Option<GameState>>;

    /// Applies the buttons for `tics` tics and returns the accumulated reward.
    fn make_action(&mut self, buttons: &[u8], tics: u32) -> Result<f64>;

    /// Returns `true` if the current episode has finished.
    fn is_episode_finished(&self) -> Result<bool>;

    /// Stops the simulator.
    fn close(&mut self) -> Result<()>;
}
