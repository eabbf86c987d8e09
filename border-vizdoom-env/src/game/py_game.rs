use super::{DoomGame, GameState};
use anyhow::{anyhow, bail, Result};
use log::{info, trace};
use numpy::{PyArray1, PyArray3};
use pyo3::{PyObject, Python, ToPyObject};
use std::path::Path;

/// [`DoomGame`] backed by `vizdoom.DoomGame` of the `vizdoom` Python package.
pub struct PyDoomGame {
    game: PyObject,
}

impl std::fmt::Debug for PyDoomGame {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PyDoomGame").finish()
    }
}

impl PyDoomGame {
    fn call0(&self, name: &str) -> Result<PyObject> {
        trace!("DoomGame.{}()", name);
        Python::with_gil(|py| Ok(self.game.call_method0(py, name)?))
    }
}

impl DoomGame for PyDoomGame {
    fn create() -> Result<Self> {
        Python::with_gil(|py| {
            let vizdoom = py.import("vizdoom")?;
            let version: String = vizdoom
                .getattr("__version__")
                .and_then(|v| v.extract())
                .unwrap_or_else(|_| "unknown".to_string());
            info!("Initialize vizdoom.DoomGame (vizdoom {})", version);
            let game = vizdoom.getattr("DoomGame")?.call0()?;
            Ok(Self {
                game: game.to_object(py),
            })
        })
    }

    fn load_config(&mut self, path: &Path) -> Result<()> {
        let path_str = path
            .to_str()
            .ok_or_else(|| anyhow!("Scenario path is not valid UTF-8: {:?}", path))?;
        trace!("DoomGame.load_config({})", path_str);
        Python::with_gil(|py| {
            let ret = self.game.call_method1(py, "load_config", (path_str,))?;
            // Older versions of vizdoom return `False` instead of raising an exception
            if let Ok(false) = ret.extract::<bool>(py) {
                bail!("vizdoom could not load {}", path_str);
            }
            Ok(())
        })
    }

    fn set_window_visible(&mut self, visible: bool) -> Result<()> {
        Python::with_gil(|py| {
            self.game
                .call_method1(py, "set_window_visible", (visible,))?;
            Ok(())
        })
    }

    fn set_seed(&mut self, seed: u32) -> Result<()> {
        Python::with_gil(|py| {
            self.game.call_method1(py, "set_seed", (seed,))?;
            Ok(())
        })
    }

    fn init(&mut self) -> Result<()> {
        self.call0("init")?;
        Ok(())
    }

    fn new_episode(&mut self) -> Result<()> {
        self.call0("new_episode")?;
        Ok(())
    }

    fn state(&self) -> Result<Option<GameState>> {
        Python::with_gil(|py| {
            let state = self.game.call_method0(py, "get_state")?;
            if state.is_none(py) {
                return Ok(None);
            }

            let screen_buffer = state.getattr(py, "screen_buffer")?;
            let screen_buffer: &PyArray3<u8> = screen_buffer.extract(py)?;
            let screen_buffer = screen_buffer.to_owned_array();

            let game_variables = state.getattr(py, "game_variables")?;
            let game_variables = if game_variables.is_none(py) {
                vec![]
            } else {
                let game_variables: &PyArray1<f64> = game_variables.extract(py)?;
                game_variables.to_owned_array().to_vec()
            };

            Ok(Some(GameState {
                screen_buffer,
                game_variables,
            }))
        })
    }

    fn make_action(&mut self, buttons: &[u8], tics: u32) -> Result<f64> {
        trace!("DoomGame.make_action({:?}, {})", buttons, tics);
        Python::with_gil(|py| {
            let reward = self
                .game
                .call_method1(py, "make_action", (buttons.to_vec(), tics))?;
            Ok(reward.extract(py)?)
        })
    }

    fn is_episode_finished(&self) -> Result<bool> {
        Python::with_gil(|py| {
            let finished = self.game.call_method0(py, "is_episode_finished")?;
            Ok(finished.extract(py)?)
        })
    }

    fn close(&mut self) -> Result<()> {
        self.call0("close")?;
        Ok(())
    }
}
