//! ViZDoom environment for [`Border`](https://crates.io/crates/border).
//!
//! [`VizdoomEnv`] presents a ViZDoom scenario through a fixed observation and
//! action contract:
//!
//! * Observations are grayscale images of 100 × 160 × 1 pixels ([`VizdoomObs`]).
//!   Screen buffers of the simulator are converted with [`frame::preprocess`].
//!   When the simulator exposes no state, typically on the tick where an
//!   episode ends, an all-zero observation is returned instead.
//! * Actions are indices into a small discrete set ([`VizdoomAct`]), MOVE_LEFT,
//!   MOVE_RIGHT and ATTACK in the `basic` scenario. They are sent to the
//!   simulator as one-hot button vectors, with a frame skip of 4 tics.
//!
//! The simulator is accessed through the [`DoomGame`] trait. With feature `py`,
//! [`PyDoomGame`] drives the `vizdoom` Python package, which has to be importable
//! from the Python interpreter linked by `pyo3`:
//!
//! ```bash
//! pip install vizdoom
//! ```
//!
//! The scenario must use the `CRCGCB` screen format, so that screen buffers are
//! channel-first.
//!
//! Here is an example of playing the `basic` scenario with a policy attacking at every tick.
//!
//! ```no_run
//! # #[cfg(feature = "py")]
//! # fn main() -> anyhow::Result<()> {
//! use border_core::{CancellationToken, Env as _, Evaluator as _, Policy, RealtimeEvaluator};
//! use border_vizdoom_env::{PyDoomGame, VizdoomAct, VizdoomEnv, VizdoomEnvConfig, VizdoomObs};
//!
//! type Env = VizdoomEnv<PyDoomGame>;
//!
//! struct AttackPolicy;
//!
//! impl Policy<Env> for AttackPolicy {
//!     fn sample(&mut self, _: &VizdoomObs) -> VizdoomAct {
//!         VizdoomAct::ATTACK
//!     }
//! }
//!
//! let env_config = VizdoomEnvConfig::default()
//!     .scenario_path("scenarios/basic.cfg")
//!     .render(true);
//! let token = CancellationToken::new();
//! let mut evaluator =
//!     RealtimeEvaluator::<Env>::build(&env_config, &Default::default(), 0, token)?;
//! let _ = evaluator.evaluate(&mut AttackPolicy)?;
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "py"))]
//! # fn main() {}
//! ```
mod act;
mod env;
pub mod frame;
mod game;
mod obs;
pub mod util;
pub use act::VizdoomAct;
pub use env::{ScreenFrame, VizdoomEnv, VizdoomEnvConfig, VizdoomInfo};
pub use game::{DoomGame, GameState};
#[cfg(feature = "py")]
pub use game::PyDoomGame;
pub use obs::{VizdoomObs, OBS_CHANNELS, OBS_HEIGHT, OBS_LEN, OBS_SHAPE, OBS_WIDTH};
