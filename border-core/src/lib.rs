#![warn(missing_docs)]
//! Core traits of Border and the real-time evaluation loop.
//!
//! An environment ([`Env`]) emits observations ([`Obs`]), a policy ([`Policy`])
//! maps each observation to an action ([`Act`]), and the environment turns the
//! action into a [`Step`]. [`RealtimeEvaluator`] drives this cycle at a
//! bounded frame rate until its [`CancellationToken`] is cancelled.
pub mod error;
pub mod record;

mod base;
pub use base::{Act, Env, Info, Obs, Policy, Step};

mod cancel;
pub use cancel::CancellationToken;

mod evaluator;
pub use evaluator::{Evaluator, RealtimeEvaluator, RealtimeEvaluatorConfig, RunState};
