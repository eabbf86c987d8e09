//! Environment.
use super::{Act, Info, Obs, Step};
use crate::record::Record;
use anyhow::Result;

/// Represents an environment, typically an MDP.
///
/// An environment owns an external resource, such as a simulator process.
/// The resource is acquired in [`Env::build`] and released in [`Env::close`].
pub trait Env {
    /// Configurations.
    type Config: Clone;

    /// Observation of the environment.
    type Obs: Obs;

    /// Action of the environment.
    type Act: Act;

    /// Information in the [`Step`] object.
    type Info: Info;

    /// Builds an environment with a given random seed.
    fn build(config: &Self::Config, seed: i64) -> Result<Self>
    where
        Self: Sized;

    /// Starts a new episode and returns its first observation with empty information.
    ///
    /// If `seed` is given, it is applied before the episode starts.
    /// `options` carries environment specific settings; environments may ignore it.
    fn reset(
        &mut self,
        seed: Option<i64>,
        options: Option<&Record>,
    ) -> Result<(Self::Obs, Self::Info)>;

    /// Performes an environment step.
    ///
    /// The returned [`Record`] holds telemetry of the environment, if any.
    fn step(&mut self, a: &Self::Act) -> Result<(Step<Self>, Record)>
    where
        Self: Sized;

    /// Releases the resource held by the environment.
    ///
    /// Calling this method more than once has no effect after the first call.
    fn close(&mut self) -> Result<()>;
}
