use crate::{Mat, Mlp};
use anyhow::{Context, Result};
use border_core::{error::BorderError, Env, Policy};
use log::info;
use std::{
    fs::File,
    io::{BufReader, BufWriter, Write},
    path::Path,
};

/// A deterministic policy choosing the action with the largest output of an [`Mlp`].
///
/// Observations are flattened pixels, scaled into `[0, 1]` before the forward pass.
/// Ties between outputs are resolved to the lowest action index.
#[derive(Clone, Debug)]
pub struct DiscreteMlpPolicy {
    mlp: Mlp,
}

impl DiscreteMlpPolicy {
    /// Constructs the policy.
    pub fn new(mlp: Mlp) -> Self {
        Self { mlp }
    }

    /// Loads the policy from a bincode artifact of an [`Mlp`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path)
            .with_context(|| format!("Failed to open model file {}", path.display()))?;
        let mlp: Mlp = bincode::deserialize_from(BufReader::new(file))
            .with_context(|| format!("Failed to deserialize model file {}", path.display()))?;
        mlp.validate()
            .with_context(|| format!("Invalid model in {}", path.display()))?;
        info!("Loaded model from {}", path.display());
        Ok(Self { mlp })
    }

    /// Saves the policy as a bincode artifact.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = File::create(path)
            .with_context(|| format!("Failed to create model file {}", path.display()))?;
        let mut writer = BufWriter::new(file);
        bincode::serialize_into(&mut writer, &self.mlp)?;
        writer.flush()?;
        info!("Saved model to {}", path.display());
        Ok(())
    }

    /// The number of actions.
    pub fn n_actions(&self) -> usize {
        self.mlp.output_dim()
    }

    /// Fails unless the policy takes observations of `dim` elements.
    pub fn check_input_dim(&self, dim: usize) -> Result<(), BorderError> {
        let expected = self.mlp.input_dim();
        if expected != dim {
            return Err(BorderError::PolicyInputMismatch {
                expected,
                actual: dim,
            });
        }
        Ok(())
    }

    /// Returns the index of the action for the given pixels.
    ///
    /// # Panics
    ///
    /// Panics if the number of pixels differs from the input size of the MLP.
    pub fn act(&self, pixels: &[u8]) -> usize {
        if let Err(e) = self.check_input_dim(pixels.len()) {
            panic!("{}", e);
        }
        let y = self.mlp.forward(&Mat::from_pixels(pixels));
        y.argmax().unwrap_or(0)
    }
}

impl<E> Policy<E> for DiscreteMlpPolicy
where
    E: Env,
    E::Obs: AsRef<[u8]>,
    E::Act: From<usize>,
{
    fn sample(&mut self, obs: &E::Obs) -> E::Act {
        self.act(obs.as_ref()).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    // Two inputs, three actions
    fn policy() -> Result<DiscreteMlpPolicy> {
        let mlp = Mlp::new(
            vec![Mat::new(vec![1.0, 0.0, 0.0, 1.0, 0.5, 0.5], 3, 2)],
            vec![vec![0.0, 0.0, 0.0].into()],
        )?;
        Ok(DiscreteMlpPolicy::new(mlp))
    }

    #[test]
    fn test_act_picks_largest_output() -> Result<()> {
        let policy = policy()?;
        assert_eq!(policy.n_actions(), 3);
        assert_eq!(policy.act(&[255, 0]), 0);
        assert_eq!(policy.act(&[0, 255]), 1);
        assert_eq!(policy.act(&[100, 100]), 0);
        Ok(())
    }

    #[test]
    fn test_save_and_load() -> Result<()> {
        let dir = TempDir::new("discrete_mlp_policy")?;
        let path = dir.path().join("mlp.bincode");
        let policy = policy()?;
        policy.save(&path)?;

        let loaded = DiscreteMlpPolicy::load(&path)?;
        assert_eq!(loaded.mlp, policy.mlp);
        Ok(())
    }

    #[test]
    fn test_load_fails_on_missing_or_corrupt_file() -> Result<()> {
        let dir = TempDir::new("discrete_mlp_policy")?;
        let path = dir.path().join("missing.bincode");
        let err = DiscreteMlpPolicy::load(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to open model file"));

        let path = dir.path().join("corrupt.bincode");
        std::fs::write(&path, b"not a model")?;
        assert!(DiscreteMlpPolicy::load(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_check_input_dim() -> Result<()> {
        let policy = policy()?;
        assert!(policy.check_input_dim(2).is_ok());
        assert!(matches!(
            policy.check_input_dim(16000),
            Err(BorderError::PolicyInputMismatch {
                expected: 2,
                actual: 16000
            })
        ));
        Ok(())
    }

    #[test]
    #[should_panic(expected = "Policy expects 2 inputs")]
    fn test_act_panics_on_input_mismatch() {
        let policy = policy().unwrap();
        let _ = policy.act(&[0, 0, 0]);
    }
}
