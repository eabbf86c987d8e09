//! Action for [`VizdoomEnv`](crate::VizdoomEnv).
use border_core::Act;
use std::fmt;

/// Action for [`VizdoomEnv`](crate::VizdoomEnv), an index into the discrete action set.
///
/// In the `basic` scenario the action set is MOVE_LEFT, MOVE_RIGHT and ATTACK,
/// in the order of `available_buttons` in the scenario configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VizdoomAct {
    act: usize,
}

impl VizdoomAct {
    /// Moves to the left.
    pub const MOVE_LEFT: Self = Self { act: 0 };

    /// Moves to the right.
    pub const MOVE_RIGHT: Self = Self { act: 1 };

    /// Fires the weapon.
    pub const ATTACK: Self = Self { act: 2 };

    /// Constructs an action from its index.
    pub fn new(act: usize) -> Self {
        Self { act }
    }

    /// Returns the index of the action.
    pub fn index(&self) -> usize {
        self.act
    }

    /// Returns the one-hot button vector of length `n_actions` sent to the simulator.
    ///
    /// # Panics
    ///
    /// Panics if the index is not smaller than `n_actions`. Policies are expected
    /// to emit actions of the declared action space only.
    pub fn one_hot(&self, n_actions: usize) -> Vec<u8> {
        assert!(
            self.act < n_actions,
            "action index {} is out of range for {} actions",
            self.act,
            n_actions
        );
        let mut buttons = vec![0u8; n_actions];
        buttons[self.act] = 1;
        buttons
    }
}

impl Act for VizdoomAct {}

impl From<usize> for VizdoomAct {
    fn from(act: usize) -> Self {
        Self { act }
    }
}

impl fmt::Display for VizdoomAct {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.act)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_hot_selects_single_button() {
        let vectors: Vec<Vec<u8>> = (0..3).map(|i| VizdoomAct::new(i).one_hot(3)).collect();

        assert_eq!(vectors[0], vec![1, 0, 0]);
        assert_eq!(vectors[1], vec![0, 1, 0]);
        assert_eq!(vectors[2], vec![0, 0, 1]);
        for (i, v) in vectors.iter().enumerate() {
            assert_eq!(v.iter().map(|&b| b as usize).sum::<usize>(), 1);
            for (j, w) in vectors.iter().enumerate() {
                if i != j {
                    assert!(v.iter().zip(w.iter()).all(|(a, b)| a * b == 0));
                }
            }
        }
    }

    #[test]
    fn test_named_actions() {
        assert_eq!(VizdoomAct::MOVE_LEFT, VizdoomAct::from(0));
        assert_eq!(VizdoomAct::MOVE_RIGHT.index(), 1);
        assert_eq!(VizdoomAct::ATTACK.to_string(), "2");
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn test_out_of_range_panics() {
        let _ = VizdoomAct::new(3).one_hot(3);
    }
}
