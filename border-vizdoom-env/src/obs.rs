//! Observation of [`VizdoomEnv`](crate::VizdoomEnv).
use border_core::{error::BorderError, Obs};
use ndarray::{Array3, ArrayView3};
use std::convert::TryFrom;

/// Height of an observation in pixels.
pub const OBS_HEIGHT: usize = 100;

/// Width of an observation in pixels.
pub const OBS_WIDTH: usize = 160;

/// Number of channels of an observation.
pub const OBS_CHANNELS: usize = 1;

/// Shape of an observation, `(height, width, channels)`.
pub const OBS_SHAPE: [usize; 3] = [OBS_HEIGHT, OBS_WIDTH, OBS_CHANNELS];

/// Number of pixels in an observation.
pub const OBS_LEN: usize = OBS_HEIGHT * OBS_WIDTH * OBS_CHANNELS;

/// A grayscale image of shape [`OBS_SHAPE`] with `u8` samples.
///
/// The shape is checked on construction and the pixels cannot be modified
/// afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct VizdoomObs {
    // Always in standard (row-major) layout
    frame: Array3<u8>,
}

impl VizdoomObs {
    /// Returns the all-zero observation, used when the simulator has no screen to show.
    pub fn zeros() -> Self {
        Self {
            frame: Array3::zeros((OBS_HEIGHT, OBS_WIDTH, OBS_CHANNELS)),
        }
    }

    /// Constructs an observation from row-major pixels.
    pub fn from_pixels(pixels: Vec<u8>) -> Result<Self, BorderError> {
        let frame = Array3::from_shape_vec((OBS_HEIGHT, OBS_WIDTH, OBS_CHANNELS), pixels)
            .map_err(|e| BorderError::InvalidFrame(e.to_string()))?;
        Ok(Self { frame })
    }

    /// Returns the shape of the observation.
    pub fn shape(&self) -> &[usize] {
        self.frame.shape()
    }

    /// Returns a view of the pixels.
    pub fn view(&self) -> ArrayView3<u8> {
        self.frame.view()
    }
}

impl Obs for VizdoomObs {}

impl AsRef<[u8]> for VizdoomObs {
    /// Returns the pixels in row-major order.
    fn as_ref(&self) -> &[u8] {
        self.frame
            .as_slice()
            .expect("observations are always in standard layout")
    }
}

impl TryFrom<Array3<u8>> for VizdoomObs {
    type Error = BorderError;

    fn try_from(frame: Array3<u8>) -> Result<Self, Self::Error> {
        if frame.shape() != OBS_SHAPE {
            return Err(BorderError::InvalidFrame(format!(
                "expected an observation of shape {:?}, got {:?}",
                OBS_SHAPE,
                frame.shape()
            )));
        }
        Ok(Self {
            frame: frame.as_standard_layout().into_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zeros_has_declared_shape() {
        let obs = VizdoomObs::zeros();
        assert_eq!(obs.shape(), &OBS_SHAPE);
        assert_eq!(obs.as_ref().len(), OBS_LEN);
        assert!(obs.as_ref().iter().all(|&p| p == 0));
    }

    #[test]
    fn test_rejects_other_shapes() {
        assert!(VizdoomObs::from_pixels(vec![0; OBS_LEN - 1]).is_err());
        assert!(VizdoomObs::try_from(Array3::<u8>::zeros((160, 100, 1))).is_err());
        assert!(VizdoomObs::try_from(Array3::<u8>::zeros((100, 160, 1))).is_ok());
    }
}
