//! Conversion of simulator screen buffers into observations.
//!
//! The policies evaluated on [`VizdoomEnv`](crate::VizdoomEnv) were trained on
//! frames converted by OpenCV, with `cv2.cvtColor(frame, cv2.COLOR_BGR2GRAY)`
//! followed by `cv2.resize(gray, (160, 100), interpolation=cv2.INTER_CUBIC)`.
//! A different grayscale weighting or interpolation does not crash anything but
//! silently shifts the input distribution of the policy. This module therefore
//! reproduces the arithmetic of OpenCV instead of using the filters of
//! the `image` crate:
//!
//! * Grayscale: `Y = (c0 * 1868 + c1 * 9617 + c2 * 4899 + 2^13) >> 14`, where
//!   channel 0 is weighted as blue.
//! * Resize: bicubic kernel with `A = -0.75`, pixel-centre mapping, replicated
//!   borders and 11-bit fixed-point coefficients. The horizontal pass sums in
//!   `i32`. The vertical pass follows the vectorised 8-bit path of OpenCV on
//!   x86 builds without FMA: the row sums are converted to `f32`, weighted by
//!   `beta * 2^-22` with separate multiplications and additions, rounded half to
//!   even and saturated to `u8`.
//!
//! The conversion is a pure function of the input frame.
use crate::{VizdoomObs, OBS_HEIGHT, OBS_WIDTH};
use border_core::error::BorderError;
use image::{GrayImage, Luma};
use ndarray::ArrayView3;

const GRAY_SHIFT: u32 = 14;
const B2Y: u32 = 1868;
const G2Y: u32 = 9617;
const R2Y: u32 = 4899;

const COEF_BITS: u32 = 11;
const COEF_SCALE: f32 = (1 << COEF_BITS) as f32;

/// Converts a channel-first frame of shape `(3, height, width)` into an observation.
///
/// The axes are reordered to channel-last, the frame is converted to grayscale,
/// resized to [`OBS_WIDTH`] × [`OBS_HEIGHT`] and reshaped to
/// [`OBS_SHAPE`](crate::OBS_SHAPE).
pub fn preprocess(frame: ArrayView3<u8>) -> Result<VizdoomObs, BorderError> {
    let (c, h, w) = frame.dim();
    if c != 3 {
        return Err(BorderError::InvalidFrame(format!(
            "expected a channel-first frame with 3 channels, got shape {:?}",
            frame.shape()
        )));
    }
    if h == 0 || w == 0 {
        return Err(BorderError::InvalidFrame(format!(
            "empty frame of shape {:?}",
            frame.shape()
        )));
    }

    let gray = grayscale(frame.permuted_axes([1, 2, 0]));
    let resized = resize_cubic(&gray, OBS_WIDTH as u32, OBS_HEIGHT as u32);
    VizdoomObs::from_pixels(resized.into_raw())
}

/// Converts a channel-last frame of shape `(height, width, 3)` into grayscale.
///
/// The frame must have at least 3 channels.
fn grayscale(frame: ArrayView3<u8>) -> GrayImage {
    let (h, w, _) = frame.dim();
    GrayImage::from_fn(w as u32, h as u32, |x, y| {
        let (x, y) = (x as usize, y as usize);
        let c0 = frame[[y, x, 0]] as u32;
        let c1 = frame[[y, x, 1]] as u32;
        let c2 = frame[[y, x, 2]] as u32;
        let v = (c0 * B2Y + c1 * G2Y + c2 * R2Y + (1 << (GRAY_SHIFT - 1))) >> GRAY_SHIFT;
        Luma([v as u8])
    })
}

/// Resizes a grayscale image with bicubic interpolation.
///
/// An image which already has the requested size is returned unchanged.
/// Neither image may be empty.
fn resize_cubic(img: &GrayImage, width: u32, height: u32) -> GrayImage {
    let (src_w, src_h) = img.dimensions();
    if (src_w, src_h) == (width, height) {
        return img.clone();
    }

    let src = img.as_raw();
    let src_w = src_w as usize;
    let x_taps = taps(src_w, width as usize);
    let y_taps = taps(src_h as usize, height as usize);

    // Horizontal pass over every source row
    let rows: Vec<Vec<i32>> = src
        .chunks_exact(src_w)
        .map(|row| {
            x_taps
                .iter()
                .map(|(ixs, alpha)| {
                    ixs.iter()
                        .zip(alpha.iter())
                        .map(|(&ix, &a)| row[ix] as i32 * a)
                        .sum::<i32>()
                })
                .collect()
        })
        .collect();

    // Vertical pass, evaluated as b0 * s0 + (b1 * s1 + (b2 * s2 + b3 * s3))
    let scale = 1.0 / (COEF_SCALE * COEF_SCALE);
    GrayImage::from_fn(width, height, |x, y| {
        let (ixs, beta) = &y_taps[y as usize];
        let v = ixs
            .iter()
            .zip(beta.iter())
            .rev()
            .fold(0f32, |acc, (&iy, &b)| {
                rows[iy][x as usize] as f32 * (b as f32 * scale) + acc
            });
        Luma([v.round_ties_even().clamp(0.0, 255.0) as u8])
    })
}

/// Source indices and fixed-point weights of the four taps of each destination pixel.
fn taps(src_len: usize, dst_len: usize) -> Vec<([usize; 4], [i32; 4])> {
    let scale = 1.0 / (dst_len as f64 / src_len as f64);
    let max = src_len as i64 - 1;

    (0..dst_len)
        .map(|d| {
            let f = ((d as f64 + 0.5) * scale - 0.5) as f32;
            let s = f.floor();
            let coeffs = cubic_coeffs(f - s);
            let s = s as i64;
            let mut ixs = [0usize; 4];
            for (k, ix) in ixs.iter_mut().enumerate() {
                *ix = (s - 1 + k as i64).clamp(0, max) as usize;
            }
            (ixs, coeffs)
        })
        .collect()
}

fn cubic_coeffs(x: f32) -> [i32; 4] {
    const A: f32 = -0.75;
    let c0 = ((A * (x + 1.0) - 5.0 * A) * (x + 1.0) + 8.0 * A) * (x + 1.0) - 4.0 * A;
    let c1 = ((A + 2.0) * x - (A + 3.0)) * x * x + 1.0;
    let c2 = ((A + 2.0) * (1.0 - x) - (A + 3.0)) * (1.0 - x) * (1.0 - x) + 1.0;
    let c3 = 1.0 - c0 - c1 - c2;
    [c0, c1, c2, c3].map(|c| {
        (c * COEF_SCALE)
            .round_ties_even()
            .clamp(i16::MIN as f32, i16::MAX as f32) as i32
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::OBS_SHAPE;
    use ndarray::{Array3, ArrayView2, Axis};

    fn channel_first(h: usize, w: usize, f: impl Fn(usize, usize, usize) -> u8) -> Array3<u8> {
        Array3::from_shape_fn((3, h, w), |(c, y, x)| f(c, y, x))
    }

    #[test]
    fn test_grayscale_weights() {
        let frame = Array3::from_shape_vec(
            (1, 5, 3),
            vec![255, 0, 0, 0, 255, 0, 0, 0, 255, 255, 255, 255, 0, 0, 0],
        )
        .unwrap();
        let gray = grayscale(frame.view());

        // Channel 0 is weighted as blue, channel 2 as red
        assert_eq!(gray.as_raw(), &vec![29, 150, 76, 255, 0]);
    }

    #[test]
    fn test_cubic_coeffs_at_half_pixel() {
        assert_eq!(cubic_coeffs(0.5), [-192, 1216, 1216, -192]);
        assert_eq!(cubic_coeffs(0.0), [0, 2048, 0, 0]);
    }

    #[test]
    fn test_resize_ramp_downscale() {
        let img = GrayImage::from_raw(8, 1, vec![0, 10, 20, 30, 40, 50, 60, 70]).unwrap();
        let resized = resize_cubic(&img, 4, 1);

        assert_eq!(resized.as_raw(), &vec![4, 25, 45, 66]);
    }

    #[test]
    fn test_resize_rounds_half_to_even() {
        // Each output is the mean of the two inputs
        let img = GrayImage::from_raw(2, 1, vec![0, 5]).unwrap();
        assert_eq!(resize_cubic(&img, 1, 1).as_raw(), &vec![2]);

        let img = GrayImage::from_raw(2, 1, vec![0, 7]).unwrap();
        assert_eq!(resize_cubic(&img, 1, 1).as_raw(), &vec![4]);
    }

    #[test]
    fn test_resize_same_size_is_identity() {
        let img = GrayImage::from_fn(7, 5, |x, y| Luma([(x * 31 + y * 17) as u8]));
        assert_eq!(resize_cubic(&img, 7, 5), img);
    }

    #[test]
    fn test_constant_frame_stays_constant() -> Result<(), BorderError> {
        let frame = channel_first(240, 320, |_, _, _| 137);
        let obs = preprocess(frame.view())?;

        assert_eq!(obs.shape(), &OBS_SHAPE);
        assert!(obs.as_ref().iter().all(|&p| p == 137));
        Ok(())
    }

    #[test]
    fn test_axes_are_moved_to_channel_last() -> Result<(), BorderError> {
        // Only the first channel is lit
        let frame = channel_first(240, 320, |c, _, _| if c == 0 { 255 } else { 0 });
        let obs = preprocess(frame.view())?;

        assert!(obs.as_ref().iter().all(|&p| p == 29));
        Ok(())
    }

    #[test]
    fn test_preprocess_is_deterministic() -> Result<(), BorderError> {
        let frame = channel_first(240, 320, |c, y, x| ((x * 7 + y * 13 + c * 101) % 256) as u8);
        let obs1 = preprocess(frame.view())?;
        let obs2 = preprocess(frame.view())?;

        assert_eq!(obs1.shape(), &OBS_SHAPE);
        assert_eq!(obs1.as_ref(), obs2.as_ref());
        Ok(())
    }

    #[test]
    fn test_vertical_edge_keeps_saturated_borders() -> Result<(), BorderError> {
        // Left half black, right half white
        let frame = channel_first(240, 320, |_, _, x| if x < 160 { 0 } else { 255 });
        let obs = preprocess(frame.view())?;
        let view = obs.view();
        let pixels: ArrayView2<u8> = view.index_axis(Axis(2), 0);

        for row in pixels.rows() {
            assert_eq!(row[0], 0);
            assert_eq!(row[OBS_WIDTH / 4], 0);
            assert_eq!(row[3 * OBS_WIDTH / 4], 255);
            assert_eq!(row[OBS_WIDTH - 1], 255);
        }
        Ok(())
    }

    #[test]
    fn test_rejects_channel_last_and_empty_frames() {
        let frame = Array3::<u8>::zeros((240, 320, 3));
        assert!(matches!(
            preprocess(frame.view()),
            Err(BorderError::InvalidFrame(_))
        ));

        let frame = Array3::<u8>::zeros((3, 0, 320));
        assert!(preprocess(frame.view()).is_err());
    }
}
