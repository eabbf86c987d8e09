use serde::{Deserialize, Serialize};

/// A row-major matrix of `f32`.
///
/// Vectors are represented as matrices with a single column.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct Mat {
    pub data: Vec<f32>,
    pub shape: Vec<i32>,
}

impl Mat {
    /// Constructs a matrix of shape `(rows, cols)`.
    ///
    /// # Panics
    ///
    /// Panics if the length of `data` is not `rows * cols`.
    pub fn new(data: Vec<f32>, rows: usize, cols: usize) -> Self {
        assert_eq!(
            data.len(),
            rows * cols,
            "Matrix of shape {:?} cannot hold {} elements",
            (rows, cols),
            data.len()
        );
        Self {
            data,
            shape: vec![rows as i32, cols as i32],
        }
    }

    /// Converts pixels into a column vector with values in `[0, 1]`.
    pub fn from_pixels(pixels: &[u8]) -> Self {
        pixels
            .iter()
            .map(|&p| p as f32 / 255.0)
            .collect::<Vec<_>>()
            .into()
    }

    /// The number of rows.
    pub fn rows(&self) -> usize {
        self.shape[0] as usize
    }

    /// The number of columns.
    pub fn cols(&self) -> usize {
        self.shape[1] as usize
    }

    /// Returns `true` if the shape is two-dimensional and agrees with the data.
    pub fn is_valid(&self) -> bool {
        self.shape.len() == 2
            && self.shape.iter().all(|&d| d >= 0)
            && self.data.len() == self.rows() * self.cols()
    }

    pub fn matmul(&self, x: &Mat) -> Self {
        let (m, l, n) = (self.rows(), self.cols(), x.cols());
        if l != x.rows() {
            panic!(
                "Trying to multiply matrices of incompatible sizes: {:?}",
                (&self.shape, &x.shape)
            );
        }
        let mut data = vec![0.0f32; m * n];
        for i in 0..m {
            for j in 0..n {
                let kk = i * n + j;
                for k in 0..l {
                    data[kk] += self.data[i * l + k] * x.data[k * n + j];
                }
            }
        }

        Self {
            shape: vec![m as _, n as _],
            data,
        }
    }

    pub fn add(&self, x: &Mat) -> Self {
        if self.shape != x.shape {
            panic!(
                "Trying to add matrices of different sizes: {:?}",
                (&self.shape, &x.shape)
            );
        }

        let data = self
            .data
            .iter()
            .zip(x.data.iter())
            .map(|(a, b)| *a + *b)
            .collect();

        Mat {
            data,
            shape: self.shape.clone(),
        }
    }

    pub fn relu(&self) -> Self {
        let data = self.data.iter().map(|a| a.max(0.0)).collect();

        Self {
            data,
            shape: self.shape.clone(),
        }
    }

    /// Returns the index of the largest element.
    ///
    /// Ties are resolved to the lowest index. Returns `None` for an empty matrix.
    pub fn argmax(&self) -> Option<usize> {
        let mut best: Option<(usize, f32)> = None;
        for (i, &v) in self.data.iter().enumerate() {
            if best.map_or(true, |(_, b)| v > b) {
                best = Some((i, v));
            }
        }
        best.map(|(i, _)| i)
    }
}

impl From<Vec<f32>> for Mat {
    fn from(x: Vec<f32>) -> Self {
        let shape = vec![x.len() as i32, 1];
        Self { shape, data: x }
    }
}
