use crate::Mat;
use anyhow::{ensure, Result};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
/// Multilayer perceptron with ReLU activation function.
///
/// The output layer is linear.
pub struct Mlp {
    /// Weights of layers.
    ws: Vec<Mat>,

    /// Biases of layers.
    bs: Vec<Mat>,
}

impl Mlp {
    /// Constructs an MLP from the weights and biases of its layers.
    ///
    /// The weight of a layer has shape `(out, in)`, its bias `(out, 1)`.
    pub fn new(ws: Vec<Mat>, bs: Vec<Mat>) -> Result<Self> {
        let mlp = Self { ws, bs };
        mlp.validate()?;
        Ok(mlp)
    }

    /// Checks that the layers are non-empty and chained consistently.
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.ws.is_empty(), "MLP has no layers");
        ensure!(
            self.ws.len() == self.bs.len(),
            "MLP has {} weights but {} biases",
            self.ws.len(),
            self.bs.len()
        );
        for (i, (w, b)) in self.ws.iter().zip(self.bs.iter()).enumerate() {
            ensure!(w.is_valid() && b.is_valid(), "Layer {} has a malformed matrix", i);
            ensure!(
                b.rows() == w.rows() && b.cols() == 1,
                "Bias of layer {} has shape {:?}, expected {:?}",
                i,
                b.shape,
                [w.rows(), 1]
            );
            if i > 0 {
                let prev = &self.ws[i - 1];
                ensure!(
                    w.cols() == prev.rows(),
                    "Layer {} expects {} inputs, but layer {} has {} outputs",
                    i,
                    w.cols(),
                    i - 1,
                    prev.rows()
                );
            }
        }
        Ok(())
    }

    /// The number of inputs.
    pub fn input_dim(&self) -> usize {
        self.ws[0].cols()
    }

    /// The number of outputs.
    pub fn output_dim(&self) -> usize {
        self.ws[self.ws.len() - 1].rows()
    }

    pub fn forward(&self, x: &Mat) -> Mat {
        let n_layers = self.ws.len();
        let mut x = x.clone();
        for i in 0..n_layers {
            x = self.ws[i].matmul(&x).add(&self.bs[i]);
            if i != n_layers - 1 {
                x = x.relu();
            }
        }
        x
    }
}
