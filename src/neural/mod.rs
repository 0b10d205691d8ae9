pub mod activations;
pub mod optimizer;
pub mod utils;

use crate::prelude::*;
use std::sync::Arc;

use crate::matrix::{
    ops::{Dot, Outer, Transpose},
    Matrix1, Matrix2,
};
use rand::Rng;
use rand_distr::{Distribution, Normal};

use self::activations::{Activation, Activations};

/// A perceptron with a single hidden layer and no biases.
#[derive(Clone)]
pub struct NeuralNet {
    input_nodes: usize,
    hidden_nodes: usize,
    output_nodes: usize,
    /// hidden_nodes x input_nodes
    w_ih: Matrix2<f64>,
    /// output_nodes x hidden_nodes
    w_ho: Matrix2<f64>,
    learning_rate: f64,
    activation: Arc<dyn Activation + Send + Sync>,
}

/// Draws a `rows x cols` weight matrix from N(0, std_dev).
/// Entries are drawn column by column.
fn sample_weights<R: Rng + ?Sized>(
    rows: usize,
    cols: usize,
    std_dev: f64,
    rng: &mut R,
) -> Result<Matrix2<f64>> {
    let normal = Normal::new(0.0, std_dev)
        .map_err(|_| Error::ConfigErr("weight deviation must be finite"))?;

    let mut weights = Matrix2::new(rows, cols);
    for col in 0..cols {
        for row in 0..rows {
            weights[(row, col)] = normal.sample(rng);
        }
    }
    Ok(weights)
}

impl NeuralNet {
    /// Creates a network ready for training.
    ///
    /// Input-to-hidden weights are drawn from N(0, hidden_nodes^-0.5) and
    /// hidden-to-output weights from N(0, output_nodes^-0.5), in that order,
    /// from `rng`. The activation starts out as the logistic sigmoid.
    pub fn new<R: Rng + ?Sized>(
        input_nodes: usize,
        hidden_nodes: usize,
        output_nodes: usize,
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<Self> {
        if input_nodes == 0 || hidden_nodes == 0 || output_nodes == 0 {
            return Err(Error::ConfigErr("layer sizes must be positive"));
        }
        // also rejects NaN
        if !(learning_rate > 0.0 && learning_rate.is_finite()) {
            return Err(Error::ConfigErr("learning rate must be positive"));
        }

        let w_ih = sample_weights(
            hidden_nodes,
            input_nodes,
            (hidden_nodes as f64).powf(-0.5),
            rng,
        )?;
        let w_ho = sample_weights(
            output_nodes,
            hidden_nodes,
            (output_nodes as f64).powf(-0.5),
            rng,
        )?;

        Ok(Self {
            input_nodes,
            hidden_nodes,
            output_nodes,
            w_ih,
            w_ho,
            learning_rate,
            activation: Arc::new(Activations::Sigmoid),
        })
    }

    /// Throws away all learned state and initializes from scratch.
    /// On error the network is left untouched.
    pub fn reinitialize<R: Rng + ?Sized>(
        &mut self,
        input_nodes: usize,
        hidden_nodes: usize,
        output_nodes: usize,
        learning_rate: f64,
        rng: &mut R,
    ) -> Result<()> {
        *self = Self::new(input_nodes, hidden_nodes, output_nodes, learning_rate, rng)?;
        Ok(())
    }

    /// Swap the activation function used by both layers
    pub fn with_activation(mut self, activation: impl Activation + Send + Sync + 'static) -> Self {
        self.activation = Arc::new(activation);
        self
    }

    /// Runs the input through both layers, returning the hidden and final outputs.
    fn forward(&self, input: &Matrix1<f64>) -> Result<(Matrix1<f64>, Matrix1<f64>)> {
        if input.size() != self.input_nodes {
            return Err(Error::DimensionErr);
        }

        let hidden_out = self.activation.apply(&self.w_ih.dot(input)?);
        let final_out = self.activation.apply(&self.w_ho.dot(&hidden_out)?);
        Ok((hidden_out, final_out))
    }

    /// Output layer activations for a single input.
    pub fn predict(&self, input: &Matrix1<f64>) -> Result<Matrix1<f64>> {
        let (_, final_out) = self.forward(input)?;
        Ok(final_out)
    }

    /// One step of online gradient descent on a single (input, target) pair.
    ///
    /// The hidden error is the output error sent back through `w_ho` without
    /// the output derivative; each layer applies `out * (1 - out)` only when
    /// computing its own weight delta.
    pub fn train(&mut self, input: &Matrix1<f64>, target: &Matrix1<f64>) -> Result<()> {
        if target.size() != self.output_nodes {
            return Err(Error::DimensionErr);
        }
        let (hidden_out, final_out) = self.forward(input)?;

        let output_err = (target - &final_out)?;
        let hidden_err = self.w_ho.transpose().dot(&output_err)?;

        let rate = self.learning_rate;

        let output_grad = (&(&output_err * &final_out)? * &final_out.complement())?;
        let mut d_ho = output_grad.outer(&hidden_out);
        d_ho.apply(|x| rate * x);
        self.w_ho = (&self.w_ho + &d_ho)?;

        let hidden_grad = (&(&hidden_err * &hidden_out)? * &hidden_out.complement())?;
        let mut d_ih = hidden_grad.outer(input);
        d_ih.apply(|x| rate * x);
        self.w_ih = (&self.w_ih + &d_ih)?;

        Ok(())
    }

    /// Sum of squared differences between the prediction and the target
    pub fn squared_error(&self, input: &Matrix1<f64>, target: &Matrix1<f64>) -> Result<f64> {
        let output = self.predict(input)?;
        utils::squared_error(&output, target)
    }

    pub fn input_nodes(&self) -> usize {
        self.input_nodes
    }

    pub fn hidden_nodes(&self) -> usize {
        self.hidden_nodes
    }

    pub fn output_nodes(&self) -> usize {
        self.output_nodes
    }

    pub fn learning_rate(&self) -> f64 {
        self.learning_rate
    }

    /// Input-to-hidden weights, one row per hidden neuron
    pub fn weights_ih(&self) -> &Matrix2<f64> {
        &self.w_ih
    }

    /// Hidden-to-output weights, one row per output neuron
    pub fn weights_ho(&self) -> &Matrix2<f64> {
        &self.w_ho
    }
}
