use crate::matrix::Matrix1;

pub trait Activation {
    /// Returns activation function at x
    fn call(&self, x: f64) -> f64;

    /// Applies the activation to every element of a layer's input
    fn apply(&self, layer: &Matrix1<f64>) -> Matrix1<f64> {
        Matrix1::from_vec(layer.iter().map(|&x| self.call(x)).collect())
    }
}

#[derive(Debug, Clone, Copy)]
pub enum Activations {
    Sigmoid,
    ReLU,
}

impl Activation for Activations {
    fn call(&self, x: f64) -> f64 {
        use Activations::*;
        match self {
            Sigmoid => 1.0 / (1.0 + (-x).exp()),
            ReLU => x.max(0.0),
        }
    }
}

impl<F> Activation for F
where
    F: Fn(f64) -> f64,
{
    fn call(&self, x: f64) -> f64 {
        self(x)
    }
}
