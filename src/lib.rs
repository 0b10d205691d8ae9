//! A single-hidden-layer perceptron trained by online gradient descent,
//! plus the pieces needed to feed it handwritten digits.

pub mod data;
pub mod matrix;
pub mod neural;
pub mod prelude;
pub mod viz;
