/// Error type for the digit network
#[derive(Debug, PartialEq, thiserror::Error)]
pub enum Error {
    /// Indicates some dimension is incorrect in a Matrix operation.
    #[error("incompatible dimensions in matrix operation")]
    DimensionErr,
    /// A layer size or learning rate the network can't be built with.
    #[error("invalid network configuration: {0}")]
    ConfigErr(&'static str),
    /// A class label with no slot in the target vector.
    #[error("label {label} out of range for {classes} classes")]
    LabelErr { label: usize, classes: usize },
    /// The training thread panicked or lost its channel to the GUI.
    #[error("training thread failed")]
    ThreadErr,
}

pub type Result<T> = std::result::Result<T, Error>;
