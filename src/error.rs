use thiserror::Error;

// Unified error type for gridfft

#[derive(Error, Debug)]
pub enum GridError {
    #[error("grid dimensions must be positive, got {0}x{1}x{2}")]
    InvalidShape(usize, usize, usize),
    #[error("grid of {0} pixels exceeds the 32-bit element count limit")]
    GridTooLarge(u64),
    #[error("split axis of {axis_len} does not divide evenly over {workers} workers")]
    IndivisiblePartition { axis_len: usize, workers: usize },
    #[error("shape mismatch: operand has {0} pixels, expected {1}")]
    ShapeMismatch(usize, usize),
    #[error("distributed FFT requires equal dimensions, got {0}x{1}x{2}")]
    UnequalDims(usize, usize, usize),
    #[error("no FFT plan has been created for this grid")]
    PlanMissing,
    #[error("unsupported operation: {0}")]
    Unsupported(&'static str),
}
