use thiserror::Error;

/// Scheduling mode of the kernel's inner loops.
///
/// `Parallel` provisions multipliers for the whole matrix product at once,
/// `Serial` time-shares a smaller bank per input index. The mode only affects
/// the advisory multiplier ceiling handed to the product strategy, never the
/// computed values.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum IoMode {
    Serial,
    Parallel,
}

/// Compile-time parameter bundle of one dense-layer instance.
///
/// Supplied by the composing code per layer and fixed for the kernel's
/// lifetime. `validate` is run once when a layer is constructed; a kernel
/// never re-checks dimensions at inference time.
#[derive(Copy, Clone, Debug)]
pub struct DenseConfig {
    /// Number of input scalars per invocation.
    pub n_in: usize,
    /// Number of output scalars per invocation.
    pub n_out: usize,
    /// Scalars per packed element on the input channel.
    pub input_pack: usize,
    /// Scalars per packed element on the output channel.
    pub output_pack: usize,
    /// Cycles over which one physical multiplier is time-shared.
    pub reuse_factor: usize,
    /// Statically known count of zero weights, credited against the
    /// multiplier ceiling.
    pub n_zeros: usize,
    pub io_mode: IoMode,
}

impl DenseConfig {
    /// Creates a bundle with unpacked I/O, no reuse and no sparsity credit.
    pub fn new(n_in: usize, n_out: usize) -> DenseConfig {
        DenseConfig {
            n_in,
            n_out,
            input_pack: 1,
            output_pack: 1,
            reuse_factor: 1,
            n_zeros: 0,
            io_mode: IoMode::Parallel,
        }
    }

    /// Number of packed elements read from the input channel per invocation.
    pub fn num_input_packs(&self) -> usize {
        self.n_in / self.input_pack
    }

    /// Number of packed elements written to the output channel per invocation.
    pub fn num_output_packs(&self) -> usize {
        self.n_out / self.output_pack
    }

    /// Checks the invariants the kernel loops rely on.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.n_in == 0 {
            return Err(ConfigError::InputWidthZero);
        }
        if self.n_out == 0 {
            return Err(ConfigError::OutputWidthZero);
        }
        if self.input_pack == 0 || self.output_pack == 0 {
            return Err(ConfigError::PackSizeZero);
        }
        if self.reuse_factor == 0 {
            return Err(ConfigError::ReuseFactorZero);
        }
        if self.n_in % self.input_pack != 0 {
            return Err(ConfigError::InputPackMismatch {
                n_in: self.n_in,
                pack: self.input_pack,
            });
        }
        if self.n_out % self.output_pack != 0 {
            return Err(ConfigError::OutputPackMismatch {
                n_out: self.n_out,
                pack: self.output_pack,
            });
        }
        if self.n_zeros > self.n_in * self.n_out {
            return Err(ConfigError::ZeroCountExceedsWeights {
                n_zeros: self.n_zeros,
                n_weights: self.n_in * self.n_out,
            });
        }
        Ok(())
    }
}

/// A configuration defect, rejected when the layer is elaborated.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("input width must be greater than zero")]
    InputWidthZero,
    #[error("output width must be greater than zero")]
    OutputWidthZero,
    #[error("pack size must be greater than zero")]
    PackSizeZero,
    #[error("reuse factor must be greater than zero")]
    ReuseFactorZero,
    #[error("input width {n_in} is not divisible by input pack size {pack}")]
    InputPackMismatch { n_in: usize, pack: usize },
    #[error("output width {n_out} is not divisible by output pack size {pack}")]
    OutputPackMismatch { n_out: usize, pack: usize },
    #[error("zero-weight count {n_zeros} exceeds weight count {n_weights}")]
    ZeroCountExceedsWeights { n_zeros: usize, n_weights: usize },
    #[error("expected {expected} weights, got {actual}")]
    WeightCount { expected: usize, actual: usize },
    #[error("expected {expected} biases, got {actual}")]
    BiasCount { expected: usize, actual: usize },
}
