use super::*;
use crate::config::{ConfigError, DenseConfig};
use crate::util::read_file_as_f32s_checked;
use ndarray::{Array1, Array2};

/// A complete descriptor for one fully-connected layer instance: validated
/// configuration, weight table and bias vector.
///
/// Weights are row-major by input index: `weights[i * n_out + j]` connects
/// input `i` to output `j`. Both tables are immutable for the descriptor's
/// lifetime.
#[derive(Debug)]
pub struct DenseLayer<W, B>
where
    W: Coeff,
    B: Coeff,
{
    config: DenseConfig,
    weights: Vec<W>,
    biases: Vec<B>,
}

impl<W, B> DenseLayer<W, B>
where
    W: Coeff,
    B: Coeff,
{
    /// Creates a descriptor of a fully-connected layer.
    ///
    /// Validates the configuration and the table lengths once; the streaming
    /// kernel relies on these invariants and never re-checks them.
    pub fn new(
        config: DenseConfig,
        weights: Vec<W>,
        biases: Vec<B>,
    ) -> Result<DenseLayer<W, B>, ConfigError> {
        config.validate()?;
        if weights.len() != config.n_in * config.n_out {
            return Err(ConfigError::WeightCount {
                expected: config.n_in * config.n_out,
                actual: weights.len(),
            });
        }
        if biases.len() != config.n_out {
            return Err(ConfigError::BiasCount {
                expected: config.n_out,
                actual: biases.len(),
            });
        }
        debug!(
            "Create dense-layer with input-size: {}, output-size: {}, reuse-factor: {}.",
            config.n_in, config.n_out, config.reuse_factor
        );
        trace!(
            "\t↳ input: {0}, output: {1}, weights-size: {0}x{1} = {2}, known-zeros: {3}.",
            config.n_in,
            config.n_out,
            config.n_in * config.n_out,
            config.n_zeros
        );
        Ok(DenseLayer {
            config,
            weights,
            biases,
        })
    }

    /// Creates a descriptor from an `n_in` x `n_out` weight matrix and a bias
    /// vector.
    pub fn from_matrix(
        config: DenseConfig,
        weights: Array2<W>,
        biases: Array1<B>,
    ) -> Result<DenseLayer<W, B>, ConfigError> {
        // Logical (row-major) order regardless of the array's memory layout
        let weights = weights.into_iter().collect();
        let biases = biases.into_iter().collect();
        DenseLayer::new(config, weights, biases)
    }

    pub fn config(&self) -> &DenseConfig {
        &self.config
    }

    pub fn biases(&self) -> &[B] {
        &self.biases
    }
}

impl DenseLayer<f32, f32> {
    /// Creates a descriptor with weight and bias tables read from big-endian
    /// binary files.
    pub fn from_files(
        config: DenseConfig,
        weights_file: &str,
        biases_file: &str,
    ) -> Result<DenseLayer<f32, f32>, String> {
        let weights = read_file_as_f32s_checked(weights_file, config.n_in * config.n_out)?;
        let biases = read_file_as_f32s_checked(biases_file, config.n_out)?;
        DenseLayer::new(config, weights, biases).map_err(|e| e.to_string())
    }
}

impl<W, B> Layer for DenseLayer<W, B>
where
    W: Coeff,
    B: Coeff,
{
    fn num_in(&self) -> usize {
        self.config.n_in
    }
    fn num_out(&self) -> usize {
        self.config.n_out
    }
    fn name(&self) -> &'static str {
        "dense"
    }
}

impl<W, B> WeightedLayer<W> for DenseLayer<W, B>
where
    W: Coeff,
    B: Coeff,
{
    fn weights(&self) -> &[W] {
        &self.weights
    }
}

/// Counts the weights that are exactly zero, for use as the configuration's
/// structural-sparsity credit.
pub fn count_zero_weights<W>(weights: &[W]) -> usize
where
    W: Coeff,
{
    weights.iter().filter(|&&w| w == W::zero()).count()
}
