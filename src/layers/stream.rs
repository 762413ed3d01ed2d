use super::*;
use crate::config::IoMode;
use crate::math::{CastPolicy, Product};
use crate::schedule;
use crate::stream::{Pack, PackReceiver, PackSender, StreamError};
use num_traits::Zero;

/// The streaming datapath of one fully-connected layer: a layer descriptor
/// bound to a product strategy and a cast policy.
///
/// One `infer` call consumes exactly one packed input vector from the input
/// channel and produces exactly one packed output vector on the output
/// channel. All intermediate buffers are owned by the invocation; nothing
/// survives across calls.
pub struct DenseKernel<'a, W, B, P, C>
where
    W: Coeff,
    B: Coeff,
{
    layer: &'a DenseLayer<W, B>,
    product: P,
    cast: C,
}

impl<'a, W, B, P, C> DenseKernel<'a, W, B, P, C>
where
    W: Coeff,
    B: Coeff,
{
    pub fn new(layer: &'a DenseLayer<W, B>, product: P, cast: C) -> DenseKernel<'a, W, B, P, C> {
        DenseKernel {
            layer,
            product,
            cast,
        }
    }

    pub fn layer(&self) -> &DenseLayer<W, B> {
        self.layer
    }

    /// The bound product strategy; lets callers inspect the advisory
    /// multiplier ceiling it was handed last.
    pub fn product(&self) -> &P {
        &self.product
    }

    /// Runs one invocation: deserialize, multiply, accumulate, cast,
    /// serialize.
    pub fn infer<D, R>(
        &mut self,
        data_rx: &PackReceiver<D>,
        res_tx: &PackSender<R>,
    ) -> Result<(), StreamError>
    where
        D: Coeff,
        R: Coeff,
        P: Product<D, W>,
        P::Accum: Coeff + From<B>,
        C: CastPolicy<P::Accum, R>,
    {
        let data = self.read_input(data_rx)?;
        let res = self.compute_buffers(&data);
        self.write_output(res_tx, &res)
    }

    /// The same matrix product over plain slices, bypassing the channels.
    pub fn compute<D, R>(&mut self, data: &[D]) -> Vec<R>
    where
        D: Coeff,
        R: Coeff,
        P: Product<D, W>,
        P::Accum: Coeff + From<B>,
        C: CastPolicy<P::Accum, R>,
    {
        debug_assert_eq!(data.len(), self.layer.num_in());
        self.compute_buffers(data)
    }

    /// Reads `n_in / input_pack` packed elements and unpacks them into the
    /// flat input buffer, preserving element order. Blocks until the producer
    /// has supplied every pack; downstream stages never observe a partial
    /// buffer.
    fn read_input<D>(&self, data_rx: &PackReceiver<D>) -> Result<Vec<D>, StreamError>
    where
        D: Coeff,
    {
        let cfg = self.layer.config();
        let expected = cfg.num_input_packs();
        let mut data = Vec::with_capacity(cfg.n_in);
        for read in 0..expected {
            let pack = data_rx
                .recv()
                .map_err(|_| StreamError::InputDisconnected { read, expected })?;
            debug_assert_eq!(
                pack.len(),
                cfg.input_pack,
                "input pack {} carries {} scalars, configured for {}",
                read,
                pack.len(),
                cfg.input_pack
            );
            data.extend_from_slice(&pack);
        }
        Ok(data)
    }

    fn compute_buffers<D, R>(&mut self, data: &[D]) -> Vec<R>
    where
        D: Coeff,
        R: Coeff,
        P: Product<D, W>,
        P::Accum: Coeff + From<B>,
        C: CastPolicy<P::Accum, R>,
    {
        let cfg = *self.layer.config();
        let (n_in, n_out) = (cfg.n_in, cfg.n_out);
        let weights = self.layer.weights();

        // Announce the pass-wide multiplier ceiling before any product is
        // formed; in serial mode a finer-grained ceiling follows per input
        // index. Advisory only.
        if cfg.io_mode == IoMode::Parallel {
            self.product.set_resource_limit(schedule::multiplier_limit(
                n_in * n_out,
                cfg.reuse_factor,
                cfg.n_zeros,
            ));
        }

        let mut mult: Vec<P::Accum> = vec![<P::Accum as Zero>::zero(); n_in * n_out];
        for i in 0..n_in {
            if cfg.io_mode == IoMode::Serial {
                self.product
                    .set_resource_limit(schedule::serial_multiplier_limit(
                        n_out,
                        cfg.reuse_factor,
                    ));
            }
            let x = data[i];
            for j in 0..n_out {
                mult[i * n_out + j] = self.product.product(x, weights[i * n_out + j]);
            }
        }

        // Seed the accumulators with the biases, widened to accumulator
        // precision, then sum the partial products with `i` ascending. The
        // order is contractual: saturating accumulator types make it
        // observable.
        let mut acc: Vec<P::Accum> = self.layer.biases().iter().map(|&b| b.into()).collect();
        for i in 0..n_in {
            for j in 0..n_out {
                acc[j] += mult[i * n_out + j];
            }
        }

        acc.into_iter().map(|a| self.cast.cast(a)).collect()
    }

    /// Packs the finished output buffer into `n_out / output_pack` elements
    /// and writes them in order. Runs only after the reducer has produced the
    /// complete buffer.
    fn write_output<R>(&self, res_tx: &PackSender<R>, res: &[R]) -> Result<(), StreamError>
    where
        R: Coeff,
    {
        let cfg = self.layer.config();
        let expected = cfg.num_output_packs();
        for (written, chunk) in res.chunks(cfg.output_pack).enumerate() {
            res_tx
                .send(Pack::from_slice(chunk))
                .map_err(|_| StreamError::OutputDisconnected { written, expected })?;
        }
        Ok(())
    }
}
