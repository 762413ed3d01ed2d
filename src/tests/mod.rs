mod saturation;

use super::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub const RESULT_MARGIN: f32 = 0.000002f32;

lazy_static! {
    /// A packed f32 layer shared by the float correctness tests.
    static ref F32_LAYER: DenseLayer<f32, f32> = {
        let config = DenseConfig {
            input_pack: 4,
            output_pack: 5,
            reuse_factor: 8,
            ..DenseConfig::new(96, 20)
        };
        random_f32_layer(config, 99)
    };
}

fn random_f32_layer(config: DenseConfig, seed: u64) -> DenseLayer<f32, f32> {
    let mut rng = StdRng::seed_from_u64(seed);
    let weights = (0..config.n_in * config.n_out)
        .map(|_| rng.gen_range(-1f32..1f32))
        .collect();
    let biases = (0..config.n_out)
        .map(|_| rng.gen_range(-1f32..1f32))
        .collect();
    DenseLayer::new(config, weights, biases).unwrap()
}

fn random_i8_tables(n_in: usize, n_out: usize, seed: u64) -> (Vec<i8>, Vec<i32>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let weights = (0..n_in * n_out)
        .map(|_| rng.gen_range(-8i8..=8i8))
        .collect();
    let biases = (0..n_out)
        .map(|_| rng.gen_range(-100i32..=100i32))
        .collect();
    (weights, biases)
}

/// Feeds one input vector through a kernel over freshly created channels
/// sized to hold the whole vector, and collects the output vector.
fn run_streamed<D, R, W, B, P, C>(
    kernel: &mut DenseKernel<'_, W, B, P, C>,
    input: &[D],
) -> Result<Vec<R>, StreamError>
where
    D: Coeff,
    R: Coeff,
    W: Coeff,
    B: Coeff,
    P: Product<D, W>,
    P::Accum: Coeff + From<B>,
    C: CastPolicy<P::Accum, R>,
{
    let cfg = *kernel.layer().config();
    let (in_tx, in_rx) = pack_channel(cfg.num_input_packs());
    let (out_tx, out_rx) = pack_channel(cfg.num_output_packs());

    for pack in pack_buffer(input, cfg.input_pack) {
        in_tx.send(pack).unwrap();
    }
    kernel.infer(&in_rx, &out_tx)?;

    let mut out = Vec::with_capacity(cfg.n_out);
    for _ in 0..cfg.num_output_packs() {
        out.extend_from_slice(&out_rx.recv().unwrap());
    }
    Ok(out)
}
