#[macro_use]
extern crate log;

use itertools::Itertools;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rusty_dense::*;
use std::thread;
use std::time::Instant;

const N_IN: usize = 256;
const N_OUT: usize = 64;
const INPUT_PACK: usize = 8;
const OUTPUT_PACK: usize = 8;
const REUSE_FACTOR: usize = 16;
const NUM_VECTORS: usize = 8;
// Packs in flight per channel; small on purpose so the demo exercises
// back-pressure between the producer and the kernel.
const CHANNEL_CAPACITY: usize = 4;

fn main() {
    env_logger::init();

    match run() {
        Ok(_) => info!("Exited great."),
        Err(err) => info!("Exited with error: {}.", err),
    }
}

/// Streams a handful of input vectors through a quantized demo layer on a
/// producer-thread / kernel-thread / consumer pipeline.
fn run() -> Result<(), String> {
    let mut rng = StdRng::seed_from_u64(0xd5);

    let weights: Vec<i8> = (0..N_IN * N_OUT).map(|_| rng.gen_range(-4..=4)).collect();
    let biases: Vec<i32> = (0..N_OUT).map(|_| rng.gen_range(-128..=127)).collect();
    let config = DenseConfig {
        input_pack: INPUT_PACK,
        output_pack: OUTPUT_PACK,
        reuse_factor: REUSE_FACTOR,
        n_zeros: count_zero_weights(&weights),
        ..DenseConfig::new(N_IN, N_OUT)
    };
    let layer = DenseLayer::new(config, weights, biases).map_err(|e| e.to_string())?;

    let inputs: Vec<Vec<i8>> = (0..NUM_VECTORS)
        .map(|_| (0..N_IN).map(|_| rng.gen_range(-64..=64)).collect())
        .collect();

    let (in_tx, in_rx) = pack_channel::<i8>(CHANNEL_CAPACITY);
    let (out_tx, out_rx) = pack_channel::<i8>(CHANNEL_CAPACITY);

    let producer = thread::spawn(move || {
        for vector in &inputs {
            for pack in pack_buffer(vector, INPUT_PACK) {
                if in_tx.send(pack).is_err() {
                    return;
                }
            }
        }
    });

    let kernel_thread = thread::spawn(move || -> Result<(), StreamError> {
        let mut kernel = DenseKernel::new(&layer, StandardProduct::<i32>::new(), RoundingCast);
        for _ in 0..NUM_VECTORS {
            kernel.infer(&in_rx, &out_tx)?;
        }
        Ok(())
    });

    let start_time = Instant::now();
    for vector in 0..NUM_VECTORS {
        let mut output: Vec<i8> = Vec::with_capacity(N_OUT);
        for _ in 0..N_OUT / OUTPUT_PACK {
            let pack = out_rx
                .recv()
                .map_err(|e| format!("output stream closed early: {}", e))?;
            output.extend_from_slice(&pack);
        }
        info!("vector {}: [{}]", vector, output.iter().format(", "));
    }
    let end_time = Instant::now();

    producer.join().map_err(|_| "producer panicked")?;
    kernel_thread
        .join()
        .map_err(|_| "kernel thread panicked")?
        .map_err(|e| e.to_string())?;

    info!(
        "Streamed {} vectors in {} s.",
        NUM_VECTORS,
        duration_between(start_time, end_time)
    );
    Ok(())
}
