/*
 * Multiplier-count ceilings for the time-shared multiply hardware.
 *
 * The reuse factor trades inference latency against area: a larger factor
 * shares one physical multiplier across more logical multiplications. The
 * ceilings computed here are advisory metadata for the product strategy and
 * must never change numeric results.
 */

/// Multiplier ceiling for one full pass in parallel/throughput mode.
///
/// `n_mult` is the total multiply count of the pass (`n_in * n_out`). Known
/// zero weights are credited against the budget at the rate they free up
/// multiplier slots.
pub fn multiplier_limit(n_mult: usize, reuse_factor: usize, n_zeros: usize) -> usize {
    div_ceil(n_mult, reuse_factor) - n_zeros / reuse_factor
}

/// Multiplier ceiling for one input index in serial mode.
pub fn serial_multiplier_limit(n_out: usize, reuse_factor: usize) -> usize {
    div_ceil(n_out, reuse_factor)
}

fn div_ceil(a: usize, b: usize) -> usize {
    (a + b - 1) / b
}
