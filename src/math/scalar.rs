use rand::Rng;

/// Lowest integer draw; the draw is divided by [`RANDOM_RESOLUTION`].
const RANDOM_LOW: i32 = -100_000;
const RANDOM_HIGH: i32 = 100_000;
const RANDOM_RESOLUTION: f64 = 10_000.0;

pub fn add(a: f64, b: f64) -> f64 {
    a + b
}

pub fn multiply(a: f64, b: f64) -> f64 {
    a * b
}

/// Uniform draw from `[-10, 10)` in steps of `0.0001`, ignoring the cell value.
///
/// Shaped for [`Matrix::transform`](crate::math::matrix::Matrix::transform),
/// so every cell is re-drawn independently from the thread-local generator.
pub fn random_uniform(_: f64) -> f64 {
    sample_uniform(&mut rand::thread_rng())
}

/// Same distribution as [`random_uniform`], drawn from a caller-supplied generator.
pub fn sample_uniform<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen_range(RANDOM_LOW..RANDOM_HIGH) as f64 / RANDOM_RESOLUTION
}
