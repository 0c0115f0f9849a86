use rand::rngs::StdRng;
use rand::SeedableRng;

// Installs the test logger once per test binary.
#[allow(dead_code)]
pub fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[allow(dead_code)]
pub fn seeded_rng() -> StdRng {
    StdRng::seed_from_u64(0x5ca1_ab1e)
}

/// The four-sample binary classification set used throughout the demos.
#[allow(dead_code)]
pub fn tiny_dataset() -> (Vec<[f64; 3]>, Vec<f64>) {
    let xs = vec![
        [2.0, 3.0, -1.0],
        [3.0, -1.0, 0.5],
        [0.5, 1.0, 1.0],
        [1.0, 1.0, -1.0],
    ];
    let ys = vec![1.0, -1.0, -1.0, 1.0];
    (xs, ys)
}
