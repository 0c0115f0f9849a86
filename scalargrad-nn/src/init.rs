use crate::error::NnError;
use rand::distributions::{Distribution, Uniform};
use rand::Rng;
use rand_distr::Normal;
use scalargrad_core::num_traits::Float;

/// Parameter initialization scheme.
///
/// The random source is always passed in explicitly, so seeding an
/// `StdRng` makes network construction reproducible.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Init {
    /// Uniform on `[low, high)`.
    Uniform { low: f64, high: f64 },
    /// Gaussian with the given mean and standard deviation.
    Normal { mean: f64, std_dev: f64 },
    /// Every parameter set to the same value.
    Constant(f64),
}

impl Default for Init {
    /// Uniform on `[-1, 1)`.
    fn default() -> Self {
        Init::Uniform {
            low: -1.0,
            high: 1.0,
        }
    }
}

impl Init {
    /// Checks that the scheme can be sampled from.
    pub fn validate(&self) -> Result<(), NnError> {
        match *self {
            Init::Uniform { low, high } => {
                if !(low.is_finite() && high.is_finite() && low < high) {
                    return Err(NnError::InvalidConfig(format!(
                        "uniform init requires finite low < high, got [{}, {})",
                        low, high
                    )));
                }
            }
            Init::Normal { mean, std_dev } => {
                if !(mean.is_finite() && std_dev.is_finite() && std_dev >= 0.0) {
                    return Err(NnError::InvalidConfig(format!(
                        "normal init requires finite mean and std_dev >= 0, got mean {} std_dev {}",
                        mean, std_dev
                    )));
                }
            }
            Init::Constant(value) => {
                if !value.is_finite() {
                    return Err(NnError::InvalidConfig(format!(
                        "constant init must be finite, got {}",
                        value
                    )));
                }
            }
        }
        Ok(())
    }

    /// Draws `count` initial values.
    ///
    /// # Errors
    /// `InvalidConfig` if the scheme is invalid (see [`validate`](Self::validate)).
    pub fn sample<T, R>(&self, count: usize, rng: &mut R) -> Result<Vec<T>, NnError>
    where
        T: Float,
        R: Rng + ?Sized,
    {
        self.validate()?;
        let raw: Vec<f64> = match *self {
            Init::Uniform { low, high } => {
                let dist = Uniform::new(low, high);
                dist.sample_iter(&mut *rng).take(count).collect()
            }
            Init::Normal { mean, std_dev } => {
                let dist = Normal::new(mean, std_dev)
                    .map_err(|e| NnError::InvalidConfig(format!("normal init: {}", e)))?;
                dist.sample_iter(&mut *rng).take(count).collect()
            }
            Init::Constant(value) => vec![value; count],
        };
        raw.into_iter()
            .map(|value| crate::cast(value, "initial value"))
            .collect()
    }
}
