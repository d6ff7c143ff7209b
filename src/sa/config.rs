//! SA configuration and cooling schedule.

use crate::error::{Error, Result};

/// Cooling factor applied after every temperature level.
pub const DEFAULT_COOLING_FACTOR: f64 = 0.99;

/// Temperature at or below which the search is considered frozen.
pub const DEFAULT_FROZEN_TEMPERATURE: f64 = 4.0;

/// Initial temperature per element for size-scaled schedules.
pub const TEMPERATURE_PER_ELEMENT: f64 = 5.0;

/// Configuration for the annealing engine.
///
/// Cooling is geometric: `T_{k+1} = cooling_factor * T_k`, repeated while
/// `T > min_temperature`.
///
/// # Examples
///
/// ```
/// use annealer::sa::SaConfig;
///
/// let config = SaConfig::default()
///     .with_initial_temperature(100.0)
///     .with_min_temperature(0.5)
///     .with_cooling_factor(0.98)
///     .with_iterations_per_temperature(200);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct SaConfig {
    /// Initial temperature. Higher values allow more exploration.
    pub initial_temperature: f64,

    /// Frozen threshold. The search stops once `T <= min_temperature`.
    pub min_temperature: f64,

    /// Multiplicative cooling factor in (0, 1).
    pub cooling_factor: f64,

    /// Number of neighbor evaluations at each temperature level.
    pub iterations_per_temperature: usize,

    /// Random seed for reproducibility.
    pub seed: Option<u64>,
}

impl Default for SaConfig {
    fn default() -> Self {
        Self {
            initial_temperature: 100.0,
            min_temperature: DEFAULT_FROZEN_TEMPERATURE,
            cooling_factor: DEFAULT_COOLING_FACTOR,
            iterations_per_temperature: 100,
            seed: None,
        }
    }
}

impl SaConfig {
    /// Schedule scaled to an instance with `elements` items or terms.
    ///
    /// Starts at `5 * elements`, runs `elements` inner iterations per
    /// level and freezes at 4. Tiny instances are clamped so the start
    /// temperature stays above the frozen threshold.
    pub fn for_size(elements: usize) -> Self {
        let elements = elements.max(1);
        let initial = (TEMPERATURE_PER_ELEMENT * elements as f64)
            .max(2.0 * DEFAULT_FROZEN_TEMPERATURE);
        Self {
            initial_temperature: initial,
            iterations_per_temperature: elements,
            ..Self::default()
        }
    }

    pub fn with_initial_temperature(mut self, t: f64) -> Self {
        self.initial_temperature = t;
        self
    }

    pub fn with_min_temperature(mut self, t: f64) -> Self {
        self.min_temperature = t;
        self
    }

    pub fn with_cooling_factor(mut self, alpha: f64) -> Self {
        self.cooling_factor = alpha;
        self
    }

    pub fn with_iterations_per_temperature(mut self, n: usize) -> Self {
        self.iterations_per_temperature = n;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Upper bound on the number of temperature levels this schedule visits.
    pub fn max_steps(&self) -> usize {
        let ratio = self.initial_temperature / self.min_temperature;
        if ratio <= 1.0 {
            return 0;
        }
        (ratio.ln() / -self.cooling_factor.ln()).ceil() as usize + 1
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<()> {
        if self.initial_temperature.is_nan() || self.initial_temperature <= 0.0 {
            return Err(Error::config("initial_temperature must be positive"));
        }
        if self.min_temperature.is_nan() || self.min_temperature <= 0.0 {
            return Err(Error::config("min_temperature must be positive"));
        }
        if self.min_temperature >= self.initial_temperature {
            return Err(Error::config(
                "min_temperature must be less than initial_temperature",
            ));
        }
        let factor = self.cooling_factor;
        if factor.is_nan() || factor <= 0.0 || factor >= 1.0 {
            return Err(Error::config(format!(
                "cooling factor must be in (0, 1), got {factor}"
            )));
        }
        if self.iterations_per_temperature == 0 {
            return Err(Error::config("iterations_per_temperature must be positive"));
        }
        Ok(())
    }
}
