//! Begin/finish timers accumulating elapsed-time samples.

use crate::error::{Error, Result};
use std::fmt;
use std::time::{Duration, Instant};

/// A measurement wrapped around one engine run.
///
/// Every `begin` must be matched by exactly one `finish`.
pub trait Timer {
    /// Starts a measurement.
    ///
    /// Fails with [`Error::InvalidState`] while a previous one is unfinished.
    fn begin(&mut self) -> Result<()>;

    /// Ends the running measurement and returns its duration.
    ///
    /// Fails with [`Error::InvalidState`] when nothing was begun.
    fn finish(&mut self) -> Result<Duration>;
}

/// Wall-clock timer backed by [`Instant`].
#[derive(Debug, Clone, Default)]
pub struct SystemTimer {
    started: Option<Instant>,
    samples: Vec<Duration>,
}

impl SystemTimer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.started.is_some()
    }

    pub fn samples(&self) -> &[Duration] {
        &self.samples
    }

    pub fn average(&self) -> Option<Duration> {
        if self.samples.is_empty() {
            return None;
        }
        let total: Duration = self.samples.iter().sum();
        Some(total / self.samples.len() as u32)
    }

    pub fn minimum(&self) -> Option<Duration> {
        self.samples.iter().min().copied()
    }

    pub fn maximum(&self) -> Option<Duration> {
        self.samples.iter().max().copied()
    }

    /// Average, minimum and maximum over all samples, labelled with `size`.
    pub fn summary(&self, size: f64) -> Option<TimingSummary> {
        Some(TimingSummary {
            size,
            average: self.average()?,
            minimum: self.minimum()?,
            maximum: self.maximum()?,
        })
    }
}

impl Timer for SystemTimer {
    fn begin(&mut self) -> Result<()> {
        if self.started.is_some() {
            return Err(Error::InvalidState(
                "cannot begin a measurement while the previous one is unfinished",
            ));
        }
        self.started = Some(Instant::now());
        Ok(())
    }

    fn finish(&mut self) -> Result<Duration> {
        let started = self.started.take().ok_or(Error::InvalidState(
            "cannot finish a measurement that was never begun",
        ))?;
        let elapsed = started.elapsed();
        self.samples.push(elapsed);
        Ok(elapsed)
    }
}

/// Runs `f` between `timer.begin()` and `timer.finish()`.
pub fn measure<T, F, R>(timer: &mut T, f: F) -> Result<R>
where
    T: Timer + ?Sized,
    F: FnOnce() -> R,
{
    timer.begin()?;
    let out = f();
    timer.finish()?;
    Ok(out)
}

/// Timing statistics for one instance file.
///
/// Displays as `<size> <avg_seconds> <min_seconds> <max_seconds>`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingSummary {
    pub size: f64,
    pub average: Duration,
    pub minimum: Duration,
    pub maximum: Duration,
}

impl fmt::Display for TimingSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.size,
            self.average.as_secs_f64(),
            self.minimum.as_secs_f64(),
            self.maximum.as_secs_f64()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_begin_twice_is_invalid_state() {
        let mut timer = SystemTimer::new();
        timer.begin().unwrap();
        assert!(matches!(timer.begin(), Err(Error::InvalidState(_))));
        assert!(timer.is_running());
    }

    #[test]
    fn test_finish_without_begin_is_invalid_state() {
        let mut timer = SystemTimer::new();
        assert!(matches!(timer.finish(), Err(Error::InvalidState(_))));
        timer.begin().unwrap();
        timer.finish().unwrap();
        assert!(matches!(timer.finish(), Err(Error::InvalidState(_))));
    }

    #[test]
    fn test_statistics_over_samples() {
        let timer = SystemTimer {
            started: None,
            samples: vec![
                Duration::from_millis(30),
                Duration::from_millis(10),
                Duration::from_millis(20),
            ],
        };
        assert_eq!(timer.average(), Some(Duration::from_millis(20)));
        assert_eq!(timer.minimum(), Some(Duration::from_millis(10)));
        assert_eq!(timer.maximum(), Some(Duration::from_millis(30)));
        assert_eq!(timer.summary(40.0).unwrap().to_string(), "40 0.02 0.01 0.03");
    }

    #[test]
    fn test_empty_timer_has_no_summary() {
        let timer = SystemTimer::new();
        assert_eq!(timer.average(), None);
        assert!(timer.summary(1.0).is_none());
    }

    #[test]
    fn test_measure_records_one_sample_per_call() {
        let mut timer = SystemTimer::new();
        let a = measure(&mut timer, || 1 + 1).unwrap();
        let b = measure(&mut timer, || "done").unwrap();
        assert_eq!((a, b), (2, "done"));
        assert_eq!(timer.samples().len(), 2);
        assert!(!timer.is_running());
    }

    #[test]
    fn test_measure_refuses_nested_use() {
        let mut timer = SystemTimer::new();
        timer.begin().unwrap();
        assert!(measure(&mut timer, || ()).is_err());
    }
}
