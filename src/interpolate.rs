// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Continuously changing durations for accelerandi and ritardandi.

use std::f64::consts::PI;

use rmakers_core::rational::Rational;

use crate::error::{Error, Result};
use crate::music::Duration;

/// Resolution to which interpolated durations are rounded.
pub const QUANTUM: i64 = 1024;

/// Durations moving from `start` to `stop`, notated as `written` with multipliers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Interpolation {
    pub start: Duration,
    pub stop: Duration,
    pub written: Duration,
}

impl Default for Interpolation {
    fn default() -> Self {
        Self {
            start: Rational::new(1, 8),
            stop: Rational::new(1, 16),
            written: Rational::new(1, 16),
        }
    }
}

impl Interpolation {
    pub fn new(start: Duration, stop: Duration, written: Duration) -> Result<Self> {
        for duration in &[start, stop, written] {
            if !duration.is_positive() {
                return Err(Error::NonPositiveDuration {
                    duration: *duration,
                });
            }
        }
        if !written.is_assignable() {
            return Err(Error::Unassignable { duration: written });
        }
        Ok(Self {
            start,
            stop,
            written,
        })
    }

    /// Swap start and stop, turning an accelerando into a ritardando.
    pub fn reverse(self) -> Self {
        Self {
            start: self.stop,
            stop: self.start,
            written: self.written,
        }
    }
}

/// Shape of the curve between the start and stop durations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Warp {
    Cosine,
    /// `mu` raised to the exponent; 1 is linear.
    Power(f64),
}

impl Default for Warp {
    fn default() -> Self {
        Warp::Cosine
    }
}

impl Warp {
    pub fn validate(self) -> Result<()> {
        match self {
            Warp::Power(exponent) if !(exponent.is_finite() && exponent > 0.0) => {
                Err(Error::InvalidExponent { exponent })
            }
            _ => Ok(()),
        }
    }

    /// The value between `y1` and `y2` at position `mu` in `[0, 1]`.
    pub fn interpolate(self, y1: f64, y2: f64, mu: f64) -> f64 {
        match self {
            Warp::Cosine => interpolate_cosine(y1, y2, mu),
            Warp::Power(exponent) => interpolate_power(y1, y2, mu, exponent),
        }
    }
}

/// Result of dividing a total duration.
#[derive(Debug, Clone, PartialEq)]
pub enum Interpolated {
    /// The total is shorter than the start and stop durations together.
    TooSmall,
    Durations(Vec<f64>),
}

pub fn interpolate_cosine(y1: f64, y2: f64, mu: f64) -> f64 {
    let mu2 = (1.0 - (mu * PI).cos()) / 2.0;
    y1 * (1.0 - mu2) + y2 * mu2
}

/// ```
/// # use rmakers::interpolate::interpolate_power;
/// assert_eq!(interpolate_power(100.0, 200.0, 0.5, 1.0), 150.0);
/// assert_eq!(interpolate_power(100.0, 200.0, 0.5, 2.0), 125.0);
/// ```
pub fn interpolate_power(y1: f64, y2: f64, mu: f64, exponent: f64) -> f64 {
    let warped = mu.powf(exponent);
    y1 * (1.0 - warped) + y2 * warped
}

/// Divide `total` into durations interpolated from `start` to `stop`.
///
/// Durations are produced until they reach the total, then scaled so that
/// they sum to it.
///
/// ```
/// # use rmakers::interpolate::*;
/// let durations = interpolate_divide(10.0, 1.0, 1.0, Warp::Power(1.0)).unwrap();
/// assert_eq!(durations, Interpolated::Durations(vec![1.0; 10]));
/// assert_eq!(
///     interpolate_divide(1.0, 1.0, 0.5, Warp::Cosine).unwrap(),
///     Interpolated::TooSmall
/// );
/// ```
pub fn interpolate_divide(total: f64, start: f64, stop: f64, warp: Warp) -> Result<Interpolated> {
    if !(total > 0.0 && start > 0.0 && stop > 0.0) {
        return Err(Error::NonPositiveInterpolation { total, start, stop });
    }
    warp.validate()?;
    if total < start + stop {
        return Ok(Interpolated::TooSmall);
    }

    let mut durations = Vec::new();
    let mut partial_sum = 0.0;
    while partial_sum < total {
        let duration = warp.interpolate(start, stop, partial_sum / total);
        durations.push(duration);
        partial_sum += duration;
    }
    let sum: f64 = durations.iter().sum();
    Ok(Interpolated::Durations(
        durations.into_iter().map(|d| d * total / sum).collect(),
    ))
}

/// Divide each total, interpolating between consecutive reference durations.
pub fn interpolate_divide_multiple(
    totals: &[f64],
    references: &[f64],
    warp: Warp,
) -> Result<Vec<f64>> {
    if totals.len() + 1 != references.len() {
        return Err(Error::MismatchedInterpolation {
            totals: totals.len(),
            references: references.len(),
        });
    }
    let mut durations = Vec::new();
    for (total, bounds) in totals.iter().zip(references.windows(2)) {
        let (start, stop) = (bounds[0], bounds[1]);
        match interpolate_divide(*total, start, stop, warp)? {
            Interpolated::Durations(part) => durations.extend(part),
            Interpolated::TooSmall => {
                return Err(Error::InterpolationTooSmall {
                    total: *total,
                    start,
                    stop,
                })
            }
        }
    }
    Ok(durations)
}

/// Round to multiples of `1 / QUANTUM`, dropping durations that vanish.
pub fn quantize(durations: &[f64]) -> Vec<Duration> {
    durations
        .iter()
        .map(|duration| Rational::from_f64(*duration, QUANTUM))
        .filter(|duration| !duration.is_zero())
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn durations(result: Interpolated) -> Vec<f64> {
        match result {
            Interpolated::Durations(durations) => durations,
            Interpolated::TooSmall => panic!("unexpected TooSmall"),
        }
    }

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{:?}", actual);
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{:?} != {:?}", actual, expected);
        }
    }

    #[test]
    fn cosine_divide() {
        let result = durations(interpolate_divide(10.0, 5.0, 1.0, Warp::Cosine).unwrap());
        assert_close(
            &result,
            &[
                4.798673448904318,
                2.879204069342591,
                1.3263207210948171,
                0.9958017606582742,
            ],
        );
        assert!((result.iter().sum::<f64>() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn exact_linear_divide() {
        let result = durations(interpolate_divide(10.0, 1.0, 1.0, Warp::Power(1.0)).unwrap());
        assert_eq!(result.iter().sum::<f64>(), 10.0);
    }

    #[test]
    fn divide_multiple() {
        let result =
            interpolate_divide_multiple(&[100.0, 50.0], &[20.0, 10.0, 20.0], Warp::Cosine).unwrap();
        assert_close(
            &result,
            &[
                19.44873148727648,
                18.52013718851781,
                16.227073088954644,
                13.715693627664114,
                11.748862989246588,
                10.487959844075311,
                9.851541774265053,
                9.513058286659192,
                10.421474518795433,
                13.073640649147496,
                16.991826545397885,
            ],
        );
    }

    #[test]
    fn divide_multiple_errors() {
        assert_eq!(
            interpolate_divide_multiple(&[1.0], &[1.0], Warp::Cosine),
            Err(Error::MismatchedInterpolation {
                totals: 1,
                references: 1
            })
        );
        assert_eq!(
            interpolate_divide_multiple(&[1.0], &[1.0, 1.0], Warp::Cosine),
            Err(Error::InterpolationTooSmall {
                total: 1.0,
                start: 1.0,
                stop: 1.0
            })
        );
    }

    #[test]
    fn invalid_inputs() {
        assert!(matches!(
            interpolate_divide(0.0, 1.0, 1.0, Warp::Cosine),
            Err(Error::NonPositiveInterpolation { .. })
        ));
        assert!(matches!(
            interpolate_divide(4.0, 1.0, -1.0, Warp::Cosine),
            Err(Error::NonPositiveInterpolation { .. })
        ));
        assert_eq!(
            interpolate_divide(4.0, 1.0, 1.0, Warp::Power(0.0)),
            Err(Error::InvalidExponent { exponent: 0.0 })
        );
        assert_eq!(
            Interpolation::new(Rational::new(1, 8), Rational::ZERO, Rational::new(1, 16)),
            Err(Error::NonPositiveDuration {
                duration: Rational::ZERO
            })
        );
    }

    #[test]
    fn quantized_accelerando() {
        let result = durations(interpolate_divide(0.5, 0.125, 0.05, Warp::Cosine).unwrap());
        assert_eq!(
            quantize(&result),
            vec![
                Rational::new(63, 512),
                Rational::new(115, 1024),
                Rational::new(91, 1024),
                Rational::new(35, 512),
                Rational::new(29, 512),
                Rational::new(13, 256),
            ]
        );
    }

    #[test]
    fn reverse_swaps() {
        let interpolation = Interpolation::default().reverse();
        assert_eq!(interpolation.start, Rational::new(1, 16));
        assert_eq!(interpolation.stop, Rational::new(1, 8));
    }
}
