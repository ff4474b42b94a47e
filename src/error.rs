// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Errors raised when a rhythm-maker is configured or called with invalid input.

use rmakers_core::rational::{Int, Rational};
use snafu::Snafu;

/// Precondition violations. All of them are caused by the caller's input;
/// nothing is retried and no partial output is returned.
#[derive(Debug, PartialEq, Snafu)]
pub enum Error {
    #[snafu(display("Talea counts must not contain zero"))]
    ZeroCount,
    #[snafu(display("Denominator {} is not valid here ({})", denominator, reason))]
    InvalidDenominator {
        denominator: Int,
        reason: &'static str,
    },
    #[snafu(display("Cannot advance a talea by a negative weight {}", weight))]
    NegativeAdvance { weight: Int },
    #[snafu(display("Talea has no counts to cycle through"))]
    EmptyTalea,
    #[snafu(display(
        "Talea weight {} is too short for divisions of weight {}",
        available,
        required
    ))]
    TaleaTooShort { available: Int, required: Int },
    #[snafu(display(
        "End counts of weight {} do not fit into a total weight of {}",
        end_weight,
        total
    ))]
    EndCountsTooLong { end_weight: Int, total: Int },
    #[snafu(display("Division {} is not positive", division))]
    NonPositiveDivision { division: Rational },
    #[snafu(display(
        "Division {} does not have a power of two denominator",
        division
    ))]
    NonPowerOfTwoDivision { division: Rational },
    #[snafu(display("Cannot make leaves of zero duration"))]
    ZeroDuration,
    #[snafu(display("Duration {} cannot be written as a single note", duration))]
    Unassignable { duration: Rational },
    #[snafu(display(
        "Forbidden duration {} must be an assignable duration with numerator one",
        duration
    ))]
    InvalidForbiddenDuration { duration: Rational },
    #[snafu(display("Ratio {:?} must be non-empty and free of zeros", parts))]
    InvalidRatio { parts: Vec<Int> },
    #[snafu(display("{} talea is given without {} counts", which, which))]
    MissingInciseCounts { which: &'static str },
    #[snafu(display("Incise taleas require a talea denominator"))]
    MissingTaleaDenominator,
    #[snafu(display("{} must not be empty", what))]
    EmptyCycle { what: &'static str },
    #[snafu(display("Duration {} must be positive", duration))]
    NonPositiveDuration { duration: Rational },
    #[snafu(display("Interpolation exponent {} must be positive and finite", exponent))]
    InvalidExponent { exponent: f64 },
    #[snafu(display(
        "Interpolation durations must be positive (total {}, start {}, stop {})",
        total,
        start,
        stop
    ))]
    NonPositiveInterpolation { total: f64, start: f64, stop: f64 },
    #[snafu(display(
        "Total duration {} is too small to interpolate from {} to {}",
        total,
        start,
        stop
    ))]
    InterpolationTooSmall { total: f64, start: f64, stop: f64 },
    #[snafu(display(
        "Expected {} reference durations for {} totals, got {}",
        totals + 1,
        totals,
        references
    ))]
    MismatchedInterpolation { totals: usize, references: usize },
    #[snafu(display("Extra count {} must not be negative", count))]
    NegativeExtraCount { count: Int },
    /// Raised after the fact when a maker writes a leaf that takes no time.
    #[snafu(display("{} maker produced a leaf of duration {}", maker, duration))]
    NonPositiveLeaf {
        maker: &'static str,
        duration: Rational,
    },
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
