// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Turning a signed duration into notes or rests.

use rmakers_core::rational::{greatest_power_of_two_at_most, is_power_of_two, lcm, Int, Rational};

use crate::error::{Error, Result};
use crate::music::{Component, Duration, Leaf, LeafKind, Ratio, Tuplet};

/// How durations that need more than one note head are written.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Spelling {
    /// Notes of this duration or longer are split into tied notes of half the length.
    pub forbidden_note_duration: Option<Duration>,
    /// Same as `forbidden_note_duration` for rests.
    pub forbidden_rest_duration: Option<Duration>,
    /// Write the shorter parts of a duration first.
    pub increase_monotonic: bool,
}

impl Spelling {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn forbid_notes(mut self, duration: Duration) -> Self {
        self.forbidden_note_duration = Some(duration);
        self
    }

    pub fn forbid_rests(mut self, duration: Duration) -> Self {
        self.forbidden_rest_duration = Some(duration);
        self
    }

    pub fn increase_monotonic(mut self, increase: bool) -> Self {
        self.increase_monotonic = increase;
        self
    }

    pub fn validate(&self) -> Result<()> {
        for duration in self
            .forbidden_note_duration
            .iter()
            .chain(self.forbidden_rest_duration.iter())
        {
            if !duration.is_assignable() || duration.numerator() != 1 {
                return Err(Error::InvalidForbiddenDuration {
                    duration: *duration,
                });
            }
        }
        Ok(())
    }

    fn forbidden(&self, kind: LeafKind) -> Option<Duration> {
        match kind {
            LeafKind::Note => self.forbidden_note_duration,
            LeafKind::Rest => self.forbidden_rest_duration,
        }
    }
}

/// Spell `duration` as leaves: notes if positive, rests if negative.
///
/// Notes spelled from one duration are tied together. Durations without a
/// power of two denominator are written inside a tuplet.
///
/// ```
/// # use rmakers::spelling::{make_leaves, Spelling};
/// # use rmakers_core::rational::Rational;
/// let spell = |duration| -> String {
///     make_leaves(duration, &Spelling::default())
///         .unwrap()
///         .iter()
///         .map(|component| component.to_string())
///         .collect::<Vec<_>>()
///         .join(" ")
/// };
/// assert_eq!(spell(Rational::new(5, 16)), "n1/4~ n1/16");
/// assert_eq!(spell(Rational::new(-5, 16)), "r1/4 r1/16");
/// assert_eq!(spell(Rational::new(1, 12)), "3:2 { n1/8 }");
/// ```
pub fn make_leaves(duration: Duration, spelling: &Spelling) -> Result<Vec<Component>> {
    if duration.is_zero() {
        return Err(Error::ZeroDuration);
    }
    spelling.validate()?;

    let kind = if duration.is_positive() {
        LeafKind::Note
    } else {
        LeafKind::Rest
    };
    let magnitude = duration.abs();
    let denominator = magnitude.denominator();

    if is_power_of_two(denominator) {
        let leaves = spell_tied(kind, magnitude, spelling)?;
        Ok(leaves.into_iter().map(Component::Leaf).collect())
    } else {
        let multiplier = Rational::new(greatest_power_of_two_at_most(denominator), denominator);
        let leaves = spell_tied(kind, magnitude / multiplier, spelling)?;
        Ok(vec![Component::Tuplet(Tuplet {
            ratio: Ratio::from_multiplier(multiplier),
            components: leaves.into_iter().map(Component::Leaf).collect(),
        })])
    }
}

/// Spell a positive duration with a power of two denominator.
fn spell_tied(kind: LeafKind, duration: Duration, spelling: &Spelling) -> Result<Vec<Leaf>> {
    let mut numerator = duration.numerator();
    let mut denominator = duration.denominator();
    let mut forbidden_parts = None;
    if let Some(forbidden) = spelling.forbidden(kind) {
        if forbidden <= duration {
            denominator = lcm(2 * forbidden.denominator(), denominator);
            numerator = duration.numerator() * (denominator / duration.denominator());
            let forbidden_numerator =
                forbidden.numerator() * (denominator / forbidden.denominator());
            forbidden_parts = Some((forbidden_numerator, forbidden_numerator / 2));
        }
    }

    let mut numerators = Vec::new();
    for part in canonic_parts(numerator) {
        match forbidden_parts {
            Some((forbidden, preferred)) if forbidden <= part => {
                let mut remaining = part;
                while 2 * preferred <= remaining {
                    numerators.push(preferred);
                    remaining -= preferred;
                }
                numerators.push(remaining);
            }
            _ => numerators.push(part),
        }
    }
    if spelling.increase_monotonic {
        numerators.reverse();
    }

    let mut leaves = Vec::with_capacity(numerators.len());
    for numerator in numerators {
        let written = Rational::new(numerator, denominator);
        if !written.is_assignable() {
            return Err(Error::Unassignable { duration: written });
        }
        leaves.push(Leaf::new(kind, written));
    }
    if kind == LeafKind::Note {
        let last = leaves.len().saturating_sub(1);
        for leaf in &mut leaves[..last] {
            leaf.tie = true;
        }
    }
    Ok(leaves)
}

/// Split a numerator into its runs of one-bits, largest first.
fn canonic_parts(numerator: Int) -> Vec<Int> {
    let mut parts = Vec::new();
    let mut run = 0;
    for bit in (0..64 - numerator.leading_zeros()).rev() {
        let value: Int = 1 << bit;
        if numerator & value != 0 {
            run += value;
        } else if run > 0 {
            parts.push(run);
            run = 0;
        }
    }
    if run > 0 {
        parts.push(run);
    }
    parts
}

#[cfg(test)]
mod test {
    use super::*;

    fn spell(duration: Rational, spelling: &Spelling) -> String {
        make_leaves(duration, spelling)
            .unwrap()
            .iter()
            .map(Component::to_string)
            .collect::<Vec<_>>()
            .join(" ")
    }

    #[test]
    fn canonic() {
        assert_eq!(canonic_parts(1), vec![1]);
        assert_eq!(canonic_parts(5), vec![4, 1]);
        assert_eq!(canonic_parts(7), vec![7]);
        assert_eq!(canonic_parts(11), vec![8, 3]);
        assert_eq!(canonic_parts(13), vec![12, 1]);
    }

    #[test]
    fn increasing_parts() {
        let spelling = Spelling::new().increase_monotonic(true);
        assert_eq!(spell(Rational::new(5, 16), &spelling), "n1/16~ n1/4");
        assert_eq!(spell(Rational::new(9, 8), &spelling), "n1/8~ n1");
    }

    #[test]
    fn forbidden_durations() {
        let spelling = Spelling::new()
            .forbid_notes(Rational::new(1, 4))
            .forbid_rests(Rational::new(1, 4));
        assert_eq!(spell(Rational::new(1, 4), &spelling), "n1/8~ n1/8");
        assert_eq!(spell(Rational::new(-1, 4), &spelling), "r1/8 r1/8");
        assert_eq!(spell(Rational::new(3, 16), &spelling), "n3/16");
        assert_eq!(spell(Rational::new(5, 16), &spelling), "n1/8~ n1/8~ n1/16");
    }

    #[test]
    fn invalid_forbidden_duration() {
        let spelling = Spelling::new().forbid_notes(Rational::new(3, 8));
        assert_eq!(
            make_leaves(Rational::new(1, 2), &spelling),
            Err(Error::InvalidForbiddenDuration {
                duration: Rational::new(3, 8)
            })
        );
    }

    #[test]
    fn non_power_of_two_nests() {
        let spelling = Spelling::default();
        assert_eq!(spell(Rational::new(5, 24), &spelling), "3:2 { n1/4~ n1/16 }");
        let components = make_leaves(Rational::new(1, 5), &spelling).unwrap();
        assert_eq!(components[0].duration(), Rational::new(1, 5));
        assert_eq!(components[0].to_string(), "5:4 { n1/4 }");
    }

    #[test]
    fn errors() {
        let spelling = Spelling::default();
        assert_eq!(make_leaves(Rational::ZERO, &spelling), Err(Error::ZeroDuration));
        assert_eq!(
            make_leaves(Rational::int(16), &spelling),
            Err(Error::Unassignable {
                duration: Rational::int(16)
            })
        );
    }
}
