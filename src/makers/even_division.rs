// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Divisions split evenly into notes of a fixed value.

use log::trace;
use rmakers_core::cyclic::Cyclic;
use rmakers_core::rational::{is_power_of_two, Int, Rational};

use crate::error::{Error, Result};
use crate::maker::{Made, RhythmMaker};
use crate::music::{Component, Duration, Leaf, Tuplet};
use crate::spelling::{make_leaves, Spelling};
use crate::state::State;

/// How the ratio of an even-division tuplet is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EvenDenominator {
    /// Lowest terms.
    Reduced,
    /// The number of notes the division holds before extra counts.
    FromCounts,
    Fixed(Int),
}

impl Default for EvenDenominator {
    fn default() -> Self {
        EvenDenominator::FromCounts
    }
}

/// Fills each division with equal notes of `1 / denominator`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvenDivisionRhythmMaker {
    denominators: Cyclic<Int>,
    extra_counts: Cyclic<Int>,
    denominator: EvenDenominator,
    spelling: Spelling,
}

impl EvenDivisionRhythmMaker {
    pub fn new(denominators: Vec<Int>) -> Result<Self> {
        if denominators.is_empty() {
            return Err(Error::EmptyCycle {
                what: "denominators",
            });
        }
        if let Some(&denominator) = denominators.iter().find(|d| !is_power_of_two(**d)) {
            return Err(Error::InvalidDenominator {
                denominator,
                reason: "even division denominators must be powers of two",
            });
        }
        Ok(Self {
            denominators: Cyclic::new(denominators),
            extra_counts: Cyclic::new(vec![0]),
            denominator: EvenDenominator::default(),
            spelling: Spelling::default(),
        })
    }

    /// Notes added to (or removed from) successive divisions.
    pub fn extra_counts(mut self, extra_counts: Vec<Int>) -> Self {
        self.extra_counts = if extra_counts.is_empty() {
            Cyclic::new(vec![0])
        } else {
            Cyclic::new(extra_counts)
        };
        self
    }

    pub fn denominator(mut self, denominator: EvenDenominator) -> Self {
        self.denominator = denominator;
        self
    }

    pub fn spelling(mut self, spelling: Spelling) -> Self {
        self.spelling = spelling;
        self
    }
}

/// Extra notes for a division holding `count` notes.
///
/// Positive extra counts wrap with period `count`, negative ones with period
/// `count / 2` rounded up so that at least half of the notes remain.
pub(crate) fn prolation(extra: Int, count: Int) -> Int {
    if extra > 0 {
        extra % count
    } else if extra < 0 {
        -((-extra) % ((count + 1) / 2))
    } else {
        0
    }
}

impl RhythmMaker for EvenDivisionRhythmMaker {
    fn name(&self) -> &'static str {
        "even division"
    }

    fn make_music(&self, divisions: &[Duration], previous: &State) -> Result<Made> {
        let denominators = self.denominators.rotate_left(previous.divisions_consumed);
        let extra_counts = self.extra_counts.rotate_left(previous.divisions_consumed);

        let mut made = Vec::with_capacity(divisions.len());
        for (i, &division) in divisions.iter().enumerate() {
            if !is_power_of_two(division.denominator()) {
                return Err(Error::NonPowerOfTwoDivision { division });
            }
            let basic = Rational::new(1, denominators.get(i).copied().unwrap_or(1));

            let (components, unprolated): (Vec<Component>, Option<Int>) =
                if division < basic * 2 {
                    (make_leaves(division, &self.spelling)?, None)
                } else {
                    let count = (division / basic).floor().max(1);
                    let extra = prolation(extra_counts.get(i).copied().unwrap_or(0), count);
                    let notes = (0..count + extra)
                        .map(|_| Leaf::note(basic).into())
                        .collect();
                    (notes, Some(count))
                };

            let mut tuplet = Tuplet::from_duration(division, components);
            match (self.denominator, unprolated) {
                (EvenDenominator::FromCounts, Some(count)) => {
                    tuplet.set_preferred_denominator(count)
                }
                (EvenDenominator::Fixed(denominator), _) => {
                    tuplet.set_preferred_denominator(denominator)
                }
                _ => {}
            }
            trace!("even division: {} -> {}", division, tuplet);
            made.push(vec![tuplet.into()]);
        }
        Ok(Made::new(made))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::maker::divisions;

    fn render(maker: &EvenDivisionRhythmMaker, pairs: &[(Int, Int)], previous: Option<&State>) -> Vec<String> {
        maker
            .call(&divisions(pairs), previous)
            .unwrap()
            .music
            .iter()
            .map(|c| c.to_string())
            .collect()
    }

    #[test]
    fn prolation_periods() {
        let positive: Vec<Int> = (0..12).map(|extra| prolation(extra, 6)).collect();
        assert_eq!(positive, vec![0, 1, 2, 3, 4, 5, 0, 1, 2, 3, 4, 5]);
        let negative: Vec<Int> = (0..9).map(|extra| prolation(-extra, 6)).collect();
        assert_eq!(negative, vec![0, -1, -2, 0, -1, -2, 0, -1, -2]);
    }

    #[test]
    fn sixteenths_with_extra_counts() {
        let maker = EvenDivisionRhythmMaker::new(vec![16])
            .unwrap()
            .extra_counts(vec![0, 1, -1]);
        let sixteenths = |n: usize| vec!["n1/16"; n].join(" ");
        assert_eq!(
            render(&maker, &[(3, 8), (4, 8), (5, 8), (1, 16)], None),
            vec![
                format!("6:6 {{ {} }}", sixteenths(6)),
                format!("9:8 {{ {} }}", sixteenths(9)),
                format!("9:10 {{ {} }}", sixteenths(9)),
                "1:1 { n1/16 }".to_string(),
            ]
        );
    }

    #[test]
    fn quarters() {
        let maker = EvenDivisionRhythmMaker::new(vec![4]).unwrap();
        assert_eq!(
            render(&maker, &[(5, 8), (3, 8)], None),
            vec!["4:5 { n1/4 n1/4 }", "1:1 { n3/8 }"]
        );
    }

    #[test]
    fn reduced_and_fixed_denominators() {
        let reduced = EvenDivisionRhythmMaker::new(vec![8])
            .unwrap()
            .denominator(EvenDenominator::Reduced);
        assert_eq!(
            render(&reduced, &[(2, 4)], None),
            vec!["1:1 { n1/8 n1/8 n1/8 n1/8 }"]
        );
        let fixed = reduced.denominator(EvenDenominator::Fixed(8));
        assert_eq!(
            render(&fixed, &[(2, 4)], None),
            vec!["8:8 { n1/8 n1/8 n1/8 n1/8 }"]
        );
    }

    #[test]
    fn resumes_rotation() {
        let maker = EvenDivisionRhythmMaker::new(vec![8, 16])
            .unwrap()
            .denominator(EvenDenominator::Reduced);
        let first = maker.call(&divisions(&[(1, 4)]), None).unwrap();
        assert_eq!(first.music[0].to_string(), "1:1 { n1/8 n1/8 }");
        assert_eq!(
            render(&maker, &[(1, 4)], Some(&first.state)),
            vec!["1:1 { n1/16 n1/16 n1/16 n1/16 }"]
        );
    }

    #[test]
    fn rejects_non_power_of_two() {
        let maker = EvenDivisionRhythmMaker::new(vec![8]).unwrap();
        assert_eq!(
            maker.call(&divisions(&[(1, 3)]), None),
            Err(Error::NonPowerOfTwoDivision {
                division: Rational::new(1, 3)
            })
        );
        assert!(matches!(
            EvenDivisionRhythmMaker::new(vec![6]),
            Err(Error::InvalidDenominator { denominator: 6, .. })
        ));
        assert_eq!(
            EvenDivisionRhythmMaker::new(vec![]),
            Err(Error::EmptyCycle {
                what: "denominators"
            })
        );
    }
}
