// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! The interface shared by all rhythm-makers.

use std::fmt;

use log::debug;
use rmakers_core::rational::{Int, Rational};

use crate::error::{Error, Result};
use crate::music::{self, Component, Duration, Leaf};
use crate::state::State;

/// What a maker produced for the divisions of one call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Made {
    /// The components of each division, in division order.
    pub divisions: Vec<Vec<Component>>,
    /// Whether the last note stopped inside a talea count.
    pub incomplete_last_note: bool,
    /// Talea units consumed by this call alone.
    pub talea_weight_consumed: Option<Int>,
}

impl Made {
    pub fn new(divisions: Vec<Vec<Component>>) -> Self {
        Self {
            divisions,
            incomplete_last_note: false,
            talea_weight_consumed: None,
        }
    }
}

/// The rhythm returned to the caller together with the state for the next call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rhythm {
    pub music: Vec<Component>,
    pub state: State,
}

impl Rhythm {
    pub fn leaves(&self) -> Vec<&Leaf> {
        music::leaves(&self.music)
    }

    pub fn duration(&self) -> Duration {
        music::duration(&self.music)
    }
}

impl fmt::Display for Rhythm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, component) in self.music.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{}", component)?;
        }
        Ok(())
    }
}

/// The divisions of a call, checked to be positive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Scaffold {
    divisions: Vec<Duration>,
}

impl Scaffold {
    pub fn new(divisions: &[Duration]) -> Result<Self> {
        if let Some(&division) = divisions.iter().find(|division| !division.is_positive()) {
            return Err(Error::NonPositiveDivision { division });
        }
        Ok(Self {
            divisions: divisions.to_vec(),
        })
    }

    pub fn divisions(&self) -> &[Duration] {
        &self.divisions
    }

    pub fn duration(&self) -> Duration {
        self.divisions.iter().sum()
    }

    pub fn len(&self) -> usize {
        self.divisions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.divisions.is_empty()
    }
}

/// Divisions from `(numerator, denominator)` pairs.
///
/// ```
/// # use rmakers::maker::divisions;
/// # use rmakers_core::rational::Rational;
/// assert_eq!(divisions(&[(3, 8), (4, 8)]), vec![Rational::new(3, 8), Rational::new(1, 2)]);
/// ```
pub fn divisions(pairs: &[(Int, Int)]) -> Vec<Duration> {
    pairs.iter().map(|&pair| Rational::from(pair)).collect()
}

/// Fills divisions with rhythms.
pub trait RhythmMaker {
    /// Short name used in log messages.
    fn name(&self) -> &'static str;

    /// Produce the components of each division. The divisions are positive.
    fn make_music(&self, divisions: &[Duration], previous: &State) -> Result<Made>;

    /// Fill `divisions`, continuing from `previous` if given.
    fn call(&self, divisions: &[Duration], previous: Option<&State>) -> Result<Rhythm> {
        let previous = previous.copied().unwrap_or_default();
        let scaffold = Scaffold::new(divisions)?;
        debug!(
            "{}: {} divisions of total duration {}, previous state {}",
            self.name(),
            scaffold.len(),
            scaffold.duration(),
            previous
        );

        let made = self.make_music(scaffold.divisions(), &previous)?;
        check_output(&scaffold, &made);
        check_leaves(self.name(), &made)?;

        let Made {
            divisions: produced,
            incomplete_last_note,
            talea_weight_consumed,
        } = made;
        let music: Vec<Component> = produced.into_iter().flatten().collect();

        let mut logical_ties = music::logical_tie_count(music::leaves(&music));
        if previous.incomplete_last_note {
            logical_ties = logical_ties.saturating_sub(1);
        }
        let state = State {
            divisions_consumed: previous.divisions_consumed + scaffold.len(),
            logical_ties_produced: previous.logical_ties_produced + logical_ties,
            incomplete_last_note,
            talea_weight_consumed: talea_weight_consumed
                .map(|weight| previous.talea_weight_consumed() + weight),
        };
        debug!("{}: new state {}", self.name(), state);
        Ok(Rhythm { music, state })
    }
}

/// Internal consistency of a maker's output; violations are bugs in the maker.
fn check_output(scaffold: &Scaffold, made: &Made) {
    assert_eq!(
        made.divisions.len(),
        scaffold.len(),
        "one output per division expected"
    );
    for (division, components) in scaffold.divisions().iter().zip(&made.divisions) {
        assert_eq!(
            music::duration(components),
            *division,
            "output does not fill its division"
        );
        check_tuplets(components);
    }
}

/// Every leaf must take up time, even when the division as a whole is filled.
fn check_leaves(maker: &'static str, made: &Made) -> Result<()> {
    for components in &made.divisions {
        if let Some(leaf) = music::leaves(components)
            .into_iter()
            .find(|leaf| !leaf.duration().is_positive())
        {
            return Err(Error::NonPositiveLeaf {
                maker,
                duration: leaf.duration(),
            });
        }
    }
    Ok(())
}

fn check_tuplets(components: &[Component]) {
    for component in components {
        if let Component::Tuplet(tuplet) = component {
            assert!(!tuplet.components.is_empty(), "empty tuplet");
            assert!(
                tuplet.is_normalized(),
                "tuplet multiplier {} is not normalized",
                tuplet.multiplier()
            );
            check_tuplets(&tuplet.components);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::music::Tuplet;

    /// One rest per division.
    struct Rests;

    impl RhythmMaker for Rests {
        fn name(&self) -> &'static str {
            "rests"
        }

        fn make_music(&self, divisions: &[Duration], _previous: &State) -> Result<Made> {
            Ok(Made::new(
                divisions
                    .iter()
                    .map(|division| vec![Leaf::rest(*division).into()])
                    .collect(),
            ))
        }
    }

    /// Produces a tuplet that does not fill its division.
    struct Broken;

    impl RhythmMaker for Broken {
        fn name(&self) -> &'static str {
            "broken"
        }

        fn make_music(&self, divisions: &[Duration], _previous: &State) -> Result<Made> {
            Ok(Made::new(
                divisions
                    .iter()
                    .map(|_| {
                        let short = Leaf::note(Rational::new(1, 64));
                        vec![Tuplet::trivial(vec![short.into()]).into()]
                    })
                    .collect(),
            ))
        }
    }

    #[test]
    fn state_accumulates() {
        let first = Rests.call(&divisions(&[(1, 4), (1, 4)]), None).unwrap();
        assert_eq!(first.state.divisions_consumed, 2);
        assert_eq!(first.state.logical_ties_produced, 2);
        assert_eq!(first.state.talea_weight_consumed, None);

        let second = Rests.call(&divisions(&[(1, 2)]), Some(&first.state)).unwrap();
        assert_eq!(second.state.divisions_consumed, 3);
        assert_eq!(second.state.logical_ties_produced, 3);
        assert_eq!(second.duration(), Rational::new(1, 2));
    }

    #[test]
    fn rejects_non_positive_divisions() {
        assert_eq!(
            Rests.call(&divisions(&[(1, 4), (0, 1)]), None),
            Err(Error::NonPositiveDivision {
                division: Rational::ZERO
            })
        );
    }

    /// Fills each division with a doubled note and a negative one.
    struct Cancelling;

    impl RhythmMaker for Cancelling {
        fn name(&self) -> &'static str {
            "cancelling"
        }

        fn make_music(&self, divisions: &[Duration], _previous: &State) -> Result<Made> {
            Ok(Made::new(
                divisions
                    .iter()
                    .map(|division| {
                        let long = Leaf::note(*division).with_multiplier(Rational::int(2));
                        let negative = Leaf::note(*division).with_multiplier(Rational::int(-1));
                        vec![Tuplet::trivial(vec![long.into(), negative.into()]).into()]
                    })
                    .collect(),
            ))
        }
    }

    #[test]
    fn rejects_leaves_without_duration() {
        assert_eq!(
            Cancelling.call(&divisions(&[(1, 4)]), None),
            Err(Error::NonPositiveLeaf {
                maker: "cancelling",
                duration: Rational::new(-1, 4),
            })
        );
    }

    #[test]
    #[should_panic(expected = "output does not fill its division")]
    fn detects_broken_output() {
        let _ = Broken.call(&divisions(&[(1, 4)]), None);
    }

    #[test]
    fn scaffold_duration() {
        let scaffold = Scaffold::new(&divisions(&[(3, 8), (1, 4), (5, 16)])).unwrap();
        assert_eq!(scaffold.len(), 3);
        assert_eq!(scaffold.duration(), Rational::new(15, 16));
    }
}
