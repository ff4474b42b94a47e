// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

//! Accelerandi and ritardandi written as notes with multipliers.

use log::{debug, trace};
use rmakers_core::cyclic::Cyclic;

use crate::error::{Error, Result};
use crate::interpolate::{interpolate_divide, quantize, Interpolated, Interpolation, Warp};
use crate::maker::{Made, RhythmMaker};
use crate::music::{Duration, Leaf, Tuplet};
use crate::spelling::{make_leaves, Spelling};
use crate::state::State;

/// One accelerando (or ritardando) per division.
#[derive(Debug, Clone, PartialEq)]
pub struct AccelerandoRhythmMaker {
    interpolations: Cyclic<Interpolation>,
    warp: Warp,
    spelling: Spelling,
}

impl Default for AccelerandoRhythmMaker {
    fn default() -> Self {
        Self {
            interpolations: Cyclic::new(vec![Interpolation::default()]),
            warp: Warp::default(),
            spelling: Spelling::default(),
        }
    }
}

impl AccelerandoRhythmMaker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Interpolations used by successive divisions.
    pub fn interpolations(mut self, interpolations: Vec<Interpolation>) -> Result<Self> {
        if interpolations.is_empty() {
            return Err(Error::EmptyCycle {
                what: "interpolations",
            });
        }
        self.interpolations = Cyclic::new(interpolations);
        Ok(self)
    }

    pub fn warp(mut self, warp: Warp) -> Result<Self> {
        warp.validate()?;
        self.warp = warp;
        Ok(self)
    }

    pub fn spelling(mut self, spelling: Spelling) -> Self {
        self.spelling = spelling;
        self
    }

    /// Notes of the written duration whose multipliers follow the interpolation
    /// and add up to exactly `total`.
    fn make_accelerando(&self, total: Duration, interpolation: &Interpolation) -> Result<Tuplet> {
        let interpolated = interpolate_divide(
            total.to_f64(),
            interpolation.start.to_f64(),
            interpolation.stop.to_f64(),
            self.warp,
        )?;
        let durations = match interpolated {
            Interpolated::Durations(durations) => quantize(&durations),
            Interpolated::TooSmall => Vec::new(),
        };
        if durations.is_empty() {
            trace!("accelerando: {} is too short to interpolate", total);
            return Ok(Tuplet::trivial(make_leaves(total, &self.spelling)?));
        }

        let written = interpolation.written;
        let mut notes: Vec<Leaf> = durations
            .iter()
            .map(|duration| Leaf::note(written).with_multiplier(*duration / written))
            .collect();

        // the last note absorbs the rounding error, trailing notes that the
        // rounded durations have already used up are dropped
        let mut others: Duration = notes[..notes.len() - 1].iter().map(Leaf::duration).sum();
        while others >= total && notes.len() > 1 {
            notes.pop();
            others = notes[..notes.len() - 1].iter().map(Leaf::duration).sum();
        }
        if notes.len() < durations.len() {
            trace!(
                "accelerando: dropped {} notes rounded past {}",
                durations.len() - notes.len(),
                total
            );
        }
        if let Some(last) = notes.last_mut() {
            last.multiplier = Some((total - others) / written);
        }

        Ok(Tuplet::trivial(notes.into_iter().map(Into::into).collect()))
    }
}

impl RhythmMaker for AccelerandoRhythmMaker {
    fn name(&self) -> &'static str {
        "accelerando"
    }

    fn make_music(&self, divisions: &[Duration], previous: &State) -> Result<Made> {
        let interpolations = self.interpolations.rotate_left(previous.divisions_consumed);
        debug!("accelerando: {:?} warp", self.warp);

        let mut made = Vec::with_capacity(divisions.len());
        for (i, &division) in divisions.iter().enumerate() {
            let interpolation = interpolations.get(i).ok_or(Error::EmptyCycle {
                what: "interpolations",
            })?;
            let tuplet = self.make_accelerando(division, interpolation)?;
            trace!("accelerando: {} -> {}", division, tuplet);
            made.push(vec![tuplet.into()]);
        }
        Ok(Made::new(made))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::maker::divisions;
    use crate::music::Component;
    use rmakers_core::rational::Rational;

    fn interpolation(start: (i64, i64), stop: (i64, i64), written: (i64, i64)) -> Interpolation {
        Interpolation::new(start.into(), stop.into(), written.into()).unwrap()
    }

    fn leaf_durations(component: &Component) -> Vec<Duration> {
        match component {
            Component::Tuplet(tuplet) => tuplet.leaves().iter().map(|leaf| leaf.duration()).collect(),
            Component::Leaf(leaf) => vec![leaf.duration()],
        }
    }

    #[test]
    fn accelerando_decreases() {
        let maker = AccelerandoRhythmMaker::new()
            .interpolations(vec![interpolation((1, 8), (1, 20), (1, 16))])
            .unwrap();
        let rhythm = maker.call(&divisions(&[(4, 8)]), None).unwrap();
        assert_eq!(
            rhythm.music[0].to_string(),
            "1:1 { n1/16*63/32 n1/16*115/64 n1/16*91/64 n1/16*35/32 n1/16*29/32 n1/16*13/16 }"
        );
        let durations = leaf_durations(&rhythm.music[0]);
        assert!(durations.windows(2).all(|pair| pair[0] > pair[1]));
        assert_eq!(durations.iter().sum::<Duration>(), Rational::new(1, 2));
    }

    #[test]
    fn ritardando_increases() {
        let maker = AccelerandoRhythmMaker::new()
            .interpolations(vec![interpolation((1, 8), (1, 20), (1, 16)).reverse()])
            .unwrap();
        let rhythm = maker.call(&divisions(&[(4, 8)]), None).unwrap();
        assert_eq!(
            rhythm.music[0].to_string(),
            "1:1 { n1/16*3/4 n1/16*25/32 n1/16*7/8 n1/16*65/64 n1/16*79/64 n1/16*49/32 n1/16*29/16 }"
        );
        let durations = leaf_durations(&rhythm.music[0]);
        assert!(durations.windows(2).all(|pair| pair[0] < pair[1]));
        assert_eq!(durations.iter().sum::<Duration>(), Rational::new(1, 2));
    }

    #[test]
    fn too_short_division_is_one_note() {
        let rhythm = AccelerandoRhythmMaker::new()
            .call(&divisions(&[(1, 8), (3, 8)]), None)
            .unwrap();
        assert_eq!(rhythm.music[0].to_string(), "1:1 { n1/8 }");
        assert_eq!(
            rhythm.music[1].to_string(),
            "1:1 { n1/16*63/32 n1/16*55/32 n1/16*41/32 n1/16*33/32 }"
        );
    }

    #[test]
    fn durations_always_add_up() {
        let maker = AccelerandoRhythmMaker::new()
            .interpolations(vec![
                interpolation((1, 8), (1, 32), (1, 16)),
                interpolation((1, 32), (1, 8), (1, 16)),
            ])
            .unwrap()
            .warp(Warp::Power(2.5))
            .unwrap();
        let divisions = divisions(&[(5, 8), (7, 16), (3, 4), (5, 12)]);
        let rhythm = maker.call(&divisions, None).unwrap();
        for (component, division) in rhythm.music.iter().zip(&divisions) {
            assert_eq!(leaf_durations(component).iter().sum::<Duration>(), *division);
        }
    }

    #[test]
    fn rounding_never_leaves_an_empty_last_note() {
        let maker = AccelerandoRhythmMaker::new()
            .interpolations(vec![interpolation((1, 600), (1, 600), (1, 1024))])
            .unwrap();
        let rhythm = maker.call(&divisions(&[(1, 64)]), None).unwrap();
        let durations = leaf_durations(&rhythm.music[0]);
        assert!(durations.iter().all(|duration| duration.is_positive()));
        assert_eq!(durations.iter().sum::<Duration>(), Rational::new(1, 64));
        assert_eq!(durations, vec![Rational::new(1, 512); 8]);
    }

    #[test]
    fn quantized_durations_stay_positive() {
        let units = [(1, 600), (1, 300), (1, 200), (1, 100), (1, 64), (1, 50)];
        for &start in &units {
            for &stop in &units {
                let maker = AccelerandoRhythmMaker::new()
                    .interpolations(vec![interpolation(start, stop, (1, 1024))])
                    .unwrap();
                for denominator in &[64, 32, 16, 8] {
                    let division = Rational::new(1, *denominator);
                    let rhythm = maker.call(&[division], None).unwrap();
                    let durations = leaf_durations(&rhythm.music[0]);
                    assert!(
                        durations.iter().all(|duration| duration.is_positive()),
                        "{:?} {:?} {}: {}",
                        start,
                        stop,
                        division,
                        rhythm
                    );
                    assert_eq!(durations.iter().sum::<Duration>(), division);
                }
            }
        }
    }

    #[test]
    fn interpolations_rotate_with_state() {
        let slow = interpolation((1, 8), (1, 16), (1, 16));
        let fast = slow.reverse();
        let maker = AccelerandoRhythmMaker::new()
            .interpolations(vec![slow, fast])
            .unwrap();
        let first = maker.call(&divisions(&[(3, 8)]), None).unwrap();
        let second = maker.call(&divisions(&[(3, 8)]), Some(&first.state)).unwrap();
        let whole = maker.call(&divisions(&[(3, 8), (3, 8)]), None).unwrap();
        assert_eq!(second.music[0], whole.music[1]);
        assert_ne!(first.music[0], second.music[0]);
    }

    #[test]
    fn invalid_configuration() {
        assert_eq!(
            AccelerandoRhythmMaker::new().interpolations(vec![]),
            Err(Error::EmptyCycle {
                what: "interpolations"
            })
        );
        assert!(AccelerandoRhythmMaker::new().warp(Warp::Power(-1.0)).is_err());
    }
}
