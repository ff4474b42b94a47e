// rmakers -- rhythm-makers for algorithmic composition
// Copyright (C) 2020  Fabian Thorand
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation.
//
// A copy of the license can be found in the LICENSE file in the root of
// this repository.

use expect_test::{expect, Expect};

use super::*;
use crate::incise::Incise;
use crate::maker::{divisions, RhythmMaker};
use crate::talea::Talea;
use rmakers_core::rational::Int;

fn check(maker: &dyn RhythmMaker, pairs: &[(Int, Int)], output: Expect) {
    let rhythm = maker.call(&divisions(pairs), None).unwrap();
    let rendered = format!("{}\n{}\n", rhythm, rhythm.state);
    output.assert_eq(&rendered);
}

fn check_resumed(
    maker: &dyn RhythmMaker,
    first: &[(Int, Int)],
    second: &[(Int, Int)],
    output: Expect,
) {
    let first = maker.call(&divisions(first), None).unwrap();
    let second = maker.call(&divisions(second), Some(&first.state)).unwrap();
    let rendered = format!(
        "{}\n{}\n--\n{}\n{}\n",
        first, first.state, second, second.state
    );
    output.assert_eq(&rendered);
}

fn talea(counts: Vec<Int>, denominator: Int) -> TaleaRhythmMaker {
    TaleaRhythmMaker::new(Talea::new(counts, denominator).unwrap()).unwrap()
}

#[test]
fn talea_with_extra_counts() {
    check(
        &talea(vec![1, 2, 3, 4], 16).extra_counts(vec![0, 1]),
        &[(3, 8), (4, 8), (3, 8), (4, 8)],
        expect![[r#"
            1:1 { n1/16 n1/8 n3/16 }
            9:8 { n1/4 n1/16 n1/8 n1/8~ }
            1:1 { n1/16 n1/4 n1/16 }
            9:8 { n1/8 n3/16 n1/4 }
            {divisions_consumed: 4, incomplete_last_note: false, logical_ties_produced: 12, talea_weight_consumed: 30}
        "#]],
    );
}

#[test]
fn talea_across_two_calls() {
    check_resumed(
        &talea(vec![1, 2, 3, 4], 16),
        &[(3, 8), (4, 8)],
        &[(3, 8), (4, 8)],
        expect![[r#"
            1:1 { n1/16 n1/8 n3/16 }
            1:1 { n1/4 n1/16 n1/8 n1/16 }
            {divisions_consumed: 2, incomplete_last_note: true, logical_ties_produced: 7, talea_weight_consumed: 14}
            --
            1:1 { ^n1/8 n1/4 }
            1:1 { n1/16 n1/8 n3/16 n1/8 }
            {divisions_consumed: 4, incomplete_last_note: true, logical_ties_produced: 12, talea_weight_consumed: 28}
        "#]],
    );
}

#[test]
fn talea_with_preamble() {
    let talea = Talea::new(vec![1, -1, 3, 2], 16)
        .unwrap()
        .with_preamble(vec![-2, 5])
        .unwrap();
    check(
        &TaleaRhythmMaker::new(talea).unwrap(),
        &[(3, 8), (3, 8), (3, 8)],
        expect![[r#"
            1:1 { r1/8 n1/4~ }
            1:1 { n1/16 n1/16 r1/16 n3/16 }
            1:1 { n1/8 n1/16 r1/16 n1/8 }
            {divisions_consumed: 3, incomplete_last_note: true, logical_ties_produced: 9, talea_weight_consumed: 18}
        "#]],
    );
}

#[test]
fn incised_outer_divisions() {
    let incise = Incise::new()
        .prefix(vec![1], vec![1])
        .suffix(vec![1], vec![1])
        .talea_denominator(16)
        .outer_divisions_only(true);
    check(
        &IncisedRhythmMaker::new(incise).unwrap(),
        &[(5, 8), (5, 8), (5, 8)],
        expect![[r#"
            1:1 { n1/16 n1/2~ n1/16 }
            1:1 { n1/2~ n1/8 }
            1:1 { n1/2~ n1/16 n1/16 }
            {divisions_consumed: 3, incomplete_last_note: false, logical_ties_produced: 5}
        "#]],
    );
}

#[test]
fn even_division_with_extra_counts() {
    check(
        &EvenDivisionRhythmMaker::new(vec![16])
            .unwrap()
            .extra_counts(vec![0, 1, -1]),
        &[(3, 8), (4, 8), (5, 8), (1, 16)],
        expect![[r#"
            6:6 { n1/16 n1/16 n1/16 n1/16 n1/16 n1/16 }
            9:8 { n1/16 n1/16 n1/16 n1/16 n1/16 n1/16 n1/16 n1/16 n1/16 }
            9:10 { n1/16 n1/16 n1/16 n1/16 n1/16 n1/16 n1/16 n1/16 n1/16 }
            1:1 { n1/16 }
            {divisions_consumed: 4, incomplete_last_note: false, logical_ties_produced: 25}
        "#]],
    );
}

#[test]
fn accelerando_default_interpolation() {
    check(
        &AccelerandoRhythmMaker::new(),
        &[(3, 8), (1, 8)],
        expect![[r#"
            1:1 { n1/16*63/32 n1/16*55/32 n1/16*41/32 n1/16*33/32 }
            1:1 { n1/8 }
            {divisions_consumed: 2, incomplete_last_note: false, logical_ties_produced: 5}
        "#]],
    );
}

#[test]
fn tuplets_from_ratio() {
    check(
        &TupletRhythmMaker::new(vec![vec![1, 2, 1]]).unwrap(),
        &[(3, 8), (1, 2)],
        expect![[r#"
            4:3 { n1/8 n1/4 n1/8 }
            1:1 { n1/8 n1/4 n1/8 }
            {divisions_consumed: 2, incomplete_last_note: false, logical_ties_produced: 6}
        "#]],
    );
}

#[test]
fn notes() {
    check(
        &NoteRhythmMaker::new(),
        &[(5, 8), (3, 8), (1, 6)],
        expect![[r#"
            n1/2~
            n1/8
            n3/8
            3:2 { n1/4 }
            {divisions_consumed: 3, incomplete_last_note: false, logical_ties_produced: 3}
        "#]],
    );
}

#[test]
fn multiplied_durations() {
    check(
        &MultipliedDurationRhythmMaker::new(),
        &[(1, 4), (3, 16)],
        expect![[r#"
            n1*1/4
            n1*3/16
            {divisions_consumed: 2, incomplete_last_note: false, logical_ties_produced: 2}
        "#]],
    );
}
