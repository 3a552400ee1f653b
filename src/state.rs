use std::ops::Range;

use crate::data::{Dir, Pos};

/// Box weights, indexed by box.
///
/// Boxes are ordered by weight so boxes of equal weight form contiguous groups.
/// Boxes within a group are interchangeable which is what makes canonicalization possible.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Weights {
    weights: Vec<u32>,
    groups: Vec<Range<usize>>,
}

impl Weights {
    /// `weights` must be sorted.
    pub(crate) fn new(weights: Vec<u32>) -> Self {
        debug_assert!(weights.windows(2).all(|w| w[0] <= w[1]));

        let mut groups = Vec::new();
        let mut start = 0;
        for i in 1..=weights.len() {
            if i == weights.len() || weights[i] != weights[start] {
                groups.push(start..i);
                start = i;
            }
        }
        Weights { weights, groups }
    }

    pub fn of(&self, box_index: usize) -> u32 {
        self.weights[box_index]
    }

    pub fn as_slice(&self) -> &[u32] {
        &self.weights
    }

    fn canonicalize(&self, boxes: &mut [Pos]) {
        for group in &self.groups {
            boxes[group.clone()].sort();
        }
    }
}

/// Player position and box positions.
///
/// Box `i` always has weight `Weights::of(i)`. Equality and hashing ignore how the state
/// was reached (its cost) so cost-ordered searches can relax it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct State {
    pub player_pos: Pos,
    pub boxes: Vec<Pos>,
}

impl State {
    pub(crate) fn new(player_pos: Pos, mut boxes: Vec<Pos>, weights: &Weights) -> State {
        // sort to detect equal states when boxes of the same weight swap places
        weights.canonicalize(&mut boxes);
        State { player_pos, boxes }
    }

    pub fn box_at(&self, pos: Pos) -> Option<usize> {
        self.boxes.iter().position(|&b| b == pos)
    }

    pub(crate) fn step(&self, dir: Dir) -> State {
        State {
            player_pos: self.player_pos + dir,
            boxes: self.boxes.clone(),
        }
    }

    /// The player moves into the box's cell, the box moves one cell further.
    pub(crate) fn push(&self, box_index: usize, dir: Dir, weights: &Weights) -> State {
        let old_box_pos = self.boxes[box_index];
        let mut new_boxes = self.boxes.clone();
        new_boxes[box_index] = old_box_pos + dir;
        State::new(old_box_pos, new_boxes, weights)
    }
}
