use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};
use std::str::FromStr;

use crate::data::Dir;
use crate::level::Level;
use crate::solver::rules::{self, Successor};
use crate::state::State;

// Terminology:
// move = changing player position by one cell
// push = a move that changes a box position, costs the box's weight
// step = a move that doesn't change a box position, costs 1

#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move {
    pub dir: Dir,
    pub is_push: bool,
}

impl Move {
    pub(crate) fn new(dir: Dir, is_push: bool) -> Self {
        Move { dir, is_push }
    }
}

impl Display for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.is_push {
            write!(f, "{}", self.dir.to_string().to_uppercase())?;
        } else {
            write!(f, "{}", self.dir)?;
        }
        Ok(())
    }
}

impl Debug for Move {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayErr {
    InvalidChar(char),
    /// The move at this index walks into a wall or pushes a box into a wall or another box
    Blocked(usize),
    /// The move at this index is a step but would push a box or vice versa
    PushMismatch(usize),
}

impl Display for ReplayErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ReplayErr::InvalidChar(c) => write!(f, "Invalid move character '{}'", c),
            ReplayErr::Blocked(i) => write!(f, "Move {} is blocked", i),
            ReplayErr::PushMismatch(i) => write!(f, "Move {} has the wrong push flag", i),
        }
    }
}

impl Error for ReplayErr {}

#[derive(Clone, Default, PartialEq, Eq, Hash)]
pub struct Moves(Vec<Move>);

impl Moves {
    pub(crate) fn new(moves: Vec<Move>) -> Self {
        Moves(moves)
    }

    pub fn move_cnt(&self) -> usize {
        self.0.len()
    }

    pub fn push_cnt(&self) -> usize {
        self.0.iter().filter(|m| m.is_push).count()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> ::std::slice::Iter<'_, Move> {
        self.0.iter()
    }

    /// Plays the moves from the level's initial state,
    /// returns the final state and the accumulated cost.
    pub fn replay(&self, level: &Level) -> Result<(State, u64), ReplayErr> {
        let mut state = level.state.clone();
        let mut cost = 0;
        for (i, mov) in self.0.iter().enumerate() {
            let Successor {
                state: next,
                mov: actual,
                cost: move_cost,
            } = rules::try_move(&level.board, &level.weights, &state, mov.dir)
                .ok_or(ReplayErr::Blocked(i))?;
            if actual.is_push != mov.is_push {
                return Err(ReplayErr::PushMismatch(i));
            }
            cost += u64::from(move_cost);
            state = next;
        }
        Ok((state, cost))
    }

    pub fn cost(&self, level: &Level) -> Result<u64, ReplayErr> {
        self.replay(level).map(|(_, cost)| cost)
    }
}

impl FromStr for Moves {
    type Err = ReplayErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .map(|c| {
                Dir::from_char(c)
                    .map(|dir| Move::new(dir, c.is_ascii_uppercase()))
                    .ok_or(ReplayErr::InvalidChar(c))
            })
            .collect::<Result<_, _>>()
            .map(Moves)
    }
}

impl<'a> IntoIterator for &'a Moves {
    type Item = &'a Move;
    type IntoIter = ::std::slice::Iter<'a, Move>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Display for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        for mov in self {
            write!(f, "{}", mov)?;
        }
        Ok(())
    }
}

impl Debug for Moves {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}
