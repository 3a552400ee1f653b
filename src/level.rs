use std::error::Error;
use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{MapCell, Pos};
use crate::map::Board;
use crate::map_formatter::MapFormatter;
use crate::state::{State, Weights};
use crate::vec2d::Vec2d;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LevelErr {
    Empty,
    NonRectangular {
        row: usize,
        expected: usize,
        found: usize,
    },
    WeightCount {
        boxes: usize,
        weights: usize,
    },
    OutOfBounds(Pos),
    OnWall(Pos),
    DuplicateBox(Pos),
    DuplicateGoal(Pos),
    PlayerOnBox(Pos),
}

impl Display for LevelErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            LevelErr::Empty => write!(f, "Empty grid"),
            LevelErr::NonRectangular {
                row,
                expected,
                found,
            } => write!(
                f,
                "Grid is not rectangular - row {} has {} columns, expected {}",
                row, found, expected
            ),
            LevelErr::WeightCount { boxes, weights } => write!(
                f,
                "Got {} weights for {} boxes - every box needs exactly one weight",
                weights, boxes
            ),
            LevelErr::OutOfBounds(pos) => write!(f, "Position {:?} is outside the grid", pos),
            LevelErr::OnWall(pos) => write!(f, "Player, box or goal on a wall at {:?}", pos),
            LevelErr::DuplicateBox(pos) => write!(f, "Multiple boxes at {:?}", pos),
            LevelErr::DuplicateGoal(pos) => write!(f, "Multiple goals at {:?}", pos),
            LevelErr::PlayerOnBox(pos) => write!(f, "Player and box share {:?}", pos),
        }
    }
}

impl Error for LevelErr {}

/// A validated level - the only input the solvers accept.
#[derive(Clone)]
pub struct Level {
    pub board: Board,
    pub state: State,
    pub weights: Weights,
}

impl Level {
    /// `weights[i]` belongs to `boxes[i]`.
    ///
    /// Goals are the union of `goals` and the grid's `Goal` cells.
    pub fn new(
        grid: Vec<Vec<MapCell>>,
        player_pos: Pos,
        boxes: Vec<Pos>,
        goals: Vec<Pos>,
        weights: Vec<u32>,
    ) -> Result<Level, LevelErr> {
        let cols = grid.first().map_or(0, |row| row.len());
        if cols == 0 {
            return Err(LevelErr::Empty);
        }
        for (row, cells) in grid.iter().enumerate() {
            if cells.len() != cols {
                return Err(LevelErr::NonRectangular {
                    row,
                    expected: cols,
                    found: cells.len(),
                });
            }
        }
        if boxes.len() != weights.len() {
            return Err(LevelErr::WeightCount {
                boxes: boxes.len(),
                weights: weights.len(),
            });
        }

        let mut grid = Vec2d::new(grid);
        let check_pos = |pos: Pos| match grid.get(pos) {
            None => Err(LevelErr::OutOfBounds(pos)),
            Some(MapCell::Wall) => Err(LevelErr::OnWall(pos)),
            Some(_) => Ok(()),
        };

        check_pos(player_pos)?;
        for (i, &b) in boxes.iter().enumerate() {
            check_pos(b)?;
            if boxes[..i].contains(&b) {
                return Err(LevelErr::DuplicateBox(b));
            }
            if b == player_pos {
                return Err(LevelErr::PlayerOnBox(b));
            }
        }
        for (i, &g) in goals.iter().enumerate() {
            check_pos(g)?;
            if goals[..i].contains(&g) {
                return Err(LevelErr::DuplicateGoal(g));
            }
        }

        let mut all_goals = goals;
        for pos in grid.positions() {
            if grid[pos] == MapCell::Goal && !all_goals.contains(&pos) {
                all_goals.push(pos);
            }
        }
        for &g in &all_goals {
            grid[g] = MapCell::Goal;
        }

        // stable sort keeps the original order among boxes of equal weight
        let mut weighted: Vec<_> = boxes.into_iter().zip(weights).collect();
        weighted.sort_by_key(|&(_, w)| w);
        let (boxes, weights): (Vec<_>, Vec<_>) = weighted.into_iter().unzip();

        let weights = Weights::new(weights);
        let state = State::new(player_pos, boxes, &weights);
        Ok(Level {
            board: Board::new(grid, all_goals),
            state,
            weights,
        })
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        self.board.xsb_with_state(&self.state)
    }

    pub fn is_solved(&self) -> bool {
        self.board.is_solved(&self.state)
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Level {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.xsb())
    }
}
