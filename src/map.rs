use std::fmt::{self, Debug, Display, Formatter};

use crate::data::{MapCell, Pos};
use crate::map_formatter::MapFormatter;
use crate::state::State;
use crate::vec2d::Vec2d;

/// The immutable part of a level: walls, floor and goals.
#[derive(Clone)]
pub struct Board {
    grid: Vec2d<MapCell>,
    goals: Vec<Pos>,
}

impl Board {
    pub(crate) fn new(grid: Vec2d<MapCell>, goals: Vec<Pos>) -> Self {
        Board { grid, goals }
    }

    pub(crate) fn grid(&self) -> &Vec2d<MapCell> {
        &self.grid
    }

    pub fn rows(&self) -> usize {
        self.grid.rows()
    }

    pub fn cols(&self) -> usize {
        self.grid.cols()
    }

    pub fn goals(&self) -> &[Pos] {
        &self.goals
    }

    /// Anything outside the grid is a wall.
    pub fn cell(&self, pos: Pos) -> MapCell {
        self.grid.get(pos).cloned().unwrap_or(MapCell::Wall)
    }

    pub fn is_wall(&self, pos: Pos) -> bool {
        self.cell(pos) == MapCell::Wall
    }

    pub fn is_goal(&self, pos: Pos) -> bool {
        self.cell(pos) == MapCell::Goal
    }

    /// Boxes must occupy exactly the goals.
    ///
    /// Boxes never share a cell and goals are unique so comparing counts
    /// and checking every box is on a goal is enough.
    pub fn is_solved(&self, state: &State) -> bool {
        state.boxes.len() == self.goals.len() && state.boxes.iter().all(|&b| self.is_goal(b))
    }

    pub fn xsb_with_state<'a>(&'a self, state: &'a State) -> MapFormatter<'a> {
        MapFormatter::new(&self.grid, Some(state))
    }

    pub fn xsb(&self) -> MapFormatter<'_> {
        MapFormatter::new(&self.grid, None)
    }
}

impl Display for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}

impl Debug for Board {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.xsb())
    }
}
