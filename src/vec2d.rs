use std::fmt::{self, Debug, Display, Formatter};
use std::ops::{Index, IndexMut};

use crate::data::Pos;

/// Rectangular grid stored row by row.
#[derive(Clone, PartialEq, Eq)]
pub(crate) struct Vec2d<T> {
    data: Vec<T>,
    rows: usize,
    cols: usize,
}

impl<T> Vec2d<T> {
    /// Rows must all have the same length - `Level::new` checks that before building a grid.
    pub(crate) fn new(grid: Vec<Vec<T>>) -> Self {
        let rows = grid.len();
        let cols = grid.first().map_or(0, |row| row.len());
        debug_assert!(grid.iter().all(|row| row.len() == cols));

        let data = grid.into_iter().flatten().collect();
        Vec2d { data, rows, cols }
    }

    pub(crate) fn rows(&self) -> usize {
        self.rows
    }

    pub(crate) fn cols(&self) -> usize {
        self.cols
    }

    pub(crate) fn contains(&self, pos: Pos) -> bool {
        pos.r >= 0 && pos.c >= 0 && (pos.r as usize) < self.rows && (pos.c as usize) < self.cols
    }

    /// The only bounds-checked access, everything else indexes directly.
    pub(crate) fn get(&self, pos: Pos) -> Option<&T> {
        if self.contains(pos) {
            Some(&self[pos])
        } else {
            None
        }
    }

    pub(crate) fn positions(&self) -> impl Iterator<Item = Pos> {
        let cols = self.cols;
        (0..self.rows * self.cols).map(move |i| Pos::new((i / cols) as i32, (i % cols) as i32))
    }

    pub(crate) fn scratchpad<U: Default + Clone>(&self) -> Vec2d<U> {
        self.scratchpad_with_default(U::default())
    }

    pub(crate) fn scratchpad_with_default<U: Clone>(&self, default: U) -> Vec2d<U> {
        Vec2d {
            data: vec![default; self.data.len()],
            rows: self.rows,
            cols: self.cols,
        }
    }

    fn index_of(&self, pos: Pos) -> usize {
        debug_assert!(self.contains(pos), "{:?} out of bounds", pos);
        pos.r as usize * self.cols + pos.c as usize
    }
}

impl<T: Display> Display for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        if self.cols == 0 {
            return Ok(());
        }
        for row in self.data.chunks(self.cols) {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

impl<T: Display> Debug for Vec2d<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self)
    }
}

impl<T> Index<Pos> for Vec2d<T> {
    type Output = T;

    fn index(&self, index: Pos) -> &Self::Output {
        &self.data[self.index_of(index)]
    }
}

impl<T> IndexMut<Pos> for Vec2d<T> {
    fn index_mut(&mut self, index: Pos) -> &mut Self::Output {
        let index = self.index_of(index);
        &mut self.data[index]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indexing() {
        let mut grid = Vec2d::new(vec![vec![0, 1, 2], vec![3, 4, 5]]);
        assert_eq!(grid.rows(), 2);
        assert_eq!(grid.cols(), 3);
        assert_eq!(grid[Pos::new(1, 0)], 3);
        grid[Pos::new(1, 2)] = 9;
        assert_eq!(grid.get(Pos::new(1, 2)), Some(&9));
        assert_eq!(grid.get(Pos::new(2, 0)), None);
        assert_eq!(grid.get(Pos::new(0, -1)), None);
        assert_eq!(grid.to_string(), "012\n349\n");
    }

    #[test]
    fn scratchpads() {
        let grid = Vec2d::new(vec![vec!['a', 'b'], vec!['c', 'd']]);
        let scratch: Vec2d<bool> = grid.scratchpad();
        assert_eq!(scratch.to_string(), "falsefalse\nfalsefalse\n");
        assert_eq!(grid.positions().count(), 4);
        assert_eq!(grid.positions().last(), Some(Pos::new(1, 1)));
    }
}
