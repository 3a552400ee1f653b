use std::fmt::{self, Debug, Display, Formatter};
use std::ops::Add;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapCell {
    Wall,
    Floor,
    Goal,
}

impl Display for MapCell {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            MapCell::Wall => write!(f, "#"),
            MapCell::Floor => write!(f, " "),
            MapCell::Goal => write!(f, "."),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Contents {
    Empty,
    Box,
    Player,
}

impl Default for Contents {
    fn default() -> Self {
        Contents::Empty
    }
}

// signed so that stepping off the board is representable - such positions are treated as walls
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pos {
    pub r: i32,
    pub c: i32,
}

impl Pos {
    pub fn new(r: i32, c: i32) -> Pos {
        Pos { r, c }
    }

    /// Manhattan distance
    pub fn dist(self, other: Pos) -> u32 {
        ((self.r - other.r).abs() + (self.c - other.c).abs()) as u32
    }

    pub(crate) fn neighbors(self) -> [Pos; 4] {
        [
            self + DIRECTIONS[0],
            self + DIRECTIONS[1],
            self + DIRECTIONS[2],
            self + DIRECTIONS[3],
        ]
    }
}

impl Debug for Pos {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.r, self.c)
    }
}

impl Add<Dir> for Pos {
    type Output = Pos;

    fn add(self, dir: Dir) -> Pos {
        let (dr, dc) = dir.offset();
        Pos::new(self.r + dr, self.c + dc)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dir {
    Up,
    Down,
    Left,
    Right,
}

/// The order in which every solver tries directions - fixed so results are deterministic.
pub const DIRECTIONS: [Dir; 4] = [Dir::Up, Dir::Down, Dir::Left, Dir::Right];

impl Dir {
    pub fn offset(self) -> (i32, i32) {
        match self {
            Dir::Up => (-1, 0),
            Dir::Down => (1, 0),
            Dir::Left => (0, -1),
            Dir::Right => (0, 1),
        }
    }

    /// Accepts both cases, the case itself carries the step/push distinction.
    pub(crate) fn from_char(c: char) -> Option<Dir> {
        match c.to_ascii_lowercase() {
            'u' => Some(Dir::Up),
            'd' => Some(Dir::Down),
            'l' => Some(Dir::Left),
            'r' => Some(Dir::Right),
            _ => None,
        }
    }
}

impl Display for Dir {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            Dir::Up => write!(f, "u"),
            Dir::Down => write!(f, "d"),
            Dir::Left => write!(f, "l"),
            Dir::Right => write!(f, "r"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn moving_around() {
        let pos = Pos::new(3, 5);
        assert_eq!(pos + Dir::Up, Pos::new(2, 5));
        assert_eq!(pos + Dir::Down, Pos::new(4, 5));
        assert_eq!(pos + Dir::Left, Pos::new(3, 4));
        assert_eq!(pos + Dir::Right, Pos::new(3, 6));
        for &dir in &DIRECTIONS {
            assert_eq!(pos.dist(pos + dir), 1);
        }
    }

    #[test]
    fn manhattan() {
        assert_eq!(Pos::new(1, 1).dist(Pos::new(1, 1)), 0);
        assert_eq!(Pos::new(1, 1).dist(Pos::new(4, 3)), 5);
        assert_eq!(Pos::new(4, 3).dist(Pos::new(1, 1)), 5);
        assert_eq!(Pos::new(0, 0).dist(Pos::new(-1, 0)), 1);
    }

    #[test]
    fn parsing_dirs() {
        assert_eq!(Dir::from_char('u'), Some(Dir::Up));
        assert_eq!(Dir::from_char('D'), Some(Dir::Down));
        assert_eq!(Dir::from_char('x'), None);
    }
}
