use std::error::Error;
use std::fmt::{self, Display, Formatter};
use std::str::FromStr;

use crate::data::{MapCell, Pos};
use crate::level::{Level, LevelErr};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParserErr {
    Empty,
    Weight(String),
    Pos(usize, usize),
    MultiplePlayers,
    NoPlayer,
    Level(LevelErr),
}

impl Display for ParserErr {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match *self {
            ParserErr::Empty => write!(f, "Empty level"),
            ParserErr::Weight(ref token) => write!(f, "Invalid box weight: '{}'", token),
            ParserErr::Pos(r, c) => write!(f, "Invalid cell at pos: [{}, {}]", r, c),
            ParserErr::MultiplePlayers => write!(f, "More than one player"),
            ParserErr::NoPlayer => write!(f, "No player"),
            ParserErr::Level(ref err) => write!(f, "{}", err),
        }
    }
}

impl Error for ParserErr {}

impl From<LevelErr> for ParserErr {
    fn from(err: LevelErr) -> Self {
        ParserErr::Level(err)
    }
}

impl FromStr for Level {
    type Err = ParserErr;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        parse(s)
    }
}

/// Parses a line of box weights followed by an XSB grid.
///
/// Weights are listed in the order boxes appear in the grid, row by row.
/// The weight line can be left out for levels without boxes.
/// Rows shorter than the longest one are padded with walls.
pub(crate) fn parse(level: &str) -> Result<Level, ParserErr> {
    // trim so we can specify levels using raw strings more easily
    let level = level.trim_matches('\n').trim_end();

    let mut lines = level.lines().peekable();
    let weights = match lines.peek() {
        Some(&line) if is_weight_line(line) => {
            let weights = parse_weights(line)?;
            lines.next();
            weights
        }
        _ => Vec::new(),
    };

    let mut grid = Vec::new();
    let mut goals = Vec::new();
    let mut boxes = Vec::new();
    let mut player_pos = None;

    for (r, line) in lines.enumerate() {
        let mut line_tiles = Vec::new();
        for (c, cur_char) in line.chars().enumerate() {
            let pos = Pos::new(r as i32, c as i32);

            let tile = match cur_char {
                '#' => MapCell::Wall,
                'p' | '@' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    MapCell::Floor
                }
                'P' | '+' => {
                    if player_pos.is_some() {
                        return Err(ParserErr::MultiplePlayers);
                    }
                    player_pos = Some(pos);
                    goals.push(pos);
                    MapCell::Goal
                }
                'b' | '$' => {
                    boxes.push(pos);
                    MapCell::Floor
                }
                'B' | '*' => {
                    boxes.push(pos);
                    goals.push(pos);
                    MapCell::Goal
                }
                '.' => {
                    goals.push(pos);
                    MapCell::Goal
                }
                ' ' | '-' | '_' => MapCell::Floor,
                _ => return Err(ParserErr::Pos(r, c)),
            };
            line_tiles.push(tile);
        }
        grid.push(line_tiles);
    }

    if grid.iter().all(|row| row.is_empty()) {
        return Err(ParserErr::Empty);
    }
    let player_pos = player_pos.ok_or(ParserErr::NoPlayer)?;

    let cols = grid.iter().map(|row| row.len()).max().unwrap_or(0);
    for row in &mut grid {
        row.resize(cols, MapCell::Wall);
    }

    Ok(Level::new(grid, player_pos, boxes, goals, weights)?)
}

/// Grid rows never contain digits so any line starting with a number holds weights,
/// even when the number itself isn't a valid weight.
fn is_weight_line(line: &str) -> bool {
    let line = line.trim_start();
    line.starts_with(|c: char| c.is_ascii_digit())
        || line
            .split_whitespace()
            .next()
            .map_or(false, |token| token.parse::<i64>().is_ok())
}

fn parse_weights(line: &str) -> Result<Vec<u32>, ParserErr> {
    line.split_whitespace()
        .map(|token| {
            token
                .parse()
                .map_err(|_| ParserErr::Weight(token.to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fail_empty() {
        assert_failure("", ParserErr::Empty);
        assert_failure("1 2\n", ParserErr::Empty);
    }

    #[test]
    fn fail_no_player() {
        let level = r"
#####
#   #
#####
";
        assert_failure(level, ParserErr::NoPlayer);
    }

    #[test]
    fn fail_multiple_players() {
        let level = r"
#####
#@ +#
#####
";
        assert_failure(level, ParserErr::MultiplePlayers);
    }

    #[test]
    fn fail_pos() {
        let level = r"
1
#####
#@X.#
#####
";
        assert_failure(level, ParserErr::Pos(1, 2));
    }

    #[test]
    fn fail_weights() {
        let level = r"
1 x
#####
#@$.#
#####
";
        assert_failure(level, ParserErr::Weight("x".to_string()));

        let level = r"
-1 2
#####
#@$.#
#####
";
        assert_failure(level, ParserErr::Weight("-1".to_string()));

        let level = r"
1 2
#####
#@$.#
#####
";
        assert_failure(
            level,
            ParserErr::Level(LevelErr::WeightCount {
                boxes: 1,
                weights: 2,
            }),
        );

        // a missing weight line is not replaced by some default
        let level = r"
#####
#@$.#
#####
";
        assert_failure(
            level,
            ParserErr::Level(LevelErr::WeightCount {
                boxes: 1,
                weights: 0,
            }),
        );
    }

    #[test]
    fn simplest() {
        let level = r"
3
#####
#@$.#
#####
";
        let parsed = assert_success(level);
        assert_eq!(parsed.weights.as_slice(), &[3]);
        assert_eq!(parsed.board.goals(), &[Pos::new(1, 3)]);
    }

    #[test]
    fn no_boxes() {
        let level = r"
#####
#@  #
#####
";
        let parsed = assert_success(level);
        assert!(parsed.weights.as_slice().is_empty());
        assert!(parsed.is_solved());
    }

    #[test]
    fn weights_in_reading_order() {
        let level = r"
5 1 7
#######
#@$ * #
# $ . #
#######
";
        let parsed = assert_success(level);
        // sorted by weight: (1, 4) has 1, (1, 2) has 5, (2, 2) has 7
        assert_eq!(parsed.weights.as_slice(), &[1, 5, 7]);
        assert_eq!(
            parsed.state.boxes,
            vec![Pos::new(1, 4), Pos::new(1, 2), Pos::new(2, 2)]
        );
    }

    #[test]
    fn alternative_characters() {
        let level = "1\n#######\n#p-b_.#\n#######\n";
        let parsed: Level = level.parse().unwrap();
        assert_eq!(parsed.to_string(), "#######\n#@ $ .#\n#######\n");
    }

    #[test]
    fn short_rows_padded() {
        let level = r"
2 2
    #####
    #   #
    #$  #
  ###  $##
  #@   ..#
  ########
";
        let parsed: Level = level.parse().unwrap();
        assert_eq!(parsed.board.rows(), 6);
        assert_eq!(parsed.board.cols(), 10);
        assert!(parsed.board.is_wall(Pos::new(0, 9)));
        assert_eq!(
            parsed.to_string(),
            r"
    ######
    #   ##
    #$  ##
  ###  $##
  #@   ..#
  ########
"
            .trim_start_matches('\n')
        );
    }

    fn assert_failure(input_level: &str, expected_err: ParserErr) {
        assert_eq!(input_level.parse::<Level>().unwrap_err(), expected_err);
    }

    fn assert_success(input_level: &str) -> Level {
        let level: Level = input_level.parse().unwrap();
        let input = input_level.trim_start_matches('\n');
        let grid = if level.weights.as_slice().is_empty() {
            input
        } else {
            input.splitn(2, '\n').nth(1).unwrap()
        };
        assert_eq!(level.to_string(), grid);
        level
    }
}
