use crate::data::{Dir, Pos};
use crate::map::Board;
use crate::state::State;

/// Local, incomplete deadlock test.
///
/// Catches boxes stuck in a corner and pairs of boxes stuck side by side along a wall.
/// Anything involving more than two boxes or larger frozen areas is missed.
pub(crate) fn is_deadlocked(board: &Board, state: &State) -> bool {
    state
        .boxes
        .iter()
        .any(|&b| in_corner(board, b) || in_frozen_pair(board, state, b))
}

fn in_corner(board: &Board, box_pos: Pos) -> bool {
    if board.is_goal(box_pos) {
        return false;
    }

    let wall = |dir| board.is_wall(box_pos + dir);
    (wall(Dir::Up) && wall(Dir::Left))
        || (wall(Dir::Up) && wall(Dir::Right))
        || (wall(Dir::Down) && wall(Dir::Left))
        || (wall(Dir::Down) && wall(Dir::Right))
}

/// Pairs are found from their top / left box so each is only checked once.
fn in_frozen_pair(board: &Board, state: &State, box_pos: Pos) -> bool {
    // (direction to the other box, the two sides along which a wall freezes the pair)
    let layouts = [
        (Dir::Right, [Dir::Up, Dir::Down]),
        (Dir::Down, [Dir::Left, Dir::Right]),
    ];

    for &(to_other, sides) in &layouts {
        let other = box_pos + to_other;
        if state.box_at(other).is_none() {
            continue;
        }
        if board.is_goal(box_pos) && board.is_goal(other) {
            continue;
        }
        for &side in &sides {
            if board.is_wall(box_pos + side) && board.is_wall(other + side) {
                return true;
            }
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::level::Level;

    fn deadlocked(level: &str) -> bool {
        let level: Level = level.parse().unwrap();
        is_deadlocked(&level.board, &level.state)
    }

    #[test]
    fn free_box() {
        assert!(!deadlocked(
            r"
1
#####
#   #
# $ #
#@ .#
#####
"
        ));
    }

    #[test]
    fn corners_off_goal() {
        let corners = [
            "1\n#####\n#$  #\n#  @#\n#  .#\n#####\n",
            "1\n#####\n#  $#\n#@  #\n#  .#\n#####\n",
            "1\n#####\n#.  #\n#@  #\n#$  #\n#####\n",
            "1\n#####\n#.  #\n#  @#\n#  $#\n#####\n",
        ];
        for level in &corners {
            assert!(deadlocked(level), "{}", level);
        }
    }

    #[test]
    fn corner_on_goal() {
        assert!(!deadlocked("1\n#####\n#*  #\n#  @#\n#   #\n#####\n"));
    }

    #[test]
    fn wall_without_corner() {
        // touching one wall is fine, the box can still slide along it
        assert!(!deadlocked("1\n#####\n# $ #\n#  @#\n#  .#\n#####\n"));
    }

    #[test]
    fn pair_along_wall() {
        assert!(deadlocked(
            r"
1 1
######
# $$ #
#  @ #
#..  #
######
"
        ));
        // vertical pair along the right wall
        assert!(deadlocked(
            r"
1 1
######
#    #
#.  $#
#.@ $#
#    #
######
"
        ));
    }

    #[test]
    fn pair_with_one_box_on_goal() {
        assert!(deadlocked(
            r"
1 1
######
# *$ #
#  @ #
#  . #
######
"
        ));
    }

    #[test]
    fn pair_on_goals() {
        assert!(!deadlocked(
            r"
1 1
######
# ** #
#  @ #
#    #
######
"
        ));
    }

    #[test]
    fn pair_away_from_wall() {
        assert!(!deadlocked(
            r"
1 1
######
#    #
# $$ #
#  @ #
#..  #
######
"
        ));
    }
}
