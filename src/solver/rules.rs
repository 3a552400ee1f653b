use std::collections::VecDeque;

use crate::data::{Dir, Pos, DIRECTIONS};
use crate::map::Board;
use crate::moves::Move;
use crate::state::{State, Weights};
use crate::vec2d::Vec2d;

pub(crate) const STEP_COST: u32 = 1;

#[derive(Debug, Clone)]
pub(crate) struct Successor {
    pub(crate) state: State,
    pub(crate) mov: Move,
    pub(crate) cost: u32,
}

pub(crate) fn can_step(board: &Board, target: Pos) -> bool {
    !board.is_wall(target)
}

pub(crate) fn can_push(board: &Board, state: &State, target: Pos, push_target: Pos) -> bool {
    can_step(board, target) && !board.is_wall(push_target) && state.box_at(push_target).is_none()
}

/// The state after the player moves in `dir` - a step or a push depending on what's there.
pub(crate) fn try_move(board: &Board, weights: &Weights, state: &State, dir: Dir) -> Option<Successor> {
    let target = state.player_pos + dir;
    if !can_step(board, target) {
        return None;
    }

    match state.box_at(target) {
        None => Some(Successor {
            state: state.step(dir),
            mov: Move::new(dir, false),
            cost: STEP_COST,
        }),
        Some(box_index) => {
            if can_push(board, state, target, target + dir) {
                Some(Successor {
                    state: state.push(box_index, dir, weights),
                    mov: Move::new(dir, true),
                    cost: weights.of(box_index),
                })
            } else {
                None
            }
        }
    }
}

/// All legal moves in `DIRECTIONS` order.
pub(crate) fn successors<'a>(
    board: &'a Board,
    weights: &'a Weights,
    state: &'a State,
) -> impl Iterator<Item = Successor> + 'a {
    DIRECTIONS
        .iter()
        .filter_map(move |&dir| try_move(board, weights, state, dir))
}

/// Can the player walk from `src` to `dest` without pushing anything?
///
/// Box `ignored_box` doesn't block - used to check the player can get to a box it's about to push.
pub(crate) fn player_can_reach(
    board: &Board,
    state: &State,
    src: Pos,
    dest: Pos,
    ignored_box: Option<usize>,
) -> bool {
    if src == dest {
        return true;
    }

    let blocked = |pos: Pos| match state.box_at(pos) {
        Some(i) => Some(i) != ignored_box,
        None => board.is_wall(pos),
    };
    if blocked(dest) {
        return false;
    }

    let mut touched: Vec2d<bool> = board.grid().scratchpad();
    touched[src] = true;

    let mut to_visit = VecDeque::new();
    to_visit.push_back(src);

    while let Some(cur_pos) = to_visit.pop_front() {
        for &next_pos in &cur_pos.neighbors() {
            // walls surround every reachable cell but the grid doesn't have to be enclosed
            if !board.grid().contains(next_pos) || touched[next_pos] || blocked(next_pos) {
                continue;
            }
            if next_pos == dest {
                return true;
            }
            touched[next_pos] = true;
            to_visit.push_back(next_pos);
        }
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::level::Level;

    fn level() -> Level {
        r"
1 2 3
#######
#  $  #
# @$$ #
#  .. #
####  #
####.##
"
        .parse()
        .unwrap()
    }

    #[test]
    fn steps_and_pushes() {
        let level = level();
        let moves: Vec<_> = successors(&level.board, &level.weights, &level.state)
            .map(|s| s.mov.to_string())
            .collect();
        // up, down and left are steps, right pushes a box into another box
        assert_eq!(moves, vec!["u", "d", "l"]);

        let up = try_move(&level.board, &level.weights, &level.state, Dir::Up).unwrap();
        assert_eq!(up.cost, STEP_COST);
        let push = try_move(&level.board, &level.weights, &up.state, Dir::Right).unwrap();
        assert!(push.mov.is_push);
        assert_eq!(push.cost, level.weights.of(up.state.box_at(Pos::new(1, 3)).unwrap()));
        assert_eq!(push.state.player_pos, Pos::new(1, 3));
        assert!(push.state.box_at(Pos::new(1, 4)).is_some());
    }

    #[test]
    fn validity_predicates() {
        let level = level();
        let board = &level.board;
        assert!(!can_step(board, Pos::new(0, 2)));
        assert!(can_step(board, Pos::new(1, 2)));
        // box into box
        assert!(!can_push(board, &level.state, Pos::new(2, 3), Pos::new(2, 4)));
        // box into wall
        assert!(!can_push(board, &level.state, Pos::new(1, 3), Pos::new(0, 3)));
        assert!(can_push(board, &level.state, Pos::new(2, 4), Pos::new(2, 5)));
    }

    #[test]
    fn reachability() {
        let level = level();
        let board = &level.board;
        let state = &level.state;
        let player = state.player_pos;
        assert!(player_can_reach(board, state, player, player, None));
        assert!(player_can_reach(board, state, player, Pos::new(1, 5), None));
        assert!(player_can_reach(board, state, player, Pos::new(5, 4), None));
        assert!(!player_can_reach(board, state, player, Pos::new(0, 0), None));
        assert!(!player_can_reach(board, state, player, Pos::new(2, 3), None));

        let box_index = state.box_at(Pos::new(2, 3));
        assert!(player_can_reach(board, state, player, Pos::new(2, 3), box_index));
    }

    #[test]
    fn walled_in() {
        let level: Level = r"
1
#######
#@#$ .#
#######
"
        .parse()
        .unwrap();
        let state = &level.state;
        assert!(!player_can_reach(&level.board, state, state.player_pos, Pos::new(1, 4), None));
        assert_eq!(successors(&level.board, &level.weights, state).count(), 0);
    }
}
