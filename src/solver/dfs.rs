use fnv::FnvHashSet;
use log::{debug, info, warn};
use typed_arena::Arena;

use crate::config::{Limits, Method};
use crate::data::DIRECTIONS;
use crate::level::Level;
use crate::moves::{Move, Moves};
use crate::state::State;

use super::deadlock;
use super::rules;
use super::stats::Stats;
use super::{Budget, Solver, SolverOk};

/// Depth-first search, returns the first solution it runs into.
#[derive(Debug)]
pub struct Dfs<'a> {
    level: &'a Level,
    limits: Limits,
}

impl<'a> Dfs<'a> {
    pub fn new(level: &'a Level, limits: Limits) -> Self {
        Dfs { level, limits }
    }
}

/// One level of the explicit recursion stack.
#[derive(Debug)]
struct Frame<'a> {
    state: &'a State,
    /// The move that led here and its cost, none for the start
    mov: Option<(Move, u32)>,
    /// Index into `DIRECTIONS` of the next child to try
    next_dir: usize,
}

impl Solver for Dfs<'_> {
    fn method(&self) -> Method {
        Method::Dfs
    }

    fn runner(&self) -> SolverOk {
        let board = &self.level.board;
        let weights = &self.level.weights;
        let budget = Budget::start(self.limits);
        let mut stats = Stats::new();

        let arena = Arena::new();
        let mut visited = FnvHashSet::default();

        let start: &State = arena.alloc(self.level.state.clone());
        visited.insert(start);
        stats.add_created(0);
        let mut stack = vec![Frame {
            state: start,
            mov: None,
            next_dir: 0,
        }];

        while !stack.is_empty() {
            if budget.out_of_time() {
                info!("DFS ran out of time at depth {}", stack.len() - 1);
                return SolverOk::time_out(self.method(), stats);
            }

            let depth = stack.len() - 1;
            let frame = &mut stack[depth];

            if frame.next_dir == 0 {
                // entered for the first time
                if board.is_solved(frame.state) {
                    let (moves, cost) = path(&stack);
                    debug!("DFS solved in {:?}", budget.elapsed());
                    return SolverOk::solved(self.method(), moves, cost, stats);
                }
                if deadlock::is_deadlocked(board, frame.state) {
                    stack.pop();
                    continue;
                }
                stats.add_unique_visited(depth);
            }

            if frame.next_dir == DIRECTIONS.len() {
                // backtrack
                stack.pop();
                continue;
            }
            let dir = DIRECTIONS[frame.next_dir];
            frame.next_dir += 1;

            let successor = match rules::try_move(board, weights, frame.state, dir) {
                Some(successor) => successor,
                None => continue,
            };
            if visited.contains(&successor.state) {
                stats.add_reached_duplicate(depth + 1);
                continue;
            }
            if budget.node_cap_reached(&stats) {
                warn!("DFS hit the node limit");
                return SolverOk::no_solution(self.method(), stats);
            }

            let next_state: &State = arena.alloc(successor.state);
            visited.insert(next_state);
            if stats.add_created(depth + 1) {
                debug!("DFS reached depth {}", depth + 1);
            }
            stack.push(Frame {
                state: next_state,
                mov: Some((successor.mov, successor.cost)),
                next_dir: 0,
            });
        }

        debug!("DFS exhausted the search space in {:?}", budget.elapsed());
        SolverOk::no_solution(self.method(), stats)
    }
}

/// The moves leading to the top of the stack.
fn path(stack: &[Frame<'_>]) -> (Moves, u64) {
    let mut moves = Vec::with_capacity(stack.len());
    let mut cost = 0;
    for &(mov, move_cost) in stack.iter().filter_map(|frame| frame.mov.as_ref()) {
        moves.push(mov);
        cost += u64::from(move_cost);
    }
    (Moves::new(moves), cost)
}
