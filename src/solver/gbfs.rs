use std::collections::BinaryHeap;

use fnv::FnvHashSet;
use log::{debug, info, warn};
use typed_arena::Arena;

use crate::config::{Limits, Method};
use crate::level::Level;
use crate::state::State;

use super::backtracking::{self, Prevs, Step};
use super::deadlock;
use super::heuristic;
use super::rules::{self, Successor};
use super::stats::Stats;
use super::{Budget, SearchNode, Solver, SolverOk};

/// Greedy best-first search, always expands the state that looks closest to solved.
///
/// Cost is only accumulated for reporting, it doesn't affect the order.
#[derive(Debug)]
pub struct Gbfs<'a> {
    level: &'a Level,
    limits: Limits,
}

impl<'a> Gbfs<'a> {
    pub fn new(level: &'a Level, limits: Limits) -> Self {
        Gbfs { level, limits }
    }
}

impl Solver for Gbfs<'_> {
    fn method(&self) -> Method {
        Method::Gbfs
    }

    fn runner(&self) -> SolverOk {
        let board = &self.level.board;
        let weights = &self.level.weights;
        let budget = Budget::start(self.limits);
        let mut stats = Stats::new();

        let arena = Arena::new();
        let mut visited = FnvHashSet::default();
        let mut prevs = Prevs::default();
        let mut to_visit = BinaryHeap::new();
        let mut seq = 0;

        let start: &State = arena.alloc(self.level.state.clone());
        let start_h = heuristic::greedy_nearest_goal(board, start);
        visited.insert(start);
        stats.add_created(0);
        to_visit.push(SearchNode {
            state: start,
            dist: 0,
            cost: 0,
            h: start_h,
            priority: start_h,
            seq,
        });

        while let Some(cur_node) = to_visit.pop() {
            if budget.out_of_time() {
                info!("GBFS ran out of time at estimate {}", cur_node.h);
                return SolverOk::time_out(self.method(), stats);
            }

            if board.is_solved(cur_node.state) {
                let (moves, cost) = backtracking::reconstruct_moves(&prevs, cur_node.state);
                debug!("GBFS solved in {:?}", budget.elapsed());
                return SolverOk::solved(self.method(), moves, cost, stats);
            }

            if deadlock::is_deadlocked(board, cur_node.state) {
                continue;
            }
            stats.add_unique_visited(cur_node.dist);

            for Successor { state, mov, cost } in rules::successors(board, weights, cur_node.state) {
                if visited.contains(&state) {
                    stats.add_reached_duplicate(cur_node.dist + 1);
                    continue;
                }
                if budget.node_cap_reached(&stats) {
                    warn!(
                        "GBFS hit the node limit with {} states left to visit",
                        to_visit.len()
                    );
                    return SolverOk::no_solution(self.method(), stats);
                }

                let h = if mov.is_push {
                    heuristic::greedy_nearest_goal(board, &state)
                } else {
                    cur_node.h
                };
                let next_state: &State = arena.alloc(state);
                visited.insert(next_state);
                prevs.insert(
                    next_state,
                    Step {
                        prev: cur_node.state,
                        mov,
                        cost,
                    },
                );
                if stats.add_created(cur_node.dist + 1) {
                    debug!("GBFS reached depth {}", cur_node.dist + 1);
                }
                seq += 1;
                to_visit.push(SearchNode {
                    state: next_state,
                    dist: cur_node.dist + 1,
                    cost: cur_node.cost + u64::from(cost),
                    h,
                    priority: h,
                    seq,
                });
            }
        }

        debug!("GBFS exhausted the search space in {:?}", budget.elapsed());
        SolverOk::no_solution(self.method(), stats)
    }
}
