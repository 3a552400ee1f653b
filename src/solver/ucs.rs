use std::collections::BinaryHeap;

use fnv::FnvHashMap;
use log::{debug, info, warn};
use typed_arena::Arena;

use crate::config::{Limits, Method};
use crate::level::Level;
use crate::state::State;

use super::backtracking::{self, Prevs, Step};
use super::deadlock;
use super::rules::{self, Successor};
use super::stats::Stats;
use super::{Budget, SearchNode, Solver, SolverOk};

/// Uniform cost search, finds the cheapest solution.
#[derive(Debug)]
pub struct Ucs<'a> {
    level: &'a Level,
    limits: Limits,
}

impl<'a> Ucs<'a> {
    pub fn new(level: &'a Level, limits: Limits) -> Self {
        Ucs { level, limits }
    }
}

impl Solver for Ucs<'_> {
    fn method(&self) -> Method {
        Method::Ucs
    }

    fn runner(&self) -> SolverOk {
        let board = &self.level.board;
        let weights = &self.level.weights;
        let budget = Budget::start(self.limits);
        let mut stats = Stats::new();

        let arena = Arena::new();
        // cheapest known cost of every state ever queued
        let mut best_costs = FnvHashMap::default();
        let mut prevs = Prevs::default();
        let mut to_visit = BinaryHeap::new();
        let mut seq = 0;

        let start: &State = arena.alloc(self.level.state.clone());
        best_costs.insert(start, 0);
        stats.add_created(0);
        to_visit.push(SearchNode {
            state: start,
            dist: 0,
            cost: 0,
            h: 0,
            priority: 0,
            seq,
        });

        while let Some(cur_node) = to_visit.pop() {
            if budget.out_of_time() {
                info!("UCS ran out of time at cost {}", cur_node.cost);
                return SolverOk::time_out(self.method(), stats);
            }

            // a cheaper path was found after this entry was queued
            if best_costs
                .get(cur_node.state)
                .map_or(false, |&best| cur_node.cost > best)
            {
                stats.add_reached_duplicate(cur_node.dist);
                continue;
            }

            if board.is_solved(cur_node.state) {
                let (moves, cost) = backtracking::reconstruct_moves(&prevs, cur_node.state);
                debug_assert_eq!(cost, cur_node.cost);
                debug!("UCS solved in {:?}", budget.elapsed());
                return SolverOk::solved(self.method(), moves, cost, stats);
            }

            if deadlock::is_deadlocked(board, cur_node.state) {
                continue;
            }
            stats.add_unique_visited(cur_node.dist);

            for Successor { state, mov, cost } in rules::successors(board, weights, cur_node.state) {
                let target = cur_node.state.player_pos + mov.dir;
                let pushed_box = if mov.is_push {
                    cur_node.state.box_at(target)
                } else {
                    None
                };
                if !rules::player_can_reach(
                    board,
                    cur_node.state,
                    cur_node.state.player_pos,
                    target,
                    pushed_box,
                ) {
                    continue;
                }

                let next_cost = cur_node.cost + u64::from(cost);
                let known = best_costs
                    .get_key_value(&state)
                    .map(|(&known_state, &known_cost)| (known_state, known_cost));
                if let Some((_, known_cost)) = known {
                    if next_cost >= known_cost {
                        stats.add_reached_duplicate(cur_node.dist + 1);
                        continue;
                    }
                }
                if budget.node_cap_reached(&stats) {
                    warn!("UCS hit the node limit");
                    return SolverOk::no_solution(self.method(), stats);
                }

                let next_state: &State = match known {
                    Some((known_state, _)) => known_state,
                    None => arena.alloc(state),
                };
                best_costs.insert(next_state, next_cost);
                prevs.insert(
                    next_state,
                    Step {
                        prev: cur_node.state,
                        mov,
                        cost,
                    },
                );
                if stats.add_created(cur_node.dist + 1) {
                    debug!("UCS reached depth {}", cur_node.dist + 1);
                }
                seq += 1;
                to_visit.push(SearchNode {
                    state: next_state,
                    dist: cur_node.dist + 1,
                    cost: next_cost,
                    h: 0,
                    priority: next_cost,
                    seq,
                });
            }
        }

        debug!("UCS exhausted the search space in {:?}", budget.elapsed());
        SolverOk::no_solution(self.method(), stats)
    }
}
