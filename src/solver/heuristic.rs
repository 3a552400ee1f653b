use crate::map::Board;
use crate::state::{State, Weights};

/// Added by the greedy heuristic for each box left without a goal
pub(crate) const UNMATCHED_PENALTY: u64 = 99;

/// Weighted Manhattan distance of the cheapest one-to-one assignment of boxes to goals.
///
/// Each box needs at least as many pushes as its Manhattan distance to its goal,
/// each costing its weight, so this never overestimates when boxes and goals are equal in number.
/// Walls and other boxes are ignored which keeps it cheap but loose.
pub(crate) fn assignment(board: &Board, weights: &Weights, state: &State) -> u64 {
    let costs: Vec<Vec<i64>> = state
        .boxes
        .iter()
        .enumerate()
        .map(|(i, &b)| {
            board
                .goals()
                .iter()
                .map(|&g| i64::from(weights.of(i)) * i64::from(b.dist(g)))
                .collect()
        })
        .collect();

    min_cost_assignment(&costs) as u64
}

/// Each box in turn takes its nearest remaining goal, ignoring weights.
pub(crate) fn greedy_nearest_goal(board: &Board, state: &State) -> u64 {
    let mut remaining = board.goals().to_vec();
    let mut total = 0;

    for &box_pos in &state.boxes {
        if board.is_goal(box_pos) {
            if let Some(i) = remaining.iter().position(|&g| g == box_pos) {
                remaining.remove(i);
            }
            continue;
        }

        let nearest = remaining
            .iter()
            .enumerate()
            .min_by_key(|&(_, &g)| box_pos.dist(g))
            .map(|(i, &g)| (i, box_pos.dist(g)));
        match nearest {
            Some((i, dist)) => {
                total += u64::from(dist);
                remaining.remove(i);
            }
            None => total += UNMATCHED_PENALTY,
        }
    }

    total
}

/// Hungarian algorithm (Kuhn-Munkres with potentials), O(n^2 * m).
///
/// Works for rectangular matrices - the smaller side is matched completely.
pub(crate) fn min_cost_assignment(costs: &[Vec<i64>]) -> i64 {
    let rows = costs.len();
    let cols = costs.first().map_or(0, |row| row.len());
    if rows == 0 || cols == 0 {
        return 0;
    }
    if rows > cols {
        let transposed: Vec<Vec<i64>> = (0..cols)
            .map(|c| (0..rows).map(|r| costs[r][c]).collect())
            .collect();
        return min_cost_assignment(&transposed);
    }

    // 1-based, index 0 is the fictional row / column the augmenting paths start from
    let mut row_pot = vec![0i64; rows + 1];
    let mut col_pot = vec![0i64; cols + 1];
    // which row is assigned to each column
    let mut col_row = vec![0usize; cols + 1];
    let mut way = vec![0usize; cols + 1];

    for row in 1..=rows {
        col_row[0] = row;
        let mut cur_col = 0;
        let mut min_slack = vec![i64::max_value(); cols + 1];
        let mut used = vec![false; cols + 1];

        loop {
            used[cur_col] = true;
            let cur_row = col_row[cur_col];
            let mut delta = i64::max_value();
            let mut next_col = 0;

            for col in 1..=cols {
                if used[col] {
                    continue;
                }
                let slack = costs[cur_row - 1][col - 1] - row_pot[cur_row] - col_pot[col];
                if slack < min_slack[col] {
                    min_slack[col] = slack;
                    way[col] = cur_col;
                }
                if min_slack[col] < delta {
                    delta = min_slack[col];
                    next_col = col;
                }
            }

            for col in 0..=cols {
                if used[col] {
                    row_pot[col_row[col]] += delta;
                    col_pot[col] -= delta;
                } else {
                    min_slack[col] -= delta;
                }
            }

            cur_col = next_col;
            if col_row[cur_col] == 0 {
                break;
            }
        }

        // flip the augmenting path
        loop {
            let prev_col = way[cur_col];
            col_row[cur_col] = col_row[prev_col];
            cur_col = prev_col;
            if cur_col == 0 {
                break;
            }
        }
    }

    (1..=cols)
        .filter(|&col| col_row[col] != 0)
        .map(|col| costs[col_row[col] - 1][col - 1])
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::level::Level;

    #[test]
    fn square_assignment() {
        let costs = vec![vec![4, 1, 3], vec![2, 0, 5], vec![3, 2, 2]];
        assert_eq!(min_cost_assignment(&costs), 5);

        let costs = vec![vec![7]];
        assert_eq!(min_cost_assignment(&costs), 7);

        // the greedy choice (row 0 takes the 1) is not optimal here
        let costs = vec![vec![1, 2], vec![1, 10]];
        assert_eq!(min_cost_assignment(&costs), 3);
    }

    #[test]
    fn rectangular_assignment() {
        let costs = vec![vec![1, 2, 3], vec![3, 1, 2]];
        assert_eq!(min_cost_assignment(&costs), 2);

        let costs = vec![vec![1, 3], vec![2, 1], vec![3, 2]];
        assert_eq!(min_cost_assignment(&costs), 2);

        assert_eq!(min_cost_assignment(&[]), 0);
    }

    #[test]
    fn weighted_heuristic() {
        let level: Level = r"
3
#######
#@$ . #
#     #
#######
"
        .parse()
        .unwrap();
        assert_eq!(assignment(&level.board, &level.weights, &level.state), 6);
        assert_eq!(greedy_nearest_goal(&level.board, &level.state), 2);
    }

    #[test]
    fn heavy_box_gets_the_closer_goal() {
        // box weights 1 (left) and 10 (right), goals at both ends
        let level: Level = r"
1 10
#########
#.$  $ .#
#   @   #
#########
"
        .parse()
        .unwrap();
        // light box: 1 * 1 to the left goal, heavy box: 10 * 2 to the right goal
        assert_eq!(assignment(&level.board, &level.weights, &level.state), 1 + 20);
        // the greedy one doesn't care about weights
        assert_eq!(greedy_nearest_goal(&level.board, &level.state), 1 + 2);
    }

    #[test]
    fn greedy_skips_boxes_on_goals() {
        let level: Level = r"
1 1
########
#*$  ..#
#  @   #
########
"
        .parse()
        .unwrap();
        // the box on the goal contributes nothing and keeps its goal,
        // the other box takes the nearer of the two remaining goals
        assert_eq!(greedy_nearest_goal(&level.board, &level.state), 3);
        assert_eq!(assignment(&level.board, &level.weights, &level.state), 3);
    }

    #[test]
    fn greedy_penalty_for_unmatched_boxes() {
        let level: Level = r"
1 1
#######
#$ $ .#
#  @  #
#######
"
        .parse()
        .unwrap();
        // first box takes the only goal (4 away), the second one gets the penalty
        assert_eq!(greedy_nearest_goal(&level.board, &level.state), 4 + UNMATCHED_PENALTY);
    }
}
