//! Greedy navigation planner.
//!
//! One decision per position report, in this order:
//!
//! 1. Position or heading unknown: command a move, so the next report
//!    reveals what is missing.
//! 2. Standing on an unprobed search cell: pick up the message there.
//! 3. Otherwise head for the nearest unprobed cell by taxicab distance
//!    (scan-order tie-break), stepping through whichever of the
//!    forward/right/left neighbor cells is closest to it. Equally good
//!    candidates resolve in that order, so the robot moves rather than
//!    spins. A target dead astern ties all three candidates one step
//!    worse than standing still; the planner then comes about with two
//!    right turns instead of walking away.
//!
//! The grid has no obstacles, so the distance to the current target
//! drops by one with every commanded move and the sweep terminates.

use crate::grid::{self, Vector2};

use super::Robot;

/// A planner decision, one per position report.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Move,
    TurnLeft,
    TurnRight,
    GetMessage,
}

/// Decide the next command for `robot`.
///
/// Turn commands rotate the tracked heading immediately; the robot turns
/// in place and its next report repeats the old position. Returns `None`
/// once every search cell has been probed, which the session treats as
/// mission complete.
pub fn next_command(robot: &mut Robot) -> Option<Command> {
    let (Some(position), Some(heading)) = (robot.position(), robot.heading()) else {
        // Only a move makes the next report reveal position or heading.
        return Some(Command::Move);
    };

    if position.in_search_area() && !robot.is_searched(position) {
        return Some(Command::GetMessage);
    }

    let target = nearest_unsearched(robot, position)?;

    // Cells reachable with at most one turn, probed in tie-break order.
    let forward = (position + heading).taxicab(target);
    let mut best = (Command::Move, forward);
    let right = (position + heading.rotate_right()).taxicab(target);
    if right < best.1 {
        best = (Command::TurnRight, right);
    }
    let left = (position + heading.rotate_left()).taxicab(target);
    if left < best.1 {
        best = (Command::TurnLeft, left);
    }

    // No candidate improves only when the target sits dead astern.
    let command = if best.1 > position.taxicab(target) {
        Command::TurnRight
    } else {
        best.0
    };

    match command {
        Command::TurnLeft => robot.turn_left(),
        Command::TurnRight => robot.turn_right(),
        Command::Move | Command::GetMessage => {}
    }
    tracing::trace!(%position, %heading, %target, ?command, "planned");
    Some(command)
}

/// Nearest unprobed search cell; ties go to the fixed scan order.
fn nearest_unsearched(robot: &Robot, from: Vector2) -> Option<Vector2> {
    let mut best: Option<(Vector2, u32)> = None;
    for cell in grid::search_cells() {
        if robot.is_searched(cell) {
            continue;
        }
        let distance = from.taxicab(cell);
        if best.is_none_or(|(_, b)| distance < b) {
            best = Some((cell, distance));
        }
    }
    best.map(|(cell, _)| cell)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn robot_at(position: Vector2, heading: Vector2) -> Robot {
        let mut robot = Robot::new();
        robot.move_to(position);
        robot.move_to(Vector2::new(position.x - heading.x, position.y - heading.y));
        robot.move_to(position);
        assert_eq!(robot.heading(), Some(heading));
        robot
    }

    #[test]
    fn moves_until_position_is_known() {
        let mut robot = Robot::new();
        assert_eq!(next_command(&mut robot), Some(Command::Move));
    }

    #[test]
    fn moves_until_heading_is_known() {
        let mut robot = Robot::new();
        robot.move_to(Vector2::new(0, 0));
        assert_eq!(next_command(&mut robot), Some(Command::Move));
    }

    #[test]
    fn picks_up_on_an_unprobed_search_cell() {
        let mut robot = robot_at(Vector2::new(2, 2), Vector2::new(1, 0));
        assert_eq!(next_command(&mut robot), Some(Command::GetMessage));
        // A pickup is not a turn; the tracked heading stays put.
        assert_eq!(robot.heading(), Some(Vector2::new(1, 0)));
    }

    #[test]
    fn nearest_unprobed_cell_ties_resolve_in_scan_order() {
        // All four neighbors of the origin are unprobed and equally near;
        // the scan visits (-1,0) first.
        let mut robot = robot_at(Vector2::new(0, 0), Vector2::new(1, 0));
        robot.mark_searched();
        assert_eq!(
            nearest_unsearched(&robot, Vector2::new(0, 0)),
            Some(Vector2::new(-1, 0))
        );
    }

    #[test]
    fn forward_wins_an_improving_tie() {
        // Only (2,1) is unprobed. From (0,0) facing east both the forward
        // cell (1,0) and the left cell (0,1) are two steps from it, and
        // both beat standing still; the robot moves rather than turns.
        let mut robot = Robot::new();
        for cell in grid::search_cells() {
            if cell != Vector2::new(2, 1) {
                robot.move_to(cell);
                robot.mark_searched();
            }
        }
        robot.move_to(Vector2::new(-1, 0));
        robot.move_to(Vector2::new(0, 0));
        assert_eq!(robot.heading(), Some(Vector2::new(1, 0)));
        assert_eq!(next_command(&mut robot), Some(Command::Move));
        assert_eq!(robot.heading(), Some(Vector2::new(1, 0)));
    }

    #[test]
    fn turns_right_when_the_right_cell_is_closest() {
        // Only (1,-1) is unprobed; from (1,0) facing east the right-hand
        // neighbor lands on it.
        let mut robot = Robot::new();
        for cell in grid::search_cells() {
            if cell != Vector2::new(1, -1) {
                robot.move_to(cell);
                robot.mark_searched();
            }
        }
        robot.move_to(Vector2::new(0, 0));
        robot.move_to(Vector2::new(1, 0));
        assert_eq!(next_command(&mut robot), Some(Command::TurnRight));
        assert_eq!(robot.heading(), Some(Vector2::new(0, -1)));
    }

    #[test]
    fn turns_left_when_the_left_cell_is_closest() {
        let mut robot = Robot::new();
        for cell in grid::search_cells() {
            if cell != Vector2::new(1, 1) {
                robot.move_to(cell);
                robot.mark_searched();
            }
        }
        robot.move_to(Vector2::new(0, 0));
        robot.move_to(Vector2::new(1, 0));
        assert_eq!(next_command(&mut robot), Some(Command::TurnLeft));
        assert_eq!(robot.heading(), Some(Vector2::new(0, 1)));
    }

    #[test]
    fn comes_about_when_the_target_is_dead_astern() {
        // Everything but (0,0) is probed and the robot faces east at
        // (2,0), so the only remaining cell sits directly behind it.
        let mut robot = Robot::new();
        for cell in grid::search_cells() {
            if cell != Vector2::new(0, 0) {
                robot.move_to(cell);
                robot.mark_searched();
            }
        }
        robot.move_to(Vector2::new(1, 0));
        robot.move_to(Vector2::new(2, 0));
        assert_eq!(robot.heading(), Some(Vector2::new(1, 0)));

        assert_eq!(next_command(&mut robot), Some(Command::TurnRight));
        assert_eq!(robot.heading(), Some(Vector2::new(0, -1)));
        robot.move_to(Vector2::new(2, 0));
        assert_eq!(next_command(&mut robot), Some(Command::TurnRight));
        assert_eq!(robot.heading(), Some(Vector2::new(-1, 0)));
        robot.move_to(Vector2::new(2, 0));
        assert_eq!(next_command(&mut robot), Some(Command::Move));
        robot.move_to(Vector2::new(1, 0));
        assert_eq!(next_command(&mut robot), Some(Command::Move));
        robot.move_to(Vector2::new(0, 0));
        assert_eq!(next_command(&mut robot), Some(Command::GetMessage));
    }

    #[test]
    fn finishes_once_every_cell_is_probed() {
        let mut robot = Robot::new();
        for cell in grid::search_cells() {
            robot.move_to(cell);
            robot.mark_searched();
        }
        robot.move_to(Vector2::new(0, 0));
        robot.move_to(Vector2::new(1, 0));
        assert_eq!(robot.searched_count(), grid::SEARCH_CELLS);
        assert_eq!(next_command(&mut robot), None);
    }
}
