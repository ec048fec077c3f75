//! Server-side robot tracking.
//!
//! The server never hears a robot's heading directly. It infers it: two
//! successive position reports one unit step apart fix the heading, and a
//! report that repeats the previous position is the stationary
//! acknowledgement of a turn. Everything the planner needs lives here:
//!
//! - `position` — known once the first `OK x y` arrives.
//! - `heading` — a unit vector, known once two consistent reports arrive.
//! - `searched` — the search-area cells already probed for the message.

pub mod navigator;

use std::collections::HashSet;

use crate::grid::Vector2;

/// Inferred state of one robot.
#[derive(Debug, Default)]
pub struct Robot {
    position: Option<Vector2>,
    heading: Option<Vector2>,
    searched: HashSet<Vector2>,
}

impl Robot {
    pub fn new() -> Self {
        Robot::default()
    }

    pub fn position(&self) -> Option<Vector2> {
        self.position
    }

    pub fn heading(&self) -> Option<Vector2> {
        self.heading
    }

    /// Record a position report.
    ///
    /// The first report fixes the position. A repeated identical position
    /// leaves the heading alone (the robot turned in place). A unit-step
    /// delta fixes the heading; any larger delta is inconsistent with a
    /// single move, so the heading is dropped until two consistent
    /// reports arrive again.
    pub fn move_to(&mut self, to: Vector2) {
        if let Some(from) = self.position {
            if from != to {
                let delta = Vector2::new(to.x - from.x, to.y - from.y);
                if delta.is_unit_step() {
                    self.heading = Some(delta);
                } else {
                    tracing::debug!(%from, %to, "position jumped, heading dropped");
                    self.heading = None;
                }
            }
        }
        self.position = Some(to);
    }

    /// Rotate the tracked heading a quarter turn counter-clockwise.
    ///
    /// No-op while the heading is unknown; the robot still turns, but
    /// there is nothing to track until it is observed moving.
    pub fn turn_left(&mut self) {
        self.heading = self.heading.map(Vector2::rotate_left);
    }

    /// Rotate the tracked heading a quarter turn clockwise.
    pub fn turn_right(&mut self) {
        self.heading = self.heading.map(Vector2::rotate_right);
    }

    /// Mark the current cell as probed.
    ///
    /// Only search-area cells are recorded; with the position unknown or
    /// outside the area this does nothing.
    pub fn mark_searched(&mut self) {
        if let Some(position) = self.position {
            if position.in_search_area() && self.searched.insert(position) {
                tracing::debug!(cell = %position, probed = self.searched.len(), "cell probed");
            }
        }
    }

    pub fn is_searched(&self, cell: Vector2) -> bool {
        self.searched.contains(&cell)
    }

    /// Number of search-area cells already probed.
    pub fn searched_count(&self) -> usize {
        self.searched.len()
    }
}
