//! Geometry helpers: segment distance, straight-line stepping, and the
//! fixed enemy path.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Position;

/// Shortest distance from `point` to the segment `a`-`b`.
///
/// Projects onto the segment's line and clamps the parameter to `[0, 1]`.
/// A degenerate segment (`a == b`) measures the distance to `a`.
pub fn point_to_segment_distance(point: Position, a: Position, b: Position) -> f64 {
    let p = point.as_dvec2();
    let start = a.as_dvec2();
    let seg = b.as_dvec2() - start;
    let len_sq = seg.length_squared();
    if len_sq == 0.0 {
        return p.distance(start);
    }
    let t = ((p - start).dot(seg) / len_sq).clamp(0.0, 1.0);
    p.distance(start + seg * t)
}

/// Result of moving a point toward a destination by at most `max_step`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    pub position: Position,
    /// True when the step would have reached or passed the destination
    /// and was clamped onto it.
    pub arrived: bool,
}

/// Move `from` toward `to` by at most `max_step` units, never overshooting.
pub fn step_toward(from: Position, to: Position, max_step: f64) -> Step {
    let origin = from.as_dvec2();
    let delta = to.as_dvec2() - origin;
    let distance = delta.length();
    if distance <= max_step || distance == 0.0 {
        return Step {
            position: to,
            arrived: true,
        };
    }
    let moved: DVec2 = origin + delta / distance * max_step;
    Step {
        position: moved.into(),
        arrived: false,
    }
}

/// Reasons a waypoint list cannot form a path.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PathError {
    #[error("a path needs at least 2 waypoints, got {0}")]
    TooShort(usize),
    #[error("waypoint {index} has a non-finite coordinate")]
    NonFinite { index: usize },
}

/// The fixed polyline enemies walk from spawn to castle.
///
/// Read-only after construction; always holds at least two waypoints.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<Position>", into = "Vec<Position>")]
pub struct Path {
    waypoints: Vec<Position>,
}

impl Path {
    pub fn new(waypoints: Vec<Position>) -> Result<Self, PathError> {
        if waypoints.len() < 2 {
            return Err(PathError::TooShort(waypoints.len()));
        }
        if let Some(index) = waypoints.iter().position(|p| !p.is_finite()) {
            return Err(PathError::NonFinite { index });
        }
        Ok(Self { waypoints })
    }

    /// The classic route across the 800×600 field.
    pub fn classic() -> Self {
        Self {
            waypoints: crate::constants::CLASSIC_PATH
                .iter()
                .map(|&(x, y)| Position::new(x, y))
                .collect(),
        }
    }

    pub fn waypoints(&self) -> &[Position] {
        &self.waypoints
    }

    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }

    pub fn waypoint(&self, index: usize) -> Option<Position> {
        self.waypoints.get(index).copied()
    }

    pub fn start(&self) -> Position {
        self.waypoints[0]
    }

    pub fn end(&self) -> Position {
        self.waypoints[self.waypoints.len() - 1]
    }

    /// Index of the final waypoint.
    pub fn last_index(&self) -> usize {
        self.waypoints.len() - 1
    }

    pub fn segments(&self) -> impl Iterator<Item = (Position, Position)> + '_ {
        self.waypoints.windows(2).map(|w| (w[0], w[1]))
    }

    /// Distance from `point` to the nearest path segment.
    pub fn distance_to(&self, point: Position) -> f64 {
        self.segments()
            .map(|(a, b)| point_to_segment_distance(point, a, b))
            .fold(f64::INFINITY, f64::min)
    }

    /// Whether `point` keeps at least `clearance` units away from every segment.
    pub fn is_clear_of(&self, point: Position, clearance: f64) -> bool {
        self.distance_to(point) >= clearance
    }

    /// Total walking length of the route.
    pub fn length(&self) -> f64 {
        self.segments().map(|(a, b)| a.distance_to(&b)).sum()
    }
}

impl Default for Path {
    fn default() -> Self {
        Self::classic()
    }
}

impl TryFrom<Vec<Position>> for Path {
    type Error = PathError;

    fn try_from(waypoints: Vec<Position>) -> Result<Self, Self::Error> {
        Self::new(waypoints)
    }
}

impl From<Path> for Vec<Position> {
    fn from(path: Path) -> Self {
        path.waypoints
    }
}
