// Core value types: board positions and movement directions
// The board uses terminal orientation, so UP decreases y and DOWN increases it

use serde::{Deserialize, Serialize};

/// 2D cell coordinate on the board
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }
}

/// Represents the four possible movement directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns all directions in canonical order.
    /// Path search expands neighbors in this order, which pins down which of
    /// several equally short paths wins.
    pub fn all() -> [Direction; 4] {
        [Direction::Up, Direction::Down, Direction::Left, Direction::Right]
    }

    /// Returns the unit delta for this direction
    pub fn delta(&self) -> Position {
        match self {
            Direction::Up => Position { x: 0, y: -1 },
            Direction::Down => Position { x: 0, y: 1 },
            Direction::Left => Position { x: -1, y: 0 },
            Direction::Right => Position { x: 1, y: 0 },
        }
    }

    /// Calculates the next position when moving in this direction
    pub fn apply(&self, pos: &Position) -> Position {
        let d = self.delta();
        Position {
            x: pos.x + d.x,
            y: pos.y + d.y,
        }
    }

    /// Recovers the direction that leads from one cell to an adjacent one.
    /// Returns `None` when the cells are not exactly one step apart.
    pub fn between(from: &Position, to: &Position) -> Option<Direction> {
        match (to.x - from.x, to.y - from.y) {
            (0, -1) => Some(Direction::Up),
            (0, 1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Converts direction to string representation for log output
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_and_between_are_inverses() {
        let origin = Position::new(3, 3);
        for dir in Direction::all().iter() {
            let next = dir.apply(&origin);
            assert_eq!(Direction::between(&origin, &next), Some(*dir));
        }
    }

    #[test]
    fn between_rejects_non_unit_steps() {
        let origin = Position::new(3, 3);
        assert_eq!(Direction::between(&origin, &origin), None);
        assert_eq!(Direction::between(&origin, &Position::new(4, 4)), None);
        assert_eq!(Direction::between(&origin, &Position::new(3, 5)), None);
    }

    #[test]
    fn up_points_toward_smaller_y() {
        let moved = Direction::Up.apply(&Position::new(2, 2));
        assert_eq!(moved, Position::new(2, 1));
    }
}
