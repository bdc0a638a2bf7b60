// Occupancy grid and breadth-first path search
// Both operate on a snapshot of the snake body and never touch live game state

use crate::types::{Direction, Position};

/// Controls whether the tail cell counts as occupied when building a grid.
///
/// A snake that is not about to eat vacates its tail cell on the very next
/// move, so searches that head toward the tail may treat that cell as free.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TailPolicy {
    /// The tail cell blocks movement like any other body segment
    Blocked,
    /// The tail cell is treated as free because it is about to be vacated
    Vacating,
}

/// Boolean occupancy mask over the board, row-major, `true` = free
#[derive(Debug, Clone)]
pub struct OccupancyGrid {
    width: i32,
    height: i32,
    free: Vec<bool>,
}

impl OccupancyGrid {
    /// Builds the mask from a snake body.
    ///
    /// Out-of-bounds segments are skipped rather than rejected: a crashed
    /// head may already sit outside the board when callers inspect state.
    pub fn from_body(width: i32, height: i32, body: &[Position], tail_policy: TailPolicy) -> Self {
        let mut grid = OccupancyGrid {
            width,
            height,
            free: vec![true; (width * height) as usize],
        };

        for segment in body {
            grid.set_free(segment, false);
        }

        if tail_policy == TailPolicy::Vacating {
            if let Some(tail) = body.last() {
                grid.set_free(tail, true);
            }
        }

        grid
    }

    /// True when the position lies inside the board
    pub fn in_bounds(&self, pos: &Position) -> bool {
        pos.x >= 0 && pos.x < self.width && pos.y >= 0 && pos.y < self.height
    }

    /// True when the cell is inside the board and unoccupied
    pub fn is_free(&self, pos: &Position) -> bool {
        self.in_bounds(pos) && self.free[self.index(pos)]
    }

    /// Collects every free cell in row-major order
    pub fn free_cells(&self) -> Vec<Position> {
        let mut cells = Vec::new();
        for y in 0..self.height {
            for x in 0..self.width {
                let pos = Position::new(x, y);
                if self.free[self.index(&pos)] {
                    cells.push(pos);
                }
            }
        }
        cells
    }

    fn index(&self, pos: &Position) -> usize {
        (pos.y * self.width + pos.x) as usize
    }

    fn set_free(&mut self, pos: &Position, value: bool) {
        if self.in_bounds(pos) {
            let idx = self.index(pos);
            self.free[idx] = value;
        }
    }
}

/// Node in the search arena; parent links let the path be rebuilt backwards
#[derive(Debug, Clone, Copy)]
struct SearchNode {
    pos: Position,
    parent: Option<usize>,
}

/// Finds the shortest path between two cells across free cells of the grid.
///
/// The result lists every cell after `start` up to and including `goal`, so
/// its length equals the number of moves required. An empty vector means the
/// goal is unreachable (or coincides with the start). The start cell's own
/// occupancy is never consulted: it normally holds the snake's head.
///
/// # Arguments
/// * `grid` - Occupancy mask to search over
/// * `start` - Cell the search begins from (excluded from the result)
/// * `goal` - Cell the search must reach
///
/// # Returns
/// * `Vec<Position>` - Ordered path toward `goal`, empty when unreachable
pub fn shortest_path(grid: &OccupancyGrid, start: Position, goal: Position) -> Vec<Position> {
    if !grid.in_bounds(&start) {
        return Vec::new();
    }

    let mut visited = vec![false; grid.free.len()];
    visited[grid.index(&start)] = true;

    // The arena doubles as the FIFO queue: `cursor` walks it front to back
    // while newly discovered nodes are appended behind it.
    let mut arena = vec![SearchNode {
        pos: start,
        parent: None,
    }];
    let mut cursor = 0;

    while cursor < arena.len() {
        let current = arena[cursor];

        if current.pos == goal {
            return reconstruct(&arena, cursor);
        }

        for direction in Direction::all().iter() {
            let next = direction.apply(&current.pos);
            if !grid.is_free(&next) || visited[grid.index(&next)] {
                continue;
            }
            visited[grid.index(&next)] = true;
            arena.push(SearchNode {
                pos: next,
                parent: Some(cursor),
            });
        }

        cursor += 1;
    }

    Vec::new()
}

fn reconstruct(arena: &[SearchNode], goal_index: usize) -> Vec<Position> {
    let mut path = Vec::new();
    let mut index = Some(goal_index);
    while let Some(i) = index {
        path.push(arena[i].pos);
        index = arena[i].parent;
    }
    // The last node pushed is the start cell, which is not part of the path
    path.pop();
    path.reverse();
    path
}
