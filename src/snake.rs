// Snake state: the live game entity plus the clone-based simulation
// primitives the decision layer builds on. Only the game loop mutates a
// live snake; everything speculative runs on copies.

use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::grid::{shortest_path, OccupancyGrid, TailPolicy};
use crate::types::{Direction, Position};

/// Full state of a single snake and the board it lives on
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snake {
    /// Body cells, head first, tail last
    pub body: Vec<Position>,
    /// Food items eaten so far
    pub score: u32,
    /// Position of the current food item
    pub food: Position,
    /// Board width in cells
    pub width: i32,
    /// Board height in cells
    pub height: i32,
    /// Every direction taken since the game started
    pub moves: Vec<Direction>,
    /// Ticks since the last meal, reset by `eat`
    pub turns_without_eating: u32,
    /// Body length at game start
    pub initial_length: u32,
}

impl Snake {
    /// Creates a two-segment snake centered on the board, heading right,
    /// with food placed on a random free cell.
    ///
    /// # Arguments
    /// * `width` - Board width in cells
    /// * `height` - Board height in cells
    /// * `rng` - Random source for the initial food placement
    pub fn new<R: Rng>(width: i32, height: i32, rng: &mut R) -> Self {
        let head = Position::new(width / 2, height / 2);
        let neck = Position::new(width / 2 - 1, height / 2);

        let mut snake = Snake {
            body: vec![head, neck],
            score: 0,
            // Placeholder until place_new_food runs below
            food: Position::new(0, 0),
            width,
            height,
            moves: vec![Direction::Right],
            turns_without_eating: 0,
            initial_length: 2,
        };
        snake.place_new_food(rng);
        snake
    }

    /// Head cell (first body segment)
    pub fn head(&self) -> Position {
        self.body[0]
    }

    /// Tail cell (last body segment)
    pub fn tail(&self) -> Position {
        self.body[self.body.len() - 1]
    }

    /// Total number of board cells
    pub fn cell_count(&self) -> u32 {
        (self.width * self.height) as u32
    }

    /// Advances the snake one cell in the given direction.
    /// The new head is prepended, the tail cell is vacated, and the move is
    /// recorded in the history.
    pub fn advance(&mut self, direction: Direction) {
        let new_head = direction.apply(&self.head());
        self.moves.push(direction);
        self.body.insert(0, new_head);
        self.body.pop();
    }

    /// True when the head has landed on the food cell
    pub fn is_eating(&self) -> bool {
        self.head() == self.food
    }

    /// Consumes the food under the head: the snake grows by one segment,
    /// the score increases, and the starvation counter resets.
    pub fn eat(&mut self) {
        self.grow();
        self.turns_without_eating = 0;
        self.score += 1;
        debug!("ate at ({}, {}), score {}", self.head().x, self.head().y, self.score);
    }

    fn grow(&mut self) {
        // The duplicated tail segment unfolds on the next advance
        let tail = self.tail();
        self.body.push(tail);
    }

    /// Moves the food to a random free cell. Does nothing when fewer than
    /// two free cells remain, which keeps the final cell reachable for the
    /// winning move.
    pub fn place_new_food<R: Rng>(&mut self, rng: &mut R) {
        let grid = OccupancyGrid::from_body(self.width, self.height, &self.body, TailPolicy::Blocked);
        let free = grid.free_cells();
        if free.len() > 1 {
            self.food = free[rng.random_range(0..free.len())];
            debug!("food placed at ({}, {})", self.food.x, self.food.y);
        }
    }

    /// True when the snake has hit a wall or its own body
    pub fn is_dead(&self) -> bool {
        self.hits_wall() || self.hits_self()
    }

    fn hits_wall(&self) -> bool {
        let head = self.head();
        head.x < 0 || head.x >= self.width || head.y < 0 || head.y >= self.height
    }

    fn hits_self(&self) -> bool {
        // The neck is skipped: a single-step move can never re-enter the
        // cell the head just left.
        let head = self.head();
        self.body.iter().skip(2).any(|segment| *segment == head)
    }

    /// True when the body has grown to cover the whole board
    pub fn has_won(&self) -> bool {
        self.score == self.cell_count() - self.initial_length
    }

    /// Returns a copy of the snake advanced one cell in the given direction
    pub fn after_move(&self, direction: Direction) -> Snake {
        let mut copy = self.clone();
        copy.advance(direction);
        copy
    }

    /// Returns a copy of the snake grown by one segment, as if it had just
    /// eaten. The starvation counter keeps its value: only a real meal on
    /// the live snake resets it.
    pub fn after_eat(&self) -> Snake {
        let mut copy = self.clone();
        copy.grow();
        copy.score += 1;
        copy
    }

    /// Shortest path from the head to the given cell under the tail policy.
    /// Empty when the cell cannot be reached.
    pub fn path_to(&self, goal: Position, tail_policy: TailPolicy) -> Vec<Position> {
        let grid = OccupancyGrid::from_body(self.width, self.height, &self.body, tail_policy);
        shortest_path(&grid, self.head(), goal)
    }

    /// Heading implied by the first two body segments.
    /// `None` for degenerate bodies whose head and neck are not adjacent.
    pub fn current_direction(&self) -> Option<Direction> {
        Direction::between(&self.body[1], &self.head())
    }

    /// The move recorded before the most recent one. Renderers derive the
    /// body glyph at a bend from this together with `current_direction`.
    /// Defaults to right while fewer than two moves exist.
    pub fn previous_direction(&self) -> Direction {
        if self.moves.len() < 2 {
            return Direction::Right;
        }
        self.moves[self.moves.len() - 2]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn test_snake(body: &[Position], width: i32, height: i32, food: Position) -> Snake {
        Snake {
            body: body.to_vec(),
            score: 0,
            food,
            width,
            height,
            moves: vec![Direction::Right],
            turns_without_eating: 0,
            initial_length: 2,
        }
    }

    #[test]
    fn new_snake_is_centered_and_heads_right() {
        let mut rng = StdRng::seed_from_u64(7);
        let snake = Snake::new(5, 5, &mut rng);

        assert_eq!(snake.body, vec![Position::new(2, 2), Position::new(1, 2)]);
        assert_eq!(snake.current_direction(), Some(Direction::Right));
        assert_eq!(snake.score, 0);
        assert_eq!(snake.initial_length, 2);
        assert!(!snake.body.contains(&snake.food), "food must spawn on a free cell");
    }

    #[test]
    fn advance_shifts_the_body_and_records_the_move() {
        let mut snake = test_snake(
            &[Position::new(2, 2), Position::new(1, 2)],
            5,
            5,
            Position::new(0, 0),
        );
        snake.advance(Direction::Up);

        assert_eq!(snake.body, vec![Position::new(2, 1), Position::new(2, 2)]);
        assert_eq!(*snake.moves.last().unwrap(), Direction::Up);
    }

    #[test]
    fn eat_grows_scores_and_resets_the_counter() {
        let mut snake = test_snake(
            &[Position::new(2, 2), Position::new(1, 2)],
            5,
            5,
            Position::new(2, 2),
        );
        snake.turns_without_eating = 9;

        assert!(snake.is_eating());
        snake.eat();

        assert_eq!(snake.body.len(), 3);
        assert_eq!(snake.tail(), Position::new(1, 2));
        assert_eq!(snake.score, 1);
        assert_eq!(snake.turns_without_eating, 0);
    }

    #[test]
    fn duplicated_tail_unfolds_on_the_next_advance() {
        let mut snake = test_snake(
            &[Position::new(2, 2), Position::new(1, 2)],
            5,
            5,
            Position::new(2, 2),
        );
        snake.eat();
        snake.advance(Direction::Right);

        assert_eq!(
            snake.body,
            vec![Position::new(3, 2), Position::new(2, 2), Position::new(1, 2)]
        );
    }

    #[test]
    fn wall_contact_is_fatal() {
        let mut snake = test_snake(
            &[Position::new(4, 2), Position::new(3, 2)],
            5,
            5,
            Position::new(0, 0),
        );
        snake.advance(Direction::Right);
        assert!(snake.is_dead());
    }

    #[test]
    fn body_contact_beyond_the_neck_is_fatal() {
        // Head bites the fourth segment of a coiled body
        let snake = test_snake(
            &[
                Position::new(2, 2),
                Position::new(2, 3),
                Position::new(3, 3),
                Position::new(3, 2),
                Position::new(2, 2),
            ],
            6,
            6,
            Position::new(0, 0),
        );
        assert!(snake.is_dead());
    }

    #[test]
    fn neck_overlap_is_not_fatal() {
        // Only segments beyond the neck count as self-collision
        let snake = test_snake(
            &[Position::new(2, 2), Position::new(2, 2), Position::new(3, 2)],
            6,
            6,
            Position::new(0, 0),
        );
        assert!(!snake.is_dead());
    }

    #[test]
    fn a_two_segment_snake_may_reverse() {
        let mut snake = test_snake(
            &[Position::new(2, 2), Position::new(3, 2)],
            6,
            6,
            Position::new(0, 0),
        );
        snake.advance(Direction::Right);

        assert_eq!(snake.body, vec![Position::new(3, 2), Position::new(2, 2)]);
        assert!(!snake.is_dead());
    }

    #[test]
    fn reversing_a_three_segment_snake_is_fatal() {
        let mut snake = test_snake(
            &[Position::new(2, 2), Position::new(3, 2), Position::new(4, 2)],
            6,
            6,
            Position::new(0, 0),
        );
        snake.advance(Direction::Right);
        assert!(snake.is_dead());
    }

    #[test]
    fn after_move_leaves_the_original_untouched() {
        let snake = test_snake(
            &[Position::new(2, 2), Position::new(1, 2)],
            5,
            5,
            Position::new(0, 0),
        );
        let moved = snake.after_move(Direction::Down);

        assert_eq!(snake.head(), Position::new(2, 2));
        assert_eq!(moved.head(), Position::new(2, 3));
        assert_eq!(snake.moves.len() + 1, moved.moves.len());
    }

    #[test]
    fn after_eat_does_not_reset_the_counter() {
        let mut snake = test_snake(
            &[Position::new(2, 2), Position::new(1, 2)],
            5,
            5,
            Position::new(0, 0),
        );
        snake.turns_without_eating = 5;
        let grown = snake.after_eat();

        assert_eq!(grown.body.len(), 3);
        assert_eq!(grown.score, 1);
        assert_eq!(grown.turns_without_eating, 5);
        assert_eq!(snake.body.len(), 2);
    }

    #[test]
    fn won_when_the_body_covers_the_board() {
        let mut snake = test_snake(
            &[Position::new(0, 0), Position::new(1, 0)],
            2,
            2,
            Position::new(0, 1),
        );
        assert!(!snake.has_won());
        snake.score = 2;
        assert!(snake.has_won());
    }

    #[test]
    fn food_is_not_placed_on_the_last_free_cell() {
        // 2x2 board with three cells occupied: the single free cell must
        // not receive food, so the previous food position stays.
        let mut snake = test_snake(
            &[Position::new(0, 0), Position::new(1, 0), Position::new(1, 1)],
            2,
            2,
            Position::new(9, 9),
        );
        let mut rng = StdRng::seed_from_u64(3);
        snake.place_new_food(&mut rng);
        assert_eq!(snake.food, Position::new(9, 9));
    }

    #[test]
    fn path_to_respects_the_tail_policy() {
        // Body folds around the head; the only way out is the tail cell.
        let snake = test_snake(
            &[
                Position::new(1, 1),
                Position::new(1, 0),
                Position::new(0, 0),
                Position::new(0, 1),
                Position::new(0, 2),
                Position::new(1, 2),
                Position::new(2, 2),
                Position::new(2, 1),
            ],
            5,
            5,
            Position::new(4, 4),
        );

        assert!(snake.path_to(snake.tail(), TailPolicy::Blocked).is_empty());
        assert_eq!(
            snake.path_to(snake.tail(), TailPolicy::Vacating),
            vec![Position::new(2, 1)]
        );
    }

    #[test]
    fn previous_direction_defaults_to_right() {
        let snake = test_snake(
            &[Position::new(2, 2), Position::new(1, 2)],
            5,
            5,
            Position::new(0, 0),
        );
        assert_eq!(snake.previous_direction(), Direction::Right);

        let mut snake = snake;
        snake.advance(Direction::Up);
        snake.advance(Direction::Left);
        assert_eq!(snake.previous_direction(), Direction::Up);
    }
}
