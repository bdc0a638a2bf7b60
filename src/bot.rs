// Decision layer: picks one direction per tick for the autopilot.
//
// The policy tries a verified route to the food first, then the longest
// safe path back to the tail, then any move that survives the next turn.
// Every candidate is evaluated on clones of the snake, so the live state
// is only mutated by the caller once a direction has been chosen.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::config::Config;
use crate::grid::TailPolicy;
use crate::snake::Snake;
use crate::types::{Direction, Position};

/// Autopilot with an OOP-style API: static configuration plus a random
/// source for the two uniform picks the policy can make.
pub struct Bot {
    config: Config,
    rng: StdRng,
}

impl Bot {
    /// Creates a new Bot instance with the given configuration
    ///
    /// # Arguments
    /// * `config` - Static configuration that does not change during the bot's lifetime
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            rng: StdRng::from_os_rng(),
        }
    }

    /// Creates a Bot whose random picks are reproducible from a seed.
    /// Seeded bots let the runner and the tests replay decisions exactly.
    pub fn with_seed(config: Config, seed: u64) -> Self {
        Bot {
            config,
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Computes the next direction for the snake.
    ///
    /// Fallback chain, most to least preferred:
    /// 1. Shortest route to the food, kept only when the snake could still
    ///    reach its own tail after eating (a guaranteed escape).
    /// 2. First step of the longest safe path back to the tail.
    /// 3. Any direction that survives the next turn, picked at random.
    /// 4. `None`: every move loses; the caller keeps the previous heading
    ///    and will detect the death that follows.
    ///
    /// The snake's starvation counter is advanced once per invocation;
    /// nothing else on the live snake is touched.
    ///
    /// # Arguments
    /// * `snake` - Live snake to decide for
    ///
    /// # Returns
    /// * `Option<Direction>` - Chosen direction, `None` when no safe move exists
    pub fn next_direction(&mut self, snake: &mut Snake) -> Option<Direction> {
        snake.turns_without_eating = snake.turns_without_eating.saturating_add(1);

        let food_path = snake.path_to(snake.food, TailPolicy::Blocked);
        if !food_path.is_empty() && self.food_route_is_safe(snake, &food_path) {
            debug!(
                "taking the food route toward ({}, {})",
                snake.food.x, snake.food.y
            );
            return Direction::between(&snake.head(), &food_path[0]);
        }

        let escape = self.longest_safe_path_to_tail(snake);
        if !escape.is_empty() {
            debug!("no safe food route, following the longest path to the tail");
            return Direction::between(&snake.head(), &escape[0]);
        }

        let accessible = self.accessible_directions(snake);
        if !accessible.is_empty() {
            debug!("no verified escape, picking a surviving direction at random");
            let pick = self.rng.random_range(0..accessible.len());
            return Some(accessible[pick]);
        }

        debug!("no safe move left");
        None
    }

    /// Walks the whole food route on a clone, eats, and requires a path
    /// back to the tail from the landing cell. A route that leaves the
    /// snake trapped is rejected, unless taking it wins the game outright.
    fn food_route_is_safe(&self, snake: &Snake, food_path: &[Position]) -> bool {
        let mut probe = snake.clone();
        for cell in food_path {
            if let Some(step) = Direction::between(&probe.head(), cell) {
                probe.advance(step);
            }
        }
        let probe = probe.after_eat();

        let tail_path = probe.path_to(probe.tail(), TailPolicy::Vacating);
        if tail_path.is_empty() {
            return false;
        }

        if snake.body.len() > 2 {
            if let Some(step) = Direction::between(&probe.head(), &tail_path[0]) {
                if probe.after_move(step).is_dead() {
                    // The step after the food is fatal, but when the food is
                    // the last free cell the game is won before that matters.
                    return snake.score == snake.cell_count() - snake.initial_length - 1;
                }
            }
        }
        true
    }

    /// Directions whose very next move does not kill the snake
    pub fn accessible_directions(&self, snake: &Snake) -> Vec<Direction> {
        Direction::all()
            .iter()
            .copied()
            .filter(|direction| !snake.after_move(*direction).is_dead())
            .collect()
    }

    /// Longest verified path back to the tail across every accessible
    /// direction. Branches run in parallel; each works on its own clone,
    /// so there is no shared state to guard. The returned path starts with
    /// the head cell after the branch move, then follows the tail route.
    ///
    /// Past the anti-loop threshold the pick is uniform among survivors
    /// instead of longest-first: the greedy choice can oscillate forever on
    /// some board shapes, and a random branch gets the snake unstuck.
    ///
    /// # Returns
    /// * `Vec<Position>` - Winning branch path, empty when no branch survives
    pub fn longest_safe_path_to_tail(&mut self, snake: &Snake) -> Vec<Position> {
        let mut branches: Vec<Vec<Position>> = self
            .accessible_directions(snake)
            .into_par_iter()
            .filter_map(|direction| Self::explore_branch(snake, direction))
            .collect();

        if branches.is_empty() {
            return Vec::new();
        }

        // Stable sort over a list collected in canonical direction order,
        // so equal-length branches resolve deterministically.
        branches.sort_by(|a, b| b.len().cmp(&a.len()));

        let loop_break = self
            .config
            .policy
            .loop_break_limit(snake.width, snake.height);
        if snake.turns_without_eating > loop_break {
            let pick = self.rng.random_range(0..branches.len());
            debug!(
                "anti-loop threshold passed ({} turns), random branch {} of {}",
                snake.turns_without_eating,
                pick,
                branches.len()
            );
            return branches.swap_remove(pick);
        }

        branches.swap_remove(0)
    }

    /// One ply of speculative exploration: move (eating when the move lands
    /// on the food), then require a non-empty path back to the tail and a
    /// survivable second step along it.
    fn explore_branch(snake: &Snake, direction: Direction) -> Option<Vec<Position>> {
        let mut probe = snake.after_move(direction);
        if probe.is_eating() {
            probe = probe.after_eat();
        }
        if probe.is_dead() {
            return None;
        }

        let tail_path = probe.path_to(probe.tail(), TailPolicy::Vacating);
        if tail_path.is_empty() || snake.body.len() <= 2 {
            return None;
        }

        let step = Direction::between(&probe.head(), &tail_path[0])?;
        let mut second = probe.after_move(step);
        if second.is_eating() {
            second = second.after_eat();
        }
        if second.is_dead() {
            return None;
        }

        let mut branch = Vec::with_capacity(tail_path.len() + 1);
        branch.push(probe.head());
        branch.extend(tail_path);
        Some(branch)
    }
}
