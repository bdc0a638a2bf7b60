// Headless runner: plays full games with the autopilot and logs outcomes
//
// The runner owns the caller duties the engine leaves out: it applies the
// chosen move to the live snake, handles eating and food placement, and
// decides when a game ends (win, death, or starvation timeout).

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::env;
use std::process;
use std::time::{Duration, Instant};

use snake_autopilot::bot::Bot;
use snake_autopilot::config::Config;
use snake_autopilot::snake::Snake;
use snake_autopilot::types::Direction;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Outcome {
    Won,
    Died,
    Starved,
}

impl Outcome {
    fn as_str(&self) -> &'static str {
        match self {
            Outcome::Won => "won",
            Outcome::Died => "died",
            Outcome::Starved => "starved",
        }
    }
}

struct GameReport {
    outcome: Outcome,
    score: u32,
    turns: u32,
    avg_decision: Duration,
    worst_decision: Duration,
}

/// Drives one game to completion, timing every decision
fn play_game(bot: &mut Bot, snake: &mut Snake, food_rng: &mut StdRng, starvation_limit: u32) -> GameReport {
    let mut turns = 0u32;
    let mut total = Duration::ZERO;
    let mut worst = Duration::ZERO;

    let outcome = loop {
        let started = Instant::now();
        let decided = bot.next_direction(snake);
        let elapsed = started.elapsed();

        total += elapsed;
        if elapsed > worst {
            worst = elapsed;
        }
        turns += 1;

        // With no safe move left, keep the current heading; the death that
        // follows is detected below.
        let direction = decided
            .or_else(|| snake.current_direction())
            .unwrap_or(Direction::Right);
        snake.advance(direction);

        if snake.is_eating() {
            snake.eat();
            snake.place_new_food(food_rng);
        }

        if snake.has_won() {
            break Outcome::Won;
        }
        if snake.is_dead() {
            break Outcome::Died;
        }
        if snake.turns_without_eating > starvation_limit {
            break Outcome::Starved;
        }
    };

    GameReport {
        outcome,
        score: snake.score,
        turns,
        avg_decision: total / turns,
        worst_decision: worst,
    }
}

fn print_usage(program: &str) {
    eprintln!("Snake autopilot headless runner");
    eprintln!();
    eprintln!("Usage: {} [options]", program);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --width <cells>    Board width (default from config)");
    eprintln!("  --height <cells>   Board height (default from config)");
    eprintln!("  --games <count>    Number of games to play (default from config)");
    eprintln!("  --seed <number>    Seed for reproducible runs");
    eprintln!("  --config <path>    Path to the configuration file (default: Snake.toml)");
    eprintln!("  --help             Show this help");
}

fn parse_value<T: std::str::FromStr>(args: &[String], i: usize, flag: &str) -> T {
    if i + 1 >= args.len() {
        eprintln!("Error: {} requires an argument", flag);
        process::exit(1);
    }
    args[i + 1].parse().unwrap_or_else(|_| {
        eprintln!("Error: invalid value for {}: '{}'", flag, args[i + 1]);
        process::exit(1);
    })
}

fn main() {
    // We default to 'info' level logging. But if the `RUST_LOG` environment
    // variable is set, we keep that value instead.
    if env::var("RUST_LOG").is_err() {
        env::set_var("RUST_LOG", "info");
    }
    env_logger::init();

    let args: Vec<String> = env::args().collect();

    let mut config_path = "Snake.toml".to_string();
    let mut width_override: Option<i32> = None;
    let mut height_override: Option<i32> = None;
    let mut games_override: Option<u32> = None;
    let mut seed: Option<u64> = None;

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--width" => {
                width_override = Some(parse_value(&args, i, "--width"));
                i += 1;
            }
            "--height" => {
                height_override = Some(parse_value(&args, i, "--height"));
                i += 1;
            }
            "--games" => {
                games_override = Some(parse_value(&args, i, "--games"));
                i += 1;
            }
            "--seed" => {
                seed = Some(parse_value(&args, i, "--seed"));
                i += 1;
            }
            "--config" => {
                if i + 1 >= args.len() {
                    eprintln!("Error: --config requires an argument");
                    process::exit(1);
                }
                config_path = args[i + 1].clone();
                i += 1;
            }
            "--help" => {
                print_usage(&args[0]);
                process::exit(0);
            }
            _ => {
                eprintln!("Error: Unknown option '{}'", args[i]);
                print_usage(&args[0]);
                process::exit(1);
            }
        }
        i += 1;
    }

    let config = if config_path == "Snake.toml" {
        Config::load_or_default()
    } else {
        match Config::from_file(&config_path) {
            Ok(config) => config,
            Err(e) => {
                eprintln!("Error: {}", e);
                process::exit(1);
            }
        }
    };

    let width = width_override.unwrap_or(config.board.width);
    let height = height_override.unwrap_or(config.board.height);
    let games = games_override.unwrap_or(config.runner.games);
    let starvation_limit = config.policy.starvation_limit(width, height);

    info!(
        "Playing {} game(s) on a {}x{} board{}",
        games,
        width,
        height,
        seed.map(|s| format!(", seed {}", s)).unwrap_or_default()
    );

    let mut wins = 0u32;
    let mut total_score = 0u64;
    let mut worst_decision = Duration::ZERO;

    for game in 0..games {
        let mut food_rng = match seed {
            Some(s) => StdRng::seed_from_u64(s.wrapping_add(game as u64)),
            None => StdRng::from_os_rng(),
        };
        let mut bot = match seed {
            Some(s) => Bot::with_seed(config.clone(), s.wrapping_add(game as u64).rotate_left(32)),
            None => Bot::new(config.clone()),
        };

        let mut snake = Snake::new(width, height, &mut food_rng);
        let report = play_game(&mut bot, &mut snake, &mut food_rng, starvation_limit);

        info!(
            "Game {}/{}: {} after {} turns, score {}, decisions avg {:?} worst {:?}",
            game + 1,
            games,
            report.outcome.as_str(),
            report.turns,
            report.score,
            report.avg_decision,
            report.worst_decision
        );

        if report.outcome == Outcome::Won {
            wins += 1;
        }
        total_score += report.score as u64;
        if report.worst_decision > worst_decision {
            worst_decision = report.worst_decision;
        }
    }

    info!(
        "Summary: {}/{} games won, average score {:.1}, worst decision {:?}",
        wins,
        games,
        total_score as f64 / games as f64,
        worst_decision
    );
}
