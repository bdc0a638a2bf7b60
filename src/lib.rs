// Library exports for the snake autopilot engine
// The headless runner and the integration tests build on these modules

pub mod bot;
pub mod config;
pub mod grid;
pub mod snake;
pub mod types;
