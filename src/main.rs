mod clock;
mod config;
mod error;
mod field;
mod game;
mod input;
mod session;
mod snake;
mod term;

use std::process::exit;

use log::error;

use crate::config::Config;
use crate::error::Result;

fn main() {
    // stderr only, so logs never land on the game screen
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("off")).init();

    if let Err(e) = run() {
        error!("{}", e);
        eprintln!("snake: {}", e);
        exit(1);
    }
}

fn run() -> Result<()> {
    let config = Config::load()?;
    let mut game = game::SnakeGame::new(config)?;
    game.run()
}
